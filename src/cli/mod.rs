//! # CLI Module
//!
//! User-facing commands of sprofile. Each command builds the shared
//! [`AppContext`] from the environment and drives the local page server or
//! the handoff store.
//!
//! ## Commands
//!
//! - [`serve`] - runs the profile page until interrupted
//! - [`me`] - runs the page for a single sign-in and prints the profile
//! - [`reset`] - discards a stored code verifier
//!
//! Fatal problems terminate the process through the `error!` macro.

mod me;
mod reset;
mod serve;

use std::sync::Arc;

use crate::{config::Settings, error, flow::AppContext, management::FileHandoffStore, warning};

pub use me::me;
pub use reset::reset;
pub use serve::serve;

/// Builds the page context from the environment and the on-disk handoff store.
fn build_context() -> AppContext {
    let settings = match Settings::from_env() {
        Ok(s) => s,
        Err(e) => error!("Invalid configuration: {}", e),
    };
    if let Some(problem) = settings.redirect_port_mismatch() {
        warning!("{}; the callback cannot reach this server.", problem);
    }
    AppContext::new(settings, Arc::new(FileHandoffStore::default_location()))
}

/// Opens `url` in the default browser, or asks the user to do so.
fn open_in_browser(url: &str) {
    if webbrowser::open(url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            url
        )
    }
}
