//! sprofile library
//!
//! Signs a user in to the Spotify Web API with the OAuth 2.0 Authorization
//! Code flow with PKCE and renders their profile. A small local web server
//! plays the part of the profile page: it redirects the browser to Spotify,
//! receives the callback, exchanges the code and renders the result.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints of the local page server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error type shared by all stages
//! - `flow` - One page load: redirect, or exchange, fetch and render
//! - `management` - Handoff store carrying the code verifier between page loads
//! - `render` - Page and terminal rendering of a profile
//! - `server` - Local HTTP server for the page and the OAuth callback
//! - `spotify` - Spotify accounts service and Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - PKCE verifier/challenge generation and helpers
//!
//! # Example
//!
//! ```
//! use sprofile::{config, cli};
//!
//! #[tokio::main]
//! async fn main() -> sprofile::error::Result<()> {
//!     config::load_env().await?;
//!     cli::me(120, true).await;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod flow;
pub mod management;
pub mod render;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints a status line prefixed with a blue `o`.
///
/// Takes the same arguments as `println!`.
///
/// ```ignore
/// info!("Serving profile page on {}", url);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line prefixed with a green check mark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line to stderr and exits with status 1.
///
/// Diverges, so it can stand in for a value in a `match` arm:
///
/// ```ignore
/// let settings = match Settings::from_env() {
///     Ok(s) => s,
///     Err(e) => error!("Invalid configuration: {}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow `!` line to stderr; execution continues.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
