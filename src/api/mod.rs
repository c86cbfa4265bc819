//! # API Module
//!
//! HTTP endpoints of the local page server.
//!
//! - [`callback`] - the profile page itself. It is mounted at the application
//!   root and at the path of the configured redirect URI. A request without
//!   an authorization code starts a new PKCE sign-in; a request with one
//!   completes it and renders the profile.
//! - [`health`] - returns application status and version.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sprofile::server;
//!
//! let app = server::router(ctx, shared_profile)?;
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
