//! # Spotify Integration Module
//!
//! HTTP integration with the Spotify accounts service and Web API. Everything
//! sprofile sends to or receives from Spotify goes through this module.
//!
//! ## Modules
//!
//! - [`auth`] - OAuth 2.0 Authorization Code flow with PKCE:
//!   - builds the `/authorize` URL from the configured client id, redirect
//!     URI, scope and the S256 code challenge,
//!   - persists the code verifier in the handoff store before the browser is
//!     sent away,
//!   - exchanges the returned code together with the stored verifier for an
//!     access token (`POST /api/token`).
//! - [`profile`] - fetches the current user's profile (`GET /me`) with the
//!   access token as bearer credential.
//!
//! ## Error Handling
//!
//! Nothing here retries. A transport failure, a rejected exchange or a body
//! that does not match its schema is returned as a [`crate::error::Error`]
//! and aborts the rest of the sign-in.
//!
//! ## Tokens
//!
//! Access tokens live only for the duration of one page load. They are never
//! written to disk and never refreshed.

pub mod auth;
pub mod profile;
