//! # API Module
//!
//! HTTP endpoints of the spotifytime web service.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - Starts the Spotify OAuth 2.0 PKCE flow. Stores the code
//!   verifier and a CSRF `state` in a short-lived signed cookie and redirects
//!   the browser to Spotify.
//! - [`callback`] - Completes the flow: checks `state`, exchanges the code for
//!   an access token and stores the token in the signed session cookie.
//! - [`logout`] - Drops the session cookie.
//!
//! ### Playback
//!
//! - [`index`] - Playlist form for signed-in users, redirect to `/login` otherwise.
//! - [`play`] - Parses the submitted playlist link and plays a random track of
//!   it at a random position. Outcomes and upstream errors are returned as
//!   plain text.
//!
//! ### Monitoring
//!
//! - [`health`] - Status and version for load balancers.
//!
//! ## State
//!
//! Handlers receive an [`AppState`] through an [`axum::Extension`] layer. It is
//! read-only; the only per-user data lives in the browser's signed cookies.

mod callback;
mod health;
mod index;
mod login;
mod logout;
mod play;
mod state;

pub use callback::callback;
pub use health::health;
pub use index::index;
pub use login::login;
pub use logout::logout;
pub use play::play;
pub use state::AppState;
