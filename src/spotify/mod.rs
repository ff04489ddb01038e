//! # Spotify Integration Module
//!
//! This module is the only place that talks to Spotify. It wraps a single
//! [`reqwest::Client`] configured with a bounded timeout and exposes the few
//! calls the service needs.
//!
//! ## API Coverage
//!
//! ### Authentication
//! - `GET /authorize` - Built by [`SpotifyClient::authorize_url`], visited by the browser
//! - `POST /api/token` - Authorization code exchange (PKCE)
//!
//! ### Playlists
//! - `GET /playlists/{playlist_id}/tracks` - First page of a playlist's items
//!
//! ### Player
//! - `PUT /me/player/play` - Start a track at a given offset on the active device
//!
//! ## Error Handling
//!
//! Nothing here retries. A failed call is reported once, with the upstream
//! status and the upstream body as Spotify sent it, so the caller can show it
//! to the user unchanged. Timeouts and connection failures carry no status.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let client = SpotifyClient::new(&settings)?;
//! let tracks = client.get_playlist_tracks(&token, "37i9dQZF1DXcBWIGoYBM5M").await?;
//! ```

pub mod auth;
pub mod player;
pub mod playlist;

use std::time::Duration;

use reqwest::Client;

use crate::config::Settings;

/// Handle to the Spotify accounts service and Web API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    auth_url: String,
    token_url: String,
    client_id: String,
    client_secret: Option<String>,
    redirect_uri: String,
    scope: String,
    timeout: Duration,
}

impl SpotifyClient {
    pub fn new(settings: &Settings) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(settings.http_timeout).build()?;

        Ok(Self {
            http,
            api_url: settings.api_url.clone(),
            auth_url: settings.auth_url.clone(),
            token_url: settings.token_url.clone(),
            client_id: settings.client_id.clone(),
            client_secret: settings.client_secret.clone(),
            redirect_uri: settings.redirect_uri.clone(),
            scope: settings.scope.clone(),
            timeout: settings.http_timeout,
        })
    }

    /// Human readable description of a failed send.
    fn describe(&self, err: &reqwest::Error) -> String {
        if err.is_timeout() {
            format!(
                "Spotify did not answer within {} seconds",
                self.timeout.as_secs_f32()
            )
        } else {
            err.to_string()
        }
    }
}
