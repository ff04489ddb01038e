use crate::{config::Settings, management::SessionManager, spotify::SpotifyClient};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub spotify: SpotifyClient,
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(settings: &Settings) -> Result<Self, reqwest::Error> {
        Ok(Self {
            spotify: SpotifyClient::new(settings)?,
            sessions: SessionManager::from_settings(settings),
        })
    }
}
