use super::SpotifyClient;
use crate::{
    management::PlaybackError,
    types::{PlaybackCommand, StartPlaybackRequest},
};

impl SpotifyClient {
    /// Starts `command.track_uri` at `command.position_ms` on the user's
    /// active device.
    ///
    /// Spotify answers `204 No Content` on success. Any other 2xx is accepted
    /// as well; everything else becomes [`PlaybackError::PlaybackDispatch`]
    /// with the response body unchanged (for example the `NO_ACTIVE_DEVICE`
    /// error when no player is open).
    pub async fn start_playback(
        &self,
        token: &str,
        command: &PlaybackCommand,
    ) -> Result<(), PlaybackError> {
        let api_url = format!("{uri}/me/player/play", uri = self.api_url);

        let response = self
            .http
            .put(&api_url)
            .bearer_auth(token)
            .json(&StartPlaybackRequest::from(command))
            .send()
            .await
            .map_err(|e| PlaybackError::PlaybackDispatch {
                status: None,
                body: self.describe(&e),
            })?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.map_err(|e| PlaybackError::PlaybackDispatch {
            status: Some(status.as_u16()),
            body: self.describe(&e),
        })?;
        Err(PlaybackError::PlaybackDispatch {
            status: Some(status.as_u16()),
            body,
        })
    }
}
