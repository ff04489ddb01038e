use super::SpotifyClient;
use crate::{
    management::PlaybackError,
    types::{PlaylistTracksResponse, Track},
};

const PAGE_LIMIT: u32 = 100;
const TRACK_FIELDS: &str = "items(track(uri,name,duration_ms,is_local))";

impl SpotifyClient {
    /// Retrieves the playable tracks of a playlist.
    ///
    /// Only the first page (up to 100 items) is fetched. Items whose track is
    /// gone from the catalogue (`null`) and local files are left out, since
    /// neither can be started through the player API.
    ///
    /// # Errors
    ///
    /// Every failure maps to [`PlaybackError::UpstreamFetch`]:
    /// - transport errors and timeouts, without status
    /// - non-success responses (401 expired token, 404 unknown playlist, ...),
    ///   with the status and the body as returned
    /// - a success response that does not decode into the expected shape
    pub async fn get_playlist_tracks(
        &self,
        token: &str,
        playlist_id: &str,
    ) -> Result<Vec<Track>, PlaybackError> {
        let api_url = format!(
            "{uri}/playlists/{id}/tracks",
            uri = self.api_url,
            id = playlist_id
        );

        let limit = PAGE_LIMIT.to_string();
        let response = self
            .http
            .get(&api_url)
            .query(&[("limit", limit.as_str()), ("fields", TRACK_FIELDS)])
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| PlaybackError::UpstreamFetch {
                status: None,
                body: self.describe(&e),
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PlaybackError::UpstreamFetch {
                status: Some(status.as_u16()),
                body: self.describe(&e),
            })?;

        if !status.is_success() {
            return Err(PlaybackError::UpstreamFetch {
                status: Some(status.as_u16()),
                body,
            });
        }

        let json: PlaylistTracksResponse =
            serde_json::from_str(&body).map_err(|e| PlaybackError::UpstreamFetch {
                status: Some(status.as_u16()),
                body: format!("unexpected playlist response: {}", e),
            })?;

        Ok(json
            .items
            .into_iter()
            .filter_map(|item| item.track)
            .filter(|track| !track.is_local)
            .collect())
    }
}
