use std::fmt;

use rand::{Rng, seq::IndexedRandom};

use crate::{
    spotify::SpotifyClient,
    types::{PlaybackCommand, Track},
};

/// Playback always leaves at least this much of the track to be heard.
pub const MIN_REMAINING_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    /// Fetching the playlist failed. `status` is `None` for transport errors.
    UpstreamFetch { status: Option<u16>, body: String },
    /// Spotify rejected the play command.
    PlaybackDispatch { status: Option<u16>, body: String },
}

impl fmt::Display for PlaybackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaybackError::UpstreamFetch {
                status: Some(status),
                body,
            } => write!(f, "Error fetching playlist ({}): {}", status, body),
            PlaybackError::UpstreamFetch { status: None, body } => {
                write!(f, "Error fetching playlist: {}", body)
            }
            PlaybackError::PlaybackDispatch { body, .. } => {
                write!(f, "Error starting playback: {}", body)
            }
        }
    }
}

impl std::error::Error for PlaybackError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Playing { track: Track, position_ms: u64 },
    NoTracksFound,
}

impl PlaybackOutcome {
    pub fn message(&self) -> String {
        match self {
            PlaybackOutcome::Playing { track, .. } => {
                format!("Playing {} from a random position.", track.name)
            }
            PlaybackOutcome::NoTracksFound => "No songs found in the playlist.".to_string(),
        }
    }
}

/// Plays one random track of a playlist from a random offset.
pub struct PlaybackSelector<'a> {
    client: &'a SpotifyClient,
}

impl<'a> PlaybackSelector<'a> {
    pub fn new(client: &'a SpotifyClient) -> Self {
        Self { client }
    }

    /// Fetches the playlist, picks a track and starts it on the user's active
    /// device.
    ///
    /// No command is sent when the playlist has no playable tracks or the
    /// fetch fails. Errors are returned as soon as they happen, without retry.
    pub async fn play_random(
        &self,
        credential: &str,
        playlist_id: &str,
    ) -> Result<PlaybackOutcome, PlaybackError> {
        let tracks = self
            .client
            .get_playlist_tracks(credential, playlist_id)
            .await?;

        // thread rng is not Send, keep it out of the await below
        let chosen = choose_command(&tracks, &mut rand::rng());
        let Some((track, command)) = chosen else {
            return Ok(PlaybackOutcome::NoTracksFound);
        };

        self.client.start_playback(credential, &command).await?;

        Ok(PlaybackOutcome::Playing {
            track,
            position_ms: command.position_ms,
        })
    }
}

/// Picks a track uniformly at random and a start position inside it.
pub fn choose_command<R: Rng + ?Sized>(
    tracks: &[Track],
    rng: &mut R,
) -> Option<(Track, PlaybackCommand)> {
    let track = tracks.choose(rng)?.clone();
    let command = PlaybackCommand {
        track_uri: track.uri.clone(),
        position_ms: start_position(track.duration_ms, rng),
    };
    Some((track, command))
}

/// Uniform offset in `[0, duration_ms - MIN_REMAINING_MS]`.
///
/// Tracks shorter than `MIN_REMAINING_MS` start from the beginning.
pub fn start_position<R: Rng + ?Sized>(duration_ms: u64, rng: &mut R) -> u64 {
    match duration_ms.checked_sub(MIN_REMAINING_MS) {
        Some(0) | None => 0,
        Some(latest) => rng.random_range(0..=latest),
    }
}
