use std::fmt;

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use reqwest::Url;
use sha2::{Digest, Sha256};

pub const PLAYLIST_ID_LEN: usize = 22;

pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Opaque value echoed back by the authorization server to bind the callback
/// to the browser that started the login.
pub fn generate_state() -> String {
    random_alphanumeric(32)
}

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistIdError {
    Empty,
    UnsupportedLink(String),
    InvalidId(String),
}

impl fmt::Display for PlaylistIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaylistIdError::Empty => write!(f, "Please enter a playlist link or ID."),
            PlaylistIdError::UnsupportedLink(link) => {
                write!(f, "Not a Spotify playlist link: {}", link)
            }
            PlaylistIdError::InvalidId(id) => write!(f, "Invalid playlist ID: {}", id),
        }
    }
}

impl std::error::Error for PlaylistIdError {}

/// Extracts the bare playlist ID from user input.
///
/// Accepted forms:
/// - `37i9dQZF1DXcBWIGoYBM5M`
/// - `spotify:playlist:37i9dQZF1DXcBWIGoYBM5M`
/// - `spotify:user:someone:playlist:37i9dQZF1DXcBWIGoYBM5M`
/// - `https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=...`
/// - `https://open.spotify.com/intl-de/playlist/37i9dQZF1DXcBWIGoYBM5M`
pub fn parse_playlist_id(input: &str) -> Result<String, PlaylistIdError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(PlaylistIdError::Empty);
    }

    let unsupported = || PlaylistIdError::UnsupportedLink(input.to_string());

    let candidate = if input.starts_with("spotify:") {
        segment_after_playlist(input.split(':')).ok_or_else(unsupported)?
    } else if input.starts_with("http://") || input.starts_with("https://") {
        let url = Url::parse(input).map_err(|_| unsupported())?;
        let host = url.host_str().unwrap_or_default();
        if host != "open.spotify.com" && host != "play.spotify.com" {
            return Err(unsupported());
        }
        url.path_segments()
            .and_then(segment_after_playlist)
            .ok_or_else(unsupported)?
    } else {
        input.to_string()
    };

    if is_valid_playlist_id(&candidate) {
        Ok(candidate)
    } else {
        Err(PlaylistIdError::InvalidId(candidate))
    }
}

fn segment_after_playlist<'a, I>(segments: I) -> Option<String>
where
    I: Iterator<Item = &'a str>,
{
    let mut segments = segments.skip_while(|s| *s != "playlist");
    segments.next()?;
    segments
        .next()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn is_valid_playlist_id(id: &str) -> bool {
    id.len() == PLAYLIST_ID_LEN && id.chars().all(|c| c.is_ascii_alphanumeric())
}
