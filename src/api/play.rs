use axum::{
    Extension, Form,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use super::AppState;
use crate::{
    management::{PlaybackOutcome, PlaybackSelector, SESSION_COOKIE},
    success,
    types::SessionData,
    utils, warning,
};

#[derive(Debug, Deserialize)]
pub struct PlayForm {
    #[serde(default)]
    pub playlist_id: String,
}

pub async fn play(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Form(form): Form<PlayForm>,
) -> Response {
    let Some(session) = state.sessions.read::<SessionData>(&headers, SESSION_COOKIE) else {
        return Redirect::to("/login").into_response();
    };

    let playlist_id = match utils::parse_playlist_id(&form.playlist_id) {
        Ok(id) => id,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    match PlaybackSelector::new(&state.spotify)
        .play_random(&session.access_token, &playlist_id)
        .await
    {
        Ok(outcome) => {
            if let PlaybackOutcome::Playing { track, position_ms } = &outcome {
                success!("Playing {} ({}) at {} ms", track.name, track.uri, position_ms);
            }
            (StatusCode::OK, outcome.message()).into_response()
        }
        Err(e) => {
            warning!("Playlist {}: {}", playlist_id, e);
            (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
        }
    }
}
