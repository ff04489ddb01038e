//! Fake Spotify upstream for integration tests.
//!
//! Serves the accounts token endpoint and the two Web API endpoints the
//! service uses on an ephemeral local port, with canned responses, and
//! records every request it receives.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Extension, Form, Router,
    extract::Path,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde_json::{Value, json};
use spotifytime::config::Settings;

pub const SECRET: &str = "0123456789abcdef0123456789abcdef";
pub const OLD_SECRET: &str = "fedcba9876543210fedcba9876543210";

#[derive(Clone)]
pub struct Canned {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
}

impl Canned {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn respond(&self) -> Response {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (
            StatusCode::from_u16(self.status).unwrap(),
            [(header::CONTENT_TYPE, "application/json")],
            self.body.clone(),
        )
            .into_response()
    }
}

#[derive(Default)]
pub struct Recorded {
    pub playlist_ids: Vec<String>,
    pub playlist_auth: Vec<Option<String>>,
    pub play_bodies: Vec<Value>,
    pub play_auth: Vec<Option<String>>,
    pub token_forms: Vec<HashMap<String, String>>,
    pub token_auth: Vec<Option<String>>,
}

struct FakeState {
    playlist: Canned,
    play: Canned,
    token: Canned,
    recorded: Mutex<Recorded>,
}

pub struct FakeSpotify {
    pub base_url: String,
    state: Arc<FakeState>,
}

impl FakeSpotify {
    pub async fn start(playlist: Canned, play: Canned) -> Self {
        Self::start_with_token(playlist, play, token_ok("fake-access-token")).await
    }

    pub async fn start_with_token(playlist: Canned, play: Canned, token: Canned) -> Self {
        let state = Arc::new(FakeState {
            playlist,
            play,
            token,
            recorded: Mutex::new(Recorded::default()),
        });

        let app = Router::new()
            .route("/v1/playlists/{id}/tracks", get(playlist_tracks))
            .route("/v1/me/player/play", put(start_playback))
            .route("/api/token", post(token_endpoint))
            .layer(Extension(Arc::clone(&state)));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn settings(&self) -> Settings {
        settings_for(&self.base_url)
    }

    pub fn recorded<T>(&self, f: impl FnOnce(&Recorded) -> T) -> T {
        f(&self.state.recorded.lock().unwrap())
    }
}

fn auth_header(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn playlist_tracks(
    Extension(state): Extension<Arc<FakeState>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    {
        let mut recorded = state.recorded.lock().unwrap();
        recorded.playlist_ids.push(id);
        recorded.playlist_auth.push(auth_header(&headers));
    }
    state.playlist.respond().await
}

async fn start_playback(
    Extension(state): Extension<Arc<FakeState>>,
    headers: HeaderMap,
    body: String,
) -> Response {
    {
        let mut recorded = state.recorded.lock().unwrap();
        recorded
            .play_bodies
            .push(serde_json::from_str(&body).unwrap_or(Value::Null));
        recorded.play_auth.push(auth_header(&headers));
    }
    state.play.respond().await
}

async fn token_endpoint(
    Extension(state): Extension<Arc<FakeState>>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> Response {
    {
        let mut recorded = state.recorded.lock().unwrap();
        recorded.token_forms.push(form);
        recorded.token_auth.push(auth_header(&headers));
    }
    state.token.respond().await
}

pub fn settings_for(base_url: &str) -> Settings {
    let vars = env_for(base_url);
    Settings::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

pub fn env_for(base_url: &str) -> HashMap<String, String> {
    [
        ("SPOTIFY_API_AUTH_CLIENT_ID", "test-client".to_string()),
        (
            "SPOTIFY_API_REDIRECT_URI",
            "http://127.0.0.1:8000/callback".to_string(),
        ),
        ("SPOTIFY_API_AUTH_URL", format!("{}/authorize", base_url)),
        ("SPOTIFY_API_TOKEN_URL", format!("{}/api/token", base_url)),
        ("SPOTIFY_API_URL", format!("{}/v1", base_url)),
        ("SESSION_SECRET", SECRET.to_string()),
        ("HTTP_TIMEOUT_SECS", "1".to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

pub fn playlist_body(tracks: &[(&str, &str, u64)]) -> String {
    let items: Vec<Value> = tracks
        .iter()
        .map(|(uri, name, duration_ms)| {
            json!({
                "track": { "uri": uri, "name": name, "duration_ms": duration_ms, "is_local": false }
            })
        })
        .collect();
    json!({ "items": items }).to_string()
}

pub fn token_ok(access_token: &str) -> Canned {
    Canned::new(
        200,
        json!({
            "access_token": access_token,
            "token_type": "Bearer",
            "scope": "user-modify-playback-state",
            "expires_in": 3600,
            "refresh_token": "fake-refresh-token"
        })
        .to_string(),
    )
}

pub fn no_content() -> Canned {
    Canned::new(204, "")
}
