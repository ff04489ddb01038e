use axum::{
    Extension,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};

use super::AppState;
use crate::{management::SESSION_COOKIE, types::SessionData};

const PLAY_FORM: &str = r#"<!doctype html>
<html>
  <head><title>Spotify Time</title></head>
  <body>
    <form action="/play" method="post">
      <label>Playlist link or ID: <input type="text" name="playlist_id" autofocus></label>
      <input type="submit" value="Play Random Song">
    </form>
    <p><a href="/logout">Sign out</a></p>
  </body>
</html>
"#;

pub async fn index(Extension(state): Extension<AppState>, headers: HeaderMap) -> Response {
    match state.sessions.read::<SessionData>(&headers, SESSION_COOKIE) {
        Some(_) => Html(PLAY_FORM).into_response(),
        None => Redirect::to("/login").into_response(),
    }
}
