use axum::{
    Extension,
    http::header::SET_COOKIE,
    response::{Html, IntoResponse, Response},
};

use super::AppState;
use crate::management::SESSION_COOKIE;

pub async fn logout(Extension(state): Extension<AppState>) -> Response {
    (
        [(SET_COOKIE, state.sessions.clear_cookie(SESSION_COOKIE))],
        Html("<h4>Signed out.</h4><p><a href=\"/login\">Sign in again</a></p>"),
    )
        .into_response()
}
