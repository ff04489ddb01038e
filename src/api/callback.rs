use axum::{
    Extension,
    extract::Query,
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use super::AppState;
use crate::{
    management::{LOGIN_COOKIE, SESSION_COOKIE},
    success,
    types::{PendingLogin, SessionData},
    warning,
};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

pub async fn callback(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
) -> Response {
    if let Some(error) = params.error {
        warning!("Authorization denied: {}", error);
        return (StatusCode::BAD_REQUEST, format!("Login failed: {}", error)).into_response();
    }

    let Some(code) = params.code else {
        return (StatusCode::BAD_REQUEST, "Missing authorization code.").into_response();
    };

    let Some(pending) = state.sessions.read::<PendingLogin>(&headers, LOGIN_COOKIE) else {
        return (
            StatusCode::BAD_REQUEST,
            "Login expired or was started in another browser. Please try again.",
        )
            .into_response();
    };

    if params.state.as_deref() != Some(pending.state.as_str()) {
        warning!("Authorization callback with mismatching state");
        return (StatusCode::BAD_REQUEST, "Login state mismatch.").into_response();
    }

    let token = match state
        .spotify
        .exchange_code_pkce(&code, &pending.code_verifier)
        .await
    {
        Ok(token) => token,
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            return (StatusCode::BAD_GATEWAY, format!("Login failed: {}", e)).into_response();
        }
    };

    let session = SessionData {
        access_token: token.access_token,
    };
    let sealed = match state.sessions.seal(&session, token.expires_in) {
        Ok(sealed) => sealed,
        Err(e) => {
            warning!("Cannot seal session: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Login failed.").into_response();
        }
    };

    success!("Authentication successful (scope: {})", token.scope);
    (
        AppendHeaders([
            (
                SET_COOKIE,
                state
                    .sessions
                    .set_cookie(SESSION_COOKIE, &sealed, token.expires_in),
            ),
            (SET_COOKIE, state.sessions.clear_cookie(LOGIN_COOKIE)),
        ]),
        Redirect::to("/"),
    )
        .into_response()
}
