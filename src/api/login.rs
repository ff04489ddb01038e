use axum::{
    Extension,
    http::{StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};

use super::AppState;
use crate::{
    info,
    management::{LOGIN_COOKIE, LOGIN_TTL_SECS},
    types::PendingLogin,
    utils, warning,
};

pub async fn login(Extension(state): Extension<AppState>) -> Response {
    let pending = PendingLogin {
        code_verifier: utils::generate_code_verifier(),
        state: utils::generate_state(),
    };
    let code_challenge = utils::generate_code_challenge(&pending.code_verifier);

    let auth_url = match state.spotify.authorize_url(&code_challenge, &pending.state) {
        Ok(url) => url,
        Err(e) => {
            warning!("Cannot build authorization URL: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Login is misconfigured.").into_response();
        }
    };

    let sealed = match state.sessions.seal(&pending, LOGIN_TTL_SECS) {
        Ok(sealed) => sealed,
        Err(e) => {
            warning!("Cannot seal login state: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Login is misconfigured.").into_response();
        }
    };

    info!("Redirecting to Spotify for authorization");
    (
        [(
            SET_COOKIE,
            state
                .sessions
                .set_cookie(LOGIN_COOKIE, &sealed, LOGIN_TTL_SECS),
        )],
        Redirect::to(&auth_url),
    )
        .into_response()
}
