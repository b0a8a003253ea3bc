use axum::{
    Extension,
    http::{HeaderMap, StatusCode, header::SET_COOKIE},
    response::{Html, IntoResponse, Response},
};
use tracing::{info, warn};

use super::render_page;
use crate::{
    management::SESSION_COOKIE,
    search::{SearchFailure, SearchResponse},
    server::AppState,
    utils,
};

/// Starts a session: exchanges the client credentials for a token, keeps
/// it server-side and hands the browser a session cookie.
pub async fn index(Extension(state): Extension<AppState>, headers: HeaderMap) -> Response {
    let config = &state.config;
    let token = match state
        .service
        .spotify()
        .request_token(&config.client_id, &config.client_secret)
        .await
    {
        Ok(token) => token,
        Err(e) => {
            warn!(error = %e, "token exchange failed");
            let failed = SearchResponse::Failed(SearchFailure::InvalidRequest);
            return (
                StatusCode::BAD_GATEWAY,
                Html(render_page(None, Some(&failed))),
            )
                .into_response();
        }
    };

    if let Some(previous) = utils::cookie_value(&headers, SESSION_COOKIE) {
        state.sessions.remove(&previous).await;
    }
    let session_id = state.sessions.store(token).await;
    info!("session started");

    let cookie = format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax");
    ([(SET_COOKIE, cookie)], Html(render_page(None, None))).into_response()
}
