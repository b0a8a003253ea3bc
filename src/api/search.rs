use axum::{
    Extension, Form,
    extract::Query,
    http::HeaderMap,
    response::{Html, IntoResponse, Redirect, Response},
};

use super::render_page;
use crate::{management::SESSION_COOKIE, search::SearchQuery, server::AppState, utils};

pub async fn search_get(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Query(query): Query<SearchQuery>,
) -> Response {
    run_search(state, headers, query).await
}

pub async fn search_post(
    Extension(state): Extension<AppState>,
    headers: HeaderMap,
    Form(query): Form<SearchQuery>,
) -> Response {
    run_search(state, headers, query).await
}

async fn run_search(state: AppState, headers: HeaderMap, query: SearchQuery) -> Response {
    let token = match utils::cookie_value(&headers, SESSION_COOKIE) {
        Some(session_id) => state.sessions.valid_token(&session_id).await,
        None => None,
    };
    let Some(token) = token else {
        return Redirect::to("/").into_response();
    };

    let response = state
        .service
        .search(&token.authorization(), &query.artist, &query.track)
        .await;

    Html(render_page(Some(&query), Some(&response))).into_response()
}
