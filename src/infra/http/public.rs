use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    routing::get,
};

use serde::Deserialize;

use crate::presentation::views::{
    AboutTemplate, GameListTemplate, GameTemplate, IndexTemplate, SearchTemplate,
    render_not_found_response, render_template_response,
};

use super::HttpState;

pub(super) fn routes() -> Router<HttpState> {
    Router::new()
        .route("/", get(index))
        .route("/new-games", get(new_games))
        .route("/game/{id}", get(game_detail))
        .route("/about", get(about))
        .route("/search", get(search))
}

#[derive(Debug, Default, Deserialize)]
struct SearchParams {
    #[serde(default)]
    q: Option<String>,
}

async fn index(State(state): State<HttpState>) -> Response {
    let view = state.pages.home().await;
    render_template_response(IndexTemplate { view }, StatusCode::OK)
}

async fn new_games(State(state): State<HttpState>) -> Response {
    let view = state.pages.new_games().await;
    render_template_response(GameListTemplate { view }, StatusCode::OK)
}

async fn game_detail(State(state): State<HttpState>, Path(id): Path<String>) -> Response {
    match state.pages.game(&id).await {
        Some(view) => render_template_response(GameTemplate { view }, StatusCode::OK),
        None => not_found(State(state)).await,
    }
}

async fn about(State(state): State<HttpState>) -> Response {
    let view = state.pages.about().await;
    render_template_response(AboutTemplate { view }, StatusCode::OK)
}

async fn search(State(state): State<HttpState>, Query(params): Query<SearchParams>) -> Response {
    let view = state.pages.search(params.q.as_deref().unwrap_or_default()).await;
    render_template_response(SearchTemplate { view }, StatusCode::OK)
}

pub(super) async fn not_found(State(state): State<HttpState>) -> Response {
    render_not_found_response(state.pages.not_found_chrome().await)
}
