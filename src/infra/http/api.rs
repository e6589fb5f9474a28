use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::application::{
    catalog::{GameQuery, PageRequest},
    error::{AppError, ErrorReport},
};

use super::HttpState;

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub success: bool,
    pub error: String,
}

/// JSON error with a diagnostic report for the response logger.
#[derive(Debug)]
pub struct ApiError {
    source: &'static str,
    status: StatusCode,
    message: String,
    detail: Option<String>,
}

impl ApiError {
    pub fn new(source: &'static str, status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            source,
            status,
            message: message.into(),
            detail: None,
        }
    }

    pub fn from_app(source: &'static str, err: &AppError) -> Self {
        Self {
            source,
            status: err.status_code(),
            message: err.presentation_message().to_string(),
            detail: Some(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let report = ErrorReport::from_message(
            self.source,
            self.status,
            self.detail.unwrap_or_else(|| self.message.clone()),
        );
        let body = ApiErrorBody {
            success: false,
            error: self.message,
        };
        let mut response = (self.status, Json(body)).into_response();
        report.attach(&mut response);
        response
    }
}

pub(super) fn routes() -> Router<HttpState> {
    Router::new()
        .route("/api/games", get(list_games))
        .route("/api/games/{id}", get(game_by_id))
        .route("/api/featured-games", get(featured_games))
        .route("/api/ads", get(ads))
        .route("/api/health", get(health))
}

/// Raw query values; anything that is not a positive integer falls back to the defaults.
#[derive(Debug, Default, Deserialize)]
struct GamesParams {
    limit: Option<String>,
    page: Option<String>,
    category: Option<String>,
}

impl GamesParams {
    fn into_query(self) -> GameQuery {
        let pagination = (self.limit.is_some() || self.page.is_some()).then(|| {
            PageRequest::new(
                self.page.as_deref().and_then(parse_number),
                self.limit.as_deref().and_then(parse_number),
            )
        });

        GameQuery {
            category: self.category.filter(|category| !category.trim().is_empty()),
            pagination,
        }
    }
}

fn parse_number(raw: &str) -> Option<usize> {
    raw.trim().parse().ok()
}

async fn list_games(
    State(state): State<HttpState>,
    Query(params): Query<GamesParams>,
) -> Response {
    let listing = state.catalog.list_games(&params.into_query()).await;
    Json(listing).into_response()
}

async fn game_by_id(State(state): State<HttpState>, Path(id): Path<String>) -> Response {
    match state.catalog.active_game(&id).await {
        Ok(game) => Json(game).into_response(),
        Err(_) => ApiError::new(
            "infra::http::api::game_by_id",
            StatusCode::NOT_FOUND,
            "Game not found",
        )
        .into_response(),
    }
}

async fn featured_games(State(state): State<HttpState>) -> Response {
    Json(state.catalog.active_featured_games().await).into_response()
}

async fn ads(State(state): State<HttpState>) -> Response {
    Json(state.ads.active_ads().await).into_response()
}

async fn health(State(state): State<HttpState>) -> Response {
    let report = state.health.report().await;
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(report)).into_response()
}
