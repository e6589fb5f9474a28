//! Admin JSON surface. Writes go straight to the store and then drop the
//! read cache so the public pages pick up the change on the next request.

use axum::{
    Json, Router,
    extract::State,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::json;
use tracing::info;

use crate::{
    application::error::AppError,
    domain::{documents::Document, seo::SeoSettingsDocument},
};

use super::{HttpState, api::ApiError, middleware::require_admin};

pub(super) fn routes(state: HttpState) -> Router<HttpState> {
    Router::new()
        .route("/seo", get(seo_settings).post(save_seo_settings))
        .route("/cache/clear", post(clear_cache))
        .route("/storage-status", get(storage_status))
        .route_layer(middleware::from_fn_with_state(state, require_admin))
}

async fn seo_settings(State(state): State<HttpState>) -> Response {
    let settings = state
        .persistence
        .load_data(Document::SeoSettings, SeoSettingsDocument::default())
        .await
        .into_inner();
    Json(settings).into_response()
}

async fn save_seo_settings(
    State(state): State<HttpState>,
    Json(settings): Json<SeoSettingsDocument>,
) -> Response {
    match state
        .persistence
        .save_data(Document::SeoSettings, &settings)
        .await
    {
        Ok(()) => {
            state.content.clear_cache();
            Json(json!({ "success": true })).into_response()
        }
        Err(err) => ApiError::from_app(
            "infra::http::admin::save_seo_settings",
            &AppError::from(err),
        )
        .into_response(),
    }
}

async fn clear_cache(State(state): State<HttpState>) -> Response {
    state.content.clear_cache();
    info!("Content cache cleared by admin request");
    Json(json!({ "success": true })).into_response()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StorageStatus {
    storage_mode: &'static str,
    configured: bool,
    is_persistent: bool,
}

async fn storage_status(State(state): State<HttpState>) -> Response {
    let info = state.persistence.storage_info();
    Json(StorageStatus {
        storage_mode: info.mode,
        configured: info.configured,
        is_persistent: true,
    })
    .into_response()
}
