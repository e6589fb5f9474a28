mod admin;
mod api;
mod middleware;
mod public;

pub use api::ApiError;

use std::sync::Arc;

use axum::{Router, middleware as axum_middleware};

use crate::{
    application::{
        ads::AdService, catalog::CatalogService, content::ContentService, health::HealthService,
        page::PageService, persistence::PersistentDataManager,
    },
    config::{AdminSettings, DataSettings},
};

use self::middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct HttpState {
    pub content: Arc<ContentService>,
    pub pages: Arc<PageService>,
    pub catalog: CatalogService,
    pub ads: AdService,
    pub persistence: PersistentDataManager,
    pub health: Arc<HealthService>,
    pub admin_enabled: bool,
}

impl HttpState {
    /// Wire every service around one shared content cache.
    pub fn new(content: Arc<ContentService>, data: &DataSettings, admin: &AdminSettings) -> Self {
        Self {
            pages: Arc::new(PageService::new(Arc::clone(&content))),
            catalog: CatalogService::new(Arc::clone(&content)),
            ads: AdService::new(Arc::clone(&content)),
            persistence: PersistentDataManager::new(Arc::clone(content.store())),
            health: Arc::new(HealthService::new(
                &data.directory,
                &data.uploads_directory,
            )),
            admin_enabled: admin.enabled,
            content,
        }
    }
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .merge(public::routes())
        .merge(api::routes())
        .nest("/api/admin", admin::routes(state.clone()))
        .fallback(public::not_found)
        .with_state(state)
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
}
