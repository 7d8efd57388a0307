use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{handlers, middleware::metrics_middleware, models, modes, presets, selection, settings, ws};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health and config
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        // Catalog views
        .route("/models", get(models::get_view))
        .route("/models/filter", post(models::set_filter))
        .route("/catalog/reload", post(models::reload_catalog))
        // Selection
        .route("/selection/toggle", post(selection::toggle))
        .route("/selection", delete(selection::clear))
        .route("/selection/names", post(selection::select_by_names))
        .route("/selection/all", post(selection::select_all))
        // Quick-select
        .route("/presets/{name}", post(presets::apply_preset))
        // Modes
        .route("/modes", get(modes::get_modes).post(modes::set_modes))
        // Settings
        .route("/settings/export", get(settings::export_settings))
        .route("/settings/import", post(settings::import_settings))
        // Live events
        .route("/ws", get(ws::ws_handler))
        .with_state(state.clone());

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/metrics", get(handlers::get_metrics))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
