//! HTTP API module
//!
//! The renderer polls `/panel` and forwards user input to the calculator
//! endpoints.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/panel", get(panel_handler))
        .route("/calculators/:id", get(calculator_handler))
        .route("/calculators/:id/set", post(set_handler))
        .route("/calculators/:id/clear", post(clear_handler))
        .route("/calculators/:id/tap", post(tap_handler))
        .route("/calculators/:id/layout", post(calculator_layout_handler))
        .route("/displays/:kind/layout", post(display_layout_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
