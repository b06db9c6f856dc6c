//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{debug, error, info};

use crate::{
    components::{CalculatorWidget, DisplayKind},
    state::{AppState, Bounds, Point, CALCULATORS_PER_ROW},
};
use super::responses::{
    CalculatorView, DisplayView, HealthResponse, PanelResponse, RowView, TapRequest, TapResponse,
};

fn find_calculator(state: &AppState, id: usize) -> Result<&Arc<CalculatorWidget>, StatusCode> {
    state.calculator(id).ok_or_else(|| {
        debug!("No calculator with id {}", id);
        StatusCode::NOT_FOUND
    })
}

fn internal_error(context: &str) -> impl FnOnce(String) -> StatusCode + '_ {
    move |e| {
        error!("{}: {}", context, e);
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Handle GET /panel - Return every display and calculator
pub async fn panel_handler(State(state): State<Arc<AppState>>) -> Result<Json<PanelResponse>, StatusCode> {
    let clock = state
        .clock_display
        .snapshot()
        .map_err(internal_error("Failed to read clock display"))?;
    let epoch = state
        .epoch_display
        .snapshot()
        .map_err(internal_error("Failed to read epoch display"))?;

    let mut views = Vec::with_capacity(state.calculators.len());
    for (id, calculator) in state.calculators.iter().enumerate() {
        let snapshot = calculator
            .snapshot()
            .map_err(internal_error("Failed to read calculator"))?;
        views.push(CalculatorView::new(id, snapshot));
    }

    let rows = views
        .chunks(CALCULATORS_PER_ROW)
        .map(|chunk| RowView {
            label: chunk[0].label.clone(),
            offset_seconds: chunk[0].offset_seconds,
            calculators: chunk.to_vec(),
        })
        .collect();

    Ok(Json(PanelResponse {
        clock: DisplayView::new(DisplayKind::Clock, clock),
        epoch: DisplayView::new(DisplayKind::Epoch, epoch),
        rows,
        tick_subscribers: state.ticker.subscriber_count(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
    }))
}

/// Handle GET /calculators/:id - Return a single calculator
pub async fn calculator_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<usize>,
) -> Result<Json<CalculatorView>, StatusCode> {
    let snapshot = find_calculator(&state, id)?
        .snapshot()
        .map_err(internal_error("Failed to read calculator"))?;
    Ok(Json(CalculatorView::new(id, snapshot)))
}

/// Handle POST /calculators/:id/set - Start a countdown or take a snapshot
pub async fn set_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<usize>,
) -> Result<Json<CalculatorView>, StatusCode> {
    let snapshot = find_calculator(&state, id)?
        .set()
        .map_err(internal_error("Failed to set calculator"))?;
    info!("Set endpoint called for calculator {}", id);
    Ok(Json(CalculatorView::new(id, snapshot)))
}

/// Handle POST /calculators/:id/clear - Reset to idle
pub async fn clear_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<usize>,
) -> Result<Json<CalculatorView>, StatusCode> {
    let snapshot = find_calculator(&state, id)?
        .clear()
        .map_err(internal_error("Failed to clear calculator"))?;
    info!("Clear endpoint called for calculator {}", id);
    Ok(Json(CalculatorView::new(id, snapshot)))
}

/// Handle POST /calculators/:id/tap - Copy the shown value on a hit
pub async fn tap_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<usize>,
    Json(tap): Json<TapRequest>,
) -> Result<Json<TapResponse>, StatusCode> {
    let copied = find_calculator(&state, id)?
        .tap(Point { x: tap.x, y: tap.y })
        .await
        .map_err(internal_error("Failed to handle tap"))?;

    Ok(Json(TapResponse {
        copied: copied.is_some(),
        text: copied,
    }))
}

/// Handle POST /calculators/:id/layout - Place a calculator cell
pub async fn calculator_layout_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<usize>,
    Json(bounds): Json<Bounds>,
) -> Result<Json<CalculatorView>, StatusCode> {
    let snapshot = find_calculator(&state, id)?
        .layout(bounds)
        .map_err(internal_error("Failed to lay out calculator"))?;
    Ok(Json(CalculatorView::new(id, snapshot)))
}

/// Handle POST /displays/:kind/layout - Place the clock or epoch readout
pub async fn display_layout_handler(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
    Json(bounds): Json<Bounds>,
) -> Result<Json<DisplayView>, StatusCode> {
    let kind = DisplayKind::parse(&kind).ok_or(StatusCode::NOT_FOUND)?;
    let cell = state
        .display(kind)
        .layout(bounds)
        .map_err(internal_error("Failed to lay out display"))?;
    Ok(Json(DisplayView::new(kind, cell)))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
