//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    components::{CalculatorSnapshot, DisplayKind},
    state::{row_label, Bounds, CalculatorState, TextCell},
};

/// One calculator as the renderer sees it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorView {
    pub id: usize,
    pub label: String,
    pub offset_seconds: i64,
    #[serde(flatten)]
    pub state: CalculatorState,
    pub text: String,
    pub font_size: f32,
    pub bounds: Bounds,
    pub ticking: bool,
}

impl CalculatorView {
    pub fn new(id: usize, snapshot: CalculatorSnapshot) -> Self {
        Self {
            id,
            label: row_label(snapshot.offset_seconds),
            offset_seconds: snapshot.offset_seconds,
            state: snapshot.state,
            text: snapshot.cell.text,
            font_size: snapshot.cell.font_size,
            bounds: snapshot.cell.bounds,
            ticking: snapshot.ticking,
        }
    }
}

/// A clock or epoch readout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayView {
    pub kind: DisplayKind,
    pub label: String,
    pub text: String,
    pub font_size: f32,
    pub bounds: Bounds,
}

impl DisplayView {
    pub fn new(kind: DisplayKind, cell: TextCell) -> Self {
        Self {
            kind,
            label: kind.label().to_string(),
            text: cell.text,
            font_size: cell.font_size,
            bounds: cell.bounds,
        }
    }
}

/// Calculators sharing one offset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RowView {
    pub label: String,
    pub offset_seconds: i64,
    pub calculators: Vec<CalculatorView>,
}

/// Whole panel, top to bottom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelResponse {
    pub clock: DisplayView,
    pub epoch: DisplayView,
    pub rows: Vec<RowView>,
    pub tick_subscribers: usize,
    pub uptime: String,
    pub port: u16,
    pub host: String,
}

/// Pointer position of a tap
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TapRequest {
    pub x: f32,
    pub y: f32,
}

/// Result of a tap on a calculator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TapResponse {
    pub copied: bool,
    pub text: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
