//! chart-viewport: interactive viewport controller for backtest charts.
//!
//! Turns raw pointer and wheel input into a zoomed, panned or brushed window
//! over a large time-ordered series, keeps a trade-marker overlay in sync with
//! that window and coalesces the resulting updates for an external renderer.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ViewportConfig, ViewportController};
pub use error::{ChartError, ChartResult};
