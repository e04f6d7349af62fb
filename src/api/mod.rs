//! Dashboard-facing surface: configuration, data feed, redraw scheduling and
//! the viewport controller that ties them together.

mod config;
mod controller;
mod feed;
mod redraw_scheduler;

pub use config::{ChartKind, ViewportConfig};
pub use controller::{InputOutcome, ViewportController};
pub use feed::BacktestFeed;
pub use redraw_scheduler::{RedrawScheduler, RedrawStats};
