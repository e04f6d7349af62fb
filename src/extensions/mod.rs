//! Overlays derived from the viewport.
//!
//! Extensions read the window and timeline but never mutate them.

pub mod markers;

pub use markers::{
    DEFAULT_MAX_TRADE_MARKERS, MarkerPoint, MarkerProjection, MarkerValueSource,
    resolve_trade_index,
};
