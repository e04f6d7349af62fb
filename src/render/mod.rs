mod frame;
mod null_renderer;

pub use frame::RenderFrame;
pub use null_renderer::NullRenderer;

use crate::core::PlotArea;
use crate::error::ChartResult;

/// Pixel/value mapping exposed by the drawing surface.
///
/// Values are x-axis data-space positions (timestamps or sample indices).
/// Mappings reflect the most recently rendered visible domain.
pub trait CoordinateMapping {
    fn pixel_for_value(&self, value: f64) -> Option<f64>;

    fn value_for_pixel(&self, pixel: f64) -> Option<f64>;

    fn plot_area(&self) -> PlotArea;
}

/// Contract implemented by any chart-drawing backend.
///
/// The viewport controller never draws; it hands the backend a fully
/// materialized [`RenderFrame`] and lets it run the eased transition keyed by
/// `frame.animation_key`.
pub trait Renderer: CoordinateMapping {
    /// Client-space origin of the rendering surface's bounding box.
    ///
    /// Subtracted from raw input coordinates to obtain plot-relative pixels.
    fn surface_origin(&self) -> (f64, f64) {
        (0.0, 0.0)
    }

    /// Adopts the data-space extent the next frame will show.
    fn set_visible_domain(&mut self, start: f64, end: f64) -> ChartResult<()>;

    fn redraw(&mut self, frame: &RenderFrame<'_>) -> ChartResult<()>;
}
