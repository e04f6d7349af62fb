use crate::core::{LinearScale, PlotArea};
use crate::error::{ChartError, ChartResult};
use crate::render::{CoordinateMapping, RenderFrame, Renderer};

/// Headless renderer used by tests and tooling.
///
/// Maps the visible domain linearly onto the plot area's x span and records
/// what each redraw carried, so callers can assert on coalescing and marker
/// projection without a drawing surface.
#[derive(Debug, Clone)]
pub struct NullRenderer {
    plot_area: PlotArea,
    origin: (f64, f64),
    scale: Option<LinearScale>,
    pub redraw_count: usize,
    pub last_animation_key: Option<u64>,
    pub last_sample_count: usize,
    pub last_marker_count: usize,
    pub last_selection_width: Option<f64>,
}

impl NullRenderer {
    pub fn new(plot_area: PlotArea) -> ChartResult<Self> {
        if !plot_area.is_valid() {
            return Err(ChartError::InvalidPlotArea {
                left: plot_area.left,
                right: plot_area.right,
                top: plot_area.top,
                bottom: plot_area.bottom,
            });
        }
        Ok(Self {
            plot_area,
            origin: (0.0, 0.0),
            scale: None,
            redraw_count: 0,
            last_animation_key: None,
            last_sample_count: 0,
            last_marker_count: 0,
            last_selection_width: None,
        })
    }

    /// Places the surface at a client-space offset.
    #[must_use]
    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.origin = (x, y);
        self
    }

    #[must_use]
    pub fn visible_domain(&self) -> Option<(f64, f64)> {
        self.scale.map(LinearScale::domain)
    }
}

impl CoordinateMapping for NullRenderer {
    fn pixel_for_value(&self, value: f64) -> Option<f64> {
        self.scale?.domain_to_pixel(value, self.plot_area).ok()
    }

    fn value_for_pixel(&self, pixel: f64) -> Option<f64> {
        self.scale?.pixel_to_domain(pixel, self.plot_area).ok()
    }

    fn plot_area(&self) -> PlotArea {
        self.plot_area
    }
}

impl Renderer for NullRenderer {
    fn surface_origin(&self) -> (f64, f64) {
        self.origin
    }

    fn set_visible_domain(&mut self, start: f64, end: f64) -> ChartResult<()> {
        self.scale = Some(LinearScale::for_extent(start, end)?);
        Ok(())
    }

    fn redraw(&mut self, frame: &RenderFrame<'_>) -> ChartResult<()> {
        frame.validate()?;
        self.redraw_count += 1;
        self.last_animation_key = Some(frame.animation_key);
        self.last_sample_count = frame.positions.len();
        self.last_marker_count = frame.markers.len();
        self.last_selection_width = frame.selection.map(|rect| rect.width());
        Ok(())
    }
}
