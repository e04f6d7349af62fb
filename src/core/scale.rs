use crate::core::types::PlotArea;
use crate::error::{ChartError, ChartResult};

/// Linear mapping between a data-space domain and the plot area's x span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    /// Builds a scale for a visible extent that may collapse to one value.
    ///
    /// A zero-width extent is widened by half a unit on each side.
    pub fn for_extent(start: f64, end: f64) -> ChartResult<Self> {
        if start == end {
            return Self::new(start - 0.5, end + 0.5);
        }
        Self::new(start, end)
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64, area: PlotArea) -> ChartResult<f64> {
        validate_area(area)?;
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (value - self.domain_start) / span;
        Ok(area.left + normalized * area.width())
    }

    pub fn pixel_to_domain(self, pixel: f64, area: PlotArea) -> ChartResult<f64> {
        validate_area(area)?;
        if !pixel.is_finite() {
            return Err(ChartError::InvalidData("pixel must be finite".to_owned()));
        }

        let span = self.domain_end - self.domain_start;
        let normalized = (pixel - area.left) / area.width();
        Ok(self.domain_start + normalized * span)
    }
}

fn validate_area(area: PlotArea) -> ChartResult<()> {
    if area.is_valid() {
        return Ok(());
    }
    Err(ChartError::InvalidPlotArea {
        left: area.left,
        right: area.right,
        top: area.top,
        bottom: area.bottom,
    })
}
