use crate::core::{SelectionRect, ViewportWindow};
use crate::error::{ChartError, ChartResult};
use crate::extensions::MarkerPoint;

/// One coalesced renderer update.
///
/// Series slices are already cut to the visible window; `markers` only holds
/// trades inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame<'a> {
    pub animation_key: u64,
    pub window: ViewportWindow,
    pub visible_domain: Option<(f64, f64)>,
    pub positions: &'a [f64],
    pub price: &'a [f64],
    pub equity: &'a [f64],
    pub drawdown: &'a [f64],
    pub markers: &'a [MarkerPoint],
    pub selection: Option<SelectionRect>,
}

impl RenderFrame<'_> {
    /// Checks that no series runs past the visible positions and geometry is
    /// finite. Series shorter than the window are allowed.
    pub fn validate(&self) -> ChartResult<()> {
        for (series, name) in [
            (self.price, "price"),
            (self.equity, "equity"),
            (self.drawdown, "drawdown"),
        ] {
            if series.len() > self.positions.len() {
                return Err(ChartError::InvalidData(format!(
                    "{name} slice has {} samples, expected at most {}",
                    series.len(),
                    self.positions.len()
                )));
            }
        }

        if let Some((start, end)) = self.visible_domain {
            if !start.is_finite() || !end.is_finite() || start > end {
                return Err(ChartError::InvalidData(
                    "visible domain must be finite and ordered".to_owned(),
                ));
            }
        }

        if self
            .markers
            .iter()
            .any(|marker| !marker.pixel_x.is_finite() || !marker.value.is_finite())
        {
            return Err(ChartError::InvalidData(
                "marker geometry must be finite".to_owned(),
            ));
        }

        if let Some(selection) = self.selection {
            if !selection.is_finite() {
                return Err(ChartError::InvalidData(
                    "selection rectangle must be finite".to_owned(),
                ));
            }
        }

        Ok(())
    }
}
