mod gesture;
mod pointer_cache;

use serde::{Deserialize, Serialize};

use crate::core::PixelPoint;

pub use gesture::{
    GestureBehavior, GestureEffect, GestureEffects, GestureRecognizer, GestureState,
    GestureTuning,
};
pub use pointer_cache::{PointerCache, PointerId};

/// Raw pointer event in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    pub pointer_id: PointerId,
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerInput {
    #[must_use]
    pub fn new(pointer_id: i64, client_x: f64, client_y: f64) -> Self {
        Self {
            pointer_id: PointerId(pointer_id),
            client_x,
            client_y,
        }
    }

    /// Plot-relative position given the surface's bounding-box origin.
    #[must_use]
    pub fn to_plot(self, origin: (f64, f64)) -> PixelPoint {
        PixelPoint::new(self.client_x - origin.0, self.client_y - origin.1)
    }
}

/// Raw wheel event in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelInput {
    pub client_x: f64,
    pub client_y: f64,
    pub delta_y: f64,
}

impl WheelInput {
    #[must_use]
    pub fn new(client_x: f64, client_y: f64, delta_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            delta_y,
        }
    }

    #[must_use]
    pub fn to_plot(self, origin: (f64, f64)) -> PixelPoint {
        PixelPoint::new(self.client_x - origin.0, self.client_y - origin.1)
    }
}
