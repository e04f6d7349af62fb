pub mod primitives;
pub mod resolver;
pub mod scale;
pub mod timeline;
pub mod trade;
pub mod types;
pub mod window;

pub use resolver::{nearest_synthetic_index, nearest_timestamp_index};
pub use scale::LinearScale;
pub use timeline::{Timeline, TimelineAddressing, window_slice};
pub use trade::{Trade, TradeSide, TradeTimestamp};
pub use types::{PixelPoint, PlotArea, SelectionRect};
pub use window::{DEFAULT_MIN_ZOOM_FRACTION, ViewportIntent, ViewportWindow};
