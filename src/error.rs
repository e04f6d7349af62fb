use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid plot area: left={left}, right={right}, top={top}, bottom={bottom}")]
    InvalidPlotArea {
        left: f64,
        right: f64,
        top: f64,
        bottom: f64,
    },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Raised by external [`crate::render::Renderer`] implementations; the
    /// controller propagates it unchanged from `flush`.
    #[error("renderer failure: {0}")]
    Renderer(String),
}
