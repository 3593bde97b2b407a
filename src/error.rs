use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlotError>;

#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Plot {0} not registered")]
    NotRegistered(String),

    #[error("Invalid renderer choice: {0:?} (expected \"normal\" or \"simple\")")]
    InvalidChoice(String),

    #[error("Invalid {axis} limits [{min}, {max}]: bounds must be finite with min < max")]
    InvalidLimits { axis: char, min: f64, max: f64 },

    #[error("Invalid style format string: {0:?}")]
    InvalidStyle(String),

    #[error("Plot {label}: x has {x_len} values but y has {y_len}")]
    LengthMismatch {
        label: String,
        x_len: usize,
        y_len: usize,
    },

    #[error("Position out of bounds: ({x}, {y})")]
    OutOfBounds { x: usize, y: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}
