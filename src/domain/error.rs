//! Domain error types.

/// Top-level error type for stocksense.
#[derive(Debug, thiserror::Error)]
pub enum StockSenseError {
    #[error("failed to load data: {reason}")]
    DataLoad { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("insufficient data for {code}: have {bars} bars, need {minimum}")]
    InsufficientData {
        code: String,
        bars: usize,
        minimum: usize,
    },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("window of {window} exceeds the {available} available values")]
    WindowTooLarge { window: usize, available: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StockSenseError> for std::process::ExitCode {
    fn from(err: &StockSenseError) -> Self {
        let code: u8 = match err {
            StockSenseError::Io(_) | StockSenseError::DataLoad { .. } => 1,
            StockSenseError::ConfigParse { .. } | StockSenseError::ConfigInvalid { .. } => 2,
            StockSenseError::InsufficientData { .. }
            | StockSenseError::InvalidInput { .. }
            | StockSenseError::WindowTooLarge { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
