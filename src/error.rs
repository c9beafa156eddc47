use chrono::NaiveDate;
use thiserror::Error;

/// Every way a run can abort.
///
/// Each variant maps to a process exit code so `main` can report the cause
/// and exit without unwinding through the caller.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to fetch series {series_id}: {message}")]
    Acquisition { series_id: String, message: String },

    #[error("Series '{series}' has no observations in {start}..={end}.")]
    EmptyWindow {
        series: String,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Series '{series}' is undefined at {date} (needs observations for that month and 12 months earlier).")]
    MissingHistory { series: String, date: NaiveDate },

    #[error("Cannot align '{left}' with '{right}': {date} present in one and missing in the other.")]
    Misalignment {
        left: String,
        right: String,
        date: NaiveDate,
    },

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    pub fn acquisition(series_id: &str, message: impl Into<String>) -> Self {
        Self::Acquisition {
            series_id: series_id.to_string(),
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Config(_) | AppError::Export(_) => 2,
            AppError::EmptyWindow { .. }
            | AppError::MissingHistory { .. }
            | AppError::Misalignment { .. } => 3,
            AppError::Acquisition { .. } => 4,
            AppError::Terminal(_) => 5,
        }
    }
}
