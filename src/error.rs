use chrono::NaiveDate;
use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),

    /// Malformed input row (bad date, negative or non-finite magnitude)
    #[error("Parse error at line {line}: {reason}")]
    Parse { line: usize, reason: String },

    /// No overlapping date range across the compared symbols
    #[error("Empty common window: start {start:?} is after end {end:?}")]
    EmptyWindow {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Io(format!("CSV error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Io(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

// Alias for convenience
pub type Error = AppError;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = AppError::Parse {
            line: 7,
            reason: "negative close".to_string(),
        };
        assert_eq!(err.to_string(), "Parse error at line 7: negative close");
    }

    #[test]
    fn test_empty_window_is_distinct_from_invalid_input() {
        let err = AppError::EmptyWindow {
            start: NaiveDate::from_ymd_opt(2021, 1, 2),
            end: NaiveDate::from_ymd_opt(2021, 1, 1),
        };
        assert!(matches!(err, AppError::EmptyWindow { .. }));
        assert!(err.to_string().contains("2021-01-02"));
    }
}
