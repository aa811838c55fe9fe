use serde::{Deserialize, Serialize};
use std::fmt;

/// How a symbol's history is windowed before analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewMode {
    /// Each symbol's own full history
    Full,
    /// Only the dates every selected symbol has data for
    Common,
    /// Full history minus an incomplete trailing year
    CompleteYears,
    /// A single calendar year
    Year(i32),
}

impl ViewMode {
    /// Parse from string: "full", "common", "complete-years" or "year:YYYY"
    pub fn from_str(s: &str) -> Result<Self, String> {
        let lower = s.to_lowercase();
        match lower.as_str() {
            "full" | "all" => Ok(ViewMode::Full),
            "common" => Ok(ViewMode::Common),
            "complete-years" | "complete" => Ok(ViewMode::CompleteYears),
            other => match other.strip_prefix("year:") {
                Some(year) => year
                    .parse::<i32>()
                    .map(ViewMode::Year)
                    .map_err(|_| format!("Invalid year in view mode: '{}'", s)),
                None => Err(format!(
                    "Invalid view mode: '{}'. Valid values: full, common, complete-years, year:YYYY",
                    s
                )),
            },
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Full => write!(f, "full"),
            ViewMode::Common => write!(f, "common"),
            ViewMode::CompleteYears => write!(f, "complete-years"),
            ViewMode::Year(year) => write!(f, "year:{}", year),
        }
    }
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::Full
    }
}
