//! Time-window filter selection.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Active time restriction on the record list. Defaults to `Day`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    /// Current local calendar day.
    #[default]
    Day,
    /// Current local calendar month.
    Month,
    /// No time restriction.
    All,
}

impl TimeWindow {
    /// Every window, in the order the filter buttons are shown.
    pub const ALL: [TimeWindow; 3] = [TimeWindow::Day, TimeWindow::Month, TimeWindow::All];

    /// Stable string id (`day|month|all`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Month => "month",
            Self::All => "all",
        }
    }

    /// Label used in report headings.
    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "Hari Ini",
            Self::Month => "Bulan Ini",
            Self::All => "Semua Waktu",
        }
    }
}

impl Display for TimeWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeWindow {
    type Err = TimeWindowParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Self::Day),
            "month" => Ok(Self::Month),
            "all" => Ok(Self::All),
            other => Err(TimeWindowParseError(other.to_string())),
        }
    }
}

/// Returned when a time window string is not `day|month|all`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindowParseError(pub String);

impl Display for TimeWindowParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported time window `{}`; expected day|month|all",
            self.0
        )
    }
}

impl Error for TimeWindowParseError {}
