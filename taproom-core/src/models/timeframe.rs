use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::TaproomError;

/// Lookback filter exposed by the dashboard's timeframe selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1h")]
    LastHour,
    #[serde(rename = "24h")]
    Last24Hours,
    #[serde(rename = "7d")]
    Last7Days,
    #[serde(rename = "30d")]
    Last30Days,
    #[serde(rename = "all")]
    All,
}

impl Timeframe {
    /// Lookback window; `None` means no cutoff.
    pub fn window(self) -> Option<Duration> {
        match self {
            Timeframe::LastHour => Some(Duration::hours(1)),
            Timeframe::Last24Hours => Some(Duration::hours(24)),
            Timeframe::Last7Days => Some(Duration::days(7)),
            Timeframe::Last30Days => Some(Duration::days(30)),
            Timeframe::All => None,
        }
    }

    /// Wire tag, as the selector submits it.
    pub fn tag(self) -> &'static str {
        match self {
            Timeframe::LastHour => "1h",
            Timeframe::Last24Hours => "24h",
            Timeframe::Last7Days => "7d",
            Timeframe::Last30Days => "30d",
            Timeframe::All => "all",
        }
    }

    /// Human label for the selector.
    pub fn label(self) -> &'static str {
        match self {
            Timeframe::LastHour => "Last Hour",
            Timeframe::Last24Hours => "Last 24 Hours",
            Timeframe::Last7Days => "Last 7 Days",
            Timeframe::Last30Days => "Last 30 Days",
            Timeframe::All => "All Time",
        }
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Timeframe::Last24Hours
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Timeframe {
    type Err = TaproomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1h" => Ok(Timeframe::LastHour),
            "24h" => Ok(Timeframe::Last24Hours),
            "7d" => Ok(Timeframe::Last7Days),
            "30d" => Ok(Timeframe::Last30Days),
            "all" => Ok(Timeframe::All),
            other => Err(TaproomError::UnknownTimeframe(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_round_trips_through_from_str() {
        for tf in [
            Timeframe::LastHour,
            Timeframe::Last24Hours,
            Timeframe::Last7Days,
            Timeframe::Last30Days,
            Timeframe::All,
        ] {
            assert_eq!(tf.tag().parse::<Timeframe>().unwrap(), tf);
        }
    }

    #[test]
    fn test_unknown_tag_is_rejected() {
        assert!("90d".parse::<Timeframe>().is_err());
    }

    #[test]
    fn test_all_has_no_window() {
        assert!(Timeframe::All.window().is_none());
        assert_eq!(
            Timeframe::Last24Hours.window(),
            Some(Duration::hours(24))
        );
    }
}
