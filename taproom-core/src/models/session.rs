use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ActivityRecord, Status};
use crate::error::TaproomError;

/// One usage session of an application on a device.
///
/// Produced once by the record source and immutable afterwards; the
/// dashboard only reads. `duration` is the authoritative elapsed time
/// in minutes — downstream code never recomputes it from the
/// timestamps, so display stays decoupled from storage precision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub device_id: String,
    pub app_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Elapsed minutes, fractional.
    pub duration: f64,
    pub status: Status,
}

impl Session {
    /// Ingestion-time invariant check. A record that fails here is a
    /// defect in the source, not something aggregation should tolerate.
    pub fn validate(&self) -> Result<(), TaproomError> {
        if self.end_time < self.start_time {
            return Err(TaproomError::InvalidRecord(format!(
                "session {}: end_time precedes start_time",
                self.id
            )));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(TaproomError::InvalidRecord(format!(
                "session {}: duration {} is not a non-negative number",
                self.id, self.duration
            )));
        }
        Ok(())
    }
}

impl ActivityRecord for Session {
    fn record_id(&self) -> &str {
        &self.id
    }

    fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    fn duration_minutes(&self) -> f64 {
        self.duration
    }

    fn status(&self) -> Status {
        self.status
    }
}
