use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ActivityRecord, Status};
use crate::error::TaproomError;

/// Module types that carry a [`PourScores`] block.
pub const SCORED_MODULE_TYPES: &[&str] = &["Perfect Pour"];

/// One module (sub-activity) played within a session.
///
/// Same lifecycle as [`super::Session`]: immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub id: String,
    /// Module-type name, e.g. "Perfect Pour".
    pub module_id: String,
    /// Owning session. Many modules may belong to one session.
    pub session_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Elapsed minutes, fractional.
    pub duration: f64,
    pub status: Status,
    /// Present exactly when `module_id` is a scored type; the block is
    /// all-or-nothing by construction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<PourScores>,
}

/// Type-specific metrics for scored pour modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PourScores {
    /// Five ordered cumulative pour scores. The generator keeps them
    /// non-decreasing; the engine does not rely on that.
    pub pours: [i64; 5],
    /// Mean of the five pours, rounded half away from zero.
    pub average_score_per_beer: i64,
    /// Same value as `average_score_per_beer`, kept as its own field
    /// for the detail panel.
    pub average_total: i64,
    /// Absent for exited runs; otherwise at least the final pour score.
    pub challenge_high_score: Option<i64>,
}

impl Module {
    pub fn is_scored_type(&self) -> bool {
        SCORED_MODULE_TYPES.contains(&self.module_id.as_str())
    }

    /// Ingestion-time invariant check: timestamp ordering, and the
    /// scores block present exactly on scored types with a high score
    /// consistent with the run's status.
    pub fn validate(&self) -> Result<(), TaproomError> {
        if self.end_time < self.start_time {
            return Err(TaproomError::InvalidRecord(format!(
                "module {}: end_time precedes start_time",
                self.id
            )));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(TaproomError::InvalidRecord(format!(
                "module {}: duration {} is not a non-negative number",
                self.id, self.duration
            )));
        }
        match (&self.scores, self.is_scored_type()) {
            (Some(_), false) => Err(TaproomError::InvalidRecord(format!(
                "module {}: scores block on non-scored type {:?}",
                self.id, self.module_id
            ))),
            (None, true) => Err(TaproomError::InvalidRecord(format!(
                "module {}: scored type {:?} is missing its scores block",
                self.id, self.module_id
            ))),
            (Some(scores), true) => scores.validate(&self.id, self.status),
            (None, false) => Ok(()),
        }
    }
}

impl PourScores {
    fn validate(&self, module_id: &str, status: Status) -> Result<(), TaproomError> {
        let final_pour = self.pours[4];
        match (self.challenge_high_score, status) {
            (Some(_), Status::Exited) => Err(TaproomError::InvalidRecord(format!(
                "module {}: exited run carries a challenge high score",
                module_id
            ))),
            (None, Status::Completed) => Err(TaproomError::InvalidRecord(format!(
                "module {}: completed run is missing its challenge high score",
                module_id
            ))),
            (Some(high), Status::Completed) if high < final_pour => {
                Err(TaproomError::InvalidRecord(format!(
                    "module {}: challenge high score {} below final pour {}",
                    module_id, high, final_pour
                )))
            }
            _ => Ok(()),
        }
    }
}

impl ActivityRecord for Module {
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
