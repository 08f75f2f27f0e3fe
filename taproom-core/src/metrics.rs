//! Aggregation engine: derived statistics over session and module records.
//!
//! Pure and stateless; inputs are never mutated. The checked helpers
//! return `TaproomError` for the degenerate cases; the public entry
//! points apply the dashboard's single degradation policy (neutral
//! zeros) so the presentation layer never sees an error or a NaN.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TaproomError;
use crate::models::{ActivityRecord, Module, ModuleTypeStat};

// ============================================================================
// PUBLIC API
// ============================================================================

/// Overview counters for one record collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityMetrics {
    pub count: usize,
    pub completed_count: usize,
    pub exited_count: usize,
    /// Arithmetic mean of `duration` in minutes. Zero for empty input.
    pub avg_duration: f64,
    /// Maximum `duration` in minutes. Zero for empty input.
    pub max_duration: f64,
}

/// Detail-panel summary of one scored pour module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PourSummary {
    pub pours: [i64; 5],
    pub average_score_per_beer: i64,
    pub challenge_high_score: Option<i64>,
}

/// Overview counters over any record collection (sessions or modules).
pub fn activity_metrics<R: ActivityRecord>(records: &[R]) -> ActivityMetrics {
    let durations: Vec<f64> = records.iter().map(|r| r.duration_minutes()).collect();
    ActivityMetrics {
        count: records.len(),
        completed_count: records.iter().filter(|r| r.status().is_completed()).count(),
        exited_count: records.iter().filter(|r| r.status().is_exited()).count(),
        avg_duration: mean(&durations).unwrap_or(0.0),
        max_duration: max(&durations).unwrap_or(0.0),
    }
}

/// Percentage of started items reaching `completed`, in `[0, 100]`.
/// A zero denominator yields the documented sentinel `0.0`.
pub fn completion_rate(completed: usize, total: usize) -> f64 {
    completion_rate_checked(completed, total).unwrap_or(0.0)
}

/// One stat row per distinct module type, ordered by type name so the
/// table renders stably across refreshes.
pub fn module_type_stats(modules: &[Module]) -> Vec<ModuleTypeStat> {
    let mut by_type: BTreeMap<&str, Vec<&Module>> = BTreeMap::new();
    for module in modules {
        by_type
            .entry(module.module_id.as_str())
            .or_default()
            .push(module);
    }

    by_type
        .into_iter()
        .map(|(module_type, group)| {
            let durations: Vec<f64> = group.iter().map(|m| m.duration).collect();
            ModuleTypeStat {
                module_type: module_type.to_string(),
                started: group.len(),
                completed: group.iter().filter(|m| m.status.is_completed()).count(),
                exited: group.iter().filter(|m| m.status.is_exited()).count(),
                avg_duration: mean(&durations).unwrap_or(0.0),
            }
        })
        .collect()
}

/// Summary for a module carrying the scores block. The mean is
/// recomputed from the stored pours (f64::round is half-away-from-zero);
/// the high score passes through untouched — `None` on exited runs by
/// the model invariant.
pub fn pour_summary(module: &Module) -> Result<PourSummary, TaproomError> {
    let scores = module.scores.as_ref().ok_or_else(|| {
        TaproomError::NotApplicable(format!(
            "module {} ({}) carries no pour scores",
            module.id, module.module_id
        ))
    })?;

    let sum: i64 = scores.pours.iter().sum();
    let average = (sum as f64 / scores.pours.len() as f64).round() as i64;

    Ok(PourSummary {
        pours: scores.pours,
        average_score_per_beer: average,
        challenge_high_score: scores.challenge_high_score,
    })
}

// ============================================================================
// CHECKED HELPERS
// ============================================================================

/// Arithmetic mean. Errors on an empty slice instead of producing NaN.
pub fn mean(values: &[f64]) -> Result<f64, TaproomError> {
    if values.is_empty() {
        return Err(TaproomError::EmptyInput("duration"));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Maximum value. Errors on an empty slice.
pub fn max(values: &[f64]) -> Result<f64, TaproomError> {
    values
        .iter()
        .copied()
        .reduce(f64::max)
        .ok_or(TaproomError::EmptyInput("duration"))
}

/// Completion rate with the zero-denominator case surfaced as an error.
pub fn completion_rate_checked(completed: usize, total: usize) -> Result<f64, TaproomError> {
    if total == 0 {
        return Err(TaproomError::DivisionByZero("completion rate"));
    }
    Ok(completed as f64 / total as f64 * 100.0)
}

// ============================================================================
// FORMATTING
// ============================================================================

/// Render fractional minutes as `Nm Ss`. Minutes truncate toward zero,
/// seconds round to nearest, and a seconds value that rounds to 60
/// rolls over into the minute count.
pub fn format_duration(minutes: f64) -> String {
    if !minutes.is_finite() || minutes <= 0.0 {
        return "0m 0s".to_string();
    }
    let mut mins = minutes.trunc() as u64;
    let mut secs = (minutes.fract() * 60.0).round() as u64;
    if secs == 60 {
        mins += 1;
        secs = 0;
    }
    format!("{}m {}s", mins, secs)
}

/// Fixed UTC rendering for the detail tables.
pub fn format_timestamp(t: DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M:%S").to_string()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PourScores, Session, Status};
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 7, 10, 9, minute, 0).unwrap()
    }

    fn make_session(id: &str, duration: f64, status: Status) -> Session {
        Session {
            id: id.to_string(),
            device_id: "VR-Headset-001".to_string(),
            app_id: "the-experience-v1.2".to_string(),
            start_time: at(0),
            end_time: at(45),
            duration,
            status,
        }
    }

    fn make_module(id: &str, module_type: &str, duration: f64, status: Status) -> Module {
        let scores = if module_type == "Perfect Pour" {
            Some(PourScores {
                pours: [1000, 3000, 6000, 9000, 13000],
                average_score_per_beer: 6400,
                average_total: 6400,
                challenge_high_score: match status {
                    Status::Completed => Some(14000),
                    Status::Exited => None,
                },
            })
        } else {
            None
        };
        Module {
            id: id.to_string(),
            module_id: module_type.to_string(),
            session_id: "session-001".to_string(),
            start_time: at(0),
            end_time: at(5),
            duration,
            status,
            scores,
        }
    }

    // ========================================================================
    // TEST 1: worked example from the reference data
    // ========================================================================
    #[test]
    fn test_session_metrics_worked_example() {
        let sessions = vec![
            make_session("session-001", 45.0, Status::Completed),
            make_session("session-002", 8.0, Status::Exited),
        ];

        let metrics = activity_metrics(&sessions);

        assert_eq!(metrics.count, 2);
        assert_eq!(metrics.completed_count, 1);
        assert_eq!(metrics.exited_count, 1);
        assert!((metrics.avg_duration - 26.5).abs() < f64::EPSILON);
        assert!((metrics.max_duration - 45.0).abs() < f64::EPSILON);
    }

    // ========================================================================
    // TEST 2: empty input degrades to the neutral zero metrics
    // ========================================================================
    #[test]
    fn test_empty_input_yields_neutral_metrics() {
        let sessions: Vec<Session> = vec![];

        let metrics = activity_metrics(&sessions);

        assert_eq!(metrics, ActivityMetrics::default());
        assert!(!metrics.avg_duration.is_nan());
    }

    // ========================================================================
    // TEST 3: checked helpers surface the degenerate cases
    // ========================================================================
    #[test]
    fn test_checked_helpers_error_on_empty() {
        assert!(matches!(mean(&[]), Err(TaproomError::EmptyInput(_))));
        assert!(matches!(max(&[]), Err(TaproomError::EmptyInput(_))));
        assert!(matches!(
            completion_rate_checked(3, 0),
            Err(TaproomError::DivisionByZero(_))
        ));
    }

    // ========================================================================
    // TEST 4: avg lies between min and max for non-empty input
    // ========================================================================
    #[test]
    fn test_avg_bounded_by_min_and_max() {
        let durations = [3.25, 45.0, 8.0, 17.5, 29.9];
        let sessions: Vec<Session> = durations
            .iter()
            .enumerate()
            .map(|(i, &d)| make_session(&format!("session-{:03}", i + 1), d, Status::Completed))
            .collect();

        let metrics = activity_metrics(&sessions);

        let lo = durations.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = durations.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!(metrics.avg_duration >= lo && metrics.avg_duration <= hi);
        assert!((metrics.max_duration - hi).abs() < f64::EPSILON);
    }

    // ========================================================================
    // TEST 5: completion rate — worked example and zero-denominator sentinel
    // ========================================================================
    #[test]
    fn test_completion_rate() {
        assert!((completion_rate(30, 120) - 25.0).abs() < f64::EPSILON);
        assert!((completion_rate(0, 0) - 0.0).abs() < f64::EPSILON);
        assert!(!completion_rate(5, 0).is_nan());
        assert!((completion_rate(7, 7) - 100.0).abs() < f64::EPSILON);
    }

    // ========================================================================
    // TEST 6: per-type stats hold started == completed + exited
    // ========================================================================
    #[test]
    fn test_module_type_stats_invariant() {
        let modules = vec![
            make_module("module-001", "Perfect Pour", 4.3, Status::Exited),
            make_module("module-002", "Ingredients", 8.4, Status::Completed),
            make_module("module-003", "Beer types", 4.75, Status::Exited),
            make_module("module-004", "Perfect Pour", 7.05, Status::Completed),
            make_module("module-005", "Ingredients", 4.9, Status::Exited),
        ];

        let stats = module_type_stats(&modules);

        assert_eq!(stats.len(), 3);
        for row in &stats {
            assert_eq!(row.started, row.completed + row.exited, "{}", row.module_type);
        }
        // Ordered by type name for stable rendering.
        let names: Vec<&str> = stats.iter().map(|s| s.module_type.as_str()).collect();
        assert_eq!(names, vec!["Beer types", "Ingredients", "Perfect Pour"]);

        let pour = stats.iter().find(|s| s.module_type == "Perfect Pour").unwrap();
        assert_eq!(pour.started, 2);
        assert_eq!(pour.completed, 1);
        assert_eq!(pour.exited, 1);
        assert!((pour.avg_duration - (4.3 + 7.05) / 2.0).abs() < 1e-9);
    }

    // ========================================================================
    // TEST 7: pour summary — worked example, exited high score stays None
    // ========================================================================
    #[test]
    fn test_pour_summary_worked_example() {
        let module = make_module("module-001", "Perfect Pour", 4.3, Status::Exited);

        let summary = pour_summary(&module).unwrap();

        assert_eq!(summary.pours, [1000, 3000, 6000, 9000, 13000]);
        assert_eq!(summary.average_score_per_beer, 6400);
        assert_eq!(summary.challenge_high_score, None);
    }

    #[test]
    fn test_pour_summary_completed_passes_high_score_through() {
        let module = make_module("module-004", "Perfect Pour", 7.05, Status::Completed);

        let summary = pour_summary(&module).unwrap();

        assert_eq!(summary.challenge_high_score, Some(14000));
    }

    // ========================================================================
    // TEST 8: pour summary on a non-scored module is NotApplicable
    // ========================================================================
    #[test]
    fn test_pour_summary_not_applicable() {
        let module = make_module("module-002", "Ingredients", 8.4, Status::Completed);

        assert!(matches!(
            pour_summary(&module),
            Err(TaproomError::NotApplicable(_))
        ));
    }

    // ========================================================================
    // TEST 9: duration formatting, including the 60-second rollover
    // ========================================================================
    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(45.0), "45m 0s");
        assert_eq!(format_duration(4.0 + 17.0 / 60.0), "4m 17s");
        assert_eq!(format_duration(0.5), "0m 30s");
        // 4.9999 minutes: seconds round to 60 and must roll over.
        assert_eq!(format_duration(4.9999), "5m 0s");
        assert_eq!(format_duration(0.0), "0m 0s");
        assert_eq!(format_duration(-3.0), "0m 0s");
    }

    #[test]
    fn test_format_timestamp_is_fixed_utc() {
        let t = Utc.with_ymd_and_hms(2026, 7, 10, 9, 30, 0).unwrap();
        assert_eq!(format_timestamp(t), "2026-07-10 09:30:00");
    }
}
