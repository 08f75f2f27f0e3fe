//! Read-only view model handed to the presentation layer.
//!
//! The adapter renders a snapshot and dispatches actions back into the
//! controller; it never mutates the snapshot itself.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::ViewConfig;
use crate::metrics::{self, ActivityMetrics};
use crate::models::{Module, ModuleTypeStat, Session};
use crate::ordering;
use crate::view::ViewState;

/// Sorted, sliced record list plus the pre-slice total, so the adapter
/// can label "showing X of Y".
#[derive(Debug, Clone, Serialize)]
pub struct ListView<R> {
    pub visible: Vec<R>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub session_metrics: ActivityMetrics,
    pub module_metrics: ActivityMetrics,
    pub session_completion_rate: f64,
    pub module_completion_rate: f64,
    pub module_type_stats: Vec<ModuleTypeStat>,
    pub sessions: ListView<Session>,
    pub modules: ListView<Module>,
    pub view: ViewState,
}

impl DashboardSnapshot {
    /// Assemble the full view model for one render pass: filter by the
    /// selected timeframe, order most-recent-first, slice to the
    /// preview unless expanded, and aggregate. Pure — the caller
    /// supplies `now` so the timeframe window is reproducible.
    pub fn build(
        sessions: &[Session],
        modules: &[Module],
        view: &ViewState,
        config: &ViewConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let sessions_in_frame = ordering::filter_by_timeframe(sessions, view.timeframe, now);
        let modules_in_frame = ordering::filter_by_timeframe(modules, view.timeframe, now);

        let session_metrics = metrics::activity_metrics(&sessions_in_frame);
        let module_metrics = metrics::activity_metrics(&modules_in_frame);

        let sessions_sorted = ordering::sort_by_recency_desc(&sessions_in_frame);
        let modules_sorted = ordering::sort_by_recency_desc(&modules_in_frame);

        DashboardSnapshot {
            session_completion_rate: metrics::completion_rate(
                session_metrics.completed_count,
                session_metrics.count,
            ),
            module_completion_rate: metrics::completion_rate(
                module_metrics.completed_count,
                module_metrics.count,
            ),
            module_type_stats: metrics::module_type_stats(&modules_in_frame),
            sessions: slice(sessions_sorted, view.sessions_expanded, config.preview_limit),
            modules: slice(modules_sorted, view.modules_expanded, config.preview_limit),
            session_metrics,
            module_metrics,
            view: view.clone(),
        }
    }
}

fn slice<R: Clone>(sorted: Vec<R>, expanded: bool, preview_limit: usize) -> ListView<R> {
    let total = sorted.len();
    let visible = if expanded {
        sorted
    } else {
        ordering::take_top_n(&sorted, preview_limit)
    };
    ListView { visible, total }
}

// ============================================================================
// TESTS
// ============================================================================
