//! Query-panel timing behavior, driven on a paused tokio clock so the
//! simulated latency resolves instantly.

use taproom_core::config::QueryConfig;
use taproom_core::controller::DashboardController;
use taproom_core::view::{Action, QueryState, ViewState};

fn test_query_config() -> QueryConfig {
    QueryConfig {
        delay_ms: 1200,
        canned_answer: "Analysis complete.".to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn test_submit_then_resolve() {
    let mut controller = DashboardController::new(ViewState::default(), test_query_config());

    let ticket = controller
        .submit_query("Which module type exits most?")
        .expect("idle panel accepts a submit");
    assert!(controller.state().query.is_pending());

    let action = controller.next_resolution().await;
    match action {
        Action::ResolveQuery { ticket: resolved, answer } => {
            assert_eq!(resolved, ticket);
            assert_eq!(answer, "Analysis complete.");
        }
        other => panic!("expected ResolveQuery, got {:?}", other),
    }

    match &controller.state().query {
        QueryState::Answered { prompt, answer } => {
            assert_eq!(prompt, "Which module type exits most?");
            assert_eq!(answer, "Analysis complete.");
        }
        other => panic!("expected Answered, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_submit_while_pending_spawns_no_second_timer() {
    let mut controller = DashboardController::new(ViewState::default(), test_query_config());

    let first = controller.submit_query("first").expect("accepted");
    assert!(controller.submit_query("second").is_none());

    // Only the first timer ever fires.
    let action = controller.next_resolution().await;
    assert!(matches!(action, Action::ResolveQuery { ticket, .. } if ticket == first));

    // Let any stray timer elapse; nothing else may arrive.
    tokio::time::advance(std::time::Duration::from_secs(10)).await;
    assert!(controller.try_resolution().is_none());
    assert!(matches!(controller.state().query, QueryState::Answered { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_returns_to_idle_and_timer_never_delivers() {
    let mut controller = DashboardController::new(ViewState::default(), test_query_config());

    controller.submit_query("doomed").expect("accepted");
    assert!(controller.cancel_query());
    assert_eq!(controller.state().query, QueryState::Idle);

    tokio::time::advance(std::time::Duration::from_secs(10)).await;
    tokio::task::yield_now().await;
    assert!(controller.try_resolution().is_none());
    assert_eq!(controller.state().query, QueryState::Idle);

    // Cancel with nothing pending reports false.
    assert!(!controller.cancel_query());

    // The panel is idle again, so a fresh submit is accepted.
    assert!(controller.submit_query("retry").is_some());
}

#[tokio::test(start_paused = true)]
async fn test_pure_actions_do_not_disturb_a_pending_query() {
    let mut controller = DashboardController::new(ViewState::default(), test_query_config());

    controller.submit_query("pending").expect("accepted");
    controller.dispatch(Action::ToggleSessions);
    controller.dispatch(Action::ToggleModuleDetail {
        module_id: "module-003".to_string(),
    });

    assert!(controller.state().query.is_pending());
    assert!(controller.state().sessions_expanded);
    assert_eq!(
        controller.state().expanded_module_id.as_deref(),
        Some("module-003")
    );

    controller.next_resolution().await;
    assert!(matches!(controller.state().query, QueryState::Answered { .. }));
    // The toggles survive resolution untouched.
    assert!(controller.state().sessions_expanded);
}
