//! Owner of the live view state and of the dashboard's only suspension
//! point: the fixed-delay timer simulating ad-hoc query latency.
//!
//! All state transitions happen on the caller's task in response to
//! discrete actions; the timer callback only posts a `ResolveQuery`
//! action onto the controller's channel, so nothing ever races a
//! second submit.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::config::QueryConfig;
use crate::view::{Action, QueryState, ViewState};

pub struct DashboardController {
    state: ViewState,
    query: QueryConfig,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Action>,
    /// In-flight query timer. Abortable, although no UI path cancels
    /// it today; resolution is the only observed exit from Pending.
    timer: Option<JoinHandle<()>>,
}

impl DashboardController {
    pub fn new(initial: ViewState, query: QueryConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: initial,
            query,
            tx,
            rx,
            timer: None,
        }
    }

    /// The single live view state. Read-only outside the controller.
    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Fold a user action into the state.
    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(?action, "dispatch");
        self.state = std::mem::take(&mut self.state).apply(action);
    }

    /// Submit an ad-hoc query. Returns the ticket when accepted, or
    /// `None` when the panel is not idle (a query is already pending,
    /// or the interaction has been answered). An ignored submit spawns
    /// no timer.
    pub fn submit_query(&mut self, prompt: impl Into<String>) -> Option<Uuid> {
        let ticket = Uuid::new_v4();
        self.dispatch(Action::SubmitQuery {
            ticket,
            prompt: prompt.into(),
        });

        let accepted =
            matches!(&self.state.query, QueryState::Pending { ticket: t, .. } if *t == ticket);
        if !accepted {
            tracing::debug!("query submit ignored: panel not idle");
            return None;
        }

        let delay = std::time::Duration::from_millis(self.query.delay_ms);
        let answer = self.query.canned_answer.clone();
        let tx = self.tx.clone();
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(Action::ResolveQuery { ticket, answer });
        }));

        Some(ticket)
    }

    /// Await the next timer-generated action and fold it in. Returns
    /// the applied action.
    pub async fn next_resolution(&mut self) -> Action {
        let action = match self.rx.recv().await {
            Some(action) => action,
            // The controller holds its own sender; the channel cannot close.
            None => unreachable!("controller sender dropped"),
        };
        self.timer = None;
        self.dispatch(action.clone());
        action
    }

    /// Fold in a timer resolution if one has already fired; never
    /// blocks. Returns the applied action, if any.
    pub fn try_resolution(&mut self) -> Option<Action> {
        let action = self.rx.try_recv().ok()?;
        self.timer = None;
        self.dispatch(action.clone());
        Some(action)
    }

    /// Abort an in-flight query timer and return the panel to idle.
    /// Returns whether anything was cancelled.
    pub fn cancel_query(&mut self) -> bool {
        if !self.state.query.is_pending() {
            return false;
        }
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        self.state.query = QueryState::Idle;
        tracing::debug!("pending query cancelled");
        true
    }
}

impl Drop for DashboardController {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
