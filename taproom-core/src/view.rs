//! Interactive view state and its pure transition rules.
//!
//! The presentation adapter holds exactly one live [`ViewState`]
//! (inside the controller) and re-renders on change; every interaction
//! is an [`Action`] folded in with [`ViewState::apply`], which returns
//! the next state. No shared mutable globals.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Timeframe;

/// Ad-hoc query panel machine: `Idle -> Pending -> Answered`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QueryState {
    Idle,
    /// One query in flight, waiting on the simulated latency timer.
    Pending { ticket: Uuid, prompt: String },
    /// Terminal for the current interaction; no "ask again" path.
    Answered { prompt: String, answer: String },
}

impl QueryState {
    pub fn is_pending(&self) -> bool {
        matches!(self, QueryState::Pending { .. })
    }
}

/// One user interaction against the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    SelectTimeframe { timeframe: Timeframe },
    ToggleSessions,
    ToggleModules,
    /// Open a module's detail panel, collapsing any other; re-selecting
    /// the open module closes it.
    ToggleModuleDetail { module_id: String },
    SubmitQuery { ticket: Uuid, prompt: String },
    ResolveQuery { ticket: Uuid, answer: String },
}

/// The interactive, UI-local state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub timeframe: Timeframe,
    pub sessions_expanded: bool,
    pub modules_expanded: bool,
    /// Zero or one module detail panel open at a time.
    pub expanded_module_id: Option<String>,
    pub query: QueryState,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            timeframe: Timeframe::default(),
            sessions_expanded: false,
            modules_expanded: false,
            expanded_module_id: None,
            query: QueryState::Idle,
        }
    }
}

impl ViewState {
    /// Fold one action into the state. Toggles are independent:
    /// flipping one flag never touches another.
    pub fn apply(mut self, action: Action) -> ViewState {
        match action {
            Action::SelectTimeframe { timeframe } => self.timeframe = timeframe,
            Action::ToggleSessions => self.sessions_expanded = !self.sessions_expanded,
            Action::ToggleModules => self.modules_expanded = !self.modules_expanded,
            Action::ToggleModuleDetail { module_id } => {
                self.expanded_module_id =
                    if self.expanded_module_id.as_deref() == Some(module_id.as_str()) {
                        None
                    } else {
                        Some(module_id)
                    };
            }
            Action::SubmitQuery { ticket, prompt } => {
                // At most one in-flight query; Answered is terminal.
                if self.query == QueryState::Idle {
                    self.query = QueryState::Pending { ticket, prompt };
                }
            }
            Action::ResolveQuery { ticket, answer } => {
                if let QueryState::Pending { ticket: pending, prompt } = &self.query {
                    if *pending == ticket {
                        self.query = QueryState::Answered {
                            prompt: prompt.clone(),
                            answer,
                        };
                    }
                }
            }
        }
        self
    }
}

// ============================================================================
// TESTS
// ============================================================================
