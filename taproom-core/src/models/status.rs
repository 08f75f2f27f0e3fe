use serde::{Deserialize, Serialize};

/// Terminal status of a session or module run. Two values today; the
/// tag set may grow once the headsets report richer outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Completed,
    Exited,
}

impl Status {
    pub fn is_completed(self) -> bool {
        matches!(self, Status::Completed)
    }

    pub fn is_exited(self) -> bool {
        matches!(self, Status::Exited)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Completed => write!(f, "completed"),
            Status::Exited => write!(f, "exited"),
        }
    }
}
