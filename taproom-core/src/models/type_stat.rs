use serde::{Deserialize, Serialize};

/// Aggregated counters for one module type. Derived on demand from the
/// module collection, never stored. Every row satisfies
/// `started == completed + exited`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleTypeStat {
    pub module_type: String,
    pub started: usize,
    pub completed: usize,
    pub exited: usize,
    /// Mean duration in minutes; zero when the type has no records.
    pub avg_duration: f64,
}
