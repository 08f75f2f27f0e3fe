pub mod module;
pub mod session;
pub mod status;
pub mod timeframe;
pub mod type_stat;

pub use module::{Module, PourScores, SCORED_MODULE_TYPES};
pub use session::Session;
pub use status::Status;
pub use timeframe::Timeframe;
pub use type_stat::ModuleTypeStat;

use chrono::{DateTime, Utc};

/// Read surface shared by sessions and modules, so aggregation and
/// filtering run over either collection.
pub trait ActivityRecord {
    fn record_id(&self) -> &str;
    fn start_time(&self) -> DateTime<Utc>;
    fn duration_minutes(&self) -> f64;
    fn status(&self) -> Status;
}
