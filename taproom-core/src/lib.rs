pub mod config;
pub mod controller;
pub mod error;
pub mod metrics;
pub mod models;
pub mod ordering;
pub mod snapshot;
pub mod view;

pub use config::{FeedConfig, QueryConfig, TaproomConfig, ViewConfig};
pub use controller::DashboardController;
pub use error::TaproomError;
pub use metrics::{ActivityMetrics, PourSummary};
pub use models::{
    ActivityRecord, Module, ModuleTypeStat, PourScores, Session, Status, Timeframe,
    SCORED_MODULE_TYPES,
};
pub use snapshot::{DashboardSnapshot, ListView};
pub use view::{Action, QueryState, ViewState};
