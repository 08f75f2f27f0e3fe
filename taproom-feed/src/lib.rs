//! Record feed for the dashboard.
//!
//! [`RecordSource`] is the input contract the core consumes: two
//! homogeneous collections with no ordering guarantee. [`MockFeed`]
//! fulfils it with randomized but constrained synthetic records,
//! standing in for the real telemetry API until one exists.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use taproom_core::config::FeedConfig;
use taproom_core::error::TaproomError;
use taproom_core::models::{Module, PourScores, Session, Status, SCORED_MODULE_TYPES};

/// Any provider of session and module records. Implementations return
/// validated records in no particular order; the core sorts
/// defensively.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch_sessions(&self) -> Result<Vec<Session>, TaproomError>;
    async fn fetch_modules(&self) -> Result<Vec<Module>, TaproomError>;
}

/// Module-type catalog the mock feed draws from.
pub const MODULE_CATALOG: &[&str] = &["Perfect Pour", "Ingredients", "Beer types"];

const DEVICE_COUNT: u32 = 4;
const APP_ID: &str = "the-experience-v1.2";

/// Seeded synthetic record source. The whole record set is generated
/// up front so both fetches observe the same world.
pub struct MockFeed {
    sessions: Vec<Session>,
    modules: Vec<Module>,
}

impl MockFeed {
    pub fn new(config: &FeedConfig) -> Result<Self, TaproomError> {
        Self::with_now(config, Utc::now())
    }

    /// Generation anchored to an explicit `now`, for reproducible tests.
    pub fn with_now(config: &FeedConfig, now: DateTime<Utc>) -> Result<Self, TaproomError> {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let sessions = generate_sessions(&mut rng, config.sessions, now);
        let modules = generate_modules(&mut rng, &sessions, config.max_modules_per_session);

        // A record failing validation here is a generator defect, not
        // something the dashboard should paper over.
        for session in &sessions {
            session.validate()?;
        }
        for module in &modules {
            module.validate()?;
        }

        tracing::info!(
            sessions = sessions.len(),
            modules = modules.len(),
            "mock feed generated"
        );

        Ok(Self { sessions, modules })
    }
}

#[async_trait]
impl RecordSource for MockFeed {
    async fn fetch_sessions(&self) -> Result<Vec<Session>, TaproomError> {
        Ok(self.sessions.clone())
    }

    async fn fetch_modules(&self) -> Result<Vec<Module>, TaproomError> {
        Ok(self.modules.clone())
    }
}

// ============================================================================
// GENERATION
// ============================================================================

fn generate_sessions(rng: &mut StdRng, count: usize, now: DateTime<Utc>) -> Vec<Session> {
    (1..=count)
        .map(|n| {
            // Scatter starts over the past 30 days, clear of `now` by
            // at least an hour so every window tag has something to show.
            let offset_minutes = rng.gen_range(60..60 * 24 * 30);
            let start_time = now - Duration::minutes(offset_minutes);
            let duration = rng.gen_range(2.0..50.0_f64);
            Session {
                id: format!("session-{:03}", n),
                device_id: format!("VR-Headset-{:03}", rng.gen_range(1..=DEVICE_COUNT)),
                app_id: APP_ID.to_string(),
                start_time,
                end_time: start_time + Duration::seconds((duration * 60.0) as i64),
                duration,
                status: draw_status(rng),
            }
        })
        .collect()
}

/// Completions outnumber early exits roughly two to one.
fn draw_status(rng: &mut StdRng) -> Status {
    if rng.gen_bool(0.68) {
        Status::Completed
    } else {
        Status::Exited
    }
}

fn generate_modules(rng: &mut StdRng, sessions: &[Session], max_per_session: usize) -> Vec<Module> {
    let mut modules = Vec::new();
    let mut counter = 0usize;

    for session in sessions {
        let per_session = rng.gen_range(0..=max_per_session);
        let mut cursor = session.start_time;

        for _ in 0..per_session {
            counter += 1;
            let module_type = MODULE_CATALOG[rng.gen_range(0..MODULE_CATALOG.len())];
            let duration = rng.gen_range(1.0..10.0_f64);
            let start_time = cursor;
            let end_time = start_time + Duration::seconds((duration * 60.0) as i64);
            cursor = end_time;

            let status = draw_status(rng);
            let scores = if SCORED_MODULE_TYPES.contains(&module_type) {
                Some(generate_pour_scores(rng, status))
            } else {
                None
            };

            modules.push(Module {
                id: format!("module-{:03}", counter),
                module_id: module_type.to_string(),
                session_id: session.id.clone(),
                start_time,
                end_time,
                duration,
                status,
                scores,
            });
        }
    }

    modules
}

/// Cumulative pour scores: five non-decreasing totals, the rounded
/// mean, and a challenge high score only when the run completed.
fn generate_pour_scores(rng: &mut StdRng, status: Status) -> PourScores {
    let mut pours = [0i64; 5];
    let mut total = 0i64;
    for slot in pours.iter_mut() {
        total += rng.gen_range(500..3500);
        *slot = total;
    }

    let average = (pours.iter().sum::<i64>() as f64 / pours.len() as f64).round() as i64;
    let challenge_high_score = match status {
        Status::Exited => None,
        Status::Completed => Some(pours[4] + rng.gen_range(0..2000)),
    };

    PourScores {
        pours,
        average_score_per_beer: average,
        average_total: average,
        challenge_high_score,
    }
}

// ============================================================================
// TESTS
// ============================================================================
