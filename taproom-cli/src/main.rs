//! taproom-cli — text-mode frontend for The Experience usage dashboard.
//!
//! Pulls a record set from the mock feed, assembles a snapshot, and
//! renders the overview cards, activity lists, and per-type completion
//! table as plain text. A presentation adapter in the narrow sense:
//! everything it prints comes straight out of the snapshot.

use chrono::Utc;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use taproom_core::metrics::{format_duration, format_timestamp, pour_summary};
use taproom_core::snapshot::DashboardSnapshot;
use taproom_core::view::{Action, QueryState, ViewState};
use taproom_core::{DashboardController, TaproomConfig, Timeframe};
use taproom_feed::{MockFeed, RecordSource};

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "taproom.toml")]
    config: String,

    /// Timeframe tag: 1h, 24h, 7d, 30d or all
    #[arg(short, long)]
    timeframe: Option<Timeframe>,

    /// Show every record instead of the preview slice
    #[arg(long)]
    expand: bool,

    /// Open one module's detail panel by id
    #[arg(long)]
    detail: Option<String>,

    /// Emit the snapshot as JSON instead of tables
    #[arg(long)]
    json: bool,

    /// Skip the ad-hoc query demonstration
    #[arg(long)]
    no_query: bool,
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience — production uses real env vars)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Init logging
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    // Load config; a missing file falls back to defaults, a broken one
    // is a hard error.
    let config = if std::path::Path::new(&args.config).exists() {
        match TaproomConfig::load(&args.config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load config from {}: {}", args.config, e);
                std::process::exit(1);
            }
        }
    } else {
        tracing::info!("no config at {}, using defaults", args.config);
        TaproomConfig::default()
    };

    let feed = MockFeed::new(&config.feed)?;
    let sessions = feed.fetch_sessions().await?;
    let modules = feed.fetch_modules().await?;

    let mut view = ViewState {
        timeframe: config.view.default_timeframe,
        sessions_expanded: args.expand,
        modules_expanded: args.expand,
        ..ViewState::default()
    };
    if let Some(timeframe) = args.timeframe {
        view.timeframe = timeframe;
    }

    let mut controller = DashboardController::new(view, config.query.clone());
    if let Some(module_id) = args.detail {
        controller.dispatch(Action::ToggleModuleDetail { module_id });
    }

    let snapshot = DashboardSnapshot::build(
        &sessions,
        &modules,
        controller.state(),
        &config.view,
        Utc::now(),
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    render_overview(&snapshot);
    render_sessions(&snapshot);
    render_modules(&snapshot);
    render_type_stats(&snapshot);

    if !args.no_query {
        run_query_demo(&mut controller).await;
    }

    Ok(())
}

// ============================================================================
// Rendering
// ============================================================================

fn render_overview(snapshot: &DashboardSnapshot) {
    let s = &snapshot.session_metrics;
    let m = &snapshot.module_metrics;

    println!("== The Experience Dashboard — {} ==", snapshot.view.timeframe.label());
    println!();
    println!(
        "Total Sessions       {:>5}   ({} completed, {} exited — {:.0}%)",
        s.count, s.completed_count, s.exited_count, snapshot.session_completion_rate
    );
    println!(
        "Avg Session Duration {:>8.1}m   ({} average, {} longest)",
        s.avg_duration,
        format_duration(s.avg_duration),
        format_duration(s.max_duration)
    );
    println!(
        "Total Modules        {:>5}   ({} completed, {} exited — {:.0}%)",
        m.count, m.completed_count, m.exited_count, snapshot.module_completion_rate
    );
    println!(
        "Avg Module Duration  {:>8.1}m   ({} average)",
        m.avg_duration,
        format_duration(m.avg_duration)
    );
    println!();
}

fn render_sessions(snapshot: &DashboardSnapshot) {
    println!(
        "-- Session Activity (showing {} of {}) --",
        snapshot.sessions.visible.len(),
        snapshot.sessions.total
    );
    let max = snapshot.session_metrics.max_duration;
    for session in &snapshot.sessions.visible {
        println!(
            "{:<14} {:<16} {:<20} {:>9} {:<10} {}",
            session.id,
            session.device_id,
            format_timestamp(session.start_time),
            format_duration(session.duration),
            session.status,
            bar(session.duration, max, 20)
        );
    }
    println!();
}

fn render_modules(snapshot: &DashboardSnapshot) {
    println!(
        "-- Module Performance (showing {} of {}) --",
        snapshot.modules.visible.len(),
        snapshot.modules.total
    );
    let max = snapshot.module_metrics.max_duration;
    let expanded = snapshot.view.expanded_module_id.as_deref();

    for module in &snapshot.modules.visible {
        println!(
            "{:<14} {:<14} {:<12} {:>9} {:<10} {}",
            module.id,
            module.module_id,
            module.session_id,
            format_duration(module.duration),
            module.status,
            bar(module.duration, max, 20)
        );

        if expanded == Some(module.id.as_str()) {
            match pour_summary(module) {
                Ok(summary) => {
                    println!("    pours: {:?}", summary.pours);
                    println!("    avg score per beer: {}", summary.average_score_per_beer);
                    match summary.challenge_high_score {
                        Some(high) => println!("    challenge high score: {}", high),
                        None => println!("    challenge high score: —"),
                    }
                }
                Err(e) => println!("    no scored detail: {}", e),
            }
        }
    }
    println!();
}

fn render_type_stats(snapshot: &DashboardSnapshot) {
    println!("-- Module Completion --");
    println!(
        "{:<16} {:>8} {:>10} {:>7} {:>8} {:>12}",
        "Type", "Started", "Completed", "Exited", "Rate", "Avg Duration"
    );
    for row in &snapshot.module_type_stats {
        let rate = taproom_core::metrics::completion_rate(row.completed, row.started);
        println!(
            "{:<16} {:>8} {:>10} {:>7} {:>7.0}% {:>12}",
            row.module_type,
            row.started,
            row.completed,
            row.exited,
            rate,
            format_duration(row.avg_duration)
        );
    }
    println!();
}

/// Text rendition of the dashboard's duration bar: filled share of
/// `width` cells, clamped to full.
fn bar(value: f64, max: f64, width: usize) -> String {
    let filled = if max > 0.0 {
        ((value / max) * width as f64).round().min(width as f64) as usize
    } else {
        0
    };
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

// ============================================================================
// Query demo
// ============================================================================

async fn run_query_demo(controller: &mut DashboardController) {
    let prompt = "Which module type loses the most players?";
    println!("-- Ad-hoc Query --");
    println!("> {}", prompt);

    if controller.submit_query(prompt).is_none() {
        println!("(query panel busy)");
        return;
    }
    println!("(pending...)");

    controller.next_resolution().await;
    if let QueryState::Answered { answer, .. } = &controller.state().query {
        println!("{}", answer);
    }
}

// ============================================================================
// Tests
// ============================================================================
