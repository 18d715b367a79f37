//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `focustribe_core` linkage.
//! - Open a backend (file path argument, or in-memory with demo data) and
//!   print a one-line dashboard summary.

use focustribe_core::{Backend, BackendConfig};
use std::process::ExitCode;
use std::time::Duration;

fn main() -> ExitCode {
    println!("focustribe_core ping={}", focustribe_core::ping());
    println!("focustribe_core version={}", focustribe_core::core_version());

    let mut config = BackendConfig::default().with_latency(Duration::ZERO);
    if let Some(path) = std::env::args().nth(1) {
        config = config.with_db_path(path);
    }

    let backend = match Backend::open(config) {
        Ok(backend) => backend,
        Err(err) => {
            log::error!("event=cli_open module=cli status=error error={err}");
            eprintln!("failed to open store: {err}");
            return ExitCode::FAILURE;
        }
    };

    let dashboard = backend.dashboard_stats();
    let stats = dashboard.stats;
    println!(
        "dashboard due_today={} focus_minutes={}/{} sessions_today={} progress={}/{} tribes={} feed={}",
        stats.due_today,
        stats.focus_time,
        stats.daily_focus_goal,
        stats.sessions_completed,
        stats.tasks_progress.completed,
        stats.tasks_progress.total,
        stats.active_tribes,
        dashboard.recent_tasks.len()
    );
    ExitCode::SUCCESS
}
