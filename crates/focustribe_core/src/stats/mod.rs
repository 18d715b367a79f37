//! Derived views over the live collections.
//!
//! # Responsibility
//! - Aggregate dashboard statistics.
//! - Build the capped, deduplicated dashboard feed.
//! - Summarize analytics.
//!
//! # Invariants
//! - Pure functions of the passed slices and `now`; nothing is cached or persisted.

pub mod analytics;
pub mod derived;
pub mod feed;

pub use analytics::{compute_analytics, Analytics, PriorityBreakdown, SeriesPoint};
pub use derived::{compute_stats, DerivedStats, TaskProgress, DAILY_FOCUS_GOAL_MINUTES};
pub use feed::{build_dashboard_feed, DASHBOARD_FEED_LIMIT};

use serde::Serialize;

use crate::model::task::Task;

/// Stats plus feed, as returned to dashboard callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub stats: DerivedStats,
    pub recent_tasks: Vec<Task>,
}
