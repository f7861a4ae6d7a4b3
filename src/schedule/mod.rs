//! Dependency scheduling and critical-path analysis.
//!
//! Builds a DAG from each item's `depends_on` list and runs the Critical
//! Path Method over it. Scheduling depends on durations only, never on
//! priority scores.
//!
//! # Usage
//!
//! ```
//! use u_scope::models::ScopeItem;
//! use u_scope::schedule::{build_schedule, critical_path};
//!
//! let items = vec![
//!     ScopeItem::new("demo").with_days(2),
//!     ScopeItem::new("framing").with_days(5).with_dependency("demo"),
//! ];
//! let schedule = build_schedule(&items).unwrap();
//! assert_eq!(schedule[1].earliest_start, 2);
//!
//! let cp = critical_path(&items).unwrap();
//! assert_eq!(cp.total_duration, 7);
//! ```
//!
//! # References
//!
//! - Kelley & Walker (1959), "Critical-Path Planning and Scheduling"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4.1

mod cpm;
mod critical;
mod summary;

pub use cpm::{build_schedule, DependencyMapping};
pub use critical::{critical_path, CriticalPathResult, PhaseGroup};
pub use summary::ScheduleSummary;

pub(crate) use cpm::selected_horizon;

use crate::error::ScopeResult;
use crate::models::ScopeItem;

/// Schedules the batch and condenses it into a [`ScheduleSummary`].
pub fn summarize(items: &[ScopeItem]) -> ScopeResult<ScheduleSummary> {
    build_schedule(items).map(|m| ScheduleSummary::calculate(&m))
}
