//! Schedule summary metrics.
//!
//! Condenses a CPM schedule into the figures scenario comparisons need.
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total duration | Latest earliest-finish (longest chain) |
//! | Critical item count | Items with zero slack |
//! | Total work days | Sum of durations |
//! | Parallelism | Work days / total duration |
//! | Average slack | Mean slack over all items |

use serde::{Deserialize, Serialize};

use super::cpm::DependencyMapping;

/// Schedule performance indicators. All times are in days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    /// Number of scheduled items.
    pub item_count: usize,
    /// Minimum project duration.
    pub total_duration: i64,
    /// Number of zero-slack items.
    pub critical_item_count: usize,
    /// Sum of item durations.
    pub total_work_days: i64,
    /// Mean slack across items (0.0 when empty).
    pub avg_slack: f64,
}

impl ScheduleSummary {
    /// Computes the summary from CPM mappings.
    pub fn calculate(mappings: &[DependencyMapping]) -> Self {
        let total_duration = mappings
            .iter()
            .map(|m| m.earliest_finish)
            .max()
            .unwrap_or(0);
        let total_slack: i64 = mappings.iter().map(|m| m.slack).sum();
        let avg_slack = if mappings.is_empty() {
            0.0
        } else {
            total_slack as f64 / mappings.len() as f64
        };

        Self {
            item_count: mappings.len(),
            total_duration,
            critical_item_count: mappings.iter().filter(|m| m.critical_path).count(),
            total_work_days: mappings.iter().map(|m| m.duration_days).sum(),
            avg_slack,
        }
    }

    /// Average number of items in progress at once.
    ///
    /// Returns `None` for a zero-length schedule.
    pub fn parallelism(&self) -> Option<f64> {
        if self.total_duration <= 0 {
            return None;
        }
        Some(self.total_work_days as f64 / self.total_duration as f64)
    }

    /// Whether the schedule finishes within `max_days`.
    pub fn meets_deadline(&self, max_days: i64) -> bool {
        self.total_duration <= max_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScopeItem;
    use crate::schedule::build_schedule;

    #[test]
    fn test_summary_basic() {
        let items = vec![
            ScopeItem::new("A").with_days(4),
            ScopeItem::new("B").with_days(2),
            ScopeItem::new("C").with_days(3).with_dependency("A"),
        ];
        let s = ScheduleSummary::calculate(&build_schedule(&items).unwrap());
        assert_eq!(s.item_count, 3);
        assert_eq!(s.total_duration, 7);
        assert_eq!(s.critical_item_count, 2);
        assert_eq!(s.total_work_days, 9);
        // Only B has slack (5 days)
        assert!((s.avg_slack - 5.0 / 3.0).abs() < 1e-10);
        assert!((s.parallelism().unwrap() - 9.0 / 7.0).abs() < 1e-10);
        assert!(s.meets_deadline(7));
        assert!(!s.meets_deadline(6));
    }

    #[test]
    fn test_summary_empty() {
        let s = ScheduleSummary::calculate(&[]);
        assert_eq!(s.total_duration, 0);
        assert_eq!(s.critical_item_count, 0);
        assert_eq!(s.avg_slack, 0.0);
        assert!(s.parallelism().is_none());
        assert!(s.meets_deadline(0));
    }
}
