//! Scenario profiles and their configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::optimizer::DEFAULT_MAX_TABLE_CELLS;
use crate::scoring::ScoringTables;

/// The named comparison profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// ROI weight inflated to dominate the score.
    MaximizeRoi,
    /// Risk-mitigation weight inflated to dominate the score.
    MinimizeRisk,
    /// Shortest schedule that still reaches an ROI floor.
    FastestCompletion,
    /// Strategy-default weights.
    Balanced,
}

impl ScenarioKind {
    /// All profiles, in output order.
    pub const ALL: [ScenarioKind; 4] = [
        ScenarioKind::MaximizeRoi,
        ScenarioKind::MinimizeRisk,
        ScenarioKind::FastestCompletion,
        ScenarioKind::Balanced,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            ScenarioKind::MaximizeRoi => "Maximize ROI",
            ScenarioKind::MinimizeRisk => "Minimize Risk",
            ScenarioKind::FastestCompletion => "Fastest Completion",
            ScenarioKind::Balanced => "Balanced",
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Knobs for [`generate_scenarios_with`](super::generate_scenarios_with).
///
/// Every field has a default, so `{}` deserializes to the standard profiles.
///
/// ```
/// use u_scope::scenario::ScenarioConfig;
///
/// let config = ScenarioConfig::default()
///     .with_roi_emphasis(0.8)
///     .with_roi_floor_ratio(0.75);
/// assert_eq!(config.risk_emphasis, 0.60);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// ROI weight in the Maximize ROI profile.
    pub roi_emphasis: f64,
    /// Risk-mitigation weight in the Minimize Risk profile.
    pub risk_emphasis: f64,
    /// Fastest Completion ROI floor, as a fraction of the Balanced ROI.
    pub roi_floor_ratio: f64,
    /// Base tables every profile starts from.
    pub tables: ScoringTables,
    /// Budget discretization step passed to the optimizer.
    pub granularity: f64,
    /// DP table limit passed to the optimizer.
    pub max_table_cells: usize,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            roi_emphasis: 0.70,
            risk_emphasis: 0.60,
            roi_floor_ratio: 0.5,
            tables: ScoringTables::standard(),
            granularity: 1.0,
            max_table_cells: DEFAULT_MAX_TABLE_CELLS,
        }
    }
}

impl ScenarioConfig {
    /// Sets the Maximize ROI weight.
    pub fn with_roi_emphasis(mut self, weight: f64) -> Self {
        self.roi_emphasis = weight;
        self
    }

    /// Sets the Minimize Risk weight.
    pub fn with_risk_emphasis(mut self, weight: f64) -> Self {
        self.risk_emphasis = weight;
        self
    }

    /// Sets the Fastest Completion ROI floor ratio.
    pub fn with_roi_floor_ratio(mut self, ratio: f64) -> Self {
        self.roi_floor_ratio = ratio;
        self
    }

    /// Sets the base scoring tables.
    pub fn with_tables(mut self, tables: ScoringTables) -> Self {
        self.tables = tables;
        self
    }

    /// Sets the optimizer's budget step.
    pub fn with_granularity(mut self, granularity: f64) -> Self {
        self.granularity = granularity;
        self
    }

    /// Sets the optimizer's DP table limit.
    pub fn with_max_table_cells(mut self, cells: usize) -> Self {
        self.max_table_cells = cells;
        self
    }
}
