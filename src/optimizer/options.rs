//! Optimizer configuration.
//!
//! [`OptimizeOptions`] holds everything that controls one optimization run
//! besides the items and the budget.

use serde::{Deserialize, Serialize};

use crate::models::ProjectContext;
use crate::scoring::ScoringTables;

/// Default DP table limit (items × budget steps).
pub const DEFAULT_MAX_TABLE_CELLS: usize = 10_000_000;

/// What the optional-item selection optimizes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Objective {
    /// Maximize `Σ roi_impact × score / 100` within the budget.
    #[default]
    MaximizeValue,
    /// Minimize the schedule's total duration while reaching at least
    /// `min_roi` total ROI (percent points).
    MinimizeDuration {
        /// ROI floor (sum of `roi_impact` over the selection).
        min_roi: f64,
    },
}

/// Configuration for [`optimize`](super::optimize).
///
/// # Defaults
///
/// ```
/// use u_scope::models::{ProjectContext, Strategy};
/// use u_scope::optimizer::{Objective, OptimizeOptions};
///
/// let options = OptimizeOptions::new(ProjectContext::new(Strategy::Rental));
/// assert_eq!(options.objective, Objective::MaximizeValue);
/// assert_eq!(options.granularity, 1.0);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_scope::models::{ProjectContext, Strategy};
/// use u_scope::optimizer::{Objective, OptimizeOptions};
///
/// let options = OptimizeOptions::new(ProjectContext::new(Strategy::Flip))
///     .with_granularity(50.0)
///     .with_max_table_cells(1_000_000)
///     .with_objective(Objective::MinimizeDuration { min_roi: 25.0 });
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeOptions {
    /// Context used to score items (the value signal).
    pub context: ProjectContext,

    /// Scoring tables (weights, multipliers).
    #[serde(default)]
    pub tables: ScoringTables,

    /// Selection objective.
    #[serde(default)]
    pub objective: Objective,

    /// Budget discretization step in currency units.
    ///
    /// Costs are rounded up to a multiple of this step, so coarser steps are
    /// faster but may leave budget unused. Non-positive values mean 1.0.
    #[serde(default = "default_granularity")]
    pub granularity: f64,

    /// Largest DP table (optional items × budget steps) before falling back
    /// to the greedy ratio heuristic.
    #[serde(default = "default_max_table_cells")]
    pub max_table_cells: usize,
}

fn default_granularity() -> f64 {
    1.0
}

fn default_max_table_cells() -> usize {
    DEFAULT_MAX_TABLE_CELLS
}

impl OptimizeOptions {
    /// Creates options with standard tables and the value objective.
    pub fn new(context: ProjectContext) -> Self {
        Self {
            context,
            tables: ScoringTables::standard(),
            objective: Objective::MaximizeValue,
            granularity: default_granularity(),
            max_table_cells: DEFAULT_MAX_TABLE_CELLS,
        }
    }

    /// Sets the scoring tables.
    pub fn with_tables(mut self, tables: ScoringTables) -> Self {
        self.tables = tables;
        self
    }

    /// Sets the objective.
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Sets the budget discretization step.
    pub fn with_granularity(mut self, granularity: f64) -> Self {
        self.granularity = granularity;
        self
    }

    /// Sets the DP table limit.
    pub fn with_max_table_cells(mut self, cells: usize) -> Self {
        self.max_table_cells = cells;
        self
    }

    pub(crate) fn effective_granularity(&self) -> f64 {
        if self.granularity.is_finite() && self.granularity > 0.0 {
            self.granularity
        } else {
            1.0
        }
    }
}
