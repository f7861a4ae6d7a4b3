//! Renovation scope prioritization and scheduling engine.
//!
//! Turns a list of renovation work items into a ranked, budget-feasible,
//! dependency-ordered plan. Everything is a pure function of the items and
//! the project context; the engine holds no state and never mutates inputs.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ScopeItem`, `PriorityTier`, `ProjectContext`,
//!   `Trade`, `ItemCategory`
//! - **`scoring`**: Six-component priority score with strategy weights
//! - **`validation`**: Input integrity checks (duplicate IDs, unknown
//!   dependencies, DAG cycles)
//! - **`schedule`**: Critical Path Method, slack and phase grouping
//! - **`optimizer`**: Budget-constrained selection (knapsack with dependency
//!   closure)
//! - **`scenario`**: Profile comparison (max ROI, min risk, fastest, balanced)
//!
//! # Pipeline
//!
//! ```text
//! items + context → scores → schedule / critical path → selection → scenarios
//! ```
//!
//! # Features
//!
//! - `parallel`: score items and evaluate scenarios on the rayon thread pool.
//!
//! # References
//!
//! - Kelley & Walker (1959), "Critical-Path Planning and Scheduling"
//! - Kellerer, Pferschy & Pisinger (2004), "Knapsack Problems"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod error;
pub mod models;
pub mod optimizer;
pub mod scenario;
pub mod schedule;
pub mod scoring;
pub mod validation;

pub use error::{ScopeError, ScopeResult};
pub use optimizer::{optimize, OptimizationResult, OptimizeOptions};
pub use scenario::{generate_scenarios, ScenarioResult};
pub use schedule::{build_schedule, critical_path, CriticalPathResult, DependencyMapping};
pub use scoring::{score_item, PriorityScore};
