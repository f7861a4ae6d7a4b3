//! Side-by-side scenario comparison.
//!
//! Re-runs scoring, optimization and scheduling under alternate profiles so
//! callers can compare outcomes. Profiles only differ in scoring weights and
//! optimizer objective, and each run is independent of the others. Fastest
//! Completion computes its own reference optimum (strategy-default weights,
//! value objective) to derive its ROI floor.
//!
//! | Profile | Scoring weights | Objective |
//! |---------|-----------------|-----------|
//! | Maximize ROI | ROI emphasized (0.70) | Maximize value |
//! | Minimize Risk | Risk emphasized (0.60) | Maximize value |
//! | Fastest Completion | Strategy defaults | Minimize duration, ROI ≥ 50% of the value optimum |
//! | Balanced | Strategy defaults | Maximize value |
//!
//! # Usage
//!
//! ```
//! use u_scope::models::{PriorityTier, ProjectContext, ScopeItem, Strategy};
//! use u_scope::scenario::generate_scenarios;
//!
//! let items = vec![
//!     ScopeItem::new("roof").with_tier(PriorityTier::Must).with_cost(8000.0).with_days(4),
//!     ScopeItem::new("kitchen").with_cost(15000.0).with_days(12).with_roi(20.0),
//! ];
//! let ctx = ProjectContext::new(Strategy::Flip);
//! let scenarios = generate_scenarios(&items, &ctx, 30_000.0).unwrap();
//! assert_eq!(scenarios.len(), 4);
//! assert_eq!(scenarios[3].name, "Balanced");
//! ```

mod config;

pub use config::{ScenarioConfig, ScenarioKind};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ScopeResult;
use crate::models::{ProjectContext, ScopeItem, Strategy};
use crate::optimizer::{optimize, Objective, OptimizationResult, OptimizeOptions};
use crate::schedule::{summarize, ScheduleSummary};
use crate::scoring::{ScoreComponent, ScoringTables};

/// Outcome of one profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Display name of the profile.
    pub name: String,
    pub kind: ScenarioKind,
    /// Strategy the items were scored under.
    pub strategy: Strategy,
    pub optimization: OptimizationResult,
    /// Schedule of the selected items only.
    pub schedule: ScheduleSummary,
}

/// Runs the four standard profiles.
///
/// Results are returned in [`ScenarioKind::ALL`] order.
///
/// # Errors
/// Returns a validation or cycle error if the dependency graph is invalid.
pub fn generate_scenarios(
    items: &[ScopeItem],
    ctx: &ProjectContext,
    budget: f64,
) -> ScopeResult<Vec<ScenarioResult>> {
    generate_scenarios_with(items, ctx, budget, &ScenarioConfig::default())
}

/// Runs the four profiles with custom emphasis, floor and optimizer settings.
///
/// With the `parallel` feature, all profiles are evaluated on the rayon
/// thread pool. Output order is [`ScenarioKind::ALL`] either way.
pub fn generate_scenarios_with(
    items: &[ScopeItem],
    ctx: &ProjectContext,
    budget: f64,
    config: &ScenarioConfig,
) -> ScopeResult<Vec<ScenarioResult>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        ScenarioKind::ALL
            .par_iter()
            .map(|&kind| run(kind, items, ctx, budget, config))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        ScenarioKind::ALL
            .iter()
            .map(|&kind| run(kind, items, ctx, budget, config))
            .collect()
    }
}

fn base_options(ctx: &ProjectContext, config: &ScenarioConfig) -> OptimizeOptions {
    OptimizeOptions::new(ctx.clone())
        .with_granularity(config.granularity)
        .with_max_table_cells(config.max_table_cells)
}

fn run(
    kind: ScenarioKind,
    items: &[ScopeItem],
    ctx: &ProjectContext,
    budget: f64,
    config: &ScenarioConfig,
) -> ScopeResult<ScenarioResult> {
    let objective = match kind {
        ScenarioKind::FastestCompletion => {
            let reference_options = base_options(ctx, config)
                .with_tables(profile_tables(ScenarioKind::Balanced, config));
            let reference = optimize(items, budget, &reference_options)?;
            Objective::MinimizeDuration {
                min_roi: reference.total_roi * config.roi_floor_ratio,
            }
        }
        _ => Objective::MaximizeValue,
    };
    let options = base_options(ctx, config)
        .with_tables(profile_tables(kind, config))
        .with_objective(objective);

    let optimization = optimize(items, budget, &options)?;
    let schedule = summarize(&optimization.selected_items(items))?;

    debug!(
        scenario = kind.name(),
        selected = optimization.selected_ids.len(),
        total_roi = optimization.total_roi,
        duration = schedule.total_duration,
        "scenario evaluated"
    );

    Ok(ScenarioResult {
        name: kind.name().to_string(),
        kind,
        strategy: ctx.strategy,
        optimization,
        schedule,
    })
}

fn profile_tables(kind: ScenarioKind, config: &ScenarioConfig) -> ScoringTables {
    let base = config.tables.clone();
    match kind {
        ScenarioKind::MaximizeRoi => {
            base.with_weights(|w| w.emphasize(ScoreComponent::RoiImpact, config.roi_emphasis))
        }
        ScenarioKind::MinimizeRisk => base
            .with_weights(|w| w.emphasize(ScoreComponent::RiskMitigation, config.risk_emphasis)),
        ScenarioKind::FastestCompletion | ScenarioKind::Balanced => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScopeError;
    use crate::models::PriorityTier;

    fn project() -> Vec<ScopeItem> {
        vec![
            ScopeItem::new("demo")
                .with_tier(PriorityTier::Must)
                .with_cost(1000.0)
                .with_days(3),
            ScopeItem::new("kitchen")
                .with_category("kitchen")
                .with_cost(6000.0)
                .with_days(12)
                .with_roi(20.0)
                .with_dependency("demo"),
            ScopeItem::new("paint")
                .with_category("paint")
                .with_tier(PriorityTier::Could)
                .with_cost(1500.0)
                .with_days(3)
                .with_roi(14.0),
            ScopeItem::new("flooring")
                .with_category("flooring")
                .with_cost(2000.0)
                .with_days(4)
                .with_roi(14.0),
        ]
    }

    fn ctx() -> ProjectContext {
        ProjectContext::new(Strategy::Flip)
    }

    #[test]
    fn test_four_profiles_in_fixed_order() {
        let scenarios = generate_scenarios(&project(), &ctx(), 12_000.0).unwrap();
        let kinds: Vec<ScenarioKind> = scenarios.iter().map(|s| s.kind).collect();
        assert_eq!(kinds, ScenarioKind::ALL.to_vec());
        assert_eq!(scenarios[0].name, "Maximize ROI");
        assert!(scenarios.iter().all(|s| s.strategy == Strategy::Flip));
    }

    #[test]
    fn test_balanced_matches_default_optimizer() {
        let items = project();
        let scenarios = generate_scenarios(&items, &ctx(), 12_000.0).unwrap();
        let direct = optimize(&items, 12_000.0, &OptimizeOptions::new(ctx())).unwrap();
        assert_eq!(scenarios[3].optimization, direct);
        assert_eq!(scenarios[3].optimization.total_roi, 48.0);
        assert_eq!(scenarios[3].schedule.total_duration, 15);
    }

    #[test]
    fn test_fastest_completion_trades_roi_for_time() {
        let scenarios = generate_scenarios(&project(), &ctx(), 12_000.0).unwrap();
        let fastest = &scenarios[2];
        let balanced = &scenarios[3];

        assert_eq!(fastest.optimization.selected_ids, vec!["demo", "paint", "flooring"]);
        assert_eq!(fastest.optimization.total_roi, 28.0);
        assert!(fastest.optimization.total_roi >= 0.5 * balanced.optimization.total_roi);
        assert_eq!(fastest.schedule.total_duration, 4);
        assert_eq!(fastest.schedule.item_count, 3);
        assert!(fastest.schedule.total_duration < balanced.schedule.total_duration);
    }

    #[test]
    fn test_fastest_runs_without_balanced() {
        let items = project();
        let config = ScenarioConfig::default();
        let fastest =
            run(ScenarioKind::FastestCompletion, &items, &ctx(), 12_000.0, &config).unwrap();
        let balanced = run(ScenarioKind::Balanced, &items, &ctx(), 12_000.0, &config).unwrap();

        let scenarios = generate_scenarios(&items, &ctx(), 12_000.0).unwrap();
        assert_eq!(scenarios[2], fastest);
        assert_eq!(scenarios[3], balanced);
        assert_eq!(fastest.optimization.total_roi, 28.0);
    }

    #[test]
    fn test_floor_ratio_override() {
        let config = ScenarioConfig::default().with_roi_floor_ratio(1.0);
        let scenarios = generate_scenarios_with(&project(), &ctx(), 12_000.0, &config).unwrap();
        let fastest = &scenarios[2];
        assert_eq!(fastest.optimization.selected_ids.len(), 4);
        assert_eq!(fastest.schedule.total_duration, 15);
    }

    #[test]
    fn test_emphasis_reweights_scores() {
        let config = ScenarioConfig::default();
        let roi = profile_tables(ScenarioKind::MaximizeRoi, &config).weights_for(Strategy::Rental);
        let risk = profile_tables(ScenarioKind::MinimizeRisk, &config).weights_for(Strategy::Rental);
        assert!((roi.roi_impact - 0.70).abs() < 1e-12);
        assert!((risk.risk_mitigation - 0.60).abs() < 1e-12);
        assert!((roi.sum() - 1.0).abs() < 1e-9);
        assert!((risk.sum() - 1.0).abs() < 1e-9);
        assert_eq!(
            profile_tables(ScenarioKind::Balanced, &config),
            ScoringTables::standard()
        );
    }

    #[test]
    fn test_scenarios_never_mutate_items() {
        let items = project();
        let before = items.clone();
        generate_scenarios(&items, &ctx(), 2_000.0).unwrap();
        assert_eq!(items, before);
    }

    #[test]
    fn test_invalid_graph_propagates() {
        let items = vec![
            ScopeItem::new("a").with_dependency("b"),
            ScopeItem::new("b").with_dependency("a"),
        ];
        assert!(matches!(
            generate_scenarios(&items, &ctx(), 1000.0),
            Err(ScopeError::CycleDetected { .. })
        ));
    }

    #[test]
    fn test_serialize_result() {
        let scenarios = generate_scenarios(&project(), &ctx(), 12_000.0).unwrap();
        let json = serde_json::to_value(&scenarios[2]).unwrap();
        assert_eq!(json["kind"], "fastest_completion");
        assert_eq!(json["strategy"], "flip");
        assert_eq!(json["schedule"]["total_duration"], 4);
    }
}
