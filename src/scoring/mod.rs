//! Multi-factor priority scoring.
//!
//! Computes a [`PriorityScore`] for one item given the whole item batch and
//! the project context. Scoring is pure: identical inputs always produce
//! identical scores, including the reasoning strings.
//!
//! # Algorithm
//!
//! 1. Classify the item's category text into trades and a closed category.
//! 2. Compute six components independently, each clamped to [0, 100].
//! 3. Combine with the strategy's weight vector, round, clamp.
//! 4. Derive reasoning strings from fixed thresholds.
//!
//! # Usage
//!
//! ```
//! use u_scope::models::{PriorityTier, ProjectContext, ScopeItem, Strategy};
//! use u_scope::scoring::score_item;
//!
//! let items = vec![
//!     ScopeItem::new("roof")
//!         .with_category("Roof replacement")
//!         .with_tier(PriorityTier::Must)
//!         .with_cost(12_000.0)
//!         .with_days(4)
//!         .with_roi(8.0),
//! ];
//! let ctx = ProjectContext::new(Strategy::Flip);
//! let score = score_item(&items[0], &items, &ctx);
//! assert!(score.overall <= 100);
//! ```

mod components;
mod reasoning;
mod tables;

pub use tables::{ScoreComponent, ScoringTables, StrategyWeights, STANDARD_TABLES_VERSION};

use serde::{Deserialize, Serialize};

use crate::models::{ProjectContext, ScopeItem};
use components::ItemFacts;

/// Component breakdown of a priority score. Every value is in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentScores {
    /// Tier, category, blockers, timeline and season.
    pub urgency: f64,
    /// ROI times strategy multiplier, plus cost efficiency.
    pub roi_impact: f64,
    /// Category, code/permit mentions and cost exposure.
    pub risk_mitigation: f64,
    /// Dependents, predecessors and phase.
    pub dependencies: f64,
    /// Seasonal and market conditions.
    pub market_timing: f64,
    /// Duration, cost and trade difficulty (higher is simpler).
    pub complexity: f64,
}

impl ComponentScores {
    /// Value of one component.
    pub fn get(&self, component: ScoreComponent) -> f64 {
        match component {
            ScoreComponent::Urgency => self.urgency,
            ScoreComponent::RoiImpact => self.roi_impact,
            ScoreComponent::RiskMitigation => self.risk_mitigation,
            ScoreComponent::Dependencies => self.dependencies,
            ScoreComponent::MarketTiming => self.market_timing,
            ScoreComponent::Complexity => self.complexity,
        }
    }

    /// Weighted sum, rounded to the nearest integer and clamped to [0, 100].
    pub fn weighted_overall(&self, weights: &StrategyWeights) -> u8 {
        let sum: f64 = ScoreComponent::ALL
            .iter()
            .map(|&c| self.get(c) * weights.get(c))
            .sum();
        sum.round().clamp(0.0, 100.0) as u8
    }
}

/// Derived priority score. Recomputed on demand, never a source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityScore {
    /// Scored item ID.
    pub item_id: String,
    /// Weighted overall score in [0, 100].
    pub overall: u8,
    /// Component breakdown.
    pub components: ComponentScores,
    /// Human-readable explanations, in fixed rule order.
    pub reasoning: Vec<String>,
    /// Version of the tables used.
    pub tables_version: String,
}

impl PriorityScore {
    /// Overall score as a fraction in [0, 1].
    #[inline]
    pub fn fraction(&self) -> f64 {
        f64::from(self.overall) / 100.0
    }
}

/// Scores one item with the standard tables.
///
/// `all_items` is the full batch, used to count items blocked by `item`.
pub fn score_item(item: &ScopeItem, all_items: &[ScopeItem], ctx: &ProjectContext) -> PriorityScore {
    score_item_with(item, all_items, ctx, &ScoringTables::standard())
}

/// Scores one item with custom tables (weights, ROI multipliers, complexity).
pub fn score_item_with(
    item: &ScopeItem,
    all_items: &[ScopeItem],
    ctx: &ProjectContext,
    tables: &ScoringTables,
) -> PriorityScore {
    let facts = ItemFacts::new(item, all_items);

    let components = ComponentScores {
        urgency: components::urgency(&facts, ctx),
        roi_impact: components::roi_impact(&facts, ctx, tables),
        risk_mitigation: components::risk_mitigation(&facts),
        dependencies: components::dependencies(&facts),
        market_timing: components::market_timing(&facts, ctx),
        complexity: components::complexity(&facts, tables),
    };

    let overall = components.weighted_overall(&tables.weights_for(ctx.strategy));
    let reasoning = reasoning::explain(&facts, &components, ctx);

    PriorityScore {
        item_id: item.id.clone(),
        overall,
        components,
        reasoning,
        tables_version: tables.version.clone(),
    }
}

/// Scores every item in the batch, in input order.
pub fn score_all(items: &[ScopeItem], ctx: &ProjectContext) -> Vec<PriorityScore> {
    score_all_with(items, ctx, &ScoringTables::standard())
}

/// Scores every item in the batch with custom tables, in input order.
///
/// With the `parallel` feature, items are scored on the rayon thread pool.
pub fn score_all_with(
    items: &[ScopeItem],
    ctx: &ProjectContext,
    tables: &ScoringTables,
) -> Vec<PriorityScore> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        items
            .par_iter()
            .map(|item| score_item_with(item, items, ctx, tables))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        items
            .iter()
            .map(|item| score_item_with(item, items, ctx, tables))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MarketConditions, PriorityTier, Season, Strategy as Plan};
    use proptest::prelude::*;

    fn kitchen() -> ScopeItem {
        ScopeItem::new("K")
            .with_category("Kitchen remodel")
            .with_tier(PriorityTier::Should)
            .with_cost(20_000.0)
            .with_days(8)
            .with_roi(20.0)
            .with_phase(2)
    }

    #[test]
    fn test_kitchen_flip_score() {
        let items = vec![kitchen()];
        let ctx = ProjectContext::new(Plan::Flip);
        let s = score_item(&items[0], &items, &ctx);

        assert_eq!(s.components.urgency, 80.0);
        assert_eq!(s.components.roi_impact, 100.0);
        assert_eq!(s.components.risk_mitigation, 60.0);
        assert_eq!(s.components.dependencies, 65.0);
        assert_eq!(s.components.market_timing, 50.0);
        assert_eq!(s.components.complexity, 25.0);
        assert_eq!(s.overall, 75);
        assert_eq!(
            s.reasoning,
            vec![
                "Time-sensitive work".to_string(),
                "High ROI impact: 20.0% projected return".to_string(),
                "High complexity, allow extra contingency".to_string(),
            ]
        );
        assert_eq!(s.tables_version, STANDARD_TABLES_VERSION);
    }

    #[test]
    fn test_roof_winter_score() {
        let items = vec![
            ScopeItem::new("roof")
                .with_category("Roof replacement")
                .with_tier(PriorityTier::Must)
                .with_cost(12_000.0)
                .with_days(4)
                .with_roi(8.0),
            ScopeItem::new("attic").with_dependency("roof"),
        ];
        let ctx = ProjectContext::new(Plan::Flip)
            .with_timeline_months(3.0)
            .with_season(Season::Winter)
            .with_market(MarketConditions::Cold);
        let s = score_item(&items[0], &items, &ctx);

        assert_eq!(s.components.urgency, 100.0);
        assert_eq!(s.components.roi_impact, 40.0);
        assert_eq!(s.components.risk_mitigation, 80.0);
        assert_eq!(s.components.dependencies, 85.0);
        assert_eq!(s.components.market_timing, 45.0);
        assert_eq!(s.components.complexity, 50.0);
        assert_eq!(s.overall, 65);
        assert_eq!(
            s.reasoning,
            vec![
                "Critical priority item".to_string(),
                "Mitigates significant project risk".to_string(),
                "Unblocks 1 dependent item".to_string(),
            ]
        );
    }

    #[test]
    fn test_standard_priority_fallback() {
        let item = ScopeItem::new("M")
            .with_category("misc")
            .with_tier(PriorityTier::Could)
            .with_cost(5_000.0)
            .with_days(7)
            .with_roi(5.0)
            .with_phase(5);
        let ctx = ProjectContext::new(Plan::Rental);
        let s = score_item(&item, std::slice::from_ref(&item), &ctx);
        assert_eq!(s.reasoning, vec!["Standard priority".to_string()]);
    }

    #[test]
    fn test_custom_tables_change_overall() {
        let items = vec![kitchen()];
        let ctx = ProjectContext::new(Plan::Flip);
        let complexity_heavy = ScoringTables::standard()
            .with_weights(|w| w.emphasize(ScoreComponent::Complexity, 1.0));
        let s = score_item_with(&items[0], &items, &ctx, &complexity_heavy);
        assert_eq!(s.overall, 25);
    }

    #[test]
    fn test_score_all_order() {
        let items = vec![
            kitchen(),
            ScopeItem::new("P").with_category("paint"),
            ScopeItem::new("E").with_category("electrical"),
        ];
        let ctx = ProjectContext::new(Plan::Airbnb);
        let scores = score_all(&items, &ctx);
        let ids: Vec<&str> = scores.iter().map(|s| s.item_id.as_str()).collect();
        assert_eq!(ids, vec!["K", "P", "E"]);
    }

    #[test]
    fn test_score_serializes() {
        let items = vec![kitchen()];
        let s = score_item(&items[0], &items, &ProjectContext::new(Plan::Flip));
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["overall"], 75);
        assert_eq!(json["components"]["roi_impact"], 100.0);
    }

    fn arb_tier() -> impl Strategy<Value = PriorityTier> {
        prop_oneof![
            Just(PriorityTier::Must),
            Just(PriorityTier::Should),
            Just(PriorityTier::Could),
            Just(PriorityTier::Nice),
        ]
    }

    fn arb_plan() -> impl Strategy<Value = Plan> {
        proptest::sample::select(Plan::ALL.to_vec())
    }

    fn arb_season() -> impl Strategy<Value = Season> {
        prop_oneof![
            Just(Season::Spring),
            Just(Season::Summer),
            Just(Season::Fall),
            Just(Season::Winter),
        ]
    }

    fn arb_market() -> impl Strategy<Value = MarketConditions> {
        prop_oneof![
            Just(MarketConditions::Hot),
            Just(MarketConditions::Balanced),
            Just(MarketConditions::Cold),
        ]
    }

    const CATEGORIES: &[&str] = &[
        "kitchen",
        "roof",
        "HVAC",
        "electrical safety",
        "paint",
        "foundation",
        "landscaping",
        "bathroom plumbing",
        "",
        "misc",
    ];

    proptest! {
        #[test]
        fn prop_scores_in_range(
            tier in arb_tier(),
            plan in arb_plan(),
            season in arb_season(),
            market in arb_market(),
            category in proptest::sample::select(CATEGORIES.to_vec()),
            cost in -1_000.0f64..200_000.0,
            days in -3i64..60,
            roi in 0.0f64..100.0,
            phase in 0u32..12,
            months in 0.0f64..24.0,
            dependents in 0usize..8,
        ) {
            let item = ScopeItem::new("X")
                .with_category(category)
                .with_tier(tier)
                .with_cost(cost)
                .with_days(days)
                .with_roi(roi)
                .with_phase(phase)
                .with_dependency("Y");
            let mut all = vec![item.clone()];
            for i in 0..dependents {
                all.push(ScopeItem::new(format!("D{i}")).with_dependency("X"));
            }
            let ctx = ProjectContext::new(plan)
                .with_timeline_months(months)
                .with_season(season)
                .with_market(market);

            let s = score_item(&item, &all, &ctx);
            prop_assert!(s.overall <= 100);
            for c in ScoreComponent::ALL {
                let v = s.components.get(c);
                prop_assert!((0.0..=100.0).contains(&v), "{c:?} = {v}");
            }

            // Pure: same inputs, same output.
            prop_assert_eq!(score_item(&item, &all, &ctx), s);
        }
    }
}
