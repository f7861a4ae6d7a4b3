//! Versioned scoring lookup tables.
//!
//! Strategy weights, strategy × trade ROI multipliers, and trade complexity
//! adjustments live in one [`ScoringTables`] value so that scenario runs can
//! replace them wholesale.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Strategy, Trade};

/// Version tag of [`ScoringTables::standard`].
pub const STANDARD_TABLES_VERSION: &str = "2024.1";

/// The six scoring components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreComponent {
    /// How soon the work must happen.
    Urgency,
    /// Expected return for the strategy.
    RoiImpact,
    /// Project risk removed by the work.
    RiskMitigation,
    /// Work unblocked by the item.
    Dependencies,
    /// Season and market fit.
    MarketTiming,
    /// Simplicity (higher is simpler).
    Complexity,
}

impl ScoreComponent {
    /// All components, in reporting order.
    pub const ALL: [ScoreComponent; 6] = [
        ScoreComponent::Urgency,
        ScoreComponent::RoiImpact,
        ScoreComponent::RiskMitigation,
        ScoreComponent::Dependencies,
        ScoreComponent::MarketTiming,
        ScoreComponent::Complexity,
    ];
}

/// Per-component weights. A valid vector sums to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyWeights {
    /// Weight of [`ScoreComponent::Urgency`].
    pub urgency: f64,
    /// Weight of [`ScoreComponent::RoiImpact`].
    pub roi_impact: f64,
    /// Weight of [`ScoreComponent::RiskMitigation`].
    pub risk_mitigation: f64,
    /// Weight of [`ScoreComponent::Dependencies`].
    pub dependencies: f64,
    /// Weight of [`ScoreComponent::MarketTiming`].
    pub market_timing: f64,
    /// Weight of [`ScoreComponent::Complexity`].
    pub complexity: f64,
}

impl StrategyWeights {
    /// Creates a weight vector in [`ScoreComponent::ALL`] order.
    pub const fn new(
        urgency: f64,
        roi_impact: f64,
        risk_mitigation: f64,
        dependencies: f64,
        market_timing: f64,
        complexity: f64,
    ) -> Self {
        Self {
            urgency,
            roi_impact,
            risk_mitigation,
            dependencies,
            market_timing,
            complexity,
        }
    }

    /// Default weights for a strategy.
    pub fn for_strategy(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Flip => Self::new(0.15, 0.35, 0.15, 0.20, 0.10, 0.05),
            Strategy::Rental => Self::new(0.20, 0.25, 0.25, 0.15, 0.05, 0.10),
            Strategy::Wholetail => Self::new(0.25, 0.30, 0.20, 0.15, 0.05, 0.05),
            Strategy::Airbnb => Self::new(0.10, 0.30, 0.15, 0.20, 0.15, 0.10),
        }
    }

    /// Weight of one component.
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

    fn get_mut(&mut self, component: ScoreComponent) -> &mut f64 {
        match component {
            ScoreComponent::Urgency => &mut self.urgency,
            ScoreComponent::RoiImpact => &mut self.roi_impact,
            ScoreComponent::RiskMitigation => &mut self.risk_mitigation,
            ScoreComponent::Dependencies => &mut self.dependencies,
            ScoreComponent::MarketTiming => &mut self.market_timing,
            ScoreComponent::Complexity => &mut self.complexity,
        }
    }

    /// Sum of all weights.
    pub fn sum(&self) -> f64 {
        ScoreComponent::ALL.iter().map(|&c| self.get(c)).sum()
    }

    /// Sets `component` to `weight` and rescales the others so the vector
    /// still sums to 1.0, keeping their relative proportions.
    ///
    /// `weight` is clamped to [0, 1].
    pub fn emphasize(&self, component: ScoreComponent, weight: f64) -> Self {
        let weight = weight.clamp(0.0, 1.0);
        let others: f64 = self.sum() - self.get(component);
        let mut out = *self;
        let remaining = 1.0 - weight;
        for c in ScoreComponent::ALL {
            if c == component {
                *out.get_mut(c) = weight;
            } else if others > 0.0 {
                *out.get_mut(c) = self.get(c) / others * remaining;
            } else {
                *out.get_mut(c) = remaining / 5.0;
            }
        }
        out
    }
}

/// All lookup tables used by the scoring model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringTables {
    /// Table set version, reported with every score.
    pub version: String,
    /// Component weights per strategy.
    pub weights: BTreeMap<Strategy, StrategyWeights>,
    /// ROI multipliers per (strategy, trade). Unlisted pairs are 1.0.
    pub roi_multipliers: BTreeMap<Strategy, BTreeMap<Trade, f64>>,
    /// Additive complexity adjustments per trade.
    pub complexity_adjustments: BTreeMap<Trade, f64>,
}

impl ScoringTables {
    /// The standard table set.
    pub fn standard() -> Self {
        let weights = Strategy::ALL
            .iter()
            .map(|&s| (s, StrategyWeights::for_strategy(s)))
            .collect();

        let roi = |pairs: &[(Trade, f64)]| pairs.iter().copied().collect::<BTreeMap<_, _>>();
        let roi_multipliers = BTreeMap::from([
            (
                Strategy::Flip,
                roi(&[
                    (Trade::Kitchen, 1.3),
                    (Trade::Bathroom, 1.2),
                    (Trade::Exterior, 1.2),
                    (Trade::Siding, 1.15),
                    (Trade::Paint, 1.1),
                    (Trade::Flooring, 1.1),
                ]),
            ),
            (
                Strategy::Rental,
                roi(&[
                    (Trade::Systems, 1.3),
                    (Trade::Electrical, 1.3),
                    (Trade::Plumbing, 1.3),
                    (Trade::Hvac, 1.3),
                    (Trade::Roof, 1.2),
                    (Trade::Flooring, 1.15),
                ]),
            ),
            (
                Strategy::Wholetail,
                roi(&[
                    (Trade::Exterior, 1.5),
                    (Trade::Siding, 1.4),
                    (Trade::Roof, 1.3),
                    (Trade::Paint, 1.2),
                    (Trade::Landscaping, 1.2),
                ]),
            ),
            (
                Strategy::Airbnb,
                roi(&[
                    (Trade::Kitchen, 1.4),
                    (Trade::Bathroom, 1.3),
                    (Trade::Interior, 1.2),
                    (Trade::Landscaping, 1.2),
                    (Trade::Upgrade, 1.1),
                ]),
            ),
        ]);

        let complexity_adjustments = BTreeMap::from([
            (Trade::Paint, 20.0),
            (Trade::Flooring, 10.0),
            (Trade::Kitchen, -15.0),
            (Trade::Bathroom, -10.0),
            (Trade::Structural, -20.0),
            (Trade::Electrical, -15.0),
            (Trade::Plumbing, -15.0),
        ]);

        Self {
            version: STANDARD_TABLES_VERSION.to_string(),
            weights,
            roi_multipliers,
            complexity_adjustments,
        }
    }

    /// Weights for a strategy; falls back to the built-in defaults.
    pub fn weights_for(&self, strategy: Strategy) -> StrategyWeights {
        self.weights
            .get(&strategy)
            .copied()
            .unwrap_or_else(|| StrategyWeights::for_strategy(strategy))
    }

    /// Replaces the weights for every strategy.
    pub fn with_weights(mut self, f: impl Fn(StrategyWeights) -> StrategyWeights) -> Self {
        for s in Strategy::ALL {
            let w = self.weights_for(s);
            self.weights.insert(s, f(w));
        }
        self
    }

    /// Sets the version tag.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Largest multiplier among `trades` for `strategy`, or 1.0 if none match.
    pub fn roi_multiplier<'t>(
        &self,
        strategy: Strategy,
        trades: impl IntoIterator<Item = &'t Trade>,
    ) -> f64 {
        let Some(table) = self.roi_multipliers.get(&strategy) else {
            return 1.0;
        };
        trades
            .into_iter()
            .filter_map(|t| table.get(t).copied())
            .fold(None, |best: Option<f64>, m| Some(best.map_or(m, |b| b.max(m))))
            .unwrap_or(1.0)
    }

    /// Sum of complexity adjustments for `trades`.
    pub fn complexity_adjustment<'t>(&self, trades: impl IntoIterator<Item = &'t Trade>) -> f64 {
        trades
            .into_iter()
            .filter_map(|t| self.complexity_adjustments.get(t))
            .sum()
    }
}

impl Default for ScoringTables {
    fn default() -> Self {
        Self::standard()
    }
}
