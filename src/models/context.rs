//! Project context model.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Investment strategy for the property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Renovate and resell.
    Flip,
    /// Long-term rental.
    Rental,
    /// Light renovation and resale.
    Wholetail,
    /// Short-term rental.
    Airbnb,
}

impl Strategy {
    /// All strategies, in declaration order.
    pub const ALL: [Strategy; 4] = [
        Strategy::Flip,
        Strategy::Rental,
        Strategy::Wholetail,
        Strategy::Airbnb,
    ];
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Strategy::Flip => "flip",
            Strategy::Rental => "rental",
            Strategy::Wholetail => "wholetail",
            Strategy::Airbnb => "airbnb",
        };
        f.write_str(s)
    }
}

/// Season in which the work is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
        };
        f.write_str(s)
    }
}

/// Local real-estate market temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketConditions {
    Hot,
    Balanced,
    Cold,
}

/// Immutable scenario inputs under which items are scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectContext {
    /// Investment strategy.
    pub strategy: Strategy,
    /// Planned project length in months.
    pub timeline_months: f64,
    /// Total project budget (currency units).
    pub budget: f64,
    /// Current season.
    pub season: Season,
    /// Market temperature.
    pub market_conditions: MarketConditions,
}

impl ProjectContext {
    /// Creates a context with a 6-month timeline, zero budget, spring, balanced market.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            timeline_months: 6.0,
            budget: 0.0,
            season: Season::Spring,
            market_conditions: MarketConditions::Balanced,
        }
    }

    /// Sets the timeline in months.
    pub fn with_timeline_months(mut self, months: f64) -> Self {
        self.timeline_months = months;
        self
    }

    /// Sets the budget.
    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = budget;
        self
    }

    /// Sets the season.
    pub fn with_season(mut self, season: Season) -> Self {
        self.season = season;
        self
    }

    /// Sets the market conditions.
    pub fn with_market(mut self, market: MarketConditions) -> Self {
        self.market_conditions = market;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_builder() {
        let ctx = ProjectContext::new(Strategy::Flip)
            .with_timeline_months(3.0)
            .with_budget(50_000.0)
            .with_season(Season::Winter)
            .with_market(MarketConditions::Hot);

        assert_eq!(ctx.strategy, Strategy::Flip);
        assert_eq!(ctx.timeline_months, 3.0);
        assert_eq!(ctx.budget, 50_000.0);
        assert_eq!(ctx.season, Season::Winter);
        assert_eq!(ctx.market_conditions, MarketConditions::Hot);
    }

    #[test]
    fn test_context_serde() {
        let json = r#"{
            "strategy": "airbnb",
            "timeline_months": 4,
            "budget": 80000,
            "season": "fall",
            "market_conditions": "cold"
        }"#;
        let ctx: ProjectContext = serde_json::from_str(json).unwrap();
        assert_eq!(ctx.strategy, Strategy::Airbnb);
        assert_eq!(ctx.season, Season::Fall);
        assert_eq!(ctx.market_conditions, MarketConditions::Cold);
    }
}
