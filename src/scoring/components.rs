//! The six scoring components.
//!
//! Each component starts from a base value, applies additive adjustments,
//! and is clamped to [0, 100].
//!
//! | Component | Base | Higher means |
//! |-----------|------|--------------|
//! | Urgency | 50 | Must happen sooner |
//! | ROI Impact | `roi × 5` | Larger return |
//! | Risk Mitigation | 50 | Removes more project risk |
//! | Dependencies | 50 | Unblocks more work |
//! | Market Timing | 50 | Better season/market fit |
//! | Complexity | 50 | Simpler work |

use crate::models::{
    ItemCategory, MarketConditions, PriorityTier, ProjectContext, ScopeItem, Season, Strategy,
    Trade, TradeProfile,
};

use super::ScoringTables;

/// Per-item facts shared by all component rules.
#[derive(Debug, Clone)]
pub(crate) struct ItemFacts<'a> {
    pub item: &'a ScopeItem,
    pub profile: TradeProfile,
    /// Items that list this one as a predecessor.
    pub dependents: usize,
    /// Distinct predecessors of this item.
    pub predecessors: usize,
}

impl<'a> ItemFacts<'a> {
    pub fn new(item: &'a ScopeItem, all_items: &[ScopeItem]) -> Self {
        let mut preds: Vec<&str> = item.depends_on.iter().map(String::as_str).collect();
        preds.sort_unstable();
        preds.dedup();
        Self {
            item,
            profile: item.trade_profile(),
            dependents: item.dependent_count(all_items),
            predecessors: preds.len(),
        }
    }
}

#[inline]
fn clamp_score(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Seasonal adjustment shared by urgency and market timing.
///
/// Weather-exposed trades (exterior, roof, siding) and HVAC each contribute;
/// an item matching both gets both.
pub(crate) fn seasonal_adjustment(profile: &TradeProfile, season: Season) -> f64 {
    let mut adj = 0.0;
    if profile.trades.iter().any(|t| t.is_weather_exposed()) {
        adj += match season {
            Season::Spring | Season::Summer => 10.0,
            Season::Fall => 5.0,
            Season::Winter => -15.0,
        };
    }
    if profile.has(Trade::Hvac) {
        adj += match season {
            Season::Spring | Season::Fall => 15.0,
            Season::Summer | Season::Winter => -5.0,
        };
    }
    adj
}

fn tier_bonus(tier: PriorityTier) -> f64 {
    match tier {
        PriorityTier::Must => 40.0,
        PriorityTier::Should => 20.0,
        PriorityTier::Could => 0.0,
        PriorityTier::Nice => -20.0,
    }
}

/// Urgency category bonus: closed category first, then exterior/interior finish trades.
fn urgency_category_bonus(profile: &TradeProfile) -> f64 {
    match profile.category {
        ItemCategory::Safety => 35.0,
        ItemCategory::Structural => 30.0,
        ItemCategory::Systems => 25.0,
        _ if profile.has_any(&[Trade::Exterior, Trade::Siding]) => 20.0,
        _ if profile.has_any(&[
            Trade::Interior,
            Trade::Kitchen,
            Trade::Bathroom,
            Trade::Paint,
            Trade::Flooring,
        ]) =>
        {
            10.0
        }
        _ => 0.0,
    }
}

pub(crate) fn urgency(facts: &ItemFacts<'_>, ctx: &ProjectContext) -> f64 {
    let mut score = 50.0;
    score += tier_bonus(facts.item.priority_tier);
    score += urgency_category_bonus(&facts.profile);
    score += 5.0 * facts.dependents as f64;

    if ctx.timeline_months <= 3.0 {
        score += 15.0;
    } else if ctx.timeline_months >= 12.0 {
        score -= 10.0;
    }

    score += seasonal_adjustment(&facts.profile, ctx.season);
    clamp_score(score)
}

pub(crate) fn roi_impact(
    facts: &ItemFacts<'_>,
    ctx: &ProjectContext,
    tables: &ScoringTables,
) -> f64 {
    let roi = facts.item.roi_impact;
    let multiplier = tables.roi_multiplier(ctx.strategy, &facts.profile.trades);
    let mut score = roi * 5.0 * multiplier;

    // ROI points per $1000 spent. Free items with any return count as efficient.
    let cost_k = facts.item.cost() / 1000.0;
    if cost_k > 0.0 {
        let efficiency = roi / cost_k;
        if efficiency > 2.0 {
            score += 10.0;
        } else if efficiency < 0.5 {
            score -= 10.0;
        }
    } else if roi > 0.0 {
        score += 10.0;
    }

    clamp_score(score)
}

/// Whether the description mentions building code or permits.
fn mentions_code_or_permit(description: &str) -> bool {
    let lower = description.to_lowercase();
    lower.contains("code") || lower.contains("permit")
}

pub(crate) fn risk_mitigation(facts: &ItemFacts<'_>) -> f64 {
    let mut score = 50.0;
    score += match facts.profile.category {
        ItemCategory::Safety => 25.0,
        ItemCategory::Structural => 20.0,
        ItemCategory::Systems => 15.0,
        ItemCategory::Cosmetic | ItemCategory::Optional => 0.0,
    };
    if mentions_code_or_permit(&facts.item.description) {
        score += 15.0;
    }
    score += 10.0 * (facts.item.cost() / 10_000.0).min(1.0);
    clamp_score(score)
}

pub(crate) fn dependencies(facts: &ItemFacts<'_>) -> f64 {
    let mut score = 50.0;
    score += 15.0 * facts.dependents as f64;
    score -= 5.0 * facts.predecessors as f64;
    score += 5.0 * (5.0 - facts.item.phase as f64);
    clamp_score(score)
}

pub(crate) fn market_timing(facts: &ItemFacts<'_>, ctx: &ProjectContext) -> f64 {
    let mut score = 50.0 + seasonal_adjustment(&facts.profile, ctx.season);

    match ctx.market_conditions {
        MarketConditions::Hot
            if ctx.strategy == Strategy::Flip && facts.item.roi_impact > 15.0 =>
        {
            score += 15.0;
        }
        MarketConditions::Cold if facts.profile.category.is_core() => {
            score += 10.0;
        }
        _ => {}
    }

    clamp_score(score)
}

pub(crate) fn complexity(facts: &ItemFacts<'_>, tables: &ScoringTables) -> f64 {
    let mut score = 50.0;

    let days = facts.item.duration_days();
    if days <= 2 {
        score += 20.0;
    } else if days <= 5 {
        score += 10.0;
    } else if days > 10 {
        score -= 15.0;
    }

    let cost = facts.item.cost();
    if cost < 1_000.0 {
        score += 15.0;
    } else if cost > 10_000.0 {
        score -= 10.0;
    }

    score += tables.complexity_adjustment(&facts.profile.trades);
    score -= 5.0 * facts.predecessors as f64;
    clamp_score(score)
}
