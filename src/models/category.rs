//! Category classification.
//!
//! Item categories arrive as free text ("Kitchen remodel", "roof - tear off").
//! [`TRADE_KEYWORDS`] maps lowercase substrings to [`Trade`]s, and each trade
//! belongs to exactly one closed [`ItemCategory`]. Every lookup table in the
//! scoring model is keyed by these enums, so this table is the only place
//! where text is interpreted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Closed category set used by the scoring rules.
///
/// Variants are declared in precedence order: when an item matches trades
/// from several categories, the first one listed wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    /// Life-safety and code-compliance work.
    Safety,
    /// Load-bearing and envelope work.
    Structural,
    /// Mechanical, electrical, plumbing.
    Systems,
    /// Finish work visible to buyers and tenants.
    Cosmetic,
    /// Everything else.
    Optional,
}

impl ItemCategory {
    /// Classifies free category text.
    pub fn classify(text: &str) -> Self {
        TradeProfile::from_text(text).category
    }

    /// Whether the category is structural or systems work.
    pub fn is_core(self) -> bool {
        matches!(self, ItemCategory::Structural | ItemCategory::Systems)
    }
}

impl fmt::Display for ItemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ItemCategory::Safety => "safety",
            ItemCategory::Structural => "structural",
            ItemCategory::Systems => "systems",
            ItemCategory::Cosmetic => "cosmetic",
            ItemCategory::Optional => "optional",
        };
        f.write_str(s)
    }
}

/// Fine-grained kind of work detected in category text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trade {
    /// Hazard abatement, fire and life safety.
    Safety,
    /// Framing and load-bearing work.
    Structural,
    /// Foundation repair.
    Foundation,
    /// Roofing.
    Roof,
    /// Wiring, panels, fixtures.
    Electrical,
    /// Supply, drain and fixtures.
    Plumbing,
    /// Heating, ventilation, air conditioning.
    Hvac,
    /// Other building systems.
    Systems,
    /// Exterior envelope.
    Exterior,
    /// Siding.
    Siding,
    /// Interior finishes.
    Interior,
    /// Kitchen remodel.
    Kitchen,
    /// Bathroom remodel.
    Bathroom,
    /// Painting.
    Paint,
    /// Flooring.
    Flooring,
    /// Landscaping and outdoor features.
    Landscaping,
    /// Discretionary upgrades.
    Upgrade,
}

impl Trade {
    /// The closed category this trade belongs to.
    pub fn category(self) -> ItemCategory {
        match self {
            Trade::Safety => ItemCategory::Safety,
            Trade::Structural | Trade::Foundation | Trade::Roof => ItemCategory::Structural,
            Trade::Electrical | Trade::Plumbing | Trade::Hvac | Trade::Systems => {
                ItemCategory::Systems
            }
            Trade::Exterior
            | Trade::Siding
            | Trade::Interior
            | Trade::Kitchen
            | Trade::Bathroom
            | Trade::Paint
            | Trade::Flooring => ItemCategory::Cosmetic,
            Trade::Landscaping | Trade::Upgrade => ItemCategory::Optional,
        }
    }

    /// Trades that get the exterior seasonal adjustment.
    pub fn is_weather_exposed(self) -> bool {
        matches!(self, Trade::Exterior | Trade::Roof | Trade::Siding)
    }
}

/// Substring table: lowercase keyword → trade.
pub const TRADE_KEYWORDS: &[(&str, Trade)] = &[
    ("safety", Trade::Safety),
    ("smoke", Trade::Safety),
    ("carbon monoxide", Trade::Safety),
    ("hazard", Trade::Safety),
    ("mold", Trade::Safety),
    ("asbestos", Trade::Safety),
    ("radon", Trade::Safety),
    ("abatement", Trade::Safety),
    ("structural", Trade::Structural),
    ("framing", Trade::Structural),
    ("beam", Trade::Structural),
    ("joist", Trade::Structural),
    ("foundation", Trade::Foundation),
    ("roof", Trade::Roof),
    ("electrical", Trade::Electrical),
    ("wiring", Trade::Electrical),
    ("plumbing", Trade::Plumbing),
    ("sewer", Trade::Plumbing),
    ("water heater", Trade::Plumbing),
    ("hvac", Trade::Hvac),
    ("furnace", Trade::Hvac),
    ("air condition", Trade::Hvac),
    ("systems", Trade::Systems),
    ("mechanical", Trade::Systems),
    ("exterior", Trade::Exterior),
    ("gutter", Trade::Exterior),
    ("siding", Trade::Siding),
    ("interior", Trade::Interior),
    ("drywall", Trade::Interior),
    ("kitchen", Trade::Kitchen),
    ("cabinet", Trade::Kitchen),
    ("countertop", Trade::Kitchen),
    ("bath", Trade::Bathroom),
    ("paint", Trade::Paint),
    ("floor", Trade::Flooring),
    ("landscap", Trade::Landscaping),
    ("fence", Trade::Landscaping),
    ("upgrade", Trade::Upgrade),
    ("luxury", Trade::Upgrade),
    ("pool", Trade::Upgrade),
];

/// Trades detected in an item's category text, plus the resulting category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeProfile {
    /// All matched trades.
    pub trades: BTreeSet<Trade>,
    /// Highest-precedence category among the matched trades.
    pub category: ItemCategory,
}

impl TradeProfile {
    /// Detects trades by case-insensitive substring match.
    pub fn from_text(text: &str) -> Self {
        let lower = text.to_lowercase();
        let trades: BTreeSet<Trade> = TRADE_KEYWORDS
            .iter()
            .filter(|(keyword, _)| lower.contains(keyword))
            .map(|&(_, trade)| trade)
            .collect();
        let category = trades
            .iter()
            .map(|t| t.category())
            .min()
            .unwrap_or(ItemCategory::Optional);
        Self { trades, category }
    }

    /// Whether the given trade was detected.
    pub fn has(&self, trade: Trade) -> bool {
        self.trades.contains(&trade)
    }

    /// Whether any of the given trades was detected.
    pub fn has_any(&self, trades: &[Trade]) -> bool {
        trades.iter().any(|t| self.has(*t))
    }
}
