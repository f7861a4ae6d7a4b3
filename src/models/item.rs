//! Scope item model.
//!
//! A scope item is a single renovation task: a cost, a duration, a free-text
//! category, and the ids of the items that must finish before it may start.
//!
//! # Time Representation
//! Durations are whole days. Schedule positions derived from them are days
//! relative to project start (t=0).

use serde::{Deserialize, Serialize};

use super::TradeProfile;

/// Author-declared importance level, independent of the computed score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    /// Required work. Always included by the optimizer.
    Must,
    /// Strongly recommended.
    Should,
    /// Worth doing if budget allows.
    Could,
    /// Cosmetic extras.
    Nice,
}

impl PriorityTier {
    /// Whether the tier is a hard-include constraint.
    pub fn is_mandatory(self) -> bool {
        matches!(self, PriorityTier::Must)
    }
}

/// A single renovation work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeItem {
    /// Unique item identifier, stable across recomputation.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Free-text description (scanned for code/permit mentions).
    #[serde(default)]
    pub description: String,
    /// Free-text category tag (e.g. "electrical", "kitchen remodel").
    pub category: String,
    /// Declared importance.
    pub priority_tier: PriorityTier,
    /// Total cost (currency units).
    pub total_cost: f64,
    /// Material portion of the cost.
    #[serde(default)]
    pub material_cost: f64,
    /// Labor portion of the cost.
    #[serde(default)]
    pub labor_cost: f64,
    /// Duration in days.
    pub days_required: i64,
    /// IDs of items that must complete before this one starts.
    #[serde(default)]
    pub depends_on: Vec<String>,
    /// Coarse scheduling bucket (1 = first).
    #[serde(default = "default_phase")]
    pub phase: u32,
    /// Expected percentage return contribution.
    #[serde(default)]
    pub roi_impact: f64,
    /// Caller-owned inclusion flag. Never modified by the engine.
    #[serde(default = "default_included")]
    pub included: bool,
}

fn default_phase() -> u32 {
    1
}

fn default_included() -> bool {
    true
}

impl ScopeItem {
    /// Creates a new item with the given ID.
    ///
    /// Defaults: `should` tier, zero cost, one day, phase 1, included.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            description: String::new(),
            category: String::new(),
            priority_tier: PriorityTier::Should,
            total_cost: 0.0,
            material_cost: 0.0,
            labor_cost: 0.0,
            days_required: 1,
            depends_on: Vec::new(),
            phase: 1,
            roi_impact: 0.0,
            included: true,
        }
    }

    /// Sets the item name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the category text.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the priority tier.
    pub fn with_tier(mut self, tier: PriorityTier) -> Self {
        self.priority_tier = tier;
        self
    }

    /// Sets the total cost.
    pub fn with_cost(mut self, total_cost: f64) -> Self {
        self.total_cost = total_cost;
        self
    }

    /// Sets the material/labor split.
    pub fn with_cost_split(mut self, material_cost: f64, labor_cost: f64) -> Self {
        self.material_cost = material_cost;
        self.labor_cost = labor_cost;
        self
    }

    /// Sets the duration in days.
    pub fn with_days(mut self, days: i64) -> Self {
        self.days_required = days;
        self
    }

    /// Adds a predecessor item ID.
    pub fn with_dependency(mut self, predecessor_id: impl Into<String>) -> Self {
        self.depends_on.push(predecessor_id.into());
        self
    }

    /// Sets the phase.
    pub fn with_phase(mut self, phase: u32) -> Self {
        self.phase = phase;
        self
    }

    /// Sets the expected ROI contribution (percent).
    pub fn with_roi(mut self, roi_impact: f64) -> Self {
        self.roi_impact = roi_impact;
        self
    }

    /// Sets the caller-owned inclusion flag.
    pub fn with_included(mut self, included: bool) -> Self {
        self.included = included;
        self
    }

    /// Total cost, negative values normalized to 0.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.total_cost.max(0.0)
    }

    /// Duration in days, negative values normalized to 0.
    #[inline]
    pub fn duration_days(&self) -> i64 {
        self.days_required.max(0)
    }

    /// Whether `other_id` appears among this item's predecessors.
    pub fn depends_on_id(&self, other_id: &str) -> bool {
        self.depends_on.iter().any(|d| d == other_id)
    }

    /// Number of items in `all_items` that list this item as a predecessor.
    pub fn dependent_count(&self, all_items: &[ScopeItem]) -> usize {
        all_items
            .iter()
            .filter(|other| other.depends_on_id(&self.id))
            .count()
    }

    /// Classified trades and category of this item.
    pub fn trade_profile(&self) -> TradeProfile {
        TradeProfile::from_text(&self.category)
    }
}
