//! Rule-based score explanations.
//!
//! Rules are evaluated in a fixed order so the same score always yields the
//! same list of strings.

use crate::models::{PriorityTier, ProjectContext};

use super::components::ItemFacts;
use super::ComponentScores;

const HIGH: f64 = 70.0;
const GOOD_TIMING: f64 = 65.0;
const POOR_TIMING: f64 = 35.0;
const SIMPLE: f64 = 70.0;
const COMPLEX: f64 = 30.0;

pub(crate) fn explain(
    facts: &ItemFacts<'_>,
    components: &ComponentScores,
    ctx: &ProjectContext,
) -> Vec<String> {
    let mut reasons = Vec::new();

    if components.urgency > HIGH {
        if facts.item.priority_tier == PriorityTier::Must {
            reasons.push("Critical priority item".to_string());
        } else {
            reasons.push("Time-sensitive work".to_string());
        }
    }

    if components.roi_impact > HIGH {
        reasons.push(format!(
            "High ROI impact: {:.1}% projected return",
            facts.item.roi_impact
        ));
    }

    if components.risk_mitigation > HIGH {
        reasons.push("Mitigates significant project risk".to_string());
    }

    match facts.dependents {
        0 => {}
        1 => reasons.push("Unblocks 1 dependent item".to_string()),
        n => reasons.push(format!("Unblocks {n} dependent items")),
    }

    if components.market_timing >= GOOD_TIMING {
        reasons.push(format!("Good timing for {} work", ctx.season));
    } else if components.market_timing <= POOR_TIMING {
        reasons.push("Poor seasonal timing, consider deferring".to_string());
    }

    if components.complexity >= SIMPLE {
        reasons.push("Quick win: simple, low-cost work".to_string());
    } else if components.complexity <= COMPLEX {
        reasons.push("High complexity, allow extra contingency".to_string());
    }

    if reasons.is_empty() {
        reasons.push("Standard priority".to_string());
    }

    reasons
}
