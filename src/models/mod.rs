//! Renovation scope domain models.
//!
//! Provides the input data types handed to the engine by the surrounding
//! application. All derived results (scores, schedules, selections) live in
//! their component modules.
//!
//! # Domain Mappings
//!
//! | u-scope | General contracting | Project management |
//! |---------|---------------------|--------------------|
//! | ScopeItem | Line item / trade task | Work package |
//! | depends_on | Sequencing note | Finish-to-start link |
//! | ProjectContext | Bid assumptions | Project charter |

mod category;
mod context;
mod item;

pub use category::{ItemCategory, Trade, TradeProfile, TRADE_KEYWORDS};
pub use context::{MarketConditions, ProjectContext, Season, Strategy};
pub use item::{PriorityTier, ScopeItem};
