//! Aggregation Engine
//!
//! Pure functions over flat transaction lists: grouping with totals,
//! rankings, nested subtotal breakdowns, zero-filled date trends and the
//! company -> portal -> design billing tree.

pub mod billing_tree;
pub mod engine;
pub mod nested;
pub mod trend;

pub use billing_tree::build_billing_tree;
pub use engine::{aggregate, distinct_values, grand_total, rank_descending};
pub use nested::nested_subtotals;
pub use trend::date_trend;
