use serde::{Deserialize, Serialize};

use crate::shared::report::{AggregateRow, BreakdownRow, DateRange, TrendPoint};

/// Filters of the sales trend screen
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesTrendRequest {
    pub range: DateRange,
    pub design: Option<String>,
    pub company: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesTrendResponse {
    /// One point per day of the range, zero-filled
    pub points: Vec<TrendPoint>,
    /// Designs ranked by total quantity
    pub by_design: Vec<AggregateRow>,
    /// Design -> company breakdown with subtotal rows
    pub breakdown: Vec<BreakdownRow>,
    /// Distinct designs in the unfiltered data, for the filter pickers
    pub designs: Vec<String>,
    /// Distinct companies in the unfiltered data
    pub companies: Vec<String>,
}
