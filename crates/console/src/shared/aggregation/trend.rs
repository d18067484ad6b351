use chrono::NaiveDate;
use contracts::shared::record::{TransactionRecord, ValueField};
use contracts::shared::report::{DateRange, TrendPoint};
use std::collections::HashMap;

/// Daily totals over `range`, one point per calendar day, ascending.
///
/// Days without records are 0; records outside the range are ignored.
pub fn date_trend(
    records: &[TransactionRecord],
    range: &DateRange,
    value_field: ValueField,
) -> Vec<TrendPoint> {
    let mut by_day: HashMap<NaiveDate, i64> = HashMap::new();
    for record in records.iter().filter(|r| range.contains(r.date)) {
        let total = by_day.entry(record.date).or_insert(0);
        *total = total.saturating_add(record.value(value_field));
    }

    range
        .days()
        .map(|date| TrendPoint {
            date,
            total: by_day.get(&date).copied().unwrap_or(0),
        })
        .collect()
}
