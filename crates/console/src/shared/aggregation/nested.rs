use contracts::shared::record::{GroupField, TransactionRecord, ValueField};
use contracts::shared::report::BreakdownRow;

use super::engine::{aggregate, rank_descending};

/// Two-level breakdown: every `primary` bucket lists its `secondary`
/// buckets, then a `"<primary> Subtotal"` row.
///
/// Primary buckets are ordered by their total descending, children by
/// their own total descending; ties fall back to the name.
pub fn nested_subtotals(
    records: &[TransactionRecord],
    primary: GroupField,
    secondary: GroupField,
    value_field: ValueField,
) -> Vec<BreakdownRow> {
    let parents = rank_descending(aggregate(records, &[primary], value_field));
    let children = rank_descending(aggregate(records, &[primary, secondary], value_field));

    let mut rows = Vec::with_capacity(parents.len() + children.len());
    for parent in &parents {
        let name = parent.key.get(0);
        let mut subtotal: i64 = 0;

        for child in children.iter().filter(|c| c.key.get(0) == name) {
            subtotal = subtotal.saturating_add(child.total);
            rows.push(BreakdownRow {
                primary: name.to_string(),
                secondary: child.key.get(1).to_string(),
                total: child.total,
                is_subtotal: false,
            });
        }

        rows.push(BreakdownRow::subtotal(name, subtotal));
    }

    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bill(company: &str, design: &str, qty: i64) -> TransactionRecord {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        TransactionRecord::billing(company, "X", design, qty, date, "u1")
    }

    #[test]
    fn test_design_company_breakdown() {
        let records = vec![
            bill("Acme", "D1", 2),
            bill("Beta", "D1", 5),
            bill("Acme", "D2", 10),
            bill("Acme", "D1", 1),
        ];
        let rows = nested_subtotals(&records, GroupField::Design, GroupField::Company, ValueField::Quantity);

        let flat: Vec<(String, String, i64, bool)> = rows
            .into_iter()
            .map(|r| (r.primary, r.secondary, r.total, r.is_subtotal))
            .collect();
        assert_eq!(
            flat,
            vec![
                ("D2".to_string(), "Acme".to_string(), 10, false),
                ("D2 Subtotal".to_string(), "".to_string(), 10, true),
                ("D1".to_string(), "Beta".to_string(), 5, false),
                ("D1".to_string(), "Acme".to_string(), 3, false),
                ("D1 Subtotal".to_string(), "".to_string(), 8, true),
            ]
        );
    }

    #[test]
    fn test_subtotal_equals_preceding_siblings() {
        let records = vec![
            bill("A", "D1", 4),
            bill("B", "D1", 4),
            bill("C", "D2", 1),
            bill("A", "D3", 7),
            bill("B", "D3", 0),
        ];
        let rows = nested_subtotals(&records, GroupField::Design, GroupField::Company, ValueField::Quantity);

        let mut running = 0;
        for row in &rows {
            if row.is_subtotal {
                assert_eq!(row.total, running);
                running = 0;
            } else {
                running += row.total;
            }
        }
        assert_eq!(rows.iter().filter(|r| r.is_subtotal).count(), 3);
    }

    #[test]
    fn test_empty_records() {
        assert!(nested_subtotals(&[], GroupField::Design, GroupField::Company, ValueField::Quantity).is_empty());
    }
}
