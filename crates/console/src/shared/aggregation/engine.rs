use contracts::shared::record::{GroupField, TransactionRecord, ValueField};
use contracts::shared::report::{AggregateRow, GroupKey};
use std::collections::HashMap;

/// Group `records` by `group_fields` and sum `value_field` per group.
///
/// One pass; rows come out in the order their key was first seen. Absent
/// group fields bucket as the empty string, absent values add 0.
pub fn aggregate(
    records: &[TransactionRecord],
    group_fields: &[GroupField],
    value_field: ValueField,
) -> Vec<AggregateRow> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut rows: Vec<AggregateRow> = Vec::new();

    for record in records {
        let key = GroupKey::new(
            group_fields
                .iter()
                .map(|field| record.field(*field).into_owned())
                .collect(),
        );
        let value = record.value(value_field);

        match index.get(&key) {
            Some(&pos) => {
                let row = &mut rows[pos];
                row.total = row.total.saturating_add(value);
                row.source_count += 1;
            }
            None => {
                index.insert(key.clone(), rows.len());
                rows.push(AggregateRow {
                    key,
                    total: value,
                    source_count: 1,
                });
            }
        }
    }

    rows
}

/// Highest total first; equal totals ordered by key ascending
pub fn rank_descending(mut rows: Vec<AggregateRow>) -> Vec<AggregateRow> {
    rows.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.key.cmp(&b.key))
    });
    rows
}

/// Sum of `value_field` over all records
pub fn grand_total(records: &[TransactionRecord], value_field: ValueField) -> i64 {
    records
        .iter()
        .fold(0i64, |acc, r| acc.saturating_add(r.value(value_field)))
}

/// Distinct non-empty values of `field`, first-seen order
pub fn distinct_values(records: &[TransactionRecord], field: GroupField) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    records
        .iter()
        .map(|r| r.field(field).into_owned())
        .filter(|v| !v.is_empty() && seen.insert(v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn returns() -> Vec<TransactionRecord> {
        vec![
            TransactionRecord::return_master("A", "C1", 3, d(1), "u1"),
            TransactionRecord::return_master("A", "C2", 5, d(1), "u1"),
            TransactionRecord::return_master("B", "C1", 2, d(2), "u2"),
        ]
    }

    #[test]
    fn test_group_by_company() {
        let rows = aggregate(&returns(), &[GroupField::Company], ValueField::NoReturn);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key.values(), ["A".to_string()]);
        assert_eq!(rows[0].total, 8);
        assert_eq!(rows[0].source_count, 2);
        assert_eq!(rows[1].key.values(), ["B".to_string()]);
        assert_eq!(rows[1].total, 2);
    }

    #[test]
    fn test_totals_and_counts_are_preserved() {
        let records = returns();
        for fields in [
            vec![GroupField::Company],
            vec![GroupField::Company, GroupField::Courier],
            vec![GroupField::Company, GroupField::Courier, GroupField::Date],
        ] {
            let rows = aggregate(&records, &fields, ValueField::NoReturn);
            let total: i64 = rows.iter().map(|r| r.total).sum();
            let count: usize = rows.iter().map(|r| r.source_count).sum();
            assert_eq!(total, grand_total(&records, ValueField::NoReturn));
            assert_eq!(count, records.len());
        }
    }

    #[test]
    fn test_wrong_value_field_sums_to_zero() {
        let rows = aggregate(&returns(), &[GroupField::Company], ValueField::Quantity);
        assert!(rows.iter().all(|r| r.total == 0));
    }

    #[test]
    fn test_malformed_quantity_contributes_zero() {
        let json = r#"[
            {"company":"A","design":"D1","quantity":"abc","date":"2024-01-01"},
            {"company":"A","design":"D1","quantity":"4","date":"2024-01-01"}
        ]"#;
        let records: Vec<TransactionRecord> = serde_json::from_str(json).unwrap();
        let rows = aggregate(&records, &[GroupField::Company], ValueField::Quantity);
        assert_eq!(rows[0].total, 4);
        assert_eq!(rows[0].source_count, 2);
    }

    #[test]
    fn test_missing_field_groups_as_empty() {
        let records = vec![
            TransactionRecord::billing("A", "X", "D1", 1, d(1), "u1"),
            TransactionRecord::return_master("A", "C1", 0, d(1), "u1"),
        ];
        let rows = aggregate(&records, &[GroupField::Courier], ValueField::Quantity);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key.get(0), "");
    }

    #[test]
    fn test_rank_descending_breaks_ties_by_key() {
        let records = vec![
            TransactionRecord::billing("A", "X", "Zeta", 5, d(1), "u1"),
            TransactionRecord::billing("A", "X", "Alpha", 5, d(1), "u1"),
            TransactionRecord::billing("A", "X", "Mid", 9, d(1), "u1"),
        ];
        let ranked = rank_descending(aggregate(&records, &[GroupField::Design], ValueField::Quantity));
        let order: Vec<_> = ranked.iter().map(|r| r.key.get(0).to_string()).collect();
        assert_eq!(order, vec!["Mid", "Alpha", "Zeta"]);
    }

    #[test]
    fn test_separator_inside_value_keeps_keys_apart() {
        let records = vec![
            TransactionRecord::return_master("A|B", "C", 3, d(1), "u1"),
            TransactionRecord::return_master("A", "B|C", 5, d(1), "u1"),
        ];
        let rows = aggregate(&records, &[GroupField::Company, GroupField::Courier], ValueField::NoReturn);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key.values(), ["A|B".to_string(), "C".to_string()]);
        assert_eq!(rows[0].total, 3);
        assert_eq!(rows[1].key.values(), ["A".to_string(), "B|C".to_string()]);
        assert_eq!(rows[1].total, 5);
    }

    #[test]
    fn test_out_of_range_count_contributes_zero() {
        let json = r#"[
            {"company":"A","quantity":"1e30","date":"2024-01-01"},
            {"company":"A","quantity":1,"date":"2024-01-01"}
        ]"#;
        let records: Vec<TransactionRecord> = serde_json::from_str(json).unwrap();
        let rows = aggregate(&records, &[GroupField::Company], ValueField::Quantity);
        assert_eq!(rows[0].total, 1);
        assert_eq!(rows[0].source_count, 2);
    }

    #[test]
    fn test_huge_values_saturate() {
        let records = vec![
            TransactionRecord::billing("A", "X", "D1", i64::MAX, d(1), "u1"),
            TransactionRecord::billing("A", "X", "D1", 1, d(1), "u1"),
        ];
        let rows = aggregate(&records, &[GroupField::Company], ValueField::Quantity);
        assert_eq!(rows[0].total, i64::MAX);
        assert_eq!(rows[0].source_count, 2);
        assert_eq!(grand_total(&records, ValueField::Quantity), i64::MAX);
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate(&[], &[GroupField::Company], ValueField::Quantity).is_empty());
        assert_eq!(grand_total(&[], ValueField::Quantity), 0);
    }

    #[test]
    fn test_distinct_values() {
        let values = distinct_values(&returns(), GroupField::Courier);
        assert_eq!(values, vec!["C1", "C2"]);
    }
}
