use chrono::{Days, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered tuple of grouping values. Absent fields are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupKey(pub Vec<String>);

impl GroupKey {
    pub fn new(values: Vec<String>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[String] {
        &self.0
    }

    /// Value at position `idx`, empty when out of range
    pub fn get(&self, idx: usize) -> &str {
        self.0.get(idx).map(String::as_str).unwrap_or_default()
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" | "))
    }
}

/// One bucket of the aggregation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub key: GroupKey,
    pub total: i64,
    pub source_count: usize,
}

/// Inclusive calendar range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, String> {
        if from > to {
            return Err(format!(
                "Invalid date range: {} is after {}",
                from.format("%Y-%m-%d"),
                to.format("%Y-%m-%d")
            ));
        }
        Ok(Self { from, to })
    }

    /// Last `days` days ending at `to` (the trend screen defaults to 7)
    pub fn ending_at(to: NaiveDate, days: u32) -> Result<Self, String> {
        let span = u64::from(days.max(1)) - 1;
        let from = to.checked_sub_days(Days::new(span)).ok_or_else(|| {
            format!(
                "Invalid date range: {} days before {} is out of range",
                days,
                to.format("%Y-%m-%d")
            )
        })?;
        Ok(Self { from, to })
    }

    /// Number of calendar days in the range
    pub fn len_days(&self) -> usize {
        ((self.to - self.from).num_days() + 1) as usize
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from && date <= self.to
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let from = self.from;
        (0..self.len_days() as i64).map(move |offset| from + Duration::days(offset))
    }
}

/// One day of a trend series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub total: i64,
}

/// Row of a nested primary/secondary breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownRow {
    pub primary: String,
    pub secondary: String,
    pub total: i64,
    pub is_subtotal: bool,
}

impl BreakdownRow {
    pub fn subtotal(primary: &str, total: i64) -> Self {
        Self {
            primary: format!("{} Subtotal", primary),
            secondary: String::new(),
            total,
            is_subtotal: true,
        }
    }
}

/// Table row handed to exporters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRow {
    pub cells: Vec<String>,
    /// Subtotal rows are drawn bold on a shaded background
    #[serde(default)]
    pub emphasis: bool,
}

impl ReportRow {
    pub fn plain(cells: Vec<String>) -> Self {
        Self {
            cells,
            emphasis: false,
        }
    }

    pub fn emphasized(cells: Vec<String>) -> Self {
        Self {
            cells,
            emphasis: true,
        }
    }
}

/// Heading + table + trailing notes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSection {
    pub heading: String,
    pub columns: Vec<String>,
    pub rows: Vec<ReportRow>,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl ReportSection {
    pub fn new(heading: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            heading: heading.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_rows(mut self, rows: Vec<ReportRow>) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}
