use chrono::NaiveDate;
use contracts::shared::report::{DateRange, ReportSection};

/// Date as shown to users: DD-MM-YYYY
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use console::shared::format::display_date;
/// let d = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
/// assert_eq!(display_date(d), "09-03-2024");
/// ```
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// "Date Range: YYYY/MM/DD - YYYY/MM/DD"
pub fn range_label(range: &DateRange) -> String {
    format!(
        "Date Range: {} - {}",
        range.from.format("%Y/%m/%d"),
        range.to.format("%Y/%m/%d")
    )
}

/// Parse a date typed by the user: `YYYY-MM-DD` or `DD-MM-YYYY`
pub fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d-%m-%Y"))
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", value))
}

/// Plain-text table for the terminal; columns padded to the widest cell
pub fn render_table(section: &ReportSection) -> String {
    let mut out = String::new();
    if !section.heading.is_empty() {
        out.push_str(&section.heading);
        out.push('\n');
    }

    if !section.columns.is_empty() {
        let mut widths: Vec<usize> = section.columns.iter().map(|c| c.chars().count()).collect();
        for row in &section.rows {
            for (idx, cell) in row.cells.iter().enumerate().take(widths.len()) {
                widths[idx] = widths[idx].max(cell.chars().count());
            }
        }

        let line = |cells: &[String]| -> String {
            widths
                .iter()
                .enumerate()
                .map(|(idx, w)| {
                    let cell = cells.get(idx).map(String::as_str).unwrap_or_default();
                    format!("{:<width$}", cell, width = *w)
                })
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        out.push_str(&line(section.columns.as_slice()));
        out.push('\n');
        out.push_str(
            &widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        out.push('\n');
        for row in &section.rows {
            let text = line(row.cells.as_slice());
            if row.emphasis {
                out.push_str(&format!("{}  *", text));
            } else {
                out.push_str(&text);
            }
            out.push('\n');
        }
    }

    for note in &section.notes {
        out.push_str(note);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::report::ReportRow;

    #[test]
    fn test_parse_date_arg() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(parse_date_arg("2024-01-31"), Ok(expected));
        assert_eq!(parse_date_arg("31-01-2024"), Ok(expected));
        assert!(parse_date_arg("2024-02-30").is_err());
    }

    #[test]
    fn test_range_label() {
        let range = DateRange::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
        )
        .unwrap();
        assert_eq!(range_label(&range), "Date Range: 2024/01/01 - 2024/01/07");
    }

    #[test]
    fn test_render_table() {
        let section = ReportSection::new("Portal: X", &["Design", "Quantity"])
            .with_rows(vec![
                ReportRow::plain(vec!["Long design".into(), "5".into()]),
                ReportRow::emphasized(vec!["Total".into(), "5".into()]),
            ])
            .with_note("Total Quantity: 5");
        let text = render_table(&section);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Portal: X");
        assert_eq!(lines[1], "Design      | Quantity");
        assert_eq!(lines[2], "------------+---------");
        assert_eq!(lines[3], "Long design | 5");
        assert_eq!(lines[4], "Total       | 5  *");
        assert_eq!(lines[5], "Total Quantity: 5");
    }
}
