use chrono::NaiveDate;
use contracts::shared::report::DateRange;

/// `<company>_<YYYY-MM-DD>.pdf`, `AllCompanies` when no company is picked
pub fn billing_file_name(company: Option<&str>, date: NaiveDate) -> String {
    let company = company
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or("AllCompanies");
    format!("{}_{}.pdf", sanitize(company), date.format("%Y-%m-%d"))
}

/// Report title with whitespace replaced by `_`, e.g. `Return_Received.pdf`
pub fn titled_file_name(title: &str) -> String {
    let name: String = title
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
    format!("{}.pdf", sanitize(&name))
}

/// `sales_report_<YYYYMMDD>-<YYYYMMDD>.pdf`
pub fn sales_report_file_name(range: &DateRange) -> String {
    format!(
        "sales_report_{}-{}.pdf",
        range.from.format("%Y%m%d"),
        range.to.format("%Y%m%d")
    )
}

/// Path separators cannot appear in a file name
fn sanitize(name: &str) -> String {
    name.replace(['/', '\\'], "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_billing_file_name() {
        assert_eq!(billing_file_name(Some("Acme"), d(2024, 1, 5)), "Acme_2024-01-05.pdf");
        assert_eq!(billing_file_name(None, d(2024, 1, 5)), "AllCompanies_2024-01-05.pdf");
        assert_eq!(billing_file_name(Some(" "), d(2024, 1, 5)), "AllCompanies_2024-01-05.pdf");
        assert_eq!(billing_file_name(Some("A/B"), d(2024, 1, 5)), "A-B_2024-01-05.pdf");
    }

    #[test]
    fn test_titled_file_name() {
        assert_eq!(titled_file_name("Goods Return Report"), "Goods_Return_Report.pdf");
    }

    #[test]
    fn test_sales_report_file_name() {
        let range = DateRange::new(d(2024, 1, 1), d(2024, 1, 7)).unwrap();
        assert_eq!(sales_report_file_name(&range), "sales_report_20240101-20240107.pdf");
    }
}
