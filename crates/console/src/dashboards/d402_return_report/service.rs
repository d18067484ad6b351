use contracts::dashboards::d402_return_report::{ReturnGroup, ReturnReportKind, ReturnReportRequest};
use contracts::shared::record::{GroupField, TransactionRecord};
use contracts::shared::report::{AggregateRow, ReportRow, ReportSection};

use crate::domain::{a007_return_master, a008_return_detailed_entry};
use crate::shared::aggregation::aggregate;
use crate::shared::error::ConsoleResult;
use crate::shared::export::{export_document, export_message, naming, share_url};
use crate::shared::gateway::Gateway;
use crate::shared::query::RecordFilter;

/// Rows of the chosen return table matching company/courier/date
pub async fn fetch_entries(
    gateway: &Gateway,
    request: &ReturnReportRequest,
) -> ConsoleResult<Vec<TransactionRecord>> {
    let filter = RecordFilter::from_options(
        request.date,
        request.company.as_deref(),
        None,
        request.courier.as_deref(),
        None,
    );
    let rows = match request.kind {
        ReturnReportKind::ReturnMaster => a007_return_master::service::list(gateway, &filter).await?,
        ReturnReportKind::ReturnDetailedEntry => {
            a008_return_detailed_entry::service::list(gateway, &filter).await?
        }
    };
    tracing::info!("{}: {} entries", request.kind.title(), rows.len());
    Ok(rows)
}

/// Entries bucketed by `company | courier | date`, first-seen order
pub fn group_entries(entries: &[TransactionRecord]) -> Vec<ReturnGroup> {
    let mut groups: Vec<ReturnGroup> = Vec::new();
    for entry in entries {
        let label = format!(
            "{} | {} | {}",
            entry.company,
            entry.courier.as_deref().unwrap_or_default(),
            entry.date.format("%Y-%m-%d")
        );
        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.items.push(entry.clone()),
            None => groups.push(ReturnGroup {
                label,
                items: vec![entry.clone()],
            }),
        }
    }
    groups
}

fn cells(kind: ReturnReportKind, entry: &TransactionRecord) -> Vec<String> {
    let value = entry.value(kind.value_field()).to_string();
    match kind {
        ReturnReportKind::ReturnMaster => vec![entry.user_id.clone(), value],
        ReturnReportKind::ReturnDetailedEntry => vec![
            entry.user_id.clone(),
            entry.design.clone().unwrap_or_default(),
            value,
        ],
    }
}

/// One table per group under the group label
pub fn build_sections(kind: ReturnReportKind, groups: &[ReturnGroup]) -> Vec<ReportSection> {
    groups
        .iter()
        .map(|group| {
            let rows = group
                .items
                .iter()
                .map(|entry| ReportRow::plain(cells(kind, entry)))
                .collect();
            ReportSection::new(group.label.as_str(), kind.columns()).with_rows(rows)
        })
        .collect()
}

pub fn export_pdf(kind: ReturnReportKind, groups: &[ReturnGroup]) -> ConsoleResult<(String, Vec<u8>)> {
    let file_name = naming::titled_file_name(kind.title());
    let bytes = export_document(kind.title(), &build_sections(kind, groups))?;
    Ok((file_name, bytes))
}

/// Lines of the share digest: a blank line and the label per group, then
/// one bullet per entry
pub fn message_lines(kind: ReturnReportKind, groups: &[ReturnGroup]) -> Vec<String> {
    let mut lines = Vec::new();
    for group in groups {
        lines.push(format!("\n{}:", group.label));
        for entry in &group.items {
            let value = entry.value(kind.value_field());
            lines.push(match kind {
                ReturnReportKind::ReturnMaster => {
                    format!("  • User: {}, No. Return: {}", entry.user_id, value)
                }
                ReturnReportKind::ReturnDetailedEntry => format!(
                    "  • User: {}, Design: {}, Qty: {}",
                    entry.user_id,
                    entry.design.as_deref().unwrap_or_default(),
                    value
                ),
            });
        }
    }
    lines
}

/// Share digest and the pre-filled link for `target`
pub fn share(kind: ReturnReportKind, groups: &[ReturnGroup], target: &str) -> (String, String) {
    let message = export_message(kind.title(), &message_lines(kind, groups));
    let url = share_url(target, &message);
    (message, url)
}

/// Totals per company and per company + courier
pub fn totals(kind: ReturnReportKind, entries: &[TransactionRecord]) -> (Vec<AggregateRow>, Vec<AggregateRow>) {
    let field = kind.value_field();
    (
        aggregate(entries, &[GroupField::Company], field),
        aggregate(entries, &[GroupField::Company, GroupField::Courier], field),
    )
}

pub fn totals_sections(kind: ReturnReportKind, entries: &[TransactionRecord]) -> Vec<ReportSection> {
    let (by_company, by_courier) = totals(kind, entries);
    let to_rows = |rows: Vec<AggregateRow>| -> Vec<ReportRow> {
        rows.into_iter()
            .map(|row| {
                let mut cells: Vec<String> = row.key.values().to_vec();
                cells.push(row.total.to_string());
                ReportRow::plain(cells)
            })
            .collect()
    };
    vec![
        ReportSection::new("Totals by Company", &["Company", "Total"]).with_rows(to_rows(by_company)),
        ReportSection::new("Totals by Company + Courier", &["Company", "Courier", "Total"])
            .with_rows(to_rows(by_courier)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::gateway::test_server;
    use axum::{routing::get, Json, Router};
    use chrono::NaiveDate;
    use serde_json::json;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn masters() -> Vec<TransactionRecord> {
        vec![
            TransactionRecord::return_master("A", "C1", 3, d(1), "u1"),
            TransactionRecord::return_master("A", "C2", 5, d(1), "u1"),
            TransactionRecord::return_master("B", "C1", 2, d(1), "u2"),
            TransactionRecord::return_master("A", "C1", 1, d(1), "u3"),
        ]
    }

    #[test]
    fn test_grouping_labels() {
        let groups = group_entries(&masters());
        let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["A | C1 | 2024-01-01", "A | C2 | 2024-01-01", "B | C1 | 2024-01-01"]);
        assert_eq!(groups[0].items.len(), 2);
    }

    #[test]
    fn test_master_message() {
        let groups = group_entries(&masters()[..1]);
        let (message, url) = share(ReturnReportKind::ReturnMaster, &groups, "https://wa.me/");
        assert_eq!(
            message,
            "Return Received\n\nA | C1 | 2024-01-01:\n  • User: u1, No. Return: 3"
        );
        assert!(url.starts_with("https://wa.me/?text=Return%20Received%0A%0AA%20%7C%20C1"));
    }

    #[test]
    fn test_detailed_message_and_empty() {
        let entries = vec![TransactionRecord::return_detailed("A", "C1", "D9", 4, d(2), "u1")];
        let lines = message_lines(ReturnReportKind::ReturnDetailedEntry, &group_entries(&entries));
        assert_eq!(lines[1], "  • User: u1, Design: D9, Qty: 4");

        let (message, _) = share(ReturnReportKind::ReturnDetailedEntry, &[], "https://wa.me/");
        assert_eq!(message, "No data to share");
    }

    #[test]
    fn test_totals() {
        let (by_company, by_courier) = totals(ReturnReportKind::ReturnMaster, &masters());
        assert_eq!(by_company[0].total, 9);
        assert_eq!(by_company[1].total, 2);
        assert_eq!(by_courier.len(), 3);
        assert_eq!(by_courier[0].total, 4);

        let sections = totals_sections(ReturnReportKind::ReturnMaster, &masters());
        assert_eq!(sections[1].rows[0].cells, vec!["A", "C1", "4"]);
    }

    #[test]
    fn test_pdf_sections() {
        let groups = group_entries(&masters());
        let sections = build_sections(ReturnReportKind::ReturnMaster, &groups);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections[0].columns, vec!["User ID", "No. Return"]);
        assert_eq!(sections[0].rows[1].cells, vec!["u3", "1"]);

        let (name, bytes) = export_pdf(ReturnReportKind::ReturnMaster, &groups).unwrap();
        assert_eq!(name, "Return_Received.pdf");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_fetch_filters_locally() {
        let router = Router::new().route(
            "/api/data/return-detailed-entry",
            get(|| async {
                Json(json!([
                    {"company": "A", "courier": "C1", "design": "D1", "quantity": 2, "date": "2024-01-01", "user_id": 1},
                    {"company": "A", "courier": "C2", "design": "D1", "quantity": 2, "date": "2024-01-02", "user_id": 1}
                ]))
            }),
        );
        let gateway = test_server::spawn(router).await;
        let request = ReturnReportRequest {
            kind: ReturnReportKind::ReturnDetailedEntry,
            company: Some("A".into()),
            courier: None,
            date: Some(d(2)),
        };
        let rows = fetch_entries(&gateway, &request).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].courier.as_deref(), Some("C2"));
    }
}
