use chrono::NaiveDate;
use contracts::dashboards::d400_billing_summary::{BillingSummary, BillingSummaryRequest};
use contracts::shared::report::{ReportRow, ReportSection};

use crate::domain::a006_billing::service as billing;
use crate::shared::aggregation::build_billing_tree;
use crate::shared::error::ConsoleResult;
use crate::shared::export::{export_document, naming};
use crate::shared::gateway::Gateway;
use crate::shared::query::RecordFilter;

/// Company -> portal -> design summary for one day.
///
/// Without a company every company that has bills on the date is fetched.
pub async fn get_billing_summary(
    gateway: &Gateway,
    request: &BillingSummaryRequest,
) -> ConsoleResult<BillingSummary> {
    let companies = match non_empty(request.company.as_deref()) {
        Some(company) => vec![company.to_string()],
        None => billing::companies_for_date(gateway, request.date).await?,
    };

    let mut rows = Vec::new();
    for company in &companies {
        let filter = RecordFilter::default()
            .with_date(request.date)
            .with_company(company.as_str())
            .with_portal(request.portal.clone().unwrap_or_default());
        rows.extend(billing::list(gateway, &filter).await?);
    }

    tracing::info!(
        "Billing summary {}: {} companies, {} rows",
        request.date,
        companies.len(),
        rows.len()
    );
    Ok(build_billing_tree(&rows))
}

pub fn report_title(date: NaiveDate) -> String {
    format!("Billing Summary for {}", date.format("%Y-%m-%d"))
}

/// One heading section per company, one table per portal
pub fn build_sections(summary: &BillingSummary) -> Vec<ReportSection> {
    let mut sections = Vec::new();
    for company in &summary.companies {
        sections.push(ReportSection::new(format!("Company: {}", company.company), &[]));

        for portal in &company.portals {
            let rows = portal
                .designs
                .iter()
                .map(|line| ReportRow::plain(vec![line.design.clone(), line.quantity.to_string()]))
                .collect();
            sections.push(
                ReportSection::new(format!("Portal: {}", portal.portal), &["Design", "Quantity"])
                    .with_rows(rows)
                    .with_note(format!("Total Quantity: {}", portal.total)),
            );
        }
    }
    sections
}

/// File name and PDF bytes
pub fn export_pdf(
    request: &BillingSummaryRequest,
    summary: &BillingSummary,
) -> ConsoleResult<(String, Vec<u8>)> {
    let file_name = naming::billing_file_name(request.company.as_deref(), request.date);
    let bytes = export_document(&report_title(request.date), &build_sections(summary))?;
    Ok((file_name, bytes))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
