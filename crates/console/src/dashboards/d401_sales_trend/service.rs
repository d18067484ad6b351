use contracts::dashboards::d401_sales_trend::{SalesTrendRequest, SalesTrendResponse};
use contracts::domain::a006_billing::BillingEntry;
use contracts::shared::record::{GroupField, ValueField};
use contracts::shared::report::{ReportRow, ReportSection};

use crate::domain::a006_billing::service as billing;
use crate::shared::aggregation::{aggregate, date_trend, distinct_values, nested_subtotals, rank_descending};
use crate::shared::error::ConsoleResult;
use crate::shared::export::{export_document, naming};
use crate::shared::format::range_label;
use crate::shared::gateway::Gateway;
use crate::shared::query::{RecordFilter, ServerFilters};

pub const REPORT_TITLE: &str = "Sales Summary";

/// Fetch the dashboard rows for the range and build the trend
pub async fn get_sales_trend(
    gateway: &Gateway,
    request: &SalesTrendRequest,
) -> ConsoleResult<SalesTrendResponse> {
    let rows = billing::dashboard(gateway, &request.range).await?;
    tracing::info!(
        "Sales trend {} .. {}: {} rows",
        request.range.from,
        request.range.to,
        rows.len()
    );
    Ok(build_response(&rows, request))
}

/// Pure part of [`get_sales_trend`]: picker lists come from all rows, every
/// figure from the rows matching the design/company filter
pub fn build_response(rows: &[BillingEntry], request: &SalesTrendRequest) -> SalesTrendResponse {
    let designs = distinct_values(rows, GroupField::Design);
    let companies = distinct_values(rows, GroupField::Company);

    let filter = RecordFilter::from_options(
        None,
        request.company.as_deref(),
        None,
        None,
        request.design.as_deref(),
    );
    let (_, local) = filter.split(ServerFilters::NONE);
    let filtered: Vec<BillingEntry> = rows.iter().filter(|r| local.matches(r)).cloned().collect();

    SalesTrendResponse {
        points: date_trend(&filtered, &request.range, ValueField::Quantity),
        by_design: rank_descending(aggregate(&filtered, &[GroupField::Design], ValueField::Quantity)),
        breakdown: nested_subtotals(&filtered, GroupField::Design, GroupField::Company, ValueField::Quantity),
        designs,
        companies,
    }
}

/// Legend of the trend series
pub fn series_label(request: &SalesTrendRequest) -> String {
    match request.design.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(design) => format!("Design {}", design),
        None => "Total Quantity".to_string(),
    }
}

pub fn build_sections(request: &SalesTrendRequest, response: &SalesTrendResponse) -> Vec<ReportSection> {
    let by_design = response
        .by_design
        .iter()
        .map(|row| ReportRow::plain(vec![row.key.get(0).to_string(), row.total.to_string()]))
        .collect();

    let breakdown = response
        .breakdown
        .iter()
        .map(|row| {
            let cells = vec![row.primary.clone(), row.secondary.clone(), row.total.to_string()];
            if row.is_subtotal {
                ReportRow::emphasized(cells)
            } else {
                ReportRow::plain(cells)
            }
        })
        .collect();

    vec![
        ReportSection::new("", &[]).with_note(range_label(&request.range)),
        ReportSection::new("1. Summary by Design", &["Design", "Total Quantity"]).with_rows(by_design),
        ReportSection::new(
            "2. Summary by Design + Company Breakdown",
            &["Design", "Company", "Quantity"],
        )
        .with_rows(breakdown),
    ]
}

pub fn export_pdf(
    request: &SalesTrendRequest,
    response: &SalesTrendResponse,
) -> ConsoleResult<(String, Vec<u8>)> {
    let file_name = naming::sales_report_file_name(&request.range);
    let bytes = export_document(REPORT_TITLE, &build_sections(request, response))?;
    Ok((file_name, bytes))
}
