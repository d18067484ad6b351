use contracts::domain::a006_billing::BillingEntry;
use contracts::shared::lenient::parse_count;
use contracts::usecases::u501_import_billing_sheet::ImportContext;

use crate::shared::error::{ConsoleError, ConsoleResult};

const DESIGN_COLUMN: &str = "Design";
const QUANTITY_COLUMN: &str = "Quantity";

/// Positions of the Design / Quantity columns in the sheet header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    design: Option<usize>,
    quantity: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &[&str]) -> ConsoleResult<Self> {
        let map = Self {
            design: find_column(headers, DESIGN_COLUMN),
            quantity: find_column(headers, QUANTITY_COLUMN),
        };
        if map.design.is_none() && map.quantity.is_none() {
            return Err(ConsoleError::Import(
                "sheet has neither a Design nor a Quantity column".to_string(),
            ));
        }
        Ok(map)
    }
}

/// Exact case-insensitive match first, then the first header containing `name`
fn find_column(headers: &[&str], name: &str) -> Option<usize> {
    let wanted = name.to_lowercase();
    headers
        .iter()
        .position(|h| h.trim().to_lowercase() == wanted)
        .or_else(|| headers.iter().position(|h| h.to_lowercase().contains(&wanted)))
}

fn cell(cells: &[&str], idx: Option<usize>) -> String {
    idx.and_then(|i| cells.get(i))
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

fn to_record(cells: &[&str], columns: ColumnMap, context: &ImportContext) -> Option<BillingEntry> {
    if cells.iter().all(|c| c.trim().is_empty()) {
        return None;
    }
    Some(BillingEntry::billing(
        context.company.trim(),
        context.portal.trim(),
        cell(cells, columns.design),
        parse_count(&cell(cells, columns.quantity)),
        context.date,
        context.user_id.as_str(),
    ))
}

/// Read billing rows from CSV text with a header row.
///
/// Blank rows are skipped, a malformed record aborts the import.
pub fn parse_csv(text: &str, context: &ImportContext) -> ConsoleResult<Vec<BillingEntry>> {
    context.validate().map_err(ConsoleError::Validation)?;

    // Strip UTF-8 BOM if present
    let text = text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| ConsoleError::Import(format!("Failed to read CSV headers: {}", e)))?
        .clone();
    let header_cells: Vec<&str> = headers.iter().collect();
    tracing::debug!("Billing sheet headers: {:?}", header_cells);
    let columns = ColumnMap::from_headers(&header_cells)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row = result.map_err(|e| ConsoleError::Import(format!("Row {}: {}", idx + 1, e)))?;
        let cells: Vec<&str> = row.iter().collect();
        records.extend(to_record(&cells, columns, context));
    }

    tracing::info!("Parsed {} billing rows from sheet", records.len());
    Ok(records)
}

/// Same as [`parse_csv`] for a grid already split into cells; the first row
/// is the header
pub fn parse_grid(grid: &[Vec<String>], context: &ImportContext) -> ConsoleResult<Vec<BillingEntry>> {
    context.validate().map_err(ConsoleError::Validation)?;

    let Some((header, body)) = grid.split_first() else {
        return Ok(Vec::new());
    };
    let header_cells: Vec<&str> = header.iter().map(String::as_str).collect();
    let columns = ColumnMap::from_headers(&header_cells)?;

    Ok(body
        .iter()
        .filter_map(|row| {
            let cells: Vec<&str> = row.iter().map(String::as_str).collect();
            to_record(&cells, columns, context)
        })
        .collect())
}
