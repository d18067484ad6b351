use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::shared::error::{ConsoleError, ConsoleResult};

/// Sheet formats the billing upload accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    /// `.xlsx`, `.xlsm`, `.xls`, `.ods`; read with calamine
    Workbook,
}

impl SheetFormat {
    /// Picked by file extension; anything unknown is read as CSV
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => SheetFormat::Workbook,
            _ => SheetFormat::Csv,
        }
    }
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

/// First worksheet of the workbook at `path` as rows of cell text.
///
/// Gaps inside the used range come back as empty strings, so blank rows
/// survive and can be skipped by the parser.
pub fn read_grid(path: &Path) -> ConsoleResult<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| ConsoleError::Import(format!("{}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ConsoleError::Import(format!("{}: workbook has no sheets", path.display())))?
        .map_err(|e| ConsoleError::Import(format!("{}: {}", path.display(), e)))?;

    let grid: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect();
    tracing::debug!("Read {} rows from {}", grid.len(), path.display());
    Ok(grid)
}
