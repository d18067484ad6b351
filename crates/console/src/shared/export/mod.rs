//! Report Exporters
//!
//! Both exporters are pure: they take finished report sections or message
//! lines and return bytes/text. Writing files and opening share targets is
//! left to the caller.

pub mod message;
pub mod naming;
pub mod pdf;

pub use message::{export_message, share_url, EMPTY_MESSAGE};
pub use pdf::{export_document, plan_layout, LayoutPlan, Placement};

use std::path::{Path, PathBuf};

use super::error::{ConsoleError, ConsoleResult};

/// Write `bytes` as `file_name` under `dir`, creating the directory
pub fn write_report(dir: &Path, file_name: &str, bytes: &[u8]) -> ConsoleResult<PathBuf> {
    std::fs::create_dir_all(dir)
        .map_err(|e| ConsoleError::Export(format!("cannot create {}: {}", dir.display(), e)))?;
    let path = dir.join(file_name);
    std::fs::write(&path, bytes)
        .map_err(|e| ConsoleError::Export(format!("cannot write {}: {}", path.display(), e)))?;
    tracing::info!("Report saved: {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}
