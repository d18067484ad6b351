//! Common types and traits for all masters and records

pub mod master;
pub mod responses;

// Re-exports
pub use master::MasterRecord;
pub use responses::{CreatedResponse, ErrorBody};
