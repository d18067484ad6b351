use crate::shared::record::TransactionRecord;

/// Count of parcels returned by a courier for a company on a date
/// (`no_return` populated)
pub type ReturnMasterEntry = TransactionRecord;
