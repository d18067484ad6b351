use crate::shared::record::TransactionRecord;

/// Returned goods itemised by design (`quantity` populated)
pub type ReturnDetailedEntry = TransactionRecord;
