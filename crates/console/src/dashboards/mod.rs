pub mod d400_billing_summary;
pub mod d401_sales_trend;
pub mod d402_return_report;
