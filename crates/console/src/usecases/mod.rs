pub mod u501_import_billing_sheet;
