pub mod a001_company;
pub mod a002_courier;
pub mod a003_design;
pub mod a004_portal;
pub mod a005_portal_login;
pub mod a006_billing;
pub mod a007_return_master;
pub mod a008_return_detailed_entry;
pub mod a009_bill_status;
pub mod common;
