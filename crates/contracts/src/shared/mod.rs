pub mod lenient;
pub mod record;
pub mod report;
