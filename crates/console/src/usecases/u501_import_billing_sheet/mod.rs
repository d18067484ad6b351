pub mod executor;
pub mod parser;
pub mod workbook;

pub use executor::ImportExecutor;
pub use parser::{parse_csv, parse_grid};
pub use workbook::{read_grid, SheetFormat};
