pub mod row_parser;
pub mod workbook_reader;

pub use row_parser::{ParseReport, ParsedWorkbook, RowParser};
pub use workbook_reader::{SourceFormat, WorkbookReader};
