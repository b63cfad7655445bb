use crate::error::ParseError;
use crate::models::{Cell, Row, Sheet, Workbook};
use crate::utils::constants::{CSV_EXTENSION, SPREADSHEET_EXTENSIONS};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use encoding_rs::{UTF_8, WINDOWS_1252};
use std::borrow::Cow;
use std::io::Cursor;
use std::path::Path;

type ReadResult<T> = std::result::Result<T, ParseError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// xlsx, xlsm, xlsb, xls or ods; the container type is sniffed from the bytes
    Spreadsheet,
    /// A single sheet named after the file stem
    Csv,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> ReadResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
            Ok(SourceFormat::Spreadsheet)
        } else if extension == CSV_EXTENSION {
            Ok(SourceFormat::Csv)
        } else {
            Err(ParseError::UnsupportedFormat(path.display().to_string()))
        }
    }
}

/// Reads uploaded files into the loosely typed [`Workbook`] model.
///
/// The first row of every sheet is its header row. Any structural failure
/// rejects the whole file; a partially read workbook is never returned.
pub struct WorkbookReader;

impl WorkbookReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_path(&self, path: &Path) -> ReadResult<Workbook> {
        let format = SourceFormat::from_path(path)?;
        let bytes = std::fs::read(path)?;
        self.read_bytes(&bytes, format, &file_stem(path))
    }

    /// `name` is only used for CSV input, where it becomes the sheet name
    pub fn read_bytes(&self, bytes: &[u8], format: SourceFormat, name: &str) -> ReadResult<Workbook> {
        match format {
            SourceFormat::Spreadsheet => self.read_spreadsheet(bytes),
            SourceFormat::Csv => self.read_csv(bytes, name),
        }
    }

    fn read_spreadsheet(&self, bytes: &[u8]) -> ReadResult<Workbook> {
        let mut source = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
        let mut sheets = Vec::new();

        for name in source.sheet_names() {
            let range = source.worksheet_range(&name)?;
            let rows = rows_from_range(&range);
            tracing::debug!(sheet = %name, rows = rows.len(), "read worksheet");
            sheets.push(Sheet::new(name, rows));
        }

        let workbook = Workbook::new(sheets);
        tracing::debug!(
            sheets = ?workbook.sheet_names().collect::<Vec<_>>(),
            rows = workbook.total_rows(),
            "read workbook"
        );
        Ok(workbook)
    }

    fn read_csv(&self, bytes: &[u8], name: &str) -> ReadResult<Workbook> {
        let text = decode_text(bytes);
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = reader.headers()?.clone();
        let mut rows = Vec::new();

        for result in reader.records() {
            let record = result?;
            let mut row = Row::new();
            for (header, value) in headers.iter().zip(record.iter()) {
                if !header.is_empty() && !value.is_empty() {
                    row.insert(header, value);
                }
            }
            if !row.is_empty() {
                rows.push(row);
            }
        }

        tracing::debug!(sheet = %name, rows = rows.len(), "read CSV sheet");
        Ok(Workbook::new(vec![Sheet::new(name, rows)]))
    }
}

impl Default for WorkbookReader {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn rows_from_range(range: &Range<Data>) -> Vec<Row> {
    let mut raw_rows = range.rows();
    let headers: Vec<Option<String>> = match raw_rows.next() {
        Some(header_row) => header_row.iter().map(|data| cell_from_data(data).as_text()).collect(),
        None => return Vec::new(),
    };

    raw_rows
        .map(|raw| {
            let mut row = Row::new();
            for (header, data) in headers.iter().zip(raw.iter()) {
                if let Some(header) = header {
                    row.insert(header.as_str(), cell_from_data(data));
                }
            }
            row
        })
        .filter(|row| !row.is_empty())
        .collect()
}

fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::Int(*i),
        Data::Float(f) => Cell::Float(*f),
        Data::String(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Bool(*b),
        // Excel dates surface as their serial number
        Data::DateTime(dt) => Cell::Float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) | Data::Empty => Cell::Empty,
    }
}

/// UTF-8 (BOM honoured), falling back to Windows-1252 for legacy exports
fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (text, _, had_errors) = UTF_8.decode(bytes);
    if !had_errors {
        return text;
    }
    tracing::debug!("CSV is not valid UTF-8, decoding as Windows-1252");
    let (text, _, _) = WINDOWS_1252.decode(bytes);
    text
}
