use crate::models::{Cell, Row, Sheet, WeatherRecord, Workbook};
use crate::utils::constants::{
    COL_BLOCK, COL_DISTRICT, COL_HUMIDITY, COL_LATITUDE, COL_LONGITUDE, COL_RAIN, COL_STATE,
    COL_TMAX, COL_TMIN, COL_VILLAGE, COL_WIND_SPEED,
};
use crate::utils::dates::{is_forecast_date_label, today_forecast_date};
use std::collections::HashMap;
use validator::Validate;

/// Counters collected while turning a workbook into records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseReport {
    pub sheets: usize,
    /// Sheets whose name was a `YYYYMMDD` date
    pub dated_sheets: usize,
    pub rows_seen: usize,
    /// Rows without a full location or coordinates, dropped silently
    pub rows_skipped: usize,
    /// Repeats of a (location, date) pair; the later row wins
    pub duplicates_replaced: usize,
    /// Ingested, but with non-finite or out-of-range coordinates
    pub coordinates_out_of_range: usize,
    /// Measurement cells holding text that is not a number, read as 0
    pub unparseable_measurements: usize,
}

impl ParseReport {
    pub fn rows_accepted(&self) -> usize {
        self.rows_seen - self.rows_skipped
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParsedWorkbook {
    pub records: Vec<WeatherRecord>,
    pub report: ParseReport,
}

/// Turns a [`Workbook`] into validated [`WeatherRecord`]s.
#[derive(Debug, Clone, Default)]
pub struct RowParser {
    fallback_date: Option<String>,
}

impl RowParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Date used for sheets not named `YYYYMMDD`; today's date when unset
    pub fn with_fallback_date(fallback_date: impl Into<String>) -> Self {
        Self {
            fallback_date: Some(fallback_date.into()),
        }
    }

    pub fn parse(&self, workbook: &Workbook) -> Vec<WeatherRecord> {
        self.parse_with_report(workbook).records
    }

    pub fn parse_with_report(&self, workbook: &Workbook) -> ParsedWorkbook {
        let mut report = ParseReport {
            sheets: workbook.sheets.len(),
            ..ParseReport::default()
        };
        let mut records: Vec<WeatherRecord> = Vec::with_capacity(workbook.total_rows());
        // (state, district, block, village, date) -> position in `records`
        let mut positions: HashMap<[String; 5], usize> = HashMap::new();

        for sheet in &workbook.sheets {
            let forecast_date = self.forecast_date_for(sheet, &mut report);

            for row in &sheet.rows {
                report.rows_seen += 1;

                let Some(record) = parse_row(row, &forecast_date, &mut report) else {
                    report.rows_skipped += 1;
                    continue;
                };

                if !record.is_mappable() || record.validate().is_err() {
                    report.coordinates_out_of_range += 1;
                    tracing::warn!(
                        village = %record.village,
                        latitude = record.latitude,
                        longitude = record.longitude,
                        "record coordinates unusable for mapping"
                    );
                }

                let key = [
                    record.state.clone(),
                    record.district.clone(),
                    record.block.clone(),
                    record.village.clone(),
                    record.forecast_date.clone(),
                ];
                match positions.get(&key) {
                    Some(&index) => {
                        report.duplicates_replaced += 1;
                        tracing::debug!(
                            village = %record.village,
                            date = %record.forecast_date,
                            "duplicate location/date row replaces earlier one"
                        );
                        records[index] = record;
                    }
                    None => {
                        positions.insert(key, records.len());
                        records.push(record);
                    }
                }
            }
        }

        tracing::debug!(
            sheets = report.sheets,
            rows = report.rows_seen,
            skipped = report.rows_skipped,
            duplicates = report.duplicates_replaced,
            "parsed workbook"
        );

        ParsedWorkbook { records, report }
    }

    fn forecast_date_for(&self, sheet: &Sheet, report: &mut ParseReport) -> String {
        if is_forecast_date_label(&sheet.name) {
            report.dated_sheets += 1;
            return sheet.name.clone();
        }

        let fallback = self
            .fallback_date
            .clone()
            .unwrap_or_else(today_forecast_date);
        tracing::debug!(
            sheet = %sheet.name,
            forecast_date = %fallback,
            "sheet name is not a YYYYMMDD date, using fallback"
        );
        fallback
    }
}

/// `None` when the row lacks a location level or a coordinate
fn parse_row(row: &Row, forecast_date: &str, report: &mut ParseReport) -> Option<WeatherRecord> {
    let identifier = |header: &str| {
        let cell = row.get(header);
        if cell.is_truthy() {
            cell.as_text()
        } else {
            None
        }
    };

    let state = identifier(COL_STATE)?;
    let district = identifier(COL_DISTRICT)?;
    let block = identifier(COL_BLOCK)?;
    let village = identifier(COL_VILLAGE)?;

    let latitude = row.get(COL_LATITUDE);
    let longitude = row.get(COL_LONGITUDE);
    if !latitude.is_present() || !longitude.is_present() {
        return None;
    }

    let mut measurement = |header: &str| measurement_value(row.get(header), report);

    Some(WeatherRecord {
        state,
        district,
        block,
        village,
        latitude: latitude.as_number(),
        longitude: longitude.as_number(),
        rain: measurement(COL_RAIN),
        tmax: measurement(COL_TMAX),
        tmin: measurement(COL_TMIN),
        humidity: measurement(COL_HUMIDITY),
        wind_speed: measurement(COL_WIND_SPEED),
        forecast_date: forecast_date.to_string(),
    })
}

fn measurement_value(cell: &Cell, report: &mut ParseReport) -> f64 {
    if !cell.is_truthy() {
        return 0.0;
    }
    let value = cell.as_number();
    if value.is_nan() {
        report.unparseable_measurements += 1;
        0.0
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_row(village: &str, rain: f64) -> Row {
        Row::from_pairs([
            (COL_STATE, Cell::from("Maharashtra")),
            (COL_DISTRICT, Cell::from("Pune")),
            (COL_BLOCK, Cell::from("Haveli")),
            (COL_VILLAGE, Cell::from(village)),
            (COL_LATITUDE, Cell::from(18.58)),
            (COL_LONGITUDE, Cell::from(73.97)),
            (COL_RAIN, Cell::from(rain)),
            (COL_TMAX, Cell::from(31.5)),
            (COL_TMIN, Cell::from(21.0)),
            (COL_HUMIDITY, Cell::from(68_i64)),
            (COL_WIND_SPEED, Cell::from("9.2")),
        ])
    }

    fn parser() -> RowParser {
        RowParser::with_fallback_date("20250115")
    }

    #[test]
    fn test_sheet_name_becomes_forecast_date() {
        let workbook = Workbook::new(vec![
            Sheet::new("20250101", vec![full_row("Wagholi", 1.0)]),
            Sheet::new("Sheet2", vec![full_row("Wagholi", 2.0)]),
        ]);

        let parsed = parser().parse_with_report(&workbook);
        let dates: Vec<&str> = parsed.records.iter().map(|r| r.forecast_date.as_str()).collect();

        assert_eq!(dates, vec!["20250101", "20250115"]);
        assert_eq!(parsed.report.sheets, 2);
        assert_eq!(parsed.report.dated_sheets, 1);
    }

    #[test]
    fn test_fallback_defaults_to_today() {
        let workbook = Workbook::new(vec![Sheet::new("Forecast", vec![full_row("Wagholi", 0.0)])]);
        let records = RowParser::new().parse(&workbook);
        assert_eq!(records[0].forecast_date, today_forecast_date());
    }

    #[test]
    fn test_row_missing_village_is_skipped() {
        let template = full_row("Wagholi", 1.0);
        let incomplete = Row::from_pairs(
            [COL_STATE, COL_DISTRICT, COL_BLOCK, COL_LATITUDE, COL_LONGITUDE, COL_RAIN]
                .into_iter()
                .map(|header| (header, template.get(header).clone())),
        );
        let workbook = Workbook::new(vec![Sheet::new(
            "20250101",
            vec![incomplete, full_row("Lohegaon", 3.0)],
        )]);

        let parsed = parser().parse_with_report(&workbook);

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.records[0].village, "Lohegaon");
        assert_eq!(parsed.report.rows_seen, 2);
        assert_eq!(parsed.report.rows_skipped, 1);
        assert_eq!(parsed.report.rows_accepted(), 1);
    }

    #[test]
    fn test_zero_coordinates_are_present() {
        let mut row = full_row("Null Island", 0.0);
        row.insert(COL_LATITUDE, 0.0);
        row.insert(COL_LONGITUDE, 0_i64);
        let workbook = Workbook::new(vec![Sheet::new("20250101", vec![row])]);

        let records = parser().parse(&workbook);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].latitude, 0.0);
        assert_eq!(records[0].longitude, 0.0);
    }

    #[test]
    fn test_missing_coordinate_is_skipped() {
        let row = Row::from_pairs([
            (COL_STATE, "Goa"),
            (COL_DISTRICT, "North Goa"),
            (COL_BLOCK, "Bardez"),
            (COL_VILLAGE, "Calangut"),
            (COL_LATITUDE, "15.54"),
        ]);
        let workbook = Workbook::new(vec![Sheet::new("20250101", vec![row])]);
        assert!(parser().parse(&workbook).is_empty());
    }

    #[test]
    fn test_measurement_coercion() {
        let mut template = full_row("Wagholi", 0.0);
        template.insert(COL_TMAX, "hot");
        let row = Row::from_pairs(
            [
                COL_STATE, COL_DISTRICT, COL_BLOCK, COL_VILLAGE, COL_LATITUDE, COL_LONGITUDE,
                COL_TMAX, COL_WIND_SPEED,
            ]
            .into_iter()
            .map(|header| (header, template.get(header).clone())),
        );
        let workbook = Workbook::new(vec![Sheet::new("20250101", vec![row])]);

        let parsed = parser().parse_with_report(&workbook);
        let record = &parsed.records[0];

        assert_eq!(record.rain, 0.0);
        assert_eq!(record.tmin, 0.0);
        assert_eq!(record.humidity, 0.0);
        assert_eq!(record.tmax, 0.0);
        assert_eq!(record.wind_speed, 9.2);
        assert_eq!(parsed.report.unparseable_measurements, 1);
    }

    #[test]
    fn test_numeric_identifiers_become_text() {
        let mut row = full_row("Wagholi", 0.0);
        row.insert(COL_BLOCK, 12.0);
        let workbook = Workbook::new(vec![Sheet::new("20250101", vec![row])]);

        let records = parser().parse(&workbook);
        assert_eq!(records[0].block, "12");
    }

    #[test]
    fn test_unparseable_coordinates_are_kept_but_not_mappable() {
        let mut row = full_row("Wagholi", 0.0);
        row.insert(COL_LATITUDE, "n/a");
        let workbook = Workbook::new(vec![Sheet::new("20250101", vec![row])]);

        let parsed = parser().parse_with_report(&workbook);
        assert_eq!(parsed.records.len(), 1);
        assert!(!parsed.records[0].is_mappable());
        assert_eq!(parsed.report.coordinates_out_of_range, 1);
    }

    #[test]
    fn test_duplicate_location_date_last_wins() {
        let workbook = Workbook::new(vec![
            Sheet::new(
                "20250101",
                vec![
                    full_row("Wagholi", 1.0),
                    full_row("Lohegaon", 2.0),
                    full_row("Wagholi", 9.0),
                ],
            ),
            Sheet::new("20250102", vec![full_row("Wagholi", 4.0)]),
        ]);

        let parsed = parser().parse_with_report(&workbook);
        let summary: Vec<(&str, &str, f64)> = parsed
            .records
            .iter()
            .map(|r| (r.village.as_str(), r.forecast_date.as_str(), r.rain))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("Wagholi", "20250101", 9.0),
                ("Lohegaon", "20250101", 2.0),
                ("Wagholi", "20250102", 4.0),
            ]
        );
        assert_eq!(parsed.report.duplicates_replaced, 1);
    }
}
