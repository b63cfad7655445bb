use crate::analyzers::{next_forecast_dates, SummaryStatistics};
use crate::error::{DashboardError, Result};
use crate::models::{FilterSelection, WeatherRecord};
use crate::processors::CascadeOptions;
use crate::readers::{ParseReport, ParsedWorkbook};
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Outcome of an upload that replaced the record set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSummary {
    pub records: usize,
    pub forecast_dates: usize,
    pub report: ParseReport,
}

impl UploadSummary {
    pub fn message(&self) -> String {
        loaded_message(self.records, self.forecast_dates)
    }
}

fn loaded_message(records: usize, forecast_dates: usize) -> String {
    format!(
        "Loaded {} records from {} forecast date(s)",
        records, forecast_dates
    )
}

/// Session state: the record set, the filter selection, the selected record
/// and the loading flag.
///
/// `available_dates`, `filtered_data` and `summary_statistics` are derived
/// from the records and filters only. They are computed on first use and
/// dropped whenever either input changes; selection and loading changes
/// leave them alone.
#[derive(Debug, Default)]
pub struct WeatherStore {
    weather_data: Vec<WeatherRecord>,
    filters: FilterSelection,
    selected_row: Option<WeatherRecord>,
    is_loading: bool,

    available_dates: OnceLock<Vec<String>>,
    filtered_indices: OnceLock<Vec<usize>>,
    statistics: OnceLock<Option<SummaryStatistics>>,
}

impl WeatherStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn weather_data(&self) -> &[WeatherRecord] {
        &self.weather_data
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    pub fn selected_row(&self) -> Option<&WeatherRecord> {
        self.selected_row.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Wholesale replace. Defaults the date filter to the earliest forecast
    /// date when it is unset.
    pub fn replace_all(&mut self, records: Vec<WeatherRecord>) {
        self.weather_data = records;
        self.invalidate_records();

        if self.filters.forecast_date.is_empty() {
            if let Some(first) = self.available_dates().first().cloned() {
                self.filters.forecast_date = first;
                self.invalidate_filters();
            }
        }

        tracing::info!(
            records = self.weather_data.len(),
            forecast_dates = self.available_dates().len(),
            "weather data replaced"
        );
    }

    /// Wholesale replace; cascade clearing is the caller's job (see the
    /// `FilterSelection` setters)
    pub fn set_filters(&mut self, filters: FilterSelection) {
        if filters == self.filters {
            return;
        }
        tracing::debug!(?filters, "filters changed");
        self.filters = filters;
        self.invalidate_filters();
    }

    /// Apply a change to a copy of the current filters, then store it
    pub fn update_filters<F>(&mut self, change: F)
    where
        F: FnOnce(&mut FilterSelection),
    {
        let mut filters = self.filters.clone();
        change(&mut filters);
        self.set_filters(filters);
    }

    pub fn set_selected_row(&mut self, row: Option<WeatherRecord>) {
        self.selected_row = row;
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Distinct forecast dates, strictly ascending
    pub fn available_dates(&self) -> &[String] {
        self.available_dates.get_or_init(|| {
            self.weather_data
                .iter()
                .map(|record| record.forecast_date.as_str())
                .collect::<BTreeSet<&str>>()
                .into_iter()
                .map(str::to_string)
                .collect()
        })
    }

    /// Records matching every non-empty filter field, in source order
    pub fn filtered_data(&self) -> Vec<&WeatherRecord> {
        self.filtered_indices()
            .iter()
            .map(|&index| &self.weather_data[index])
            .collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.filtered_indices().len()
    }

    /// `None` when the filtered view is empty
    pub fn summary_statistics(&self) -> Option<&SummaryStatistics> {
        self.statistics
            .get_or_init(|| SummaryStatistics::from_records(self.filtered_data()))
            .as_ref()
    }

    pub fn cascade_options(&self) -> CascadeOptions {
        CascadeOptions::resolve(&self.weather_data, &self.filters)
    }

    /// Multi-day forecast for the selected record, read from the full record set
    pub fn selected_forecast(&self, days: usize) -> Vec<&WeatherRecord> {
        match &self.selected_row {
            Some(selected) => next_forecast_dates(&self.weather_data, selected, days),
            None => Vec::new(),
        }
    }

    /// Record and date counts of the current data, `None` while nothing is loaded
    pub fn loaded_summary(&self) -> Option<String> {
        if self.weather_data.is_empty() {
            return None;
        }
        Some(loaded_message(
            self.weather_data.len(),
            self.available_dates().len(),
        ))
    }

    /// Mark an upload as started; a second one is rejected until this one completes
    pub fn begin_upload(&mut self) -> Result<()> {
        if self.is_loading {
            tracing::warn!("upload rejected: another upload is still in progress");
            return Err(DashboardError::UploadInProgress);
        }
        self.is_loading = true;
        Ok(())
    }

    /// Finish an upload. The loading flag is always cleared; on failure the
    /// records, filters and selection are left exactly as they were.
    pub fn complete_upload(&mut self, outcome: Result<ParsedWorkbook>) -> Result<UploadSummary> {
        self.is_loading = false;

        let parsed = match outcome {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::error!(error = %e, "upload failed, keeping previous data");
                return Err(e);
            }
        };

        self.replace_all(parsed.records);

        let summary = UploadSummary {
            records: self.weather_data.len(),
            forecast_dates: self.available_dates().len(),
            report: parsed.report,
        };
        tracing::info!("{}", summary.message());
        Ok(summary)
    }

    fn filtered_indices(&self) -> &[usize] {
        self.filtered_indices.get_or_init(|| {
            self.weather_data
                .iter()
                .enumerate()
                .filter(|(_, record)| self.filters.matches(record))
                .map(|(index, _)| index)
                .collect()
        })
    }

    fn invalidate_records(&mut self) {
        self.available_dates.take();
        self.invalidate_filters();
    }

    fn invalidate_filters(&mut self) {
        self.filtered_indices.take();
        self.statistics.take();
    }
}
