use crate::models::{is_heavy_rain, WeatherRecord};
use crate::utils::constants::DEFAULT_FORECAST_DAYS;
use serde::Serialize;
use std::collections::HashSet;

/// Aggregates over a non-empty set of records
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub count: usize,
    pub avg_rain: f64,
    pub avg_tmax: f64,
    pub avg_tmin: f64,
    pub avg_humidity: f64,
    pub avg_wind_speed: f64,
    pub max_rain: f64,
    pub min_tmin: f64,
    pub max_tmax: f64,
}

impl SummaryStatistics {
    /// `None` for an empty input, never NaN averages
    pub fn from_records<'a, I>(records: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a WeatherRecord>,
    {
        let mut count = 0usize;
        let mut rain_sum = 0.0;
        let mut tmax_sum = 0.0;
        let mut tmin_sum = 0.0;
        let mut humidity_sum = 0.0;
        let mut wind_sum = 0.0;
        let mut max_rain = f64::NEG_INFINITY;
        let mut min_tmin = f64::INFINITY;
        let mut max_tmax = f64::NEG_INFINITY;

        for record in records {
            count += 1;
            rain_sum += record.rain;
            tmax_sum += record.tmax;
            tmin_sum += record.tmin;
            humidity_sum += record.humidity;
            wind_sum += record.wind_speed;

            max_rain = max_rain.max(record.rain);
            min_tmin = min_tmin.min(record.tmin);
            max_tmax = max_tmax.max(record.tmax);
        }

        if count == 0 {
            return None;
        }

        let n = count as f64;
        Some(Self {
            count,
            avg_rain: rain_sum / n,
            avg_tmax: tmax_sum / n,
            avg_tmin: tmin_sum / n,
            avg_humidity: humidity_sum / n,
            avg_wind_speed: wind_sum / n,
            max_rain,
            min_tmin,
            max_tmax,
        })
    }

    pub fn has_heavy_rain(&self) -> bool {
        is_heavy_rain(self.max_rain)
    }

    pub fn summary(&self) -> String {
        format!(
            "Locations: {}\n\
            Rainfall: avg {:.1} mm, max {:.1} mm\n\
            Temperature: avg max {:.1}°C, avg min {:.1}°C (range {:.1}°C to {:.1}°C)\n\
            Humidity: avg {:.1}%\n\
            Wind Speed: avg {:.1} km/h",
            self.count,
            self.avg_rain,
            self.max_rain,
            self.avg_tmax,
            self.avg_tmin,
            self.min_tmin,
            self.max_tmax,
            self.avg_humidity,
            self.avg_wind_speed
        )
    }
}

/// Heavy-rain warning for one location or for a whole region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RainAdvisory {
    Location { rain: f64 },
    Region { max_rain: f64 },
}

impl RainAdvisory {
    pub fn for_record(record: &WeatherRecord) -> Option<Self> {
        record
            .has_heavy_rain()
            .then_some(RainAdvisory::Location { rain: record.rain })
    }

    pub fn for_region(stats: &SummaryStatistics) -> Option<Self> {
        stats.has_heavy_rain().then_some(RainAdvisory::Region {
            max_rain: stats.max_rain,
        })
    }

    pub fn message(&self) -> String {
        match self {
            RainAdvisory::Location { rain } => {
                format!("Heavy rainfall expected ({:.1} mm) at this location", rain)
            }
            RainAdvisory::Region { max_rain } => {
                format!("Heavy rainfall expected (up to {:.1} mm) in some areas", max_rain)
            }
        }
    }
}

/// Up to `days` records for the selected record's location, one per forecast
/// date, in ascending date order.
///
/// Scans `all` rather than a filtered view: a view narrowed to one date would
/// hide the rest of the forecast. When a date repeats, the first record seen wins.
pub fn next_forecast_dates<'a>(
    all: &'a [WeatherRecord],
    selected: &WeatherRecord,
    days: usize,
) -> Vec<&'a WeatherRecord> {
    let mut seen_dates: HashSet<&str> = HashSet::new();
    let mut forecast: Vec<&WeatherRecord> = Vec::new();

    for record in all.iter().filter(|record| record.same_location(selected)) {
        if seen_dates.insert(record.forecast_date.as_str()) {
            forecast.push(record);
        }
    }

    forecast.sort_by(|a, b| a.forecast_date.cmp(&b.forecast_date));
    forecast.truncate(days);
    forecast
}

/// "Today" for the first forecast entry, "Day N" after that
pub fn day_label(index: usize) -> String {
    if index == 0 {
        "Today".to_string()
    } else {
        format!("Day {}", index + 1)
    }
}

pub struct WeatherAnalyzer {
    forecast_days: usize,
}

impl WeatherAnalyzer {
    pub fn new() -> Self {
        Self {
            forecast_days: DEFAULT_FORECAST_DAYS,
        }
    }

    pub fn with_forecast_days(forecast_days: usize) -> Self {
        Self { forecast_days }
    }

    pub fn forecast_days(&self) -> usize {
        self.forecast_days
    }

    pub fn summarize<'a, I>(&self, records: I) -> Option<SummaryStatistics>
    where
        I: IntoIterator<Item = &'a WeatherRecord>,
    {
        SummaryStatistics::from_records(records)
    }

    pub fn location_forecast<'a>(
        &self,
        all: &'a [WeatherRecord],
        selected: &WeatherRecord,
    ) -> Vec<&'a WeatherRecord> {
        next_forecast_dates(all, selected, self.forecast_days)
    }

    /// The selected record's advisory wins over the regional one
    pub fn advisory(
        &self,
        selected: Option<&WeatherRecord>,
        stats: Option<&SummaryStatistics>,
    ) -> Option<RainAdvisory> {
        match selected {
            Some(record) => RainAdvisory::for_record(record),
            None => stats.and_then(RainAdvisory::for_region),
        }
    }
}

impl Default for WeatherAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
