use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

use crate::error::{DashboardError, Result};
use crate::utils::constants::{HEAVY_RAIN_THRESHOLD_MM, LIGHT_RAIN_MAX_MM};

/// One forecast observation for a village on a forecast date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WeatherRecord {
    #[validate(length(min = 1))]
    pub state: String,

    #[validate(length(min = 1))]
    pub district: String,

    #[validate(length(min = 1))]
    pub block: String,

    #[validate(length(min = 1))]
    pub village: String,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    // Measurements, 0 when the sheet left them blank
    pub rain: f64,
    pub tmax: f64,
    pub tmin: f64,
    pub humidity: f64,
    pub wind_speed: f64,

    /// `YYYYMMDD`
    pub forecast_date: String,
}

/// (state, district, block, village): identifies a location across forecast dates
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LocationKey<'a> {
    pub state: &'a str,
    pub district: &'a str,
    pub block: &'a str,
    pub village: &'a str,
}

impl fmt::Display for LocationKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} ({} / {})",
            self.village, self.block, self.state, self.district
        )
    }
}

impl WeatherRecord {
    pub fn builder() -> WeatherRecordBuilder {
        WeatherRecordBuilder::new()
    }

    pub fn location_key(&self) -> LocationKey<'_> {
        LocationKey {
            state: &self.state,
            district: &self.district,
            block: &self.block,
            village: &self.village,
        }
    }

    pub fn same_location(&self, other: &WeatherRecord) -> bool {
        self.location_key() == other.location_key()
    }

    /// Both coordinates finite, so the record can be placed on the map
    pub fn is_mappable(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    pub fn has_heavy_rain(&self) -> bool {
        is_heavy_rain(self.rain)
    }

    pub fn rain_category(&self) -> RainCategory {
        RainCategory::from_rain(self.rain)
    }

    pub fn temperature_range(&self) -> f64 {
        self.tmax - self.tmin
    }
}

pub fn is_heavy_rain(rain_mm: f64) -> bool {
    rain_mm > HEAVY_RAIN_THRESHOLD_MM
}

/// Rainfall band used to colour map markers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RainCategory {
    Dry,
    Light,
    Moderate,
    Heavy,
}

impl RainCategory {
    pub fn from_rain(rain_mm: f64) -> Self {
        if rain_mm > HEAVY_RAIN_THRESHOLD_MM {
            RainCategory::Heavy
        } else if rain_mm > LIGHT_RAIN_MAX_MM {
            RainCategory::Moderate
        } else if rain_mm > 0.0 {
            RainCategory::Light
        } else {
            RainCategory::Dry
        }
    }

    pub fn legend(&self) -> &'static str {
        match self {
            RainCategory::Dry => "No rain (0 mm)",
            RainCategory::Light => "Light (1-10 mm)",
            RainCategory::Moderate => "Moderate (11-50 mm)",
            RainCategory::Heavy => "Heavy (>50 mm)",
        }
    }
}

impl fmt::Display for RainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RainCategory::Dry => "dry",
            RainCategory::Light => "light",
            RainCategory::Moderate => "moderate",
            RainCategory::Heavy => "heavy",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Default)]
pub struct WeatherRecordBuilder {
    state: Option<String>,
    district: Option<String>,
    block: Option<String>,
    village: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    rain: f64,
    tmax: f64,
    tmin: f64,
    humidity: f64,
    wind_speed: f64,
    forecast_date: Option<String>,
}

impl WeatherRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(
        mut self,
        state: impl Into<String>,
        district: impl Into<String>,
        block: impl Into<String>,
        village: impl Into<String>,
    ) -> Self {
        self.state = Some(state.into());
        self.district = Some(district.into());
        self.block = Some(block.into());
        self.village = Some(village.into());
        self
    }

    pub fn coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn rain(mut self, rain: f64) -> Self {
        self.rain = rain;
        self
    }

    pub fn temperatures(mut self, tmin: f64, tmax: f64) -> Self {
        self.tmin = tmin;
        self.tmax = tmax;
        self
    }

    pub fn humidity(mut self, humidity: f64) -> Self {
        self.humidity = humidity;
        self
    }

    pub fn wind_speed(mut self, wind_speed: f64) -> Self {
        self.wind_speed = wind_speed;
        self
    }

    pub fn forecast_date(mut self, date: impl Into<String>) -> Self {
        self.forecast_date = Some(date.into());
        self
    }

    pub fn build(self) -> Result<WeatherRecord> {
        let missing = |field: &str| DashboardError::MissingData(field.to_string());

        Ok(WeatherRecord {
            state: self.state.ok_or_else(|| missing("state"))?,
            district: self.district.ok_or_else(|| missing("district"))?,
            block: self.block.ok_or_else(|| missing("block"))?,
            village: self.village.ok_or_else(|| missing("village"))?,
            latitude: self.latitude.ok_or_else(|| missing("latitude"))?,
            longitude: self.longitude.ok_or_else(|| missing("longitude"))?,
            rain: self.rain,
            tmax: self.tmax,
            tmin: self.tmin,
            humidity: self.humidity,
            wind_speed: self.wind_speed,
            forecast_date: self.forecast_date.ok_or_else(|| missing("forecast_date"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WeatherRecord {
        WeatherRecord::builder()
            .location("Maharashtra", "Pune", "Haveli", "Wagholi")
            .coordinates(18.5808, 73.9787)
            .rain(12.5)
            .temperatures(21.0, 31.5)
            .humidity(68.0)
            .wind_speed(9.2)
            .forecast_date("20250601")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_pattern() {
        let record = sample();
        assert_eq!(record.village, "Wagholi");
        assert_eq!(record.forecast_date, "20250601");
        assert!(record.validate().is_ok());
        assert!(record.is_mappable());
        assert_eq!(record.temperature_range(), 10.5);
    }

    #[test]
    fn test_builder_requires_location_and_date() {
        let err = WeatherRecord::builder()
            .coordinates(18.0, 73.0)
            .forecast_date("20250601")
            .build()
            .unwrap_err();
        assert!(matches!(err, DashboardError::MissingData(field) if field == "state"));

        let err = WeatherRecord::builder()
            .location("S", "D", "B", "V")
            .coordinates(18.0, 73.0)
            .build()
            .unwrap_err();
        assert!(matches!(err, DashboardError::MissingData(field) if field == "forecast_date"));
    }

    #[test]
    fn test_non_finite_coordinates_are_not_mappable() {
        let mut record = sample();
        record.latitude = f64::NAN;
        assert!(!record.is_mappable());

        record.latitude = 18.0;
        record.longitude = f64::INFINITY;
        assert!(!record.is_mappable());
    }

    #[test]
    fn test_invalid_coordinates_fail_validation() {
        let mut record = sample();
        record.latitude = 91.0;
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_rain_category_boundaries() {
        assert_eq!(RainCategory::from_rain(0.0), RainCategory::Dry);
        assert_eq!(RainCategory::from_rain(0.1), RainCategory::Light);
        assert_eq!(RainCategory::from_rain(10.0), RainCategory::Light);
        assert_eq!(RainCategory::from_rain(10.5), RainCategory::Moderate);
        assert_eq!(RainCategory::from_rain(50.0), RainCategory::Moderate);
        assert_eq!(RainCategory::from_rain(50.1), RainCategory::Heavy);
    }

    #[test]
    fn test_rain_category_legend() {
        assert_eq!(RainCategory::Heavy.legend(), "Heavy (>50 mm)");
        assert_eq!(RainCategory::from_rain(0.0).legend(), "No rain (0 mm)");
        assert_eq!(RainCategory::Moderate.to_string(), "moderate");
    }

    #[test]
    fn test_heavy_rain_is_strictly_above_threshold() {
        assert!(!is_heavy_rain(50.0));
        assert!(is_heavy_rain(50.01));

        let mut record = sample();
        record.rain = 60.0;
        assert!(record.has_heavy_rain());
        assert_eq!(record.rain_category(), RainCategory::Heavy);
    }

    #[test]
    fn test_location_key_ignores_date_and_measurements() {
        let a = sample();
        let mut b = sample();
        b.forecast_date = "20250602".to_string();
        b.rain = 0.0;
        assert!(a.same_location(&b));

        b.village = "Lohegaon".to_string();
        assert!(!a.same_location(&b));
    }
}
