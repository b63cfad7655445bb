use crate::models::WeatherRecord;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeographicBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Where to centre and how far to zoom the marker map.
///
/// Only mappable records (finite latitude and longitude) contribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub markers: usize,
    pub center_lat: f64,
    pub center_lon: f64,
    pub bounds: GeographicBounds,
}

impl MapView {
    pub fn from_records<'a, I>(records: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a WeatherRecord>,
    {
        let mut markers = 0usize;
        let mut lat_sum = 0.0;
        let mut lon_sum = 0.0;
        let mut bounds = GeographicBounds {
            min_lat: f64::INFINITY,
            max_lat: f64::NEG_INFINITY,
            min_lon: f64::INFINITY,
            max_lon: f64::NEG_INFINITY,
        };

        for record in records.into_iter().filter(|r| r.is_mappable()) {
            markers += 1;
            lat_sum += record.latitude;
            lon_sum += record.longitude;

            bounds.min_lat = bounds.min_lat.min(record.latitude);
            bounds.max_lat = bounds.max_lat.max(record.latitude);
            bounds.min_lon = bounds.min_lon.min(record.longitude);
            bounds.max_lon = bounds.max_lon.max(record.longitude);
        }

        if markers == 0 {
            return None;
        }

        Some(Self {
            markers,
            center_lat: lat_sum / markers as f64,
            center_lon: lon_sum / markers as f64,
            bounds,
        })
    }

    pub fn summary(&self) -> String {
        format!(
            "{} location(s) centred at {:.4}°N, {:.4}°E\n\
            Coverage: {:.4}°N-{:.4}°N, {:.4}°E-{:.4}°E",
            self.markers,
            self.center_lat,
            self.center_lon,
            self.bounds.min_lat,
            self.bounds.max_lat,
            self.bounds.min_lon,
            self.bounds.max_lon
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(latitude: f64, longitude: f64) -> WeatherRecord {
        WeatherRecord::builder()
            .location("Karnataka", "Mysuru", "Hunsur", "Bilikere")
            .coordinates(latitude, longitude)
            .forecast_date("20250101")
            .build()
            .unwrap()
    }

    #[test]
    fn test_center_and_bounds() {
        let records = vec![at(12.0, 76.0), at(14.0, 78.0)];
        let view = MapView::from_records(&records).unwrap();

        assert_eq!(view.markers, 2);
        assert_eq!(view.center_lat, 13.0);
        assert_eq!(view.center_lon, 77.0);
        assert_eq!(view.bounds.min_lat, 12.0);
        assert_eq!(view.bounds.max_lon, 78.0);
    }

    #[test]
    fn test_non_finite_coordinates_are_ignored() {
        let records = vec![at(12.0, 76.0), at(f64::NAN, 80.0), at(10.0, f64::INFINITY)];
        let view = MapView::from_records(&records).unwrap();

        assert_eq!(view.markers, 1);
        assert_eq!(view.center_lat, 12.0);
        assert_eq!(view.center_lon, 76.0);
    }

    #[test]
    fn test_nothing_mappable() {
        let records = vec![at(f64::NAN, f64::NAN)];
        assert_eq!(MapView::from_records(&records), None);
        assert_eq!(MapView::from_records(&Vec::new()), None);
    }
}
