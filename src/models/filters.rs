use serde::{Deserialize, Serialize};

use crate::models::WeatherRecord;

/// The five-field constraint narrowing which records are in view.
///
/// An empty string means no constraint at that level. The `set_*` methods keep
/// the cascade consistent: a broader level clears every narrower one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub state: String,
    pub district: String,
    pub block: String,
    pub village: String,
    pub forecast_date: String,
}

impl FilterSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_date(forecast_date: impl Into<String>) -> Self {
        Self {
            forecast_date: forecast_date.into(),
            ..Self::default()
        }
    }

    pub fn set_state(&mut self, state: impl Into<String>) {
        self.state = state.into();
        self.district.clear();
        self.block.clear();
        self.village.clear();
    }

    pub fn set_district(&mut self, district: impl Into<String>) {
        self.district = district.into();
        self.block.clear();
        self.village.clear();
    }

    pub fn set_block(&mut self, block: impl Into<String>) {
        self.block = block.into();
        self.village.clear();
    }

    pub fn set_village(&mut self, village: impl Into<String>) {
        self.village = village.into();
    }

    pub fn set_forecast_date(&mut self, forecast_date: impl Into<String>) {
        self.forecast_date = forecast_date.into();
    }

    /// Reset the location levels, keeping the forecast date
    pub fn clear_locations(&mut self) {
        self.state.clear();
        self.district.clear();
        self.block.clear();
        self.village.clear();
    }

    pub fn is_unconstrained(&self) -> bool {
        self.state.is_empty()
            && self.district.is_empty()
            && self.block.is_empty()
            && self.village.is_empty()
            && self.forecast_date.is_empty()
    }

    /// Exact, case-sensitive match on every non-empty field
    pub fn matches(&self, record: &WeatherRecord) -> bool {
        field_matches(&self.forecast_date, &record.forecast_date)
            && field_matches(&self.state, &record.state)
            && field_matches(&self.district, &record.district)
            && field_matches(&self.block, &record.block)
            && field_matches(&self.village, &record.village)
    }

    /// Narrowest location level that is set, for headings
    pub fn most_specific_location(&self) -> Option<&str> {
        [&self.village, &self.block, &self.district, &self.state]
            .into_iter()
            .find(|level| !level.is_empty())
            .map(String::as_str)
    }
}

fn field_matches(filter: &str, value: &str) -> bool {
    filter.is_empty() || filter == value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: &str, district: &str, block: &str, village: &str, date: &str) -> WeatherRecord {
        WeatherRecord::builder()
            .location(state, district, block, village)
            .coordinates(20.0, 78.0)
            .forecast_date(date)
            .build()
            .unwrap()
    }

    fn fully_selected() -> FilterSelection {
        FilterSelection {
            state: "Maharashtra".to_string(),
            district: "Pune".to_string(),
            block: "Haveli".to_string(),
            village: "Wagholi".to_string(),
            forecast_date: "20250601".to_string(),
        }
    }

    #[test]
    fn test_state_change_clears_downstream() {
        let mut filters = fully_selected();
        filters.set_state("Karnataka");

        assert_eq!(filters.state, "Karnataka");
        assert!(filters.district.is_empty());
        assert!(filters.block.is_empty());
        assert!(filters.village.is_empty());
        assert_eq!(filters.forecast_date, "20250601");
    }

    #[test]
    fn test_district_change_clears_block_and_village() {
        let mut filters = fully_selected();
        filters.set_district("Satara");

        assert_eq!(filters.state, "Maharashtra");
        assert_eq!(filters.district, "Satara");
        assert!(filters.block.is_empty());
        assert!(filters.village.is_empty());
    }

    #[test]
    fn test_block_change_clears_village_only() {
        let mut filters = fully_selected();
        filters.set_block("Mulshi");

        assert_eq!(filters.district, "Pune");
        assert_eq!(filters.block, "Mulshi");
        assert!(filters.village.is_empty());
    }

    #[test]
    fn test_clear_locations_keeps_date() {
        let mut filters = fully_selected();
        filters.clear_locations();

        assert_eq!(filters, FilterSelection::for_date("20250601"));
        assert!(!filters.is_unconstrained());
    }

    #[test]
    fn test_matches_is_exact_and_case_sensitive() {
        let r = record("Maharashtra", "Pune", "Haveli", "Wagholi", "20250601");

        assert!(FilterSelection::new().matches(&r));
        assert!(fully_selected().matches(&r));

        let mut filters = FilterSelection::new();
        filters.set_state("maharashtra");
        assert!(!filters.matches(&r));

        filters.set_state("Maha");
        assert!(!filters.matches(&r));

        let filters = FilterSelection::for_date("20250602");
        assert!(!filters.matches(&r));
    }

    #[test]
    fn test_most_specific_location() {
        let mut filters = FilterSelection::new();
        assert_eq!(filters.most_specific_location(), None);

        filters.set_state("Maharashtra");
        assert_eq!(filters.most_specific_location(), Some("Maharashtra"));

        filters.set_district("Pune");
        filters.set_block("Haveli");
        assert_eq!(filters.most_specific_location(), Some("Haveli"));
    }
}
