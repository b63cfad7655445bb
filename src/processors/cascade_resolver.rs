use crate::models::{FilterSelection, WeatherRecord};
use serde::Serialize;
use std::collections::BTreeSet;

/// Distinct values of `field` over matching records, ascending
fn distinct_sorted<'a, F, P>(data: &'a [WeatherRecord], keep: P, field: F) -> Vec<String>
where
    P: Fn(&WeatherRecord) -> bool,
    F: Fn(&'a WeatherRecord) -> &'a str,
{
    data.iter()
        .filter(|record| keep(*record))
        .map(field)
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn states_of(data: &[WeatherRecord]) -> Vec<String> {
    distinct_sorted(data, |_| true, |r| r.state.as_str())
}

/// Empty until a state is chosen
pub fn districts_of(data: &[WeatherRecord], state: &str) -> Vec<String> {
    if state.is_empty() {
        return Vec::new();
    }
    distinct_sorted(data, |r| r.state == state, |r| r.district.as_str())
}

/// Empty until a district is chosen
pub fn blocks_of(data: &[WeatherRecord], state: &str, district: &str) -> Vec<String> {
    if district.is_empty() {
        return Vec::new();
    }
    distinct_sorted(
        data,
        |r| r.state == state && r.district == district,
        |r| r.block.as_str(),
    )
}

/// Empty until a block is chosen
pub fn villages_of(data: &[WeatherRecord], state: &str, district: &str, block: &str) -> Vec<String> {
    if block.is_empty() {
        return Vec::new();
    }
    distinct_sorted(
        data,
        |r| r.state == state && r.district == district && r.block == block,
        |r| r.village.as_str(),
    )
}

/// Legal choices at every location level for the current selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CascadeOptions {
    pub states: Vec<String>,
    pub districts: Vec<String>,
    pub blocks: Vec<String>,
    pub villages: Vec<String>,
}

impl CascadeOptions {
    pub fn resolve(data: &[WeatherRecord], selection: &FilterSelection) -> Self {
        Self {
            states: states_of(data),
            districts: districts_of(data, &selection.state),
            blocks: blocks_of(data, &selection.state, &selection.district),
            villages: villages_of(
                data,
                &selection.state,
                &selection.district,
                &selection.block,
            ),
        }
    }
}
