use crate::models::WeatherRecord;
use clap::ValueEnum;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortColumn {
    ForecastDate,
    State,
    District,
    Block,
    Village,
    Latitude,
    Longitude,
    Rain,
    Tmax,
    Tmin,
    Humidity,
    WindSpeed,
}

impl SortColumn {
    fn compare(&self, a: &WeatherRecord, b: &WeatherRecord) -> Ordering {
        match self {
            SortColumn::ForecastDate => a.forecast_date.cmp(&b.forecast_date),
            SortColumn::State => compare_text(&a.state, &b.state),
            SortColumn::District => compare_text(&a.district, &b.district),
            SortColumn::Block => compare_text(&a.block, &b.block),
            SortColumn::Village => compare_text(&a.village, &b.village),
            SortColumn::Latitude => a.latitude.total_cmp(&b.latitude),
            SortColumn::Longitude => a.longitude.total_cmp(&b.longitude),
            SortColumn::Rain => a.rain.total_cmp(&b.rain),
            SortColumn::Tmax => a.tmax.total_cmp(&b.tmax),
            SortColumn::Tmin => a.tmin.total_cmp(&b.tmin),
            SortColumn::Humidity => a.humidity.total_cmp(&b.humidity),
            SortColumn::WindSpeed => a.wind_speed.total_cmp(&b.wind_speed),
        }
    }
}

/// Case-insensitive first, so "apple" lands before "Zebra"; exact code points break ties
fn compare_text(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Column ordering of the data table. Without a column rows keep source order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableSort {
    pub column: Option<SortColumn>,
    pub direction: SortDirection,
}

impl TableSort {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by(column: SortColumn, direction: SortDirection) -> Self {
        Self {
            column: Some(column),
            direction,
        }
    }

    /// Header click: the active column flips direction, a new column starts ascending
    pub fn toggle(&mut self, column: SortColumn) {
        if self.column == Some(column) {
            self.direction = self.direction.reversed();
        } else {
            self.column = Some(column);
            self.direction = SortDirection::Ascending;
        }
    }

    /// Stable sort, so equal keys keep their relative order
    pub fn apply(&self, rows: &mut [&WeatherRecord]) {
        let Some(column) = self.column else {
            return;
        };
        rows.sort_by(|a, b| {
            let ordering = column.compare(a, b);
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }
}
