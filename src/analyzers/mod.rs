pub mod map_view;
pub mod weather_analyzer;

pub use map_view::{GeographicBounds, MapView};
pub use weather_analyzer::{
    day_label, next_forecast_dates, RainAdvisory, SummaryStatistics, WeatherAnalyzer,
};
