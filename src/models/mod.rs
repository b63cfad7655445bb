pub mod filters;
pub mod weather;
pub mod workbook;

pub use filters::FilterSelection;
pub use weather::{is_heavy_rain, LocationKey, RainCategory, WeatherRecord, WeatherRecordBuilder};
pub use workbook::{Cell, Row, Sheet, Workbook};
