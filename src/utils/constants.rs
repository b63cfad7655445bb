/// Spreadsheet column headers, matched exactly
pub const COL_STATE: &str = "State";
pub const COL_DISTRICT: &str = "District";
pub const COL_BLOCK: &str = "Block";
pub const COL_VILLAGE: &str = "Village";
pub const COL_LATITUDE: &str = "Latitude";
pub const COL_LONGITUDE: &str = "Longitude";
pub const COL_RAIN: &str = "Rain";
pub const COL_TMAX: &str = "Tmax";
pub const COL_TMIN: &str = "Tmin";
pub const COL_HUMIDITY: &str = "RH";
pub const COL_WIND_SPEED: &str = "Wind_Speed";

/// Forecast date format used for sheet names and record dates
pub const FORECAST_DATE_FORMAT: &str = "%Y%m%d";
pub const FORECAST_DATE_LEN: usize = 8;

/// Rain above this many millimetres raises a heavy-rain advisory. Not configurable.
pub const HEAVY_RAIN_THRESHOLD_MM: f64 = 50.0;

/// Upper bound of the light rain band on the map legend
pub const LIGHT_RAIN_MAX_MM: f64 = 10.0;

/// Processing defaults
pub const DEFAULT_FORECAST_DAYS: usize = 5;
pub const DEFAULT_TABLE_LIMIT: usize = 20;
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Recognised upload extensions
pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];
pub const CSV_EXTENSION: &str = "csv";
