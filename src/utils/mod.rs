pub mod constants;
pub mod dates;
pub mod logging;
pub mod progress;

pub use constants::*;
pub use dates::{format_iso, format_short, is_forecast_date_label, today_forecast_date};
pub use logging::init_logging;
pub use progress::ProgressReporter;
