pub mod upload;
pub mod weather_store;

pub use upload::{SharedStore, UploadCoordinator};
pub use weather_store::{UploadSummary, WeatherStore};
