use crate::error::Result;
use crate::utils::constants::{DEFAULT_FORECAST_DAYS, DEFAULT_LOG_LEVEL, DEFAULT_TABLE_LIMIT};
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

/// Session settings, read from an optional TOML file over built-in defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DashboardConfig {
    /// How many distinct forecast dates the location forecast shows
    #[validate(range(min = 1, max = 31))]
    pub forecast_days: usize,

    #[validate(length(min = 1))]
    pub log_level: String,

    /// Rows printed by the table view
    #[validate(range(min = 1))]
    pub table_limit: usize,
}

impl DashboardConfig {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("forecast_days", DEFAULT_FORECAST_DAYS as i64)?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .set_default("table_limit", DEFAULT_TABLE_LIMIT as i64)?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config: DashboardConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            forecast_days: DEFAULT_FORECAST_DAYS,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            table_limit: DEFAULT_TABLE_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashboardError;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_defaults_without_file() -> Result<()> {
        let config = DashboardConfig::load(None)?;
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.forecast_days, 5);
        Ok(())
    }

    #[test]
    fn test_file_overrides_defaults() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "forecast_days = 3")?;
        writeln!(file, "log_level = \"debug\"")?;

        let config = DashboardConfig::load(Some(file.path()))?;
        assert_eq!(config.forecast_days, 3);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.table_limit, DEFAULT_TABLE_LIMIT);
        Ok(())
    }

    #[test]
    fn test_out_of_range_horizon_rejected() -> Result<()> {
        let mut file = Builder::new().suffix(".toml").tempfile()?;
        writeln!(file, "forecast_days = 0")?;

        let err = DashboardConfig::load(Some(file.path())).unwrap_err();
        assert!(matches!(err, DashboardError::Validation(_)));
        Ok(())
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = DashboardConfig::load(Some(Path::new("does/not/exist.toml"))).unwrap_err();
        assert!(matches!(err, DashboardError::Config(_)));
    }
}
