use crate::models::FilterSelection;
use crate::processors::SortColumn;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "forecast-dashboard")]
#[command(about = "Inspect village-level weather forecast workbooks")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(long, global = true, help = "TOML configuration file")]
    pub config: Option<PathBuf>,
}

/// Location and date filters, applied broadest level first
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(long)]
    pub state: Option<String>,

    #[arg(long)]
    pub district: Option<String>,

    #[arg(long)]
    pub block: Option<String>,

    #[arg(long)]
    pub village: Option<String>,

    #[arg(long, help = "Forecast date (YYYYMMDD) [default: earliest in the file]")]
    pub date: Option<String>,
}

impl FilterArgs {
    /// Goes through the cascading setters, so a narrower level given without
    /// its parent is kept but a parent always resets what was below it
    pub fn apply(&self, filters: &mut FilterSelection) {
        if let Some(state) = &self.state {
            filters.set_state(state.as_str());
        }
        if let Some(district) = &self.district {
            filters.set_district(district.as_str());
        }
        if let Some(block) = &self.block {
            filters.set_block(block.as_str());
        }
        if let Some(village) = &self.village {
            filters.set_village(village.as_str());
        }
        if let Some(date) = &self.date {
            filters.set_forecast_date(date.as_str());
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summary statistics, advisory and map extent for the filtered view
    Summary {
        #[arg(short, long, help = "Forecast workbook (.xlsx, .xls, .ods or .csv)")]
        input: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, help = "Emit the summary as JSON")]
        json: bool,
    },

    /// List the choices available at each location level
    Options {
        #[arg(short, long, help = "Forecast workbook (.xlsx, .xls, .ods or .csv)")]
        input: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Multi-day forecast for one village
    Forecast {
        #[arg(short, long, help = "Forecast workbook (.xlsx, .xls, .ods or .csv)")]
        input: PathBuf,

        #[arg(long)]
        state: String,

        #[arg(long)]
        district: String,

        #[arg(long)]
        block: String,

        #[arg(long)]
        village: String,

        #[arg(long, help = "Number of forecast dates [default: from config]")]
        days: Option<usize>,
    },

    /// Print the filtered records as a table
    Table {
        #[arg(short, long, help = "Forecast workbook (.xlsx, .xls, .ods or .csv)")]
        input: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        #[arg(long, value_enum)]
        sort: Option<SortColumn>,

        #[arg(long, requires = "sort")]
        descending: bool,

        #[arg(long, help = "Maximum rows to print [default: from config]")]
        limit: Option<usize>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_table_command() {
        let cli = Cli::try_parse_from([
            "forecast-dashboard",
            "table",
            "--input",
            "forecast.xlsx",
            "--state",
            "Goa",
            "--sort",
            "wind-speed",
            "--descending",
        ])
        .unwrap();

        match cli.command {
            Commands::Table {
                filters,
                sort,
                descending,
                limit,
                ..
            } => {
                assert_eq!(filters.state.as_deref(), Some("Goa"));
                assert_eq!(sort, Some(SortColumn::WindSpeed));
                assert!(descending);
                assert_eq!(limit, None);
            }
            _ => panic!("expected table command"),
        }
    }

    #[test]
    fn test_filter_args_cascade() {
        let args = FilterArgs {
            state: Some("Maharashtra".to_string()),
            district: Some("Pune".to_string()),
            ..FilterArgs::default()
        };
        let mut filters = FilterSelection::for_date("20250101");
        filters.block = "Stale".to_string();

        args.apply(&mut filters);

        assert_eq!(filters.state, "Maharashtra");
        assert_eq!(filters.district, "Pune");
        assert!(filters.block.is_empty());
        assert_eq!(filters.forecast_date, "20250101");
    }
}
