use crate::analyzers::{day_label, MapView, RainAdvisory, SummaryStatistics, WeatherAnalyzer};
use crate::cli::args::{Cli, Commands};
use crate::config::DashboardConfig;
use crate::models::{FilterSelection, RainCategory, WeatherRecord};
use crate::processors::{SortDirection, TableSort};
use crate::store::{UploadCoordinator, WeatherStore};
use crate::utils::dates::{format_iso, format_short};
use crate::utils::logging::init_logging;
use crate::utils::progress::ProgressReporter;
use anyhow::Context;
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Serialize)]
struct SummaryReport<'a> {
    filters: &'a FilterSelection,
    available_dates: &'a [String],
    statistics: Option<&'a SummaryStatistics>,
    map: Option<MapView>,
    advisory: Option<RainAdvisory>,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = DashboardConfig::load(cli.config.as_deref()).context("Invalid configuration")?;
    init_logging(&config.log_level, cli.verbose, cli.log_file.as_deref())
        .context("Could not initialise logging")?;

    match cli.command {
        Commands::Summary {
            input,
            filters,
            json,
        } => {
            let uploads = load_workbook(&input, json).await?;
            let mut store = uploads.store().write().await;
            store.update_filters(|selection| filters.apply(selection));

            let analyzer = WeatherAnalyzer::with_forecast_days(config.forecast_days);
            let stats = store.summary_statistics();
            let map = MapView::from_records(store.filtered_data());
            let advisory = analyzer.advisory(None, stats);

            if json {
                let report = SummaryReport {
                    filters: store.filters(),
                    available_dates: store.available_dates(),
                    statistics: stats,
                    map,
                    advisory,
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            print_dates(&store);
            println!("\nForecast Summary: {}", region_heading(store.filters()));

            match stats {
                Some(stats) => {
                    println!("{}", stats.summary());
                    if let Some(map) = map {
                        println!("\nMap:\n{}", map.summary());
                    }
                    if let Some(advisory) = advisory {
                        println!("\n⚠️  Weather Alert: {}", advisory.message());
                    }
                }
                None => println!("No records match the current filters"),
            }
        }

        Commands::Options { input, filters } => {
            let uploads = load_workbook(&input, false).await?;
            let mut store = uploads.store().write().await;
            store.update_filters(|selection| filters.apply(selection));

            print_dates(&store);
            let options = store.cascade_options();
            print_level("States", &options.states);
            print_level("Districts", &options.districts);
            print_level("Blocks", &options.blocks);
            print_level("Villages", &options.villages);
        }

        Commands::Forecast {
            input,
            state,
            district,
            block,
            village,
            days,
        } => {
            let uploads = load_workbook(&input, false).await?;
            let mut store = uploads.store().write().await;

            let selected = store
                .weather_data()
                .iter()
                .find(|r| {
                    r.state == state
                        && r.district == district
                        && r.block == block
                        && r.village == village
                })
                .cloned();

            let Some(selected) = selected else {
                println!(
                    "No records for {}, {} ({} / {})",
                    village, block, state, district
                );
                return Ok(());
            };

            println!(
                "\n{}, {}\n{} → {}\n{:.4}° N, {:.4}° E",
                selected.village,
                selected.block,
                selected.state,
                selected.district,
                selected.latitude,
                selected.longitude
            );

            store.set_selected_row(Some(selected));
            let days = days.unwrap_or(config.forecast_days);
            for (index, day) in store.selected_forecast(days).into_iter().enumerate() {
                print_forecast_day(index, day);
            }
        }

        Commands::Table {
            input,
            filters,
            sort,
            descending,
            limit,
        } => {
            let uploads = load_workbook(&input, false).await?;
            let mut store = uploads.store().write().await;
            store.update_filters(|selection| filters.apply(selection));

            let mut rows = store.filtered_data();
            if let Some(column) = sort {
                let direction = if descending {
                    SortDirection::Descending
                } else {
                    SortDirection::Ascending
                };
                TableSort::by(column, direction).apply(&mut rows);
            }

            println!("{} record(s)", rows.len());
            if rows.is_empty() {
                println!("No data available. Upload a workbook or adjust filters");
                return Ok(());
            }

            println!(
                "{:<10} {:<14} {:<14} {:<14} {:<18} {:>7} {:>6} {:>6} {:>6} {:>6}  Rain band",
                "Date", "State", "District", "Block", "Village", "Rain", "Tmax", "Tmin", "RH", "Wind"
            );
            let limit = limit.unwrap_or(config.table_limit);
            for row in rows.iter().take(limit) {
                println!(
                    "{:<10} {:<14} {:<14} {:<14} {:<18} {:>7.1} {:>6.1} {:>6.1} {:>6.1} {:>6.1}  {}",
                    format_iso(&row.forecast_date),
                    row.state,
                    row.district,
                    row.block,
                    row.village,
                    row.rain,
                    row.tmax,
                    row.tmin,
                    row.humidity,
                    row.wind_speed,
                    row.rain_category()
                );
            }
            if rows.len() > limit {
                println!("... {} more", rows.len() - limit);
            }
            print_rain_legend();
        }
    }

    Ok(())
}

async fn load_workbook(input: &Path, silent: bool) -> anyhow::Result<UploadCoordinator> {
    let uploads = UploadCoordinator::new(Arc::new(RwLock::new(WeatherStore::new())));
    let progress = ProgressReporter::new_spinner("Reading workbook...", silent);

    match uploads.upload(input).await {
        Ok(summary) => {
            progress.finish_with_message(&summary.message());
            if summary.report.rows_skipped > 0 {
                tracing::info!(
                    skipped = summary.report.rows_skipped,
                    "rows without a full location or coordinates were skipped"
                );
            }
        }
        Err(e) => {
            progress.abandon_with_message("Upload failed");
            return Err(e).with_context(|| {
                format!(
                    "Error parsing {}. Please check the format.",
                    input.display()
                )
            });
        }
    }

    Ok(uploads)
}

fn region_heading(filters: &FilterSelection) -> String {
    let region = filters.most_specific_location().unwrap_or("Selected Region");
    if filters.forecast_date.is_empty() {
        region.to_string()
    } else {
        format!("{} for {}", region, format_short(&filters.forecast_date))
    }
}

fn print_dates(store: &WeatherStore) {
    let dates: Vec<String> = store
        .available_dates()
        .iter()
        .map(|date| format_iso(date))
        .collect();
    println!("Forecast dates: {}", dates.join(", "));
    if let Some(loaded) = store.loaded_summary() {
        println!("{}", loaded);
    }
}

fn print_level(label: &str, values: &[String]) {
    if values.is_empty() {
        println!("{}: (select the level above first)", label);
    } else {
        println!("{} ({}): {}", label, values.len(), values.join(", "));
    }
}

fn print_rain_legend() {
    let bands = [
        RainCategory::Dry,
        RainCategory::Light,
        RainCategory::Moderate,
        RainCategory::Heavy,
    ];
    let legend: Vec<String> = bands
        .iter()
        .map(|band| format!("{} = {}", band, band.legend()))
        .collect();
    println!("\nRain bands: {}", legend.join("; "));
}

fn print_forecast_day(index: usize, day: &WeatherRecord) {
    println!(
        "\n{} - {} ({})\n  Rainfall: {:.1} mm\n  Max Temp: {:.1}°C  Min Temp: {:.1}°C\n  Humidity: {:.1}%  Wind: {:.1} km/h",
        day_label(index),
        format_short(&day.forecast_date),
        day.forecast_date,
        day.rain,
        day.tmax,
        day.tmin,
        day.humidity,
        day.wind_speed
    );
    if let Some(advisory) = RainAdvisory::for_record(day) {
        println!("  ⚠️  {}", advisory.message());
    }
}
