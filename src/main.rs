mod billing;
mod cli;
mod config;
mod holidays;
mod prelude;
mod quantity;
mod tables;
mod tariff;
mod usage;

use chrono::Datelike;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{
    billing::estimate,
    cli::{Args, Command},
    config::Config,
    holidays::united_states::UnitedStates,
    prelude::*,
    tables::{
        build_breakdown_table,
        build_classification_table,
        build_holidays_table,
        build_rates_table,
        build_totals_table,
    },
    tariff::Tariff,
    usage::{CsvUsageFile, UsageSource},
};

fn main() -> Result {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::read_from(path)?,
        None => Config::default(),
    };
    let mut tariff = Tariff::new(UnitedStates, config.rate_table()?)?;

    match args.command {
        Command::Estimate(args) => {
            let source = CsvUsageFile {
                path: args.input.clone(),
                skip_lines: args.skip_lines.unwrap_or(config.skip_lines),
            };
            let records = source.fetch(args.date_range())?;
            info!(n_records = records.len(), "loaded usage");
            if records.is_empty() {
                warn!("no usage in the requested date range");
            }

            let fixed_adjustment = args.fixed_adjustment.unwrap_or(config.fixed_adjustment);
            let estimate = estimate(&mut tariff, &records, fixed_adjustment)?;
            if args.breakdown {
                println!("{}", build_breakdown_table(&estimate));
            }
            println!("{}", build_totals_table(&estimate));
        }

        Command::Classify(args) => {
            let rows = args
                .schedules()
                .into_iter()
                .map(|schedule| {
                    let (season, time_of_use) = tariff.classify(args.at, schedule)?;
                    let rate = tariff.rate(args.at, schedule)?;
                    Ok((schedule, season, time_of_use, rate))
                })
                .collect::<Result<Vec<_>>>()?;
            let holidays = tariff.calendar().holidays(args.at.date().year())?;
            println!("{}", build_classification_table(&rows, holidays.label(args.at.date())));
        }

        Command::Holidays(args) => {
            println!("{}", build_holidays_table(tariff.calendar().holidays(args.year)?));
        }

        Command::Rates => {
            println!("{}", build_rates_table(tariff.rates()));
        }
    }

    Ok(())
}
