use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};

use crate::{quantity::energy::KilowattHours, tariff::schedule::Schedule, usage::DateRange};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    /// TOML settings file.
    #[clap(long, env = "BGE_RATEPLAN_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Project the bill under every rate schedule from an interval usage export.
    #[clap(name = "estimate")]
    Estimate(EstimateArgs),

    /// Price a single moment under every rate schedule, or just one.
    #[clap(name = "classify")]
    Classify(ClassifyArgs),

    /// List the holidays priced as off-peak in a year.
    #[clap(name = "holidays")]
    Holidays(HolidaysArgs),

    /// Print the rate table in effect.
    #[clap(name = "rates")]
    Rates,
}

#[derive(Parser)]
pub struct EstimateArgs {
    /// CSV export with `DATE`, `START TIME` and `USAGE` columns.
    pub input: PathBuf,

    /// First billed date, inclusive.
    #[clap(long)]
    pub since: Option<NaiveDate>,

    /// Last billed date, inclusive.
    #[clap(long)]
    pub until: Option<NaiveDate>,

    /// Per-interval usage adjustment, overrides the config.
    #[clap(long = "adjustment-kwh")]
    pub fixed_adjustment: Option<KilowattHours>,

    /// Lines before the CSV header, overrides the config.
    #[clap(long)]
    pub skip_lines: Option<usize>,

    /// Also print usage and cost per season and time-of-use period.
    #[clap(long)]
    pub breakdown: bool,
}

impl EstimateArgs {
    #[must_use]
    pub const fn date_range(&self) -> DateRange {
        DateRange { since: self.since, until: self.until }
    }
}

#[derive(Parser)]
pub struct ClassifyArgs {
    /// Local time, for example `2024-07-17T14:00:00`.
    pub at: NaiveDateTime,

    /// Only price this schedule: R, RL, EV or EVP.
    #[clap(long)]
    pub schedule: Option<Schedule>,
}

impl ClassifyArgs {
    #[must_use]
    pub fn schedules(&self) -> Vec<Schedule> {
        self.schedule.map_or_else(|| Schedule::ALL.to_vec(), |schedule| vec![schedule])
    }
}

#[derive(Parser)]
pub struct HolidaysArgs {
    pub year: i32,
}
