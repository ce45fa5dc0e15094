use std::{fmt::Debug, fs, path::Path};

use serde::Deserialize;

use crate::{
    billing::DEFAULT_FIXED_ADJUSTMENT,
    prelude::*,
    quantity::{energy::KilowattHours, rate::KilowattHourRate},
    tariff::{rates::RateTable, schedule::Schedule, season::Season, time_of_use::TimeOfUse},
};

/// Optional TOML settings file.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default = "default_fixed_adjustment", rename = "fixed_adjustment_kwh")]
    pub fixed_adjustment: KilowattHours,

    /// Lines to skip before the CSV header.
    #[serde(default)]
    pub skip_lines: usize,

    /// Individual rate-table entries to replace.
    #[serde(default)]
    pub rates: Vec<RateOverride>,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RateOverride {
    pub schedule: Schedule,
    pub season: Season,
    pub time_of_use: TimeOfUse,
    pub rate: KilowattHourRate,
}

const fn default_fixed_adjustment() -> KilowattHours {
    DEFAULT_FIXED_ADJUSTMENT
}

impl Default for Config {
    fn default() -> Self {
        Self { fixed_adjustment: DEFAULT_FIXED_ADJUSTMENT, skip_lines: 0, rates: Vec::new() }
    }
}

impl Config {
    #[instrument(name = "Reading the config…")]
    pub fn read_from<P: AsRef<Path> + Debug>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse `{}`", path.display()))?;
        info!(
            path = %path.display(),
            fixed_adjustment = %config.fixed_adjustment,
            n_rate_overrides = config.rates.len(),
            "loaded the config"
        );
        Ok(config)
    }

    /// Default rates with the configured overrides applied.
    pub fn rate_table(&self) -> Result<RateTable> {
        let mut rates = RateTable::bge();
        for entry in &self.rates {
            rates.set((entry.schedule, entry.season, entry.time_of_use), entry.rate);
        }
        rates.validate().context("invalid rate configuration")?;
        Ok(rates)
    }
}
