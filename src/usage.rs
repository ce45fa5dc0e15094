//! Metered interval usage.

use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::PathBuf,
};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;

use crate::{prelude::*, quantity::energy::KilowattHours};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UsageRecord {
    pub start: NaiveDateTime,
    pub usage: KilowattHours,
}

/// Inclusive calendar date bounds, either side open.
#[derive(Clone, Copy, Debug, Default)]
pub struct DateRange {
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
}

impl DateRange {
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.since.is_none_or(|since| since <= date) && self.until.is_none_or(|until| date <= until)
    }
}

/// Anything that can produce interval usage for a date range: a utility portal export,
/// a monitoring API, or a file on disk.
pub trait UsageSource {
    fn fetch(&self, range: DateRange) -> Result<Vec<UsageRecord>>;
}

/// Interval export in the utility's CSV layout (`DATE`, `START TIME`, `USAGE`, …).
#[derive(Debug)]
pub struct CsvUsageFile {
    pub path: PathBuf,

    /// Leading lines before the header, such as account details.
    pub skip_lines: usize,
}

impl UsageSource for CsvUsageFile {
    #[instrument(skip_all, fields(path = %self.path.display()))]
    fn fetch(&self, range: DateRange) -> Result<Vec<UsageRecord>> {
        let file = File::open(&self.path)
            .with_context(|| format!("failed to open `{}`", self.path.display()))?;
        read_usage(file, self.skip_lines, range)
            .with_context(|| format!("failed to read `{}`", self.path.display()))
    }
}

#[derive(Debug, Deserialize)]
struct Row {
    #[serde(rename = "DATE")]
    date: String,

    #[serde(rename = "START TIME")]
    start_time: String,

    #[serde(rename = "USAGE")]
    usage: String,
}

/// Malformed rows fail the whole read: a bill estimate with silently missing intervals is wrong.
pub fn read_usage<R: Read>(reader: R, skip_lines: usize, range: DateRange) -> Result<Vec<UsageRecord>> {
    let mut reader = BufReader::new(reader);
    let mut dummy = String::new();
    for _ in 0..skip_lines {
        reader.read_line(&mut dummy)?;
        dummy.clear();
    }

    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers().context("failed to read the header")?.clone();

    let line_offset = u64::try_from(skip_lines)?;
    let mut records = Vec::new();
    let mut n_skipped = 0_usize;
    for result in csv_reader.records() {
        let record = result?;
        let line = record.position().map_or(0, csv::Position::line) + line_offset;
        let record = parse_record(&record, &headers).with_context(|| format!("invalid record on line {line}"))?;
        if range.contains(record.start.date()) {
            records.push(record);
        } else {
            n_skipped += 1;
        }
    }

    debug!(n_records = records.len(), n_skipped, "read usage");
    Ok(records)
}

fn parse_record(record: &StringRecord, headers: &StringRecord) -> Result<UsageRecord> {
    let row: Row = record.deserialize(Some(headers))?;
    let date = parse_date(&row.date)?;
    let time = parse_time(&row.start_time)?;
    let usage: f64 = row
        .usage
        .parse()
        .with_context(|| format!("`USAGE` is not a number: `{}`", row.usage))?;
    ensure!(usage.is_finite(), "`USAGE` is not finite: `{}`", row.usage);
    Ok(UsageRecord { start: date.and_time(time), usage: KilowattHours(usage) })
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    ["%Y-%m-%d", "%m/%d/%Y"]
        .into_iter()
        .find_map(|format| NaiveDate::parse_from_str(s, format).ok())
        .with_context(|| format!("`DATE` is not a date: `{s}`"))
}

fn parse_time(s: &str) -> Result<NaiveTime> {
    ["%H:%M", "%H:%M:%S"]
        .into_iter()
        .find_map(|format| NaiveTime::parse_from_str(s, format).ok())
        .with_context(|| format!("`START TIME` is not a time: `{s}`"))
}
