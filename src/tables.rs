use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    billing::Estimate,
    holidays::Holidays,
    quantity::rate::KilowattHourRate,
    tariff::{rates::RateTable, schedule::Schedule, season::Season, time_of_use::TimeOfUse},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

const fn time_of_use_color(time_of_use: TimeOfUse) -> Color {
    match time_of_use {
        TimeOfUse::Peak => Color::Red,
        TimeOfUse::Shoulder => Color::DarkYellow,
        TimeOfUse::OffPeak => Color::Green,
    }
}

#[must_use]
pub fn build_totals_table(estimate: &Estimate) -> Table {
    let cheapest = estimate.cheapest();
    let mut table = new_table();
    table.set_header(vec!["Schedule", "Total"]);
    for (schedule, bill) in &estimate.bills {
        let is_cheapest = cheapest == Some(*schedule);
        table.add_row(vec![
            Cell::new(schedule),
            Cell::new(bill.total)
                .set_alignment(CellAlignment::Right)
                .fg(if is_cheapest { Color::Green } else { Color::Reset }),
        ]);
    }
    table.add_row(vec![
        Cell::new(format!("{} intervals, +{} each", estimate.n_records, estimate.fixed_adjustment))
            .add_attribute(Attribute::Dim),
    ]);
    table
}

#[must_use]
pub fn build_breakdown_table(estimate: &Estimate) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Schedule", "Season", "Period", "Intervals", "Usage", "Cost"]);
    for (schedule, bill) in &estimate.bills {
        for ((season, time_of_use), period) in &bill.periods {
            table.add_row(vec![
                Cell::new(schedule),
                Cell::new(season),
                Cell::new(time_of_use).fg(time_of_use_color(*time_of_use)),
                Cell::new(period.n_intervals).set_alignment(CellAlignment::Right),
                Cell::new(period.usage).set_alignment(CellAlignment::Right),
                Cell::new(period.cost).set_alignment(CellAlignment::Right),
            ]);
        }
    }
    table
}

#[must_use]
pub fn build_holidays_table(holidays: &Holidays) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Date", "Day", "Holiday"]);
    if holidays.is_empty() {
        table.add_row(vec![Cell::new("none").add_attribute(Attribute::Dim)]);
    }
    for (date, label) in holidays.iter() {
        table.add_row(vec![
            Cell::new(date),
            Cell::new(date.format("%a")).add_attribute(Attribute::Dim),
            Cell::new(label),
        ]);
    }
    table
}

#[must_use]
pub fn build_rates_table(rates: &RateTable) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Schedule", "Season", "Period", "Rate"]);
    for ((schedule, season, time_of_use), rate) in rates.iter() {
        table.add_row(vec![
            Cell::new(schedule),
            Cell::new(season),
            Cell::new(time_of_use).fg(time_of_use_color(time_of_use)),
            Cell::new(rate).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// One row per schedule: how a single moment is priced.
#[must_use]
pub fn build_classification_table(
    rows: &[(Schedule, Season, TimeOfUse, KilowattHourRate)],
    holiday: Option<&str>,
) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Schedule", "Season", "Period", "Rate"]);
    for (schedule, season, time_of_use, rate) in rows {
        table.add_row(vec![
            Cell::new(schedule),
            Cell::new(season),
            Cell::new(time_of_use).fg(time_of_use_color(*time_of_use)),
            Cell::new(rate).set_alignment(CellAlignment::Right),
        ]);
    }
    if let Some(holiday) = holiday {
        table.add_row(vec![Cell::new(format!("Holiday: {holiday}")).add_attribute(Attribute::Dim)]);
    }
    table
}
