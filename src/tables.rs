use std::fmt::Display;

use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{
        ChargeLogEntry,
        ChargeType,
        LogSummary,
        Point,
        StatisticsReport,
        log_summary::Comparison,
        statistics_report::ChargeSourceSplit,
    },
    quantity::efficiency::{Efficiency, Grade},
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

const fn charge_type_color(charge_type: ChargeType) -> Color {
    match charge_type {
        ChargeType::AcSingleWireCan => Color::Green,
        ChargeType::Supercharger => Color::Red,
        ChargeType::J1772 => Color::DarkYellow,
    }
}

fn efficiency_color(efficiency: Efficiency) -> Color {
    match efficiency.grade() {
        Grade::Poor => Color::Red,
        Grade::Normal => Color::Reset,
        Grade::Excellent => Color::Green,
    }
}

fn comparison_cell(comparison: Comparison) -> Cell {
    let cell = Cell::new(comparison);
    match comparison.change {
        Some(change) if change > 0.0 => cell.fg(Color::Red),
        Some(_) => cell.fg(Color::Green),
        None => cell.add_attribute(Attribute::Dim),
    }
}

pub fn build_logs_table(entries: &[ChargeLogEntry]) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "日期",
        "總里程",
        "階段里程",
        "充電度數",
        "價格 / kWh",
        "總費用",
        "充電類型",
        "備註",
    ]);
    for entry in entries {
        let charge_type = match (entry.known_charge_type(), entry.charge_type.as_deref()) {
            (Some(charge_type), _) => Cell::new(charge_type).fg(charge_type_color(charge_type)),
            (None, Some(raw)) => Cell::new(raw).add_attribute(Attribute::Dim),
            (None, None) => Cell::new("-").add_attribute(Attribute::Dim),
        };
        table.add_row(vec![
            Cell::new(&entry.date),
            Cell::new(entry.odometer())
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
            Cell::new(entry.distance()).set_alignment(CellAlignment::Right),
            Cell::new(entry.energy()).set_alignment(CellAlignment::Right),
            Cell::new(entry.rate()).set_alignment(CellAlignment::Right),
            Cell::new(entry.cost()).set_alignment(CellAlignment::Right),
            charge_type,
            Cell::new(entry.note.as_deref().unwrap_or_default()).add_attribute(Attribute::Dim),
        ]);
    }
    table
}

pub fn build_log_summary_table(summary: &LogSummary) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", "本期", "與前期相比"]);
    table.add_row(vec![
        Cell::new("期間"),
        Cell::new(summary.period),
        Cell::new(summary.previous_period).add_attribute(Attribute::Dim),
    ]);
    table.add_row(vec![
        Cell::new("充電度數"),
        Cell::new(summary.current.energy).set_alignment(CellAlignment::Right),
        comparison_cell(summary.energy_comparison()),
    ]);
    table.add_row(vec![
        Cell::new("總費用"),
        Cell::new(summary.current.cost).set_alignment(CellAlignment::Right),
        comparison_cell(summary.cost_comparison()),
    ]);
    table.add_row(vec![
        Cell::new("平均價格 / kWh"),
        summary.average_rate().map_or_else(
            || Cell::new("-").add_attribute(Attribute::Dim),
            |rate| Cell::new(rate).set_alignment(CellAlignment::Right),
        ),
        Cell::new(""),
    ]);
    table
}

pub fn build_statistics_table(report: &StatisticsReport) -> Table {
    let mut table = new_table();
    table.set_header(vec![
        "月份",
        "階段里程",
        "充電度數",
        "平均電耗",
        "平均價格 / kWh",
        "總費用",
        "更新日期",
    ]);
    for entry in report.entries() {
        let efficiency = entry.efficiency();
        table.add_row(vec![
            Cell::new(entry.display_key()),
            Cell::new(entry.distance()).set_alignment(CellAlignment::Right),
            Cell::new(entry.energy()).set_alignment(CellAlignment::Right),
            Cell::new(efficiency)
                .set_alignment(CellAlignment::Right)
                .fg(efficiency_color(efficiency)),
            Cell::new(entry.rate()).set_alignment(CellAlignment::Right),
            Cell::new(entry.cost()).set_alignment(CellAlignment::Right),
            Cell::new(&entry.date),
        ]);
    }
    table
}

pub fn build_totals_table(report: &StatisticsReport) -> Table {
    let average_efficiency = report.average_efficiency();
    let mut table = new_table();
    table.set_header(vec![
        "總里程",
        "總度數",
        "總費用",
        "平均電耗",
        "平均價格 / kWh",
        "每公里成本",
    ]);
    table.add_row(vec![
        Cell::new(report.total_distance()),
        Cell::new(report.total_energy()),
        Cell::new(report.total_cost()),
        Cell::new(average_efficiency).fg(efficiency_color(average_efficiency)),
        Cell::new(report.average_rate()),
        Cell::new(report.average_cost_per_km()),
    ]);
    table
}

/// Chart data as a two-column table.
pub fn build_series_table<V: Display>(
    title: &str,
    series: impl IntoIterator<Item = Point<String, V>>,
) -> Table {
    let mut table = new_table();
    table.set_header(vec!["月份", title]);
    for (label, value) in series {
        table.add_row(vec![Cell::new(label), Cell::new(value).set_alignment(CellAlignment::Right)]);
    }
    table
}

pub fn build_efficiency_table(
    series: impl IntoIterator<Item = Point<String, Efficiency>>,
) -> Table {
    let mut table = new_table();
    table.set_header(vec!["月份", "電耗效率"]);
    for (label, efficiency) in series {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(efficiency)
                .set_alignment(CellAlignment::Right)
                .fg(efficiency_color(efficiency)),
        ]);
    }
    table
}

pub fn build_charge_source_table(split: ChargeSourceSplit) -> Table {
    let mut table = new_table();
    table.set_header(vec!["充電來源", "度數", "費用（估計）"]);
    table.add_row(vec![
        Cell::new("AC").fg(Color::Green),
        Cell::new(split.ac_energy).set_alignment(CellAlignment::Right),
        Cell::new(split.ac_cost).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("DC").fg(Color::Red),
        Cell::new(split.dc_energy).set_alignment(CellAlignment::Right),
        Cell::new(split.dc_cost).set_alignment(CellAlignment::Right),
    ]);
    table
}

/// Price options, custom ones highlighted.
pub fn build_price_options_table(options: &[f64], is_custom: impl Fn(f64) -> bool) -> Table {
    let mut table = new_table();
    table.set_header(vec!["價格 / kWh", ""]);
    for &price in options {
        let (origin, color) =
            if is_custom(price) { ("自訂", Color::Cyan) } else { ("預設", Color::Reset) };
        table.add_row(vec![
            Cell::new(format!("{price:.2}")).set_alignment(CellAlignment::Right).fg(color),
            Cell::new(origin).add_attribute(Attribute::Dim),
        ]);
    }
    table
}
