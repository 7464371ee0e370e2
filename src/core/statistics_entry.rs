use uuid::Uuid;

use crate::{
    core::sheet::{Column, FromRow, Header},
    quantity::{
        cost::Cost,
        distance::Kilometers,
        efficiency::Efficiency,
        energy::KilowattHours,
        rate::KilowattHourRate,
    },
};

mod header {
    pub const DATE: &str = "日期";
    pub const YEAR: &str = "年份";
    pub const MONTH: &str = "月份";
    pub const STAGE_MILEAGE: &str = "階段里程";
    pub const CHARGED_KWH: &str = "充電度數";
    pub const AVG_EFFICIENCY: &str = "平均電耗(km/kwh)";
    pub const AVG_PRICE_PER_KWH: &str = "平均價格 / kwh";
    pub const TOTAL_COST: &str = "總費用";
}

/// Monthly rollup from the statistics sheet.
#[must_use]
#[derive(Clone, Debug, bon::Builder)]
pub struct StatisticsEntry {
    /// Row identity for list views.
    #[allow(dead_code)]
    #[builder(default = Uuid::new_v4())]
    pub id: Uuid,

    #[builder(into, default)]
    pub date: String,

    #[builder(into)]
    pub year: String,

    #[builder(into)]
    pub month: String,

    #[builder(into)]
    pub stage_mileage: Option<String>,

    #[builder(into)]
    pub charged_kwh: Option<String>,

    #[builder(into)]
    pub avg_efficiency: Option<String>,

    #[builder(into)]
    pub avg_price_per_kwh: Option<String>,

    #[builder(into)]
    pub total_cost: Option<String>,
}

impl StatisticsEntry {
    /// `year * 100 + month`, unparsable parts count as zero.
    #[must_use]
    pub fn chronological_key(&self) -> i64 {
        let year = self.year.parse::<i64>().unwrap_or(0);
        let month = self.month.parse::<i64>().unwrap_or(0);
        year * 100 + month
    }

    /// Lexical `{year}/{month}` key.
    #[must_use]
    pub fn display_key(&self) -> String {
        format!("{}/{}", self.year, self.month)
    }

    pub fn distance(&self) -> Kilometers {
        Kilometers::from_cell(self.stage_mileage.as_deref())
    }

    pub fn energy(&self) -> KilowattHours {
        KilowattHours::from_cell(self.charged_kwh.as_deref())
    }

    pub fn efficiency(&self) -> Efficiency {
        Efficiency::from_cell(self.avg_efficiency.as_deref())
    }

    pub fn rate(&self) -> KilowattHourRate {
        KilowattHourRate::from_cell(self.avg_price_per_kwh.as_deref())
    }

    pub fn cost(&self) -> Cost {
        Cost::from_cell(self.total_cost.as_deref())
    }
}

pub struct Columns {
    date: Column,
    year: Column,
    month: Column,
    stage_mileage: Column,
    charged_kwh: Column,
    avg_efficiency: Column,
    avg_price_per_kwh: Column,
    total_cost: Column,
}

impl FromRow for StatisticsEntry {
    type Columns = Columns;

    fn resolve(header: Header<'_>) -> Self::Columns {
        Columns {
            date: header.column(header::DATE),
            year: header.column(header::YEAR),
            month: header.column(header::MONTH),
            stage_mileage: header.column(header::STAGE_MILEAGE),
            charged_kwh: header.column(header::CHARGED_KWH),
            avg_efficiency: header.column(header::AVG_EFFICIENCY),
            avg_price_per_kwh: header.column(header::AVG_PRICE_PER_KWH),
            total_cost: header.column(header::TOTAL_COST),
        }
    }

    fn from_row(columns: &Self::Columns, row: &[String]) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: columns.date.value(row).unwrap_or_default(),
            year: columns.year.value(row).unwrap_or_default(),
            month: columns.month.value(row).unwrap_or_default(),
            stage_mileage: columns.stage_mileage.value(row),
            charged_kwh: columns.charged_kwh.value(row),
            avg_efficiency: columns.avg_efficiency.value(row),
            avg_price_per_kwh: columns.avg_price_per_kwh.value(row),
            total_cost: columns.total_cost.value(row),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::core::sheet::parse_rows;

    #[test]
    fn test_parse_rows_ok() {
        let values: Vec<Vec<String>> = [
            vec!["日期", "年份", "月份", "階段里程", "充電度數", "平均電耗(km/kwh)", "平均價格 / kwh", "總費用"],
            vec!["2024/7", "2024", "7", "1500", "250", "6.0", "3.2", "800"],
            vec!["2024/8", "2024", "8", "", "120"],
        ]
        .into_iter()
        .map(|row| row.into_iter().map(ToString::to_string).collect())
        .collect();

        let entries = parse_rows::<StatisticsEntry>(&values);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].chronological_key(), 202_407);
        assert_eq!(entries[0].display_key(), "2024/7");
        assert_abs_diff_eq!(entries[0].efficiency().0, 6.0);
        assert_abs_diff_eq!(entries[0].rate().0, 3.2);
        assert_abs_diff_eq!(entries[0].cost().0, 800.0);
        assert_abs_diff_eq!(entries[1].distance().0, 0.0);
        assert_abs_diff_eq!(entries[1].energy().0, 120.0);
        assert_eq!(entries[1].total_cost, None);
    }

    #[test]
    fn test_missing_year_and_month() {
        let values = vec![vec!["日期".to_string()], vec!["2024/7".to_string()]];
        let entries = parse_rows::<StatisticsEntry>(&values);
        assert_eq!(entries[0].year, "");
        assert_eq!(entries[0].month, "");
        assert_eq!(entries[0].chronological_key(), 0);
    }
}
