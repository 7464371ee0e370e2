use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::{
    core::{
        charge_type::ChargeType,
        sheet::{Column, FromRow, Header},
    },
    quantity::{
        cost::Cost,
        distance::Kilometers,
        energy::KilowattHours,
        rate::KilowattHourRate,
    },
};

/// Format of the [`ChargeLogEntry::date`] column.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

mod header {
    pub const DATE: &str = "日期";
    pub const TOTAL_MILEAGE: &str = "總里程(km)";
    pub const MILEAGE: &str = "階段里程";
    pub const CHARGED_KWH: &str = "充電度數";
    pub const PRICE_PER_KWH: &str = "價格 / kwh";
    pub const TOTAL_COST: &str = "總費用";
    pub const CHARGE_TYPE: &str = "充電類型";
    pub const NOTE: &str = "備註";
}

/// Single charging session, as logged in the spreadsheet.
///
/// Cells are kept as raw strings, numeric accessors coerce them.
#[must_use]
#[derive(Clone, Debug, bon::Builder)]
pub struct ChargeLogEntry {
    /// Row identity for list views.
    #[allow(dead_code)]
    #[builder(default = Uuid::new_v4())]
    pub id: Uuid,

    /// Timestamp in the [`DATE_FORMAT`].
    #[builder(into, default)]
    pub date: String,

    /// Odometer reading.
    #[builder(into)]
    pub total_mileage: Option<String>,

    /// Distance driven since the previous charge.
    #[builder(into)]
    pub mileage: Option<String>,

    #[builder(into)]
    pub charged_kwh: Option<String>,

    #[builder(into)]
    pub price_per_kwh: Option<String>,

    #[builder(into)]
    pub total_cost: Option<String>,

    /// Raw charge type, see [`ChargeType::as_str`].
    #[builder(into)]
    pub charge_type: Option<String>,

    #[builder(into)]
    pub note: Option<String>,
}

impl ChargeLogEntry {
    /// Parsed [`ChargeLogEntry::date`], [`None`] when malformed.
    #[must_use]
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.date, DATE_FORMAT).ok()
    }

    pub fn energy(&self) -> KilowattHours {
        KilowattHours::from_cell(self.charged_kwh.as_deref())
    }

    pub fn cost(&self) -> Cost {
        Cost::from_cell(self.total_cost.as_deref())
    }

    pub fn rate(&self) -> KilowattHourRate {
        KilowattHourRate::from_cell(self.price_per_kwh.as_deref())
    }

    pub fn odometer(&self) -> Kilometers {
        Kilometers::from_cell(self.total_mileage.as_deref())
    }

    pub fn distance(&self) -> Kilometers {
        Kilometers::from_cell(self.mileage.as_deref())
    }

    /// Recognized charge type.
    #[must_use]
    pub fn known_charge_type(&self) -> Option<ChargeType> {
        self.charge_type.as_deref()?.parse().ok()
    }
}

pub struct Columns {
    date: Column,
    total_mileage: Column,
    mileage: Column,
    charged_kwh: Column,
    price_per_kwh: Column,
    total_cost: Column,
    charge_type: Column,
    note: Column,
}

impl FromRow for ChargeLogEntry {
    type Columns = Columns;

    fn resolve(header: Header<'_>) -> Self::Columns {
        Columns {
            date: header.column(header::DATE),
            total_mileage: header.column(header::TOTAL_MILEAGE),
            mileage: header.column(header::MILEAGE),
            charged_kwh: header.column(header::CHARGED_KWH),
            price_per_kwh: header.column(header::PRICE_PER_KWH),
            total_cost: header.column(header::TOTAL_COST),
            charge_type: header.column(header::CHARGE_TYPE),
            note: header.column(header::NOTE),
        }
    }

    fn from_row(columns: &Self::Columns, row: &[String]) -> Self {
        Self {
            id: Uuid::new_v4(),
            date: columns.date.value(row).unwrap_or_default(),
            total_mileage: columns.total_mileage.value(row),
            mileage: columns.mileage.value(row),
            charged_kwh: columns.charged_kwh.value(row),
            price_per_kwh: columns.price_per_kwh.value(row),
            total_cost: columns.total_cost.value(row),
            charge_type: columns.charge_type.value(row),
            note: columns.note.value(row),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    use super::*;
    use crate::{core::sheet::parse_rows, prelude::*};

    fn values(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter().map(|row| row.iter().map(ToString::to_string).collect()).collect()
    }

    #[test]
    fn test_parse_rows_ok() -> Result {
        let values = values(&[
            &["日期", "總里程(km)", "階段里程", "充電度數", "價格 / kwh", "總費用", "充電類型"],
            &["2024-02-10 9:05:00", "12034", "310", "20", "6", "120", "Supercharger"],
            &["2024-02-12 21:40:00", "12100", "66"],
        ]);
        let entries = parse_rows::<ChargeLogEntry>(&values);
        assert_eq!(entries.len(), 2);

        let first = &entries[0];
        let expected = NaiveDate::from_ymd_opt(2024, 2, 10)
            .and_then(|date| date.and_hms_opt(9, 5, 0))
            .context("invalid timestamp")?;
        assert_eq!(first.timestamp(), Some(expected));
        assert_abs_diff_eq!(first.energy().0, 20.0);
        assert_abs_diff_eq!(first.cost().0, 120.0);
        assert_abs_diff_eq!(first.rate().0, 6.0);
        assert_abs_diff_eq!(first.distance().0, 310.0);
        assert_eq!(first.known_charge_type(), Some(ChargeType::Supercharger));
        assert_eq!(first.note, None);

        let second = &entries[1];
        assert_eq!(second.mileage.as_deref(), Some("66"));
        assert_eq!(second.charged_kwh, None);
        assert_eq!(second.energy(), KilowattHours::ZERO);
        assert_eq!(second.charge_type, None);
        assert_ne!(first.id, second.id);
        Ok(())
    }

    #[test]
    fn test_parse_rows_by_header_name() {
        let values =
            values(&[&["充電類型", "備註", "日期"], &["J1772", "mall", "2024-03-01 10:00:00"]]);
        let entries = parse_rows::<ChargeLogEntry>(&values);
        assert_eq!(entries[0].date, "2024-03-01 10:00:00");
        assert_eq!(entries[0].note.as_deref(), Some("mall"));
        assert_eq!(entries[0].known_charge_type(), Some(ChargeType::J1772));
        assert_eq!(entries[0].total_cost, None);
    }

    #[test]
    fn test_parse_rows_missing_date_column() {
        let values = values(&[&["充電度數"], &["10"]]);
        let entries = parse_rows::<ChargeLogEntry>(&values);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, "");
        assert_eq!(entries[0].timestamp(), None);
    }

    #[test]
    fn test_parse_rows_header_only() {
        assert!(parse_rows::<ChargeLogEntry>(&values(&[&["日期", "充電度數"]])).is_empty());
        assert!(parse_rows::<ChargeLogEntry>(&[]).is_empty());
    }

    #[test]
    fn test_malformed_date() {
        let entry = ChargeLogEntry::builder().date("2024/02/10").build();
        assert_eq!(entry.timestamp(), None);
    }
}
