use std::{
    convert::Infallible,
    fmt::{Display, Formatter},
    str::FromStr,
};

use itertools::Itertools;

use crate::{
    core::{
        series::{LabelStyle, Point},
        statistics_entry::StatisticsEntry,
    },
    quantity::{
        Quantity,
        cost::Cost,
        distance::Kilometers,
        efficiency::Efficiency,
        energy::KilowattHours,
        rate::{KilometerRate, KilowattHourRate},
    },
};

#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum YearFilter {
    #[default]
    All,

    Year(String),
}

impl YearFilter {
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    #[must_use]
    pub fn matches(&self, entry: &StatisticsEntry) -> bool {
        match self {
            Self::All => true,
            Self::Year(year) => entry.year == *year,
        }
    }
}

impl FromStr for YearFilter {
    type Err = Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Ok(match value {
            "" | "all" => Self::All,
            year => Self::Year(year.to_owned()),
        })
    }
}

impl Display for YearFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Year(year) => f.write_str(year),
        }
    }
}

/// Rolling window over the most recent months.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum TimeRangeFilter {
    #[value(name = "3months")]
    ThreeMonths,

    #[default]
    #[value(name = "6months")]
    SixMonths,

    #[value(name = "1year")]
    OneYear,

    #[value(name = "all")]
    All,
}

impl TimeRangeFilter {
    #[must_use]
    pub const fn is_all(self) -> bool {
        matches!(self, Self::All)
    }

    /// Number of most recent months to keep.
    #[must_use]
    pub const fn n_months(self) -> Option<usize> {
        match self {
            Self::ThreeMonths => Some(3),
            Self::SixMonths => Some(6),
            Self::OneYear => Some(12),
            Self::All => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ThreeMonths => "近 3 個月",
            Self::SixMonths => "近 6 個月",
            Self::OneYear => "近 1 年",
            Self::All => "全部",
        }
    }
}

/// Apply the year filter, then keep the most recent months.
///
/// The result is ordered by the lexical `{year}/{month}` key.
pub fn filter_statistics(
    statistics: &[StatisticsEntry],
    year: &YearFilter,
    time_range: TimeRangeFilter,
) -> Vec<StatisticsEntry> {
    let mut filtered =
        statistics.iter().filter(|entry| year.matches(entry)).cloned().collect_vec();
    if let Some(n_months) = time_range.n_months() {
        filtered.sort_by_key(StatisticsEntry::chronological_key);
        let n_skipped = filtered.len().saturating_sub(n_months);
        filtered.drain(..n_skipped);
    }
    filtered.sort_by_cached_key(StatisticsEntry::display_key);
    filtered
}

/// Distinct years, most recent first, preceded by [`YearFilter::All`].
pub fn available_years(statistics: &[StatisticsEntry]) -> Vec<YearFilter> {
    let years = statistics
        .iter()
        .map(|entry| entry.year.as_str())
        .unique()
        .sorted_unstable_by(|lhs, rhs| rhs.cmp(lhs))
        .map(|year| YearFilter::Year(year.to_owned()));
    std::iter::once(YearFilter::All).chain(years).collect()
}

/// Filtered monthly statistics and everything derived from them.
#[must_use]
#[derive(Clone, Debug)]
pub struct StatisticsReport {
    entries: Vec<StatisticsEntry>,
    label_style: LabelStyle,
}

impl StatisticsReport {
    pub fn new(
        statistics: &[StatisticsEntry],
        year: &YearFilter,
        time_range: TimeRangeFilter,
    ) -> Self {
        let entries = filter_statistics(statistics, year, time_range);
        let label_style = LabelStyle::for_entries(&entries);
        Self { entries, label_style }
    }

    #[must_use]
    pub fn entries(&self) -> &[StatisticsEntry] {
        &self.entries
    }

    pub fn total_energy(&self) -> KilowattHours {
        self.entries.iter().map(StatisticsEntry::energy).sum()
    }

    pub fn total_cost(&self) -> Cost {
        self.entries.iter().map(StatisticsEntry::cost).sum()
    }

    pub fn total_distance(&self) -> Kilometers {
        self.entries.iter().map(StatisticsEntry::distance).sum()
    }

    /// Mean over the months which have an efficiency at all.
    pub fn average_efficiency(&self) -> Efficiency {
        mean(
            self.entries
                .iter()
                .map(StatisticsEntry::efficiency)
                .filter(|efficiency| efficiency.is_positive()),
        )
    }

    /// Mean over the months which have a price at all.
    pub fn average_rate(&self) -> KilowattHourRate {
        mean(self.entries.iter().map(StatisticsEntry::rate).filter(|rate| rate.is_positive()))
    }

    pub fn average_cost_per_km(&self) -> KilometerRate {
        let distance = self.total_distance();
        if distance.is_positive() { self.total_cost() / distance } else { KilometerRate::ZERO }
    }

    pub fn monthly_energy(&self) -> impl Iterator<Item = Point<String, KilowattHours>> + '_ {
        self.chronological().map(|entry| (self.label_style.label(entry), entry.energy()))
    }

    pub fn monthly_cost(&self) -> impl Iterator<Item = Point<String, Cost>> + '_ {
        self.chronological().map(|entry| (self.label_style.label(entry), entry.cost()))
    }

    /// Months without a positive efficiency are left out.
    pub fn efficiency_trend(&self) -> impl Iterator<Item = Point<String, Efficiency>> + '_ {
        self.chronological()
            .map(|entry| (entry, entry.efficiency()))
            .filter(|(_, efficiency)| efficiency.is_positive())
            .map(|(entry, efficiency)| (self.label_style.label(entry), efficiency))
    }

    /// Months without mileage are left out.
    pub fn cost_per_km_trend(&self) -> impl Iterator<Item = Point<String, KilometerRate>> + '_ {
        self.chronological()
            .filter(|entry| entry.distance().is_positive())
            .map(|entry| (self.label_style.label(entry), entry.cost() / entry.distance()))
    }

    pub fn charge_source_split(&self) -> ChargeSourceSplit {
        ChargeSourceSplit::approximate(self.total_energy(), self.total_cost())
    }

    fn chronological(&self) -> impl Iterator<Item = &StatisticsEntry> {
        self.entries.iter().sorted_by_key(|entry| entry.chronological_key())
    }
}

fn mean<const E: isize, const D: isize, const C: isize>(
    values: impl Iterator<Item = Quantity<E, D, C>>,
) -> Quantity<E, D, C> {
    let (sum, count) = values
        .fold((Quantity::<E, D, C>::ZERO, 0_u32), |(sum, count), value| (sum + value, count + 1));
    if count == 0 { sum } else { sum / f64::from(count) }
}

/// AC versus DC split of the charged energy and its cost.
///
/// The statistics sheet carries no charge type, so this is a fixed-ratio approximation
/// of the totals, not an attribution of the actual sessions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ChargeSourceSplit {
    pub ac_energy: KilowattHours,
    pub dc_energy: KilowattHours,
    pub ac_cost: Cost,
    pub dc_cost: Cost,
}

impl ChargeSourceSplit {
    const AC_SHARE: f64 = 0.9;
    const DC_SHARE: f64 = 0.1;

    /// AC is cheaper than average.
    const AC_COST_WEIGHT: f64 = 0.8;

    /// Supercharging is pricier than average.
    const DC_COST_WEIGHT: f64 = 2.0;

    pub fn approximate(energy: KilowattHours, cost: Cost) -> Self {
        Self {
            ac_energy: energy * Self::AC_SHARE,
            dc_energy: energy * Self::DC_SHARE,
            ac_cost: cost * Self::AC_SHARE * Self::AC_COST_WEIGHT,
            dc_cost: cost * Self::DC_SHARE * Self::DC_COST_WEIGHT,
        }
    }
}
