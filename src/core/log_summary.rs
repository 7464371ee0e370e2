use std::fmt::{Display, Formatter};

use crate::{
    core::{charge_type::ChargeTypeFilter, log_entry::ChargeLogEntry, period::Period},
    fmt::SignedPercentage,
    quantity::{Quantity, cost::Cost, energy::KilowattHours, rate::KilowattHourRate},
};

/// Shown instead of a comparison when the previous period has nothing to compare with.
pub const NO_COMPARISON: &str = "—";

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Totals {
    pub energy: KilowattHours,
    pub cost: Cost,
}

impl<'a> FromIterator<&'a ChargeLogEntry> for Totals {
    fn from_iter<T: IntoIterator<Item = &'a ChargeLogEntry>>(iterator: T) -> Self {
        iterator.into_iter().fold(Self::default(), |mut totals, entry| {
            totals.energy += entry.energy();
            totals.cost += entry.cost();
            totals
        })
    }
}

impl Totals {
    /// Average cost per kilowatt-hour, undefined without any energy.
    #[must_use]
    pub fn average_rate(self) -> Option<KilowattHourRate> {
        self.energy.is_positive().then(|| self.cost / self.energy)
    }
}

/// Visible log entries of a period, with the totals compared to the preceding period.
#[must_use]
#[derive(Clone, Debug)]
pub struct LogSummary {
    pub period: Period,

    /// Entries within the period, matching the charge type filter, in the original order.
    pub entries: Vec<ChargeLogEntry>,

    pub current: Totals,

    pub previous_period: Period,

    /// Totals of the previous period, regardless of the charge type filter.
    pub previous: Totals,
}

impl LogSummary {
    pub fn new(logs: &[ChargeLogEntry], period: Period, charge_type: ChargeTypeFilter) -> Self {
        let entries: Vec<ChargeLogEntry> = logs
            .iter()
            .filter(|entry| entry.timestamp().is_some_and(|timestamp| period.contains(timestamp)))
            .filter(|entry| charge_type.matches(entry.charge_type.as_deref()))
            .cloned()
            .collect();
        let current = entries.iter().collect();
        let previous_period = period.previous();
        let previous = logs
            .iter()
            .filter(|entry| {
                entry.timestamp().is_some_and(|timestamp| previous_period.contains(timestamp))
            })
            .collect();
        Self { period, entries, current, previous_period, previous }
    }

    #[must_use]
    pub fn average_rate(&self) -> Option<KilowattHourRate> {
        self.current.average_rate()
    }

    pub fn energy_comparison(&self) -> Comparison {
        Comparison::new(self.current.energy, self.previous.energy, self.previous_period)
    }

    pub fn cost_comparison(&self) -> Comparison {
        Comparison::new(self.current.cost, self.previous.cost, self.previous_period)
    }
}

/// Period-over-period change.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Comparison {
    /// Relative change, [`None`] when the baseline is not positive.
    pub change: Option<f64>,

    pub baseline: Period,
}

impl Comparison {
    fn new<const E: isize, const D: isize, const C: isize>(
        current: Quantity<E, D, C>,
        previous: Quantity<E, D, C>,
        baseline: Period,
    ) -> Self {
        Self { change: current.relative_change(previous), baseline }
    }
}

impl Display for Comparison {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.change {
            Some(change) => write!(f, "{} ({})", SignedPercentage(change), self.baseline),
            None => f.write_str(NO_COMPARISON),
        }
    }
}
