use itertools::Itertools;

use crate::core::statistics_entry::StatisticsEntry;

pub type Point<K, V> = (K, V);

/// Chart label granularity.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LabelStyle {
    /// `{month}`, when all entries fall into one year.
    Month,

    /// `{yy}/{month}`, when the entries span several years.
    YearMonth,
}

impl LabelStyle {
    #[must_use]
    pub fn for_entries(entries: &[StatisticsEntry]) -> Self {
        if entries.iter().map(|entry| entry.year.as_str()).unique().count() > 1 {
            Self::YearMonth
        } else {
            Self::Month
        }
    }

    #[must_use]
    pub fn label(self, entry: &StatisticsEntry) -> String {
        match self {
            Self::Month => entry.month.clone(),
            Self::YearMonth => {
                let n_skipped = entry.year.chars().count().saturating_sub(2);
                let year_suffix: String = entry.year.chars().skip(n_skipped).collect();
                format!("{year_suffix}/{}", entry.month)
            }
        }
    }
}
