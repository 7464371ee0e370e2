//! Year and time range selections exclude each other.
//!
//! Picking a specific value for one of them resets the other to «all», and the reset is reported
//! with a notice for the user.

use crate::core::statistics_report::{TimeRangeFilter, YearFilter};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StatisticsFilters {
    pub year: YearFilter,
    pub time_range: TimeRangeFilter,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FilterChange {
    Year(YearFilter),
    TimeRange(TimeRangeFilter),
}

impl StatisticsFilters {
    /// Apply the user's change, returning the notice if the other filter had to be reset.
    #[must_use]
    pub fn apply(&mut self, change: FilterChange) -> Option<String> {
        match change {
            FilterChange::Year(year) => {
                let notice = match &year {
                    YearFilter::Year(year) if !self.time_range.is_all() => {
                        self.time_range = TimeRangeFilter::All;
                        Some(format!("已自動切換到「全部時間範圍」以顯示 {year} 年資料"))
                    }
                    _ => None,
                };
                self.year = year;
                notice
            }
            FilterChange::TimeRange(time_range) => {
                self.time_range = time_range;
                if time_range.is_all() || self.year.is_all() {
                    None
                } else {
                    self.year = YearFilter::All;
                    Some(format!("已自動切換到「全部年份」以顯示{}資料", time_range.label()))
                }
            }
        }
    }

    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.year.is_all() || self.time_range.is_all()
    }
}
