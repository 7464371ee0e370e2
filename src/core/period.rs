use std::fmt::{Debug, Display, Formatter};

use chrono::{Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Period {
    /// Inclusive.
    pub start: NaiveDateTime,

    /// Inclusive.
    pub end: NaiveDateTime,
}

impl Debug for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..={:?}", self.start, self.end)
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ~ {}", self.start.format("%Y/%m/%d"), self.end.format("%Y/%m/%d"))
    }
}

impl Period {
    pub const fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// One calendar month until `now`.
    pub fn last_month(now: NaiveDateTime) -> Self {
        Self::new(now.checked_sub_months(Months::new(1)).unwrap_or(now), now)
    }

    /// Whole days from the beginning of `since` till the end of `until`.
    pub fn from_dates(since: NaiveDate, until: NaiveDate) -> Self {
        let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
        Self::new(since.and_time(NaiveTime::MIN), until.and_time(end_of_day))
    }

    #[must_use]
    pub fn duration(self) -> TimeDelta {
        self.end - self.start
    }

    #[must_use]
    pub fn contains(self, timestamp: NaiveDateTime) -> bool {
        (self.start <= timestamp) && (timestamp <= self.end)
    }

    /// Period of the same duration which ends right before this one starts.
    pub fn previous(self) -> Self {
        Self::new(self.start - self.duration(), self.start - TimeDelta::seconds(1))
    }
}
