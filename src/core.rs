pub mod charge_type;
pub mod filters;
pub mod log_entry;
pub mod log_summary;
pub mod period;
pub mod price;
pub mod series;
pub mod sheet;
pub mod statistics_entry;
pub mod statistics_report;
pub mod submission;

pub use self::{
    charge_type::{ChargeType, ChargeTypeFilter},
    filters::StatisticsFilters,
    log_entry::ChargeLogEntry,
    log_summary::LogSummary,
    period::Period,
    price::CustomPrices,
    series::Point,
    statistics_entry::StatisticsEntry,
    statistics_report::{StatisticsReport, TimeRangeFilter, YearFilter},
    submission::{ChargeRecord, SubmitError},
};
