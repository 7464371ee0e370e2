use std::path::PathBuf;

use chrono::{Months, NaiveDate, NaiveDateTime};
use clap::{Parser, Subcommand};
use reqwest::Url;

use crate::{
    api::sheets::{DEFAULT_CHARGE_LOG_RANGE, DEFAULT_STATISTICS_RANGE, Spreadsheet},
    core::{ChargeType, ChargeTypeFilter, Period, TimeRangeFilter, YearFilter},
    preferences::ThemeMode,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    /// User preferences file, created on the first change.
    #[clap(
        long = "preferences-path",
        env = "PREFERENCES_PATH",
        default_value = "preferences.toml"
    )]
    pub preferences_path: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Charging sessions of a period, compared to the preceding period of the same length.
    #[clap(name = "logs")]
    Logs(Box<LogsArgs>),

    /// Monthly statistics and trends.
    #[clap(name = "stats")]
    Statistics(Box<StatisticsArgs>),

    /// Append a charging record to the sheet.
    #[clap(name = "add")]
    Add(Box<AddArgs>),

    /// List the price options, or forget the remembered ones.
    #[clap(name = "prices")]
    Prices(PricesArgs),

    /// Show or change the stored theme mode.
    #[clap(name = "theme")]
    Theme(ThemeArgs),
}

#[derive(Parser)]
pub struct SheetsArgs {
    #[clap(
        long = "google-sheets-api-key",
        env = "GOOGLE_SHEETS_API_KEY",
        hide_env_values = true
    )]
    pub api_key: String,

    #[clap(long = "spreadsheet-id", env = "SPREADSHEET_ID")]
    pub spreadsheet_id: String,

    #[clap(
        long = "charge-log-range",
        env = "CHARGE_LOG_RANGE",
        default_value = DEFAULT_CHARGE_LOG_RANGE
    )]
    pub charge_log_range: String,

    #[clap(
        long = "statistics-range",
        env = "STATISTICS_RANGE",
        default_value = DEFAULT_STATISTICS_RANGE
    )]
    pub statistics_range: String,
}

impl SheetsArgs {
    pub fn spreadsheet(&self) -> Spreadsheet {
        Spreadsheet::builder()
            .id(self.spreadsheet_id.as_str())
            .api_key(self.api_key.as_str())
            .charge_log_range(self.charge_log_range.as_str())
            .statistics_range(self.statistics_range.as_str())
            .build()
    }
}

#[derive(Parser)]
pub struct LogsArgs {
    /// First day to include, defaults to one month before the last day.
    #[clap(long)]
    pub since: Option<NaiveDate>,

    /// Last day to include, defaults to today.
    #[clap(long)]
    pub until: Option<NaiveDate>,

    /// Only show this charge type.
    #[clap(long = "charge-type", value_enum)]
    pub charge_type: Option<ChargeType>,

    /// Keep running and check for new logs this often, for example `5min`.
    ///
    /// Logs younger than half an hour are not refetched.
    #[clap(long)]
    pub watch: Option<humantime::Duration>,

    #[clap(flatten)]
    pub sheets: SheetsArgs,
}

impl LogsArgs {
    #[must_use]
    pub fn period(&self, now: NaiveDateTime) -> Period {
        if self.since.is_none() && self.until.is_none() {
            return Period::last_month(now);
        }
        let until = self.until.unwrap_or_else(|| now.date());
        let since = self
            .since
            .unwrap_or_else(|| until.checked_sub_months(Months::new(1)).unwrap_or(until));
        Period::from_dates(since, until)
    }

    #[must_use]
    pub fn charge_type(&self) -> ChargeTypeFilter {
        self.charge_type.into()
    }
}

#[derive(Parser)]
pub struct StatisticsArgs {
    /// Specific year, or `all`.
    #[clap(long)]
    pub year: Option<YearFilter>,

    #[clap(long = "time-range", value_enum)]
    pub time_range: Option<TimeRangeFilter>,

    /// Bypass caches.
    #[clap(long = "no-cache")]
    pub no_cache: bool,

    /// Keep running and reload this often, for example `1h`.
    #[clap(long)]
    pub watch: Option<humantime::Duration>,

    #[clap(flatten)]
    pub sheets: SheetsArgs,
}

#[derive(Parser)]
pub struct AddArgs {
    /// Price per kilowatt-hour.
    #[clap(long, conflicts_with = "pick")]
    pub price: Option<String>,

    /// Pick the price option by its 1-based position in the `prices` list.
    #[clap(long)]
    pub pick: Option<usize>,

    #[clap(long = "charge-type", value_enum, default_value = "ac")]
    pub charge_type: ChargeType,

    #[clap(long = "webhook-url", env = "CHARGE_RECORD_WEBHOOK_URL")]
    pub webhook_url: Url,
}

#[derive(Parser)]
pub struct PricesArgs {
    /// Forget the remembered custom prices.
    #[clap(long)]
    pub clear: bool,
}

#[derive(Parser)]
pub struct ThemeArgs {
    #[clap(value_enum)]
    pub mode: Option<ThemeMode>,

    /// Switch to the other mode.
    #[clap(long, conflicts_with = "mode")]
    pub toggle: bool,
}
