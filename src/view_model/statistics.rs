use std::sync::{Arc, Mutex};

use crate::{
    api::{ChargeLogSource, FetchMode},
    core::{
        StatisticsEntry,
        StatisticsFilters,
        StatisticsReport,
        TimeRangeFilter,
        YearFilter,
        filters::FilterChange,
        statistics_report::available_years,
    },
    prelude::*,
    view_model::{Flight, Notice, lock},
};

#[derive(Clone, Debug, Default)]
pub struct StatisticsState {
    pub statistics: Vec<StatisticsEntry>,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub filters: StatisticsFilters,
}

pub struct StatisticsViewModel {
    source: Arc<dyn ChargeLogSource>,
    state: Arc<Mutex<StatisticsState>>,
    flight: Flight,
    notice: Notice,
}

impl StatisticsViewModel {
    pub fn new(source: Arc<dyn ChargeLogSource>) -> Self {
        Self {
            source,
            state: Arc::default(),
            flight: Flight::default(),
            notice: Notice::default(),
        }
    }

    /// Show the last 6 months of all years.
    ///
    /// The initial selection is the current year, which already switches the time range to «all»
    /// and leaves a notice. Then the dashboard defaults are forced one by one, each write
    /// reloading.
    pub fn mount(&mut self, current_year: i32) {
        self.switch(FilterChange::Year(YearFilter::Year(current_year.to_string())));
        self.change(FilterChange::Year(YearFilter::All));
        self.change(FilterChange::TimeRange(TimeRangeFilter::SixMonths));
    }

    pub fn set_year(&mut self, year: YearFilter) {
        self.change(FilterChange::Year(year));
    }

    pub fn set_time_range(&mut self, time_range: TimeRangeFilter) {
        self.change(FilterChange::TimeRange(time_range));
    }

    fn change(&mut self, change: FilterChange) {
        self.switch(change);
        self.reload();
    }

    fn switch(&mut self, change: FilterChange) {
        let notice = {
            let mut state = lock(&self.state);
            let notice = state.filters.apply(change);
            debug_assert!(state.filters.is_consistent());
            notice
        };
        if let Some(notice) = notice {
            info!(%notice, "switched the filters");
            self.notice.show(notice);
        }
    }

    /// Load, allowing cached responses.
    pub fn reload(&mut self) {
        self.load(FetchMode::Cached);
    }

    /// Load, bypassing caches.
    pub fn refresh(&mut self) {
        self.load(FetchMode::Network);
    }

    fn load(&mut self, mode: FetchMode) {
        let selected_year = {
            let mut state = lock(&self.state);
            state.is_loading = true;
            state.error_message = None;
            state.filters.year.clone()
        };
        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        self.flight.launch(fetch(source, mode, selected_year), move |result| {
            let mut state = lock(&state);
            state.is_loading = false;
            match result {
                Ok((statistics, fallback_year)) => {
                    info!(n_entries = statistics.len(), "loaded");
                    if let Some(year) = fallback_year {
                        state.filters.year = year;
                    }
                    state.statistics = statistics;
                }
                Err(error) => {
                    warn!("failed to load the statistics: {error:#}");
                    state.error_message = Some(format!("{error:#}"));
                }
            }
        });
    }

    /// Wait for the fetch in flight.
    pub async fn settle(&mut self) {
        self.flight.settle().await;
    }

    pub fn enter_background(&mut self) {
        self.flight.cancel();
        self.notice.cancel();
        lock(&self.state).is_loading = false;
    }

    pub fn enter_foreground(&mut self) {
        self.reload();
    }

    #[must_use]
    pub fn state(&self) -> StatisticsState {
        lock(&self.state).clone()
    }

    #[must_use]
    pub fn filters(&self) -> StatisticsFilters {
        lock(&self.state).filters.clone()
    }

    #[must_use]
    pub fn notice(&self) -> Option<String> {
        self.notice.text()
    }

    /// Years to pick from, the first one being «all».
    #[must_use]
    pub fn available_years(&self) -> Vec<YearFilter> {
        available_years(&lock(&self.state).statistics)
    }

    pub fn report(&self) -> StatisticsReport {
        let state = lock(&self.state);
        StatisticsReport::new(&state.statistics, &state.filters.year, state.filters.time_range)
    }
}

/// Fetch the statistics, falling back to «all» years when the selected one has no data.
///
/// The fallback is a year change of its own, so it fetches again.
async fn fetch(
    source: Arc<dyn ChargeLogSource>,
    mode: FetchMode,
    selected_year: YearFilter,
) -> Result<(Vec<StatisticsEntry>, Option<YearFilter>)> {
    let statistics = source.fetch_statistics(mode).await?;
    if available_years(&statistics).contains(&selected_year) {
        return Ok((statistics, None));
    }
    warn!(year = %selected_year, "the selected year is not available");
    let statistics = source.fetch_statistics(FetchMode::Cached).await?;
    Ok((statistics, Some(YearFilter::All)))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::advance;

    use super::*;
    use crate::view_model::{fakes::FakeSource, notice::NOTICE_LIFETIME};

    fn month(year: &str, month: u32) -> StatisticsEntry {
        StatisticsEntry::builder()
            .year(year)
            .month(month.to_string())
            .charged_kwh("100")
            .total_cost("300")
            .build()
    }

    fn statistics() -> Vec<StatisticsEntry> {
        let mut statistics: Vec<_> = (1..=12).map(|n| month("2023", n)).collect();
        statistics.extend((1..=3).map(|n| month("2024", n)));
        statistics
    }

    fn year(year: &str) -> YearFilter {
        YearFilter::Year(year.to_owned())
    }

    fn responses(n: usize) -> Vec<(Duration, Result<Vec<StatisticsEntry>, String>)> {
        (0..n).map(|_| (Duration::ZERO, Ok(statistics()))).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_mount() {
        let source = FakeSource::with_statistics(responses(3));
        let mut view_model = StatisticsViewModel::new(source.clone());

        view_model.mount(2024);
        assert_eq!(
            view_model.notice().as_deref(),
            Some("已自動切換到「全部時間範圍」以顯示 2024 年資料"),
        );
        view_model.settle().await;

        let filters = view_model.filters();
        assert_eq!(filters.year, YearFilter::All);
        assert_eq!(filters.time_range, TimeRangeFilter::SixMonths);
        let report = view_model.report();
        let labels: Vec<_> = report.monthly_energy().map(|(label, _)| label).collect();
        assert_eq!(labels, ["23/10", "23/11", "23/12", "24/1", "24/2", "24/3"]);
        assert_eq!(view_model.available_years(), [YearFilter::All, year("2024"), year("2023")]);
        assert!(!source.statistics.modes().is_empty());
        assert!(source.statistics.modes().iter().all(|mode| *mode == FetchMode::Cached));

        advance(NOTICE_LIFETIME).await;
        view_model.notice.settle().await;
        assert_eq!(view_model.notice(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unavailable_year_falls_back() {
        let source = FakeSource::with_statistics(responses(5));
        let mut view_model = StatisticsViewModel::new(source.clone());
        view_model.mount(2024);
        view_model.settle().await;
        let n_fetches = source.statistics.modes().len();

        view_model.set_year(year("2025"));
        view_model.settle().await;

        assert_eq!(view_model.filters().year, YearFilter::All);
        assert_eq!(view_model.filters().time_range, TimeRangeFilter::All);
        assert_eq!(view_model.report().entries().len(), 15);
        assert_eq!(source.statistics.modes().len(), n_fetches + 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_filters_exclude_each_other() {
        let source = FakeSource::with_statistics(responses(5));
        let mut view_model = StatisticsViewModel::new(source.clone());
        view_model.mount(2024);
        view_model.settle().await;
        let n_fetches = source.statistics.modes().len();

        view_model.set_year(year("2023"));
        assert_eq!(
            view_model.notice().as_deref(),
            Some("已自動切換到「全部時間範圍」以顯示 2023 年資料"),
        );
        view_model.settle().await;
        assert_eq!(view_model.report().entries().len(), 12);

        view_model.set_time_range(TimeRangeFilter::ThreeMonths);
        assert_eq!(
            view_model.notice().as_deref(),
            Some("已自動切換到「全部年份」以顯示近 3 個月資料"),
        );
        view_model.settle().await;

        let report = view_model.report();
        let labels: Vec<_> = report.monthly_energy().map(|(label, _)| label).collect();
        assert_eq!(labels, ["1", "2", "3"]);
        assert_eq!(source.statistics.modes().len(), n_fetches + 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_refresh_and_error() {
        let source = FakeSource::with_statistics([
            (Duration::ZERO, Ok(statistics())),
            (Duration::ZERO, Err("quota exceeded".to_owned())),
        ]);
        let mut view_model = StatisticsViewModel::new(source.clone());
        view_model.reload();
        view_model.settle().await;
        view_model.refresh();
        view_model.settle().await;

        let state = view_model.state();
        assert_eq!(state.error_message.as_deref(), Some("quota exceeded"));
        assert_eq!(state.statistics.len(), 15);
        assert!(!state.is_loading);
        assert_eq!(source.statistics.modes(), [FetchMode::Cached, FetchMode::Network]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_background() {
        let source = FakeSource::with_statistics(responses(4));
        let mut view_model = StatisticsViewModel::new(source.clone());
        view_model.mount(2023);
        view_model.enter_background();
        view_model.settle().await;

        let state = view_model.state();
        assert!(!state.is_loading);
        assert!(state.statistics.is_empty());
        assert_eq!(view_model.notice(), None);

        view_model.enter_foreground();
        view_model.settle().await;
        assert_eq!(view_model.report().entries().len(), 6);
    }
}
