use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use tokio::time::Instant;

use crate::{
    api::{ChargeLogSource, FetchMode},
    core::{ChargeLogEntry, ChargeTypeFilter, LogSummary, Period},
    prelude::*,
    view_model::{Flight, lock},
};

/// Automatic refreshes are skipped while the logs are younger than this.
pub const AUTO_REFRESH_INTERVAL: Duration = Duration::from_secs(30 * 60);

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Refresh {
    /// Appearance or return to the foreground, throttled.
    Auto,

    /// Requested by the user, bypasses the throttle and caches.
    Manual,
}

#[derive(Clone, Debug)]
pub struct LogsState {
    pub logs: Vec<ChargeLogEntry>,
    pub is_loading: bool,
    pub error_message: Option<String>,

    /// Completion time of the last successful fetch.
    pub last_fetched_at: Option<Instant>,

    pub period: Period,
    pub charge_type: ChargeTypeFilter,
}

pub struct LogsViewModel {
    source: Arc<dyn ChargeLogSource>,
    state: Arc<Mutex<LogsState>>,
    flight: Flight,
}

impl LogsViewModel {
    pub fn new(source: Arc<dyn ChargeLogSource>, period: Period) -> Self {
        let state = LogsState {
            logs: Vec::new(),
            is_loading: false,
            error_message: None,
            last_fetched_at: None,
            period,
            charge_type: ChargeTypeFilter::All,
        };
        Self { source, state: Arc::new(Mutex::new(state)), flight: Flight::default() }
    }

    #[must_use]
    pub fn state(&self) -> LogsState {
        lock(&self.state).clone()
    }

    pub fn set_period(&self, period: Period) {
        lock(&self.state).period = period;
    }

    pub fn set_charge_type(&self, charge_type: ChargeTypeFilter) {
        lock(&self.state).charge_type = charge_type;
    }

    /// Summary of the current selection, recomputed from the latest logs.
    pub fn summary(&self) -> LogSummary {
        let state = lock(&self.state);
        LogSummary::new(&state.logs, state.period, state.charge_type)
    }

    /// Start fetching the logs, returning whether a fetch got started.
    pub fn refresh(&mut self, refresh: Refresh) -> bool {
        let mode = match refresh {
            Refresh::Auto => {
                let last_fetched_at = lock(&self.state).last_fetched_at;
                if last_fetched_at.is_some_and(|at| at.elapsed() < AUTO_REFRESH_INTERVAL) {
                    debug!("skipped the refresh: the logs are fresh");
                    return false;
                }
                FetchMode::Cached
            }
            Refresh::Manual => FetchMode::Network,
        };
        {
            let mut state = lock(&self.state);
            state.is_loading = true;
            state.error_message = None;
        }
        let source = Arc::clone(&self.source);
        let state = Arc::clone(&self.state);
        self.flight.launch(async move { source.fetch_charge_logs(mode).await }, move |result| {
            let mut state = lock(&state);
            state.is_loading = false;
            match result {
                Ok(logs) => {
                    info!(n_logs = logs.len(), "loaded");
                    state.logs = logs;
                    state.last_fetched_at = Some(Instant::now());
                }
                Err(error) => {
                    warn!("failed to load the logs: {error:#}");
                    state.error_message = Some(format!("{error:#}"));
                }
            }
        });
        true
    }

    /// Wait for the fetch in flight.
    pub async fn settle(&mut self) {
        self.flight.settle().await;
    }

    pub fn enter_background(&mut self) {
        self.flight.cancel();
        lock(&self.state).is_loading = false;
    }

    pub fn enter_foreground(&mut self) -> bool {
        self.refresh(Refresh::Auto)
    }
}
