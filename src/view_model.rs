//! Presentation state holders.
//!
//! Fetches run as spawned tasks. Each holder keeps at most one fetch in flight: a new fetch aborts
//! the previous one, and results of superseded fetches are dropped, errors included.

pub mod add_record;
pub mod logs;
pub mod notice;
pub mod statistics;

use std::sync::{
    Arc,
    Mutex,
    MutexGuard,
    PoisonError,
    atomic::{AtomicU64, Ordering},
};

use tokio::task::JoinHandle;

pub use self::{
    add_record::AddRecordViewModel,
    logs::{LogsViewModel, Refresh},
    notice::Notice,
    statistics::StatisticsViewModel,
};
use crate::prelude::*;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Single-flight background task.
#[derive(Default)]
pub struct Flight {
    generation: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl Flight {
    /// Spawn `task` and pass its output to `apply`, unless the flight gets relaunched or cancelled
    /// in the meantime.
    pub fn launch<T, F, A>(&mut self, task: F, apply: A)
    where
        T: Send + 'static,
        F: Future<Output = T> + Send + 'static,
        A: FnOnce(T) + Send + 'static,
    {
        self.cancel();
        let generation = self.generation.load(Ordering::SeqCst);
        let current_generation = Arc::clone(&self.generation);
        self.handle = Some(tokio::spawn(async move {
            let output = task.await;
            if current_generation.load(Ordering::SeqCst) == generation {
                apply(output);
            } else {
                debug!(generation, "dropped a superseded result");
            }
        }));
    }

    /// Abort the task in flight, returning whether there was one.
    pub fn cancel(&mut self) -> bool {
        self.generation.fetch_add(1, Ordering::SeqCst);
        let Some(handle) = self.handle.take() else {
            return false;
        };
        let is_running = !handle.is_finished();
        handle.abort();
        if is_running {
            debug!("cancelled");
        }
        is_running
    }

    /// Wait until the task in flight, if any, finishes.
    pub async fn settle(&mut self) {
        if let Some(handle) = self.handle.take()
            && let Err(error) = handle.await
            && !error.is_cancelled()
        {
            error!("the task failed: {error}");
        }
    }
}

impl Drop for Flight {
    fn drop(&mut self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

#[cfg(test)]
pub mod fakes {
    use std::{collections::VecDeque, time::Duration};

    use async_trait::async_trait;
    use tokio::time::sleep;

    use super::*;
    use crate::{
        api::{ChargeLogSource, FetchMode, RecordSink, sink::SubmissionResponse},
        core::{ChargeLogEntry, ChargeRecord, StatisticsEntry},
    };

    /// Responses played back in order, each after its delay.
    pub struct Script<T> {
        responses: Mutex<VecDeque<(Duration, Result<T, String>)>>,
        modes: Mutex<Vec<FetchMode>>,
    }

    impl<T> Script<T> {
        pub fn new(responses: impl IntoIterator<Item = (Duration, Result<T, String>)>) -> Self {
            Self { responses: Mutex::new(responses.into_iter().collect()), modes: Mutex::default() }
        }

        async fn play(&self, mode: FetchMode) -> Result<T> {
            lock(&self.modes).push(mode);
            let (delay, response) =
                lock(&self.responses).pop_front().context("no more scripted responses")?;
            sleep(delay).await;
            response.map_err(Error::msg)
        }

        pub fn modes(&self) -> Vec<FetchMode> {
            lock(&self.modes).clone()
        }
    }

    pub struct FakeSource {
        pub charge_logs: Script<Vec<ChargeLogEntry>>,
        pub statistics: Script<Vec<StatisticsEntry>>,
    }

    impl FakeSource {
        pub fn with_charge_logs(
            responses: impl IntoIterator<Item = (Duration, Result<Vec<ChargeLogEntry>, String>)>,
        ) -> Arc<Self> {
            Arc::new(Self { charge_logs: Script::new(responses), statistics: Script::new([]) })
        }

        pub fn with_statistics(
            responses: impl IntoIterator<Item = (Duration, Result<Vec<StatisticsEntry>, String>)>,
        ) -> Arc<Self> {
            Arc::new(Self { charge_logs: Script::new([]), statistics: Script::new(responses) })
        }
    }

    #[async_trait]
    impl ChargeLogSource for FakeSource {
        async fn fetch_charge_logs(&self, mode: FetchMode) -> Result<Vec<ChargeLogEntry>> {
            self.charge_logs.play(mode).await
        }

        async fn fetch_statistics(&self, mode: FetchMode) -> Result<Vec<StatisticsEntry>> {
            self.statistics.play(mode).await
        }
    }

    /// Webhook stand-in, `None` simulates a transport failure.
    pub struct FakeSink {
        response: Option<SubmissionResponse>,
        records: Mutex<Vec<ChargeRecord>>,
    }

    impl FakeSink {
        pub fn responding(status: &str, message: &str) -> Self {
            let response = SubmissionResponse {
                status: status.to_owned(),
                message: message.to_owned(),
                ..SubmissionResponse::default()
            };
            Self { response: Some(response), records: Mutex::default() }
        }

        pub fn unreachable() -> Self {
            Self { response: None, records: Mutex::default() }
        }

        pub fn records(&self) -> Vec<ChargeRecord> {
            lock(&self.records).clone()
        }
    }

    #[async_trait]
    impl RecordSink for FakeSink {
        async fn submit(&self, record: &ChargeRecord) -> Result<SubmissionResponse> {
            lock(&self.records).push(*record);
            self.response.clone().context("connection refused")
        }
    }
}
