use async_trait::async_trait;

use crate::{
    core::{ChargeLogEntry, StatisticsEntry},
    prelude::*,
};

/// Whether the transport may answer from its cache.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FetchMode {
    Cached,

    /// Bypass caches, used for the user-initiated refresh.
    Network,
}

#[async_trait]
pub trait ChargeLogSource: Send + Sync {
    async fn fetch_charge_logs(&self, mode: FetchMode) -> Result<Vec<ChargeLogEntry>>;

    async fn fetch_statistics(&self, mode: FetchMode) -> Result<Vec<StatisticsEntry>>;
}
