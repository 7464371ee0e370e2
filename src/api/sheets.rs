//! [Google Sheets values](https://developers.google.com/sheets/api/reference/rest/v4/spreadsheets.values/get) client.

use async_trait::async_trait;
use reqwest::{Client, Url, header::CACHE_CONTROL};
use serde::Deserialize;

use crate::{
    api::{
        client,
        source::{ChargeLogSource, FetchMode},
    },
    core::{ChargeLogEntry, StatisticsEntry, sheet::parse_rows},
    prelude::*,
};

pub const DEFAULT_CHARGE_LOG_RANGE: &str = "ChargedLog";
pub const DEFAULT_STATISTICS_RANGE: &str = "統計!A:H";

const BASE_URL: &str = "https://sheets.googleapis.com/v4";

#[derive(Clone, bon::Builder)]
#[builder(on(String, into))]
pub struct Spreadsheet {
    pub id: String,

    pub api_key: String,

    #[builder(default = DEFAULT_CHARGE_LOG_RANGE.to_owned())]
    pub charge_log_range: String,

    #[builder(default = DEFAULT_STATISTICS_RANGE.to_owned())]
    pub statistics_range: String,
}

pub struct Api {
    client: Client,
    base_url: Url,
    spreadsheet: Spreadsheet,
}

impl Api {
    pub fn try_new(spreadsheet: Spreadsheet) -> Result<Self> {
        Ok(Self { client: client::try_new()?, base_url: Url::parse(BASE_URL)?, spreadsheet })
    }

    fn values_url(&self, range: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("invalid base URL"))?
            .push("spreadsheets")
            .push(&self.spreadsheet.id)
            .push("values")
            .push(range);
        url.query_pairs_mut().append_pair("key", &self.spreadsheet.api_key);
        Ok(url)
    }

    #[instrument(skip_all, fields(range = range, mode = ?mode))]
    async fn get_values(&self, range: &str, mode: FetchMode) -> Result<Vec<Vec<String>>> {
        info!("fetching…");
        let mut request = self.client.get(self.values_url(range)?);
        if mode == FetchMode::Network {
            request = request.header(CACHE_CONTROL, "no-cache");
        }
        let value_range = request
            .send()
            .await
            .context("failed to call")?
            .error_for_status()
            .context("request failed")?
            .json::<ValueRange>()
            .await
            .context("failed to deserialize the response")?;
        info!(n_rows = value_range.values.len(), "fetched");
        Ok(value_range.values)
    }
}

#[async_trait]
impl ChargeLogSource for Api {
    async fn fetch_charge_logs(&self, mode: FetchMode) -> Result<Vec<ChargeLogEntry>> {
        let values = self.get_values(&self.spreadsheet.charge_log_range, mode).await?;
        Ok(parse_rows(&values))
    }

    async fn fetch_statistics(&self, mode: FetchMode) -> Result<Vec<StatisticsEntry>> {
        let values = self.get_values(&self.spreadsheet.statistics_range, mode).await?;
        Ok(parse_rows(&values))
    }
}

#[derive(Deserialize)]
struct ValueRange {
    #[expect(dead_code)]
    range: String,

    #[expect(dead_code)]
    #[serde(rename = "majorDimension")]
    major_dimension: String,

    /// Omitted altogether for an empty sheet.
    #[serde(default)]
    values: Vec<Vec<String>>,
}
