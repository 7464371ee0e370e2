//! Apps Script webhook which appends a charging record to the sheet.

use async_trait::async_trait;
use reqwest::{Client, Url, header::CONTENT_TYPE};

use crate::{
    api::{
        client,
        sink::{RecordSink, SubmissionResponse},
    },
    core::ChargeRecord,
    prelude::*,
};

pub struct Api {
    client: Client,
    url: Url,
}

impl Api {
    pub fn try_new(url: Url) -> Result<Self> {
        Ok(Self { client: client::try_new()?, url })
    }
}

#[async_trait]
impl RecordSink for Api {
    /// Post the record as a plain-text JSON body, which Apps Script accepts without a preflight.
    #[instrument(skip_all, fields(price = record.price, charge_type = record.charge_type.as_str()))]
    async fn submit(&self, record: &ChargeRecord) -> Result<SubmissionResponse> {
        info!("submitting…");
        let response = self
            .client
            .post(self.url.clone())
            .header(CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(serde_json::to_vec(record)?)
            .send()
            .await
            .context("failed to call")?
            .error_for_status()
            .context("request failed")?
            .json::<SubmissionResponse>()
            .await
            .context("failed to deserialize the response")?;
        debug!(?response, "submitted");
        Ok(response)
    }
}
