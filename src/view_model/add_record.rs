use crate::{
    api::RecordSink,
    core::{
        ChargeRecord,
        ChargeType,
        SubmitError,
        price::format_price,
        submission::{can_submit, parse_price},
    },
    preferences::Preferences,
    prelude::*,
};

/// Form for appending a charging record.
#[derive(Clone, Debug, Default)]
pub struct AddRecordViewModel {
    pub price_text: String,
    pub charge_type: ChargeType,
    is_loading: bool,
    error_message: Option<String>,
    success_message: Option<String>,
    price_options: Vec<f64>,
}

impl AddRecordViewModel {
    pub fn new(preferences: &Preferences) -> Self {
        Self { price_options: preferences.price_options(), ..Self::default() }
    }

    #[must_use]
    pub fn price(&self) -> Option<f64> {
        parse_price(&self.price_text)
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        can_submit(&self.price_text, self.is_loading)
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    #[must_use]
    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    #[must_use]
    pub fn price_options(&self) -> &[f64] {
        &self.price_options
    }

    pub fn select_price(&mut self, price: f64) {
        self.price_text = format_price(price);
    }

    /// Submit the form, returning the server message on success.
    ///
    /// A successfully submitted price is remembered as a custom price option.
    #[instrument(
        skip_all,
        fields(price = %self.price_text, charge_type = self.charge_type.as_str()),
    )]
    pub async fn submit(
        &mut self,
        sink: &dyn RecordSink,
        preferences: &mut Preferences,
    ) -> Result<String, SubmitError> {
        self.error_message = None;
        self.success_message = None;
        let result = match ChargeRecord::try_new(&self.price_text, self.charge_type) {
            Ok(record) if !self.is_loading => {
                self.is_loading = true;
                let result = self.submit_record(sink, preferences, record).await;
                self.is_loading = false;
                result
            }
            _ => Err(SubmitError::InvalidPrice),
        };
        match &result {
            Ok(message) => {
                info!(%message, "submitted");
                self.success_message = Some(message.clone());
            }
            Err(error) => {
                warn!(%error, "failed to submit");
                self.error_message = Some(error.to_string());
            }
        }
        result
    }

    async fn submit_record(
        &mut self,
        sink: &dyn RecordSink,
        preferences: &mut Preferences,
        record: ChargeRecord,
    ) -> Result<String, SubmitError> {
        let response = sink.submit(&record).await.map_err(|error| {
            warn!("failed to call the webhook: {error:#}");
            SubmitError::Network
        })?;
        debug!(
            status = %response.status,
            code = ?response.code,
            data = ?response.data,
            "webhook responded",
        );
        if !response.is_success() {
            return Err(SubmitError::Rejected(response.message));
        }
        preferences.add_custom_price(record.price);
        self.price_options = preferences.price_options();
        Ok(response.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_model::fakes::FakeSink;

    #[tokio::test]
    async fn test_submit_ok() {
        let sink = FakeSink::responding("success", "已新增紀錄");
        let mut preferences = Preferences::in_memory();
        let mut view_model = AddRecordViewModel::new(&preferences);
        view_model.price_text = "5.5".to_owned();
        view_model.charge_type = ChargeType::J1772;

        let result = view_model.submit(&sink, &mut preferences).await;

        assert_eq!(result.as_deref(), Ok("已新增紀錄"));
        assert_eq!(view_model.success_message(), Some("已新增紀錄"));
        assert_eq!(view_model.error_message(), None);
        assert!(!view_model.is_loading);
        assert!(view_model.price_options().contains(&5.5));
        assert!(preferences.custom_prices().contains(5.5));
        assert_eq!(sink.records(), [ChargeRecord::new(5.5, ChargeType::J1772)]);
    }

    #[tokio::test]
    async fn test_submit_invalid_price() {
        let sink = FakeSink::responding("success", "");
        let mut preferences = Preferences::in_memory();
        let mut view_model = AddRecordViewModel::new(&preferences);
        view_model.price_text = "0".to_owned();

        let result = view_model.submit(&sink, &mut preferences).await;

        assert_eq!(result, Err(SubmitError::InvalidPrice));
        assert_eq!(view_model.error_message(), Some("請輸入有效的價格"));
        assert!(sink.records().is_empty());
    }

    #[tokio::test]
    async fn test_submit_rejected() {
        let sink = FakeSink::responding("error", "試算表已鎖定");
        let mut preferences = Preferences::in_memory();
        let mut view_model = AddRecordViewModel::new(&preferences);
        view_model.select_price(6.25);

        let result = view_model.submit(&sink, &mut preferences).await;

        assert_eq!(result, Err(SubmitError::Rejected("試算表已鎖定".to_owned())));
        assert_eq!(view_model.error_message(), Some("試算表已鎖定"));
        assert!(!view_model.is_loading);
        assert!(preferences.custom_prices().is_empty());
    }

    #[tokio::test]
    async fn test_submit_network_failure() {
        let sink = FakeSink::unreachable();
        let mut preferences = Preferences::in_memory();
        let mut view_model = AddRecordViewModel::new(&preferences);
        view_model.select_price(3.0);

        let result = view_model.submit(&sink, &mut preferences).await;

        assert_eq!(result, Err(SubmitError::Network));
        assert_eq!(view_model.error_message(), Some("網路連線失敗，請檢查網路後重試"));
        assert!(!view_model.is_loading);
    }

    #[test]
    fn test_select_price() {
        let mut view_model = AddRecordViewModel::new(&Preferences::in_memory());
        assert_eq!(view_model.price_options().len(), 5);
        view_model.select_price(7.0);
        assert_eq!(view_model.price_text, "7");
        view_model.select_price(3.5);
        assert_eq!(view_model.price_text, "3.5");
        assert_eq!(view_model.price(), Some(3.5));
        assert!(view_model.can_submit());
    }
}
