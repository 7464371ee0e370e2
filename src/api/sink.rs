use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use serde_with::{DisplayFromStr, PickFirst, serde_as};

use crate::{core::ChargeRecord, prelude::*};

#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn submit(&self, record: &ChargeRecord) -> Result<SubmissionResponse>;
}

#[must_use]
#[serde_as]
#[derive(Clone, Debug, Default, Deserialize)]
pub struct SubmissionResponse {
    pub status: String,

    /// Application-level code, sent either as a number or as a numeric string.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub code: Option<i64>,

    pub data: Option<Map<String, Value>>,

    #[serde(default)]
    pub message: String,
}

impl SubmissionResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_success() -> Result {
        // language=json
        let response: SubmissionResponse = serde_json::from_str(
            r#"{"status":"success","code":200,"data":{"row":42},"message":"已新增紀錄"}"#,
        )?;
        assert!(response.is_success());
        assert_eq!(response.code, Some(200));
        assert_eq!(response.data.and_then(|data| data.get("row").cloned()), Some(Value::from(42)));
        assert_eq!(response.message, "已新增紀錄");
        Ok(())
    }

    #[test]
    fn test_deserialize_string_code() -> Result {
        // language=json
        let response: SubmissionResponse =
            serde_json::from_str(r#"{"status":"error","code":"400","message":"價格錯誤"}"#)?;
        assert!(!response.is_success());
        assert_eq!(response.code, Some(400));
        assert!(response.data.is_none());
        Ok(())
    }

    #[test]
    fn test_deserialize_minimal() -> Result {
        let response: SubmissionResponse = serde_json::from_str(r#"{"status":"success"}"#)?;
        assert!(response.is_success());
        assert_eq!(response.code, None);
        assert_eq!(response.message, "");
        Ok(())
    }
}
