//! The `{success, data, message}` wrapper the store API puts around bodies.

use crate::FetchError;
use serde::Deserialize;

const DEFAULT_FAILURE: &str = "Request was not successful";

/// Response envelope.
///
/// A missing `success` field is read as `true`; some endpoints only send
/// `data`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

fn default_success() -> bool {
    true
}

impl<T> ApiEnvelope<T> {
    /// The payload, or `ApiError` when the server flagged the call as failed.
    pub fn into_data(self) -> Result<Option<T>, FetchError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(FetchError::ApiError(
                self.message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_FAILURE.to_string()),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_success_is_true() {
        let env: ApiEnvelope<u32> = serde_json::from_str(r#"{"data": 7}"#).unwrap();
        assert_eq!(env.into_data(), Ok(Some(7)));
    }

    #[test]
    fn test_failure_without_message() {
        let env: ApiEnvelope<u32> = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(
            env.into_data(),
            Err(FetchError::ApiError(DEFAULT_FAILURE.to_string()))
        );
    }

    // Payload types need not implement Default.
    #[derive(Debug, PartialEq, Deserialize)]
    struct Ack {
        id: String,
    }

    #[test]
    fn test_missing_data_without_default_payload() {
        let env: ApiEnvelope<Ack> = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert_eq!(env.into_data(), Ok(None));

        let env: ApiEnvelope<Ack> =
            serde_json::from_str(r#"{"success": true, "data": {"id": "ORD-1"}}"#).unwrap();
        assert_eq!(
            env.into_data(),
            Ok(Some(Ack {
                id: "ORD-1".to_string()
            }))
        );
    }

    #[test]
    fn test_null_data() {
        let env: ApiEnvelope<Vec<u32>> =
            serde_json::from_str(r#"{"success": true, "data": null}"#).unwrap();
        assert_eq!(env.into_data(), Ok(None));
    }
}
