//! The `{success, data?, error?, message?}` wrapper every response uses.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::http::HttpResponse;

/// Raw envelope as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            message: None,
        }
    }

    /// Collapse into `Ok(data)` or the rejection. Only `error` is carried into
    /// the rejection; `message` is informational and never shown as a failure.
    pub fn into_result(self, status: u16) -> Result<Option<T>, ApiError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(ApiError::Rejected {
                status,
                message: self.error,
            })
        }
    }
}

/// Decode a response body as an envelope.
///
/// A body that is not an envelope is an `Http` error for non-2xx statuses
/// and a `Deserialization` error otherwise.
pub fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<Option<T>, ApiError> {
    match serde_json::from_str::<Envelope<T>>(&response.body) {
        Ok(envelope) => envelope.into_result(response.status),
        Err(_) if !response.is_success() => Err(ApiError::Http {
            status: response.status,
            body: response.body.clone(),
        }),
        Err(e) => Err(ApiError::Deserialization(e.to_string())),
    }
}

/// Like `decode`, but a successful envelope must carry `data`.
pub fn decode_data<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    decode(response)?.ok_or(ApiError::MissingData)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_with_data() {
        let resp = HttpResponse::new(200, r#"{"success":true,"data":[1,2,3]}"#);
        let data: Vec<u32> = decode_data(&resp).unwrap();
        assert_eq!(data, vec![1, 2, 3]);
    }

    #[test]
    fn success_without_data_is_missing_data() {
        let resp = HttpResponse::new(200, r#"{"success":true}"#);
        let err = decode_data::<Vec<u32>>(&resp).unwrap_err();
        assert_eq!(err, ApiError::MissingData);
        assert_eq!(decode::<Vec<u32>>(&resp).unwrap(), None);
    }

    #[test]
    fn failure_prefers_error_over_message() {
        let resp = HttpResponse::new(
            500,
            r#"{"success":false,"error":"db down","message":"try later"}"#,
        );
        let err = decode::<u32>(&resp).unwrap_err();
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 500,
                message: Some("db down".to_string())
            }
        );
    }

    #[test]
    fn failure_ignores_message_field() {
        let resp = HttpResponse::new(200, r#"{"success":false,"message":"try later"}"#);
        let err = decode::<u32>(&resp).unwrap_err();
        assert_eq!(
            err,
            ApiError::Rejected {
                status: 200,
                message: None
            }
        );
    }

    #[test]
    fn non_envelope_error_body_is_http_error() {
        let resp = HttpResponse::new(502, "Bad Gateway");
        let err = decode::<u32>(&resp).unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 502,
                body: "Bad Gateway".to_string()
            }
        );
    }

    #[test]
    fn non_envelope_success_body_is_deserialization_error() {
        let resp = HttpResponse::new(200, "[1,2,3]");
        assert!(matches!(
            decode::<Vec<u32>>(&resp),
            Err(ApiError::Deserialization(_))
        ));
    }
}
