use chrono::{DateTime, Utc};
use serde::Serialize;

pub const SUCCESS: &str = "SUCCESS";

/// Envelope shared by every `/api` response.
#[derive(Serialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: SUCCESS.to_string(),
            message: None,
            data: Some(data),
            timestamp: Utc::now(),
        }
    }

    pub fn success_with_message(data: T, message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
            ..Self::success(data)
        }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            code: code.to_string(),
            message: Some(message.to_string()),
            data: None,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_has_no_data() {
        let json = serde_json::to_value(ApiResponse::<()>::error("COMMON_006", "missing")).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["code"], "COMMON_006");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_success_envelope() {
        let json = serde_json::to_value(ApiResponse::success_with_message(vec![1, 2], "ok")).unwrap();

        assert_eq!(json["code"], SUCCESS);
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert_eq!(json["message"], "ok");
    }
}
