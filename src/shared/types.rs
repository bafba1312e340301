use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Uniform response envelope shared by every endpoint.
///
/// Error paths render through the same shape (`success = false`), so clients
/// never have to tolerate per-handler format drift.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_serializes_all_fields() {
        let response = ApiResponse::success(Some(1), Some("ok".to_string()), None);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["data"], 1);
        assert_eq!(value["message"], "ok");
        assert!(value["errors"].is_null());
    }

    #[test]
    fn error_envelope_carries_message_and_errors() {
        let response = ApiResponse::<()>::error(
            Some("name is required".to_string()),
            Some(vec!["name is required".to_string()]),
        );
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], false);
        assert!(value["data"].is_null());
        assert_eq!(value["errors"][0], "name is required");
    }
}
