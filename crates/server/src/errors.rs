use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use service::form::FieldErrors;

/// JSON error envelope: `message` is user-facing, `detail` carries the
/// underlying cause, `errors` holds field-level validation messages.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<String>,
    pub errors: Option<FieldErrors>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>, detail: Option<String>) -> Self {
        Self { status, message: message.into(), detail, errors: None }
    }

    pub fn validation(errors: FieldErrors) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "Please correct the errors before submitting.".into(),
            detail: None,
            errors: Some(errors),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = serde_json::json!({ "message": self.message });
        if let Some(detail) = self.detail {
            body["detail"] = serde_json::Value::String(detail);
        }
        if let Some(errors) = self.errors {
            body["errors"] = serde_json::json!(errors);
        }
        (self.status, Json(body)).into_response()
    }
}
