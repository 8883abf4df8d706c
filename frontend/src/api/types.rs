use leptos::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: SessionUser,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Teacher {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Body of create and update mutations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherPayload {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentCountRow {
    pub teacher_id: String,
    pub enrolled_count: u32,
}

pub type EnrollmentCounts = HashMap<String, u32>;

pub fn counts_by_teacher(rows: Vec<EnrollmentCountRow>) -> EnrollmentCounts {
    rows.into_iter()
        .map(|row| (row.teacher_id, row.enrolled_count))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeacherWithCount {
    pub teacher: Teacher,
    pub enrolled_count: u32,
}

impl TeacherWithCount {
    pub fn id(&self) -> &str {
        &self.teacher.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{error}")]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl From<ApiError> for String {
    fn from(error: ApiError) -> Self {
        error.error
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    fn with_code(msg: impl Into<String>, code: &str) -> Self {
        Self {
            error: msg.into(),
            code: code.to_string(),
            details: None,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "VALIDATION_ERROR")
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "UNKNOWN")
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "REQUEST_FAILED")
    }

    pub fn malformed_response(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "MALFORMED_RESPONSE")
    }

    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "TIMEOUT")
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::with_code(msg, "UNAUTHORIZED")
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self.code.as_str(), "TIMEOUT" | "REQUEST_FAILED")
    }
}

/// Error body as returned by the REST and auth endpoints. The two services
/// disagree on field names, so every known spelling is accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RemoteErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub code: Option<Value>,
    #[serde(default)]
    pub details: Option<Value>,
}

impl RemoteErrorBody {
    pub fn into_api_error(self, fallback: &str) -> ApiError {
        let message = self
            .message
            .or(self.error_description)
            .or(self.msg)
            .or(self.error)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        let code = match self.code {
            Some(Value::String(code)) if !code.is_empty() => code,
            Some(Value::Number(code)) => format!("HTTP_{}", code),
            _ => "REQUEST_FAILED".to_string(),
        };
        ApiError {
            error: message,
            code,
            details: self.details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn teacher_deserializes_without_phone() {
        let teacher: Teacher = serde_json::from_value(json!({
            "id": "t1",
            "name": "Ada",
            "email": "ada@example.com"
        }))
        .unwrap();
        assert!(teacher.phone.is_none());
    }

    #[test]
    fn teacher_requires_email() {
        let result = serde_json::from_value::<Teacher>(json!({ "id": "t1", "name": "Ada" }));
        assert!(result.is_err());
    }

    #[test]
    fn counts_by_teacher_indexes_rows() {
        let counts = counts_by_teacher(vec![
            EnrollmentCountRow {
                teacher_id: "t1".into(),
                enrolled_count: 4,
            },
            EnrollmentCountRow {
                teacher_id: "t2".into(),
                enrolled_count: 0,
            },
        ]);
        assert_eq!(counts.get("t1"), Some(&4));
        assert_eq!(counts.get("t2"), Some(&0));
        assert_eq!(counts.get("t3"), None);
    }

    #[test]
    fn api_error_helpers_set_codes() {
        assert_eq!(ApiError::validation("bad").code, "VALIDATION_ERROR");
        assert_eq!(ApiError::unknown("x").code, "UNKNOWN");
        assert_eq!(ApiError::malformed_response("x").code, "MALFORMED_RESPONSE");
        assert!(ApiError::timeout("slow").is_retryable());
        assert!(!ApiError::validation("bad").is_retryable());
    }

    #[test]
    fn api_error_display_and_string_conversion_match_error_text() {
        let error = ApiError::unknown("boom");
        assert_eq!(format!("{}", error), "boom");

        let raw: String = ApiError::validation("bad input").into();
        assert_eq!(raw, "bad input");
    }

    #[test]
    fn remote_error_body_prefers_message_then_description() {
        let body: RemoteErrorBody = serde_json::from_value(json!({
            "message": "duplicate key value violates unique constraint",
            "code": "23505",
            "details": "Key (email)=(a@b.c) already exists."
        }))
        .unwrap();
        let error = body.into_api_error("fallback");
        assert_eq!(error.code, "23505");
        assert!(error.error.starts_with("duplicate key"));
        assert!(error.details.is_some());

        let body: RemoteErrorBody = serde_json::from_value(json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        }))
        .unwrap();
        let error = body.into_api_error("fallback");
        assert_eq!(error.error, "Invalid login credentials");
        assert_eq!(error.code, "REQUEST_FAILED");
    }

    #[test]
    fn remote_error_body_falls_back_when_empty() {
        let error = RemoteErrorBody::default().into_api_error("Request failed (500)");
        assert_eq!(error.error, "Request failed (500)");
    }
}
