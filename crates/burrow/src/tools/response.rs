//! The envelope every tool call returns.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::FsError;

/// Kind reported when call arguments fail to deserialize.
pub const INVALID_ARGUMENTS: &str = "invalid_arguments";
/// Kind reported when no tool has the requested name.
pub const UNKNOWN_TOOL: &str = "unknown_tool";

/// Outcome of a tool call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The call succeeded and `response` holds its result
    Ok,
    /// The call failed and `error` says why
    Error,
}

/// Uniform result of a tool call: `{status, error, kind?, response}`.
///
/// Errors are values here, not failures; an agent always gets an envelope
/// back and decides what to do from `status` and `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FsResponse {
    /// `ok` or `error`
    pub status: Status,
    /// Error message, present only on failure
    pub error: Option<String>,
    /// Machine-readable error kind, present only on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Result payload, present only on success
    pub response: Option<Value>,
}

impl FsResponse {
    /// A successful envelope around `value`.
    pub fn ok(value: impl Serialize) -> Self {
        match serde_json::to_value(value) {
            Ok(value) => Self {
                status: Status::Ok,
                error: None,
                kind: None,
                response: Some(value),
            },
            Err(e) => Self::failure("serialization", e.to_string()),
        }
    }

    /// An error envelope for a filesystem error.
    pub fn error(err: &FsError) -> Self {
        Self::failure(err.kind().as_str(), err.to_string())
    }

    /// An error envelope with an explicit kind.
    pub fn failure(kind: &str, message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            error: Some(message.into()),
            kind: Some(kind.to_string()),
            response: None,
        }
    }

    /// Whether the call succeeded.
    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }

    /// Render as a single line of JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(r#"{{"status":"error","error":"{e}","response":null}}"#)
        })
    }
}

impl<T: Serialize> From<Result<T, FsError>> for FsResponse {
    fn from(result: Result<T, FsError>) -> Self {
        match result {
            Ok(value) => Self::ok(value),
            Err(e) => Self::error(&e),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_envelope_shape() {
        let resp = FsResponse::ok(json!({ "name": "" }));
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(
            value,
            json!({ "status": "ok", "error": null, "response": { "name": "" } })
        );
    }

    #[test]
    fn test_error_envelope_shape() {
        let resp = FsResponse::error(&FsError::NotFound("/missing".into()));
        assert!(!resp.is_ok());
        let value = serde_json::to_value(&resp).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["kind"], "not_found");
        assert_eq!(value["error"], "file not found: /missing");
        assert_eq!(value["response"], Value::Null);
    }

    #[test]
    fn test_from_result() {
        let ok: FsResponse = Ok::<_, FsError>(vec![1, 2]).into();
        assert_eq!(ok.response, Some(json!([1, 2])));

        let err: FsResponse = Err::<(), _>(FsError::AlreadyExists("/a".into())).into();
        assert_eq!(err.kind.as_deref(), Some("already_exists"));
    }

    #[test]
    fn test_to_json_is_one_line() {
        let line = FsResponse::failure(UNKNOWN_TOOL, "no tool named fs_rm").to_json();
        assert!(!line.contains('\n'));
        assert!(line.contains("\"kind\":\"unknown_tool\""));
    }
}
