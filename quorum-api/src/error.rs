use serde_json::Value;

/// Everything that can go wrong with one user-triggered operation.
///
/// Each failed operation surfaces exactly one of these to the user and leaves
/// local state (token maps, session) untouched. Nothing is retried
/// automatically.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The request never completed (DNS, connection reset, ...).
    #[error("network error: {0}")]
    Network(String),

    /// The request outlived the client-side deadline.
    #[error("the request timed out, please try again")]
    Timeout,

    /// Mutation attempted without a session; rejected before any network call.
    #[error("you must be signed in to do this")]
    SignedOut,

    /// Delete attempted without a locally recorded owner token.
    #[error("you can only delete content you created from this browser")]
    NotOwner,

    /// A form field failed local validation.
    #[error("{0}")]
    Invalid(String),
}

impl Error {
    /// Builds the user-facing error for a non-success response, pulling a
    /// human-readable message out of the payload when its shape is one we
    /// recognize.
    pub fn from_status(status: u16, body: &[u8]) -> Error {
        let message = serde_json::from_slice::<Value>(body)
            .ok()
            .and_then(|v| extract_detail(&v))
            .unwrap_or_else(|| format!("the server rejected the request (status {})", status));
        Error::Api { status, message }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Timeout)
    }
}

/// The API reports errors as `{"detail": ...}` where detail is either a plain
/// string or a list of per-field errors carrying a `msg`. Anything else is
/// left for the generic message.
fn extract_detail(v: &Value) -> Option<String> {
    match v.get("detail")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(errors) => {
            let msgs = errors
                .iter()
                .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
                .collect::<Vec<_>>();
            match msgs.is_empty() {
                true => None,
                false => Some(msgs.join("; ")),
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string() {
        let err = Error::from_status(404, br#"{"detail": "Thread not found."}"#);
        assert_eq!(
            err,
            Error::Api {
                status: 404,
                message: String::from("Thread not found."),
            }
        );
        assert_eq!(err.to_string(), "Thread not found.");
    }

    #[test]
    fn detail_field_errors() {
        let body = br#"{"detail": [
            {"loc": ["body", "title"], "msg": "field required", "type": "value_error.missing"},
            {"loc": ["body", "password"], "msg": "too short", "type": "value_error"}
        ]}"#;
        assert_eq!(
            Error::from_status(422, body),
            Error::Api {
                status: 422,
                message: String::from("field required; too short"),
            }
        );
    }

    #[test]
    fn detail_unrecognized_shapes() {
        for body in [
            &br#"{"detail": {"weird": true}}"#[..],
            &br#"{"something": "else"}"#[..],
            &br#"not json at all"#[..],
            &b""[..],
        ] {
            assert_eq!(
                Error::from_status(500, body),
                Error::Api {
                    status: 500,
                    message: String::from("the server rejected the request (status 500)"),
                }
            );
        }
    }

    #[test]
    fn retryable() {
        assert!(Error::Timeout.is_retryable());
        assert!(Error::Network(String::from("boom")).is_retryable());
        assert!(!Error::SignedOut.is_retryable());
        assert!(!Error::from_status(500, b"").is_retryable());
    }
}
