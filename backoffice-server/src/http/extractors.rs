//! Request body decoding for the write routes
//!
//! Handlers take the raw `Bytes` and decode here so that bad input gets
//! the same JSON error body as every other failure, whatever the
//! Content-Type header says.

use axum::body::Bytes;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Decode a JSON request body; an empty or blank body yields `T::default()`.
pub fn parse_body<T>(body: &Bytes, context: &'static str) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| ApiError::bad_request(context, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Body {
        status: Option<String>,
    }

    #[test]
    fn blank_body_is_default() {
        let parsed: Body = parse_body(&Bytes::from_static(b"  \n"), "ctx").unwrap();
        assert_eq!(parsed, Body::default());
    }

    #[test]
    fn decodes_json_object() {
        let parsed: Body = parse_body(&Bytes::from_static(br#"{"status":"read"}"#), "ctx").unwrap();
        assert_eq!(parsed.status.as_deref(), Some("read"));
    }

    #[test]
    fn malformed_json_is_bad_request_with_context() {
        let err = parse_body::<Body>(&Bytes::from_static(b"{bad"), "Error updating message status")
            .unwrap_err();
        match err {
            ApiError::BadRequest { message, error } => {
                assert_eq!(message, "Error updating message status");
                assert!(error.is_some());
            }
            other => panic!("expected bad request, got {other:?}"),
        }
    }
}
