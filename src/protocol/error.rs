//! Structured error bodies.

use serde::{Deserialize, Serialize};

use crate::serialization::json_response;

/// The `{error, description}` body the API attaches to most failures.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorDescription {
    /// Human readable description.
    pub description: String,
    /// Machine readable error code, such as `unauthorized`.
    pub error: String,
}

json_response!(ErrorDescription);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::decode_body;
    use bytes::Bytes;

    #[test]
    fn test_decodes_error_body() {
        let body = Bytes::from_static(br#"{"error":"unauthorized","description":"bad token"}"#);
        let error: ErrorDescription = decode_body(401, body).unwrap().unwrap();
        assert_eq!(error.error, "unauthorized");
        assert_eq!(error.description, "bad token");
    }

    #[test]
    fn test_error_description_is_not_synthesized() {
        let error: Option<ErrorDescription> = decode_body(204, Bytes::new()).unwrap();
        assert!(error.is_none());
    }
}
