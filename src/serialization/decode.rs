//! Response body decoding.
//!
//! [`FromResponse`] describes how a successful response body becomes a typed
//! value. JSON shapes go through `serde`, raw shapes (`String`, `Vec<u8>`,
//! [`Bytes`], [`ByteStream`]) are passed through without parsing.
//!
//! A `204 No Content` response never reaches the shape's body decoder: it
//! yields [`FromResponse::absent`], which is `None` for everything except
//! protocol objects. Protocol objects carry the HTTP status code of the
//! response that produced them and are synthesized from their `Default`
//! when the body is empty.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::clients::ByteStream;

/// Errors produced while decoding a response body.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not valid JSON for the target shape.
    #[error("Invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// The body is not valid UTF-8.
    #[error("Response body is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// A value was required but the response carried none.
    #[error("Response carried no content")]
    Empty,

    /// A streaming body was handed to a shape that needs a buffered one.
    #[error("Response shape cannot be built from a streaming body")]
    UnexpectedStream,
}

/// A shape a successful response can be decoded into.
pub trait FromResponse: Sized + Send {
    /// When `true` the dispatcher hands over the unbuffered body via
    /// [`FromResponse::from_stream`].
    const STREAMING: bool = false;

    /// Builds the value from a buffered body.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] if the body does not fit the shape.
    fn from_body(status: u16, body: Bytes) -> Result<Option<Self>, DecodeError>;

    /// Builds the value from an unbuffered body.
    ///
    /// # Errors
    ///
    /// The default implementation returns [`DecodeError::UnexpectedStream`].
    fn from_stream(status: u16, body: ByteStream) -> Result<Option<Self>, DecodeError> {
        let _ = (status, body);
        Err(DecodeError::UnexpectedStream)
    }

    /// The value for a response that has no content.
    #[must_use]
    fn absent(status: u16) -> Option<Self> {
        let _ = status;
        None
    }
}

/// A response shape that remembers the HTTP status code that produced it.
pub trait ProtocolObject: Default {
    /// Returns the HTTP status code of the response.
    fn http_status_code(&self) -> u16;

    /// Records the HTTP status code of the response.
    fn set_http_status_code(&mut self, status: u16);

    /// Returns a default instance stamped with `status`.
    #[must_use]
    fn synthesized(status: u16) -> Self {
        let mut value = Self::default();
        value.set_http_status_code(status);
        value
    }
}

/// Decodes a buffered body, applying the no-content rule.
///
/// # Errors
///
/// Returns [`DecodeError`] if the shape's decoder rejects the body.
pub fn decode_body<T: FromResponse>(status: u16, body: Bytes) -> Result<Option<T>, DecodeError> {
    if status == 204 {
        return Ok(T::absent(status));
    }
    T::from_body(status, body)
}

/// Parses a JSON body. An empty body or a literal `null` yields `None`.
///
/// # Errors
///
/// Returns [`DecodeError::Json`] if the body is not valid JSON for `T`.
pub fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, DecodeError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Ok(serde_json::from_slice::<Option<T>>(body)?)
}

/// Finds the variant whose name matches `token`.
///
/// Every `-` is removed from the token before a case-insensitive comparison,
/// so `in-progress` matches `InProgress`.
pub fn match_enum_token<T: Copy>(
    token: &str,
    variants: &[T],
    name: impl Fn(T) -> &'static str,
) -> Option<T> {
    let normalized: String = token.chars().filter(|c| *c != '-').collect();
    variants
        .iter()
        .copied()
        .find(|variant| name(*variant).eq_ignore_ascii_case(&normalized))
}

impl FromResponse for () {
    fn from_body(_status: u16, _body: Bytes) -> Result<Option<Self>, DecodeError> {
        Ok(Some(()))
    }

    fn absent(_status: u16) -> Option<Self> {
        Some(())
    }
}

impl FromResponse for String {
    fn from_body(_status: u16, body: Bytes) -> Result<Option<Self>, DecodeError> {
        Ok(Some(Self::from_utf8(body.to_vec())?))
    }
}

impl FromResponse for Vec<u8> {
    fn from_body(_status: u16, body: Bytes) -> Result<Option<Self>, DecodeError> {
        Ok(Some(body.to_vec()))
    }
}

impl FromResponse for Bytes {
    fn from_body(_status: u16, body: Bytes) -> Result<Option<Self>, DecodeError> {
        Ok(Some(body))
    }
}

impl FromResponse for ByteStream {
    const STREAMING: bool = true;

    fn from_body(_status: u16, body: Bytes) -> Result<Option<Self>, DecodeError> {
        Ok(Some(Box::pin(futures_util::stream::once(async move { Ok(body) }))))
    }

    fn from_stream(status: u16, body: ByteStream) -> Result<Option<Self>, DecodeError> {
        if status == 204 {
            return Ok(None);
        }
        Ok(Some(body))
    }
}

/// Implements [`ProtocolObject`] and [`FromResponse`] for structs with a
/// `http_status_code: u16` field.
macro_rules! protocol_object {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::serialization::ProtocolObject for $ty {
            fn http_status_code(&self) -> u16 {
                self.http_status_code
            }

            fn set_http_status_code(&mut self, status: u16) {
                self.http_status_code = status;
            }
        }

        impl $crate::serialization::FromResponse for $ty {
            fn from_body(
                status: u16,
                body: ::bytes::Bytes,
            ) -> ::std::result::Result<Option<Self>, $crate::serialization::DecodeError> {
                use $crate::serialization::ProtocolObject;

                let mut value = $crate::serialization::decode_json::<Self>(&body)?
                    .unwrap_or_default();
                value.set_http_status_code(status);
                Ok(Some(value))
            }

            fn absent(status: u16) -> Option<Self> {
                Some(<Self as $crate::serialization::ProtocolObject>::synthesized(status))
            }
        }
    )+};
}

/// Implements [`FromResponse`] for plain JSON shapes.
macro_rules! json_response {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::serialization::FromResponse for $ty {
            fn from_body(
                _status: u16,
                body: ::bytes::Bytes,
            ) -> ::std::result::Result<Option<Self>, $crate::serialization::DecodeError> {
                $crate::serialization::decode_json(&body)
            }
        }
    )+};
}

pub(crate) use json_response;
pub(crate) use protocol_object;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq)]
    enum State {
        InProgress,
        Success,
    }

    fn name(state: State) -> &'static str {
        match state {
            State::InProgress => "InProgress",
            State::Success => "Success",
        }
    }

    #[test]
    fn test_enum_token_strips_hyphens() {
        let all = [State::InProgress, State::Success];
        assert_eq!(
            match_enum_token("in-progress", &all, name),
            Some(State::InProgress)
        );
        assert_eq!(match_enum_token("SUCCESS", &all, name), Some(State::Success));
        assert_eq!(match_enum_token("in_progress", &all, name), None);
    }

    #[test]
    fn test_no_content_is_none_for_plain_shapes() {
        let value: Option<String> = decode_body(204, Bytes::from_static(b"ignored")).unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_raw_shapes_skip_json_parsing() {
        let text: Option<String> = decode_body(200, Bytes::from_static(b"not json")).unwrap();
        assert_eq!(text.as_deref(), Some("not json"));

        let raw: Option<Vec<u8>> = decode_body(200, Bytes::from_static(b"\x00\x01")).unwrap();
        assert_eq!(raw, Some(vec![0, 1]));
    }

    #[test]
    fn test_decode_json_treats_blank_and_null_as_none() {
        assert!(decode_json::<serde_json::Value>(b"").unwrap().is_none());
        assert!(decode_json::<serde_json::Value>(b"  \n").unwrap().is_none());
        assert!(decode_json::<Vec<u8>>(b"null").unwrap().is_none());
        assert!(decode_json::<Vec<u8>>(b"{").is_err());
    }
}
