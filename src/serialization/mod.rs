//! Parameter and response serialization.
//!
//! - [`naming`]: wire naming conventions for field identifiers
//! - [`ParamValue`] / [`ToParams`]: the value model request objects lower into
//! - [`QueryParamsSerializer`]: builds percent-encoded query strings
//! - [`FormatterRegistry`]: per-serializer leaf formatters
//! - [`FromResponse`]: typed decoding of response bodies

mod decode;
mod format;
pub mod naming;
mod query;
mod value;

pub use decode::{
    decode_body, decode_json, match_enum_token, DecodeError, FromResponse, ProtocolObject,
};
pub(crate) use decode::{json_response, protocol_object};
pub use format::{
    DefaultFormatter, DurationFormatter, FormatterRegistry, TimestampFormatter, ValueFormatter,
    TIMESTAMP_FORMAT,
};
pub use naming::{to_camel_case, to_snake_case, CamelCase, Identity, NamingConvention, SnakeCase};
pub use query::QueryParamsSerializer;
pub use value::{ParamValue, Record, ToParams, ValueKind};
