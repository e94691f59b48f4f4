//! Tagged value model for request parameters.
//!
//! Request objects are described to the [`QueryParamsSerializer`] through
//! [`ToParams`], which lowers any value into a [`ParamValue`] tree. Records
//! list their fields in declaration order, so the generated query string is
//! deterministic.
//!
//! Most request types implement [`ToParams`] with [`impl_to_params!`], and
//! API enums are declared with [`wire_enum!`].
//!
//! [`QueryParamsSerializer`]: super::QueryParamsSerializer
//! [`impl_to_params!`]: crate::impl_to_params
//! [`wire_enum!`]: crate::wire_enum

use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;

use chrono::{DateTime, NaiveDateTime, TimeZone};

/// A parameter value ready for query-string serialization.
#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    /// Absent value. Contributes no key at all.
    Null,
    /// A string.
    String(String),
    /// A boolean, formatted as `true`/`false`.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A floating point number.
    Float(f64),
    /// An enum value, carrying the variant identifier (e.g. `InProgress`).
    Enum(&'static str),
    /// A wall-clock timestamp without offset.
    Timestamp(NaiveDateTime),
    /// A duration in whole seconds.
    Duration(i64),
    /// An ordered sequence.
    List(Vec<ParamValue>),
    /// Key/value entries in iteration order.
    Map(Vec<(String, ParamValue)>),
    /// A structured record with named fields.
    Record(Record),
}

/// A structured value: a type name plus its fields in declaration order.
///
/// The type name is used as the formatter key when a record type is
/// registered as a simple value (see [`ValueKind::Record`]).
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    /// The record's type name.
    pub type_name: &'static str,
    /// Field identifiers and values.
    pub fields: Vec<(&'static str, ParamValue)>,
}

impl Record {
    /// Creates an empty record.
    #[must_use]
    pub const fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn field<T: ToParams + ?Sized>(mut self, name: &'static str, value: &T) -> Self {
        self.fields.push((name, value.to_param_value()));
        self
    }
}

/// The formatter lookup key of a leaf value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// [`ParamValue::String`]
    String,
    /// [`ParamValue::Bool`]
    Bool,
    /// [`ParamValue::Int`] and [`ParamValue::UInt`]
    Integer,
    /// [`ParamValue::Float`]
    Float,
    /// [`ParamValue::Enum`]
    Enum,
    /// [`ParamValue::Timestamp`]
    Timestamp,
    /// [`ParamValue::Duration`]
    Duration,
    /// A [`ParamValue::Record`] of the named type.
    Record(&'static str),
}

impl ParamValue {
    /// Returns the formatter key for this value.
    ///
    /// `Null`, `List` and `Map` have no kind of their own.
    #[must_use]
    pub const fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Null | Self::List(_) | Self::Map(_) => None,
            Self::String(_) => Some(ValueKind::String),
            Self::Bool(_) => Some(ValueKind::Bool),
            Self::Int(_) | Self::UInt(_) => Some(ValueKind::Integer),
            Self::Float(_) => Some(ValueKind::Float),
            Self::Enum(_) => Some(ValueKind::Enum),
            Self::Timestamp(_) => Some(ValueKind::Timestamp),
            Self::Duration(_) => Some(ValueKind::Duration),
            Self::Record(record) => Some(ValueKind::Record(record.type_name)),
        }
    }

    /// Returns `true` for [`ParamValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Builds a map value from any key/value iterator, keeping its order.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Display,
        V: ToParams,
        I: IntoIterator<Item = (K, V)>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value.to_param_value()))
                .collect(),
        )
    }
}

/// Lowers a value into the [`ParamValue`] model.
pub trait ToParams {
    /// Returns the parameter representation of `self`.
    fn to_param_value(&self) -> ParamValue;
}

impl ToParams for ParamValue {
    fn to_param_value(&self) -> ParamValue {
        self.clone()
    }
}

impl ToParams for Record {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Record(self.clone())
    }
}

impl<T: ToParams + ?Sized> ToParams for &T {
    fn to_param_value(&self) -> ParamValue {
        (**self).to_param_value()
    }
}

impl<T: ToParams + ?Sized> ToParams for Box<T> {
    fn to_param_value(&self) -> ParamValue {
        (**self).to_param_value()
    }
}

impl<T: ToParams> ToParams for Option<T> {
    fn to_param_value(&self) -> ParamValue {
        self.as_ref().map_or(ParamValue::Null, ToParams::to_param_value)
    }
}

impl ToParams for str {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::String(self.to_string())
    }
}

impl ToParams for String {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::String(self.clone())
    }
}

impl ToParams for bool {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Bool(*self)
    }
}

macro_rules! signed_to_params {
    ($($ty:ty),*) => {$(
        impl ToParams for $ty {
            fn to_param_value(&self) -> ParamValue {
                ParamValue::Int(i64::from(*self))
            }
        }
    )*};
}

macro_rules! unsigned_to_params {
    ($($ty:ty),*) => {$(
        impl ToParams for $ty {
            fn to_param_value(&self) -> ParamValue {
                ParamValue::UInt(u64::from(*self))
            }
        }
    )*};
}

signed_to_params!(i8, i16, i32, i64);
unsigned_to_params!(u8, u16, u32, u64);

impl ToParams for usize {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::UInt(u64::try_from(*self).unwrap_or(u64::MAX))
    }
}

impl ToParams for isize {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Int(i64::try_from(*self).unwrap_or(i64::MAX))
    }
}

impl ToParams for f32 {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Float(f64::from(*self))
    }
}

impl ToParams for f64 {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Float(*self)
    }
}

impl ToParams for NaiveDateTime {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Timestamp(*self)
    }
}

/// Timestamps are formatted as wall-clock time in their own zone.
impl<Tz: TimeZone> ToParams for DateTime<Tz> {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Timestamp(self.naive_local())
    }
}

impl ToParams for chrono::Duration {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Duration(self.num_seconds())
    }
}

impl ToParams for std::time::Duration {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::Duration(i64::try_from(self.as_secs()).unwrap_or(i64::MAX))
    }
}

impl<T: ToParams> ToParams for [T] {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::List(self.iter().map(ToParams::to_param_value).collect())
    }
}

impl<T: ToParams, const N: usize> ToParams for [T; N] {
    fn to_param_value(&self) -> ParamValue {
        self.as_slice().to_param_value()
    }
}

impl<T: ToParams> ToParams for Vec<T> {
    fn to_param_value(&self) -> ParamValue {
        self.as_slice().to_param_value()
    }
}

impl<K: Display, V: ToParams> ToParams for BTreeMap<K, V> {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::map(self.iter())
    }
}

/// Entries are emitted sorted by key so the output is stable.
impl<K: Display, V: ToParams, S> ToParams for HashMap<K, V, S> {
    fn to_param_value(&self) -> ParamValue {
        let mut entries: Vec<(String, ParamValue)> = self
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_param_value()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        ParamValue::Map(entries)
    }
}

impl ToParams for serde_json::Map<String, serde_json::Value> {
    fn to_param_value(&self) -> ParamValue {
        ParamValue::map(self.iter())
    }
}

impl ToParams for serde_json::Value {
    fn to_param_value(&self) -> ParamValue {
        use serde_json::Value;

        match self {
            Value::Null => ParamValue::Null,
            Value::Bool(b) => ParamValue::Bool(*b),
            Value::Number(n) => n
                .as_i64()
                .map(ParamValue::Int)
                .or_else(|| n.as_u64().map(ParamValue::UInt))
                .or_else(|| n.as_f64().map(ParamValue::Float))
                .unwrap_or(ParamValue::Null),
            Value::String(s) => ParamValue::String(s.clone()),
            Value::Array(items) => items.to_param_value(),
            Value::Object(map) => map.to_param_value(),
        }
    }
}

/// Implements [`ToParams`] for a struct by listing its fields in order.
///
/// Each listed field must itself implement [`ToParams`]. Field identifiers
/// are passed through the serializer's naming convention.
///
/// ```rust
/// use disk_api::impl_to_params;
/// use disk_api::serialization::QueryParamsSerializer;
///
/// struct Page {
///     path: String,
///     limit: Option<u32>,
/// }
///
/// impl_to_params!(Page { path, limit });
///
/// let query = QueryParamsSerializer::new().serialize(&Page {
///     path: "/foo".to_string(),
///     limit: None,
/// });
/// assert_eq!(query, "path=%2Ffoo");
/// ```
#[macro_export]
macro_rules! impl_to_params {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl $crate::serialization::ToParams for $ty {
            fn to_param_value(&self) -> $crate::serialization::ParamValue {
                $crate::serialization::ParamValue::Record(
                    $crate::serialization::Record::new(stringify!($ty))
                        $(.field(stringify!($field), &self.$field))*
                )
            }
        }
    };
}

/// Declares an API enum with explicit wire names.
///
/// The generated type:
///
/// - serializes to its wire name in JSON,
/// - deserializes by stripping every `-` from the incoming token and matching
///   the variant identifier case-insensitively (`in-progress` → `InProgress`),
/// - lowers to [`ParamValue::Enum`] for query strings, where it is formatted
///   as the snake_case variant name.
///
/// ```rust
/// use disk_api::wire_enum;
///
/// wire_enum! {
///     /// Sort direction.
///     pub enum Direction {
///         /// Ascending.
///         Ascending => "ascending",
///         /// Descending.
///         Descending => "descending",
///     }
/// }
///
/// assert_eq!(Direction::from_wire("ASCENDING"), Some(Direction::Ascending));
/// assert_eq!(Direction::Descending.wire_name(), "descending");
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Every wire name, in declaration order.
            pub const WIRE_NAMES: &'static [&'static str] = &[$($wire),+];

            /// Returns the wire name of this variant.
            #[must_use]
            pub const fn wire_name(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }

            /// Returns the Rust identifier of this variant.
            #[must_use]
            pub const fn variant_name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }

            /// Parses a wire token, ignoring hyphens and ASCII case.
            #[must_use]
            pub fn from_wire(token: &str) -> Option<Self> {
                $crate::serialization::match_enum_token(token, Self::ALL, Self::variant_name)
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.wire_name())
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                serializer.serialize_str(self.wire_name())
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let token = <::std::string::String as $crate::__private::serde::Deserialize>::deserialize(deserializer)?;
                Self::from_wire(&token).ok_or_else(|| {
                    <D::Error as $crate::__private::serde::de::Error>::unknown_variant(&token, Self::WIRE_NAMES)
                })
            }
        }

        impl $crate::serialization::ToParams for $name {
            fn to_param_value(&self) -> $crate::serialization::ParamValue {
                $crate::serialization::ParamValue::Enum(self.variant_name())
            }
        }
    };
}
