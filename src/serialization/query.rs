//! Query-string serialization.

use std::fmt;
use std::sync::Arc;

use super::format::{FormatterRegistry, ValueFormatter};
use super::naming::{NamingConvention, SnakeCase};
use super::value::{ParamValue, ToParams, ValueKind};

/// Converts parameter objects into percent-encoded query strings.
///
/// The walk follows a fixed priority: map, list of simple values, other
/// list, record, leaf.
///
/// - `Null` contributes nothing
/// - map entries become `prefix[key]`, keys emitted verbatim
/// - a list whose elements are all simple becomes one leaf,
///   `"v1,v2"` including the literal double quotes
/// - any other list recurses with `prefix[index]`
/// - record fields become `prefix.field`, or just `field` at the root,
///   with the field name run through the naming convention
///
/// Keys and values are percent-encoded independently and joined with `&`.
///
/// Each serializer owns its formatter registry; configure it before sharing
/// the instance.
///
/// # Example
///
/// ```rust
/// use disk_api::protocol::{FilesResourceRequest, MediaType};
/// use disk_api::serialization::QueryParamsSerializer;
///
/// let request = FilesResourceRequest {
///     media_type: Some(vec![MediaType::Audio, MediaType::Compressed]),
///     limit: Some(30),
///     offset: None,
/// };
/// assert_eq!(
///     QueryParamsSerializer::new().serialize(&request),
///     "media_type=%22audio%2Ccompressed%22&limit=30"
/// );
/// ```
#[derive(Clone)]
pub struct QueryParamsSerializer {
    naming: Arc<dyn NamingConvention>,
    formatters: FormatterRegistry,
}

// Verify QueryParamsSerializer is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<QueryParamsSerializer>();
};

impl QueryParamsSerializer {
    /// Creates a serializer with snake_case naming and the built-in
    /// formatters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            naming: Arc::new(SnakeCase),
            formatters: FormatterRegistry::new(),
        }
    }

    /// Replaces the naming convention.
    #[must_use]
    pub fn with_naming<N>(mut self, naming: N) -> Self
    where
        N: NamingConvention + 'static,
    {
        self.naming = Arc::new(naming);
        self
    }

    /// Replaces the formatter registry.
    #[must_use]
    pub fn with_formatters(mut self, formatters: FormatterRegistry) -> Self {
        self.formatters = formatters;
        self
    }

    /// Returns the naming convention.
    #[must_use]
    pub fn naming(&self) -> &dyn NamingConvention {
        self.naming.as_ref()
    }

    /// Returns the formatter registry.
    #[must_use]
    pub const fn formatters(&self) -> &FormatterRegistry {
        &self.formatters
    }

    /// Registers a formatter on this instance only.
    pub fn register_formatter<F>(&mut self, kind: ValueKind, formatter: F)
    where
        F: ValueFormatter + 'static,
    {
        self.formatters.register(kind, formatter);
    }

    /// Removes a formatter from this instance. Returns `true` if one existed.
    pub fn unregister_formatter(&mut self, kind: ValueKind) -> bool {
        self.formatters.unregister(kind)
    }

    /// Serializes `value` into a query string without a leading `?`.
    pub fn serialize<T: ToParams + ?Sized>(&self, value: &T) -> String {
        self.serialize_with_prefix(value, "")
    }

    /// Serializes `value` with every key nested under `prefix`.
    pub fn serialize_with_prefix<T: ToParams + ?Sized>(&self, value: &T, prefix: &str) -> String {
        self.to_pairs_with_prefix(value, prefix)
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Returns the unencoded key/value pairs in emission order.
    pub fn to_pairs<T: ToParams + ?Sized>(&self, value: &T) -> Vec<(String, String)> {
        self.to_pairs_with_prefix(value, "")
    }

    fn to_pairs_with_prefix<T: ToParams + ?Sized>(
        &self,
        value: &T,
        prefix: &str,
    ) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        self.walk(prefix, &value.to_param_value(), &mut pairs);
        pairs
    }

    fn walk(&self, prefix: &str, value: &ParamValue, out: &mut Vec<(String, String)>) {
        match value {
            ParamValue::Null => {}
            ParamValue::Map(entries) => {
                for (key, entry) in entries {
                    self.walk(&format!("{prefix}[{key}]"), entry, out);
                }
            }
            ParamValue::List(items) if items.iter().all(|item| self.formatters.is_simple(item)) => {
                out.push((prefix.to_string(), self.format_simple_list(items)));
            }
            ParamValue::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    self.walk(&format!("{prefix}[{index}]"), item, out);
                }
            }
            ParamValue::Record(record)
                if !self.formatters.contains(ValueKind::Record(record.type_name)) =>
            {
                for (name, field) in &record.fields {
                    let wire = self.naming.to_wire(name);
                    let key = if prefix.is_empty() {
                        wire
                    } else {
                        format!("{prefix}.{wire}")
                    };
                    self.walk(&key, field, out);
                }
            }
            leaf => out.push((prefix.to_string(), self.formatters.format(leaf))),
        }
    }

    fn format_simple_list(&self, items: &[ParamValue]) -> String {
        let joined = items
            .iter()
            .filter(|item| !matches!(item, ParamValue::Null))
            .map(|item| self.formatters.format(item))
            .collect::<Vec<_>>()
            .join(",");
        format!("\"{joined}\"")
    }
}

impl Default for QueryParamsSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for QueryParamsSerializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryParamsSerializer")
            .field("naming", &self.naming)
            .field("formatters", &self.formatters)
            .finish()
    }
}
