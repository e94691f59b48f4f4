//! Leaf value formatters.
//!
//! Every leaf reached by the [`QueryParamsSerializer`] walk is turned into
//! a string by a [`ValueFormatter`]. Formatters are looked up by
//! [`ValueKind`] in a [`FormatterRegistry`] owned by one serializer
//! instance; kinds without an entry fall back to [`DefaultFormatter`].
//!
//! Registering a formatter for [`ValueKind::Record`] makes that record type
//! a simple value: it is emitted as a single leaf instead of being walked
//! field by field.
//!
//! [`QueryParamsSerializer`]: super::QueryParamsSerializer

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDateTime;

use super::naming::to_snake_case;
use super::value::{ParamValue, ValueKind};

/// Default timestamp layout: `dd.MM.yyyy'T'HH:mm:ss`.
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%YT%H:%M:%S";

/// Formats a single leaf value.
pub trait ValueFormatter: Send + Sync {
    /// Returns the textual form of `value`.
    fn format(&self, value: &ParamValue) -> String;
}

impl<F> ValueFormatter for F
where
    F: Fn(&ParamValue) -> String + Send + Sync,
{
    fn format(&self, value: &ParamValue) -> String {
        self(value)
    }
}

/// Culture-invariant formatting for every built-in leaf kind.
///
/// - booleans as `true`/`false`
/// - enums as the snake_case variant name
/// - timestamps with [`TIMESTAMP_FORMAT`]
/// - durations as `{days}.{hours}:{minutes}:{seconds}`
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultFormatter;

impl ValueFormatter for DefaultFormatter {
    fn format(&self, value: &ParamValue) -> String {
        match value {
            ParamValue::String(s) => s.clone(),
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Int(n) => n.to_string(),
            ParamValue::UInt(n) => n.to_string(),
            ParamValue::Float(n) => n.to_string(),
            ParamValue::Enum(name) => to_snake_case(name),
            ParamValue::Timestamp(ts) => format_timestamp(ts, TIMESTAMP_FORMAT),
            ParamValue::Duration(seconds) => format_duration(*seconds),
            ParamValue::Null
            | ParamValue::List(_)
            | ParamValue::Map(_)
            | ParamValue::Record(_) => String::new(),
        }
    }
}

/// Formats timestamps with a `chrono` format string.
#[derive(Clone, Debug)]
pub struct TimestampFormatter {
    pattern: String,
}

impl TimestampFormatter {
    /// Creates a formatter with a custom `strftime` pattern.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// Returns the `strftime` pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Default for TimestampFormatter {
    fn default() -> Self {
        Self::new(TIMESTAMP_FORMAT)
    }
}

impl ValueFormatter for TimestampFormatter {
    fn format(&self, value: &ParamValue) -> String {
        match value {
            ParamValue::Timestamp(ts) => format_timestamp(ts, &self.pattern),
            other => DefaultFormatter.format(other),
        }
    }
}

/// Formats durations as `{days}.{hours}:{minutes}:{seconds}`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DurationFormatter;

impl ValueFormatter for DurationFormatter {
    fn format(&self, value: &ParamValue) -> String {
        match value {
            ParamValue::Duration(seconds) => format_duration(*seconds),
            other => DefaultFormatter.format(other),
        }
    }
}

fn format_timestamp(ts: &NaiveDateTime, pattern: &str) -> String {
    ts.format(pattern).to_string()
}

/// Components are not zero padded; negative durations carry the sign on
/// every non-zero component.
fn format_duration(total_seconds: i64) -> String {
    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3_600;
    let minutes = (total_seconds % 3_600) / 60;
    let seconds = total_seconds % 60;
    format!("{days}.{hours}:{minutes}:{seconds}")
}

/// Per-serializer mapping from [`ValueKind`] to formatter.
#[derive(Clone)]
pub struct FormatterRegistry {
    formatters: HashMap<ValueKind, Arc<dyn ValueFormatter>>,
    fallback: Arc<dyn ValueFormatter>,
}

impl FormatterRegistry {
    /// Creates a registry with the built-in string, timestamp and duration
    /// entries.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(ValueKind::String, DefaultFormatter);
        registry.register(ValueKind::Timestamp, TimestampFormatter::default());
        registry.register(ValueKind::Duration, DurationFormatter);
        registry
    }

    /// Creates a registry with no entries at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            formatters: HashMap::new(),
            fallback: Arc::new(DefaultFormatter),
        }
    }

    /// Registers a formatter, replacing any previous entry for `kind`.
    pub fn register<F>(&mut self, kind: ValueKind, formatter: F)
    where
        F: ValueFormatter + 'static,
    {
        self.formatters.insert(kind, Arc::new(formatter));
    }

    /// Removes the entry for `kind`. Returns `true` if one existed.
    pub fn unregister(&mut self, kind: ValueKind) -> bool {
        self.formatters.remove(&kind).is_some()
    }

    /// Returns `true` if `kind` has an explicit entry.
    #[must_use]
    pub fn contains(&self, kind: ValueKind) -> bool {
        self.formatters.contains_key(&kind)
    }

    /// Replaces the formatter used for kinds without an entry.
    pub fn set_fallback<F>(&mut self, formatter: F)
    where
        F: ValueFormatter + 'static,
    {
        self.fallback = Arc::new(formatter);
    }

    /// Returns `true` if values of this shape are emitted as a single leaf.
    ///
    /// Scalars, enums, timestamps and durations are always simple. Records
    /// are simple only when their type has a registered formatter. `Null`
    /// counts as simple so it does not force a list into indexed form.
    #[must_use]
    pub fn is_simple(&self, value: &ParamValue) -> bool {
        match value {
            ParamValue::List(_) | ParamValue::Map(_) => false,
            ParamValue::Record(record) => self.contains(ValueKind::Record(record.type_name)),
            _ => true,
        }
    }

    /// Formats a leaf value.
    #[must_use]
    pub fn format(&self, value: &ParamValue) -> String {
        value
            .kind()
            .and_then(|kind| self.formatters.get(&kind))
            .unwrap_or(&self.fallback)
            .format(value)
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterRegistry")
            .field("kinds", &self.formatters.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialization::Record;
    use chrono::NaiveDate;

    fn timestamp() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2014, 4, 22)
            .unwrap()
            .and_hms_opt(6, 32, 49)
            .unwrap()
    }

    #[test]
    fn test_default_formats() {
        let registry = FormatterRegistry::new();
        assert_eq!(registry.format(&ParamValue::Bool(true)), "true");
        assert_eq!(registry.format(&ParamValue::Bool(false)), "false");
        assert_eq!(registry.format(&ParamValue::Int(-3)), "-3");
        assert_eq!(registry.format(&ParamValue::Float(1.5)), "1.5");
        assert_eq!(registry.format(&ParamValue::Enum("InProgress")), "in_progress");
    }

    #[test]
    fn test_timestamp_format() {
        let registry = FormatterRegistry::new();
        assert_eq!(
            registry.format(&ParamValue::Timestamp(timestamp())),
            "22.04.2014T06:32:49"
        );
    }

    #[test]
    fn test_duration_format_is_unpadded() {
        let registry = FormatterRegistry::new();
        // 1 day, 2 hours, 3 minutes, 4 seconds
        assert_eq!(
            registry.format(&ParamValue::Duration(93_784)),
            "1.2:3:4"
        );
        assert_eq!(registry.format(&ParamValue::Duration(59)), "0.0:0:59");
    }

    #[test]
    fn test_custom_formatter_overrides_and_unregisters() {
        let mut registry = FormatterRegistry::new();
        registry.register(ValueKind::Bool, |value: &ParamValue| match value {
            ParamValue::Bool(true) => "1".to_string(),
            _ => "0".to_string(),
        });
        assert_eq!(registry.format(&ParamValue::Bool(true)), "1");

        assert!(registry.unregister(ValueKind::Bool));
        assert!(!registry.unregister(ValueKind::Bool));
        assert_eq!(registry.format(&ParamValue::Bool(true)), "true");
    }

    #[test]
    fn test_custom_timestamp_pattern() {
        let mut registry = FormatterRegistry::new();
        registry.register(ValueKind::Timestamp, TimestampFormatter::new("%Y-%m-%d"));
        assert_eq!(
            registry.format(&ParamValue::Timestamp(timestamp())),
            "2014-04-22"
        );
    }

    #[test]
    fn test_registered_record_becomes_simple() {
        let mut registry = FormatterRegistry::new();
        let point = ParamValue::Record(Record::new("Point").field("x", &1));
        assert!(!registry.is_simple(&point));

        registry.register(ValueKind::Record("Point"), |_: &ParamValue| "p".to_string());
        assert!(registry.is_simple(&point));
        assert_eq!(registry.format(&point), "p");
    }
}
