//! Field naming conventions.
//!
//! A [`NamingConvention`] converts field identifiers to their wire names and
//! back. Identifiers may be written in Rust `snake_case` or in
//! `PascalCase`/`camelCase`; word boundaries are detected at underscores and
//! at uppercase letters.
//!
//! Three conventions are provided:
//!
//! - [`SnakeCase`]: `MediaType` / `media_type` → `media_type` (the API default)
//! - [`CamelCase`]: `MediaType` / `media_type` → `mediaType`
//! - [`Identity`]: names are passed through unchanged

use std::fmt::Debug;

/// Converts field identifiers to wire names and back.
///
/// Implementations must be stateless or internally synchronized; a single
/// convention instance is shared by every request issued through a
/// serializer.
pub trait NamingConvention: Debug + Send + Sync {
    /// Converts a field identifier to its wire name.
    fn to_wire(&self, name: &str) -> String;

    /// Converts a wire name back to a field identifier.
    ///
    /// The result normalizes (via [`to_snake_case`]) to the same key as the
    /// identifier that produced the wire name.
    fn from_wire(&self, wire_name: &str) -> String;
}

/// `snake_case` naming, the convention used by the Disk API.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SnakeCase;

/// `camelCase` naming.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CamelCase;

/// Pass-through naming.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Identity;

impl NamingConvention for SnakeCase {
    fn to_wire(&self, name: &str) -> String {
        to_snake_case(name)
    }

    fn from_wire(&self, wire_name: &str) -> String {
        to_snake_case(wire_name)
    }
}

impl NamingConvention for CamelCase {
    fn to_wire(&self, name: &str) -> String {
        to_camel_case(name)
    }

    fn from_wire(&self, wire_name: &str) -> String {
        to_snake_case(wire_name)
    }
}

impl NamingConvention for Identity {
    fn to_wire(&self, name: &str) -> String {
        name.to_string()
    }

    fn from_wire(&self, wire_name: &str) -> String {
        wire_name.to_string()
    }
}

/// Splits an identifier into lowercase words.
///
/// A new word starts at every `_` and at every uppercase letter that follows
/// a non-empty word, so `MD5` splits as `m`, `d5`.
fn words(name: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    for c in name.chars() {
        if c == '_' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.extend(c.to_lowercase());
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Converts an identifier to `snake_case`.
///
/// ```rust
/// use disk_api::serialization::to_snake_case;
///
/// assert_eq!(to_snake_case("MediaType"), "media_type");
/// assert_eq!(to_snake_case("media_type"), "media_type");
/// assert_eq!(to_snake_case("InProgress"), "in_progress");
/// ```
#[must_use]
pub fn to_snake_case(name: &str) -> String {
    words(name).join("_")
}

/// Converts an identifier to `camelCase`.
///
/// ```rust
/// use disk_api::serialization::to_camel_case;
///
/// assert_eq!(to_camel_case("MediaType"), "mediaType");
/// assert_eq!(to_camel_case("preview_size"), "previewSize");
/// ```
#[must_use]
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (index, word) in words(name).iter().enumerate() {
        if index == 0 {
            out.push_str(word);
            continue;
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDENTIFIERS: &[&str] = &[
        "path",
        "Path",
        "media_type",
        "MediaType",
        "mediaType",
        "preview_crop",
        "CustomProperties",
        "Md5",
        "MimeType",
        "total_space",
    ];

    fn conventions() -> Vec<Box<dyn NamingConvention>> {
        vec![Box::new(SnakeCase), Box::new(CamelCase), Box::new(Identity)]
    }

    #[test]
    fn test_snake_case_conversion() {
        assert_eq!(to_snake_case("CustomProperties"), "custom_properties");
        assert_eq!(to_snake_case("customProperties"), "custom_properties");
        assert_eq!(to_snake_case("Md5"), "md5");
        assert_eq!(to_snake_case("MD5"), "m_d5");
        assert_eq!(to_snake_case(""), "");
    }

    #[test]
    fn test_camel_case_conversion() {
        assert_eq!(to_camel_case("CustomProperties"), "customProperties");
        assert_eq!(to_camel_case("custom_properties"), "customProperties");
        assert_eq!(to_camel_case("path"), "path");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn test_identity_passes_names_through() {
        assert_eq!(Identity.to_wire("MediaType"), "MediaType");
        assert_eq!(Identity.from_wire("media_type"), "media_type");
    }

    #[test]
    fn test_round_trip_normalizes_to_same_field_for_every_convention() {
        for convention in conventions() {
            for name in IDENTIFIERS {
                let wire = convention.to_wire(name);
                let back = convention.from_wire(&wire);
                assert_eq!(
                    to_snake_case(&back),
                    to_snake_case(name),
                    "{convention:?} failed to round-trip {name}"
                );
            }
        }
    }
}
