//! Links and asynchronous operations.

use serde::{Deserialize, Serialize};

use crate::serialization::protocol_object;

/// A server-issued `{href, method}` pair for exactly one follow-up call.
///
/// Upload and download targets are single-use and may expire. A link
/// returned with status 202 points at an operation status endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Link {
    /// The absolute URL of the follow-up call.
    pub href: String,
    /// The HTTP method of the follow-up call.
    pub method: String,
    /// Whether `href` is a URI template.
    pub templated: bool,
    /// The HTTP status code of the response that carried this link.
    #[serde(skip)]
    pub http_status_code: u16,
}

impl Link {
    /// Creates a link.
    #[must_use]
    pub fn new(href: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            method: method.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if the link was returned with `202 Accepted`, meaning
    /// it tracks an operation that is still running.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        self.http_status_code == 202
    }
}

crate::wire_enum! {
    /// State of an asynchronous server-side operation.
    #[derive(Default)]
    pub enum OperationStatus {
        /// The operation completed.
        #[default]
        Success => "success",
        /// The operation failed.
        Failure => "failure",
        /// The operation is still running.
        InProgress => "in-progress",
    }
}

impl OperationStatus {
    /// Returns `true` for `Success` and `Failure`.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// The status of an asynchronous operation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Operation {
    /// Current state.
    pub status: OperationStatus,
    /// The HTTP status code of the response.
    #[serde(skip)]
    pub http_status_code: u16,
}

protocol_object!(Link, Operation);
