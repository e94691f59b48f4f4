//! Polling of asynchronous server-side operations.
//!
//! Copy, move, delete, empty-trash and restore commands on non-empty folders
//! answer `202 Accepted` with a [`Link`] to an operation status endpoint.
//! [`OperationPoller`] checks that endpoint until the operation leaves
//! `in-progress`.

use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::clients::errors::DiskError;
use crate::config::DEFAULT_POLL_INTERVAL;
use crate::protocol::{Link, Operation, OperationStatus};

/// Something that can report the status of an operation.
#[async_trait]
pub trait OperationStatusSource: Send + Sync {
    /// Fetches the current status of the operation behind `link`.
    ///
    /// # Errors
    ///
    /// Returns any [`DiskError`] raised while fetching the status.
    async fn operation_status(
        &self,
        link: &Link,
        cancel: &CancellationToken,
    ) -> Result<Operation, DiskError>;
}

/// Waits for an operation to finish.
///
/// The status is checked immediately, then once per interval while it is
/// `InProgress`. Cancellation stops the loop without an error; the last
/// observed status is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperationPoller {
    interval: Duration,
}

impl OperationPoller {
    /// Creates a poller with the given interval between checks.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// Returns the interval between checks.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Polls until the operation is no longer `InProgress` or `cancel` fires.
    ///
    /// Returns `Success` or `Failure` when the operation finished, and
    /// `InProgress` when polling was cancelled first.
    ///
    /// # Errors
    ///
    /// Returns any non-cancellation [`DiskError`] from a status check.
    pub async fn wait_until_done<S>(
        &self,
        source: &S,
        link: &Link,
        cancel: &CancellationToken,
    ) -> Result<OperationStatus, DiskError>
    where
        S: OperationStatusSource + ?Sized,
    {
        let mut status = OperationStatus::InProgress;
        let mut checks: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                debug!(href = %link.href, checks, "Operation polling cancelled");
                return Ok(status);
            }

            status = match source.operation_status(link, cancel).await {
                Ok(operation) => operation.status,
                Err(e) if e.is_cancelled() => {
                    debug!(href = %link.href, checks, "Operation polling cancelled");
                    return Ok(status);
                }
                Err(e) => return Err(e),
            };
            checks += 1;

            if status.is_terminal() {
                debug!(href = %link.href, checks, status = %status, "Operation finished");
                return Ok(status);
            }

            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    debug!(href = %link.href, checks, "Operation polling cancelled");
                    return Ok(status);
                }
                () = tokio::time::sleep(self.interval) => {}
            }
        }
    }
}

impl Default for OperationPoller {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}
