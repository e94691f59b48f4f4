//! Request/response logging.
//!
//! Every dispatched request produces exactly one [`RequestLog`] /
//! [`ResponseLog`] pair, handed to the configured [`LogSaver`]. When no saver
//! is configured the pair is built and dropped.

use std::fmt;
use std::time::Instant;

use bytes::Bytes;
use chrono::{DateTime, Utc};

/// The request half of a log entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestLog {
    /// The HTTP method.
    pub method: String,
    /// The absolute request URL.
    pub uri: String,
    /// Per-request headers.
    pub headers: Vec<(String, String)>,
    /// The body, when it was available without consuming a stream.
    pub body: Option<Bytes>,
    /// When the request was started.
    pub started_at: DateTime<Utc>,
}

/// The response half of a log entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseLog {
    /// The status code. `None` when no response was received.
    pub status_code: Option<u16>,
    /// Response headers as `(name, value)` pairs.
    pub headers: Vec<(String, String)>,
    /// The buffered body. `None` for streamed downloads.
    pub body: Option<Bytes>,
    /// Error text when the call failed.
    pub exception: Option<String>,
    /// Time from request start to completion, in milliseconds.
    pub duration_ms: u64,
}

/// Receives one log entry per dispatched request.
pub trait LogSaver: Send + Sync {
    /// Persists a completed entry.
    fn save_log(&self, request: &RequestLog, response: &ResponseLog);
}

/// A [`LogSaver`] that emits entries as `tracing` debug events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingLogSaver;

impl LogSaver for TracingLogSaver {
    fn save_log(&self, request: &RequestLog, response: &ResponseLog) {
        tracing::debug!(
            method = %request.method,
            uri = %request.uri,
            status = ?response.status_code,
            duration_ms = response.duration_ms,
            request_bytes = request.body.as_ref().map_or(0, Bytes::len),
            response_bytes = response.body.as_ref().map_or(0, Bytes::len),
            exception = ?response.exception,
            "Disk API call completed"
        );
    }
}

/// Collects one log entry for one call.
///
/// The entry is saved by [`RequestLogger::end_with_success`] or
/// [`RequestLogger::end_with_error`]. A logger dropped before either is
/// called saves an error entry.
pub(crate) struct RequestLogger<'a> {
    saver: Option<&'a dyn LogSaver>,
    request: RequestLog,
    response: ResponseLog,
    started: Instant,
    finished: bool,
}

impl<'a> RequestLogger<'a> {
    pub(crate) fn new(saver: Option<&'a dyn LogSaver>, method: &str, uri: &str) -> Self {
        Self {
            saver,
            request: RequestLog {
                method: method.to_string(),
                uri: uri.to_string(),
                headers: Vec::new(),
                body: None,
                started_at: Utc::now(),
            },
            response: ResponseLog::default(),
            started: Instant::now(),
            finished: false,
        }
    }

    pub(crate) fn set_request(&mut self, headers: &[(String, String)], body: Option<Bytes>) {
        self.request.headers = headers.to_vec();
        self.request.body = body;
    }

    pub(crate) fn set_response<'h, I>(&mut self, status: u16, headers: I, body: Option<Bytes>)
    where
        I: IntoIterator<Item = (&'h String, &'h Vec<String>)>,
    {
        self.response.status_code = Some(status);
        self.response.headers = headers
            .into_iter()
            .flat_map(|(name, values)| values.iter().map(move |v| (name.clone(), v.clone())))
            .collect();
        self.response.body = body;
    }

    pub(crate) fn end_with_success(mut self) {
        self.finish(None);
    }

    pub(crate) fn end_with_error(mut self, message: &str) {
        self.finish(Some(message.to_string()));
    }

    pub(crate) fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn finish(&mut self, exception: Option<String>) {
        if self.finished {
            return;
        }
        self.finished = true;
        self.response.exception = exception;
        self.response.duration_ms = self.elapsed_ms();
        if let Some(saver) = self.saver {
            saver.save_log(&self.request, &self.response);
        }
    }
}

impl Drop for RequestLogger<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.finish(Some("Request was abandoned before completion".to_string()));
        }
    }
}

impl fmt::Debug for RequestLogger<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestLogger")
            .field("request", &self.request)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recording(Mutex<Vec<(RequestLog, ResponseLog)>>);

    impl LogSaver for Recording {
        fn save_log(&self, request: &RequestLog, response: &ResponseLog) {
            self.0
                .lock()
                .unwrap()
                .push((request.clone(), response.clone()));
        }
    }

    #[test]
    fn test_success_saves_one_entry() {
        let saver = Recording::default();
        let mut logger = RequestLogger::new(Some(&saver), "GET", "http://ya.ru/api/");
        logger.set_request(&[], None);
        let headers: HashMap<String, Vec<String>> =
            HashMap::from([("etag".to_string(), vec!["1".to_string()])]);
        logger.set_response(200, &headers, Some(Bytes::from_static(b"{}")));
        logger.end_with_success();

        let entries = saver.0.lock().unwrap();
        assert_eq!(entries.len(), 1);
        let (request, response) = &entries[0];
        assert_eq!(request.uri, "http://ya.ru/api/");
        assert_eq!(response.status_code, Some(200));
        assert_eq!(response.headers, vec![("etag".to_string(), "1".to_string())]);
        assert!(response.exception.is_none());
    }

    #[test]
    fn test_error_records_exception_without_status() {
        let saver = Recording::default();
        let logger = RequestLogger::new(Some(&saver), "PUT", "http://ya.ru/api/resources");
        logger.end_with_error("connection refused");

        let entries = saver.0.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].1.status_code, None);
        assert_eq!(entries[0].1.exception.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_drop_without_end_saves_error_entry() {
        let saver = Recording::default();
        {
            let _logger = RequestLogger::new(Some(&saver), "GET", "http://ya.ru/api/");
        }

        let entries = saver.0.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].1.exception.is_some());
    }

    #[test]
    fn test_no_saver_is_a_no_op() {
        let logger = RequestLogger::new(None, "GET", "http://ya.ru/api/");
        logger.end_with_success();
    }
}
