//! Shared test doubles for the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use disk_api::clients::{
    collect_body, ApiContext, HttpMethod, HttpResponse, LogSaver, RequestBody, RequestLog,
    ResponseLog, Transport, TransportError, TransportRequest,
};
use disk_api::{BaseUrl, DiskApi};
use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;

pub const BASE_URL: &str = "https://disk.test/v1/disk/";

/// A request as seen by [`RecordingTransport`].
#[derive(Clone, Debug)]
pub struct SentRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Bytes>,
}

impl SentRequest {
    pub fn body_text(&self) -> String {
        self.body
            .as_ref()
            .map(|body| String::from_utf8_lossy(body).into_owned())
            .unwrap_or_default()
    }
}

/// A transport that records requests and replays canned responses in order.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<SentRequest>>,
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, code: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse::from_bytes(code, body.to_string())));
    }

    pub fn fail(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportError::Other(message.to_string())));
    }

    pub fn sent(&self) -> Vec<SentRequest> {
        self.sent.lock().unwrap().clone()
    }

    pub fn last(&self) -> SentRequest {
        self.sent().last().cloned().expect("no request was sent")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(
        &self,
        request: TransportRequest,
        _cancel: &CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        let body = match request.body {
            RequestBody::Empty => None,
            RequestBody::Json(bytes) | RequestBody::Bytes(bytes) => Some(bytes),
            RequestBody::Text(text) => Some(Bytes::from(text)),
            RequestBody::Stream(stream) => {
                let stream = stream.map(|chunk| chunk.map_err(TransportError::from));
                Some(collect_body(Box::pin(stream)).await?)
            }
        };
        self.sent.lock().unwrap().push(SentRequest {
            method: request.method,
            url: request.url,
            headers: request.headers,
            body,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(HttpResponse::from_bytes(200, "")))
    }
}

/// A log saver that keeps every entry.
#[derive(Default)]
pub struct RecordingLogSaver {
    entries: Mutex<Vec<(RequestLog, ResponseLog)>>,
}

impl RecordingLogSaver {
    pub fn entries(&self) -> Vec<(RequestLog, ResponseLog)> {
        self.entries.lock().unwrap().clone()
    }
}

impl LogSaver for RecordingLogSaver {
    fn save_log(&self, request: &RequestLog, response: &ResponseLog) {
        self.entries
            .lock()
            .unwrap()
            .push((request.clone(), response.clone()));
    }
}

/// Builds a facade over a recording transport.
pub fn api_with(transport: &Arc<RecordingTransport>) -> DiskApi {
    let context = ApiContext::new(transport.clone(), BaseUrl::new(BASE_URL).unwrap());
    DiskApi::from_context(context)
}

/// Builds a facade over a recording transport and a recording log saver.
pub fn api_with_logs(
    transport: &Arc<RecordingTransport>,
    saver: &Arc<RecordingLogSaver>,
) -> DiskApi {
    let context = ApiContext::new(transport.clone(), BaseUrl::new(BASE_URL).unwrap())
        .with_log_saver(saver.clone());
    DiskApi::from_context(context)
}

pub fn url(relative: &str) -> String {
    format!("{BASE_URL}{relative}")
}

pub const LINK_JSON: &str = r#"{
  "href": "https://cloud-api.yandex.net/v1/disk/operations?id=d80c269ce4eb16c0207f0a15t",
  "method": "GET",
  "templated": false
}"#;

pub const RESOURCE_JSON: &str = r#"{
  "public_key": "HQsmHLoeyBlJf8Eu1jlmzuU+ZaLkjPkgcvmokRUCIo8=",
  "_embedded": {
    "sort": "",
    "path": "disk:/foo",
    "items": [
      {
        "path": "disk:/foo/bar",
        "type": "dir",
        "name": "bar",
        "modified": "2014-04-22T10:32:49+04:00",
        "created": "2014-04-22T10:32:49+04:00"
      },
      {
        "name": "photo.png",
        "preview": "https://downloader.disk.yandex.ru/preview/...",
        "created": "2014-04-21T14:57:13+04:00",
        "modified": "2014-04-21T14:57:14+04:00",
        "path": "disk:/foo/photo.png",
        "md5": "4334dc6379c8f95ddf11b9508cfea271",
        "type": "file",
        "mime_type": "image/png",
        "size": 34567
      }
    ],
    "limit": 20,
    "offset": 0
  },
  "name": "foo",
  "created": "2014-04-21T14:54:42+04:00",
  "custom_properties": {"foo": "1", "bar": "2"},
  "public_url": "https://yadi.sk/d/2AEJCiNTZGiYX",
  "modified": "2014-04-22T10:32:49+04:00",
  "path": "disk:/foo",
  "type": "dir"
}"#;
