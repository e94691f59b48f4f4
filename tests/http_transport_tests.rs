//! Integration tests for the reqwest transport against a mock HTTP server.
//!
//! These tests verify the wire-level contract: authentication header,
//! base URL resolution, absolute link calls and error classification.

use bytes::Bytes;
use chrono::{TimeZone, Utc};
use disk_api::clients::{collect_body, HttpResponse, RequestBody, Transport, TransportRequest};
use disk_api::clients::{HttpMethod, ReqwestTransport, TransportError};
use disk_api::protocol::{Link, ResourceRequest, ResourceType};
use disk_api::{BaseUrl, DiskApi, DiskConfig, DiskError, OAuthToken};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_string, header, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a facade pointed at the mock server.
fn api_for(server: &MockServer) -> DiskApi {
    let config = DiskConfig::builder()
        .token(OAuthToken::new("test-token").unwrap())
        .base_url(BaseUrl::new(format!("{}/v1/disk", server.uri())).unwrap())
        .build()
        .unwrap();
    DiskApi::new(&config).unwrap()
}

const RESOURCE_JSON: &str = r#"{
  "_embedded": {
    "sort": "name",
    "path": "disk:/foo",
    "items": [
      {"path": "disk:/foo/bar", "type": "dir", "name": "bar",
       "created": "2014-04-22T10:32:49+04:00", "modified": "2014-04-22T10:32:49+04:00"},
      {"path": "disk:/foo/photo.png", "type": "file", "name": "photo.png", "size": 34567,
       "created": "2014-04-21T14:57:13+04:00", "modified": "2014-04-21T14:57:14+04:00"}
    ],
    "limit": 20,
    "offset": 0
  },
  "name": "foo",
  "path": "disk:/foo",
  "type": "dir",
  "created": "2014-04-21T14:54:42+04:00",
  "modified": "2014-04-22T10:32:49+04:00"
}"#;

#[tokio::test]
async fn test_get_info_end_to_end_with_oauth_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/disk/resources"))
        .and(query_param("path", "/foo"))
        .and(query_param("limit", "20"))
        .and(query_param("offset", "0"))
        .and(query_param("sort", "name"))
        .and(header("Authorization", "OAuth test-token"))
        .and(header("Accept", "application/json"))
        .and(header_regex("User-Agent", "^Disk API Library v"))
        .respond_with(ResponseTemplate::new(200).set_body_string(RESOURCE_JSON))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let request = ResourceRequest::new("/foo").limit(20).offset(0).sort("name");
    let resource = api
        .meta_info()
        .get_info(&request, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(resource.resource_type, ResourceType::Dir);
    assert_eq!(resource.items().len(), 2);
    assert_eq!(resource.items()[0].resource_type, ResourceType::Dir);
    assert_eq!(resource.items()[0].name, "bar");
    assert_eq!(resource.items()[1].resource_type, ResourceType::File);
    assert_eq!(resource.items()[1].size, Some(34567));
    assert_eq!(
        resource.items()[1].created,
        Some(Utc.with_ymd_and_hms(2014, 4, 21, 10, 57, 13).unwrap())
    );
    assert_eq!(
        resource.modified,
        Some(Utc.with_ymd_and_hms(2014, 4, 22, 6, 32, 49).unwrap())
    );
}

#[tokio::test]
async fn test_unauthorized_response_is_classified() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/disk/"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string(r#"{"error":"unauthorized","description":"bad token"}"#),
        )
        .mount(&server)
        .await;

    let error = api_for(&server)
        .meta_info()
        .get_disk_info(&CancellationToken::new())
        .await
        .unwrap_err();

    let api_error = error.api_error().unwrap();
    assert!(matches!(error, DiskError::NotAuthorized(_)));
    assert_eq!(api_error.status, 401);
    assert_eq!(api_error.reason.as_deref(), Some("Unauthorized"));
    assert_eq!(api_error.error_code(), Some("unauthorized"));
}

#[tokio::test]
async fn test_not_found_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/disk/resources"))
        .respond_with(ResponseTemplate::new(404).set_body_string(
            r#"{"error":"DiskNotFoundError","description":"Resource not found."}"#,
        ))
        .mount(&server)
        .await;

    let error = api_for(&server)
        .meta_info()
        .get_info(&ResourceRequest::new("/missing"), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(error, DiskError::Api(_)));
    assert_eq!(
        error.to_string(),
        "API error. StatusCode: 404, Not Found. Resource not found."
    );
}

#[tokio::test]
async fn test_upload_and_download_use_absolute_links() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/upload-target/abc"))
        .and(body_string("hello disk"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/download-target/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"file content".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let cancel = CancellationToken::new();

    let upload = Link::new(format!("{}/upload-target/abc", server.uri()), "PUT");
    api.files()
        .upload(&upload, "hello disk", &cancel)
        .await
        .unwrap();

    let download = Link::new(format!("{}/download-target/abc", server.uri()), "GET");
    let stream = api.files().download(&download, &cancel).await.unwrap();
    let content = collect_body(stream).await.unwrap();
    assert_eq!(content, Bytes::from_static(b"file content"));
}

#[tokio::test]
async fn test_cancelled_request_returns_cancelled() {
    let server = MockServer::start().await;
    let cancel = CancellationToken::new();
    cancel.cancel();

    let error = api_for(&server)
        .meta_info()
        .get_disk_info(&cancel)
        .await
        .unwrap_err();

    assert!(error.is_cancelled());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_transport_reports_status_and_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/echo"))
        .and(header("Content-Type", "application/json"))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header("X-Request-Id", "req-1")
                .set_body_string("{}"),
        )
        .mount(&server)
        .await;

    let config = DiskConfig::builder()
        .token(OAuthToken::new("test-token").unwrap())
        .build()
        .unwrap();
    let transport = ReqwestTransport::new(&config).unwrap();

    let request = TransportRequest {
        method: HttpMethod::Post,
        url: format!("{}/echo", server.uri()),
        headers: vec![("Content-Type".to_string(), "application/json".to_string())],
        body: RequestBody::json(&serde_json::json!({})).unwrap(),
    };
    let response: HttpResponse = transport
        .send(request, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(response.code, 202);
    assert_eq!(response.reason_phrase().as_deref(), Some("Accepted"));
    assert_eq!(
        response.headers.get("x-request-id"),
        Some(&vec!["req-1".to_string()])
    );
}

#[tokio::test]
async fn test_download_cancelled_mid_body_is_not_complete() {
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    // Promises 1000 bytes, sends 10, then stalls.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await.unwrap();
        socket
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 1000\r\n\r\n0123456789")
            .await
            .unwrap();
        socket.flush().await.unwrap();
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    let config = DiskConfig::builder()
        .token(OAuthToken::new("test-token").unwrap())
        .base_url(BaseUrl::new(format!("http://{address}/v1/disk")).unwrap())
        .build()
        .unwrap();
    let api = DiskApi::new(&config).unwrap();
    let cancel = CancellationToken::new();
    let link = Link::new(format!("http://{address}/download-target/big"), "GET");

    let stream = api.files().download(&link, &cancel).await.unwrap();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let result = collect_body(stream).await;
    assert!(matches!(result, Err(TransportError::Cancelled)));
}
