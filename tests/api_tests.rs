//! HTTP API integration tests
//!
//! Upload form, conversion endpoint and health probes.

use std::io::Cursor;
use std::sync::Arc;

use actix_web::http::StatusCode;
use calamine::{Reader, Xlsx};
use actix_web::test::{self, TestRequest};
use serde_json::Value;

use visit_flattener::api::services::{AppStartTime, UploadLimits};
use visit_flattener::export::{EXPORT_FILENAME, XLSX_CONTENT_TYPE};
use visit_flattener::runtime::modes::build_app;
use visit_flattener::services::ConvertService;

// =============================================================================
// Test Setup
// =============================================================================

const BOUNDARY: &str = "----visitflattenerboundary";

const SAMPLE_XML: &str = r#"<?xml version="1.0" encoding="utf-8" ?>
<result>
    <row>
        <idSite>1</idSite>
        <idVisit>100</idVisit>
        <referrerTypeName>direct</referrerTypeName>
        <actionDetails>
            <row><type>pageview</type><url>/a</url></row>
            <row><type>pageview</type><url>/b</url></row>
        </actionDetails>
    </row>
    <row>
        <idSite>1</idSite>
        <idVisit>101</idVisit>
    </row>
</result>"#;

fn limits(max_file_size: usize) -> UploadLimits {
    UploadLimits { max_file_size }
}

macro_rules! init_app {
    () => {
        init_app!(1024 * 1024)
    };
    ($max:expr) => {
        test::init_service(build_app(
            Arc::new(ConvertService::new()),
            limits($max),
            AppStartTime::now(),
        ))
        .await
    };
}

fn multipart_body(fields: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, content) in fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                     Content-Type: application/xml\r\n\r\n",
                    name, filename
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            ),
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

fn upload_request(body: Vec<u8>) -> TestRequest {
    TestRequest::post()
        .uri("/convert")
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        ))
        .set_payload(body)
}

// =============================================================================
// Conversion
// =============================================================================

#[actix_rt::test]
async fn test_upload_returns_xlsx_attachment() {
    let app = init_app!();

    let body = multipart_body(&[("file", Some("export.xml"), SAMPLE_XML.as_bytes())]);
    let resp = test::call_service(&app, upload_request(body).to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let headers = resp.headers();
    assert_eq!(
        headers.get("Content-Type").unwrap().to_str().unwrap(),
        XLSX_CONTENT_TYPE
    );
    let disposition = headers
        .get("Content-Disposition")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains(EXPORT_FILENAME));
    assert_eq!(headers.get("X-Visit-Count").unwrap(), "2");
    assert_eq!(headers.get("X-Row-Count").unwrap(), "2");

    let bytes = test::read_body(resp).await;
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes.to_vec())).unwrap();
    let range = workbook.worksheet_range("Sheet1").unwrap();
    assert_eq!(range.height(), 3);
    assert_eq!(range.get_value((0, 0)).unwrap().to_string(), "idSite");
    assert_eq!(range.get_value((1, 6)).unwrap().to_string(), "/a");
    assert_eq!(range.get_value((2, 6)).unwrap().to_string(), "/b");
    assert_eq!(range.get_value((2, 11)).unwrap().to_string(), "direct");
}

#[actix_rt::test]
async fn test_upload_ignores_unknown_fields() {
    let app = init_app!();

    let body = multipart_body(&[
        ("note", None, &b"hello"[..]),
        ("file", Some("export.xml"), SAMPLE_XML.as_bytes()),
    ]);
    let resp = test::call_service(&app, upload_request(body).to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("X-Row-Count").unwrap(), "2");
}

#[actix_rt::test]
async fn test_upload_with_zero_actions_is_header_only() {
    let app = init_app!();

    let xml = b"<result><row><idVisit>1</idVisit></row></result>";
    let body = multipart_body(&[("file", Some("empty.xml"), &xml[..])]);
    let resp = test::call_service(&app, upload_request(body).to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("X-Visit-Count").unwrap(), "1");
    assert_eq!(resp.headers().get("X-Row-Count").unwrap(), "0");
}

#[actix_rt::test]
async fn test_malformed_xml_is_bad_request() {
    let app = init_app!();

    let body = multipart_body(&[("file", Some("bad.xml"), &b"<result><row></result>"[..])]);
    let resp = test::call_service(&app, upload_request(body).to_request()).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json["code"], 4000);
    assert!(json["message"].as_str().unwrap().contains("Malformed XML"));
}

#[actix_rt::test]
async fn test_missing_file_field_is_bad_request() {
    let app = init_app!();

    let body = multipart_body(&[("note", None, &b"no file here"[..])]);
    let resp = test::call_service(&app, upload_request(body).to_request()).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json["code"], 4001);
}

#[actix_rt::test]
async fn test_empty_file_is_bad_request() {
    let app = init_app!();

    let body = multipart_body(&[("file", Some("empty.xml"), &b""[..])]);
    let resp = test::call_service(&app, upload_request(body).to_request()).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json["code"], 4001);
}

#[actix_rt::test]
async fn test_oversized_upload_is_rejected() {
    let app = init_app!(64);

    let body = multipart_body(&[("file", Some("export.xml"), SAMPLE_XML.as_bytes())]);
    let resp = test::call_service(&app, upload_request(body).to_request()).await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json["code"], 1011);
}

#[actix_rt::test]
async fn test_non_multipart_request_is_bad_request() {
    let app = init_app!();

    let req = TestRequest::post()
        .uri("/convert")
        .insert_header(("Content-Type", "text/plain"))
        .set_payload(SAMPLE_XML)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_get_convert_is_not_allowed() {
    let app = init_app!();

    let req = TestRequest::get().uri("/convert").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

// =============================================================================
// Form & health
// =============================================================================

#[actix_rt::test]
async fn test_form_page() {
    let app = init_app!();

    let req = TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key("x-request-id"));

    let body = test::read_body(resp).await;
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("action=\"/convert\""));
    assert!(html.contains("name=\"file\""));
    assert!(!html.contains("%CONVERT_PATH%"));
}

#[actix_rt::test]
async fn test_request_id_reused_from_upstream() {
    let app = init_app!();

    let req = TestRequest::get()
        .uri("/health/live")
        .insert_header(("X-Request-ID", "edge-42"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "edge-42");

    let req = TestRequest::get()
        .uri("/health/live")
        .insert_header(("X-Request-ID", "not valid!"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let generated = resp.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert_ne!(generated, "not valid!");
    assert_eq!(generated.len(), 36);
}

#[actix_rt::test]
async fn test_health_endpoints() {
    let app = init_app!();

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json["code"], 0);
    assert_eq!(json["data"]["status"], "healthy");
    assert_eq!(json["data"]["version"], env!("CARGO_PKG_VERSION"));

    let req = TestRequest::get().uri("/health/ready").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = TestRequest::get().uri("/health/live").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[actix_rt::test]
async fn test_unknown_route_is_not_found() {
    let app = init_app!();

    let req = TestRequest::get().uri("/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
