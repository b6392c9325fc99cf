use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::spawn_app;

#[tokio::test]
async fn proxy_requires_a_url() {
    let app = spawn_app().await;

    let response = reqwest::get(app.url("/api/proxy"))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "url is required");
}

#[tokio::test]
async fn proxy_rejects_non_http_urls() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    for bad in ["not a url", "ftp://example.com/a.png", "file:///etc/passwd"] {
        let response = client
            .get(app.url("/api/proxy"))
            .query(&[("url", bad)])
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), 400, "expected 400 for {bad}");
    }
}

#[tokio::test]
async fn proxy_passes_body_and_content_type_through() {
    let app = spawn_app().await;
    let image_bytes: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a];

    Mock::given(method("GET"))
        .and(path("/cover.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(image_bytes)
                .insert_header("content-type", "image/png"),
        )
        .mount(&app.mock_server)
        .await;

    let client = reqwest::Client::new();
    let response = client
        .get(app.url("/api/proxy"))
        .query(&[("url", format!("{}/cover.png", app.mock_server.uri()))])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    assert_eq!(
        response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok()),
        Some("image/png")
    );
    let body = response.bytes().await.expect("Failed to read body");
    assert_eq!(&body[..], image_bytes);
}

#[tokio::test]
async fn proxy_surfaces_origin_failure_as_bad_gateway() {
    let app = spawn_app().await;

    Mock::given(method("GET"))
        .and(path("/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&app.mock_server)
        .await;

    let client = reqwest::Client::new();
    let response = client
        .get(app.url("/api/proxy"))
        .query(&[("url", format!("{}/missing.png", app.mock_server.uri()))])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 502);
}
