use serde_json::json;

use crate::helpers::{anime_entry_json, fetch_rewind, mount_anilist, spawn_app};

#[tokio::test]
async fn share_requires_a_share_id() {
    let app = spawn_app().await;

    let response = reqwest::get(app.url("/api/share"))
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "shareId is required");
}

#[tokio::test]
async fn unknown_share_id_is_404() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(app.url("/api/share"))
        .query(&[("shareId", "deadbeef")])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "share not found");
}

#[tokio::test]
async fn share_returns_the_stored_report() {
    let app = spawn_app().await;
    mount_anilist(
        &app,
        json!([anime_entry_json("Frieren", 95.0, 3, 28)]),
        json!([]),
        1,
    )
    .await;

    let report = fetch_rewind(&app, "guts", 2024).await;
    let share_id = report["shareId"].as_str().expect("shareId missing");

    let client = reqwest::Client::new();
    let response = client
        .get(app.url("/api/share"))
        .query(&[("shareId", share_id)])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    let shared: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(shared, report);
}
