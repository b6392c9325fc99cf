use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{
    anime_entry_json, fetch_rewind, manga_entry_json, media_list_body, mount_anilist, spawn_app,
};

#[tokio::test]
async fn rewind_requires_a_username() {
    let app = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(app.url("/api/rewind"))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 400);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert_eq!(body["error"], "username is required");

    // Blank usernames are rejected too.
    let response = client
        .get(app.url("/api/rewind"))
        .query(&[("username", "  ")])
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 400);
}

#[tokio::test]
async fn rewind_builds_a_report_from_fetched_lists() {
    let app = spawn_app().await;
    mount_anilist(
        &app,
        json!([
            anime_entry_json("Frieren", 95.0, 3, 28),
            anime_entry_json("Dandadan", 80.0, 3, 12),
        ]),
        json!([manga_entry_json("Berserk", 100.0, 7)]),
        1,
    )
    .await;

    let body = fetch_rewind(&app, "guts", 2024).await;

    assert_eq!(body["username"], "guts");
    assert_eq!(body["year"], 2024);
    assert_eq!(body["shareId"].as_str().map(str::len), Some(8));
    assert!(body["generatedAt"].is_string());

    let overall = &body["overall"];
    assert_eq!(overall["anime_completed"], 2);
    assert_eq!(overall["manga_completed"], 1);
    assert_eq!(overall["episodes_watched"], 40);
    assert_eq!(overall["minutes_watched"], 960);
    assert_eq!(overall["chapters_read"], 40);
    assert_eq!(overall["volumes_read"], 4);
    // (95 + 80 + 100) / 3 = 91.67
    assert_eq!(overall["average_score"], 91.67);
    assert_eq!(overall["best_anime"]["title"], "Frieren");
    assert_eq!(overall["best_manga"]["title"], "Berserk");
    assert_eq!(overall["activity_counts"][2], 2);
    assert_eq!(overall["activity_counts"][6], 1);

    assert_eq!(body["monthly_overview"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["highlights"]["peak_month"]["month"], 3);
    assert_eq!(body["favorites"]["characters"][0]["name"]["full"], "Guts");
    assert!(body["persona"]["title"].is_string());
}

#[tokio::test]
async fn rewind_is_served_from_cache_on_repeat_requests() {
    let app = spawn_app().await;
    // Each AniList query must be hit exactly once; the second request is
    // answered from the report cache. Verified when the mock server drops.
    mount_anilist(
        &app,
        json!([anime_entry_json("Frieren", 95.0, 3, 28)]),
        json!([]),
        1,
    )
    .await;

    let first = fetch_rewind(&app, "guts", 2024).await;
    let second = fetch_rewind(&app, "guts", 2024).await;

    // Identical body, share id included.
    assert_eq!(first, second);
}

#[tokio::test]
async fn rewind_with_empty_lists_reports_the_casual_observer() {
    let app = spawn_app().await;
    mount_anilist(&app, json!([]), json!([]), 1).await;

    let body = fetch_rewind(&app, "lurker", 2024).await;

    assert_eq!(body["overall"]["anime_completed"], 0);
    assert_eq!(body["overall"]["average_score"], 0.0);
    assert_eq!(body["persona"]["title"], "The Casual Observer");
    assert!(body["highlights"]["peak_month"].is_null());
}

#[tokio::test]
async fn rewind_surfaces_upstream_failure_as_bad_gateway() {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.mock_server)
        .await;

    let client = reqwest::Client::new();
    let response = client
        .get(app.url("/api/rewind"))
        .query(&[("username", "guts"), ("year", "2024")])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 502);
    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn rewind_surfaces_graphql_errors_as_bad_gateway() {
    let app = spawn_app().await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("type: ANIME"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": null,
            "errors": [{"message": "User not found"}]
        })))
        .mount(&app.mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("type: MANGA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(media_list_body(json!([]))))
        .mount(&app.mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("favourites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(crate::helpers::favorites_body()))
        .mount(&app.mock_server)
        .await;

    let client = reqwest::Client::new();
    let response = client
        .get(app.url("/api/rewind"))
        .query(&[("username", "nobody"), ("year", "2024")])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 502);
}

#[tokio::test]
async fn rewind_defaults_to_the_current_utc_year() {
    let app = spawn_app().await;
    mount_anilist(&app, json!([]), json!([]), 1).await;

    let client = reqwest::Client::new();
    let response = client
        .get(app.url("/api/rewind"))
        .query(&[("username", "guts")])
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("Failed to parse JSON");
    let expected = chrono::Utc::now().format("%Y").to_string();
    assert_eq!(body["year"].to_string(), expected);
}
