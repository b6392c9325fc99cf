use std::time::Duration;

use anirewind::application::routes::app_router;
use anirewind::application::state::{AppState, AppStateConfig};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::AbortHandle;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub struct TestApp {
    pub address: String,
    pub mock_server: MockServer,
    server_handle: AbortHandle,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

/// Spawn the app on a random port, pointed at a fresh wiremock AniList.
pub async fn spawn_app() -> TestApp {
    let mock_server = MockServer::start().await;

    let state = AppState::new(AppStateConfig {
        anilist_url: mock_server.uri(),
        cache_ttl: Duration::from_secs(3600),
    });
    let app = app_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");

    let local_addr = listener.local_addr().expect("Failed to get local address");
    let address = format!("http://{local_addr}");

    let server_handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server failed to start");
    })
    .abort_handle();

    TestApp {
        address,
        mock_server,
        server_handle,
    }
}

/// GraphQL envelope wrapping a single-list `MediaListCollection`.
pub fn media_list_body(entries: Value) -> Value {
    json!({
        "data": {
            "MediaListCollection": {
                "lists": [{"entries": entries}]
            }
        }
    })
}

pub fn favorites_body() -> Value {
    json!({
        "data": {
            "User": {
                "favourites": {
                    "characters": {
                        "nodes": [
                            {"name": {"full": "Guts"}, "image": {"large": "https://img.example/guts.jpg"}}
                        ]
                    },
                    "staff": {"nodes": []}
                }
            }
        }
    })
}

pub fn anime_entry_json(title: &str, score: f64, month: u32, progress: u32) -> Value {
    json!({
        "score": score,
        "progress": progress,
        "repeat": 0,
        "status": "COMPLETED",
        "updatedAt": null,
        "completedAt": {"year": 2024, "month": month},
        "media": {
            "title": {"english": null, "romaji": title},
            "duration": 24,
            "format": "TV",
            "genres": ["Action", "Adventure"],
            "studios": {"nodes": [{"name": "Studio One"}]},
            "bannerImage": null,
            "coverImage": {"large": format!("https://img.example/{title}.jpg")}
        }
    })
}

pub fn manga_entry_json(title: &str, score: f64, month: u32) -> Value {
    json!({
        "score": score,
        "progress": 40,
        "progressVolumes": 4,
        "repeat": 0,
        "status": "COMPLETED",
        "updatedAt": null,
        "completedAt": {"year": 2024, "month": month},
        "media": {
            "title": {"english": null, "romaji": title},
            "format": "MANGA",
            "genres": ["Drama"],
            "countryOfOrigin": "JP",
            "bannerImage": null,
            "coverImage": {"large": format!("https://img.example/{title}.jpg")}
        }
    })
}

/// Mount the three AniList query mocks, each expected exactly `hits` times.
pub async fn mount_anilist(app: &TestApp, anime_entries: Value, manga_entries: Value, hits: u64) {
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("type: ANIME"))
        .respond_with(ResponseTemplate::new(200).set_body_json(media_list_body(anime_entries)))
        .expect(hits)
        .mount(&app.mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("type: MANGA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(media_list_body(manga_entries)))
        .expect(hits)
        .mount(&app.mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("favourites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(favorites_body()))
        .expect(hits)
        .mount(&app.mock_server)
        .await;
}

/// GET /api/rewind for a user and deserialize the envelope.
pub async fn fetch_rewind(app: &TestApp, username: &str, year: i32) -> Value {
    let client = reqwest::Client::new();
    let year = year.to_string();
    let response = client
        .get(app.url("/api/rewind"))
        .query(&[("username", username), ("year", year.as_str())])
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), 200);
    response.json().await.expect("Failed to parse JSON")
}
