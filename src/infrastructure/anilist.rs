use std::time::Duration;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Value, json};

use crate::application::errors::AppError;
use crate::domain::entries::MediaListCollection;

pub const ANILIST_URL: &str = "https://graphql.anilist.co";
const USER_AGENT: &str = "anirewind/1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const ANIME_QUERY: &str = r"
query ($username: String) {
  MediaListCollection(userName: $username, type: ANIME) {
    lists {
      entries {
        score
        progress
        repeat
        status
        updatedAt
        completedAt { year month }
        media {
          title { english romaji }
          duration
          format
          genres
          studios(isMain: true) { nodes { name } }
          bannerImage
          coverImage { large }
        }
      }
    }
  }
}
";

const MANGA_QUERY: &str = r"
query ($username: String) {
  MediaListCollection(userName: $username, type: MANGA) {
    lists {
      entries {
        score
        progress
        progressVolumes
        repeat
        status
        updatedAt
        completedAt { year month }
        media {
          title { english romaji }
          format
          genres
          countryOfOrigin
          bannerImage
          coverImage { large }
        }
      }
    }
  }
}
";

const FAVORITES_QUERY: &str = r"
query ($username: String) {
  User(name: $username) {
    favourites {
      characters(page: 1, perPage: 10) {
        nodes {
          name { full }
          image { large }
        }
      }
      staff(page: 1, perPage: 10) {
        nodes {
          name { full }
          image { large }
          primaryOccupations
        }
      }
    }
  }
}
";

// --- Public functions ---

/// Fetch a user's full anime list. A transport error, a non-success status,
/// or a GraphQL error surfaces as a single upstream failure; there are no
/// partial results.
pub async fn fetch_anime(
    client: &reqwest::Client,
    url: &str,
    username: &str,
) -> Result<MediaListCollection, AppError> {
    let data: MediaListData = post_graphql(client, url, ANIME_QUERY, username).await?;
    data.media_list_collection
        .ok_or_else(|| AppError::upstream(format!("AniList returned no anime list for {username}")))
}

/// Fetch a user's full manga list.
pub async fn fetch_manga(
    client: &reqwest::Client,
    url: &str,
    username: &str,
) -> Result<MediaListCollection, AppError> {
    let data: MediaListData = post_graphql(client, url, MANGA_QUERY, username).await?;
    data.media_list_collection
        .ok_or_else(|| AppError::upstream(format!("AniList returned no manga list for {username}")))
}

/// Fetch a user's favorite characters and staff. The payload is opaque to
/// the engine: it is reshaped to `{"characters": [...], "staff": [...]}` and
/// passed through the report unmodified.
pub async fn fetch_favorites(
    client: &reqwest::Client,
    url: &str,
    username: &str,
) -> Result<Value, AppError> {
    let data: Value = post_graphql(client, url, FAVORITES_QUERY, username).await?;

    let characters = data
        .pointer("/User/favourites/characters/nodes")
        .cloned()
        .unwrap_or_else(|| json!([]));
    let staff = data
        .pointer("/User/favourites/staff/nodes")
        .cloned()
        .unwrap_or_else(|| json!([]));

    Ok(json!({ "characters": characters, "staff": staff }))
}

// --- Internal helpers ---

async fn post_graphql<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    query: &str,
    username: &str,
) -> Result<T, AppError> {
    let request_body = GraphQlRequest {
        query,
        variables: Variables { username },
    };

    let response = client
        .post(url)
        .header("User-Agent", USER_AGENT)
        .timeout(REQUEST_TIMEOUT)
        .json(&request_body)
        .send()
        .await
        .map_err(|e| AppError::upstream(format!("AniList request failed: {e}")))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "(unreadable body)".to_string());
        return Err(AppError::upstream(format!(
            "AniList returned status {status}: {body}"
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| AppError::upstream(format!("failed to read AniList response body: {e}")))?;

    let envelope: GraphQlResponse<T> = serde_json::from_str(&body)
        .map_err(|e| AppError::upstream(format!("failed to parse AniList response: {e}")))?;

    if !envelope.errors.is_empty() {
        let messages: Vec<&str> = envelope
            .errors
            .iter()
            .map(|err| err.message.as_str())
            .collect();
        return Err(AppError::upstream(format!(
            "AniList reported errors: {}",
            messages.join("; ")
        )));
    }

    envelope
        .data
        .ok_or_else(|| AppError::upstream("AniList response carried no data".to_string()))
}

// --- GraphQL wire types ---

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Variables<'a>,
}

#[derive(Debug, Serialize)]
struct Variables<'a> {
    username: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct MediaListData {
    #[serde(rename = "MediaListCollection")]
    media_list_collection: Option<MediaListCollection>,
}
