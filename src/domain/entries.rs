use serde::{Deserialize, Serialize};

/// A user's full list for one media type, as returned by the AniList
/// `MediaListCollection` query. Lists are AniList's user-defined groupings
/// ("Watching", "Completed", custom lists); the engine treats their entries
/// as one flat collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaListCollection {
    #[serde(default)]
    pub lists: Vec<MediaListGroup>,
}

impl MediaListCollection {
    /// Iterate over every entry across all list groupings.
    pub fn entries(&self) -> impl Iterator<Item = &ListEntry> {
        self.lists.iter().flat_map(|group| group.entries.iter())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaListGroup {
    #[serde(default)]
    pub entries: Vec<ListEntry>,
}

/// One user-tracked title with progress/score/status metadata.
///
/// Scores use AniList's `POINT_100` scale: floats in (0, 100], with 0
/// meaning unrated. All other numeric fields are optional on the wire and
/// resolved to defaults in one place (`rewind::normalize`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntry {
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub progress: Option<u32>,
    #[serde(default)]
    pub progress_volumes: Option<u32>,
    #[serde(default)]
    pub repeat: Option<u32>,
    #[serde(default)]
    pub status: Option<MediaListStatus>,
    /// Unix timestamp of the entry's last modification.
    #[serde(default)]
    pub updated_at: Option<i64>,
    #[serde(default)]
    pub completed_at: Option<FuzzyDate>,
    pub media: Media,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaListStatus {
    Current,
    Planning,
    Completed,
    Dropped,
    Paused,
    Repeating,
}

impl MediaListStatus {
    /// Whether the entry counts as actively in progress.
    pub fn is_active(self) -> bool {
        matches!(self, MediaListStatus::Current | MediaListStatus::Repeating)
    }
}

/// AniList fuzzy date: any component may be absent.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FuzzyDate {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    #[serde(default)]
    pub title: MediaTitle,
    /// Episode length in minutes (anime only).
    #[serde(default)]
    pub duration: Option<u32>,
    /// Release format, e.g. "TV", "MOVIE", "ONA" (anime only on the wire).
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    /// Main studios only (the query filters with `isMain: true`).
    #[serde(default)]
    pub studios: Option<StudioConnection>,
    /// ISO country code (manga only), e.g. "JP", "KR", "CN".
    #[serde(default)]
    pub country_of_origin: Option<String>,
    #[serde(default)]
    pub cover_image: Option<CoverImage>,
    #[serde(default)]
    pub banner_image: Option<String>,
}

impl Media {
    /// Display title: the English localization when present, romaji otherwise.
    pub fn display_title(&self) -> &str {
        self.title
            .english
            .as_deref()
            .filter(|title| !title.is_empty())
            .or(self.title.romaji.as_deref())
            .unwrap_or_default()
    }

    pub fn cover_image_url(&self) -> Option<&str> {
        self.cover_image
            .as_ref()
            .and_then(|cover| cover.large.as_deref())
            .filter(|url| !url.is_empty())
    }

    pub fn studio_names(&self) -> impl Iterator<Item = &str> {
        self.studios
            .iter()
            .flat_map(|connection| connection.nodes.iter())
            .map(|studio| studio.name.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MediaTitle {
    #[serde(default)]
    pub english: Option<String>,
    #[serde(default)]
    pub romaji: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudioConnection {
    #[serde(default)]
    pub nodes: Vec<Studio>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Studio {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoverImage {
    #[serde(default)]
    pub large: Option<String>,
}
