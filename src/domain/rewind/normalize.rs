use chrono::{DateTime, Datelike};
use serde::{Deserialize, Serialize};

use crate::domain::entries::{ListEntry, MediaListStatus};

/// Episode length assumed when AniList has no duration on record. Used only
/// for the minutes-watched computation, never stored back on the entry.
pub const DEFAULT_EPISODE_MINUTES: u64 = 24;

pub const UNKNOWN_FORMAT: &str = "UNKNOWN";

pub const DEFAULT_COUNTRY: &str = "JP";

/// A lightweight view of an actively-watched/read entry, kept in the
/// report's ongoing lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub title: String,
    pub cover_image: Option<String>,
    pub progress: u64,
    pub score: f64,
}

/// All optional entry fields resolved to their defaults in one place, so the
/// accumulator never touches an `Option`.
#[derive(Debug)]
pub struct ResolvedEntry<'a> {
    pub title: &'a str,
    pub score: f64,
    pub progress: u64,
    pub progress_volumes: u64,
    pub repeat: u64,
    /// Effective per-episode minutes (anime only meaningful).
    pub episode_minutes: u64,
    pub format: &'a str,
    pub country: &'a str,
    pub cover_image: Option<&'a str>,
    pub banner_image: Option<&'a str>,
    pub genres: &'a [String],
}

impl<'a> ResolvedEntry<'a> {
    pub fn from_entry(entry: &'a ListEntry) -> Self {
        let media = &entry.media;
        Self {
            title: media.display_title(),
            score: entry.score,
            progress: u64::from(entry.progress.unwrap_or(0)),
            progress_volumes: u64::from(entry.progress_volumes.unwrap_or(0)),
            repeat: u64::from(entry.repeat.unwrap_or(0)),
            episode_minutes: media
                .duration
                .map_or(DEFAULT_EPISODE_MINUTES, u64::from),
            format: media.format.as_deref().unwrap_or(UNKNOWN_FORMAT),
            country: media.country_of_origin.as_deref().unwrap_or(DEFAULT_COUNTRY),
            cover_image: media.cover_image_url(),
            banner_image: media.banner_image.as_deref().filter(|url| !url.is_empty()),
            genres: &media.genres,
        }
    }

    pub fn minutes_watched(&self) -> u64 {
        self.progress * self.episode_minutes
    }
}

/// Month (1..=12) in which the entry was completed, iff the completion year
/// matches the target year exactly. Entries failing this check take no part
/// in the completed-path accumulation.
pub fn completed_month(entry: &ListEntry, year: i32) -> Option<u32> {
    let completed = entry.completed_at.as_ref()?;
    if completed.year != Some(year) {
        return None;
    }
    completed.month.filter(|month| (1..=12).contains(month))
}

/// Snapshot for the ongoing lists, iff the entry is actively in progress and
/// was last touched within the target year. `updatedAt` is interpreted in
/// UTC. Evaluated independently of the completed check.
pub fn ongoing_snapshot(entry: &ListEntry, year: i32) -> Option<ProgressSnapshot> {
    if !entry.status.is_some_and(MediaListStatus::is_active) {
        return None;
    }
    let updated_at = entry.updated_at?;
    let updated = DateTime::from_timestamp(updated_at, 0)?;
    if updated.year() != year {
        return None;
    }

    let resolved = ResolvedEntry::from_entry(entry);
    Some(ProgressSnapshot {
        title: resolved.title.to_string(),
        cover_image: resolved.cover_image.map(str::to_string),
        progress: resolved.progress,
        score: resolved.score,
    })
}
