use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::entries::{ListEntry, MediaListCollection};
use crate::domain::rewind::normalize::{
    ProgressSnapshot, ResolvedEntry, completed_month, ongoing_snapshot,
};

/// Frequency counter that remembers first-insertion order, so that entries
/// with equal counts rank deterministically for a fixed input ordering.
#[derive(Debug, Clone, Default)]
pub struct FrequencyCounter {
    counts: HashMap<String, u64>,
    order: Vec<String>,
}

impl FrequencyCounter {
    pub fn bump(&mut self, key: &str) {
        if let Some(count) = self.counts.get_mut(key) {
            *count += 1;
        } else {
            self.counts.insert(key.to_string(), 1);
            self.order.push(key.to_string());
        }
    }

    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All entries sorted by count descending; ties keep insertion order
    /// (stable sort over the insertion-ordered backing list).
    pub fn ranked(&self) -> Vec<(String, u64)> {
        let mut ranked: Vec<(String, u64)> = self
            .order
            .iter()
            .map(|key| (key.clone(), self.get(key)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

/// Completed-title snapshot kept per month bucket; also reused for the
/// report's best-of and top-list fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaSnapshot {
    pub title: String,
    pub score: f64,
    pub cover_image: Option<String>,
    pub banner_image: Option<String>,
    /// Release format; only recorded for anime.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Per-calendar-month aggregation scope within a single year's report.
#[derive(Debug, Clone, Default)]
pub struct MonthBucket {
    pub anime: Vec<MediaSnapshot>,
    pub manga: Vec<MediaSnapshot>,
    pub genres: FrequencyCounter,
}

/// Running totals for one report build. Created fresh per build, owned
/// exclusively by it, and discarded after assembly.
#[derive(Debug, Default)]
pub struct AccumulatorState {
    pub anime_completed: u64,
    pub manga_completed: u64,
    pub episodes_watched: u64,
    pub minutes_watched: u64,
    pub chapters_read: u64,
    pub volumes_read: u64,
    pub rewatches: u64,
    pub rereads: u64,
    pub genres: FrequencyCounter,
    pub studios: FrequencyCounter,
    pub formats: FrequencyCounter,
    pub countries: FrequencyCounter,
    /// Combined anime+manga score samples, strictly positive.
    pub scores: Vec<f64>,
    /// Only months with activity are present; iteration is ascending.
    pub months: BTreeMap<u32, MonthBucket>,
    pub ongoing_anime: Vec<ProgressSnapshot>,
    pub ongoing_manga: Vec<ProgressSnapshot>,
}

impl AccumulatorState {
    /// Single forward pass over the anime collection.
    pub fn ingest_anime(&mut self, collection: &MediaListCollection, year: i32) {
        for entry in collection.entries() {
            if let Some(snapshot) = ongoing_snapshot(entry, year) {
                self.ongoing_anime.push(snapshot);
            }
            if let Some(month) = completed_month(entry, year) {
                self.record_completed_anime(entry, month);
            }
        }
    }

    /// Single forward pass over the manga collection.
    pub fn ingest_manga(&mut self, collection: &MediaListCollection, year: i32) {
        for entry in collection.entries() {
            if let Some(snapshot) = ongoing_snapshot(entry, year) {
                self.ongoing_manga.push(snapshot);
            }
            if let Some(month) = completed_month(entry, year) {
                self.record_completed_manga(entry, month);
            }
        }
    }

    fn record_completed_anime(&mut self, entry: &ListEntry, month: u32) {
        let resolved = ResolvedEntry::from_entry(entry);

        self.anime_completed += 1;
        self.episodes_watched += resolved.progress;
        self.minutes_watched += resolved.minutes_watched();
        self.rewatches += resolved.repeat;
        self.formats.bump(resolved.format);
        for studio in entry.media.studio_names() {
            self.studios.bump(studio);
        }

        self.record_shared(&resolved, month);

        let snapshot = MediaSnapshot {
            title: resolved.title.to_string(),
            score: resolved.score,
            cover_image: resolved.cover_image.map(str::to_string),
            banner_image: resolved.banner_image.map(str::to_string),
            format: Some(resolved.format.to_string()),
        };
        self.months.entry(month).or_default().anime.push(snapshot);
    }

    fn record_completed_manga(&mut self, entry: &ListEntry, month: u32) {
        let resolved = ResolvedEntry::from_entry(entry);

        self.manga_completed += 1;
        self.chapters_read += resolved.progress;
        self.volumes_read += resolved.progress_volumes;
        self.rereads += resolved.repeat;
        self.countries.bump(resolved.country);

        self.record_shared(&resolved, month);

        let snapshot = MediaSnapshot {
            title: resolved.title.to_string(),
            score: resolved.score,
            cover_image: resolved.cover_image.map(str::to_string),
            banner_image: resolved.banner_image.map(str::to_string),
            format: None,
        };
        self.months.entry(month).or_default().manga.push(snapshot);
    }

    fn record_shared(&mut self, resolved: &ResolvedEntry<'_>, month: u32) {
        if resolved.score > 0.0 {
            self.scores.push(resolved.score);
        }
        let bucket = self.months.entry(month).or_default();
        for genre in resolved.genres {
            self.genres.bump(genre);
            bucket.genres.bump(genre);
        }
    }
}
