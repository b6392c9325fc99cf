use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::rewind::accumulator::{AccumulatorState, MediaSnapshot, MonthBucket};
use crate::domain::rewind::persona::PersonaInputs;

/// Score histogram bin width; bins cover 10, 20, ... 100 on the
/// `POINT_100` scale.
const SCORE_BIN_WIDTH: f64 = 10.0;

const TOP_STUDIO_LIMIT: usize = 5;
const TOP_LIST_LIMIT: usize = 3;
const MONTH_GENRE_LIMIT: usize = 3;
const COLLAGE_COVER_LIMIT: usize = 50;

const MINUTES_PER_DAY: f64 = 1440.0;

/// All finalized year-wide aggregates. Plain data, fully serializable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverallStats {
    pub anime_completed: u64,
    pub manga_completed: u64,
    pub episodes_watched: u64,
    pub minutes_watched: u64,
    pub total_days_watched: f64,
    pub chapters_read: u64,
    pub volumes_read: u64,
    pub rewatches: u64,
    pub rereads: u64,
    pub average_score: f64,
    pub anime_avg_score: f64,
    pub manga_avg_score: f64,
    pub top_genres: Vec<(String, u64)>,
    pub top_studios: Vec<(String, u64)>,
    pub formats: Vec<(String, u64)>,
    pub countries: Vec<(String, u64)>,
    /// All ten bins 10..=100 are always present, zero-count included.
    pub score_distribution: Vec<(u32, u64)>,
    pub best_anime: Option<MediaSnapshot>,
    pub best_manga: Option<MediaSnapshot>,
    pub top_anime_list: Vec<MediaSnapshot>,
    pub top_manga_list: Vec<MediaSnapshot>,
    pub collage_covers: Vec<String>,
    /// Total completions per month; index 0 = January.
    pub activity_counts: [u64; 12],
}

impl OverallStats {
    /// The scalar/ranked subset the persona classifier consumes.
    pub fn persona_inputs(&self) -> PersonaInputs {
        PersonaInputs {
            episodes_watched: self.episodes_watched,
            anime_completed: self.anime_completed,
            movie_count: self
                .formats
                .iter()
                .find(|(format, _)| format == "MOVIE")
                .map_or(0, |(_, count)| *count),
            average_score: self.average_score,
            top_genres: self
                .top_genres
                .iter()
                .take(TOP_LIST_LIMIT)
                .map(|(genre, _)| genre.clone())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivitySummary {
    pub anime_completed: u64,
    pub manga_completed: u64,
    pub total_titles_completed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthOverview {
    /// Calendar month, 1..=12.
    pub month: u32,
    pub activity_summary: ActivitySummary,
    pub top_anime: Option<MediaSnapshot>,
    pub top_manga: Option<MediaSnapshot>,
    pub top_genres: Vec<String>,
}

pub fn overall_stats(state: &AccumulatorState) -> OverallStats {
    let (anime_scores, manga_scores) = bucket_scores(state);

    let mut ranked_anime = ranked_snapshots(state, |bucket| &bucket.anime);
    let mut ranked_manga = ranked_snapshots(state, |bucket| &bucket.manga);
    let best_anime = ranked_anime.first().cloned();
    let best_manga = ranked_manga.first().cloned();
    ranked_anime.truncate(TOP_LIST_LIMIT);
    ranked_manga.truncate(TOP_LIST_LIMIT);

    OverallStats {
        anime_completed: state.anime_completed,
        manga_completed: state.manga_completed,
        episodes_watched: state.episodes_watched,
        minutes_watched: state.minutes_watched,
        total_days_watched: round1(state.minutes_watched as f64 / MINUTES_PER_DAY),
        chapters_read: state.chapters_read,
        volumes_read: state.volumes_read,
        rewatches: state.rewatches,
        rereads: state.rereads,
        average_score: mean_rounded(&state.scores),
        anime_avg_score: mean_rounded(&anime_scores),
        manga_avg_score: mean_rounded(&manga_scores),
        top_genres: state.genres.ranked(),
        top_studios: {
            let mut studios = state.studios.ranked();
            studios.truncate(TOP_STUDIO_LIMIT);
            studios
        },
        formats: state.formats.ranked(),
        countries: state.countries.ranked(),
        score_distribution: score_distribution(&state.scores),
        best_anime,
        best_manga,
        top_anime_list: ranked_anime,
        top_manga_list: ranked_manga,
        collage_covers: collage_covers(state),
        activity_counts: activity_counts(state),
    }
}

/// One record per month with activity, ascending month order.
pub fn monthly_overview(state: &AccumulatorState) -> Vec<MonthOverview> {
    state
        .months
        .iter()
        .map(|(&month, bucket)| {
            let anime_completed = bucket.anime.len() as u64;
            let manga_completed = bucket.manga.len() as u64;
            MonthOverview {
                month,
                activity_summary: ActivitySummary {
                    anime_completed,
                    manga_completed,
                    total_titles_completed: anime_completed + manga_completed,
                },
                top_anime: top_scored(&bucket.anime),
                top_manga: top_scored(&bucket.manga),
                top_genres: bucket
                    .genres
                    .ranked()
                    .into_iter()
                    .take(MONTH_GENRE_LIMIT)
                    .map(|(genre, _)| genre)
                    .collect(),
            }
        })
        .collect()
}

/// The busiest month; ties go to the first occurrence in ascending month
/// order.
pub fn peak_month(overview: &[MonthOverview]) -> Option<MonthOverview> {
    overview
        .iter()
        .fold(None::<&MonthOverview>, |best, candidate| match best {
            Some(best)
                if candidate.activity_summary.total_titles_completed
                    <= best.activity_summary.total_titles_completed =>
            {
                Some(best)
            }
            _ => Some(candidate),
        })
        .cloned()
}

/// Mean rounded to 2 decimals; 0 for an empty sample set, never a division
/// error.
fn mean_rounded(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    round2(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Positive score samples from the month buckets, per category. The buckets
/// are the source of truth for category averages.
fn bucket_scores(state: &AccumulatorState) -> (Vec<f64>, Vec<f64>) {
    let mut anime = Vec::new();
    let mut manga = Vec::new();
    for bucket in state.months.values() {
        anime.extend(bucket.anime.iter().map(|s| s.score).filter(|&s| s > 0.0));
        manga.extend(bucket.manga.iter().map(|s| s.score).filter(|&s| s > 0.0));
    }
    (anime, manga)
}

/// Fixed 10-wide histogram over bins 10..=100. A score falls in
/// ⌊score / 10⌋ × 10, clamped into [10, 90]: exactly 100 folds into bin 90
/// (deliberate), and sub-10 scores count in bin 10 so the bins always sum to
/// the sample count.
fn score_distribution(scores: &[f64]) -> Vec<(u32, u64)> {
    let mut bins: Vec<(u32, u64)> = (1..=10).map(|i| (i * 10, 0)).collect();
    for &score in scores {
        let bin = (((score / SCORE_BIN_WIDTH).floor() as u32) * 10).clamp(10, 90);
        if let Some(slot) = bins.iter_mut().find(|(b, _)| *b == bin) {
            slot.1 += 1;
        }
    }
    bins
}

/// All snapshots of one category sorted by score descending. Ties keep
/// encounter order: months ascending, bucket order within a month (stable
/// sort), so the first element is the year's best.
fn ranked_snapshots<F>(state: &AccumulatorState, pick: F) -> Vec<MediaSnapshot>
where
    F: Fn(&MonthBucket) -> &Vec<MediaSnapshot>,
{
    let mut ranked: Vec<MediaSnapshot> = state
        .months
        .values()
        .flat_map(|bucket| pick(bucket).iter().cloned())
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Highest-scoring snapshot of a single month; ties go to the earliest
/// encountered.
fn top_scored(snapshots: &[MediaSnapshot]) -> Option<MediaSnapshot> {
    snapshots
        .iter()
        .fold(None::<&MediaSnapshot>, |best, candidate| match best {
            Some(best) if candidate.score <= best.score => Some(best),
            _ => Some(candidate),
        })
        .cloned()
}

/// Deduplicated cover URLs in first-seen order (months ascending, anime
/// before manga within a month), truncated to the collage limit.
fn collage_covers(state: &AccumulatorState) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut covers = Vec::new();
    let all = state
        .months
        .values()
        .flat_map(|bucket| bucket.anime.iter().chain(bucket.manga.iter()));
    for snapshot in all {
        let Some(url) = snapshot.cover_image.as_deref().filter(|u| !u.is_empty()) else {
            continue;
        };
        if seen.insert(url.to_string()) {
            covers.push(url.to_string());
            if covers.len() == COLLAGE_COVER_LIMIT {
                break;
            }
        }
    }
    covers
}

fn activity_counts(state: &AccumulatorState) -> [u64; 12] {
    let mut counts = [0u64; 12];
    for (&month, bucket) in &state.months {
        counts[month as usize - 1] = (bucket.anime.len() + bucket.manga.len()) as u64;
    }
    counts
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
