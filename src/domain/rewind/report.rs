use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::entries::MediaListCollection;
use crate::domain::rewind::accumulator::AccumulatorState;
use crate::domain::rewind::finalize::{
    MonthOverview, OverallStats, monthly_overview, overall_stats, peak_month,
};
use crate::domain::rewind::normalize::ProgressSnapshot;
use crate::domain::rewind::persona::{Persona, PersonaSummary};

/// The finished year-in-review report. Immutable once built, composed only
/// of primitives, sequences, and mappings so callers can persist or ship it
/// as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub year: i32,
    pub persona: PersonaSummary,
    pub overall: OverallStats,
    pub ongoing: OngoingLists,
    pub highlights: Highlights,
    /// Opaque favorites payload, passed through unmodified.
    pub favorites: Value,
    pub monthly_overview: Vec<MonthOverview>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OngoingLists {
    pub anime: Vec<ProgressSnapshot>,
    pub manga: Vec<ProgressSnapshot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Highlights {
    pub peak_month: Option<MonthOverview>,
}

/// Reduce a user's anime and manga collections into the target year's
/// report. Pure and synchronous: same inputs, same report. All intermediate
/// state is owned by this call and dropped before it returns.
pub fn build_report(
    anime: &MediaListCollection,
    manga: &MediaListCollection,
    favorites: Value,
    year: i32,
) -> Report {
    let mut state = AccumulatorState::default();
    state.ingest_anime(anime, year);
    state.ingest_manga(manga, year);

    let overall = overall_stats(&state);
    let monthly = monthly_overview(&state);
    let peak = peak_month(&monthly);
    let persona = Persona::classify(&overall.persona_inputs());

    let AccumulatorState {
        mut ongoing_anime,
        mut ongoing_manga,
        ..
    } = state;
    sort_by_progress(&mut ongoing_anime);
    sort_by_progress(&mut ongoing_manga);

    Report {
        year,
        persona: persona.into(),
        overall,
        ongoing: OngoingLists {
            anime: ongoing_anime,
            manga: ongoing_manga,
        },
        highlights: Highlights { peak_month: peak },
        favorites,
        monthly_overview: monthly,
    }
}

/// Progress descending; stable, so equal-progress entries keep input order.
fn sort_by_progress(snapshots: &mut [ProgressSnapshot]) {
    snapshots.sort_by(|a, b| b.progress.cmp(&a.progress));
}
