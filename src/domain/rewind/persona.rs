use serde::{Deserialize, Serialize};

/// Fraction of completed anime that must be movies for the Cinephile rule.
const MOVIE_RATIO_THRESHOLD: f64 = 0.3;

/// Viewer classification assigned from the finalized aggregates.
///
/// The rules are evaluated strictly in declaration order and the first match
/// wins; the order is semantically significant (a Titan who mostly watches
/// romance is still a Titan).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Persona {
    Titan,
    Cinephile,
    Connoisseur,
    Critic,
    HopelessRomantic,
    Futurist,
    Athlete,
    EdgeWalker,
    ShonenProtagonist,
    CasualObserver,
}

/// Scalar/ranked aggregate inputs the classifier reads. Derivable from
/// `OverallStats` alone, so a stored report reproduces its own persona.
#[derive(Debug, Clone)]
pub struct PersonaInputs {
    pub episodes_watched: u64,
    pub anime_completed: u64,
    /// Completed entries with the MOVIE release format.
    pub movie_count: u64,
    /// On the `POINT_100` scale.
    pub average_score: f64,
    /// Top three genres by global frequency, highest first.
    pub top_genres: Vec<String>,
}

impl Persona {
    pub fn classify(inputs: &PersonaInputs) -> Persona {
        if inputs.episodes_watched > 1000 {
            return Persona::Titan;
        }

        if inputs.anime_completed > 10
            && inputs.movie_count as f64 / inputs.anime_completed as f64 > MOVIE_RATIO_THRESHOLD
        {
            return Persona::Cinephile;
        }

        if inputs.average_score >= 85.0 && inputs.anime_completed > 5 {
            return Persona::Connoisseur;
        }

        if inputs.average_score < 60.0 && inputs.anime_completed > 20 {
            return Persona::Critic;
        }

        if inputs.has_genre(&["Romance", "Drama"]) {
            return Persona::HopelessRomantic;
        }
        if inputs.has_genre(&["Sci-Fi", "Mecha"]) {
            return Persona::Futurist;
        }
        if inputs.has_genre(&["Sports"]) {
            return Persona::Athlete;
        }
        if inputs.has_genre(&["Horror", "Psychological"]) {
            return Persona::EdgeWalker;
        }
        if inputs.has_genre(&["Action", "Adventure"]) {
            return Persona::ShonenProtagonist;
        }

        Persona::CasualObserver
    }

    pub fn title(self) -> &'static str {
        match self {
            Persona::Titan => "The Titan",
            Persona::Cinephile => "The Cinephile",
            Persona::Connoisseur => "The Connoisseur",
            Persona::Critic => "The Critic",
            Persona::HopelessRomantic => "The Hopeless Romantic",
            Persona::Futurist => "The Futurist",
            Persona::Athlete => "The Athlete",
            Persona::EdgeWalker => "The Edge Walker",
            Persona::ShonenProtagonist => "The Shonen Protagonist",
            Persona::CasualObserver => "The Casual Observer",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Persona::Titan => "You consume anime at a rate that defies logic.",
            Persona::Cinephile => "You prefer the silver screen over the weekly grind.",
            Persona::Connoisseur => "You only accept the absolute peak of fiction.",
            Persona::Critic => "You watch everything, just to say you hated it.",
            Persona::HopelessRomantic => "You live for the feels and the heartbreak.",
            Persona::Futurist => "You dream of electric sheep and giant robots.",
            Persona::Athlete => "Training arcs are your daily motivation.",
            Persona::EdgeWalker => "You stare into the abyss, and it blinks first.",
            Persona::ShonenProtagonist => "You're just one training arc away from greatness.",
            Persona::CasualObserver => "You enjoy anime at a healthy, human pace.",
        }
    }
}

impl PersonaInputs {
    fn has_genre(&self, wanted: &[&str]) -> bool {
        self.top_genres
            .iter()
            .any(|genre| wanted.iter().any(|w| genre == w))
    }
}

/// The persona as it appears in the report: fixed title plus fixed
/// one-sentence description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaSummary {
    pub title: String,
    pub description: String,
}

impl From<Persona> for PersonaSummary {
    fn from(persona: Persona) -> Self {
        Self {
            title: persona.title().to_string(),
            description: persona.description().to_string(),
        }
    }
}
