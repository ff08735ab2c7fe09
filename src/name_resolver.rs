use std::cmp::Ordering;

/// Pluggable string-similarity scoring, so the metric can be swapped
/// without touching any resolution call site.
pub trait Similarity {
    /// Symmetric similarity in `0.0..=1.0`; 1.0 means identical.
    fn score(&self, a: &str, b: &str) -> f64;
}

/// Default scorer: Levenshtein distance normalized by the longer string.
#[derive(Debug, Default, Clone, Copy)]
pub struct NormalizedLevenshtein;

impl Similarity for NormalizedLevenshtein {
    fn score(&self, a: &str, b: &str) -> f64 {
        strsim::normalized_levenshtein(a, b)
    }
}

/// Cutoff and result-count configuration for one resolution call site.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchConfig {
    /// Minimum similarity score for a candidate to qualify.
    pub cutoff: f64,
    /// Maximum number of candidates returned.
    pub max_results: usize,
}

/// Recipe-name search from the browse/search screens.
pub const RECIPE_LOOKUP: MatchConfig = MatchConfig {
    cutoff: 0.4,
    max_results: 10,
};

/// Ingredient-name lookup while authoring a recipe.
pub const INGREDIENT_LOOKUP: MatchConfig = MatchConfig {
    cutoff: 0.6,
    max_results: 5,
};

/// Duplicate detection when naming a new recipe.
pub const DUPLICATE_CHECK: MatchConfig = MatchConfig {
    cutoff: 0.6,
    max_results: 3,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The normalized query is itself an element of the universe.
    Exact(String),
    /// Fuzzy candidates at or above the cutoff, best first.
    Candidates(Vec<Candidate>),
    NoMatch,
}

impl Resolution {
    pub fn is_no_match(&self) -> bool {
        matches!(self, Resolution::NoMatch)
    }

    /// Candidate names in rank order, empty for Exact/NoMatch.
    pub fn candidate_names(&self) -> Vec<String> {
        match self {
            Resolution::Candidates(candidates) => {
                candidates.iter().map(|c| c.name.clone()).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Resolve free-text input against a universe of known names.
///
/// The query is trimmed and lowercased first; an empty query never matches
/// anything. Exact membership short-circuits fuzzy scoring entirely, so an
/// exact hit is returned regardless of cutoff. Otherwise every universe
/// member is scored, members at or above the cutoff are ranked by
/// descending score (ties keep universe order) and truncated to
/// `max_results`.
///
/// Pure function over the provided universe; no side effects.
pub fn resolve(
    query: &str,
    universe: &[String],
    config: MatchConfig,
    scorer: &impl Similarity,
) -> Resolution {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Resolution::NoMatch;
    }

    if universe.iter().any(|name| *name == query) {
        return Resolution::Exact(query);
    }

    let mut candidates: Vec<Candidate> = universe
        .iter()
        .map(|name| Candidate {
            name: name.clone(),
            score: scorer.score(&query, name),
        })
        .filter(|c| c.score >= config.cutoff)
        .collect();

    // Stable sort keeps universe order for equal scores.
    candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    candidates.truncate(config.max_results);

    if candidates.is_empty() {
        Resolution::NoMatch
    } else {
        Resolution::Candidates(candidates)
    }
}

/// `resolve` with the default scorer.
pub fn resolve_default(query: &str, universe: &[String], config: MatchConfig) -> Resolution {
    resolve(query, universe, config, &NormalizedLevenshtein)
}
