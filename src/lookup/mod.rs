//! Query-to-key resolution: exact case-insensitive match first, then
//! approximate matching over the catalog keys.

pub mod similarity;

pub use similarity::{sequence_ratio, Matcher};

use crate::data::catalog::Catalog;

/// At most this many fuzzy candidates are kept per query.
pub const MAX_CANDIDATES: usize = 3;

/// Candidates scoring at or above `cutoff` against `query`, best first,
/// at most `limit` of them. Equal scores keep the candidates' input order,
/// so callers that pass keys in catalog order get catalog-order ties.
pub fn close_matches<'a, I>(query: &str, candidates: I, limit: usize, cutoff: f64) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let matcher = Matcher::new(query);
    let mut scored: Vec<(&str, f64)> = Vec::new();
    for candidate in candidates {
        if matcher.length_bound(candidate) < cutoff {
            continue;
        }
        let score = matcher.ratio(candidate);
        if score >= cutoff {
            scored.push((candidate, score));
        }
    }
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));
    scored.truncate(limit);
    scored.into_iter().map(|(candidate, _)| candidate).collect()
}

/// Resolve a free-text query to a catalog key, or None when nothing is
/// close enough. The query is lowercased; keys are lowercase by convention.
pub fn resolve<'a, T>(catalog: &'a Catalog<T>, query: &str, cutoff: f64) -> Option<&'a str> {
    let normalized = query.to_lowercase();
    if let Some(key) = catalog.keys().find(|&key| key == normalized) {
        return Some(key);
    }
    close_matches(&normalized, catalog.keys(), MAX_CANDIDATES, cutoff)
        .into_iter()
        .next()
}
