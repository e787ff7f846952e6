//! Keyword and phrase-group matching
//!
//! Containment is substring based on normalized text: a term that is part of
//! a longer token still counts (`"auto"` is found in `"autoscaling"`).

use super::normalize::normalize_str;

/// True if every term occurs in the response. An empty term list always matches.
pub fn contains_all_terms<S: AsRef<str>>(response: &str, terms: &[S]) -> bool {
    let normalized = normalize_str(response);
    all_terms_in(&normalized, terms)
}

/// True if at least one group is fully contained. No groups never matches.
pub fn contains_any_group<S: AsRef<str>>(response: &str, groups: &[Vec<S>]) -> bool {
    let normalized = normalize_str(response);
    groups.iter().any(|group| all_terms_in(&normalized, group))
}

fn all_terms_in<S: AsRef<str>>(normalized_response: &str, terms: &[S]) -> bool {
    terms
        .iter()
        .all(|term| normalized_response.contains(normalize_str(term.as_ref()).as_str()))
}
