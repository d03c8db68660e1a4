//! Shared list helpers: search matching and status tallies.

use std::collections::HashMap;
use std::hash::Hash;

use super::viewmodel::StatusCount;

/// Case-insensitive substring match of `query` against any of `fields`.
///
/// A blank query (empty or whitespace only) matches everything.
#[must_use]
pub fn matches_query(query: &str, fields: &[&str]) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields.iter().any(|field| field.to_lowercase().contains(&needle))
}

/// Counts `items` per status, reporting every status in `order`, zeros
/// included.
pub fn count_by<T, S, F>(items: &[T], order: &[S], status_of: F) -> Vec<StatusCount<S>>
where
    S: Copy + Eq + Hash,
    F: Fn(&T) -> S,
{
    let mut tally: HashMap<S, usize> = HashMap::new();
    for item in items {
        *tally.entry(status_of(item)).or_default() += 1;
    }
    order
        .iter()
        .map(|&status| StatusCount {
            status,
            count: tally.get(&status).copied().unwrap_or(0),
        })
        .collect()
}
