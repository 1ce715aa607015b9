//! # Token Lists

use std::{collections::HashSet, hash::Hash};

/// Deduplicate, keeping the first occurrence of each item in order.
pub fn dedup_ordered<T, I>(items: I) -> Vec<T>
where
    I: IntoIterator<Item = T>,
    T: Eq + Hash + Clone,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
