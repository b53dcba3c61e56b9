//! Aggregate analytics over meetings and repositories.
//!
//! All aggregation here is deterministic: counting preserves first-seen
//! order and ranking uses a stable sort, so ties always resolve to the
//! earlier-encountered key. Functions that look at trend windows take `now`
//! explicitly instead of reading the clock.

pub mod developer;
pub mod meetings;

use serde_json::Value;

/// Count occurrences, preserving the order in which keys were first seen.
pub fn count_in_order<I>(items: I) -> Vec<(String, usize)>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut index: std::collections::HashMap<String, usize> = std::collections::HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for item in items {
        let key = item.as_ref();
        match index.get(key) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(key.to_string(), counts.len());
                counts.push((key.to_string(), 1));
            }
        }
    }

    counts
}

/// Top `n` keys by descending count; ties keep first-seen order.
pub fn top_n(mut counts: Vec<(String, usize)>, n: usize) -> Vec<String> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    counts.into_iter().map(|(key, _)| key).collect()
}

/// Render a count table as a JSON object of key -> count.
pub fn counts_to_object(counts: &[(String, usize)]) -> Value {
    let mut map = serde_json::Map::new();
    for (key, count) in counts {
        map.insert(key.clone(), Value::from(*count));
    }
    Value::Object(map)
}
