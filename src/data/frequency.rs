use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use serde::Serialize;

/// Separator between values in multi-valued cells such as `listed_in`.
pub const LIST_SEPARATOR: &str = ", ";

// ---------------------------------------------------------------------------
// FrequencyTable – ordered value → count pairs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrequencyEntry<K> {
    pub value: K,
    pub count: usize,
}

/// Value counts in a defined order. The order depends on the constructor:
/// [`count_values`] ranks by count, [`count_by_key`] sorts by key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable<K> {
    pub entries: Vec<FrequencyEntry<K>>,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: Clone> FrequencyTable<K> {
    /// The first `n` entries, order preserved.
    pub fn top(&self, n: usize) -> Self {
        Self {
            entries: self.entries.iter().take(n).cloned().collect(),
        }
    }
}

impl<K> FrequencyTable<K> {
    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, usize)> {
        self.entries.iter().map(|e| (&e.value, e.count))
    }
}

/// Count distinct values, descending by count. Ties keep the order in which
/// each value was first seen.
pub fn count_values<K, I>(values: I) -> FrequencyTable<K>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = K>,
{
    let mut slot: HashMap<K, usize> = HashMap::new();
    let mut entries: Vec<FrequencyEntry<K>> = Vec::new();
    for v in values {
        match slot.get(&v) {
            Some(&i) => entries[i].count += 1,
            None => {
                slot.insert(v.clone(), entries.len());
                entries.push(FrequencyEntry { value: v, count: 1 });
            }
        }
    }
    // sort_by is stable, so first-seen order survives among equal counts.
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    FrequencyTable { entries }
}

/// Like [`count_values`] but each cell is split on [`LIST_SEPARATOR`] first;
/// every token counts once.
pub fn count_exploded<'a, I>(cells: I) -> FrequencyTable<String>
where
    I: IntoIterator<Item = &'a str>,
{
    count_values(
        cells
            .into_iter()
            .flat_map(|cell| cell.split(LIST_SEPARATOR))
            .map(str::to_string),
    )
}

/// Count values and order ascending by the value itself (trend charts).
pub fn count_by_key<K, I>(values: I) -> FrequencyTable<K>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut counts: BTreeMap<K, usize> = BTreeMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }
    FrequencyTable {
        entries: counts
            .into_iter()
            .map(|(value, count)| FrequencyEntry { value, count })
            .collect(),
    }
}
