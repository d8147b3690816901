use std::collections::BTreeMap;

use super::record::{Dataset, Record};

/// Maps a record's original position to the record itself.
///
/// Removing an entry leaves a hole in the key space instead of shifting the following records,
/// so a position handed out to a client keeps pointing at the same record.
///
/// ```text
///  domain = 5
/// +---+---+---+---+---+
/// | 0 | 1 | 2 | 3 | 4 |     after remove(1) and remove(3):
/// | A | B | C | D | E |     +---+---+---+
/// +---+---+---+---+---+     | 0 | 2 | 4 |
///                           | A | C | E |
///                           +---+---+---+
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionIndex {
    entries: BTreeMap<usize, Record>,
    /// Number of positions materialised. Doesn't shrink when entries are removed.
    domain: usize,
}

impl PositionIndex {
    /// Indexes the first `limit` records of `dataset`, or all of them when `limit` is `None`.
    pub fn build(dataset: &Dataset, limit: Option<usize>) -> Self {
        let limit = limit.unwrap_or(dataset.len()).min(dataset.len());
        let entries = dataset[..limit]
            .iter()
            .cloned()
            .enumerate()
            .collect();

        Self {
            entries,
            domain: limit,
        }
    }

    pub fn domain(&self) -> usize {
        self.domain
    }

    /// Number of positions still present.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Record> {
        self.entries.get(&position)
    }

    pub fn contains(&self, position: usize) -> bool {
        self.entries.contains_key(&position)
    }

    pub fn remove(&mut self, position: usize) -> Option<Record> {
        self.entries.remove(&position)
    }

    /// Present entries at or after `position`, in ascending order.
    pub fn from_position(&self, position: usize) -> impl Iterator<Item = (usize, &Record)> {
        self.entries
            .range(position..)
            .map(|(position, record)| (*position, record))
    }
}
