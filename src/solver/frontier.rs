use std::collections::{BTreeMap, BTreeSet};

use crate::cell::Distance;
use crate::CellId;

/// Unfinalized cells bucketed by tentative distance. Among equally distant cells the highest id
/// is selected first.
#[derive(Clone, Debug, Default)]
pub(crate) struct Frontier {
    buckets: BTreeMap<Distance, BTreeSet<CellId>>,
    len: usize,
}

impl Frontier {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn insert(&mut self, id: CellId, distance: Distance) {
        if self.buckets.entry(distance).or_default().insert(id) {
            self.len += 1;
        }
    }

    /// Moves `id` from the `from` bucket to the `to` bucket. Returns false, leaving the
    /// frontier untouched, when `id` is not queued at `from`.
    pub fn requeue(&mut self, id: CellId, from: Distance, to: Distance) -> bool {
        if !self.remove(id, from) {
            return false;
        }
        self.insert(id, to);
        true
    }

    fn remove(&mut self, id: CellId, distance: Distance) -> bool {
        let Some(bucket) = self.buckets.get_mut(&distance) else {
            return false;
        };
        if !bucket.remove(&id) {
            return false;
        }
        if bucket.is_empty() {
            self.buckets.remove(&distance);
        }
        self.len -= 1;
        true
    }

    pub fn pop_nearest(&mut self) -> Option<(CellId, Distance)> {
        let mut entry = self.buckets.first_entry()?;
        let distance = *entry.key();
        let picked = entry.get_mut().pop_last()?;
        if entry.get().is_empty() {
            entry.remove();
        }
        self.len -= 1;
        Some((picked, distance))
    }
}
