//! Canonical in-memory point storage.
//!
//! The store owns the session's full point list. All downstream consumers
//! (filtering, clustering, styling) operate on insertion-ordered snapshots
//! cloned out of the store, so a rebuild never observes a half-applied
//! mutation: writers take the lock, readers copy, and derived structures
//! are swapped wholesale.

use std::sync::Arc;

use log::{debug, warn};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::core::{Point, PointDraft, PointId};
use crate::loader::RawRecord;

/// Outcome of a bulk load, for the host's notification surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadStats {
    /// Records admitted into the store.
    pub loaded: usize,
    /// Records dropped: unapproved, missing required fields, or carrying
    /// unusable coordinates.
    pub skipped: usize,
}

/// In-memory point store.
///
/// Cloning the store is cheap and shares the underlying data; writes are
/// serialized through an internal lock so multi-threaded hosts get the
/// same single-writer discipline a single-threaded host gets for free.
///
/// Points are immutable once stored: [`PointStore::replace`] removes the
/// old record and inserts the new data under a fresh [`PointId`].
///
/// # Examples
///
/// ```
/// use poimap::core::{Category, PointDraft};
/// use poimap::store::PointStore;
///
/// let store = PointStore::new();
/// let id = store
///     .insert(PointDraft::new("大同鐵材行", Category::Materials, 120.68, 24.14))
///     .unwrap();
///
/// assert_eq!(store.len(), 1);
/// assert_eq!(store.get(id).unwrap().name, "大同鐵材行");
/// ```
#[derive(Clone, Default)]
pub struct PointStore {
    data: Arc<RwLock<StoreData>>,
}

#[derive(Default)]
struct StoreData {
    /// Insertion-ordered; the dataset stays in the low thousands, so linear
    /// id lookups are fine.
    points: Vec<Point>,
    next_id: u64,
}

impl PointStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a draft, assigning the next id.
    ///
    /// Returns `None` when the draft fails the admission rules (blank name
    /// or non-finite coordinates); the store never holds an invalid point.
    pub fn insert(&self, draft: PointDraft) -> Option<PointId> {
        if !draft.is_valid() {
            warn!(
                "rejecting invalid point {:?} (lon={}, lat={})",
                draft.name, draft.longitude, draft.latitude
            );
            return None;
        }

        let mut data = self.data.write();
        let id = PointId(data.next_id);
        data.next_id += 1;
        data.points.push(draft.into_point(id));
        Some(id)
    }

    /// Bulk-load raw records, dropping anything that fails validation.
    ///
    /// Unapproved records are skipped quietly; approved-but-invalid records
    /// are logged. Loading never fails: a fully unusable batch simply
    /// yields `loaded == 0`.
    pub fn load<I>(&self, records: I) -> LoadStats
    where
        I: IntoIterator<Item = RawRecord>,
    {
        let mut stats = LoadStats::default();
        for record in records {
            if !record.is_approved() {
                debug!("skipping unapproved record {:?}", record.name);
                stats.skipped += 1;
                continue;
            }
            match record.validate() {
                Some(draft) => match self.insert(draft) {
                    Some(_) => stats.loaded += 1,
                    None => stats.skipped += 1,
                },
                None => {
                    warn!("skipping unusable record {:?}", record.name);
                    stats.skipped += 1;
                }
            }
        }
        debug!("load complete: {} loaded, {} skipped", stats.loaded, stats.skipped);
        stats
    }

    /// Fetch a point by id.
    pub fn get(&self, id: PointId) -> Option<Point> {
        self.data.read().points.iter().find(|p| p.id == id).cloned()
    }

    /// Remove a point, returning it if it existed.
    pub fn remove(&self, id: PointId) -> Option<Point> {
        let mut data = self.data.write();
        let index = data.points.iter().position(|p| p.id == id)?;
        Some(data.points.remove(index))
    }

    /// Replace a point with new data under a fresh id.
    ///
    /// Returns the new id, or `None` if the old id was absent or the new
    /// draft is invalid. On an invalid draft the old point is left in
    /// place.
    pub fn replace(&self, id: PointId, draft: PointDraft) -> Option<PointId> {
        if !draft.is_valid() {
            return None;
        }
        self.remove(id)?;
        self.insert(draft)
    }

    /// Insertion-ordered snapshot of every point.
    pub fn all(&self) -> Vec<Point> {
        self.data.read().points.clone()
    }

    pub fn len(&self) -> usize {
        self.data.read().points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().points.is_empty()
    }

    /// Drop every point. Ids are not reused afterwards.
    pub fn clear(&self) {
        self.data.write().points.clear();
    }
}
