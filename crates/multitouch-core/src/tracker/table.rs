//! Pointer-keyed tracking table.
//!
//! Records are grouped by pointer id, so removing a pointer on end/cancel
//! never disturbs the records of other pointers and needs no iteration over
//! a shared list.

use super::record::TrackingRecord;
use crate::collections::map::HashMap;
use crate::input::PointerId;
use smallvec::SmallVec;
use std::time::Duration;

/// Records of one pointer, in the order their bindings were registered.
pub type PointerRecords<E> = SmallVec<[TrackingRecord<E>; 2]>;

pub(crate) struct TrackingTable<E> {
    pointers: HashMap<PointerId, PointerRecords<E>>,
}

impl<E> TrackingTable<E> {
    pub(crate) fn new() -> Self {
        Self {
            pointers: HashMap::default(),
        }
    }

    /// Records for `pointer`, creating an empty group if needed.
    pub(crate) fn entry(&mut self, pointer: PointerId) -> &mut PointerRecords<E> {
        self.pointers.entry(pointer).or_default()
    }

    pub(crate) fn get(&self, pointer: PointerId) -> Option<&PointerRecords<E>> {
        self.pointers.get(&pointer)
    }

    pub(crate) fn get_mut(&mut self, pointer: PointerId) -> Option<&mut PointerRecords<E>> {
        self.pointers.get_mut(&pointer)
    }

    /// Removes every record of a pointer. Called on end and cancel.
    pub(crate) fn remove(&mut self, pointer: PointerId) -> Option<PointerRecords<E>> {
        self.pointers.remove(&pointer)
    }

    pub(crate) fn has(&self, pointer: PointerId) -> bool {
        self.pointers.contains_key(&pointer)
    }

    pub(crate) fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    pub(crate) fn record_count(&self) -> usize {
        self.pointers.values().map(|records| records.len()).sum()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    /// Drops records last seen before `cutoff`. Returns how many were dropped.
    pub(crate) fn evict_older_than(&mut self, cutoff: Duration) -> usize {
        let mut evicted = 0;
        self.pointers.retain(|pointer, records| {
            let before = records.len();
            records.retain(|record| record.last_seen >= cutoff);
            let dropped = before - records.len();
            if dropped > 0 {
                log::debug!("evicted {dropped} stale record(s) of {pointer}");
            }
            evicted += dropped;
            !records.is_empty()
        });
        evicted
    }
}
