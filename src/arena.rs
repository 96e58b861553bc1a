//! Storage for pair records.
//!
//! Every pair lives in exactly one slab slot together with both of its facets. Trees refer to
//! records by slot index; cursors refer to them by `Handle`, which adds the record's stamp so that
//! a cursor outliving its record is recognized even after the slot has been reused.

use slab::Slab;
use std::sync::atomic::{AtomicU64, Ordering};
use super::node::{Facet, Links, Side};

// Stamps are drawn from one counter for the whole process, so a handle never matches a record of
// a different map either.
static STAMPS: AtomicU64 = AtomicU64::new(1);

/// A pair of values and their positions in both trees.
pub struct Record<L, R, B> {
    left: L,
    right: R,
    links: [Links<B>; 2],
    stamp: u64,
}

/// A stamped reference to a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Handle {
    pub slot: usize,
    pub stamp: u64,
}

pub struct Arena<L, R, B> {
    records: Slab<Record<L, R, B>>,
}

impl<L, R, B> Arena<L, R, B> {
    pub fn new() -> Self { Arena { records: Slab::new() } }

    pub fn len(&self) -> usize { self.records.len() }

    /// Allocates a record for the pair. Neither facet is linked into a tree yet.
    pub fn alloc(&mut self, left: L, right: R) -> Handle where B: Default {
        let stamp = STAMPS.fetch_add(1, Ordering::Relaxed);
        let slot = self.records.insert(Record {
            left: left,
            right: right,
            links: [Links::default(), Links::default()],
            stamp: stamp,
        });
        Handle { slot: slot, stamp: stamp }
    }

    /// Destroys the record in the given slot and returns its values.
    ///
    /// The caller must have unlinked both facets first.
    pub fn free(&mut self, slot: usize) -> (L, R) {
        let record = self.records.remove(slot);
        (record.left, record.right)
    }

    pub fn clear(&mut self) { self.records.clear(); }

    /// Returns the handle of the live record in the given slot.
    pub fn handle(&self, slot: usize) -> Handle {
        Handle { slot: slot, stamp: self.records[slot].stamp }
    }

    /// Returns the handle's slot if its record is still alive.
    pub fn resolve(&self, handle: Handle) -> Option<usize> {
        match self.records.get(handle.slot) {
            Some(record) if record.stamp == handle.stamp => Some(handle.slot),
            _ => None,
        }
    }

    pub fn pair(&self, slot: usize) -> (&L, &R) {
        let record = &self.records[slot];
        (&record.left, &record.right)
    }

    /// Returns the value the given side's tree orders the record by.
    pub fn key<S>(&self, slot: usize) -> &S::Key where S: Facet<L, R> {
        let record = &self.records[slot];
        S::split(&record.left, &record.right).0
    }

    pub fn links<S>(&self, slot: usize) -> &Links<B> where S: Side {
        &self.records[slot].links[S::INDEX]
    }

    pub fn links_mut<S>(&mut self, slot: usize) -> &mut Links<B> where S: Side {
        &mut self.records[slot].links[S::INDEX]
    }
}
