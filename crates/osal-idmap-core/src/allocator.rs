//! Per-category id allocation with reuse protection
//!
//! An `IdAllocator` owns the slot table of one object category. Every slot
//! carries a generation counter that is advanced each time the slot is
//! handed out, so an id issued for an earlier occupant of the slot no longer
//! matches once the slot has been reused.
//!
//! # Slot State Machine
//!
//! ```text
//!   Free ──allocate──▶ Reserved ──publish──▶ Valid ──begin_delete──▶ Deleting
//!    ▲                    │                                             │
//!    └──────release───────┴───────────────────release───────────────────┘
//! ```
//!
//! `Reserved` covers the window in which the native constructor runs and
//! `Deleting` the window in which the native destructor runs. Neither is
//! visible to lookups, and neither can be allocated or deleted again.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::types::{ObjectCategory, ObjectId, ObjectRecord, TaskId, MAX_GENERATION, MAX_SLOTS};

/// Lifecycle state of one slot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotState {
    /// Slot is unused
    Free,
    /// Id issued, native resource being created
    Reserved,
    /// Object is live
    Valid,
    /// Object invalidated, native resource being destroyed
    Deleting,
}

/// One slot of a category table
pub(crate) struct Slot<H> {
    pub(crate) generation: u16,
    pub(crate) state: SlotState,
    pub(crate) name: String,
    pub(crate) creator: TaskId,
    pub(crate) handle: Option<H>,
}

impl<H> Slot<H> {
    fn empty() -> Self {
        Self {
            generation: 0,
            state: SlotState::Free,
            name: String::new(),
            creator: ObjectId::UNDEFINED,
            handle: None,
        }
    }
}

/// Allocator errors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// Every slot of the category is in use
    NoFreeIds,
    /// Id does not name a slot in the state the operation requires
    StaleId(ObjectId),
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocError::NoFreeIds => write!(f, "No free ids"),
            AllocError::StaleId(id) => write!(f, "Stale id {}", id),
        }
    }
}

/// Slot table and id issuer for one category
pub struct IdAllocator<H> {
    pub(crate) category: ObjectCategory,
    pub(crate) slots: Vec<Slot<H>>,
    /// Slot handed out by the most recent `allocate`
    pub(crate) last_issued: Option<usize>,
    /// Number of slots not in `Free`
    pub(crate) in_use: usize,
}

impl<H: Clone> IdAllocator<H> {
    /// Create an empty table with `capacity` slots
    ///
    /// `capacity` is clamped to the encodable slot space; callers validate
    /// their limits first.
    pub fn new(category: ObjectCategory, capacity: usize) -> Self {
        let capacity = if category == ObjectCategory::Other {
            0
        } else {
            capacity.min(MAX_SLOTS)
        };
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, Slot::empty);
        Self {
            category,
            slots,
            last_issued: None,
            in_use: 0,
        }
    }

    /// Category this table serves
    pub fn category(&self) -> ObjectCategory {
        self.category
    }

    /// Number of slots
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of slots not free (valid, reserved or being deleted)
    pub fn in_use(&self) -> usize {
        self.in_use
    }

    /// Number of valid objects
    pub fn len(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.state == SlotState::Valid)
            .count()
    }

    /// Check if no object is valid
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Issue a new id and reserve its slot under `name`
    ///
    /// The search starts after the most recently issued slot, so a slot that
    /// was just released is the last one to be reused.
    pub fn allocate(&mut self, name: &str, creator: TaskId) -> Result<ObjectId, AllocError> {
        let capacity = self.slots.len();
        if self.in_use >= capacity {
            return Err(AllocError::NoFreeIds);
        }

        let start = self.last_issued.map(|i| i + 1).unwrap_or(0);
        let index = (0..capacity)
            .map(|k| (start + k) % capacity)
            .find(|&i| self.slots[i].state == SlotState::Free)
            .ok_or(AllocError::NoFreeIds)?;

        let slot = &mut self.slots[index];
        slot.generation = next_generation(slot.generation);
        slot.state = SlotState::Reserved;
        slot.name = String::from(name);
        slot.creator = creator;
        slot.handle = None;

        self.in_use += 1;
        self.last_issued = Some(index);

        Ok(ObjectId::encode(self.category, slot.generation, index))
    }

    /// Attach the native handle to a reserved slot, making the object valid
    pub fn publish(&mut self, id: ObjectId, handle: H) -> Result<(), AllocError> {
        let slot = self
            .slot_for_mut(id, SlotState::Reserved)
            .ok_or(AllocError::StaleId(id))?;
        slot.handle = Some(handle);
        slot.state = SlotState::Valid;
        Ok(())
    }

    /// Invalidate a valid object, returning its record for native teardown
    pub fn begin_delete(&mut self, id: ObjectId) -> Option<ObjectRecord<H>> {
        let record = self.record(id)?;
        if let Some(slot) = self.slot_for_mut(id, SlotState::Valid) {
            slot.state = SlotState::Deleting;
        }
        Some(record)
    }

    /// Return a reserved, valid or deleting slot to the free pool
    pub fn release(&mut self, id: ObjectId) -> Result<(), AllocError> {
        let slot = self
            .slot_matching_mut(id)
            .filter(|s| s.state != SlotState::Free)
            .ok_or(AllocError::StaleId(id))?;
        slot.state = SlotState::Free;
        slot.name.clear();
        slot.creator = ObjectId::UNDEFINED;
        slot.handle = None;
        self.in_use -= 1;
        Ok(())
    }

    /// O(1) validity test
    pub fn is_valid(&self, id: ObjectId) -> bool {
        self.slot_for(id, SlotState::Valid).is_some()
    }

    /// Current state of the slot `id` names, if the generation still matches
    pub fn state_of(&self, id: ObjectId) -> Option<SlotState> {
        self.slot_matching(id).map(|s| s.state)
    }

    /// Snapshot of a valid object
    pub fn record(&self, id: ObjectId) -> Option<ObjectRecord<H>> {
        let slot = self.slot_for(id, SlotState::Valid)?;
        Some(ObjectRecord {
            id,
            category: self.category,
            slot_index: id.slot_index(),
            native_handle: slot.handle.clone()?,
            creator: slot.creator,
            name: slot.name.clone(),
        })
    }

    /// Id and creator of the valid object in slot `index`
    pub fn entry_at(&self, index: usize) -> Option<(ObjectId, TaskId)> {
        let slot = self.slots.get(index)?;
        if slot.state != SlotState::Valid {
            return None;
        }
        Some((
            ObjectId::encode(self.category, slot.generation, index),
            slot.creator,
        ))
    }

    /// Whether any non-free slot holds `name` (including in-flight creates)
    pub fn name_in_use(&self, name: &str) -> bool {
        self.slots
            .iter()
            .any(|s| s.state != SlotState::Free && s.name == name)
    }

    /// Id of the valid object called `name`
    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.slots
            .iter()
            .position(|s| s.state == SlotState::Valid && s.name == name)
            .and_then(|i| self.entry_at(i))
            .map(|(id, _)| id)
    }

    /// Id of the valid object whose native handle equals `handle`
    pub fn find_by_handle(&self, handle: &H) -> Option<ObjectId>
    where
        H: PartialEq,
    {
        self.slots
            .iter()
            .position(|s| s.state == SlotState::Valid && s.handle.as_ref() == Some(handle))
            .and_then(|i| self.entry_at(i))
            .map(|(id, _)| id)
    }

    /// Ids of all valid objects, in slot order
    pub fn valid_ids(&self) -> Vec<ObjectId> {
        (0..self.slots.len())
            .filter_map(|i| self.entry_at(i).map(|(id, _)| id))
            .collect()
    }

    fn slot_matching(&self, id: ObjectId) -> Option<&Slot<H>> {
        if id.category() != self.category {
            return None;
        }
        self.slots
            .get(id.slot_index())
            .filter(|s| s.generation == id.generation())
    }

    fn slot_matching_mut(&mut self, id: ObjectId) -> Option<&mut Slot<H>> {
        if id.category() != self.category {
            return None;
        }
        self.slots
            .get_mut(id.slot_index())
            .filter(|s| s.generation == id.generation())
    }

    fn slot_for(&self, id: ObjectId, state: SlotState) -> Option<&Slot<H>> {
        self.slot_matching(id).filter(|s| s.state == state)
    }

    fn slot_for_mut(&mut self, id: ObjectId, state: SlotState) -> Option<&mut Slot<H>> {
        self.slot_matching_mut(id).filter(|s| s.state == state)
    }
}

/// Advance a slot generation, skipping 0 on wrap
fn next_generation(generation: u16) -> u16 {
    if generation >= MAX_GENERATION {
        1
    } else {
        generation + 1
    }
}
