//! Core object-id types
//!
//! This module contains the fundamental types used throughout the object
//! directory. All types here are pure data - no behavior that depends on the
//! native OS layer.

use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Number of slots addressable by the index field of an `ObjectId`
pub const MAX_SLOTS: usize = 1 << INDEX_BITS;

/// Largest generation value; generations run 1..=MAX_GENERATION and never 0
pub const MAX_GENERATION: u16 = (1 << GENERATION_BITS) - 1;

const INDEX_BITS: u32 = 12;
const GENERATION_BITS: u32 = 12;
const GENERATION_SHIFT: u32 = INDEX_BITS;
const TAG_SHIFT: u32 = INDEX_BITS + GENERATION_BITS;
const INDEX_MASK: u32 = (1 << INDEX_BITS) - 1;
const GENERATION_MASK: u32 = (1 << GENERATION_BITS) - 1;

/// Object categories managed by the directory
///
/// The set is closed: every `match` over it is exhaustive, so adding a
/// category is a compile error everywhere it is not handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ObjectCategory {
    /// Decode result for ids without a known category tag
    Other = 0,
    /// Task (thread of execution)
    Task = 1,
    /// Message queue
    Queue = 2,
    /// Counting semaphore
    CountSem = 3,
    /// Binary semaphore
    BinSem = 4,
    /// Mutex
    Mutex = 5,
    /// Timer callback
    TimeCB = 6,
    /// Loadable module
    Module = 7,
    /// Open file stream
    FileStream = 8,
    /// Time base
    TimeBase = 9,
}

impl ObjectCategory {
    /// Every creatable category, in tag order
    pub const ALL: [ObjectCategory; 9] = [
        ObjectCategory::Task,
        ObjectCategory::Queue,
        ObjectCategory::CountSem,
        ObjectCategory::BinSem,
        ObjectCategory::Mutex,
        ObjectCategory::TimeCB,
        ObjectCategory::Module,
        ObjectCategory::FileStream,
        ObjectCategory::TimeBase,
    ];

    /// Convert from the tag stored in an `ObjectId`
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            1 => ObjectCategory::Task,
            2 => ObjectCategory::Queue,
            3 => ObjectCategory::CountSem,
            4 => ObjectCategory::BinSem,
            5 => ObjectCategory::Mutex,
            6 => ObjectCategory::TimeCB,
            7 => ObjectCategory::Module,
            8 => ObjectCategory::FileStream,
            9 => ObjectCategory::TimeBase,
            _ => ObjectCategory::Other,
        }
    }

    /// Tag value stored in an `ObjectId`
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Position of a creatable category in per-category tables
    ///
    /// Returns `None` for `Other`.
    pub fn table_index(self) -> Option<usize> {
        match self {
            ObjectCategory::Other => None,
            c => Some(c as usize - 1),
        }
    }

    /// Human-readable name used in log lines
    pub fn name(self) -> &'static str {
        match self {
            ObjectCategory::Other => "Other",
            ObjectCategory::Task => "Task",
            ObjectCategory::Queue => "Queue",
            ObjectCategory::CountSem => "CountSem",
            ObjectCategory::BinSem => "BinSem",
            ObjectCategory::Mutex => "Mutex",
            ObjectCategory::TimeCB => "TimeCB",
            ObjectCategory::Module => "Module",
            ObjectCategory::FileStream => "FileStream",
            ObjectCategory::TimeBase => "TimeBase",
        }
    }
}

impl fmt::Display for ObjectCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Opaque 32-bit object identifier
///
/// Layout: `[31:24]` category tag, `[23:12]` slot generation, `[11:0]` slot
/// index. Only the allocator builds ids from parts; everyone else treats the
/// value as opaque and asks the directory to interpret it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(u32);

/// Task identifier (tasks are named by their object id)
pub type TaskId = ObjectId;

impl ObjectId {
    /// The "no object" value; also the creator of objects made outside any task
    pub const UNDEFINED: ObjectId = ObjectId(0);

    /// All-ones sentinel; never issued
    pub const RESERVED: ObjectId = ObjectId(u32::MAX);

    /// Wrap a raw value received at an integer boundary
    pub const fn from_raw(raw: u32) -> Self {
        ObjectId(raw)
    }

    /// Raw value for integer boundaries and log lines
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub(crate) fn encode(category: ObjectCategory, generation: u16, index: usize) -> Self {
        debug_assert!(category != ObjectCategory::Other);
        debug_assert!(generation != 0 && generation <= MAX_GENERATION);
        debug_assert!(index < MAX_SLOTS);
        ObjectId(
            ((category.tag() as u32) << TAG_SHIFT)
                | (((generation as u32) & GENERATION_MASK) << GENERATION_SHIFT)
                | ((index as u32) & INDEX_MASK),
        )
    }

    /// Category encoded in the id (`Other` for unknown tags)
    pub fn category(self) -> ObjectCategory {
        ObjectCategory::from_tag((self.0 >> TAG_SHIFT) as u8)
    }

    /// Slot index field (structural only - says nothing about validity)
    pub fn slot_index(self) -> usize {
        (self.0 & INDEX_MASK) as usize
    }

    /// Generation field (structural only)
    pub fn generation(self) -> u16 {
        ((self.0 >> GENERATION_SHIFT) & GENERATION_MASK) as u16
    }

    /// Whether this is anything other than `UNDEFINED`
    pub fn is_defined(self) -> bool {
        self != ObjectId::UNDEFINED
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({:#010x})", self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// A live object as stored in the directory
#[derive(Clone, Debug)]
pub struct ObjectRecord<H> {
    /// Object ID
    pub id: ObjectId,
    /// Category (always equal to `id.category()`)
    pub category: ObjectCategory,
    /// Slot in the category table
    pub slot_index: usize,
    /// Platform handle returned by the native constructor
    pub native_handle: H,
    /// Task that created the object (`UNDEFINED` outside any task)
    pub creator: TaskId,
    /// Object name, unique within the category
    pub name: String,
}

impl<H> ObjectRecord<H> {
    /// Handle-free snapshot of this record
    pub fn info(&self) -> ObjectInfo {
        ObjectInfo {
            id: self.id,
            category: self.category,
            slot_index: self.slot_index,
            creator: self.creator,
            name: self.name.clone(),
        }
    }
}

/// Serializable object summary for diagnostics
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectInfo {
    pub id: ObjectId,
    pub category: ObjectCategory,
    pub slot_index: usize,
    pub creator: TaskId,
    pub name: String,
}

// ============================================================================
// Kani proofs for the id encoding
// ============================================================================

#[cfg(kani)]
mod proofs {
    use super::*;

    /// Proof: every field survives encode/decode
    #[kani::proof]
    fn encode_decode_fields() {
        let tag: u8 = kani::any();
        let generation: u16 = kani::any();
        let index: usize = kani::any();
        kani::assume(tag >= 1 && tag <= 9);
        kani::assume(generation >= 1 && generation <= MAX_GENERATION);
        kani::assume(index < MAX_SLOTS);

        let category = ObjectCategory::from_tag(tag);
        let id = ObjectId::encode(category, generation, index);

        kani::assert(id.category() == category, "category must round-trip");
        kani::assert(id.generation() == generation, "generation must round-trip");
        kani::assert(id.slot_index() == index, "index must round-trip");
    }

    /// Proof: no issued id collides with the sentinels
    #[kani::proof]
    fn encode_never_yields_sentinel() {
        let tag: u8 = kani::any();
        let generation: u16 = kani::any();
        let index: usize = kani::any();
        kani::assume(tag >= 1 && tag <= 9);
        kani::assume(generation >= 1 && generation <= MAX_GENERATION);
        kani::assume(index < MAX_SLOTS);

        let id = ObjectId::encode(ObjectCategory::from_tag(tag), generation, index);
        kani::assert(id != ObjectId::UNDEFINED, "issued id is never UNDEFINED");
        kani::assert(id != ObjectId::RESERVED, "issued id is never RESERVED");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    // ========================================================================
    // ObjectCategory tests
    // ========================================================================

    #[test]
    fn test_category_from_tag_all_variants() {
        for cat in ObjectCategory::ALL {
            assert_eq!(ObjectCategory::from_tag(cat.tag()), cat);
        }
    }

    #[test]
    fn test_category_from_tag_unknown_values() {
        assert_eq!(ObjectCategory::from_tag(0), ObjectCategory::Other);
        assert_eq!(ObjectCategory::from_tag(10), ObjectCategory::Other);
        assert_eq!(ObjectCategory::from_tag(0xFF), ObjectCategory::Other);
    }

    #[test]
    fn test_category_table_index_is_dense() {
        for (i, cat) in ObjectCategory::ALL.iter().enumerate() {
            assert_eq!(cat.table_index(), Some(i));
        }
        assert_eq!(ObjectCategory::Other.table_index(), None);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{}", ObjectCategory::CountSem), "CountSem");
        assert_eq!(format!("{}", ObjectCategory::TimeCB), "TimeCB");
    }

    // ========================================================================
    // ObjectId tests
    // ========================================================================

    #[test]
    fn test_object_id_layout() {
        let id = ObjectId::encode(ObjectCategory::Queue, 3, 17);
        assert_eq!(id.raw(), 0x0200_3011);
        assert_eq!(id.category(), ObjectCategory::Queue);
        assert_eq!(id.generation(), 3);
        assert_eq!(id.slot_index(), 17);
    }

    #[test]
    fn test_object_id_extremes() {
        let id = ObjectId::encode(ObjectCategory::TimeBase, MAX_GENERATION, MAX_SLOTS - 1);
        assert_eq!(id.category(), ObjectCategory::TimeBase);
        assert_eq!(id.generation(), MAX_GENERATION);
        assert_eq!(id.slot_index(), MAX_SLOTS - 1);
        assert_ne!(id, ObjectId::RESERVED);
    }

    #[test]
    fn test_sentinels_decode_to_other() {
        assert_eq!(ObjectId::UNDEFINED.category(), ObjectCategory::Other);
        assert_eq!(ObjectId::RESERVED.category(), ObjectCategory::Other);
        assert!(!ObjectId::UNDEFINED.is_defined());
        assert!(ObjectId::RESERVED.is_defined());
    }

    #[test]
    fn test_same_slot_different_generation_differs() {
        let a = ObjectId::encode(ObjectCategory::Mutex, 1, 4);
        let b = ObjectId::encode(ObjectCategory::Mutex, 2, 4);
        assert_ne!(a, b);
        assert_eq!(a.slot_index(), b.slot_index());
    }

    #[test]
    fn test_object_id_formatting() {
        let id = ObjectId::from_raw(0x0400_1002);
        assert_eq!(format!("{}", id), "0x04001002");
        assert_eq!(format!("{:?}", id), "ObjectId(0x04001002)");
    }

    #[test]
    fn test_object_id_serializes_as_integer() {
        let id = ObjectId::encode(ObjectCategory::Task, 1, 0);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "16781312");
        let back: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    // ========================================================================
    // ObjectRecord tests
    // ========================================================================

    #[test]
    fn test_record_info_drops_handle() {
        let id = ObjectId::encode(ObjectCategory::BinSem, 1, 2);
        let record = ObjectRecord {
            id,
            category: ObjectCategory::BinSem,
            slot_index: 2,
            native_handle: 99u64,
            creator: ObjectId::UNDEFINED,
            name: String::from("sem"),
        };
        let info = record.info();
        assert_eq!(info.id, id);
        assert_eq!(info.slot_index, 2);
        assert_eq!(info.name, "sem");
        assert_eq!(info.creator, ObjectId::UNDEFINED);
    }
}
