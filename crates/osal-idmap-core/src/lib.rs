//! OSAL Object-ID Core - Pure Object Tables for Verification
//!
//! This crate contains the **pure, platform-free** part of the OSAL object
//! directory: the opaque id encoding, the per-category capacity table and the
//! generation-tagged slot allocator.
//!
//! # Design Principles
//!
//! 1. **No native OS dependency**: All platform calls live in `osal-idmap`
//! 2. **No locking**: Each `IdAllocator` is owned by exactly one lock in the runtime wrapper
//! 3. **Deterministic**: Same sequence of calls always issues the same ids
//! 4. **Verifiable**: Small enough for Kani proofs of the id encoding
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    osal-idmap-core                          │
//! │                                                             │
//! │   ┌───────────────┐    ┌───────────────┐                   │
//! │   │ ObjectLimits  │    │  IdAllocator  │  one per category  │
//! │   │  max_for()    │───▶│  slots +      │                   │
//! │   │               │    │  generations  │                   │
//! │   └───────────────┘    └───────────────┘                   │
//! │                                                             │
//! │   ┌───────────────┐    ┌───────────────┐                   │
//! │   │   ObjectId    │    │  Invariants   │                   │
//! │   │ encode/decode │    │  Assertions   │                   │
//! │   └───────────────┘    └───────────────┘                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              │ used by
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      osal-idmap                             │
//! │   - per-category locks                                      │
//! │   - native create/delete with rollback                      │
//! │   - enumeration and bulk teardown                           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Module Organization
//!
//! - `types` - ObjectCategory, ObjectId, ObjectRecord, ObjectInfo
//! - `registry` - ObjectLimits (the `OS_MAX_*` capacity table)
//! - `allocator` - IdAllocator slot map with reuse protection
//! - `invariants` - Runtime-checkable table invariants

#![no_std]
extern crate alloc;

pub mod allocator;
pub mod invariants;
pub mod registry;
pub mod types;

// Re-export all public types for convenient access
pub use allocator::{AllocError, IdAllocator, SlotState};
pub use invariants::{assert_invariants, check_allocator_invariants, InvariantViolation};
pub use registry::{ConfigError, ObjectLimits};
pub use types::{
    ObjectCategory, ObjectId, ObjectInfo, ObjectRecord, TaskId, MAX_GENERATION, MAX_SLOTS,
};
