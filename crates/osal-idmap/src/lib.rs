//! OSAL Object Directory
//!
//! This crate implements the runtime half of the OSAL object-id layer:
//! - Object creation and deletion over a `NativeOs` platform layer
//! - Id validation, lookup by id and by name
//! - "For each object" enumeration with creator filtering
//! - Bulk teardown and leak reporting
//!
//! The slot tables themselves live in `osal-idmap-core`; this crate adds the
//! per-category locks and the calls into the native layer.
//!
//! # Example
//!
//! ```ignore
//! let dir = ObjectDirectory::new(platform, ObjectLimits::default())?;
//! let queue = dir.queue_create("CMD_PIPE", 16, 64)?;
//! assert_eq!(dir.identify(queue), ObjectCategory::Queue);
//! dir.delete(ObjectCategory::Queue, queue)?;
//! ```
//!
//! # Testing
//!
//! - Unit tests use `osal_hal::TestOs`
//! - Integration tests in `tests/` use `osal-hal-mock` with real task threads
//! - `loom_tests` model-checks the lock protocol (with `loom` feature)

#![no_std]
extern crate alloc;

pub mod args;
pub mod directory;
pub mod enumerate;
pub mod error;
pub mod lifecycle;
mod sync;


pub use args::ObjectArgs;
pub use directory::{ObjectDirectory, MAX_TASK_PRIORITY};
pub use enumerate::ObjectCounter;
pub use error::{status_code, OsalError, OS_SUCCESS};
pub use lifecycle::{DELETE_ORDER, MAX_TEARDOWN_PASSES};

// Re-export the pieces callers need alongside the directory
pub use osal_hal::{HalError, NativeOs, TaskEntry};
pub use osal_idmap_core::{
    ConfigError, InvariantViolation, ObjectCategory, ObjectId, ObjectInfo, ObjectLimits,
    ObjectRecord, TaskId,
};
