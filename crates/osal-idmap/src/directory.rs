//! Object directory
//!
//! The `ObjectDirectory` owns one `IdAllocator` per category, each behind its
//! own lock, and pairs every id with the native resource the platform layer
//! created for it.
//!
//! # Create protocol
//!
//! ```text
//!   lock ─ name scan ─ reserve slot ─ unlock
//!                                       │
//!                              native constructor
//!                              │                │
//!                             ok              error
//!                              │                │
//!                   lock ─ publish ─ unlock   lock ─ release ─ unlock
//! ```
//!
//! Deletion mirrors this: the slot moves to `Deleting` under the lock, the
//! native destructor runs unlocked, and the slot is released under the lock.
//! No lock is ever held across a native call, and no two category locks are
//! ever held at once.
//!
//! # Task exit
//!
//! Task entries are wrapped before they reach the native layer. When an
//! entry returns, the wrapper retires the task exactly as `exit_task` would,
//! so a finished task never keeps its slot.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use osal_hal::{HalError, NativeOs, TaskAttrs, TaskEntry};
use osal_idmap_core::{
    check_allocator_invariants, ConfigError, IdAllocator, InvariantViolation, ObjectCategory,
    ObjectId, ObjectLimits, ObjectRecord, TaskId,
};

use crate::args::ObjectArgs;
use crate::error::OsalError;
use crate::sync::CategoryLock;

/// Largest task priority accepted by `create`
pub const MAX_TASK_PRIORITY: u32 = 255;

/// One table per creatable category, indexed by `ObjectCategory::table_index`
pub(crate) type Tables<H> = Vec<CategoryLock<IdAllocator<<H as NativeOs>::Handle>>>;

/// Registry of every OSAL object created on one native layer
///
/// The native layer and the tables are shared with the entry wrappers of
/// running tasks.
pub struct ObjectDirectory<H: NativeOs> {
    pub(crate) hal: Arc<H>,
    pub(crate) limits: ObjectLimits,
    pub(crate) tables: Arc<Tables<H>>,
}

impl<H: NativeOs> ObjectDirectory<H> {
    /// Build an empty directory sized by `limits`
    pub fn new(hal: H, limits: ObjectLimits) -> Result<Self, ConfigError> {
        limits.validate()?;

        let tables: Tables<H> = ObjectCategory::ALL
            .iter()
            .map(|&category| {
                CategoryLock::new(IdAllocator::new(category, limits.max_for(category)))
            })
            .collect();

        hal.debug_write(&alloc::format!(
            "[osal] Object directory initialized ({} slots)",
            limits.total_slots()
        ));

        Ok(Self {
            hal: Arc::new(hal),
            limits,
            tables: Arc::new(tables),
        })
    }

    /// Native layer this directory runs on
    pub fn hal(&self) -> &H {
        &*self.hal
    }

    /// Configured capacities
    pub fn limits(&self) -> &ObjectLimits {
        &self.limits
    }

    pub(crate) fn table(
        &self,
        category: ObjectCategory,
    ) -> Option<&CategoryLock<IdAllocator<H::Handle>>> {
        table_of::<H>(&self.tables, category)
    }

    // ========================================================================
    // Creation
    // ========================================================================

    /// Create a named object of the category implied by `args`
    pub fn create(&self, name: &str, args: ObjectArgs) -> Result<ObjectId, OsalError> {
        let category = args.category();
        self.check_name(category, name)?;
        let timebase = self.check_args(&args)?;
        let table = self.table(category).ok_or(OsalError::InvalidArgument)?;

        // Resolved before taking the category lock: for tasks it is the same lock.
        let creator = self.current_task_id();

        let id = table.with(|t| {
            if t.name_in_use(name) {
                return Err(OsalError::NameTaken);
            }
            t.allocate(name, creator).map_err(OsalError::from)
        })?;

        let handle = match self.native_create(name, args, timebase) {
            Ok(handle) => handle,
            Err(e) => {
                if table.with(|t| t.release(id)).is_err() {
                    self.fatal(&alloc::format!("rollback of {} {} found no reservation", category, id));
                }
                self.hal.debug_write(&alloc::format!(
                    "[osal] Create {} '{}' failed: {}",
                    category,
                    name,
                    e
                ));
                return Err(OsalError::Platform(e));
            }
        };

        let started = handle.clone();
        if table.with(|t| t.publish(id, handle)).is_err() {
            self.fatal(&alloc::format!("id overlap publishing {} {}", category, id));
        }

        self.hal.debug_write(&alloc::format!(
            "[osal] Created {} '{}' as {}",
            category,
            name,
            id
        ));

        if category == ObjectCategory::Task {
            if let Err(e) = self.hal.task_start(&started) {
                self.hal.debug_write(&alloc::format!(
                    "[osal] Start of task '{}' failed: {}",
                    name,
                    e
                ));
                match self.delete(ObjectCategory::Task, id) {
                    Ok(()) | Err(OsalError::InvalidId) => {}
                    Err(undo) => self.hal.debug_write(&alloc::format!(
                        "[osal] Cleanup of unstarted task '{}' ({}) reported: {}",
                        name,
                        id,
                        undo
                    )),
                }
                return Err(OsalError::Platform(e));
            }
        }

        Ok(id)
    }

    /// Create and start a task
    pub fn task_create(
        &self,
        name: &str,
        priority: u32,
        stack_size: usize,
        entry: Option<TaskEntry>,
    ) -> Result<TaskId, OsalError> {
        self.create(
            name,
            ObjectArgs::Task {
                priority,
                stack_size,
                entry,
            },
        )
    }

    pub fn queue_create(
        &self,
        name: &str,
        depth: usize,
        msg_size: usize,
    ) -> Result<ObjectId, OsalError> {
        self.create(name, ObjectArgs::Queue { depth, msg_size })
    }

    pub fn count_sem_create(&self, name: &str, initial: u32) -> Result<ObjectId, OsalError> {
        self.create(name, ObjectArgs::CountSem { initial })
    }

    pub fn bin_sem_create(&self, name: &str, initial: u32) -> Result<ObjectId, OsalError> {
        self.create(name, ObjectArgs::BinSem { initial })
    }

    pub fn mutex_create(&self, name: &str) -> Result<ObjectId, OsalError> {
        self.create(name, ObjectArgs::Mutex)
    }

    pub fn timebase_create(&self, name: &str) -> Result<ObjectId, OsalError> {
        self.create(name, ObjectArgs::TimeBase)
    }

    /// Create a timer callback on an existing time base
    pub fn timer_create(&self, name: &str, timebase: ObjectId) -> Result<ObjectId, OsalError> {
        self.create(name, ObjectArgs::Timer { timebase })
    }

    pub fn module_load(&self, name: &str, path: &str) -> Result<ObjectId, OsalError> {
        self.create(
            name,
            ObjectArgs::Module {
                path: String::from(path),
            },
        )
    }

    /// Open a file stream; streams are named by their path
    pub fn stream_open(&self, path: &str, flags: u32) -> Result<ObjectId, OsalError> {
        self.create(
            path,
            ObjectArgs::FileStream {
                path: String::from(path),
                flags,
            },
        )
    }

    fn check_name(&self, category: ObjectCategory, name: &str) -> Result<(), OsalError> {
        if name.is_empty() {
            return Err(OsalError::InvalidPointer);
        }
        if name.len() > self.limits.name_limit(category) {
            return Err(OsalError::NameTooLong);
        }
        Ok(())
    }

    /// Reject out-of-range arguments before anything is reserved
    ///
    /// Returns the native handle of the time base a timer attaches to.
    fn check_args(&self, args: &ObjectArgs) -> Result<Option<H::Handle>, OsalError> {
        match args {
            ObjectArgs::Task {
                priority,
                stack_size,
                ..
            } => {
                if *priority > MAX_TASK_PRIORITY || *stack_size == 0 {
                    return Err(OsalError::InvalidArgument);
                }
            }
            ObjectArgs::Queue { depth, msg_size } => {
                if *depth == 0 || *msg_size == 0 {
                    return Err(OsalError::InvalidArgument);
                }
            }
            ObjectArgs::BinSem { initial } => {
                if *initial > 1 {
                    return Err(OsalError::InvalidArgument);
                }
            }
            ObjectArgs::Timer { timebase } => {
                let record = self.get_info(ObjectCategory::TimeBase, *timebase)?;
                return Ok(Some(record.native_handle));
            }
            ObjectArgs::Module { path } | ObjectArgs::FileStream { path, .. } => {
                if path.is_empty() {
                    return Err(OsalError::InvalidPointer);
                }
            }
            ObjectArgs::CountSem { .. } | ObjectArgs::Mutex | ObjectArgs::TimeBase => {}
        }
        Ok(None)
    }

    fn native_create(
        &self,
        name: &str,
        args: ObjectArgs,
        timebase: Option<H::Handle>,
    ) -> Result<H::Handle, HalError> {
        match args {
            ObjectArgs::Task {
                priority,
                stack_size,
                entry,
            } => self.hal.task_create(
                name,
                TaskAttrs {
                    priority,
                    stack_size,
                    entry: entry.map(|body| self.wrap_entry(body)),
                },
            ),
            ObjectArgs::Queue { depth, msg_size } => self.hal.queue_create(name, depth, msg_size),
            ObjectArgs::CountSem { initial } => self.hal.count_sem_create(name, initial),
            ObjectArgs::BinSem { initial } => self.hal.bin_sem_create(name, initial),
            ObjectArgs::Mutex => self.hal.mutex_create(name),
            ObjectArgs::TimeBase => self.hal.timebase_create(name),
            ObjectArgs::Timer { .. } => match timebase {
                Some(tb) => self.hal.timer_create(name, &tb),
                None => Err(HalError::NotFound),
            },
            ObjectArgs::Module { path } => self.hal.module_load(name, &path),
            ObjectArgs::FileStream { path, flags } => self.hal.stream_open(&path, flags),
        }
    }

    // ========================================================================
    // Deletion
    // ========================================================================

    /// Delete a valid object of `category`
    ///
    /// The slot is freed even when the native destructor fails; the failure
    /// is still reported as `Platform`.
    pub fn delete(&self, category: ObjectCategory, id: ObjectId) -> Result<(), OsalError> {
        if id.category() != category {
            return Err(OsalError::InvalidId);
        }
        let table = self.table(category).ok_or(OsalError::InvalidId)?;
        let record = table
            .with(|t| t.begin_delete(id))
            .ok_or(OsalError::InvalidId)?;

        let destroyed = self.native_destroy(category, &record.native_handle);

        if table.with(|t| t.release(id)).is_err() {
            self.fatal(&alloc::format!("id overlap releasing {} {}", category, id));
        }

        match destroyed {
            Ok(()) => {
                self.hal.debug_write(&alloc::format!(
                    "[osal] Deleted {} '{}' ({})",
                    category,
                    record.name,
                    id
                ));
                Ok(())
            }
            Err(e) => {
                self.hal.debug_write(&alloc::format!(
                    "[osal] Native delete of {} '{}' ({}) failed: {}",
                    category,
                    record.name,
                    id,
                    e
                ));
                Err(OsalError::Platform(e))
            }
        }
    }

    /// Delete any object, deriving its category from the id
    pub fn delete_object(&self, id: ObjectId) -> Result<(), OsalError> {
        self.delete(self.identify(id), id)
    }

    fn native_destroy(&self, category: ObjectCategory, handle: &H::Handle) -> Result<(), HalError> {
        match category {
            ObjectCategory::Task => self.hal.task_delete(handle),
            ObjectCategory::Queue => self.hal.queue_delete(handle),
            ObjectCategory::CountSem => self.hal.count_sem_delete(handle),
            ObjectCategory::BinSem => self.hal.bin_sem_delete(handle),
            ObjectCategory::Mutex => self.hal.mutex_delete(handle),
            ObjectCategory::TimeCB => self.hal.timer_delete(handle),
            ObjectCategory::Module => self.hal.module_unload(handle),
            ObjectCategory::FileStream => self.hal.stream_close(handle),
            ObjectCategory::TimeBase => self.hal.timebase_delete(handle),
            ObjectCategory::Other => Err(HalError::NotFound),
        }
    }

    /// Remove the calling task's record and tell the native layer it is exiting
    ///
    /// Objects the task created stay in the directory.
    pub fn exit_task(&self) -> Result<(), OsalError> {
        let record = retire_current_task(&*self.hal, &self.tables)?;
        self.hal.debug_write(&alloc::format!(
            "[osal] Task '{}' ({}) exited",
            record.name,
            record.id
        ));
        Ok(())
    }

    /// Wrap a task body so that returning from it retires the task
    fn wrap_entry(&self, body: TaskEntry) -> TaskEntry {
        let hal = Arc::clone(&self.hal);
        let tables = Arc::clone(&self.tables);
        Box::new(move || {
            body();
            // InvalidId: the body already called exit_task, or the task was deleted
            if let Ok(record) = retire_current_task(&*hal, &tables) {
                hal.debug_write(&alloc::format!(
                    "[osal] Task '{}' ({}) returned from its entry",
                    record.name,
                    record.id
                ));
            }
        })
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Snapshot of a valid object of `category`
    pub fn get_info(
        &self,
        category: ObjectCategory,
        id: ObjectId,
    ) -> Result<ObjectRecord<H::Handle>, OsalError> {
        if id.category() != category {
            return Err(OsalError::InvalidId);
        }
        self.table(category)
            .and_then(|table| table.with(|t| t.record(id)))
            .ok_or(OsalError::InvalidId)
    }

    /// Category encoded in `id` (`Other` for ids no category issues)
    pub fn identify(&self, id: ObjectId) -> ObjectCategory {
        id.category()
    }

    /// Zero-based slot index of a currently valid object
    pub fn convert_to_array_index(&self, id: ObjectId) -> Result<usize, OsalError> {
        let table = self.table(id.category()).ok_or(OsalError::InvalidId)?;
        if table.with(|t| t.is_valid(id)) {
            Ok(id.slot_index())
        } else {
            Err(OsalError::InvalidId)
        }
    }

    /// Id of the valid object of `category` called `name`
    pub fn get_id_by_name(&self, category: ObjectCategory, name: &str) -> Result<ObjectId, OsalError> {
        self.check_name(category, name)?;
        self.table(category)
            .and_then(|table| table.with(|t| t.find_by_name(name)))
            .ok_or(OsalError::NameNotFound)
    }

    /// Name of a valid object
    pub fn get_resource_name(&self, id: ObjectId) -> Result<String, OsalError> {
        self.get_info(id.category(), id).map(|record| record.name)
    }

    /// Id of the task calling this, or `UNDEFINED` outside any OSAL task
    pub fn current_task_id(&self) -> TaskId {
        let handle = match self.hal.current_task() {
            Some(handle) => handle,
            None => return ObjectId::UNDEFINED,
        };
        self.table(ObjectCategory::Task)
            .and_then(|table| table.with(|t| t.find_by_handle(&handle)))
            .unwrap_or(ObjectId::UNDEFINED)
    }

    /// Number of valid objects of `category`
    pub fn object_count(&self, category: ObjectCategory) -> usize {
        self.table(category)
            .map(|table| table.with(|t| t.len()))
            .unwrap_or(0)
    }

    /// Run the table invariants over every category
    pub fn check_invariants(&self) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();
        for table in self.tables.iter() {
            violations.extend(table.with(|t| check_allocator_invariants(t)));
        }
        violations
    }

    /// Log a programming error and stop
    pub(crate) fn fatal(&self, msg: &str) -> ! {
        fatal(&*self.hal, msg)
    }
}

fn table_of<H: NativeOs>(
    tables: &Tables<H>,
    category: ObjectCategory,
) -> Option<&CategoryLock<IdAllocator<H::Handle>>> {
    category.table_index().and_then(|i| tables.get(i))
}

/// Remove the record of the task running on this thread and tell the native
/// layer it is exiting
fn retire_current_task<H: NativeOs>(
    hal: &H,
    tables: &Tables<H>,
) -> Result<ObjectRecord<H::Handle>, OsalError> {
    let handle = hal.current_task().ok_or(OsalError::InvalidId)?;
    let table = table_of::<H>(tables, ObjectCategory::Task).ok_or(OsalError::InvalidId)?;

    let record = table
        .with(|t| t.find_by_handle(&handle).and_then(|id| t.begin_delete(id)))
        .ok_or(OsalError::InvalidId)?;

    if table.with(|t| t.release(record.id)).is_err() {
        fatal(
            hal,
            &alloc::format!("id overlap releasing exiting task {}", record.id),
        );
    }

    hal.task_exit(&handle);
    Ok(record)
}

fn fatal<H: NativeOs>(hal: &H, msg: &str) -> ! {
    hal.debug_write(&alloc::format!("[osal] FATAL: {}", msg));
    panic!("osal: {}", msg);
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use osal_hal::TestOs;

    fn directory() -> ObjectDirectory<TestOs> {
        ObjectDirectory::new(TestOs::new(), ObjectLimits::uniform(4)).unwrap()
    }

    // ========================================================================
    // Construction tests
    // ========================================================================

    #[test]
    fn test_new_rejects_invalid_limits() {
        let mut limits = ObjectLimits::default();
        limits.max_queues = 5000;
        assert!(matches!(
            ObjectDirectory::new(TestOs::new(), limits),
            Err(ConfigError::SlotLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_new_directory_is_empty() {
        let dir = directory();
        for category in ObjectCategory::ALL {
            assert_eq!(dir.object_count(category), 0);
        }
        assert!(dir.check_invariants().is_empty());
    }

    // ========================================================================
    // Create tests
    // ========================================================================

    #[test]
    fn test_create_returns_id_of_category() {
        let dir = directory();
        let q = dir.queue_create("q", 4, 8).unwrap();
        let m = dir.mutex_create("m").unwrap();

        assert_eq!(dir.identify(q), ObjectCategory::Queue);
        assert_eq!(dir.identify(m), ObjectCategory::Mutex);
        assert_eq!(dir.object_count(ObjectCategory::Queue), 1);

        let info = dir.get_info(ObjectCategory::Queue, q).unwrap();
        assert_eq!(info.name, "q");
        assert_eq!(info.creator, ObjectId::UNDEFINED);
    }

    #[test]
    fn test_create_name_checks() {
        let dir = directory();
        assert_eq!(dir.mutex_create(""), Err(OsalError::InvalidPointer));

        let long = "x".repeat(dir.limits().max_api_name + 1);
        assert_eq!(dir.mutex_create(&long), Err(OsalError::NameTooLong));

        let exact = "x".repeat(dir.limits().max_api_name);
        assert!(dir.mutex_create(&exact).is_ok());
    }

    #[test]
    fn test_create_name_taken_per_category() {
        let dir = directory();
        dir.mutex_create("shared").unwrap();
        assert_eq!(dir.mutex_create("shared"), Err(OsalError::NameTaken));

        // Same name in another category is fine
        assert!(dir.bin_sem_create("shared", 0).is_ok());
    }

    #[test]
    fn test_create_capacity() {
        let dir = directory();
        for i in 0..4 {
            dir.count_sem_create(&alloc::format!("s{}", i), 0).unwrap();
        }
        assert_eq!(dir.count_sem_create("s4", 0), Err(OsalError::NoFreeIds));
    }

    #[test]
    fn test_create_argument_checks() {
        let dir = directory();
        assert_eq!(dir.queue_create("q", 0, 8), Err(OsalError::InvalidArgument));
        assert_eq!(dir.queue_create("q", 4, 0), Err(OsalError::InvalidArgument));
        assert_eq!(dir.bin_sem_create("b", 2), Err(OsalError::InvalidArgument));
        assert_eq!(
            dir.task_create("t", MAX_TASK_PRIORITY + 1, 4096, None),
            Err(OsalError::InvalidArgument)
        );
        assert_eq!(dir.task_create("t", 10, 0, None), Err(OsalError::InvalidArgument));
        assert_eq!(dir.module_load("m", ""), Err(OsalError::InvalidPointer));

        // Nothing was reserved
        assert!(dir.check_invariants().is_empty());
        for category in ObjectCategory::ALL {
            assert_eq!(dir.table(category).unwrap().with(|t| t.in_use()), 0);
        }
    }

    #[test]
    fn test_timer_requires_valid_timebase() {
        let dir = directory();
        let tb = dir.timebase_create("tb").unwrap();
        let timer = dir.timer_create("tick", tb).unwrap();
        assert_eq!(dir.identify(timer), ObjectCategory::TimeCB);

        let not_tb = dir.mutex_create("m").unwrap();
        assert_eq!(dir.timer_create("bad", not_tb), Err(OsalError::InvalidId));
        assert_eq!(
            dir.timer_create("bad", ObjectId::UNDEFINED),
            Err(OsalError::InvalidId)
        );
    }

    #[test]
    fn test_task_create_with_entry() {
        let dir = directory();
        let id = dir
            .task_create("worker", 50, 8192, Some(Box::new(|| {})))
            .unwrap();
        assert_eq!(dir.identify(id), ObjectCategory::Task);
        assert_eq!(dir.get_resource_name(id).unwrap(), "worker");
    }

    #[test]
    fn test_stream_named_by_path() {
        let dir = directory();
        let path = "/ram/logs/housekeeping.dat";
        assert!(path.len() > dir.limits().max_api_name);

        let fd = dir.stream_open(path, 0).unwrap();
        assert_eq!(dir.get_id_by_name(ObjectCategory::FileStream, path), Ok(fd));
    }

    // ========================================================================
    // Delete tests
    // ========================================================================

    #[test]
    fn test_delete_then_lookup_fails() {
        let dir = directory();
        let q = dir.queue_create("q", 4, 8).unwrap();
        dir.delete(ObjectCategory::Queue, q).unwrap();

        assert_eq!(dir.get_info(ObjectCategory::Queue, q).err(), Some(OsalError::InvalidId));
        assert_eq!(dir.convert_to_array_index(q), Err(OsalError::InvalidId));
        assert_eq!(dir.delete(ObjectCategory::Queue, q), Err(OsalError::InvalidId));
    }

    #[test]
    fn test_delete_wrong_category_is_invalid() {
        let dir = directory();
        let q = dir.queue_create("q", 4, 8).unwrap();
        assert_eq!(dir.delete(ObjectCategory::Mutex, q), Err(OsalError::InvalidId));
        assert_eq!(dir.object_count(ObjectCategory::Queue), 1);
    }

    #[test]
    fn test_delete_object_derives_category() {
        let dir = directory();
        let s = dir.bin_sem_create("b", 1).unwrap();
        dir.delete_object(s).unwrap();
        assert_eq!(dir.object_count(ObjectCategory::BinSem), 0);
        assert_eq!(dir.delete_object(ObjectId::RESERVED), Err(OsalError::InvalidId));
    }

    #[test]
    fn test_recreate_after_delete_gets_new_id() {
        let dir = directory();
        let first = dir.mutex_create("m").unwrap();
        dir.delete(ObjectCategory::Mutex, first).unwrap();
        let second = dir.mutex_create("m").unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_exit_task_outside_task_fails() {
        let dir = directory();
        assert_eq!(dir.exit_task(), Err(OsalError::InvalidId));
    }

    // ========================================================================
    // Lookup tests
    // ========================================================================

    #[test]
    fn test_convert_to_array_index() {
        let dir = directory();
        let a = dir.mutex_create("a").unwrap();
        let b = dir.mutex_create("b").unwrap();
        assert_eq!(dir.convert_to_array_index(a), Ok(0));
        assert_eq!(dir.convert_to_array_index(b), Ok(1));
        assert_eq!(dir.convert_to_array_index(ObjectId::UNDEFINED), Err(OsalError::InvalidId));
        assert_eq!(dir.convert_to_array_index(ObjectId::RESERVED), Err(OsalError::InvalidId));
    }

    #[test]
    fn test_get_id_by_name() {
        let dir = directory();
        let q = dir.queue_create("cmd", 4, 8).unwrap();
        assert_eq!(dir.get_id_by_name(ObjectCategory::Queue, "cmd"), Ok(q));
        assert_eq!(
            dir.get_id_by_name(ObjectCategory::Queue, "tlm"),
            Err(OsalError::NameNotFound)
        );
        assert_eq!(
            dir.get_id_by_name(ObjectCategory::Queue, ""),
            Err(OsalError::InvalidPointer)
        );
        assert_eq!(
            dir.get_id_by_name(ObjectCategory::Other, "cmd"),
            Err(OsalError::NameNotFound)
        );
    }

    #[test]
    fn test_current_task_outside_task_is_undefined() {
        let dir = directory();
        assert_eq!(dir.current_task_id(), ObjectId::UNDEFINED);
    }
}
