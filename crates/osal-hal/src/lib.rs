//! Native OS primitive layer for the OSAL object-id core
//!
//! This crate defines the trait that lets the object directory run on top of
//! different real-time operating systems (RTEMS, VxWorks, POSIX/Linux) by
//! abstracting the native task, queue, semaphore, timer, module and file
//! primitives.
//!
//! # Platform Implementations
//!
//! - **POSIX**: pthreads for tasks, mqueue/condvar queues, `sem_t`, `pthread_mutex_t`
//! - **RTEMS**: Classic API tasks, message queues and semaphores
//! - **VxWorks**: `taskInit`/`taskActivate`, `msgQCreate`, `semBCreate`/`semCCreate`/`semMCreate`
//!
//! The object directory never inspects a native handle: it stores whatever
//! the platform returns and hands it back on delete.

#![no_std]

extern crate alloc;

use alloc::boxed::Box;
use core::fmt;

/// Body of a task, run once the task is started.
pub type TaskEntry = Box<dyn FnOnce() + Send + 'static>;

/// Attributes of a native task.
pub struct TaskAttrs {
    /// Scheduling priority (0 = highest, 255 = lowest)
    pub priority: u32,
    /// Stack size in bytes
    pub stack_size: usize,
    /// Task body; `None` creates a task with no work (test and placeholder tasks)
    pub entry: Option<TaskEntry>,
}

impl fmt::Debug for TaskAttrs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskAttrs")
            .field("priority", &self.priority)
            .field("stack_size", &self.stack_size)
            .field("entry", &self.entry.is_some())
            .finish()
    }
}

/// Native OS primitive layer
///
/// Implementations provide the platform-specific constructor/destructor
/// pair for every object category managed by the object directory:
/// - Tasks (create suspended, start, delete, self-exit)
/// - Message queues
/// - Counting and binary semaphores, mutexes
/// - Time bases and timer callbacks
/// - Loadable modules
/// - File streams
/// - Debug output
///
/// # Associated Types
///
/// - `Handle`: Platform-specific handle to a native resource
///   - On POSIX: index into the implementation's pthread/sem tables
///   - On VxWorks/RTEMS: the kernel object id returned by the native create call
pub trait NativeOs: Send + Sync + 'static {
    /// Handle to a native resource
    type Handle: Clone + Send + Sync + PartialEq + fmt::Debug + 'static;

    // === Tasks ===

    /// Create a task in the suspended state
    ///
    /// The task must not run its entry until `task_start` is called.
    ///
    /// # Returns
    /// * `Ok(Handle)` - Handle to the new (suspended) task
    /// * `Err(HalError::OutOfResources)` - No native task could be created
    fn task_create(&self, name: &str, attrs: TaskAttrs) -> Result<Self::Handle, HalError>;

    /// Let a task created by `task_create` begin running its entry
    fn task_start(&self, handle: &Self::Handle) -> Result<(), HalError>;

    /// Forcibly delete a task
    fn task_delete(&self, handle: &Self::Handle) -> Result<(), HalError>;

    /// Called from inside a task body that is about to return
    ///
    /// Releases native bookkeeping for the calling task. The default is a
    /// no-op for platforms that reclaim exiting tasks on their own.
    fn task_exit(&self, _handle: &Self::Handle) {}

    /// Native handle of the calling task, if it was created through `task_create`
    fn current_task(&self) -> Option<Self::Handle>;

    // === Queues ===

    /// Create a message queue
    ///
    /// # Arguments
    /// * `name` - Queue name (for platforms that name kernel objects)
    /// * `depth` - Maximum number of queued messages
    /// * `msg_size` - Maximum size of one message in bytes
    fn queue_create(
        &self,
        name: &str,
        depth: usize,
        msg_size: usize,
    ) -> Result<Self::Handle, HalError>;

    /// Delete a message queue
    fn queue_delete(&self, handle: &Self::Handle) -> Result<(), HalError>;

    // === Semaphores ===

    /// Create a counting semaphore
    fn count_sem_create(&self, name: &str, initial: u32) -> Result<Self::Handle, HalError>;

    /// Delete a counting semaphore
    fn count_sem_delete(&self, handle: &Self::Handle) -> Result<(), HalError>;

    /// Create a binary semaphore (`initial` is 0 or 1)
    fn bin_sem_create(&self, name: &str, initial: u32) -> Result<Self::Handle, HalError>;

    /// Delete a binary semaphore
    fn bin_sem_delete(&self, handle: &Self::Handle) -> Result<(), HalError>;

    /// Create a mutex
    fn mutex_create(&self, name: &str) -> Result<Self::Handle, HalError>;

    /// Delete a mutex
    fn mutex_delete(&self, handle: &Self::Handle) -> Result<(), HalError>;

    // === Time ===

    /// Create a time base (a tick source that timer callbacks attach to)
    fn timebase_create(&self, name: &str) -> Result<Self::Handle, HalError>;

    /// Delete a time base
    fn timebase_delete(&self, handle: &Self::Handle) -> Result<(), HalError>;

    /// Create a timer callback attached to a time base
    fn timer_create(&self, name: &str, timebase: &Self::Handle)
        -> Result<Self::Handle, HalError>;

    /// Delete a timer callback
    fn timer_delete(&self, handle: &Self::Handle) -> Result<(), HalError>;

    // === Modules and files ===

    /// Load a module from `path`
    ///
    /// Platforms without a dynamic loader keep the default.
    fn module_load(&self, _name: &str, _path: &str) -> Result<Self::Handle, HalError> {
        Err(HalError::NotSupported)
    }

    /// Unload a module
    fn module_unload(&self, _handle: &Self::Handle) -> Result<(), HalError> {
        Err(HalError::NotSupported)
    }

    /// Open a file stream
    fn stream_open(&self, path: &str, flags: u32) -> Result<Self::Handle, HalError>;

    /// Close a file stream
    fn stream_close(&self, handle: &Self::Handle) -> Result<(), HalError>;

    // === Debug ===

    /// Write a debug message to the platform's console/log
    fn debug_write(&self, msg: &str);
}

/// Native layer errors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HalError {
    /// The platform ran out of the underlying resource
    OutOfResources,
    /// The platform rejected an argument
    InvalidArgument,
    /// Native handle does not refer to a live resource
    NotFound,
    /// Operation not supported on this platform
    NotSupported,
    /// I/O error
    IoError,
    /// Raw platform status code (errno, VxWorks/RTEMS status)
    Native(i32),
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HalError::OutOfResources => write!(f, "native resources exhausted"),
            HalError::InvalidArgument => write!(f, "invalid argument"),
            HalError::NotFound => write!(f, "native handle not found"),
            HalError::NotSupported => write!(f, "not supported on this platform"),
            HalError::IoError => write!(f, "I/O error"),
            HalError::Native(code) => write!(f, "native status {}", code),
        }
    }
}

/// A simple handle for platforms that use numeric IDs
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NumericHandle(pub u64);

impl NumericHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A minimal native layer for unit testing
///
/// Every constructor succeeds with a fresh numeric handle, every destructor
/// succeeds, and task entries are dropped without running.
#[derive(Default)]
pub struct TestOs {
    next: core::sync::atomic::AtomicU64,
}

impl TestOs {
    pub fn new() -> Self {
        Self {
            next: core::sync::atomic::AtomicU64::new(0),
        }
    }

    fn issue(&self) -> NumericHandle {
        let id = self.next.fetch_add(1, core::sync::atomic::Ordering::SeqCst) + 1;
        NumericHandle::new(id)
    }
}

impl NativeOs for TestOs {
    type Handle = NumericHandle;

    fn task_create(&self, _name: &str, _attrs: TaskAttrs) -> Result<Self::Handle, HalError> {
        Ok(self.issue())
    }

    fn task_start(&self, _handle: &Self::Handle) -> Result<(), HalError> {
        Ok(())
    }

    fn task_delete(&self, _handle: &Self::Handle) -> Result<(), HalError> {
        Ok(())
    }

    fn current_task(&self) -> Option<Self::Handle> {
        None
    }

    fn queue_create(&self, _name: &str, _depth: usize, _msg_size: usize) -> Result<Self::Handle, HalError> {
        Ok(self.issue())
    }

    fn queue_delete(&self, _handle: &Self::Handle) -> Result<(), HalError> {
        Ok(())
    }

    fn count_sem_create(&self, _name: &str, _initial: u32) -> Result<Self::Handle, HalError> {
        Ok(self.issue())
    }

    fn count_sem_delete(&self, _handle: &Self::Handle) -> Result<(), HalError> {
        Ok(())
    }

    fn bin_sem_create(&self, _name: &str, _initial: u32) -> Result<Self::Handle, HalError> {
        Ok(self.issue())
    }

    fn bin_sem_delete(&self, _handle: &Self::Handle) -> Result<(), HalError> {
        Ok(())
    }

    fn mutex_create(&self, _name: &str) -> Result<Self::Handle, HalError> {
        Ok(self.issue())
    }

    fn mutex_delete(&self, _handle: &Self::Handle) -> Result<(), HalError> {
        Ok(())
    }

    fn timebase_create(&self, _name: &str) -> Result<Self::Handle, HalError> {
        Ok(self.issue())
    }

    fn timebase_delete(&self, _handle: &Self::Handle) -> Result<(), HalError> {
        Ok(())
    }

    fn timer_create(&self, _name: &str, _timebase: &Self::Handle) -> Result<Self::Handle, HalError> {
        Ok(self.issue())
    }

    fn timer_delete(&self, _handle: &Self::Handle) -> Result<(), HalError> {
        Ok(())
    }

    fn module_load(&self, _name: &str, _path: &str) -> Result<Self::Handle, HalError> {
        Ok(self.issue())
    }

    fn module_unload(&self, _handle: &Self::Handle) -> Result<(), HalError> {
        Ok(())
    }

    fn stream_open(&self, _path: &str, _flags: u32) -> Result<Self::Handle, HalError> {
        Ok(self.issue())
    }

    fn stream_close(&self, _handle: &Self::Handle) -> Result<(), HalError> {
        Ok(())
    }

    fn debug_write(&self, _msg: &str) {
        // No-op for tests
    }
}
