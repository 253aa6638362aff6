//! Mock native OS layer for testing the OSAL object-id core
//!
//! This provides a mock implementation of the `NativeOs` trait that can be
//! used for testing the object directory without an RTOS underneath.
//!
//! Unlike `osal_hal::TestOs`, the mock:
//! - tracks every native resource and whether it is still live
//! - captures debug output
//! - can be told to fail the next create/delete of a given kind
//! - runs task entries on real threads, so task bodies can call back into
//!   the directory concurrently with the test thread

use std::cell::Cell;
use std::collections::BTreeMap;
use std::string::String;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::JoinHandle;
use std::vec::Vec;

use osal_hal::{HalError, NativeOs, NumericHandle, TaskAttrs, TaskEntry};
use spin::Mutex;

std::thread_local! {
    /// Native handle of the mock task running on this thread
    static CURRENT_TASK: Cell<Option<u64>> = const { Cell::new(None) };
}

/// Kind of native resource, used for accounting and failure injection
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum MockKind {
    Task,
    Queue,
    CountSem,
    BinSem,
    Mutex,
    TimeBase,
    Timer,
    Module,
    Stream,
}

/// Simulated native resource
struct MockResource {
    kind: MockKind,
    #[allow(dead_code)]
    name: String,
    live: bool,
}

/// Mock native layer for testing
pub struct MockOs {
    /// Next native handle to assign
    next_handle: AtomicU64,
    /// Captured debug messages
    debug_log: Mutex<Vec<String>>,
    /// Every resource ever created (handle -> resource)
    resources: Mutex<BTreeMap<u64, MockResource>>,
    /// Entries of tasks that were created but not yet started
    pending_entries: Mutex<BTreeMap<u64, TaskEntry>>,
    /// Threads running started task entries
    task_threads: Mutex<Vec<JoinHandle<()>>>,
    /// Failures to return from the next create of a kind
    create_failures: Mutex<Vec<(MockKind, HalError)>>,
    /// Failures to return from the next delete of a kind
    delete_failures: Mutex<Vec<(MockKind, HalError)>>,
    /// Failures to return from the next task start
    start_failures: Mutex<Vec<HalError>>,
    /// Handles of tasks that exited on their own
    exited: Mutex<Vec<u64>>,
}

impl MockOs {
    /// Create a new mock native layer
    pub fn new() -> Self {
        Self {
            next_handle: AtomicU64::new(1),
            debug_log: Mutex::new(Vec::new()),
            resources: Mutex::new(BTreeMap::new()),
            pending_entries: Mutex::new(BTreeMap::new()),
            task_threads: Mutex::new(Vec::new()),
            create_failures: Mutex::new(Vec::new()),
            delete_failures: Mutex::new(Vec::new()),
            start_failures: Mutex::new(Vec::new()),
            exited: Mutex::new(Vec::new()),
        }
    }

    /// Make the next create of `kind` fail with `err`
    pub fn fail_next_create(&self, kind: MockKind, err: HalError) {
        self.create_failures.lock().push((kind, err));
    }

    /// Make the next delete of `kind` fail with `err`
    pub fn fail_next_delete(&self, kind: MockKind, err: HalError) {
        self.delete_failures.lock().push((kind, err));
    }

    /// Make the next `task_start` fail with `err`
    pub fn fail_next_start(&self, err: HalError) {
        self.start_failures.lock().push(err);
    }

    /// Get all captured debug messages
    pub fn get_debug_log(&self) -> Vec<String> {
        self.debug_log.lock().clone()
    }

    /// Clear the debug log
    pub fn clear_debug_log(&self) {
        self.debug_log.lock().clear();
    }

    /// Check if a specific message was logged
    pub fn has_log_containing(&self, substr: &str) -> bool {
        self.debug_log.lock().iter().any(|msg| msg.contains(substr))
    }

    /// Count the debug messages containing `substr`
    pub fn count_log_containing(&self, substr: &str) -> usize {
        self.debug_log
            .lock()
            .iter()
            .filter(|msg| msg.contains(substr))
            .count()
    }

    /// Get the number of live resources of a kind
    pub fn live_count(&self, kind: MockKind) -> usize {
        self.resources
            .lock()
            .values()
            .filter(|r| r.kind == kind && r.live)
            .count()
    }

    /// Get the number of live resources of every kind
    pub fn live_total(&self) -> usize {
        self.resources.lock().values().filter(|r| r.live).count()
    }

    /// Get the total number of resources ever created
    pub fn created_total(&self) -> usize {
        self.resources.lock().len()
    }

    /// Check whether a native handle is still live
    pub fn is_live(&self, handle: &NumericHandle) -> bool {
        self.resources
            .lock()
            .get(&handle.id())
            .map(|r| r.live)
            .unwrap_or(false)
    }

    /// Check whether a task exited through `task_exit`
    pub fn task_exited(&self, handle: &NumericHandle) -> bool {
        self.exited.lock().contains(&handle.id())
    }

    /// Run `f` on the calling thread as if it were the body of `task`
    pub fn run_as_task<R>(&self, task: &NumericHandle, f: impl FnOnce() -> R) -> R {
        let previous = CURRENT_TASK.with(|c| c.replace(Some(task.id())));
        let result = f();
        CURRENT_TASK.with(|c| c.set(previous));
        result
    }

    /// Wait for every started task entry to return
    pub fn join_tasks(&self) {
        loop {
            let threads: Vec<JoinHandle<()>> = self.task_threads.lock().drain(..).collect();
            if threads.is_empty() {
                break;
            }
            for t in threads {
                if t.join().is_err() {
                    self.debug_write("[mock-os] Task thread panicked");
                }
            }
        }
    }

    fn take_failure(list: &Mutex<Vec<(MockKind, HalError)>>, kind: MockKind) -> Option<HalError> {
        let mut list = list.lock();
        let pos = list.iter().position(|(k, _)| *k == kind)?;
        Some(list.remove(pos).1)
    }

    fn create(&self, kind: MockKind, name: &str) -> Result<NumericHandle, HalError> {
        if let Some(err) = Self::take_failure(&self.create_failures, kind) {
            self.debug_write(&std::format!(
                "[mock-os] Injected {:?} create failure for '{}': {}",
                kind,
                name,
                err
            ));
            return Err(err);
        }

        let id = self.next_handle.fetch_add(1, Ordering::SeqCst);
        self.resources.lock().insert(
            id,
            MockResource {
                kind,
                name: String::from(name),
                live: true,
            },
        );
        self.debug_write(&std::format!(
            "[mock-os] Created {:?} '{}' with handle {}",
            kind,
            name,
            id
        ));
        Ok(NumericHandle::new(id))
    }

    fn destroy(&self, kind: MockKind, handle: &NumericHandle) -> Result<(), HalError> {
        let injected = Self::take_failure(&self.delete_failures, kind);

        let mut resources = self.resources.lock();
        match resources.get_mut(&handle.id()) {
            Some(res) if res.kind == kind && res.live => {
                if let Some(err) = injected {
                    // A failed native delete still leaves the resource live
                    return Err(err);
                }
                res.live = false;
                drop(resources);
                self.debug_write(&std::format!(
                    "[mock-os] Destroyed {:?} handle {}",
                    kind,
                    handle.id()
                ));
                Ok(())
            }
            _ => Err(HalError::NotFound),
        }
    }
}

impl Default for MockOs {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeOs for MockOs {
    type Handle = NumericHandle;

    fn task_create(&self, name: &str, attrs: TaskAttrs) -> Result<Self::Handle, HalError> {
        if attrs.stack_size == 0 {
            return Err(HalError::InvalidArgument);
        }
        let handle = self.create(MockKind::Task, name)?;
        if let Some(entry) = attrs.entry {
            self.pending_entries.lock().insert(handle.id(), entry);
        }
        Ok(handle)
    }

    fn task_start(&self, handle: &Self::Handle) -> Result<(), HalError> {
        if !self.is_live(handle) {
            return Err(HalError::NotFound);
        }
        if let Some(err) = self.start_failures.lock().pop() {
            return Err(err);
        }
        let entry = match self.pending_entries.lock().remove(&handle.id()) {
            Some(entry) => entry,
            None => return Ok(()),
        };

        let id = handle.id();
        let thread = std::thread::Builder::new()
            .name(std::format!("mock-task-{}", id))
            .spawn(move || {
                CURRENT_TASK.with(|c| c.set(Some(id)));
                entry();
            })
            .map_err(|_| HalError::OutOfResources)?;
        self.task_threads.lock().push(thread);
        Ok(())
    }

    fn task_delete(&self, handle: &Self::Handle) -> Result<(), HalError> {
        self.pending_entries.lock().remove(&handle.id());
        self.destroy(MockKind::Task, handle)
    }

    fn task_exit(&self, handle: &Self::Handle) {
        if let Some(res) = self.resources.lock().get_mut(&handle.id()) {
            res.live = false;
        }
        self.exited.lock().push(handle.id());
        self.debug_write(&std::format!("[mock-os] Task handle {} exited", handle.id()));
    }

    fn current_task(&self) -> Option<Self::Handle> {
        CURRENT_TASK.with(|c| c.get()).map(NumericHandle::new)
    }

    fn queue_create(&self, name: &str, depth: usize, msg_size: usize) -> Result<Self::Handle, HalError> {
        if depth == 0 || msg_size == 0 {
            return Err(HalError::InvalidArgument);
        }
        self.create(MockKind::Queue, name)
    }

    fn queue_delete(&self, handle: &Self::Handle) -> Result<(), HalError> {
        self.destroy(MockKind::Queue, handle)
    }

    fn count_sem_create(&self, name: &str, _initial: u32) -> Result<Self::Handle, HalError> {
        self.create(MockKind::CountSem, name)
    }

    fn count_sem_delete(&self, handle: &Self::Handle) -> Result<(), HalError> {
        self.destroy(MockKind::CountSem, handle)
    }

    fn bin_sem_create(&self, name: &str, initial: u32) -> Result<Self::Handle, HalError> {
        if initial > 1 {
            return Err(HalError::InvalidArgument);
        }
        self.create(MockKind::BinSem, name)
    }

    fn bin_sem_delete(&self, handle: &Self::Handle) -> Result<(), HalError> {
        self.destroy(MockKind::BinSem, handle)
    }

    fn mutex_create(&self, name: &str) -> Result<Self::Handle, HalError> {
        self.create(MockKind::Mutex, name)
    }

    fn mutex_delete(&self, handle: &Self::Handle) -> Result<(), HalError> {
        self.destroy(MockKind::Mutex, handle)
    }

    fn timebase_create(&self, name: &str) -> Result<Self::Handle, HalError> {
        self.create(MockKind::TimeBase, name)
    }

    fn timebase_delete(&self, handle: &Self::Handle) -> Result<(), HalError> {
        self.destroy(MockKind::TimeBase, handle)
    }

    fn timer_create(&self, name: &str, timebase: &Self::Handle) -> Result<Self::Handle, HalError> {
        if !self.is_live(timebase) {
            return Err(HalError::NotFound);
        }
        self.create(MockKind::Timer, name)
    }

    fn timer_delete(&self, handle: &Self::Handle) -> Result<(), HalError> {
        self.destroy(MockKind::Timer, handle)
    }

    fn module_load(&self, name: &str, path: &str) -> Result<Self::Handle, HalError> {
        if path.is_empty() {
            return Err(HalError::InvalidArgument);
        }
        self.create(MockKind::Module, name)
    }

    fn module_unload(&self, handle: &Self::Handle) -> Result<(), HalError> {
        self.destroy(MockKind::Module, handle)
    }

    fn stream_open(&self, path: &str, _flags: u32) -> Result<Self::Handle, HalError> {
        if path.is_empty() {
            return Err(HalError::InvalidArgument);
        }
        self.create(MockKind::Stream, path)
    }

    fn stream_close(&self, handle: &Self::Handle) -> Result<(), HalError> {
        self.destroy(MockKind::Stream, handle)
    }

    fn debug_write(&self, msg: &str) {
        self.debug_log.lock().push(String::from(msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::boxed::Box;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;

    fn attrs(entry: Option<TaskEntry>) -> TaskAttrs {
        TaskAttrs {
            priority: 100,
            stack_size: 4096,
            entry,
        }
    }

    #[test]
    fn test_mock_os_debug_log() {
        let os = MockOs::new();

        os.debug_write("Hello");
        os.debug_write("World");

        let log = os.get_debug_log();
        assert_eq!(log.len(), 2);
        assert_eq!(log[0], "Hello");
        assert_eq!(log[1], "World");

        assert!(os.has_log_containing("Hello"));
        assert!(!os.has_log_containing("Foo"));

        os.clear_debug_log();
        assert!(os.get_debug_log().is_empty());
    }

    #[test]
    fn test_mock_os_create_delete_accounting() {
        let os = MockOs::new();

        let q = os.queue_create("q", 4, 32).unwrap();
        let m = os.mutex_create("m").unwrap();
        assert_eq!(os.live_count(MockKind::Queue), 1);
        assert_eq!(os.live_count(MockKind::Mutex), 1);
        assert_eq!(os.live_total(), 2);

        os.queue_delete(&q).unwrap();
        assert_eq!(os.live_count(MockKind::Queue), 0);
        assert!(!os.is_live(&q));
        assert!(os.is_live(&m));

        // Deleting again fails
        assert_eq!(os.queue_delete(&q), Err(HalError::NotFound));
        assert_eq!(os.created_total(), 2);
    }

    #[test]
    fn test_mock_os_delete_wrong_kind() {
        let os = MockOs::new();
        let q = os.queue_create("q", 4, 32).unwrap();
        assert_eq!(os.mutex_delete(&q), Err(HalError::NotFound));
        assert!(os.is_live(&q));
    }

    #[test]
    fn test_mock_os_injected_create_failure() {
        let os = MockOs::new();
        os.fail_next_create(MockKind::BinSem, HalError::Native(-12));

        // Other kinds are unaffected
        assert!(os.count_sem_create("c", 0).is_ok());

        assert_eq!(os.bin_sem_create("b", 0), Err(HalError::Native(-12)));
        assert!(os.bin_sem_create("b", 0).is_ok());
        assert!(os.has_log_containing("Injected BinSem create failure"));
    }

    #[test]
    fn test_mock_os_injected_delete_failure_keeps_resource() {
        let os = MockOs::new();
        let s = os.count_sem_create("c", 3).unwrap();
        os.fail_next_delete(MockKind::CountSem, HalError::IoError);

        assert_eq!(os.count_sem_delete(&s), Err(HalError::IoError));
        assert!(os.is_live(&s));
        assert!(os.count_sem_delete(&s).is_ok());
    }

    #[test]
    fn test_mock_os_argument_checks() {
        let os = MockOs::new();
        assert_eq!(os.queue_create("q", 0, 8), Err(HalError::InvalidArgument));
        assert_eq!(os.bin_sem_create("b", 2), Err(HalError::InvalidArgument));
        assert_eq!(os.stream_open("", 0), Err(HalError::InvalidArgument));
        assert_eq!(
            os.task_create(
                "t",
                TaskAttrs {
                    priority: 1,
                    stack_size: 0,
                    entry: None
                }
            ),
            Err(HalError::InvalidArgument)
        );
    }

    #[test]
    fn test_mock_os_timer_requires_live_timebase() {
        let os = MockOs::new();
        let tb = os.timebase_create("tb").unwrap();
        assert!(os.timer_create("t1", &tb).is_ok());

        os.timebase_delete(&tb).unwrap();
        assert_eq!(os.timer_create("t2", &tb), Err(HalError::NotFound));
    }

    #[test]
    fn test_mock_os_task_entry_waits_for_start() {
        let os = MockOs::new();
        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();

        let task = os
            .task_create("t", attrs(Some(Box::new(move || flag.store(true, Ordering::SeqCst)))))
            .unwrap();
        os.join_tasks();
        assert!(!ran.load(Ordering::SeqCst));

        os.task_start(&task).unwrap();
        os.join_tasks();
        assert!(ran.load(Ordering::SeqCst));
    }

    #[test]
    fn test_mock_os_current_task_inside_entry() {
        let os = Arc::new(MockOs::new());
        let seen = Arc::new(AtomicU64::new(0));

        let os2 = os.clone();
        let seen2 = seen.clone();
        let task = os
            .task_create(
                "t",
                attrs(Some(Box::new(move || {
                    let me = os2.current_task().map(|h| h.id()).unwrap_or(0);
                    seen2.store(me, Ordering::SeqCst);
                }))),
            )
            .unwrap();
        os.task_start(&task).unwrap();
        os.join_tasks();

        assert_eq!(seen.load(Ordering::SeqCst), task.id());
        assert_eq!(os.current_task(), None);
    }

    #[test]
    fn test_mock_os_run_as_task_restores_context() {
        let os = MockOs::new();
        let task = os.task_create("t", attrs(None)).unwrap();

        let inside = os.run_as_task(&task, || os.current_task());
        assert_eq!(inside, Some(task));
        assert_eq!(os.current_task(), None);
    }

    #[test]
    fn test_mock_os_task_exit() {
        let os = MockOs::new();
        let task = os.task_create("t", attrs(None)).unwrap();
        os.task_exit(&task);
        assert!(os.task_exited(&task));
        assert!(!os.is_live(&task));
        assert_eq!(os.task_delete(&task), Err(HalError::NotFound));
    }

    #[test]
    fn test_mock_os_injected_start_failure() {
        let os = MockOs::new();
        let task = os.task_create("t", attrs(None)).unwrap();
        os.fail_next_start(HalError::Native(-3));
        assert_eq!(os.task_start(&task), Err(HalError::Native(-3)));
        assert_eq!(os.task_start(&task), Ok(()));
    }

    #[test]
    fn test_mock_os_modules_supported() {
        let os = MockOs::new();
        let m = os.module_load("mod", "/cf/mod.so").unwrap();
        assert_eq!(os.live_count(MockKind::Module), 1);
        os.module_unload(&m).unwrap();
        assert_eq!(os.live_count(MockKind::Module), 0);
    }
}
