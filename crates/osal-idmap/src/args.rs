//! Per-category creation arguments

use alloc::string::String;
use core::fmt;

use osal_hal::TaskEntry;
use osal_idmap_core::{ObjectCategory, ObjectId};

/// Initialization arguments for `ObjectDirectory::create`
///
/// One variant per creatable category, so the category of the new object is
/// implied by the arguments.
pub enum ObjectArgs {
    Task {
        priority: u32,
        stack_size: usize,
        entry: Option<TaskEntry>,
    },
    Queue {
        depth: usize,
        msg_size: usize,
    },
    CountSem {
        initial: u32,
    },
    BinSem {
        initial: u32,
    },
    Mutex,
    TimeBase,
    /// Timer callback attached to an existing time base
    Timer {
        timebase: ObjectId,
    },
    Module {
        path: String,
    },
    FileStream {
        path: String,
        flags: u32,
    },
}

impl ObjectArgs {
    /// Category the arguments create
    pub fn category(&self) -> ObjectCategory {
        match self {
            ObjectArgs::Task { .. } => ObjectCategory::Task,
            ObjectArgs::Queue { .. } => ObjectCategory::Queue,
            ObjectArgs::CountSem { .. } => ObjectCategory::CountSem,
            ObjectArgs::BinSem { .. } => ObjectCategory::BinSem,
            ObjectArgs::Mutex => ObjectCategory::Mutex,
            ObjectArgs::TimeBase => ObjectCategory::TimeBase,
            ObjectArgs::Timer { .. } => ObjectCategory::TimeCB,
            ObjectArgs::Module { .. } => ObjectCategory::Module,
            ObjectArgs::FileStream { .. } => ObjectCategory::FileStream,
        }
    }
}

impl fmt::Debug for ObjectArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectArgs::Task {
                priority,
                stack_size,
                entry,
            } => f
                .debug_struct("Task")
                .field("priority", priority)
                .field("stack_size", stack_size)
                .field("entry", &entry.is_some())
                .finish(),
            ObjectArgs::Queue { depth, msg_size } => f
                .debug_struct("Queue")
                .field("depth", depth)
                .field("msg_size", msg_size)
                .finish(),
            ObjectArgs::CountSem { initial } => {
                f.debug_struct("CountSem").field("initial", initial).finish()
            }
            ObjectArgs::BinSem { initial } => {
                f.debug_struct("BinSem").field("initial", initial).finish()
            }
            ObjectArgs::Mutex => f.write_str("Mutex"),
            ObjectArgs::TimeBase => f.write_str("TimeBase"),
            ObjectArgs::Timer { timebase } => {
                f.debug_struct("Timer").field("timebase", timebase).finish()
            }
            ObjectArgs::Module { path } => f.debug_struct("Module").field("path", path).finish(),
            ObjectArgs::FileStream { path, flags } => f
                .debug_struct("FileStream")
                .field("path", path)
                .field("flags", flags)
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use alloc::format;

    #[test]
    fn test_args_imply_category() {
        let cases = [
            (ObjectArgs::Mutex, ObjectCategory::Mutex),
            (ObjectArgs::TimeBase, ObjectCategory::TimeBase),
            (ObjectArgs::CountSem { initial: 0 }, ObjectCategory::CountSem),
            (ObjectArgs::BinSem { initial: 1 }, ObjectCategory::BinSem),
            (
                ObjectArgs::Queue {
                    depth: 4,
                    msg_size: 8,
                },
                ObjectCategory::Queue,
            ),
            (
                ObjectArgs::Timer {
                    timebase: ObjectId::UNDEFINED,
                },
                ObjectCategory::TimeCB,
            ),
            (
                ObjectArgs::Module {
                    path: String::from("/cf/app.so"),
                },
                ObjectCategory::Module,
            ),
            (
                ObjectArgs::FileStream {
                    path: String::from("/ram/log"),
                    flags: 0,
                },
                ObjectCategory::FileStream,
            ),
        ];
        for (args, expected) in cases {
            assert_eq!(args.category(), expected);
        }
    }

    #[test]
    fn test_task_args_debug_hides_entry() {
        let args = ObjectArgs::Task {
            priority: 10,
            stack_size: 4096,
            entry: Some(Box::new(|| {})),
        };
        assert_eq!(args.category(), ObjectCategory::Task);
        let s = format!("{:?}", args);
        assert!(s.contains("priority: 10"));
        assert!(s.contains("entry: true"));
    }
}
