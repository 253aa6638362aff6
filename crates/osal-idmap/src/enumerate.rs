//! Object enumeration
//!
//! The category lock is taken once per slot, only long enough to copy the
//! slot's id and creator. Callbacks always run unlocked, so they may call
//! back into the directory (including deleting the object they were given).

use serde::{Deserialize, Serialize};

use osal_hal::NativeOs;
use osal_idmap_core::{ObjectCategory, ObjectId, TaskId};

use crate::directory::ObjectDirectory;

impl<H: NativeOs> ObjectDirectory<H> {
    /// Visit every valid object of every category
    ///
    /// `creator_filter == UNDEFINED` visits all objects; any other value
    /// visits only the objects that task created.
    pub fn for_each_object<F>(&self, creator_filter: TaskId, mut callback: F)
    where
        F: FnMut(ObjectId),
    {
        for category in ObjectCategory::ALL {
            self.for_each_object_of_type(category, creator_filter, &mut callback);
        }
    }

    /// Visit every valid object of one category
    pub fn for_each_object_of_type<F>(
        &self,
        category: ObjectCategory,
        creator_filter: TaskId,
        mut callback: F,
    ) where
        F: FnMut(ObjectId),
    {
        let table = match self.table(category) {
            Some(table) => table,
            None => return,
        };
        let capacity = table.with(|t| t.capacity());

        for index in 0..capacity {
            let entry = table.with(|t| t.entry_at(index));
            if let Some((id, creator)) = entry {
                if creator_filter == ObjectId::UNDEFINED || creator == creator_filter {
                    callback(id);
                }
            }
        }
    }
}

/// Per-category tally of enumerated objects
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectCounter {
    pub task: usize,
    pub queue: usize,
    pub count_sem: usize,
    pub bin_sem: usize,
    pub mutex: usize,
    pub timer: usize,
    pub module: usize,
    pub file_stream: usize,
    pub timebase: usize,
    pub other: usize,
}

impl ObjectCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every object `creator_filter` selects in `directory`
    pub fn tally<H: NativeOs>(directory: &ObjectDirectory<H>, creator_filter: TaskId) -> Self {
        let mut counter = Self::new();
        directory.for_each_object(creator_filter, |id| {
            counter.count(directory.identify(id));
        });
        counter
    }

    /// Add one object of `category`
    pub fn count(&mut self, category: ObjectCategory) {
        *self.slot_mut(category) += 1;
    }

    pub fn get(&self, category: ObjectCategory) -> usize {
        match category {
            ObjectCategory::Task => self.task,
            ObjectCategory::Queue => self.queue,
            ObjectCategory::CountSem => self.count_sem,
            ObjectCategory::BinSem => self.bin_sem,
            ObjectCategory::Mutex => self.mutex,
            ObjectCategory::TimeCB => self.timer,
            ObjectCategory::Module => self.module,
            ObjectCategory::FileStream => self.file_stream,
            ObjectCategory::TimeBase => self.timebase,
            ObjectCategory::Other => self.other,
        }
    }

    pub fn total(&self) -> usize {
        ObjectCategory::ALL.iter().map(|c| self.get(*c)).sum::<usize>() + self.other
    }

    fn slot_mut(&mut self, category: ObjectCategory) -> &mut usize {
        match category {
            ObjectCategory::Task => &mut self.task,
            ObjectCategory::Queue => &mut self.queue,
            ObjectCategory::CountSem => &mut self.count_sem,
            ObjectCategory::BinSem => &mut self.bin_sem,
            ObjectCategory::Mutex => &mut self.mutex,
            ObjectCategory::TimeCB => &mut self.timer,
            ObjectCategory::Module => &mut self.module,
            ObjectCategory::FileStream => &mut self.file_stream,
            ObjectCategory::TimeBase => &mut self.timebase,
            ObjectCategory::Other => &mut self.other,
        }
    }
}
