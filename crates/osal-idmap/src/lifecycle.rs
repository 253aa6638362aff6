//! Bulk teardown and leak detection

use alloc::vec::Vec;

use osal_hal::NativeOs;
use osal_idmap_core::{ObjectCategory, ObjectInfo};

use crate::directory::ObjectDirectory;
use crate::error::OsalError;

/// Teardown order: users of a resource go before the resource
pub const DELETE_ORDER: [ObjectCategory; 9] = [
    ObjectCategory::Task,
    ObjectCategory::TimeCB,
    ObjectCategory::TimeBase,
    ObjectCategory::Queue,
    ObjectCategory::BinSem,
    ObjectCategory::CountSem,
    ObjectCategory::Mutex,
    ObjectCategory::Module,
    ObjectCategory::FileStream,
];

/// Passes `delete_all_objects` makes before giving up on stragglers
pub const MAX_TEARDOWN_PASSES: usize = 5;

impl<H: NativeOs> ObjectDirectory<H> {
    /// Delete every valid object, in dependency order
    ///
    /// Objects created while the teardown runs are picked up by later
    /// passes. Ids deleted concurrently by someone else are skipped. Returns
    /// the number of objects this call removed.
    pub fn delete_all_objects(&self) -> usize {
        let mut removed = 0;

        for pass in 0..MAX_TEARDOWN_PASSES {
            let mut found = 0;

            for category in DELETE_ORDER {
                let ids = match self.table(category) {
                    Some(table) => table.with(|t| t.valid_ids()),
                    None => continue,
                };
                found += ids.len();

                for id in ids {
                    match self.delete(category, id) {
                        Ok(()) => removed += 1,
                        Err(OsalError::InvalidId) => {}
                        Err(e) => {
                            // Slot is freed even when the native side failed
                            removed += 1;
                            self.hal.debug_write(&alloc::format!(
                                "[osal] Teardown of {} {} reported: {}",
                                category,
                                id,
                                e
                            ));
                        }
                    }
                }
            }

            if found == 0 {
                break;
            }
            if pass + 1 == MAX_TEARDOWN_PASSES {
                self.hal.debug_write(&alloc::format!(
                    "[osal] Teardown gave up after {} passes",
                    MAX_TEARDOWN_PASSES
                ));
            }
        }

        self.hal.debug_write(&alloc::format!(
            "[osal] Deleted {} objects",
            removed
        ));
        removed
    }

    /// Report every valid object of `categories` as a leak
    ///
    /// Each object is logged as a `FAIL` line. Nothing is deleted.
    pub fn check_for_orphans(&self, categories: &[ObjectCategory]) -> Vec<ObjectInfo> {
        let mut orphans = Vec::new();

        for &category in categories {
            let table = match self.table(category) {
                Some(table) => table,
                None => continue,
            };
            let ids = table.with(|t| t.valid_ids());

            for id in ids {
                let record = match table.with(|t| t.record(id)) {
                    Some(record) => record,
                    None => continue,
                };
                self.hal.debug_write(&alloc::format!(
                    "[osal] FAIL: orphaned {} '{}' ({}) created by {}",
                    category,
                    record.name,
                    id,
                    record.creator
                ));
                orphans.push(record.info());
            }
        }

        orphans
    }

    /// Report queues left open
    pub fn check_for_open_queues(&self) -> Vec<ObjectInfo> {
        self.check_for_orphans(&[ObjectCategory::Queue])
    }

    /// Report leaks in every category, then delete everything
    pub fn shutdown(&self) -> usize {
        let orphans = self.check_for_orphans(&ObjectCategory::ALL);
        self.hal.debug_write(&alloc::format!(
            "[osal] Shutdown with {} objects still open",
            orphans.len()
        ));
        self.delete_all_objects()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use osal_hal::TestOs;
    use osal_idmap_core::{ObjectId, ObjectLimits};

    fn directory() -> ObjectDirectory<TestOs> {
        ObjectDirectory::new(TestOs::new(), ObjectLimits::uniform(4)).unwrap()
    }

    #[test]
    fn test_delete_order_covers_every_category() {
        for category in ObjectCategory::ALL {
            assert!(DELETE_ORDER.contains(&category));
        }
    }

    #[test]
    fn test_delete_all_objects() {
        let dir = directory();
        let tb = dir.timebase_create("tb").unwrap();
        dir.timer_create("tick", tb).unwrap();
        dir.queue_create("q", 2, 4).unwrap();
        dir.mutex_create("m").unwrap();
        dir.stream_open("/ram/f", 0).unwrap();

        assert_eq!(dir.delete_all_objects(), 5);
        for category in ObjectCategory::ALL {
            assert_eq!(dir.object_count(category), 0);
        }
        assert!(dir.check_invariants().is_empty());
    }

    #[test]
    fn test_delete_all_objects_is_idempotent() {
        let dir = directory();
        dir.mutex_create("m").unwrap();
        assert_eq!(dir.delete_all_objects(), 1);
        assert_eq!(dir.delete_all_objects(), 0);
    }

    #[test]
    fn test_orphan_check_does_not_mutate() {
        let dir = directory();
        let q = dir.queue_create("leaky", 2, 4).unwrap();
        dir.mutex_create("m").unwrap();

        let open = dir.check_for_open_queues();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, q);
        assert_eq!(open[0].name, "leaky");
        assert_eq!(open[0].creator, ObjectId::UNDEFINED);

        let all = dir.check_for_orphans(&ObjectCategory::ALL);
        assert_eq!(all.len(), 2);
        assert_eq!(dir.object_count(ObjectCategory::Queue), 1);
    }

    #[test]
    fn test_shutdown_clears_directory() {
        let dir = directory();
        dir.count_sem_create("c", 3).unwrap();
        dir.bin_sem_create("b", 1).unwrap();

        assert_eq!(dir.shutdown(), 2);
        assert!(dir.check_for_orphans(&ObjectCategory::ALL).is_empty());
    }
}
