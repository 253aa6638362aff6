//! Object type registry
//!
//! Capacity of every object category (the `OS_MAX_*` configuration of a
//! flight build) plus the maximum object name length. Limits are plain data:
//! a build picks them once, the directory sizes its tables from them and
//! never changes them afterwards.

use core::fmt;
use serde::{Deserialize, Serialize};

use crate::types::{ObjectCategory, MAX_SLOTS};

/// Default `OS_MAX_TASKS`
pub const DEFAULT_MAX_TASKS: usize = 64;
/// Default `OS_MAX_QUEUES`
pub const DEFAULT_MAX_QUEUES: usize = 64;
/// Default `OS_MAX_COUNT_SEMAPHORES`
pub const DEFAULT_MAX_COUNT_SEMS: usize = 20;
/// Default `OS_MAX_BIN_SEMAPHORES`
pub const DEFAULT_MAX_BIN_SEMS: usize = 20;
/// Default `OS_MAX_MUTEXES`
pub const DEFAULT_MAX_MUTEXES: usize = 20;
/// Default `OS_MAX_TIMERS`
pub const DEFAULT_MAX_TIMERS: usize = 5;
/// Default `OS_MAX_MODULES`
pub const DEFAULT_MAX_MODULES: usize = 20;
/// Default `OS_MAX_NUM_OPEN_FILES`
pub const DEFAULT_MAX_FILE_STREAMS: usize = 50;
/// Default `OS_MAX_TIMEBASES`
pub const DEFAULT_MAX_TIMEBASES: usize = 5;
/// Default `OS_MAX_API_NAME`
pub const DEFAULT_MAX_API_NAME: usize = 20;
/// Default `OS_MAX_PATH_LEN`
pub const DEFAULT_MAX_PATH_LEN: usize = 64;

/// Per-category capacities
///
/// Missing fields in a serialized configuration take the defaults above.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectLimits {
    pub max_tasks: usize,
    pub max_queues: usize,
    pub max_count_sems: usize,
    pub max_bin_sems: usize,
    pub max_mutexes: usize,
    pub max_timers: usize,
    pub max_modules: usize,
    pub max_file_streams: usize,
    pub max_timebases: usize,
    /// Longest accepted object name, in bytes
    pub max_api_name: usize,
    /// Longest accepted file stream name (streams are named by path)
    pub max_path_len: usize,
}

impl ObjectLimits {
    /// Capacity of a category (`Other` has none)
    pub fn max_for(&self, category: ObjectCategory) -> usize {
        match category {
            ObjectCategory::Task => self.max_tasks,
            ObjectCategory::Queue => self.max_queues,
            ObjectCategory::CountSem => self.max_count_sems,
            ObjectCategory::BinSem => self.max_bin_sems,
            ObjectCategory::Mutex => self.max_mutexes,
            ObjectCategory::TimeCB => self.max_timers,
            ObjectCategory::Module => self.max_modules,
            ObjectCategory::FileStream => self.max_file_streams,
            ObjectCategory::TimeBase => self.max_timebases,
            ObjectCategory::Other => 0,
        }
    }

    /// Same limits with every category capped at `n` slots
    pub fn uniform(n: usize) -> Self {
        Self {
            max_tasks: n,
            max_queues: n,
            max_count_sems: n,
            max_bin_sems: n,
            max_mutexes: n,
            max_timers: n,
            max_modules: n,
            max_file_streams: n,
            max_timebases: n,
            max_api_name: DEFAULT_MAX_API_NAME,
            max_path_len: DEFAULT_MAX_PATH_LEN,
        }
    }

    /// Longest accepted name for objects of `category`
    pub fn name_limit(&self, category: ObjectCategory) -> usize {
        match category {
            ObjectCategory::FileStream => self.max_path_len,
            _ => self.max_api_name,
        }
    }

    /// Check that every limit fits the id encoding
    pub fn validate(&self) -> Result<(), ConfigError> {
        for category in ObjectCategory::ALL {
            let requested = self.max_for(category);
            if requested > MAX_SLOTS {
                return Err(ConfigError::SlotLimitExceeded {
                    category,
                    requested,
                });
            }
        }
        if self.max_api_name == 0 || self.max_path_len == 0 {
            return Err(ConfigError::ZeroNameLength);
        }
        Ok(())
    }

    /// Parse and validate limits from a JSON document
    ///
    /// ```ignore
    /// let limits = ObjectLimits::from_json(r#"{ "max_queues": 8 }"#)?;
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let limits: ObjectLimits =
            serde_json::from_str(json).map_err(|_| ConfigError::Parse)?;
        limits.validate()?;
        Ok(limits)
    }

    /// Sum of all category capacities
    pub fn total_slots(&self) -> usize {
        ObjectCategory::ALL.iter().map(|c| self.max_for(*c)).sum()
    }
}

impl Default for ObjectLimits {
    fn default() -> Self {
        Self {
            max_tasks: DEFAULT_MAX_TASKS,
            max_queues: DEFAULT_MAX_QUEUES,
            max_count_sems: DEFAULT_MAX_COUNT_SEMS,
            max_bin_sems: DEFAULT_MAX_BIN_SEMS,
            max_mutexes: DEFAULT_MAX_MUTEXES,
            max_timers: DEFAULT_MAX_TIMERS,
            max_modules: DEFAULT_MAX_MODULES,
            max_file_streams: DEFAULT_MAX_FILE_STREAMS,
            max_timebases: DEFAULT_MAX_TIMEBASES,
            max_api_name: DEFAULT_MAX_API_NAME,
            max_path_len: DEFAULT_MAX_PATH_LEN,
        }
    }
}

/// Configuration errors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Document is not valid JSON for `ObjectLimits`
    Parse,
    /// A category asks for more slots than an `ObjectId` can index
    SlotLimitExceeded {
        category: ObjectCategory,
        requested: usize,
    },
    /// Names and paths must be allowed at least one byte
    ZeroNameLength,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse => write!(f, "Malformed object limits"),
            ConfigError::SlotLimitExceeded {
                category,
                requested,
            } => write!(
                f,
                "{} limit {} exceeds the {} addressable slots",
                category, requested, MAX_SLOTS
            ),
            ConfigError::ZeroNameLength => write!(f, "Name length limits must be non-zero"),
        }
    }
}
