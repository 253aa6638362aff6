//! Error types for the object directory
//!
//! Every fallible directory operation returns `OsalError`. At an integer
//! boundary the error maps onto the classic OSAL status codes via
//! [`OsalError::code`].

use core::fmt;

use osal_hal::HalError;
use osal_idmap_core::AllocError;

/// Status code of a successful call
pub const OS_SUCCESS: i32 = 0;

/// Errors returned by directory operations
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OsalError {
    /// Missing or empty name / pointer argument
    InvalidPointer,
    /// Argument out of range for the category
    InvalidArgument,
    /// Id is not a valid object of the expected category
    InvalidId,
    /// Another object of the category already has this name
    NameTaken,
    /// Name longer than `max_api_name`
    NameTooLong,
    /// No valid object of the category has this name
    NameNotFound,
    /// Category table is full
    NoFreeIds,
    /// Native layer failed; the cause is preserved
    Platform(HalError),
}

impl OsalError {
    /// OSAL status code for this error
    pub fn code(&self) -> i32 {
        match self {
            OsalError::Platform(_) => -1,
            OsalError::InvalidPointer => -2,
            OsalError::NameTooLong => -13,
            OsalError::NoFreeIds => -14,
            OsalError::NameTaken => -15,
            OsalError::InvalidId => -16,
            OsalError::NameNotFound => -17,
            OsalError::InvalidArgument => -37,
        }
    }
}

/// Collapse a directory result into an OSAL status code
pub fn status_code<T>(result: &Result<T, OsalError>) -> i32 {
    match result {
        Ok(_) => OS_SUCCESS,
        Err(e) => e.code(),
    }
}

impl fmt::Display for OsalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsalError::InvalidPointer => write!(f, "Invalid pointer"),
            OsalError::InvalidArgument => write!(f, "Invalid argument"),
            OsalError::InvalidId => write!(f, "Invalid object id"),
            OsalError::NameTaken => write!(f, "Name already taken"),
            OsalError::NameTooLong => write!(f, "Name too long"),
            OsalError::NameNotFound => write!(f, "Name not found"),
            OsalError::NoFreeIds => write!(f, "No free ids"),
            OsalError::Platform(e) => write!(f, "Platform error: {}", e),
        }
    }
}

impl From<HalError> for OsalError {
    fn from(e: HalError) -> Self {
        OsalError::Platform(e)
    }
}

impl From<AllocError> for OsalError {
    fn from(e: AllocError) -> Self {
        match e {
            AllocError::NoFreeIds => OsalError::NoFreeIds,
            AllocError::StaleId(_) => OsalError::InvalidId,
        }
    }
}
