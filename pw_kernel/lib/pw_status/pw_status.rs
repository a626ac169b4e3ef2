// Copyright 2025 The Pigweed Authors
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License. You may obtain a copy of
// the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied. See the
// License for the specific language governing permissions and limitations under
// the License.

//! # pw_status
//!
//! Error codes shared by the kernel's synchronization primitives, compatible
//! with Pigweed's [pw_status](https://pigweed.dev/pw_status).  `OK` is not a
//! variant of [`Error`]; a successful operation is simply `Ok(_)` and the
//! [`StatusCode`] trait turns any [`Result`] back into a canonical code.
//!
//! The blocking primitives report their two recoverable failures with it:
//! a wait that runs past its deadline yields [`Error::DeadlineExceeded`] and a
//! wait cut short by the object being torn down yields [`Error::Aborted`].
//!
//! # Example
//!
//! ```
//! use pw_status::{Error, Result, StatusCode};
//!
//! fn take(available: usize, wanted: usize) -> Result<usize> {
//!     if available == 0 {
//!         Err(Error::DeadlineExceeded)
//!     } else {
//!         Ok(available.min(wanted))
//!     }
//! }
//!
//! assert_eq!(take(4, 2), Ok(2));
//! assert_eq!(take(0, 2).status_code(), 4);
//! ```

#![no_std]

use core::fmt;

/// Status code for no error.
pub const OK: u32 = 0;

/// Canonical error codes.
///
/// See the [Pigweed status codes documentation](https://pigweed.dev/pw_status/#status-codes)
/// for the meaning of each value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    Cancelled = 1,
    Unknown = 2,
    InvalidArgument = 3,
    DeadlineExceeded = 4,
    NotFound = 5,
    AlreadyExists = 6,
    PermissionDenied = 7,
    ResourceExhausted = 8,
    FailedPrecondition = 9,
    Aborted = 10,
    OutOfRange = 11,
    Unimplemented = 12,
    Internal = 13,
    Unavailable = 14,
    DataLoss = 15,
    Unauthenticated = 16,
}

impl Error {
    /// Returns the upper snake case name used by Pigweed tooling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Error::Cancelled => "CANCELLED",
            Error::Unknown => "UNKNOWN",
            Error::InvalidArgument => "INVALID_ARGUMENT",
            Error::DeadlineExceeded => "DEADLINE_EXCEEDED",
            Error::NotFound => "NOT_FOUND",
            Error::AlreadyExists => "ALREADY_EXISTS",
            Error::PermissionDenied => "PERMISSION_DENIED",
            Error::ResourceExhausted => "RESOURCE_EXHAUSTED",
            Error::FailedPrecondition => "FAILED_PRECONDITION",
            Error::Aborted => "ABORTED",
            Error::OutOfRange => "OUT_OF_RANGE",
            Error::Unimplemented => "UNIMPLEMENTED",
            Error::Internal => "INTERNAL",
            Error::Unavailable => "UNAVAILABLE",
            Error::DataLoss => "DATA_LOSS",
            Error::Unauthenticated => "UNAUTHENTICATED",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub type Result<T> = core::result::Result<T, Error>;

/// Convert a Result into an status code.
pub trait StatusCode {
    /// Return a pigweed compatible status code.
    fn status_code(self) -> u32;
}

impl<T> StatusCode for Result<T> {
    fn status_code(self) -> u32 {
        match self {
            Ok(_) => OK,
            Err(e) => e as u32,
        }
    }
}

// Lets kernel I/O adapters use `Error` directly as their `embedded_io` error.
impl embedded_io::Error for Error {
    fn kind(&self) -> embedded_io::ErrorKind {
        use embedded_io::ErrorKind;
        match self {
            Error::Cancelled | Error::Aborted => ErrorKind::Interrupted,
            Error::DeadlineExceeded => ErrorKind::TimedOut,
            Error::InvalidArgument | Error::FailedPrecondition | Error::OutOfRange => {
                ErrorKind::InvalidInput
            }
            Error::NotFound => ErrorKind::NotFound,
            Error::AlreadyExists => ErrorKind::AlreadyExists,
            Error::PermissionDenied => ErrorKind::PermissionDenied,
            Error::ResourceExhausted => ErrorKind::OutOfMemory,
            Error::Unimplemented | Error::Internal => ErrorKind::Unsupported,
            Error::Unknown | Error::Unavailable | Error::DataLoss | Error::Unauthenticated => {
                ErrorKind::Other
            }
        }
    }
}
