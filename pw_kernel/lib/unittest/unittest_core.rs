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

//! Result-returning test assertions.
//!
//! Tests are ordinary `#[test]` functions returning [`Result<()>`].  The
//! `assert_*` macros return a [`TestError`] pointing at the failing line
//! instead of panicking, so a test can hold locks or joined threads across
//! its checks and still report cleanly.
//!
//! ```
//! fn ring_starts_empty() -> unittest::Result<()> {
//!     let used = 0usize;
//!     unittest::assert_eq!(used, 0);
//!     unittest::assert_true!(used < 16);
//!     Ok(())
//! }
//! # ring_starts_empty().unwrap();
//! ```
#![no_std]

use core::fmt;

pub struct TestError {
    pub file: &'static str,
    pub line: u32,
    pub message: &'static str,
}

impl fmt::Debug for TestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.file, self.line, self.message)
    }
}

impl fmt::Display for TestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

pub type Result<T> = core::result::Result<T, TestError>;

#[doc(hidden)]
#[macro_export]
macro_rules! __fail {
    ($message:expr) => {
        return Err($crate::TestError {
            file: ::core::file!(),
            line: ::core::line!(),
            message: $message,
        })
    };
}

#[macro_export]
macro_rules! assert_eq {
    ($a:expr, $b:expr $(,)?) => {
        if $a != $b {
            $crate::__fail!(::core::concat!(
                "assert_eq!(",
                ::core::stringify!($a),
                ", ",
                ::core::stringify!($b),
                ") failed"
            ));
        }
    };
}

#[macro_export]
macro_rules! assert_ne {
    ($a:expr, $b:expr $(,)?) => {
        if $a == $b {
            $crate::__fail!(::core::concat!(
                "assert_ne!(",
                ::core::stringify!($a),
                ", ",
                ::core::stringify!($b),
                ") failed"
            ));
        }
    };
}

#[macro_export]
macro_rules! assert_true {
    ($a:expr $(,)?) => {
        if !$a {
            $crate::__fail!(::core::concat!(
                "assert_true!(",
                ::core::stringify!($a),
                ") failed"
            ));
        }
    };
}

#[macro_export]
macro_rules! assert_false {
    ($a:expr $(,)?) => {
        if $a {
            $crate::__fail!(::core::concat!(
                "assert_false!(",
                ::core::stringify!($a),
                ") failed"
            ));
        }
    };
}
