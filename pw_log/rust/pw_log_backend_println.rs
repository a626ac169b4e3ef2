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

//! `pw_log` backend that calls [`std::println!`] to emit log messages.  This
//! module is useful when you have an application or test running on the
//! development host and you want messages to be emitted to `stdout`.
//!
//! *Note*: This modules requires `std`.
use core::fmt;

use crate::LogLevel;

/// Formats one log line, `[TAG] message`, into `out`.
pub fn write_line<W: fmt::Write>(out: &mut W, level: LogLevel, args: fmt::Arguments<'_>) -> fmt::Result {
    write!(out, "[{}] {}", level.tag(), args)
}

#[doc(hidden)]
pub fn log(level: LogLevel, args: fmt::Arguments<'_>) {
    let mut line = String::new();
    if write_line(&mut line, level, args).is_ok() {
        println!("{line}");
    }
}
