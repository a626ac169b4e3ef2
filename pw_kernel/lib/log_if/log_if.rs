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

//! Conditional logging.
//!
//! Kernel modules gate their chatty logging on a `const bool` from the kernel
//! configuration.  Because the condition is a constant the whole statement,
//! formatting included, is removed when the switch is off.
#![no_std]

pub use pw_log::LogLevel;

// Re-export dependencies of `log_if` macros to be accessed via `$crate::__private`.
#[doc(hidden)]
pub mod __private {
    pub use pw_log;

    pub use crate::*;
}

/// Emit a log message at `$log_level` if `$condition` is true.
///
/// ```
/// use log_if::{log_if, LogLevel};
///
/// const LOG_RING: bool = true;
/// log_if!(LOG_RING, LogLevel::Info, "ring has {} free bytes", 15 as usize);
/// ```
#[macro_export]
macro_rules! log_if {
  ($condition:expr, $log_level:expr, $($args:tt)+) => {{
    if $condition {
      $crate::__private::pw_log::log!($log_level, $($args)+)
    }
  }};
}

/// Emit a debug level log message if `$condition` is true.
///
/// ```
/// use log_if::debug_if;
///
/// const LOG_EVENTS: bool = false;
/// debug_if!(LOG_EVENTS, "woke {} waiters", 3 as usize);
/// ```
#[macro_export]
macro_rules! debug_if {
  ($condition:expr, $($args:tt)+) => {
    $crate::log_if!($condition, $crate::LogLevel::Debug, $($args)+)
  };
}

/// Emit an info level log message if `$condition` is true.
#[macro_export]
macro_rules! info_if {
  ($condition:expr, $($args:tt)+) => {
    $crate::log_if!($condition, $crate::LogLevel::Info, $($args)+)
  };
}

/// Emit a warn level log message if `$condition` is true.
#[macro_export]
macro_rules! warn_if {
  ($condition:expr, $($args:tt)+) => {
    $crate::log_if!($condition, $crate::LogLevel::Warn, $($args)+)
  };
}
