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

//! `pw_log` is the logging facade used by the kernel.
//!
//! Clients import the level macros and log with `core::fmt` style format
//! strings.  Invocations are forwarded to a single backend chosen at build
//! time:
//!
//! * `backend_println` (the default) formats each line with its level tag and
//!   emits it with [`std::println!`].  It is meant for host builds and tests.
//! * Without it, the final image must define
//!   `pw_log_backend_write(LogLevel, core::fmt::Arguments)` and route the line
//!   to whatever console the target has.
//!
//! ```
//! pw_log::info!("cbuf ready: {} bytes", 64 as usize);
//! pw_log::debug!("signal with {} waiters", 0 as usize);
//! ```
#![cfg_attr(not(feature = "backend_println"), no_std)]
#![deny(missing_docs)]

#[path = "pw_log_backend_api.rs"]
mod backend_api;

#[cfg(feature = "backend_println")]
#[path = "pw_log_backend_println.rs"]
pub mod backend;

#[cfg(not(feature = "backend_println"))]
mod backend {
    use crate::LogLevel;

    unsafe extern "Rust" {
        fn pw_log_backend_write(level: LogLevel, args: core::fmt::Arguments<'_>);
    }

    #[inline]
    pub fn log(level: LogLevel, args: core::fmt::Arguments<'_>) {
        // SAFETY: The target links exactly one definition with this signature.
        unsafe { pw_log_backend_write(level, args) }
    }
}

pub use backend_api::LogLevel;

// Re-export dependences of `pw_log` macros to be accessed via `$crate::__private`.
#[doc(hidden)]
pub mod __private {
    pub use crate::backend::log;
    pub use crate::*;
}

/// Emit a log message at `$log_level` using `core::fmt` format string
/// semantics.
///
/// ```
/// use pw_log::LogLevel;
///
/// pw_log::log!(LogLevel::Warn, "dropped {} bytes", 3 as usize);
/// ```
#[macro_export]
macro_rules! log {
  ($log_level:expr, $($args:tt)+) => {{
    $crate::__private::log($log_level, ::core::format_args!($($args)+))
  }};
}

/// Emit a debug level log message.
#[macro_export]
macro_rules! debug {
  ($($args:tt)+) => {
    $crate::log!($crate::LogLevel::Debug, $($args)+)
  };
}

/// Emit an info level log message.
#[macro_export]
macro_rules! info {
  ($($args:tt)+) => {
    $crate::log!($crate::LogLevel::Info, $($args)+)
  };
}

/// Emit a warn level log message.
#[macro_export]
macro_rules! warn {
  ($($args:tt)+) => {
    $crate::log!($crate::LogLevel::Warn, $($args)+)
  };
}

/// Emit an error level log message.
#[macro_export]
macro_rules! error {
  ($($args:tt)+) => {
    $crate::log!($crate::LogLevel::Error, $($args)+)
  };
}

/// Emit a critical level log message.
#[macro_export]
macro_rules! critical {
  ($($args:tt)+) => {
    $crate::log!($crate::LogLevel::Critical, $($args)+)
  };
}

/// Emit a fatal level log message.
///
/// *Note*: `fatal` only emits a log message and does not cause a `panic!()`.
/// Use `pw_assert::panic!` to stop the system.
#[macro_export]
macro_rules! fatal {
  ($($args:tt)+) => {
    $crate::log!($crate::LogLevel::Fatal, $($args)+)
  };
}
