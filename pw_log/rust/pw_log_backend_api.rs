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

/// Pigweed's standard log levels
///
/// Values are limited to 3 bits and match the C/C++ implementation of the
/// `pw_log` module.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
#[repr(u8)]
pub enum LogLevel {
    /// Detailed tracing, compiled in per module through `log_if`.
    Debug = 1,
    /// Normal operation.
    Info = 2,
    /// Recoverable oddities.
    Warn = 3,
    /// A failed operation.
    Error = 4,
    /// The system is degraded.
    Critical = 5,
    // Level 6 is not defined in order to match the protobuf definition.
    /// Emitted right before the system halts.
    Fatal = 7,
}

impl LogLevel {
    /// Three letter tag printed in front of each line.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            LogLevel::Debug => "DBG",
            LogLevel::Info => "INF",
            LogLevel::Warn => "WRN",
            LogLevel::Error => "ERR",
            LogLevel::Critical => "CRT",
            LogLevel::Fatal => "FTL",
        }
    }
}
