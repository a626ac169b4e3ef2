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
#![no_std]

/// Kernel configuration common to all architectures.
///
/// Targets override the defaults by implementing this trait on their own
/// `KernelConfig` type; the host build uses the defaults as is.
pub trait KernelConfigInterface {
    /// Log event destruction and wake-ups at debug level.
    const LOG_EVENTS: bool = false;

    /// Log ring buffer construction and resets at debug level.
    const LOG_CBUF: bool = false;

    /// Re-check ring buffer cursor invariants after every mutation.
    const VALIDATE_CBUF: bool = cfg!(debug_assertions);
}

pub struct KernelConfig;

impl KernelConfigInterface for KernelConfig {}
