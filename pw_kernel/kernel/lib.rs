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

//! Kernel synchronization primitives: spinlocks, wait/wake events, and the
//! blocking bounded byte queue (`cbuf`) that drivers use to hand data between
//! interrupt handlers and threads.
//!
//! Everything is generic over a [`Kernel`], the pairing of an [`Arch`]
//! (spinlocks, interrupt masking, clock) with a [`Scheduler`] (suspending and
//! resuming threads).  The `arch_host` feature provides
//! [`arch::host::HostKernel`], which runs the primitives on `std` threads.
#![no_std]

extern crate alloc;
#[cfg(any(test, feature = "arch_host"))]
extern crate std;

pub mod arch;
pub mod scheduler;
pub mod sync;

pub use arch::{Arch, BareSpinLock};
pub use scheduler::{Kernel, Scheduler};
pub use sync::cbuf::{Cbuf, CbufPeek, IrqCbuf};
pub use sync::event::{Event, EventFlags};
