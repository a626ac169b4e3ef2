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

use time::Instant;

use crate::arch::Arch;

/// The scheduler operations the synchronization primitives depend on.
///
/// Primitives keep their own queues of blocked threads and only ask the
/// scheduler to park and resume individual threads.  The contract:
///
/// * [`suspend_current_thread`] may return early (spuriously, or because the
///   deadline passed).  Callers re-check their condition under their own lock
///   after every return.
/// * A [`make_thread_runnable`] that lands before the target thread has
///   suspended is not lost: the next suspend of that thread returns promptly.
///
/// [`suspend_current_thread`]: Scheduler::suspend_current_thread
/// [`make_thread_runnable`]: Scheduler::make_thread_runnable
pub trait Scheduler: Arch {
    /// Handle used to resume a suspended thread.
    type ThreadHandle: Clone + Send;

    fn current_thread(self) -> Self::ThreadHandle;

    /// Blocks the calling thread until it is made runnable or `deadline`
    /// passes.  [`Instant::MAX`] never expires.
    ///
    /// # Interrupt context
    ///
    /// This method is *not* safe to call in an interrupt context.
    fn suspend_current_thread(self, deadline: Instant<Self::Clock>);

    /// Marks `thread` runnable.
    ///
    /// # Interrupt context
    ///
    /// This method *is* safe to call in an interrupt context.
    fn make_thread_runnable(self, thread: &Self::ThreadHandle);

    /// Gives the scheduler a chance to switch to a thread made runnable
    /// since the last reschedule.
    fn reschedule(self);
}

/// Everything the primitives in [`crate::sync`] need from the system.
pub trait Kernel: Scheduler {}

impl<K: Scheduler> Kernel for K {}
