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

//! Hosted kernel.
//!
//! Kernel threads are `std` threads.  Suspending a thread parks it and making
//! it runnable unparks it; `std` park tokens give the resume-before-suspend
//! behavior the scheduler contract requires.  There are no real interrupts, so
//! the interrupt enable flag is emulated per thread and only observed by
//! tests.

use std::cell::Cell;
use std::sync::OnceLock;
use std::thread::{self, Thread};

use time::{Clock, Instant};

use crate::arch::Arch;
use crate::scheduler::Scheduler;

mod spinlock;

pub use spinlock::BareSpinLock;

std::thread_local! {
    static INTERRUPTS_ENABLED: Cell<bool> = const { Cell::new(true) };
}

/// Monotonic nanosecond clock anchored at its first use.
pub struct HostClock;

impl Clock for HostClock {
    const TICKS_PER_SEC: u64 = 1_000_000_000;

    fn now() -> Instant<Self> {
        static EPOCH: OnceLock<std::time::Instant> = OnceLock::new();
        let epoch = EPOCH.get_or_init(std::time::Instant::now);
        let nanos = u64::try_from(epoch.elapsed().as_nanos()).unwrap_or(u64::MAX);
        Instant::from_ticks(nanos)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HostKernel;

impl Arch for HostKernel {
    type BareSpinLock = BareSpinLock;
    type Clock = HostClock;

    fn enable_interrupts() {
        INTERRUPTS_ENABLED.with(|enabled| enabled.set(true));
    }

    fn disable_interrupts() {
        INTERRUPTS_ENABLED.with(|enabled| enabled.set(false));
    }

    fn interrupts_enabled() -> bool {
        INTERRUPTS_ENABLED.with(Cell::get)
    }
}

impl Scheduler for HostKernel {
    type ThreadHandle = Thread;

    fn current_thread(self) -> Thread {
        thread::current()
    }

    fn suspend_current_thread(self, deadline: Instant<HostClock>) {
        if deadline == Instant::MAX {
            thread::park();
            return;
        }

        let now = HostClock::now();
        if deadline <= now {
            return;
        }
        match (deadline - now).as_nanos() {
            Some(nanos) => thread::park_timeout(core::time::Duration::from_nanos(nanos)),
            None => thread::park(),
        }
    }

    fn make_thread_runnable(self, thread: &Thread) {
        thread.unpark();
    }

    fn reschedule(self) {
        thread::yield_now();
    }
}
