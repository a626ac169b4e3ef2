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

use core::cell::Cell;

use bitflags::bitflags;
use intrusive_collections::{LinkedList, LinkedListLink, UnsafeRef, intrusive_adapter};
use kernel_config::{KernelConfig, KernelConfigInterface};
use pw_status::{Error, Result};
use time::{Clock as _, Duration, Instant};

use crate::Kernel;
use crate::sync::spinlock::SpinLock;

bitflags! {
    /// Behavior flags for an [`Event`].
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct EventFlags: u32 {
        /// A signal releases exactly one waiter and is consumed by it.
        ///
        /// Without this flag the event is a broadcast: a signal releases every
        /// waiter and stays set until [`Event::unsignal`].
        const AUTO_UNSIGNAL = 1 << 0;
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum WaitStatus {
    Pending,
    Woken,
    Destroyed,
}

#[derive(Eq, PartialEq)]
enum WakeResult {
    Woken,
    QueueEmpty,
}

// A blocked thread.  Lives on that thread's stack for the duration of its wait.
struct Waiter<T> {
    link: LinkedListLink,
    thread: T,
    status: Cell<WaitStatus>,
}

intrusive_adapter!(WaiterAdapter<T> = UnsafeRef<Waiter<T>>: Waiter<T> { link: LinkedListLink });

struct EventState<T> {
    signaled: bool,
    destroyed: bool,
    waiters: LinkedList<WaiterAdapter<T>>,
}

// SAFETY: `waiters` links `Waiter`s owned by other threads.  They are only
// reached through the event's spinlock, and each one stays alive until its
// owner has observed, under that lock, that it is no longer linked.
unsafe impl<T: Send> Send for EventState<T> {}

impl<T> EventState<T> {
    fn wake_one<K: Kernel<ThreadHandle = T>>(&mut self, kernel: K, status: WaitStatus) -> WakeResult {
        let Some(waiter) = self.waiters.pop_front() else {
            return WakeResult::QueueEmpty;
        };
        // The waiter's owner re-takes the event lock before looking at its
        // status, so its stack frame is valid for as long as we hold the lock.
        waiter.status.set(status);
        kernel.make_thread_runnable(&waiter.thread);
        WakeResult::Woken
    }

    fn wake_all<K: Kernel<ThreadHandle = T>>(&mut self, kernel: K, status: WaitStatus) -> usize {
        let mut woken = 0;
        while self.wake_one(kernel, status) == WakeResult::Woken {
            woken += 1;
        }
        woken
    }
}

/// A binary wait/wake primitive.
///
/// Threads block in [`wait`] (or its deadline variants) until the event is
/// signaled.  [`signal`] either releases every waiter and leaves the event
/// signaled, or, with [`EventFlags::AUTO_UNSIGNAL`], hands the signal to
/// exactly one waiter.  A signal that finds no waiter is never lost: it stays
/// set for the next `wait`.
///
/// Waiters are released in the order they started waiting.
///
/// [`wait`]: Event::wait
/// [`signal`]: Event::signal
pub struct Event<K: Kernel> {
    kernel: K,
    flags: EventFlags,
    state: SpinLock<K, EventState<K::ThreadHandle>>,
}

impl<K: Kernel> Event<K> {
    /// Constructs a new `Event` in the given initial state.
    #[must_use]
    pub fn new(kernel: K, initial: bool, flags: EventFlags) -> Self {
        Self {
            kernel,
            flags,
            state: SpinLock::new(EventState {
                signaled: initial,
                destroyed: false,
                waiters: LinkedList::new(WaiterAdapter::new()),
            }),
        }
    }

    #[must_use]
    pub fn flags(&self) -> EventFlags {
        self.flags
    }

    /// Returns the current signal state.  Only a snapshot.
    #[must_use]
    pub fn is_signaled(&self) -> bool {
        self.state.lock().signaled
    }

    /// Waits until the `Event` is signaled.
    ///
    /// Returns `Err(Error::Aborted)` if the event is destroyed while waiting.
    ///
    /// # Interrupt context
    ///
    /// This method is *not* safe to call in an interrupt context.
    pub fn wait(&self) -> Result<()> {
        self.wait_until(Instant::MAX)
    }

    /// Waits until the `Event` is signaled or `timeout` elapses.
    ///
    /// A zero or negative `timeout` polls: it succeeds only if the event is
    /// already signaled.
    ///
    /// # Interrupt context
    ///
    /// This method is *not* safe to call in an interrupt context.
    pub fn wait_timeout(&self, timeout: Duration<K::Clock>) -> Result<()> {
        self.wait_until(K::Clock::now().saturating_add_duration(timeout))
    }

    /// Waits until the `Event` is signaled or `deadline` is reached.
    ///
    /// With [`EventFlags::AUTO_UNSIGNAL`] the thread released by a signal
    /// consumes it, leaving the event un-signaled.
    ///
    /// Returns `Err(Error::DeadlineExceeded)` if the deadline passes first and
    /// `Err(Error::Aborted)` if the event is destroyed while waiting.  Neither
    /// consumes a signal.
    ///
    /// # Interrupt context
    ///
    /// This method is *not* safe to call in an interrupt context.
    pub fn wait_until(&self, deadline: Instant<K::Clock>) -> Result<()> {
        let mut state = self.state.lock();
        pw_assert::debug_assert!(!state.destroyed, "wait on a destroyed event");
        if state.destroyed {
            return Err(Error::Aborted);
        }

        if state.signaled {
            if self.flags.contains(EventFlags::AUTO_UNSIGNAL) {
                state.signaled = false;
            }
            return Ok(());
        }

        if deadline.has_passed() {
            return Err(Error::DeadlineExceeded);
        }

        let waiter = Waiter {
            link: LinkedListLink::new(),
            thread: self.kernel.current_thread(),
            status: Cell::new(WaitStatus::Pending),
        };
        let waiter_ptr: *const Waiter<K::ThreadHandle> = &raw const waiter;
        // SAFETY: `waiter` is not moved or dropped while linked.  Every return
        // below happens with the event lock held and either after a waker
        // unlinked it (status is no longer `Pending`) or after unlinking it
        // here.
        state.waiters.push_back(unsafe { UnsafeRef::from_raw(waiter_ptr) });
        drop(state);

        loop {
            self.kernel.suspend_current_thread(deadline);

            let mut state = self.state.lock();
            match waiter.status.get() {
                WaitStatus::Woken => return Ok(()),
                WaitStatus::Destroyed => return Err(Error::Aborted),
                WaitStatus::Pending if deadline.has_passed() => {
                    // SAFETY: A `Pending` waiter is still linked in this list.
                    unsafe { state.waiters.cursor_mut_from_ptr(waiter_ptr).remove() };
                    return Err(Error::DeadlineExceeded);
                }
                // Spurious resume.
                WaitStatus::Pending => {}
            }
        }
    }

    /// Signals the `Event`.
    ///
    /// Does nothing if the event is already signaled.  `reschedule` asks the
    /// scheduler to switch to a released thread once the event's lock is
    /// dropped; it is a hint and does not change what is released.
    ///
    /// # Interrupt context
    ///
    /// This method *is* safe to call in an interrupt context when
    /// `reschedule` is `false`.
    pub fn signal(&self, reschedule: bool) {
        let mut state = self.state.lock();
        pw_assert::debug_assert!(!state.destroyed, "signal of a destroyed event");
        if state.destroyed || state.signaled {
            return;
        }

        let released = if self.flags.contains(EventFlags::AUTO_UNSIGNAL) {
            // Hand the signal straight to a waiter if there is one.
            match state.wake_one(self.kernel, WaitStatus::Woken) {
                WakeResult::Woken => 1,
                WakeResult::QueueEmpty => {
                    state.signaled = true;
                    0
                }
            }
        } else {
            state.signaled = true;
            state.wake_all(self.kernel, WaitStatus::Woken)
        };
        drop(state);

        log_if::debug_if!(
            KernelConfig::LOG_EVENTS,
            "event signaled, released {} waiters",
            released
        );
        if reschedule && released > 0 {
            self.kernel.reschedule();
        }
    }

    /// Sets the `Event`'s state to un-signaled.
    ///
    /// Threads already released by an earlier signal are unaffected.
    ///
    /// # Interrupt context
    ///
    /// This method *is* safe to call in an interrupt context.
    pub fn unsignal(&self) {
        let mut state = self.state.lock();
        pw_assert::debug_assert!(!state.destroyed, "unsignal of a destroyed event");
        state.signaled = false;
    }

    /// Tears the `Event` down.
    ///
    /// Every queued waiter returns `Err(Error::Aborted)`.  The event is left
    /// un-signaled and poisoned: using it again asserts in debug builds, and in
    /// release builds waits fail with `Error::Aborted`.
    pub fn destroy(&self) {
        let mut state = self.state.lock();
        pw_assert::debug_assert!(!state.destroyed, "event destroyed twice");
        state.destroyed = true;
        state.signaled = false;
        let released = state.wake_all(self.kernel, WaitStatus::Destroyed);
        drop(state);

        log_if::debug_if!(
            KernelConfig::LOG_EVENTS,
            "event destroyed, aborted {} waiters",
            released
        );
    }

    #[cfg(all(test, feature = "arch_host"))]
    fn waiter_count(&self) -> usize {
        self.state.lock().waiters.iter().count()
    }
}
