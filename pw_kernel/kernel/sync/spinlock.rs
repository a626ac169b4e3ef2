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

use core::cell::UnsafeCell;
use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};

use crate::arch::{Arch, BareSpinLock};

/// Masks interrupts on the current CPU for its lifetime.
///
/// The previous mask state is restored on drop, so guards nest: only the
/// outermost guard re-enables interrupts.
pub struct InterruptGuard<A: Arch> {
    were_enabled: bool,
    // Interrupt state is per CPU; the guard must not migrate.
    _not_send: PhantomData<*const A>,
}

impl<A: Arch> InterruptGuard<A> {
    #[must_use]
    pub fn new() -> Self {
        let were_enabled = A::interrupts_enabled();
        A::disable_interrupts();
        Self {
            were_enabled,
            _not_send: PhantomData,
        }
    }
}

impl<A: Arch> Default for InterruptGuard<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Arch> Drop for InterruptGuard<A> {
    fn drop(&mut self) {
        if self.were_enabled {
            A::enable_interrupts();
        }
    }
}

/// Guard for a [`SpinLock`].
///
/// Holding it means the lock word is held *and* interrupts are masked on this
/// CPU, so the protected data can be shared with interrupt handlers.  Never
/// block while holding one.
pub struct SpinLockGuard<'lock, A: Arch, T> {
    lock: &'lock SpinLock<A, T>,
    // Field order matters: the lock word is released before interrupts are
    // restored.
    _inner_guard: <A::BareSpinLock as BareSpinLock>::Guard<'lock>,
    _interrupt_guard: InterruptGuard<A>,
}

impl<A: Arch, T> Deref for SpinLockGuard<'_, A, T> {
    type Target = T;

    fn deref(&self) -> &T {
        // SAFETY: The guard holds the lock word, so no other reference to the
        // data exists.
        unsafe { &*self.lock.data.get() }
    }
}

impl<A: Arch, T> DerefMut for SpinLockGuard<'_, A, T> {
    fn deref_mut(&mut self) -> &mut T {
        // SAFETY: The guard holds the lock word, so no other reference to the
        // data exists.
        unsafe { &mut *self.lock.data.get() }
    }
}

/// An interrupt-safe spinlock protecting a `T`.
///
/// # Interrupt context
///
/// Locking *is* safe in an interrupt context.
pub struct SpinLock<A: Arch, T> {
    data: UnsafeCell<T>,
    inner: A::BareSpinLock,
}

// As long as the inner type is `Send` and the bare spinlock is `Sync`, the lock
// can be shared between threads.
unsafe impl<A: Arch, T: Send> Sync for SpinLock<A, T> {}

impl<A: Arch, T> SpinLock<A, T> {
    pub const fn new(initial_value: T) -> Self {
        Self {
            data: UnsafeCell::new(initial_value),
            inner: A::BareSpinLock::NEW,
        }
    }

    pub fn try_lock(&self) -> Option<SpinLockGuard<'_, A, T>> {
        let interrupt_guard = InterruptGuard::new();
        self.inner.try_lock().map(|guard| SpinLockGuard {
            lock: self,
            _inner_guard: guard,
            _interrupt_guard: interrupt_guard,
        })
    }

    pub fn lock(&self) -> SpinLockGuard<'_, A, T> {
        // Mask first so an interrupt handler on this CPU can not spin on a
        // lock its own thread holds.
        let interrupt_guard = InterruptGuard::new();
        let inner_guard = self.inner.lock();
        SpinLockGuard {
            lock: self,
            _inner_guard: inner_guard,
            _interrupt_guard: interrupt_guard,
        }
    }
}
