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

#[cfg(feature = "arch_host")]
pub mod host;

/// A lock word with no data and no interrupt handling.
///
/// Implementations only provide mutual exclusion between CPUs.  Interrupt
/// masking is layered on top by [`crate::sync::spinlock::SpinLock`].
pub trait BareSpinLock: Send + Sync {
    type Guard<'a>
    where
        Self: 'a;

    const NEW: Self;

    fn try_lock(&self) -> Option<Self::Guard<'_>>;

    #[inline(always)]
    fn lock(&self) -> Self::Guard<'_> {
        loop {
            if let Some(sentinel) = self.try_lock() {
                return sentinel;
            }
            core::hint::spin_loop();
        }
    }
}

pub trait Arch: 'static + Copy + Send + Sync {
    type BareSpinLock: BareSpinLock;
    type Clock: time::Clock;

    /// Globally enable interrupts on the current CPU.
    fn enable_interrupts();

    /// Globally disable interrupts on the current CPU.
    fn disable_interrupts();

    /// Returns `true` if interrupts are globally enabled.
    fn interrupts_enabled() -> bool;
}
