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

use core::{
    marker::PhantomData,
    ops::{Add, Sub},
};

/// A monotonic tick source.
pub trait Clock: Sized {
    const TICKS_PER_SEC: u64;

    fn now() -> Instant<Self>;
}

/// A point on `Clock`'s timeline.
///
/// [`Instant::MAX`] doubles as "never" for deadline based waits.
pub struct Instant<Clock: crate::Clock> {
    ticks: u64,
    _phantom: PhantomData<Clock>,
}

impl<Clock: crate::Clock> Instant<Clock> {
    pub const MAX: Self = Self::from_ticks(u64::MAX);
    pub const MIN: Self = Self::from_ticks(u64::MIN);

    #[must_use]
    pub const fn from_ticks(ticks: u64) -> Self {
        Self {
            ticks,
            _phantom: PhantomData,
        }
    }

    #[must_use]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub const fn checked_add_duration(self, duration: Duration<Clock>) -> Option<Self> {
        match self.ticks.checked_add_signed(duration.ticks) {
            Some(ticks) => Some(Self::from_ticks(ticks)),
            None => None,
        }
    }

    #[must_use]
    pub const fn checked_sub_duration(self, duration: Duration<Clock>) -> Option<Self> {
        match duration.ticks.checked_neg() {
            Some(negated) => match self.ticks.checked_add_signed(negated) {
                Some(ticks) => Some(Self::from_ticks(ticks)),
                None => None,
            },
            None => None,
        }
    }

    /// Adds `duration`, clamping to [`Instant::MIN`] or [`Instant::MAX`].
    ///
    /// Used to turn a relative timeout into a deadline: a deadline past the
    /// end of the clock becomes a wait that never expires.
    #[must_use]
    pub const fn saturating_add_duration(self, duration: Duration<Clock>) -> Self {
        match self.checked_add_duration(duration) {
            Some(instant) => instant,
            None if duration.ticks < 0 => Self::MIN,
            None => Self::MAX,
        }
    }

    /// Returns `true` once `Clock::now()` has reached this instant.
    #[must_use]
    pub fn has_passed(self) -> bool {
        Clock::now() >= self
    }
}

// Manually implement Copy so that we don't require `Clock` to be Copy
impl<Clock: crate::Clock> Copy for Instant<Clock> {}

impl<Clock: crate::Clock> Clone for Instant<Clock> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Clock: crate::Clock> Ord for Instant<Clock> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.ticks.cmp(&other.ticks)
    }
}

impl<Clock: crate::Clock> PartialOrd for Instant<Clock> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<Clock: crate::Clock> Eq for Instant<Clock> {}

impl<Clock: crate::Clock> PartialEq for Instant<Clock> {
    fn eq(&self, other: &Self) -> bool {
        self.ticks == other.ticks
    }
}

impl<Clock: crate::Clock> core::fmt::Debug for Instant<Clock> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Instant({})", self.ticks)
    }
}

impl<Clock: crate::Clock> Sub<Instant<Clock>> for Instant<Clock> {
    type Output = Duration<Clock>;

    fn sub(self, rhs: Instant<Clock>) -> Self::Output {
        // A wrapping_sub then reinterpretation keeps full resolution for
        // nearby instants with large tick values.
        Duration::from_ticks(self.ticks.wrapping_sub(rhs.ticks).cast_signed())
    }
}

impl<Clock: crate::Clock> Add<Duration<Clock>> for Instant<Clock> {
    type Output = Instant<Clock>;

    fn add(self, rhs: Duration<Clock>) -> Self::Output {
        match self.checked_add_duration(rhs) {
            Some(instant) => instant,
            None => pw_assert::panic!("Instant + Duration overflow"),
        }
    }
}

impl<Clock: crate::Clock> Sub<Duration<Clock>> for Instant<Clock> {
    type Output = Instant<Clock>;

    fn sub(self, rhs: Duration<Clock>) -> Self::Output {
        match self.checked_sub_duration(rhs) {
            Some(instant) => instant,
            None => pw_assert::panic!("Instant - Duration overflow"),
        }
    }
}

/// A signed span of `Clock` ticks.
pub struct Duration<Clock: crate::Clock> {
    ticks: i64,
    _phantom: PhantomData<Clock>,
}

impl<Clock: crate::Clock> Duration<Clock> {
    pub const ZERO: Self = Self::from_ticks(0);
    pub const MAX: Self = Self::from_ticks(i64::MAX);
    pub const MIN: Self = Self::from_ticks(i64::MIN);

    #[must_use]
    pub const fn from_ticks(ticks: i64) -> Self {
        Self {
            ticks,
            _phantom: PhantomData,
        }
    }

    #[must_use]
    pub const fn ticks(self) -> i64 {
        self.ticks
    }

    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self::from_ticks(secs * Clock::TICKS_PER_SEC.cast_signed())
    }

    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self::from_ticks(millis * Clock::TICKS_PER_SEC.cast_signed() / 1000)
    }

    #[must_use]
    pub const fn from_micros(micros: i64) -> Self {
        Self::from_ticks(micros * Clock::TICKS_PER_SEC.cast_signed() / 1_000_000)
    }

    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self::from_ticks(nanos * Clock::TICKS_PER_SEC.cast_signed() / 1_000_000_000)
    }

    /// Whole nanoseconds in this duration, or `None` if it is negative or does
    /// not fit.
    #[must_use]
    pub const fn as_nanos(self) -> Option<u64> {
        if self.ticks < 0 {
            return None;
        }
        let nanos = (self.ticks as u128) * 1_000_000_000 / (Clock::TICKS_PER_SEC as u128);
        if nanos > u64::MAX as u128 {
            None
        } else {
            Some(nanos as u64)
        }
    }

    #[must_use]
    pub const fn checked_add(self, rhs: Duration<Clock>) -> Option<Self> {
        match self.ticks.checked_add(rhs.ticks) {
            Some(ticks) => Some(Self::from_ticks(ticks)),
            None => None,
        }
    }

    #[must_use]
    pub const fn checked_sub(self, rhs: Duration<Clock>) -> Option<Self> {
        match self.ticks.checked_sub(rhs.ticks) {
            Some(ticks) => Some(Self::from_ticks(ticks)),
            None => None,
        }
    }
}

impl<Clock: crate::Clock> Copy for Duration<Clock> {}

impl<Clock: crate::Clock> Clone for Duration<Clock> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Clock: crate::Clock> Ord for Duration<Clock> {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.ticks.cmp(&other.ticks)
    }
}

impl<Clock: crate::Clock> PartialOrd for Duration<Clock> {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<Clock: crate::Clock> Eq for Duration<Clock> {}

impl<Clock: crate::Clock> PartialEq for Duration<Clock> {
    fn eq(&self, other: &Self) -> bool {
        self.ticks == other.ticks
    }
}

impl<Clock: crate::Clock> core::fmt::Debug for Duration<Clock> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Duration({})", self.ticks)
    }
}

impl<Clock: crate::Clock> Sub<Duration<Clock>> for Duration<Clock> {
    type Output = Duration<Clock>;

    fn sub(self, rhs: Duration<Clock>) -> Self::Output {
        match self.checked_sub(rhs) {
            Some(duration) => duration,
            None => pw_assert::panic!("Duration subtraction overflow"),
        }
    }
}

impl<Clock: crate::Clock> Add<Duration<Clock>> for Duration<Clock> {
    type Output = Duration<Clock>;

    fn add(self, rhs: Duration<Clock>) -> Self::Output {
        match self.checked_add(rhs) {
            Some(duration) => duration,
            None => pw_assert::panic!("Duration addition overflow"),
        }
    }
}
