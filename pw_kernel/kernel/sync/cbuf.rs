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

//! Blocking bounded byte queue.
//!
//! A [`Cbuf`] is a power-of-two sized ring of bytes shared by a producer and a
//! consumer.  Either side may run in an interrupt handler except a blocking
//! read, which is thread-only; interrupt code should only be handed an
//! [`IrqCbuf`], which has no blocking operations.
//!
//! # Invariants
//!
//! With `capacity` the ring size and `head`/`tail` the write/read cursors:
//!
//! 1. `capacity` is a non-zero power of two.
//! 2. `head < capacity` and `tail < capacity`; cursors only move through
//!    [`inc_index`].
//! 3. `used = (head - tail) mod capacity` and `used <= capacity - 1`.  One slot
//!    is always free so that `head == tail` means empty and never full.
//! 4. Bytes `tail, tail + 1, ..., tail + used - 1` (mod `capacity`) hold the
//!    queued data in FIFO order.
//! 5. Whenever the ring lock is free, the embedded event is signaled exactly
//!    when the ring is non-empty.

use alloc::boxed::Box;
use alloc::vec;
use core::cmp::min;

use kernel_config::{KernelConfig, KernelConfigInterface};
use pw_status::Result;
use time::{Clock as _, Duration, Instant};

use crate::Kernel;
use crate::sync::event::{Event, EventFlags};
use crate::sync::spinlock::{SpinLock, SpinLockGuard};

/// Advances `index` by `delta` within a ring of `capacity` bytes.
#[inline]
const fn inc_index(index: usize, delta: usize, capacity: usize) -> usize {
    index.wrapping_add(delta) & (capacity - 1)
}

struct CbufState<S> {
    head: usize,
    tail: usize,
    capacity: usize,
    storage: S,
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> CbufState<S> {
    fn space_used(&self) -> usize {
        self.head.wrapping_sub(self.tail) & (self.capacity - 1)
    }

    fn space_avail(&self) -> usize {
        self.capacity - self.space_used() - 1
    }

    fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    // Copies up to `len` bytes in at `head`, zero filling when `data` is
    // `None`.  At most two runs: up to the end of storage, then from the start.
    fn copy_in(&mut self, data: Option<&[u8]>, len: usize) -> usize {
        let len = min(len, self.space_avail());
        let mut pos = 0;
        while pos < len {
            let head = self.head;
            let run = min(len - pos, self.capacity - head);
            let dest = &mut self.storage.as_mut()[head..head + run];
            match data {
                Some(data) => dest.copy_from_slice(&data[pos..pos + run]),
                None => dest.fill(0),
            }
            self.head = inc_index(head, run, self.capacity);
            pos += run;
        }
        len
    }

    // Copies up to `max_len` bytes out from `tail`, discarding them when `out`
    // is `None`.  Split at the end of storage like `copy_in`.
    fn copy_out(&mut self, mut out: Option<&mut [u8]>, max_len: usize) -> usize {
        let len = min(max_len, self.space_used());
        let mut pos = 0;
        while pos < len {
            let tail = self.tail;
            let run = min(len - pos, self.capacity - tail);
            if let Some(out) = out.as_deref_mut() {
                out[pos..pos + run].copy_from_slice(&self.storage.as_ref()[tail..tail + run]);
            }
            self.tail = inc_index(tail, run, self.capacity);
            pos += run;
        }
        len
    }

    fn push(&mut self, c: u8) {
        let head = self.head;
        self.storage.as_mut()[head] = c;
        self.head = inc_index(head, 1, self.capacity);
    }

    fn pop(&mut self) -> Option<u8> {
        if self.is_empty() {
            return None;
        }
        let tail = self.tail;
        let c = self.storage.as_ref()[tail];
        self.tail = inc_index(tail, 1, self.capacity);
        Some(c)
    }

    fn spans(&self) -> [&[u8]; 2] {
        let used = self.space_used();
        let first = min(used, self.capacity - self.tail);
        let storage = self.storage.as_ref();
        [&storage[self.tail..self.tail + first], &storage[..used - first]]
    }

    fn validate(&self) {
        if KernelConfig::VALIDATE_CBUF {
            pw_assert::assert!(self.head < self.capacity, "cbuf head {} out of range", self.head);
            pw_assert::assert!(self.tail < self.capacity, "cbuf tail {} out of range", self.tail);
            pw_assert::assert!(self.space_used() < self.capacity);
        }
    }
}

/// A bounded FIFO byte queue with a blocking read.
///
/// Writes never block: when the ring fills they return a short count.  Reads
/// either return what is available or, when asked to block, suspend the
/// calling thread until a writer makes data available.
///
/// The storage type `S` defaults to a heap allocation made by [`Cbuf::new`];
/// [`Cbuf::with_storage`] accepts any caller-provided owner of the bytes, such
/// as a `&'static mut [u8]` carved out of a driver's static memory.
pub struct Cbuf<K: Kernel, S = Box<[u8]>> {
    kernel: K,
    capacity: usize,
    event: Event<K>,
    state: SpinLock<K, CbufState<S>>,
}

impl<K: Kernel> Cbuf<K> {
    /// Creates an empty ring of `capacity` bytes with its own storage.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is not a non-zero power of two.
    #[must_use]
    pub fn new(kernel: K, capacity: usize) -> Self {
        Self::with_storage(kernel, capacity, vec![0u8; capacity].into_boxed_slice())
    }
}

impl<K: Kernel, S: AsRef<[u8]> + AsMut<[u8]> + Send> Cbuf<K, S> {
    /// Creates an empty ring over the first `capacity` bytes of `storage`.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is not a non-zero power of two or `storage` is
    /// shorter than `capacity`.
    #[must_use]
    pub fn with_storage(kernel: K, capacity: usize, storage: S) -> Self {
        pw_assert::assert!(
            capacity.is_power_of_two(),
            "cbuf capacity {} is not a power of two",
            capacity
        );
        pw_assert::assert!(
            storage.as_ref().len() >= capacity,
            "cbuf storage of {} bytes is smaller than capacity {}",
            storage.as_ref().len(),
            capacity
        );
        log_if::debug_if!(KernelConfig::LOG_CBUF, "cbuf: {} byte ring", capacity);

        Self {
            kernel,
            capacity,
            event: Event::new(kernel, false, EventFlags::empty()),
            state: SpinLock::new(CbufState {
                head: 0,
                tail: 0,
                capacity,
                storage,
            }),
        }
    }

    /// Total size of the ring.  One byte less than this can be queued.
    #[must_use]
    pub fn size(&self) -> usize {
        self.capacity
    }

    /// Bytes that can be written before the ring is full.
    #[must_use]
    pub fn space_avail(&self) -> usize {
        self.state.lock().space_avail()
    }

    /// Bytes queued for reading.
    #[must_use]
    pub fn space_used(&self) -> usize {
        self.state.lock().space_used()
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.space_avail() == 0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.lock().is_empty()
    }

    /// Writes up to `len` bytes and returns how many fit.
    ///
    /// With `data` of `None` the bytes are reserved and zero filled instead of
    /// copied.  A single write must be shorter than the ring: `len` of
    /// [`size`](Cbuf::size) or more is a caller error.  `reschedule` asks the
    /// scheduler to run any woken reader right away.
    ///
    /// # Interrupt context
    ///
    /// This method *is* safe to call in an interrupt context when
    /// `reschedule` is `false`.
    pub fn write(&self, data: Option<&[u8]>, len: usize, reschedule: bool) -> usize {
        pw_assert::debug_assert!(
            len < self.capacity,
            "cbuf write of {} bytes into a {} byte ring",
            len,
            self.capacity
        );
        let len = match data {
            Some(data) => {
                pw_assert::debug_assert!(data.len() >= len);
                min(len, data.len())
            }
            None => len,
        };

        let written = {
            let mut state = self.state.lock();
            let was_empty = state.is_empty();
            let written = state.copy_in(data, len);
            if was_empty && written > 0 {
                self.event.signal(false);
            }
            state.validate();
            written
        };

        if reschedule {
            self.kernel.reschedule();
        }
        written
    }

    /// Writes a single byte.  Returns `false` if the ring is full.
    ///
    /// # Interrupt context
    ///
    /// This method *is* safe to call in an interrupt context when
    /// `reschedule` is `false`.
    pub fn write_char(&self, c: u8, reschedule: bool) -> bool {
        let accepted = {
            let mut state = self.state.lock();
            if state.space_avail() == 0 {
                false
            } else {
                let was_empty = state.is_empty();
                state.push(c);
                if was_empty {
                    self.event.signal(false);
                }
                true
            }
        };

        if reschedule {
            self.kernel.reschedule();
        }
        accepted
    }

    /// Reads up to `max_len` bytes into `out`, or discards them if `out` is
    /// `None`, and returns how many were consumed.
    ///
    /// With `block` set, an empty ring suspends the caller until data arrives;
    /// the read is then retried from scratch, since another reader may have
    /// drained the ring first.  A blocking read returns zero only when
    /// `max_len` is zero.
    ///
    /// # Interrupt context
    ///
    /// This method is safe to call in an interrupt context only when `block`
    /// is `false`.  Prefer [`IrqCbuf`] there.
    pub fn read(&self, mut out: Option<&mut [u8]>, max_len: usize, block: bool) -> usize {
        let max_len = Self::clamp_to_out(out.as_deref(), max_len);
        loop {
            let read = self.try_read(out.as_deref_mut(), max_len);
            if read > 0 || !block || max_len == 0 {
                return read;
            }
            if let Err(e) = self.event.wait() {
                pw_assert::panic!("cbuf: wait for data failed: {}", e);
            }
        }
    }

    /// Blocking read bounded by `deadline`.
    ///
    /// Returns `Err(Error::DeadlineExceeded)` if no byte arrived before the
    /// deadline.
    ///
    /// # Interrupt context
    ///
    /// This method is *not* safe to call in an interrupt context.
    pub fn read_until(
        &self,
        mut out: Option<&mut [u8]>,
        max_len: usize,
        deadline: Instant<K::Clock>,
    ) -> Result<usize> {
        let max_len = Self::clamp_to_out(out.as_deref(), max_len);
        loop {
            let read = self.try_read(out.as_deref_mut(), max_len);
            if read > 0 || max_len == 0 {
                return Ok(read);
            }
            self.event.wait_until(deadline)?;
        }
    }

    /// Blocking read bounded by `timeout`.  See [`Cbuf::read_until`].
    ///
    /// # Interrupt context
    ///
    /// This method is *not* safe to call in an interrupt context.
    pub fn read_timeout(
        &self,
        out: Option<&mut [u8]>,
        max_len: usize,
        timeout: Duration<K::Clock>,
    ) -> Result<usize> {
        self.read_until(out, max_len, K::Clock::now().saturating_add_duration(timeout))
    }

    /// Reads a single byte, blocking for one if `block` is set.
    ///
    /// # Interrupt context
    ///
    /// This method is safe to call in an interrupt context only when `block`
    /// is `false`.
    pub fn read_char(&self, block: bool) -> Option<u8> {
        loop {
            {
                let mut state = self.state.lock();
                if let Some(c) = state.pop() {
                    if state.is_empty() {
                        self.event.unsignal();
                    }
                    return Some(c);
                }
            }
            if !block {
                return None;
            }
            if let Err(e) = self.event.wait() {
                pw_assert::panic!("cbuf: wait for data failed: {}", e);
            }
        }
    }

    /// Returns a view of the queued bytes without consuming them.
    ///
    /// The ring stays locked, with interrupts masked, until the returned
    /// [`CbufPeek`] is dropped; keep it short lived.
    pub fn peek(&self) -> CbufPeek<'_, K, S> {
        CbufPeek {
            state: self.state.lock(),
        }
    }

    /// Discards everything queued.
    pub fn reset(&self) {
        let discarded = self.read(None, self.capacity, false);
        log_if::debug_if!(KernelConfig::LOG_CBUF, "cbuf: reset dropped {} bytes", discarded);
    }

    /// Returns the non-blocking view handed to interrupt handlers.
    #[must_use]
    pub fn irq(&self) -> IrqCbuf<'_, K, S> {
        IrqCbuf { cbuf: self }
    }

    fn clamp_to_out(out: Option<&[u8]>, max_len: usize) -> usize {
        match out {
            Some(out) => {
                pw_assert::debug_assert!(out.len() >= max_len);
                min(max_len, out.len())
            }
            None => max_len,
        }
    }

    fn try_read(&self, out: Option<&mut [u8]>, max_len: usize) -> usize {
        let mut state = self.state.lock();
        let read = state.copy_out(out, max_len);
        if read > 0 && state.is_empty() {
            self.event.unsignal();
        }
        state.validate();
        read
    }
}

/// Zero-copy view of the bytes queued in a [`Cbuf`].
///
/// Holds the ring's lock.
pub struct CbufPeek<'a, K: Kernel, S> {
    state: SpinLockGuard<'a, K, CbufState<S>>,
}

impl<K: Kernel, S: AsRef<[u8]> + AsMut<[u8]>> CbufPeek<'_, K, S> {
    /// The queued bytes in FIFO order as at most two runs.  The second is
    /// empty unless the data wraps around the end of the storage.
    #[must_use]
    pub fn spans(&self) -> [&[u8]; 2] {
        self.state.spans()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.state.space_used()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }
}

/// The interrupt handler side of a [`Cbuf`].
///
/// Exposes only operations that never block and never reschedule, so a
/// handler written against `IrqCbuf` can not suspend.
///
/// A receive interrupt typically pushes bytes with [`write_char`] and masks
/// itself once [`is_full`] reports no room, leaving the reader thread to
/// unmask it after draining.
///
/// This view is the interrupt-context boundary.  The ring's lock already
/// masks interrupts, so a `&Cbuf` is usable from a handler too, but only
/// through this type is a blocking read ruled out at compile time.
///
/// [`write_char`]: IrqCbuf::write_char
/// [`is_full`]: IrqCbuf::is_full
pub struct IrqCbuf<'a, K: Kernel, S = Box<[u8]>> {
    cbuf: &'a Cbuf<K, S>,
}

impl<K: Kernel, S> Clone for IrqCbuf<'_, K, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: Kernel, S> Copy for IrqCbuf<'_, K, S> {}

impl<K: Kernel, S: AsRef<[u8]> + AsMut<[u8]> + Send> IrqCbuf<'_, K, S> {
    pub fn write(self, data: Option<&[u8]>, len: usize) -> usize {
        self.cbuf.write(data, len, false)
    }

    pub fn write_char(self, c: u8) -> bool {
        self.cbuf.write_char(c, false)
    }

    pub fn read(self, out: Option<&mut [u8]>, max_len: usize) -> usize {
        self.cbuf.read(out, max_len, false)
    }

    pub fn read_char(self) -> Option<u8> {
        self.cbuf.read_char(false)
    }

    #[must_use]
    pub fn space_avail(self) -> usize {
        self.cbuf.space_avail()
    }

    #[must_use]
    pub fn space_used(self) -> usize {
        self.cbuf.space_used()
    }

    #[must_use]
    pub fn is_full(self) -> bool {
        self.cbuf.is_full()
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.cbuf.is_empty()
    }
}

impl<K: Kernel, S> embedded_io::ErrorType for &Cbuf<K, S> {
    type Error = pw_status::Error;
}

impl<K: Kernel, S: AsRef<[u8]> + AsMut<[u8]> + Send> embedded_io::Read for &Cbuf<K, S> {
    /// Blocks until at least one byte is available, then returns as many as
    /// fit in `buf`.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let len = buf.len();
        Ok(Cbuf::read(*self, Some(buf), len, true))
    }
}

impl<K: Kernel, S: AsRef<[u8]> + AsMut<[u8]> + Send> embedded_io::ReadReady for &Cbuf<K, S> {
    fn read_ready(&mut self) -> Result<bool> {
        Ok(!self.is_empty())
    }
}

impl<K: Kernel, S: AsRef<[u8]> + AsMut<[u8]> + Send> embedded_io::WriteReady for &Cbuf<K, S> {
    fn write_ready(&mut self) -> Result<bool> {
        Ok(!self.is_full())
    }
}
