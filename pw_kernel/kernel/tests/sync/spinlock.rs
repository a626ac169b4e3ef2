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

use std::thread;

use kernel::arch::host::HostKernel;
use kernel::sync::spinlock::{InterruptGuard, SpinLock};
use kernel::{Arch, BareSpinLock};

type ConcreteBareSpinLock = <HostKernel as Arch>::BareSpinLock;

#[test]
fn bare_try_lock_returns_correct_value() -> unittest::Result<()> {
    let lock = ConcreteBareSpinLock::new();

    {
        let _sentinel = lock.lock();
        unittest::assert_true!(lock.try_lock().is_none());
    }

    unittest::assert_true!(lock.try_lock().is_some());

    Ok(())
}

#[test]
fn try_lock_returns_correct_value() -> unittest::Result<()> {
    let lock = SpinLock::<HostKernel, _>::new(false);

    {
        let mut guard = lock.lock();
        *guard = true;
        unittest::assert_true!(lock.try_lock().is_none());
    }

    let guard = lock.lock();
    unittest::assert_true!(*guard);

    Ok(())
}

#[test]
fn failed_try_lock_leaves_interrupts_alone() -> unittest::Result<()> {
    let lock = SpinLock::<HostKernel, _>::new(0u32);

    let guard = lock.lock();
    unittest::assert_false!(HostKernel::interrupts_enabled());
    drop(guard);
    unittest::assert_true!(HostKernel::interrupts_enabled());

    let _guard = lock.lock();
    thread::scope(|s| {
        s.spawn(|| {
            unittest::assert_true!(lock.try_lock().is_none());
            unittest::assert_true!(HostKernel::interrupts_enabled());
            Ok(())
        })
        .join()
        .unwrap()
    })
}

#[test]
fn interrupt_guards_nest() -> unittest::Result<()> {
    unittest::assert_true!(HostKernel::interrupts_enabled());
    {
        let _outer = InterruptGuard::<HostKernel>::new();
        {
            let _inner = InterruptGuard::<HostKernel>::new();
            unittest::assert_false!(HostKernel::interrupts_enabled());
        }
        // The inner guard found interrupts masked and leaves them masked.
        unittest::assert_false!(HostKernel::interrupts_enabled());
    }
    unittest::assert_true!(HostKernel::interrupts_enabled());
    Ok(())
}

#[test]
fn lock_excludes_other_threads() -> unittest::Result<()> {
    const THREADS: usize = 4;
    const ITERATIONS: usize = 10_000;

    let lock = SpinLock::<HostKernel, _>::new(0usize);
    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                for _ in 0..ITERATIONS {
                    // Read and write in separate steps so a missing exclusion
                    // would lose updates.
                    let mut guard = lock.lock();
                    let value = *guard;
                    *guard = value + 1;
                }
            });
        }
    });

    unittest::assert_eq!(*lock.lock(), THREADS * ITERATIONS);
    Ok(())
}
