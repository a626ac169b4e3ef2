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

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use kernel::arch::host::{HostClock, HostKernel};
use kernel::{Event, EventFlags};
use pw_status::Error;
use time::{Clock, Duration};

type HostEvent = Event<HostKernel>;

fn settle() {
    thread::sleep(std::time::Duration::from_millis(20));
}

#[test]
fn signal_before_wait_is_not_lost() -> unittest::Result<()> {
    let event = HostEvent::new(HostKernel, false, EventFlags::AUTO_UNSIGNAL);
    event.signal(false);
    unittest::assert_true!(event.is_signaled());
    unittest::assert_eq!(event.wait(), Ok(()));
    unittest::assert_false!(event.is_signaled());
    Ok(())
}

#[test]
fn wait_until_past_deadline_polls() -> unittest::Result<()> {
    let event = HostEvent::new(HostKernel, false, EventFlags::empty());
    let past = HostClock::now();
    unittest::assert_eq!(event.wait_until(past), Err(Error::DeadlineExceeded));

    event.signal(false);
    unittest::assert_eq!(event.wait_until(past), Ok(()));
    // Broadcast events stay signaled.
    unittest::assert_true!(event.is_signaled());
    Ok(())
}

#[test]
fn timeout_waits_at_least_the_duration() -> unittest::Result<()> {
    let event = HostEvent::new(HostKernel, false, EventFlags::empty());
    let start = HostClock::now();
    unittest::assert_eq!(
        event.wait_timeout(Duration::from_millis(15)),
        Err(Error::DeadlineExceeded)
    );
    unittest::assert_true!(HostClock::now() - start >= Duration::from_millis(15));
    Ok(())
}

#[test]
fn signal_from_another_thread_releases_waiter() -> unittest::Result<()> {
    let event = HostEvent::new(HostKernel, false, EventFlags::AUTO_UNSIGNAL);
    let released = AtomicBool::new(false);

    let (early, result) = thread::scope(|s| {
        let waiter = s.spawn(|| {
            let result = event.wait();
            released.store(true, Ordering::SeqCst);
            result
        });
        settle();
        let early = released.load(Ordering::SeqCst);
        event.signal(true);
        (early, waiter.join())
    });

    unittest::assert_false!(early);
    unittest::assert_eq!(result.ok(), Some(Ok(())));
    unittest::assert_false!(event.is_signaled());
    Ok(())
}

#[test]
fn auto_unsignal_releases_one_thread_per_signal() -> unittest::Result<()> {
    const WAITERS: usize = 3;
    let event = HostEvent::new(HostKernel, false, EventFlags::AUTO_UNSIGNAL);
    let released = AtomicUsize::new(0);

    let counts = thread::scope(|s| {
        for _ in 0..WAITERS {
            s.spawn(|| {
                if event.wait().is_ok() {
                    released.fetch_add(1, Ordering::SeqCst);
                }
            });
        }
        settle();

        let mut counts = [0usize; WAITERS];
        for (i, count) in counts.iter_mut().enumerate() {
            event.signal(false);
            while released.load(Ordering::SeqCst) <= i {
                thread::yield_now();
            }
            settle();
            *count = released.load(Ordering::SeqCst);
        }
        counts
    });

    unittest::assert_eq!(counts, [1, 2, 3]);
    unittest::assert_false!(event.is_signaled());
    Ok(())
}

#[test]
fn destroy_aborts_blocked_waiter() -> unittest::Result<()> {
    let event = HostEvent::new(HostKernel, false, EventFlags::empty());

    let result = thread::scope(|s| {
        let waiter = s.spawn(|| event.wait());
        settle();
        event.destroy();
        waiter.join()
    });

    unittest::assert_eq!(result.ok(), Some(Err(Error::Aborted)));
    unittest::assert_false!(event.is_signaled());
    Ok(())
}
