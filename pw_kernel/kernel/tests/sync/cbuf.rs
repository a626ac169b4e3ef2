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

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use kernel::Cbuf;
use kernel::arch::host::{HostClock, HostKernel};
use pw_status::Error;
use time::{Clock, Duration};

type HostCbuf = Cbuf<HostKernel>;

fn settle() {
    thread::sleep(std::time::Duration::from_millis(20));
}

#[test]
fn blocking_reader_gets_later_data() -> unittest::Result<()> {
    let cbuf = HostCbuf::new(HostKernel, 16);
    let mut out = [0u8; 8];

    let read = thread::scope(|s| {
        let reader = s.spawn(|| cbuf.read(Some(&mut out), 8, true));
        settle();
        cbuf.write(Some(b"abc"), 3, true);
        reader.join()
    });

    unittest::assert_eq!(read.ok(), Some(3));
    unittest::assert_eq!(&out[..3], b"abc");
    unittest::assert_true!(cbuf.is_empty());
    Ok(())
}

#[test]
fn blocking_read_char_gets_later_byte() -> unittest::Result<()> {
    let cbuf = HostCbuf::new(HostKernel, 4);

    let c = thread::scope(|s| {
        let reader = s.spawn(|| cbuf.read_char(true));
        settle();
        cbuf.irq().write_char(b'z');
        reader.join()
    });

    unittest::assert_eq!(c.ok(), Some(Some(b'z')));
    Ok(())
}

#[test]
fn producer_and_consumer_keep_fifo_order() -> unittest::Result<()> {
    const TOTAL: usize = 4096;
    let cbuf = HostCbuf::new(HostKernel, 32);

    let received = thread::scope(|s| {
        s.spawn(|| {
            let mut sent = 0;
            while sent < TOTAL {
                let chunk: Vec<u8> = (sent..min_end(sent, 13, TOTAL)).map(|i| i as u8).collect();
                sent += cbuf.write(Some(&chunk), chunk.len(), false);
                thread::yield_now();
            }
        });

        let mut received = Vec::with_capacity(TOTAL);
        let mut out = [0u8; 9];
        while received.len() < TOTAL {
            let n = cbuf.read(Some(&mut out), 9, true);
            received.extend_from_slice(&out[..n]);
        }
        received
    });

    unittest::assert_eq!(received.len(), TOTAL);
    unittest::assert_true!(received.iter().enumerate().all(|(i, b)| *b == i as u8));
    unittest::assert_true!(cbuf.is_empty());
    Ok(())
}

fn min_end(start: usize, len: usize, end: usize) -> usize {
    (start + len).min(end)
}

#[test]
fn competing_readers_never_return_empty_handed() -> unittest::Result<()> {
    let cbuf = HostCbuf::new(HostKernel, 8);
    let done = AtomicUsize::new(0);

    let (cbuf, done) = (&cbuf, &done);
    let results = thread::scope(|s| {
        let readers: Vec<_> = (0..2)
            .map(|_| {
                s.spawn(move || {
                    let mut out = [0u8; 4];
                    let n = cbuf.read(Some(&mut out), 4, true);
                    done.fetch_add(1, Ordering::SeqCst);
                    (n, out[0])
                })
            })
            .collect();
        settle();

        // One byte wakes both readers; the loser must go back to sleep.
        cbuf.write_char(1, true);
        while done.load(Ordering::SeqCst) < 1 {
            thread::yield_now();
        }
        settle();
        let finished_after_one = done.load(Ordering::SeqCst);

        cbuf.write_char(2, true);
        let results: Vec<_> = readers.into_iter().map(|r| r.join().ok()).collect();
        (finished_after_one, results)
    });

    let (finished_after_one, results) = results;
    unittest::assert_eq!(finished_after_one, 1);
    let mut bytes: Vec<u8> = Vec::new();
    for result in results {
        let Some((n, byte)) = result else {
            unittest::assert_true!(false);
            continue;
        };
        unittest::assert_eq!(n, 1);
        bytes.push(byte);
    }
    bytes.sort_unstable();
    unittest::assert_eq!(bytes, [1, 2]);
    Ok(())
}

#[test]
fn reader_woken_by_drained_data_waits_again() -> unittest::Result<()> {
    let cbuf = HostCbuf::new(HostKernel, 8);
    let mut out = [0u8; 4];

    let read = thread::scope(|s| {
        let reader = s.spawn(|| cbuf.read(Some(&mut out), 4, true));
        settle();

        // Wakes the reader, which usually finds the data already discarded.
        cbuf.write(Some(b"xy"), 2, false);
        cbuf.reset();
        settle();

        cbuf.write(Some(b"q"), 1, false);
        reader.join()
    });

    match read.ok() {
        Some(1) => unittest::assert_eq!(out[0], b'q'),
        // The reader won the race with `reset`.
        Some(2) => {
            unittest::assert_eq!(&out[..2], b"xy");
            unittest::assert_eq!(cbuf.read_char(false), Some(b'q'));
        }
        _ => unittest::assert_true!(false),
    }
    Ok(())
}

#[test]
fn read_until_times_out_on_empty_ring() -> unittest::Result<()> {
    let cbuf = HostCbuf::new(HostKernel, 8);
    let mut out = [0u8; 4];
    let deadline = HostClock::now() + Duration::from_millis(15);

    unittest::assert_eq!(cbuf.read_until(Some(&mut out), 4, deadline), Err(Error::DeadlineExceeded));
    unittest::assert_true!(deadline.has_passed());
    Ok(())
}

#[test]
fn read_timeout_succeeds_when_writer_arrives() -> unittest::Result<()> {
    let cbuf = HostCbuf::new(HostKernel, 8);
    let mut out = [0u8; 4];

    let read = thread::scope(|s| {
        let reader = s.spawn(|| cbuf.read_timeout(Some(&mut out), 4, Duration::from_secs(10)));
        settle();
        cbuf.write(Some(b"ok"), 2, true);
        reader.join()
    });

    unittest::assert_eq!(read.ok(), Some(Ok(2)));
    unittest::assert_eq!(&out[..2], b"ok");
    Ok(())
}

#[test]
fn embedded_io_reader_blocks_for_data() -> unittest::Result<()> {
    use embedded_io::Read;

    let cbuf = HostCbuf::new(HostKernel, 16);

    let line = thread::scope(|s| {
        let reader = s.spawn(|| {
            let mut reader = &cbuf;
            let mut line = [0u8; 5];
            reader.read_exact(&mut line).map(|()| line)
        });
        cbuf.write(Some(b"he"), 2, false);
        settle();
        cbuf.write(Some(b"llo"), 3, false);
        reader.join()
    });

    let Some(Ok(line)) = line.ok() else {
        unittest::assert_true!(false);
        return Ok(());
    };
    unittest::assert_eq!(&line, b"hello");
    Ok(())
}
