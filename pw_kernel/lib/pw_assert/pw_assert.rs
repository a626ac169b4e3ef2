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

//! Assertion macros that log through `pw_log` before halting.
//!
//! `assert!`, `eq!`, `ne!` and `panic!` are checked in every build.
//! `debug_assert!` is only checked when `debug_assertions` are enabled and is
//! used for caller-contract violations that are too hot to check in release
//! builds.
#![no_std]

// Re-export pw_log for use by panic/assert macros.
#[doc(hidden)]
pub mod __private {
    pub use pw_log::fatal;
}

/// Terminates after an assertion has been logged.
///
/// Lands in the target's panic handler; on the host this unwinds, which lets
/// `#[should_panic]` tests observe contract violations.
#[cold]
#[inline(never)]
#[track_caller]
pub fn handle_failure() -> ! {
    ::core::panic!("pw_assert failure")
}

#[macro_export]
macro_rules! panic {
  ($($args:tt)+) => {{
      $crate::__private::fatal!($($args)+);
      $crate::handle_failure()
  }};
}

#[macro_export]
macro_rules! assert {
  ($condition:expr $(,)?) => {{
      if !$condition {
          $crate::__private::fatal!("assert!({}) failed", ::core::stringify!($condition));
          $crate::handle_failure()
      }
  }};

  ($condition:expr, $($args:tt)+) => {{
      if !$condition {
          $crate::__private::fatal!("assert!({}) failed", ::core::stringify!($condition));
          $crate::__private::fatal!($($args)+);
          $crate::handle_failure()
      }
  }};
}

#[macro_export]
macro_rules! debug_assert {
  ($($args:tt)+) => {{
      if ::core::cfg!(debug_assertions) {
          $crate::assert!($($args)+);
      }
  }};
}

#[macro_export]
macro_rules! eq {
  ($condition_a:expr, $condition_b:expr $(,)?) => {{
      let a = &$condition_a;
      let b = &$condition_b;
      if *a != *b {
          $crate::__private::fatal!("assert_eq!() failed, {:?} != {:?}", a, b);
          $crate::handle_failure()
      }
  }};

  ($condition_a:expr, $condition_b:expr, $($args:tt)+) => {{
      let a = &$condition_a;
      let b = &$condition_b;
      if *a != *b {
          $crate::__private::fatal!("assert_eq!() failed, {:?} != {:?}", a, b);
          $crate::__private::fatal!($($args)+);
          $crate::handle_failure()
      }
  }};
}

#[macro_export]
macro_rules! ne {
  ($condition_a:expr, $condition_b:expr $(,)?) => {{
      let a = &$condition_a;
      let b = &$condition_b;
      if *a == *b {
          $crate::__private::fatal!("assert_ne!() failed, {:?} == {:?}", a, b);
          $crate::handle_failure()
      }
  }};

  ($condition_a:expr, $condition_b:expr, $($args:tt)+) => {{
      let a = &$condition_a;
      let b = &$condition_b;
      if *a == *b {
          $crate::__private::fatal!("assert_ne!() failed, {:?} == {:?}", a, b);
          $crate::__private::fatal!($($args)+);
          $crate::handle_failure()
      }
  }};
}
