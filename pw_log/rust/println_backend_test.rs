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

use pw_log::LogLevel;
use pw_log::backend::write_line;

fn line(level: LogLevel, args: core::fmt::Arguments<'_>) -> String {
    let mut out = String::new();
    write_line(&mut out, level, args).unwrap();
    out
}

#[test]
fn each_level_gets_its_tag() {
    assert_eq!(line(LogLevel::Debug, format_args!("x")), "[DBG] x");
    assert_eq!(line(LogLevel::Info, format_args!("x")), "[INF] x");
    assert_eq!(line(LogLevel::Warn, format_args!("x")), "[WRN] x");
    assert_eq!(line(LogLevel::Error, format_args!("x")), "[ERR] x");
    assert_eq!(line(LogLevel::Critical, format_args!("x")), "[CRT] x");
    assert_eq!(line(LogLevel::Fatal, format_args!("x")), "[FTL] x");
}

#[test]
fn arguments_are_formatted() {
    assert_eq!(
        line(LogLevel::Info, format_args!("cbuf: {} of {} bytes", 15 as usize, 16 as usize)),
        "[INF] cbuf: 15 of 16 bytes"
    );
}

#[test]
fn level_macros_accept_format_arguments() {
    pw_log::debug!("debug {}", 1 as u32);
    pw_log::info!("info");
    pw_log::warn!("warn {} {}", 1 as u32, "two" as &str);
    pw_log::error!("error {:x}", 0xff as u32);
    pw_log::critical!("critical");
    pw_log::fatal!("fatal {}", true);
    pw_log::log!(LogLevel::Info, "explicit level");
}
