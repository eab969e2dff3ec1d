// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Priority and change notification tests

use super::super::*;
use std::cell::Cell;
use std::rc::Rc;

fn options_with_speed() -> CoreOptions {
    let mut options = CoreOptions::new();
    options.add_entry(
        OptionEntry::parse("speed(0.01-100)", Some("1.0"), OptionType::Float, None),
        None,
    );
    options
}

#[test]
fn test_higher_priority_write_wins() {
    let mut options = options_with_speed();

    assert!(options.set_value("speed", "2.0", priority::NORMAL).unwrap());
    assert!(!options.set_value("speed", "3.0", priority::LOW).unwrap());
    assert_eq!(options.float_value("speed"), 2.0);

    // equal priority replaces
    assert!(options.set_value("speed", "4.0", priority::NORMAL).unwrap());
    assert_eq!(options.float_value("speed"), 4.0);
    assert_eq!(options.entry("speed").borrow().priority(), priority::NORMAL);
}

#[test]
fn test_pegged_entry_rejects_ordinary_writes() {
    let mut options = options_with_speed();
    options.set_value("speed", "2.0", priority::CMDLINE).unwrap();
    options
        .entry("speed")
        .borrow_mut()
        .set_priority(priority::MAXIMUM);

    assert!(!options.set_value("speed", "8.0", priority::CMDLINE).unwrap());
    assert_eq!(options.float_value("speed"), 2.0);
}

#[test]
fn test_value_changed_handler_receives_new_value() {
    let mut options = CoreOptions::new();
    options.add_entry(
        OptionEntry::parse("coin_impulse", Some("0"), OptionType::Integer, None),
        None,
    );

    let seen = Rc::new(Cell::new(0i64));
    let sink = seen.clone();
    options.set_value_changed_handler(
        "coin_impulse",
        Box::new(move |value| sink.set(value.parse().unwrap_or(-1))),
    );

    options.set_value("coin_impulse", "7", priority::NORMAL).unwrap();
    assert_eq!(seen.get(), 7);

    // ignored writes do not notify
    options.set_value("coin_impulse", "9", priority::LOW).unwrap();
    assert_eq!(seen.get(), 7);
}

#[test]
fn test_revert_restores_defaults_within_band() {
    let mut options = options_with_speed();
    options.add_entry(
        OptionEntry::parse("effect", Some("none"), OptionType::String, None),
        None,
    );

    options.set_value("speed", "2.0", priority::NORMAL).unwrap();
    options.set_value("effect", "scanlines", priority::CMDLINE).unwrap();

    options.revert(priority::NORMAL, priority::LOW);

    assert_eq!(options.float_value("speed"), 1.0);
    assert_eq!(options.entry("speed").borrow().priority(), priority::DEFAULT);
    assert_eq!(options.value("effect").as_deref(), Some("scanlines"));
}
