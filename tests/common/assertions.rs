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

//! Custom assertions for option resolution testing

use emuopts::core::EmuOptions;

/// Assert a slot resolves to the expected card
#[allow(dead_code)]
pub fn assert_slot(options: &EmuOptions, slot: &str, expected: &str) {
    let option = options
        .find_slot_option(slot)
        .unwrap_or_else(|| panic!("Slot '{}' does not exist", slot));
    assert_eq!(
        option.value(),
        expected,
        "Slot '{}' mismatch: expected '{}', got '{}'",
        slot,
        expected,
        option.value()
    );
}

/// Assert an image (by display name) holds the expected media
#[allow(dead_code)]
pub fn assert_image(options: &EmuOptions, image: &str, expected: &str) {
    let option = options
        .find_image_option(image)
        .unwrap_or_else(|| panic!("Image '{}' does not exist", image));
    assert_eq!(
        option.value(),
        expected,
        "Image '{}' mismatch: expected '{}', got '{}'",
        image,
        expected,
        option.value()
    );
}

/// Assert no registry entry answers to `name`
#[allow(dead_code)]
pub fn assert_not_registered(options: &EmuOptions, name: &str) {
    assert!(
        options.registry().find_entry(name).is_none(),
        "Option '{}' is still registered",
        name
    );
}
