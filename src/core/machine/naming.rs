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

//! Image instance naming
//!
//! Image devices of the same type are numbered in discovery order. A sole
//! device of its type is displayed without a number (`cartridge`), but as soon
//! as a sibling of the same type appears every device gets one (`cartridge1`,
//! `cartridge2`).
//!
//! Canonical names are numbered per owner instead: `<type>N` for devices of
//! the system itself, `<owner>/<type>N` for devices a card brings along. An
//! owner's device set is fixed by its declaration, so plugging cards in or out
//! elsewhere never renumbers them.

use super::ImageDevice;
use std::collections::HashMap;

/// Assign display, brief and canonical instance names to a device set
pub fn assign_instance_names(images: &mut [ImageDevice]) {
    let mut totals: HashMap<String, usize> = HashMap::new();
    for image in images.iter() {
        *totals.entry(image.type_name.clone()).or_default() += 1;
    }

    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut seen_in_owner: HashMap<(String, String), usize> = HashMap::new();
    for image in images.iter_mut() {
        let index = seen.entry(image.type_name.clone()).or_default();
        *index += 1;

        let owner_index = seen_in_owner
            .entry((image.owner.clone(), image.type_name.clone()))
            .or_default();
        *owner_index += 1;
        image.canonical_instance_name = if image.owner.is_empty() {
            format!("{}{}", image.type_name, owner_index)
        } else {
            format!("{}/{}{}", image.owner, image.type_name, owner_index)
        };

        let total = totals[&image.type_name];
        if total == 1 {
            image.instance_name = image.type_name.clone();
            image.brief_instance_name = image.brief_type_name.clone();
        } else {
            image.instance_name = format!("{}{}", image.type_name, index);
            image.brief_instance_name = format!("{}{}", image.brief_type_name, index);
        }
    }
}
