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

//! Image options
//!
//! An image option holds the file or software list item assigned to one
//! removable-media device. Options are stored under the device's canonical
//! instance name, which does not shift when sibling devices of the same
//! type appear; the display name used for lookups does.

use super::registry::{conditionally_peg_priority, EntryRef, WeakEntryRef};
use std::rc::Rc;

/// Media assignment for one image device
#[derive(Debug, Clone, Default)]
pub struct ImageOption {
    canonical_instance_name: String,
    value: String,
    entry: WeakEntryRef,
}

impl ImageOption {
    pub fn new(canonical_instance_name: &str) -> Self {
        Self {
            canonical_instance_name: canonical_instance_name.to_string(),
            ..Self::default()
        }
    }

    pub fn canonical_instance_name(&self) -> &str {
        &self.canonical_instance_name
    }

    /// Assigned path or `list:software:part`, empty if nothing is mounted
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Registry entry exposing this image, if it is still registered
    pub fn option_entry(&self) -> Option<EntryRef> {
        self.entry.upgrade()
    }

    /// Assign media
    ///
    /// Returns whether the value changed. Pegging applies either way.
    pub(crate) fn specify(&mut self, value: &str, peg_priority: bool) -> bool {
        let changed = value != self.value;
        if changed {
            self.value = value.to_string();
        }
        conditionally_peg_priority(&self.entry, peg_priority);
        changed
    }

    /// Take over the value of `saved`, keeping the current entry
    ///
    /// Returns whether the value differed.
    pub(crate) fn restore(&mut self, saved: &ImageOption) -> bool {
        let differs = self.value != saved.value;
        self.value.clone_from(&saved.value);
        differs
    }

    /// Remember the registry entry created for this image
    ///
    /// # Panics
    ///
    /// Panics if a live entry is already attached.
    pub(crate) fn attach_entry(&mut self, entry: &EntryRef) {
        assert!(
            self.entry.upgrade().is_none(),
            "image option already has a registry entry"
        );
        self.entry = Rc::downgrade(entry);
    }

    /// Forget the registry entry, e.g. before re-registering under new names
    pub(crate) fn detach_entry(&mut self) {
        self.entry = WeakEntryRef::new();
    }
}
