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

//! Slot options
//!
//! A slot option records which card occupies one expansion slot. Its value
//! is resolved from three tiers, highest first:
//!
//! 1. whatever the user specified (command line, ini file, UI, software list)
//! 2. the default card the slot device derived from the mounted image
//! 3. the static default from the device declaration
//!
//! Mutators report whether the resolved value changed; the options host
//! reacts to that by reconciling the machine configuration.

use super::registry::{conditionally_peg_priority, EntryRef, WeakEntryRef};
use std::rc::Rc;

const BIOS_ARG: &str = ",bios=";

/// Card selection for one slot
#[derive(Debug, Clone, Default)]
pub struct SlotOption {
    specified: bool,
    specified_value: String,
    specified_bios: String,
    default_card_software: String,
    default_value: String,
    entry: WeakEntryRef,
}

impl SlotOption {
    pub fn new(default_value: Option<&str>) -> Self {
        Self {
            default_value: default_value.unwrap_or_default().to_string(),
            ..Self::default()
        }
    }

    /// Resolved card name
    pub fn value(&self) -> &str {
        if self.specified {
            &self.specified_value
        } else if !self.default_card_software.is_empty() {
            &self.default_card_software
        } else {
            &self.default_value
        }
    }

    pub fn specified(&self) -> bool {
        self.specified
    }

    /// Raw user specification, `card,bios=name` when a bios was given
    ///
    /// Empty if nothing was ever specified.
    pub fn specified_value(&self) -> String {
        if !self.specified {
            String::new()
        } else if self.specified_bios.is_empty() {
            self.specified_value.clone()
        } else {
            format!("{}{}{}", self.specified_value, BIOS_ARG, self.specified_bios)
        }
    }

    pub fn bios(&self) -> Option<&str> {
        (!self.specified_bios.is_empty()).then_some(self.specified_bios.as_str())
    }

    pub fn default_card_software(&self) -> &str {
        &self.default_card_software
    }

    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    /// Registry entry exposing this slot, if it is still registered
    pub fn option_entry(&self) -> Option<EntryRef> {
        self.entry.upgrade()
    }

    /// Record a user specification, optionally suffixed with `,bios=NAME`
    ///
    /// Returns whether the resolved value changed.
    pub(crate) fn specify(&mut self, text: &str, peg_priority: bool) -> bool {
        let old_value = self.value().to_string();

        match text.find(BIOS_ARG) {
            Some(pos) => {
                self.specified_value = text[..pos].to_string();
                self.specified_bios = text[pos + BIOS_ARG.len()..].to_string();
            }
            None => {
                self.specified_value = text.to_string();
                self.specified_bios.clear();
            }
        }
        self.specified = true;

        conditionally_peg_priority(&self.entry, peg_priority);

        self.value() != old_value
    }

    /// Update the software-derived tier
    ///
    /// Returns whether the resolved value changed.
    pub(crate) fn set_default_card_software(&mut self, text: String) -> bool {
        let old_value = self.value().to_string();
        self.default_card_software = text;
        self.value() != old_value
    }

    /// Select a bios without discarding the currently resolved card
    pub(crate) fn set_bios(&mut self, text: &str) {
        if !self.specified {
            self.specified_value = self.value().to_string();
            self.specified = true;
        }
        self.specified_bios = text.to_string();
    }

    /// Take over the selection state of `saved`, keeping the current entry
    ///
    /// Returns whether anything differed.
    pub(crate) fn restore(&mut self, saved: &SlotOption) -> bool {
        let differs = self.specified != saved.specified
            || self.specified_value != saved.specified_value
            || self.specified_bios != saved.specified_bios
            || self.default_card_software != saved.default_card_software;
        self.specified = saved.specified;
        self.specified_value.clone_from(&saved.specified_value);
        self.specified_bios.clone_from(&saved.specified_bios);
        self.default_card_software.clone_from(&saved.default_card_software);
        differs
    }

    /// Remember the registry entry created for this slot
    ///
    /// # Panics
    ///
    /// Panics if a live entry is already attached.
    pub(crate) fn attach_entry(&mut self, entry: &EntryRef) {
        assert!(
            self.entry.upgrade().is_none(),
            "slot option already has a registry entry"
        );
        self.entry = Rc::downgrade(entry);
    }
}
