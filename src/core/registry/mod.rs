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

//! Option Registry
//!
//! Generic name to value store with typed entries, aliases, headers and
//! priority-gated writes.
//!
//! # Ownership
//!
//! The registry owns its entries through `Rc<RefCell<OptionEntry>>`. Other
//! objects (slot and image options) keep a `Weak` handle to the entry that
//! exposes them, so an entry removed from the registry simply expires for
//! them.
//!
//! # Example
//!
//! ```
//! use emuopts::core::registry::{priority, CoreOptions, OptionEntry, OptionType};
//!
//! let mut options = CoreOptions::new();
//! options.add_header("PERFORMANCE");
//! options.add_entry(
//!     OptionEntry::parse("frameskip;fs(0-10)", Some("0"), OptionType::Integer, None),
//!     Some("PERFORMANCE"),
//! );
//!
//! options.set_value("fs", "3", priority::CMDLINE).unwrap();
//! assert_eq!(options.int_value("frameskip"), 3);
//!
//! // lower priority writes are ignored
//! options.set_value("frameskip", "5", priority::NORMAL).unwrap();
//! assert_eq!(options.int_value("frameskip"), 3);
//! ```

mod entry;

pub use entry::{
    priority, EntryKind, OptionEntry, OptionSpec, OptionType, Priority, ValueChangedHandler,
    ValueRange,
};

use super::error::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// Shared handle to a registry entry
pub type EntryRef = Rc<RefCell<OptionEntry>>;

/// Non-owning handle to a registry entry
pub type WeakEntryRef = Weak<RefCell<OptionEntry>>;

/// Option registry
#[derive(Debug, Default)]
pub struct CoreOptions {
    /// Entries (including headers) in display order
    entries: Vec<EntryRef>,
    /// Every alias of every entry
    lookup: HashMap<String, EntryRef>,
}

impl CoreOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entry under all of its names
    ///
    /// With `after_header`, the entry is placed at the end of that header's
    /// group; otherwise it is appended.
    ///
    /// # Panics
    ///
    /// Panics if any name is already registered. Option names come from
    /// static tables and device declarations, so a collision is a defect
    /// in those definitions.
    pub fn add_entry(&mut self, entry: OptionEntry, after_header: Option<&str>) -> EntryRef {
        for name in entry.names() {
            assert!(
                !self.lookup.contains_key(name),
                "option name '{}' registered twice",
                name
            );
        }

        let entry = Rc::new(RefCell::new(entry));
        for name in entry.borrow().names() {
            self.lookup.insert(name.clone(), entry.clone());
        }

        let position = after_header
            .and_then(|header| self.header_position(header))
            .map(|header_index| {
                self.entries[header_index + 1..]
                    .iter()
                    .position(|e| e.borrow().is_header())
                    .map(|offset| header_index + 1 + offset)
                    .unwrap_or(self.entries.len())
            });

        match position {
            Some(index) => self.entries.insert(index, entry.clone()),
            None => self.entries.push(entry.clone()),
        }

        log::trace!("Registered option '{}'", entry.borrow().name());
        entry
    }

    /// Register every row of a static option table
    pub fn add_entries(&mut self, table: &[OptionSpec]) {
        for spec in table {
            if spec.option_type == OptionType::Header {
                self.add_header(spec.description);
            } else {
                self.add_entry(OptionEntry::from_spec(spec), None);
            }
        }
    }

    pub fn add_header(&mut self, text: &str) {
        self.entries.push(Rc::new(RefCell::new(OptionEntry::header(text))));
    }

    pub fn header_exists(&self, text: &str) -> bool {
        self.header_position(text).is_some()
    }

    fn header_position(&self, text: &str) -> Option<usize> {
        self.entries.iter().position(|e| {
            let e = e.borrow();
            e.is_header() && e.description() == Some(text)
        })
    }

    /// Unregister every alias of an entry
    ///
    /// Removing an entry that is no longer registered is a no-op.
    pub fn remove_entry(&mut self, entry: &EntryRef) {
        let Some(index) = self.entries.iter().position(|e| Rc::ptr_eq(e, entry)) else {
            return;
        };
        self.entries.remove(index);
        for name in entry.borrow().names() {
            if self
                .lookup
                .get(name)
                .is_some_and(|registered| Rc::ptr_eq(registered, entry))
            {
                self.lookup.remove(name);
            }
        }
        log::trace!("Removed option '{}'", entry.borrow().name());
    }

    pub fn find_entry(&self, name: &str) -> Option<EntryRef> {
        self.lookup.get(name).cloned()
    }

    /// Look up an entry by any of its names
    ///
    /// # Panics
    ///
    /// Panics if the name is not registered; callers handling user input
    /// should validate with [`CoreOptions::find_entry`] first.
    pub fn entry(&self, name: &str) -> EntryRef {
        self.find_entry(name)
            .unwrap_or_else(|| panic!("attempt to access non-existent option '{}'", name))
    }

    /// Entries and headers in display order
    pub fn iter(&self) -> impl Iterator<Item = &EntryRef> {
        self.entries.iter()
    }

    /// Write a simple entry
    ///
    /// Returns `Ok(false)` when the write was ignored because the entry
    /// already holds a value of higher priority.
    pub fn set_value(&mut self, name: &str, value: &str, priority: Priority) -> Result<bool> {
        let entry = self.entry(name);
        let mut e = entry.borrow_mut();
        assert_eq!(
            *e.kind(),
            EntryKind::Simple,
            "option '{}' is owned by the options host",
            name
        );

        if !e.accepts_priority(priority) {
            log::trace!(
                "Ignoring '{}' = '{}' at priority {} (holding {})",
                name,
                value,
                priority,
                e.priority()
            );
            return Ok(false);
        }

        e.validate(value)?;
        e.store(value);
        e.set_priority(priority);
        e.notify(value);
        Ok(true)
    }

    /// Stored value of a simple entry
    pub fn value(&self, name: &str) -> Option<String> {
        self.entry(name).borrow().stored_value().map(str::to_string)
    }

    pub fn bool_value(&self, name: &str) -> bool {
        self.value(name).is_some_and(|v| v.trim() == "1")
    }

    pub fn int_value(&self, name: &str) -> i64 {
        self.value(name)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }

    pub fn float_value(&self, name: &str) -> f64 {
        self.value(name)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0.0)
    }

    pub fn set_value_changed_handler(&mut self, name: &str, handler: ValueChangedHandler) {
        self.entry(name)
            .borrow_mut()
            .set_value_changed_handler(handler);
    }

    /// Revert simple entries whose priority lies within `[priority_lo, priority_hi]`
    pub fn revert(&mut self, priority_hi: Priority, priority_lo: Priority) {
        for entry in &self.entries {
            entry.borrow_mut().revert(priority_hi, priority_lo);
        }
    }
}

/// Peg the priority of a still-registered entry to the maximum
///
/// Used when a slot or image value was supplied from outside the options
/// system, so later ordinary writes cannot override it.
pub fn conditionally_peg_priority(entry: &WeakEntryRef, peg_priority: bool) {
    if peg_priority {
        if let Some(entry) = entry.upgrade() {
            entry.borrow_mut().set_priority(priority::MAXIMUM);
        }
    }
}

#[cfg(test)]
mod tests;
