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

//! Option registry entries
//!
//! An entry is one named, typed option. Simple entries store their value
//! directly; the custom kinds (system name, software name, slot, image) only
//! carry the key of the object that owns the value and are resolved by the
//! options host.

use super::super::error::{OptionsError, Result};
use std::fmt;

/// Write priority of an option entry (higher wins)
pub type Priority = i32;

/// Well-known priority levels
pub mod priority {
    use super::Priority;

    pub const DEFAULT: Priority = 0;
    pub const LOW: Priority = 50;
    pub const NORMAL: Priority = 100;
    pub const HIGH: Priority = 150;
    pub const CMDLINE: Priority = HIGH + 1;
    pub const MAXIMUM: Priority = 255;
}

/// Declared type of an option entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Boolean,
    Integer,
    Float,
    String,
    /// Non-functional grouping marker
    Header,
    /// Verb taking no value
    Command,
}

/// How an entry's value is stored
///
/// The payload of each custom kind identifies the owning object; it is
/// never an ownership link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryKind {
    /// Value stored on the entry itself
    Simple,
    /// Current system name
    SystemName,
    /// Current software identifier
    SoftwareName,
    /// Slot option, keyed by slot name
    Slot(String),
    /// Image option, keyed by canonical instance name
    Image(String),
}

/// Inclusive numeric range constraint, kept as written in the entry spec
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRange {
    pub min: String,
    pub max: String,
}

/// Static description of a simple option, as used by option tables
#[derive(Debug, Clone, Copy)]
pub struct OptionSpec {
    /// `name;alias1;alias2(min-max)`
    pub spec: &'static str,
    pub default: Option<&'static str>,
    pub option_type: OptionType,
    pub description: &'static str,
}

/// Callback invoked with the new value after every accepted write
pub type ValueChangedHandler = Box<dyn Fn(&str)>;

/// One option registry entry
pub struct OptionEntry {
    names: Vec<String>,
    option_type: OptionType,
    kind: EntryKind,
    description: Option<String>,
    value: Option<String>,
    default_value: Option<String>,
    range: Option<ValueRange>,
    priority: Priority,
    value_changed_handler: Option<ValueChangedHandler>,
}

impl OptionEntry {
    /// Create a simple entry from a `name;alias(min-max)` spec string
    ///
    /// # Example
    ///
    /// ```
    /// use emuopts::core::registry::{OptionEntry, OptionType};
    ///
    /// let entry = OptionEntry::parse("frameskip;fs(0-10)", Some("0"), OptionType::Integer, None);
    /// assert_eq!(entry.names(), &["frameskip".to_string(), "fs".to_string()]);
    /// assert_eq!(entry.range().unwrap().max, "10");
    /// ```
    pub fn parse(
        spec: &str,
        default_value: Option<&str>,
        option_type: OptionType,
        description: Option<&str>,
    ) -> Self {
        let (names_part, range) = match (spec.find('('), spec.rfind(')')) {
            (Some(open), Some(close)) if close > open => {
                let inner = &spec[open + 1..close];
                // skip the first character so a leading minus sign is kept with the minimum
                let range = inner
                    .char_indices()
                    .skip(1)
                    .find(|&(_, c)| c == '-')
                    .map(|(split, _)| ValueRange {
                        min: inner[..split].trim().to_string(),
                        max: inner[split + 1..].trim().to_string(),
                    });
                (&spec[..open], range)
            }
            _ => (spec, None),
        };

        let names = names_part
            .split(';')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            names,
            option_type,
            kind: EntryKind::Simple,
            description: description.map(str::to_string),
            value: default_value.map(str::to_string),
            default_value: default_value.map(str::to_string),
            range,
            priority: priority::DEFAULT,
            value_changed_handler: None,
        }
    }

    /// Create a simple entry from a static table row
    pub fn from_spec(spec: &OptionSpec) -> Self {
        Self::parse(
            spec.spec,
            spec.default,
            spec.option_type,
            Some(spec.description),
        )
    }

    /// Create a header (grouping marker)
    pub fn header(text: &str) -> Self {
        Self {
            names: Vec::new(),
            option_type: OptionType::Header,
            kind: EntryKind::Simple,
            description: Some(text.to_string()),
            value: None,
            default_value: None,
            range: None,
            priority: priority::DEFAULT,
            value_changed_handler: None,
        }
    }

    /// Create a custom entry whose value lives on its owning object
    pub fn custom(names: Vec<String>, kind: EntryKind, description: Option<&str>) -> Self {
        debug_assert!(kind != EntryKind::Simple);
        Self {
            names,
            option_type: OptionType::String,
            kind,
            description: description.map(str::to_string),
            value: None,
            default_value: None,
            range: None,
            priority: priority::DEFAULT,
            value_changed_handler: None,
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Canonical name (first alias), empty for headers
    pub fn name(&self) -> &str {
        self.names.first().map(String::as_str).unwrap_or("")
    }

    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    pub fn kind(&self) -> &EntryKind {
        &self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    pub fn range(&self) -> Option<&ValueRange> {
        self.range.as_ref()
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn set_priority(&mut self, priority: Priority) {
        self.priority = priority;
    }

    pub fn is_header(&self) -> bool {
        self.option_type == OptionType::Header
    }

    /// Stored value of a simple entry
    ///
    /// Custom kinds always return `None` here; their value is computed by
    /// the options host.
    pub fn stored_value(&self) -> Option<&str> {
        match self.option_type {
            OptionType::Header | OptionType::Command => None,
            _ => self.value.as_deref(),
        }
    }

    /// Whether a write at `priority` may replace the current value
    pub fn accepts_priority(&self, priority: Priority) -> bool {
        priority >= self.priority
    }

    /// Check a candidate value against the declared type and range
    pub fn validate(&self, value: &str) -> Result<()> {
        match self.option_type {
            OptionType::Boolean => {
                if value != "0" && value != "1" {
                    return Err(self.invalid(value, "expected boolean 0 or 1"));
                }
            }
            OptionType::Integer => {
                let parsed: i64 = value
                    .trim()
                    .parse()
                    .map_err(|_| self.invalid(value, "expected integer"))?;
                if let Some(range) = &self.range {
                    let min = range.min.parse::<i64>().unwrap_or(i64::MIN);
                    let max = range.max.parse::<i64>().unwrap_or(i64::MAX);
                    if parsed < min || parsed > max {
                        return Err(self.out_of_range(value, range));
                    }
                }
            }
            OptionType::Float => {
                let parsed: f64 = value
                    .trim()
                    .parse()
                    .map_err(|_| self.invalid(value, "expected float"))?;
                if let Some(range) = &self.range {
                    let min = range.min.parse::<f64>().unwrap_or(f64::MIN);
                    let max = range.max.parse::<f64>().unwrap_or(f64::MAX);
                    if parsed < min || parsed > max {
                        return Err(self.out_of_range(value, range));
                    }
                }
            }
            OptionType::Header => {
                return Err(self.invalid(value, "headers cannot hold a value"));
            }
            OptionType::String | OptionType::Command => {}
        }
        Ok(())
    }

    /// Store a value on a simple entry
    pub(crate) fn store(&mut self, value: &str) {
        debug_assert_eq!(self.kind, EntryKind::Simple);
        self.value = Some(value.to_string());
    }

    /// Restore the default value if the priority lies in `[lo, hi]`
    pub(crate) fn revert(&mut self, priority_hi: Priority, priority_lo: Priority) {
        if self.kind == EntryKind::Simple
            && !self.is_header()
            && self.priority <= priority_hi
            && self.priority >= priority_lo
        {
            self.value = self.default_value.clone();
            self.priority = priority::DEFAULT;
        }
    }

    pub fn set_value_changed_handler(&mut self, handler: ValueChangedHandler) {
        self.value_changed_handler = Some(handler);
    }

    /// Invoke the value-changed handler, if any
    pub fn notify(&self, value: &str) {
        if let Some(handler) = &self.value_changed_handler {
            handler(value);
        }
    }

    fn invalid(&self, value: &str, reason: &str) -> OptionsError {
        OptionsError::InvalidValue {
            name: self.name().to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    fn out_of_range(&self, value: &str, range: &ValueRange) -> OptionsError {
        OptionsError::OutOfRange {
            name: self.name().to_string(),
            value: value.to_string(),
            min: range.min.clone(),
            max: range.max.clone(),
        }
    }
}

impl fmt::Debug for OptionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionEntry")
            .field("names", &self.names)
            .field("option_type", &self.option_type)
            .field("kind", &self.kind)
            .field("value", &self.value)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}
