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

//! Software lists
//!
//! A software list is an external catalog of titles known to run on a
//! system. Each title (software item) is split into parts, one per medium;
//! a part names the media interface it mounts into and may carry features
//! such as `compatibility` (region/model filter) or `requirement` (another
//! title that must be mounted alongside it). Titles may also carry shared
//! features; those named `<slot>_default` imply a default card for a slot.
//!
//! Systems attach lists through [`SoftwareListDevice`]s, which add the
//! system-specific compatibility filter.

mod resolver;

pub use resolver::{evaluate_softlist_options, find_mountable_image, SoftwareOptions};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::rc::Rc;

/// Maximum number of near-match suggestions reported for unknown software
pub const MAX_SUGGESTIONS: usize = 10;

/// One medium of a software item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftwarePart {
    pub name: String,
    /// Media interface(s), comma separated
    pub interface: String,
    #[serde(default)]
    pub features: BTreeMap<String, String>,
}

impl SoftwarePart {
    pub fn feature(&self, name: &str) -> Option<&str> {
        self.features.get(name).map(String::as_str)
    }

    /// Whether `interface` is one of this part's interfaces
    pub fn matches_interface(&self, interface: &str) -> bool {
        self.interface
            .split(',')
            .map(str::trim)
            .any(|candidate| candidate == interface)
    }
}

/// A software title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftwareInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "part")]
    pub parts: Vec<SoftwarePart>,
    #[serde(default, rename = "shared")]
    pub shared_features: BTreeMap<String, String>,
}

/// A named collection of software titles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftwareList {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub software: Vec<SoftwareInfo>,
}

impl SoftwareList {
    pub fn find(&self, name: &str) -> Option<&SoftwareInfo> {
        self.software.iter().find(|info| info.name == name)
    }
}

/// Whether a list is the system's own or merely compatible with it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoftwareListStatus {
    #[default]
    Original,
    Compatible,
}

/// Outcome of checking a part against a list's filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftwareCompatibility {
    Compatible,
    PartiallyCompatible,
    NotCompatible,
}

/// A software list attached to a machine configuration
#[derive(Debug, Clone)]
pub struct SoftwareListDevice {
    list: Rc<SoftwareList>,
    status: SoftwareListStatus,
    filter: Option<String>,
}

impl SoftwareListDevice {
    pub fn new(list: Rc<SoftwareList>, status: SoftwareListStatus, filter: Option<&str>) -> Self {
        Self {
            list,
            status,
            filter: filter.map(str::to_string),
        }
    }

    pub fn list_name(&self) -> &str {
        &self.list.name
    }

    pub fn status(&self) -> SoftwareListStatus {
        self.status
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn find(&self, name: &str) -> Option<&SoftwareInfo> {
        self.list.find(name)
    }

    /// Check a part against this device's filter
    ///
    /// Without a filter, or without a `compatibility` feature on the part,
    /// everything is compatible. Otherwise one of the filter tokens must
    /// appear in the part's compatibility list. A compatible part whose
    /// `incompatibility` feature names a filter token is only partially
    /// compatible.
    pub fn is_compatible(&self, part: &SoftwarePart) -> SoftwareCompatibility {
        let Some(filter) = self.filter.as_deref() else {
            return SoftwareCompatibility::Compatible;
        };
        let tokens: Vec<&str> = split_list(filter).collect();

        if let Some(compatibility) = part.feature("compatibility") {
            let listed: Vec<&str> = split_list(compatibility).collect();
            if !tokens.iter().any(|token| listed.contains(token)) {
                return SoftwareCompatibility::NotCompatible;
            }
        }

        if let Some(incompatibility) = part.feature("incompatibility") {
            if split_list(incompatibility).any(|item| tokens.contains(&item)) {
                return SoftwareCompatibility::PartiallyCompatible;
            }
        }

        SoftwareCompatibility::Compatible
    }

    /// Titles whose name or description resemble `name`, best first
    pub fn find_matches(&self, name: &str) -> Vec<(usize, String)> {
        let needle = name.to_ascii_lowercase();
        let threshold = (needle.len() / 3).max(2);

        self.list
            .software
            .iter()
            .filter_map(|info| {
                let lowered = info.name.to_ascii_lowercase();
                let score = if lowered.contains(&needle)
                    || info.description.to_ascii_lowercase().contains(&needle)
                {
                    0
                } else {
                    edit_distance(&lowered, &needle)
                };
                (score <= threshold).then(|| (score, format!("{}:{}", self.list_name(), info.name)))
            })
            .collect()
    }
}

/// Near matches for `name` across several lists
pub fn display_matches(lists: &[SoftwareListDevice], list_name: Option<&str>, name: &str) -> Vec<String> {
    let mut matches: Vec<(usize, String)> = lists
        .iter()
        .filter(|device| list_name.is_none_or(|wanted| wanted == device.list_name()))
        .flat_map(|device| device.find_matches(name))
        .collect();
    matches.sort();
    matches.dedup_by(|a, b| a.1 == b.1);

    let suggestions: Vec<String> = matches
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|(_, name)| name)
        .collect();
    for suggestion in &suggestions {
        log::info!("  similar software: {}", suggestion);
    }
    suggestions
}

fn split_list(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|item| !item.is_empty())
}

/// Levenshtein distance over bytes
fn edit_distance(a: &str, b: &str) -> usize {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }
    previous[b.len()]
}
