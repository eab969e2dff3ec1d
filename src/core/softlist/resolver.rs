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

//! Software-List Resolver
//!
//! Turns a user-supplied software identifier (`name` or `list:name`) into
//! the slot and image assignments it implies. Requirements declared by the
//! mounted parts are followed until none remain.
//!
//! The assignments are returned rather than applied: their target options
//! may only come into existence once earlier assignments of the same batch
//! have reconfigured the machine.

use super::{display_matches, SoftwareCompatibility, SoftwareListDevice, SoftwarePart};
use crate::core::error::{OptionsError, Result};
use crate::core::machine::{GameDriver, ImageDevice, MachineConfig};
use std::collections::BTreeMap;

const DEFAULT_SUFFIX: &str = "_default";

/// Slot and image assignments derived from a software identifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoftwareOptions {
    /// Slot name to card
    pub slot: BTreeMap<String, String>,
    /// Image instance name to `list:software:part`
    pub image: BTreeMap<String, String>,
}

impl SoftwareOptions {
    pub fn is_empty(&self) -> bool {
        self.slot.is_empty() && self.image.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slot.len() + self.image.len()
    }
}

/// First image device that can mount `part` and passes `filter`
///
/// Parts flagged `automount = "no"` are never mounted automatically.
pub fn find_mountable_image<'a, F>(config: &'a MachineConfig, part: &SoftwarePart, filter: F) -> Option<&'a ImageDevice>
where
    F: Fn(&ImageDevice) -> bool,
{
    if part.feature("automount") == Some("no") {
        return None;
    }

    config.images().iter().find(|image| {
        image
            .interface
            .as_deref()
            .is_some_and(|interface| part.matches_interface(interface))
            && filter(image)
    })
}

/// Resolve `identifier` against the software lists attached to `config`
///
/// An empty identifier yields empty assignments.
///
/// # Errors
///
/// - [`OptionsError::NoSoftwareLists`] when the configuration has no lists
/// - [`OptionsError::SoftwareNotFound`] when no list knows the software
/// - [`OptionsError::IncompatibleSoftware`] when it is known but has no
///   compatible part
pub fn evaluate_softlist_options(identifier: &str, system: &GameDriver, config: &MachineConfig) -> Result<SoftwareOptions> {
    let mut results = SoftwareOptions::default();
    if identifier.is_empty() {
        return Ok(results);
    }

    let lists = config.software_lists();
    if lists.is_empty() {
        return Err(OptionsError::NoSoftwareLists(identifier.to_string()));
    }

    let mut pending = vec![identifier.to_string()];
    while let Some(current) = pending.pop() {
        let (list_name, software_name) = match current.split_once(':') {
            Some((list, software)) => (Some(list), software),
            None => (None, current.as_str()),
        };

        let mut found = false;
        let mut compatible = false;

        for device in lists
            .iter()
            .filter(|device| list_name.is_none_or(|wanted| wanted == device.list_name()))
        {
            let Some(info) = device.find(software_name) else {
                continue;
            };

            for part in &info.parts {
                found = true;
                if device.is_compatible(part) != SoftwareCompatibility::Compatible {
                    continue;
                }
                compatible = true;

                let image = find_mountable_image(config, part, |candidate| {
                    !results.image.contains_key(&candidate.instance_name)
                });
                let Some(image) = image else {
                    log::debug!(
                        "No free image device for part '{}' of '{}'",
                        part.name,
                        software_name
                    );
                    continue;
                };

                let assignment = format!("{}:{}:{}", device.list_name(), software_name, part.name);
                log::debug!("Software assigns {} = {}", image.instance_name, assignment);
                results.image.insert(image.instance_name.clone(), assignment);

                if let Some(requirement) = part.feature("requirement") {
                    log::debug!("'{}' requires '{}'", software_name, requirement);
                    pending.push(requirement.to_string());
                }
            }

            collect_slot_defaults(device, software_name, &mut results);

            if compatible {
                break;
            }
        }

        if !compatible {
            let suggestions = display_matches(lists, list_name, software_name);
            return Err(if found {
                OptionsError::IncompatibleSoftware {
                    software: software_name.to_string(),
                    system: system.name.clone(),
                }
            } else {
                OptionsError::SoftwareNotFound {
                    name: current.clone(),
                    suggestions,
                }
            });
        }
    }

    Ok(results)
}

/// Shared features named `<slot>_default` select a card for that slot
fn collect_slot_defaults(device: &SoftwareListDevice, software_name: &str, results: &mut SoftwareOptions) {
    let Some(info) = device.find(software_name) else {
        return;
    };
    for (name, value) in &info.shared_features {
        if let Some(slot_name) = name.strip_suffix(DEFAULT_SUFFIX) {
            if !slot_name.is_empty() {
                results.slot.insert(slot_name.to_string(), value.clone());
            }
        }
    }
}
