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

//! Reconciliation driver
//!
//! [`EmuOptions`] owns the option registry together with every slot and
//! image option, and keeps the slot/image sets in step with the device
//! topology of the selected system.
//!
//! # Reconciliation
//!
//! Whenever the topology may have changed, three steps repeat until a full
//! pass changes nothing:
//!
//! 1. add missing slot options and purge those whose slot disappeared
//! 2. the same for image options, keyed by canonical instance name, with the
//!    display-name index rebuilt from scratch
//! 3. ask every slot device for its preferred card given the mounted image;
//!    the first difference is applied and the scan restarts, since the
//!    topology it was iterating may be gone
//!
//! There is no iteration cap. A device graph whose default cards depend on
//! each other in a cycle never settles; that is a defect in the catalog.
//!
//! # Example
//!
//! ```
//! use emuopts::core::catalog::TomlCatalog;
//! use emuopts::core::emu_options::{EmuOptions, OptionSupport};
//! use std::rc::Rc;
//!
//! let catalog = TomlCatalog::from_str(r#"
//!     [[system]]
//!     name = "tiny"
//!
//!     [[system.slot]]
//!     name = "exp"
//!     default = "none"
//!
//!     [[card]]
//!     name = "none"
//! "#).unwrap();
//!
//! let mut options = EmuOptions::new(Rc::new(catalog), OptionSupport::Full);
//! options.set_system_name("tiny").unwrap();
//! assert_eq!(options.slot_option("exp").value(), "none");
//! ```

pub mod core_entries;

pub use core_entries::{UiType, IMAGE_DEVICES_HEADER, SLOT_DEVICES_HEADER};

use self::core_entries::{FrequentOptions, CORE_OPTION_ENTRIES, OPTION_SOFTWARENAME, OPTION_SYSTEMNAME};
use super::error::{OptionsError, Result};
use super::image::ImageOption;
use super::machine::{
    DefaultCardSoftwareHook, GameDriver, MachineCatalog, MachineConfig, SlotDevice, SlotSelection,
    SlotSelections,
};
use super::registry::{priority, CoreOptions, EntryKind, EntryRef, OptionEntry, Priority};
use super::slot::SlotOption;
use super::softlist::{evaluate_softlist_options, SoftwareOptions};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

/// How much of the options machinery a host wants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSupport {
    /// System and software names plus slot/image reconciliation
    Full,
    /// System name entry, but no slot or image options
    GeneralAndSystem,
    /// Core options only
    GeneralOnly,
}

/// Snapshot of the resolved configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfiguration {
    pub system: Option<String>,
    pub software: Option<String>,
    pub slots: Vec<ResolvedSlot>,
    pub images: Vec<ResolvedImage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedSlot {
    pub name: String,
    pub card: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bios: Option<String>,
    pub specified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedImage {
    pub name: String,
    pub canonical_name: String,
    pub value: String,
}

/// Options host for one emulation session
pub struct EmuOptions {
    registry: CoreOptions,
    catalog: Rc<dyn MachineCatalog>,
    support: OptionSupport,
    system: Option<Rc<GameDriver>>,
    attempted_system_name: String,
    software_name: String,
    slot_options: BTreeMap<String, SlotOption>,
    /// Authoritative image storage, by canonical instance name
    image_options_canonical: BTreeMap<String, ImageOption>,
    /// Display instance name to canonical name; rebuilt on every pass
    image_options: BTreeMap<String, String>,
    frequent: FrequentOptions,
}

impl EmuOptions {
    /// Create an options host and register the core option table
    ///
    /// # Arguments
    ///
    /// * `catalog` - System lookup and topology provider
    /// * `support` - Which option families to expose
    pub fn new(catalog: Rc<dyn MachineCatalog>, support: OptionSupport) -> Self {
        let mut registry = CoreOptions::new();

        if matches!(support, OptionSupport::Full | OptionSupport::GeneralAndSystem) {
            registry.add_entry(
                OptionEntry::custom(vec![OPTION_SYSTEMNAME.to_string()], EntryKind::SystemName, None),
                None,
            );
        }
        if support == OptionSupport::Full {
            registry.add_entry(
                OptionEntry::custom(
                    vec![OPTION_SOFTWARENAME.to_string()],
                    EntryKind::SoftwareName,
                    None,
                ),
                None,
            );
        }
        registry.add_entries(CORE_OPTION_ENTRIES);

        let frequent = FrequentOptions::new();
        frequent.install(&mut registry);

        Self {
            registry,
            catalog,
            support,
            system: None,
            attempted_system_name: String::new(),
            software_name: String::new(),
            slot_options: BTreeMap::new(),
            image_options_canonical: BTreeMap::new(),
            image_options: BTreeMap::new(),
            frequent,
        }
    }

    pub fn support(&self) -> OptionSupport {
        self.support
    }

    /// Read-only view of the option registry
    pub fn registry(&self) -> &CoreOptions {
        &self.registry
    }

    pub fn system(&self) -> Option<&GameDriver> {
        self.system.as_deref()
    }

    /// Name of the selected system, empty if none
    pub fn system_name(&self) -> &str {
        self.system.as_ref().map(|s| s.name.as_str()).unwrap_or("")
    }

    /// Last name passed to [`EmuOptions::set_system_name`], even if it failed
    pub fn attempted_system_name(&self) -> &str {
        &self.attempted_system_name
    }

    pub fn software_name(&self) -> &str {
        &self.software_name
    }

    /// Select the system
    ///
    /// Directory and extension are stripped before the lookup, so a dropped
    /// file path such as `/roms/demo.zip` selects `demo`. An empty name
    /// deselects the system and purges every slot and image option.
    ///
    /// # Errors
    ///
    /// [`OptionsError::UnknownSystem`] if the catalog does not know the
    /// name; nothing but the attempted name is recorded then.
    pub fn set_system_name(&mut self, name: &str) -> Result<()> {
        self.attempted_system_name = name.to_string();

        let new_system = if name.is_empty() {
            None
        } else {
            let base_name = system_base_name(name);
            let system = self
                .catalog
                .find_system(base_name)
                .ok_or_else(|| OptionsError::UnknownSystem(name.to_string()))?;
            Some(system)
        };

        if self.system.as_deref() != new_system.as_deref() {
            log::info!(
                "System: {}",
                new_system.as_ref().map(|s| s.name.as_str()).unwrap_or("(none)")
            );
            self.system = new_system;
            self.software_name.clear();
            if self.support == OptionSupport::Full {
                self.update_slot_and_image_options();
            }
        }
        Ok(())
    }

    /// Load software out of the attached software lists
    ///
    /// Resolves `identifier` (`name` or `list:name`) and its requirements,
    /// then distributes the resulting slot and image assignments. An
    /// assignment whose option only appears once another assignment has
    /// reconfigured the machine is retried in the next round.
    ///
    /// # Errors
    ///
    /// Resolution errors leave every option untouched.
    /// [`OptionsError::CouldNotAssignSoftware`] is returned when a round
    /// makes no progress.
    pub fn set_software(&mut self, identifier: &str) -> Result<()> {
        let mut pending = self.evaluate_initial_softlist_options(identifier)?;
        let snapshot = self.snapshot();

        while !pending.is_empty() {
            let before = pending.len();
            let mut deferred = SoftwareOptions::default();

            for (slot_name, value) in pending.slot {
                if self.slot_options.contains_key(&slot_name) {
                    self.specify_slot(&slot_name, &value, true);
                } else {
                    log::debug!("Deferring slot assignment {} = {}", slot_name, value);
                    deferred.slot.insert(slot_name, value);
                }
            }

            for (image_name, value) in pending.image {
                if self.image_options.contains_key(&image_name) {
                    self.specify_image(&image_name, &value, true);
                } else {
                    log::debug!("Deferring image assignment {} = {}", image_name, value);
                    deferred.image.insert(image_name, value);
                }
            }

            let after = deferred.len();
            if after > 0 && after >= before {
                log::warn!("{} software assignments have no option to go to", after);
                self.restore(&snapshot);
                return Err(OptionsError::CouldNotAssignSoftware);
            }
            pending = deferred;
        }

        if !identifier.is_empty() {
            log::info!("Software: {}", identifier);
        }
        self.software_name = identifier.to_string();
        Ok(())
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            slots: self
                .slot_options
                .iter()
                .map(|(name, option)| (name.clone(), option.clone(), entry_priority(option.option_entry())))
                .collect(),
            images: self
                .image_options_canonical
                .iter()
                .map(|(name, option)| (name.clone(), option.clone(), entry_priority(option.option_entry())))
                .collect(),
        }
    }

    /// Roll slot and image state back to `snapshot`
    ///
    /// Restoring a selection can bring back options that were purged in the
    /// meantime, so passes repeat until nothing differs.
    fn restore(&mut self, snapshot: &Snapshot) {
        loop {
            let mut changed = false;

            for (name, saved, held) in &snapshot.slots {
                if let Some(option) = self.slot_options.get_mut(name) {
                    changed |= option.restore(saved);
                    restore_priority(option.option_entry(), *held);
                }
            }
            for (name, saved, held) in &snapshot.images {
                if let Some(option) = self.image_options_canonical.get_mut(name) {
                    changed |= option.restore(saved);
                    restore_priority(option.option_entry(), *held);
                }
            }

            self.update_slot_and_image_options();
            if !changed {
                break;
            }
        }
    }

    fn evaluate_initial_softlist_options(&self, identifier: &str) -> Result<SoftwareOptions> {
        if identifier.is_empty() {
            return Ok(SoftwareOptions::default());
        }
        let system = self
            .system
            .clone()
            .ok_or(OptionsError::SoftwareWithoutSystem)?;
        let config = self.catalog.machine_config(&system, self);
        evaluate_softlist_options(identifier, &system, &config)
    }

    /// Bring slot and image options in line with the current topology
    pub(crate) fn update_slot_and_image_options(&mut self) {
        loop {
            let mut changed = false;
            if self.add_and_remove_slot_options() {
                changed = true;
            }
            if self.add_and_remove_image_options() {
                changed = true;
            }
            if !changed {
                break;
            }
            log::debug!(
                "Reconciled {} slot options, {} image options",
                self.slot_options.len(),
                self.image_options_canonical.len()
            );
            self.reevaluate_default_card_software();
        }
    }

    /// Instantiate the topology for the current selections
    pub fn machine_config(&self) -> Option<MachineConfig> {
        let system = self.system.as_ref()?;
        Some(self.catalog.machine_config(system, self))
    }

    fn add_and_remove_slot_options(&mut self) -> bool {
        let mut changed = false;
        let mut existing: BTreeSet<String> = self.slot_options.keys().cloned().collect();

        if let Some(config) = self.machine_config() {
            for slot in config.slots() {
                let name = &slot.slot_name;
                existing.remove(name);
                if self.slot_options.contains_key(name) {
                    continue;
                }

                let mut option = SlotOption::new(slot.default_option.as_deref());
                if !slot.fixed {
                    if !self.registry.header_exists(SLOT_DEVICES_HEADER) {
                        self.registry.add_header(SLOT_DEVICES_HEADER);
                    }
                    let entry = OptionEntry::custom(
                        vec![name.clone()],
                        EntryKind::Slot(name.clone()),
                        None,
                    );
                    let entry = self.registry.add_entry(entry, Some(SLOT_DEVICES_HEADER));
                    option.attach_entry(&entry);
                }

                log::debug!("Added slot option '{}'", name);
                self.slot_options.insert(name.clone(), option);
                changed = true;
            }
        }

        for name in existing {
            if let Some(option) = self.slot_options.remove(&name) {
                if let Some(entry) = option.option_entry() {
                    self.registry.remove_entry(&entry);
                }
            }
            log::debug!("Purged slot option '{}'", name);
            changed = true;
        }

        changed
    }

    fn add_and_remove_image_options(&mut self) -> bool {
        let mut changed = false;
        let mut existing: BTreeSet<String> =
            self.image_options_canonical.keys().cloned().collect();

        self.image_options.clear();

        let images = self
            .machine_config()
            .map(|config| config.images().to_vec())
            .unwrap_or_default();

        for image in &images {
            existing.remove(&image.canonical_instance_name);
        }
        for name in existing {
            if let Some(option) = self.image_options_canonical.remove(&name) {
                if let Some(entry) = option.option_entry() {
                    self.registry.remove_entry(&entry);
                }
            }
            log::debug!("Purged image option '{}'", name);
            changed = true;
        }

        // Display names shift with the device set; entries registered under
        // outdated names are dropped before any new name is claimed.
        let mut register: Vec<(usize, Priority)> = Vec::new();
        for (index, image) in images.iter().enumerate() {
            let canonical = &image.canonical_instance_name;
            match self.image_options_canonical.get_mut(canonical) {
                Some(option) => {
                    let Some(entry) = option.option_entry() else {
                        continue;
                    };
                    if entry.borrow().names() == image.full_option_names().as_slice() {
                        continue;
                    }
                    let held = entry.borrow().priority();
                    self.registry.remove_entry(&entry);
                    option.detach_entry();
                    log::debug!("Renaming image option '{}' to '{}'", canonical, image.instance_name);
                    register.push((index, held));
                }
                None => {
                    self.image_options_canonical
                        .insert(canonical.clone(), ImageOption::new(canonical));
                    log::debug!("Added image option '{}' ({})", image.instance_name, canonical);
                    changed = true;
                    if image.user_loadable() {
                        register.push((index, priority::DEFAULT));
                    }
                }
            }
        }

        for (index, entry_priority) in register {
            let image = &images[index];
            if !self.registry.header_exists(IMAGE_DEVICES_HEADER) {
                self.registry.add_header(IMAGE_DEVICES_HEADER);
            }
            let mut entry = OptionEntry::custom(
                image.full_option_names(),
                EntryKind::Image(image.canonical_instance_name.clone()),
                None,
            );
            entry.set_priority(entry_priority);
            let entry = self.registry.add_entry(entry, Some(IMAGE_DEVICES_HEADER));
            if let Some(option) = self.image_options_canonical.get_mut(&image.canonical_instance_name) {
                option.attach_entry(&entry);
            }
        }

        for image in &images {
            self.image_options
                .insert(image.instance_name.clone(), image.canonical_instance_name.clone());
        }

        changed
    }

    /// Let slot devices pick default cards for the currently mounted images
    pub(crate) fn reevaluate_default_card_software(&mut self) {
        let Some(system) = self.system.clone() else {
            return;
        };

        loop {
            let catalog = self.catalog.clone();
            let config = catalog.machine_config(&system, &*self);

            let update = config.slots().iter().find_map(|slot| {
                let default_card_software = self.get_default_card_software(&system, &config, slot);
                (self.slot_option(&slot.slot_name).default_card_software() != default_card_software)
                    .then(|| (slot.slot_name.clone(), default_card_software))
            });

            let Some((slot_name, default_card_software)) = update else {
                break;
            };

            log::debug!(
                "Slot '{}' default card software: '{}'",
                slot_name,
                default_card_software
            );
            let changed = self
                .slot_option_mut(&slot_name)
                .set_default_card_software(default_card_software);
            if changed {
                self.update_slot_and_image_options();
            }
        }
    }

    fn get_default_card_software(&self, system: &GameDriver, config: &MachineConfig, slot: &SlotDevice) -> String {
        let image = config.slot_image(slot);
        let image_path = image
            .and_then(|image| self.find_image_option(&image.instance_name))
            .map(|option| option.value().to_string())
            .unwrap_or_default();

        let catalog = &self.catalog;
        let extrainfo = image.map(|image| {
            let path = image_path.clone();
            Box::new(move || catalog.hashfile_extrainfo(system, image, &path))
                as Box<dyn Fn() -> Option<String> + '_>
        });

        let hook = DefaultCardSoftwareHook::new(&image_path, extrainfo);
        slot.default_card_software(&hook)
    }

    /// Specify a slot's card, optionally with a `,bios=NAME` suffix
    ///
    /// # Arguments
    ///
    /// * `slot_name` - Full slot name
    /// * `text` - Card name
    /// * `peg_priority` - Lock the backing registry entry at maximum priority
    ///
    /// # Panics
    ///
    /// Panics if no such slot option exists.
    pub fn specify_slot(&mut self, slot_name: &str, text: &str, peg_priority: bool) {
        let changed = self.slot_option_mut(slot_name).specify(text, peg_priority);
        if changed {
            self.update_slot_and_image_options();
        }
    }

    /// Select a slot bios without discarding the resolved card
    ///
    /// # Panics
    ///
    /// Panics if no such slot option exists.
    pub fn set_slot_bios(&mut self, slot_name: &str, bios: &str) {
        self.slot_option_mut(slot_name).set_bios(bios);
    }

    /// Mount media in the image currently displayed as `instance_name`
    ///
    /// # Panics
    ///
    /// Panics if no such image option exists.
    pub fn specify_image(&mut self, instance_name: &str, value: &str, peg_priority: bool) {
        let canonical = self
            .image_options
            .get(instance_name)
            .cloned()
            .unwrap_or_else(|| panic!("attempt to access non-existent image option '{}'", instance_name));
        self.specify_canonical_image(&canonical, value, peg_priority);
    }

    fn specify_canonical_image(&mut self, canonical: &str, value: &str, peg_priority: bool) {
        let option = self
            .image_options_canonical
            .get_mut(canonical)
            .unwrap_or_else(|| panic!("attempt to access non-existent image option '{}'", canonical));
        if option.specify(value, peg_priority) {
            self.reevaluate_default_card_software();
        }
    }

    pub fn find_slot_option(&self, slot_name: &str) -> Option<&SlotOption> {
        self.slot_options.get(slot_name)
    }

    /// # Panics
    ///
    /// Panics if no such slot option exists.
    pub fn slot_option(&self, slot_name: &str) -> &SlotOption {
        self.find_slot_option(slot_name)
            .unwrap_or_else(|| panic!("attempt to access non-existent slot option '{}'", slot_name))
    }

    fn slot_option_mut(&mut self, slot_name: &str) -> &mut SlotOption {
        self.slot_options
            .get_mut(slot_name)
            .unwrap_or_else(|| panic!("attempt to access non-existent slot option '{}'", slot_name))
    }

    /// Image option by current display name
    pub fn find_image_option(&self, instance_name: &str) -> Option<&ImageOption> {
        self.image_options
            .get(instance_name)
            .and_then(|canonical| self.image_options_canonical.get(canonical))
    }

    /// # Panics
    ///
    /// Panics if no such image option exists.
    pub fn image_option(&self, instance_name: &str) -> &ImageOption {
        self.find_image_option(instance_name).unwrap_or_else(|| {
            panic!("attempt to access non-existent image option '{}'", instance_name)
        })
    }

    /// Slot options by slot name
    pub fn slot_options(&self) -> impl Iterator<Item = (&str, &SlotOption)> {
        self.slot_options
            .iter()
            .map(|(name, option)| (name.as_str(), option))
    }

    /// Image options by current display name
    pub fn image_options(&self) -> impl Iterator<Item = (&str, &ImageOption)> {
        self.image_options.iter().filter_map(|(name, canonical)| {
            self.image_options_canonical
                .get(canonical)
                .map(|option| (name.as_str(), option))
        })
    }

    /// Current value of any option
    ///
    /// Slot entries only report a value once one was specified.
    ///
    /// # Panics
    ///
    /// Panics if the name is not registered.
    pub fn value(&self, name: &str) -> Option<String> {
        let kind = self.registry.entry(name).borrow().kind().clone();
        match kind {
            EntryKind::Simple => self.registry.value(name),
            EntryKind::SystemName => Some(self.system_name().to_string()),
            EntryKind::SoftwareName => Some(self.software_name.clone()),
            EntryKind::Slot(slot_name) => {
                let option = self.slot_option(&slot_name);
                option.specified().then(|| option.specified_value())
            }
            EntryKind::Image(canonical) => self
                .image_options_canonical
                .get(&canonical)
                .map(|option| option.value().to_string()),
        }
    }

    /// Write any option by name, subject to its priority
    ///
    /// Returns `Ok(false)` when the write was ignored for priority.
    ///
    /// # Errors
    ///
    /// [`OptionsError::UnknownOption`] for unregistered names, plus whatever
    /// the target rejects the value with.
    pub fn set_value(&mut self, name: &str, value: &str, priority: Priority) -> Result<bool> {
        let entry = self
            .registry
            .find_entry(name)
            .ok_or_else(|| OptionsError::UnknownOption(name.to_string()))?;

        let kind = {
            let e = entry.borrow();
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
            e.kind().clone()
        };

        match kind {
            EntryKind::Simple => return self.registry.set_value(name, value, priority),
            EntryKind::SystemName => self.set_system_name(value)?,
            EntryKind::SoftwareName => self.set_software(value)?,
            EntryKind::Slot(slot_name) => self.specify_slot(&slot_name, value, false),
            EntryKind::Image(canonical) => self.specify_canonical_image(&canonical, value, false),
        }

        entry.borrow_mut().set_priority(priority);
        entry.borrow().notify(value);
        Ok(true)
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

    /// Revert core options written within `[priority_lo, priority_hi]`
    pub fn revert(&mut self, priority_hi: Priority, priority_lo: Priority) {
        self.registry.revert(priority_hi, priority_lo);
        self.frequent.refresh(&self.registry);
    }

    pub fn coin_impulse(&self) -> i64 {
        self.frequent.coin_impulse()
    }

    pub fn joystick_contradictory(&self) -> bool {
        self.frequent.joystick_contradictory()
    }

    pub fn sleep(&self) -> bool {
        self.frequent.sleep()
    }

    pub fn refresh_speed(&self) -> bool {
        self.frequent.refresh_speed()
    }

    pub fn ui(&self) -> UiType {
        self.frequent.ui()
    }

    /// Snapshot of the system, software, slot and image state
    pub fn resolved_configuration(&self) -> ResolvedConfiguration {
        ResolvedConfiguration {
            system: self.system.as_ref().map(|s| s.name.clone()),
            software: (!self.software_name.is_empty()).then(|| self.software_name.clone()),
            slots: self
                .slot_options()
                .map(|(name, option)| ResolvedSlot {
                    name: name.to_string(),
                    card: option.value().to_string(),
                    bios: option.bios().map(str::to_string),
                    specified: option.specified(),
                })
                .collect(),
            images: self
                .image_options()
                .map(|(name, option)| ResolvedImage {
                    name: name.to_string(),
                    canonical_name: option.canonical_instance_name().to_string(),
                    value: option.value().to_string(),
                })
                .collect(),
        }
    }
}

impl SlotSelections for EmuOptions {
    fn slot_selection(&self, slot_name: &str) -> Option<SlotSelection> {
        self.slot_options.get(slot_name).map(|option| SlotSelection {
            card: option.value().to_string(),
            bios: option.bios().map(str::to_string),
        })
    }
}

impl std::fmt::Debug for EmuOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmuOptions")
            .field("support", &self.support)
            .field("system", &self.system_name())
            .field("software_name", &self.software_name)
            .field("slot_options", &self.slot_options)
            .field("image_options", &self.image_options)
            .finish_non_exhaustive()
    }
}

/// Slot and image state with the priorities of their registry entries
struct Snapshot {
    slots: Vec<(String, SlotOption, Option<Priority>)>,
    images: Vec<(String, ImageOption, Option<Priority>)>,
}

fn entry_priority(entry: Option<EntryRef>) -> Option<Priority> {
    entry.map(|entry| entry.borrow().priority())
}

fn restore_priority(entry: Option<EntryRef>, held: Option<Priority>) {
    if let (Some(entry), Some(held)) = (entry, held) {
        entry.borrow_mut().set_priority(held);
    }
}

/// Strip directory and extension from a system name
fn system_base_name(name: &str) -> &str {
    let file_name = name.rsplit(['/', '\\']).next().unwrap_or(name);
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}

#[cfg(test)]
mod tests;
