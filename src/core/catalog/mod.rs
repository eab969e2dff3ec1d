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

//! TOML machine catalog
//!
//! A data-driven [`MachineCatalog`]: systems, plug-in cards, software lists
//! and hash file metadata are declared in a TOML document and the device
//! topology is instantiated from those declarations.
//!
//! # Catalog Format
//!
//! ```toml
//! [[system]]
//! name = "demo"
//! description = "Demo Console"
//!
//! [[system.slot]]
//! name = "cart"
//! default = "empty"
//! options = ["empty", "rom"]
//! image = { type = "cartridge", brief = "crt", interface = "demo_cart" }
//! probe = [{ extension = "bin", card = "rom" }]
//!
//! [[system.softlist]]
//! list = "carts"
//!
//! [[card]]
//! name = "empty"
//!
//! [[card]]
//! name = "rom"
//!
//! [[softlist]]
//! name = "carts"
//!
//! [[softlist.software]]
//! name = "game"
//!
//! [[softlist.software.part]]
//! name = "cart"
//! interface = "demo_cart"
//! ```
//!
//! Slots nested inside a card are named `<slot>:<card>:<child>`. A device's
//! own images come before the devices plugged into its slots.
//!
//! # Example
//!
//! ```
//! use emuopts::core::catalog::TomlCatalog;
//! use emuopts::core::machine::MachineCatalog;
//!
//! let catalog = TomlCatalog::from_str(r#"
//!     [[system]]
//!     name = "tiny"
//! "#).unwrap();
//! assert!(catalog.find_system("tiny").is_some());
//! assert!(catalog.find_system("huge").is_none());
//! ```

use super::error::{OptionsError, Result};
use super::machine::{
    DefaultCardProbe, DefaultCardSoftwareHook, GameDriver, ImageDevice, ImageFlags, MachineCatalog,
    MachineConfig, SlotDevice, SlotSelections,
};
use super::softlist::{SoftwareList, SoftwareListDevice, SoftwareListStatus};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::rc::Rc;

/// Maximum depth of cards plugged into cards
pub const MAX_CARD_DEPTH: usize = 16;

/// Raw catalog document
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    #[serde(default, rename = "system")]
    pub systems: Vec<SystemDecl>,
    #[serde(default, rename = "card")]
    pub cards: Vec<CardDecl>,
    #[serde(default, rename = "softlist")]
    pub softlists: Vec<SoftwareList>,
    #[serde(default)]
    pub extrainfo: Vec<ExtraInfoDecl>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemDecl {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "slot")]
    pub slots: Vec<SlotDecl>,
    #[serde(default, rename = "image")]
    pub images: Vec<ImageDecl>,
    #[serde(default, rename = "softlist")]
    pub softlists: Vec<SoftlistAttach>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardDecl {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "slot")]
    pub slots: Vec<SlotDecl>,
    #[serde(default, rename = "image")]
    pub images: Vec<ImageDecl>,
    #[serde(default, rename = "softlist")]
    pub softlists: Vec<SoftlistAttach>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SlotDecl {
    pub name: String,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub fixed: bool,
    /// Cards allowed in this slot; empty allows every declared card
    #[serde(default)]
    pub options: Vec<String>,
    /// Image interface implemented by the slot device itself
    #[serde(default)]
    pub image: Option<ImageDecl>,
    #[serde(default)]
    pub probe: Vec<ProbeRule>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageDecl {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub brief: Option<String>,
    #[serde(default)]
    pub interface: Option<String>,
    #[serde(default = "default_image_flags")]
    pub flags: ImageFlags,
}

fn default_image_flags() -> ImageFlags {
    ImageFlags::USER_LOADABLE | ImageFlags::READABLE
}

impl ImageDecl {
    fn device(&self) -> ImageDevice {
        ImageDevice::new(
            &self.type_name,
            self.brief.as_deref().unwrap_or(&self.type_name),
            self.interface.as_deref(),
            self.flags,
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoftlistAttach {
    pub list: String,
    #[serde(default)]
    pub status: SoftwareListStatus,
    #[serde(default)]
    pub filter: Option<String>,
}

/// Default card rule; the first rule matching the mounted image wins
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeRule {
    /// `list:software` prefix of a mounted software list item
    #[serde(default)]
    pub software: Option<String>,
    /// File extension of a mounted file
    #[serde(default)]
    pub extension: Option<String>,
    /// Hash file metadata of the mounted image
    #[serde(default)]
    pub extrainfo: Option<String>,
    pub card: String,
}

impl ProbeRule {
    fn has_condition(&self) -> bool {
        self.software.is_some() || self.extension.is_some() || self.extrainfo.is_some()
    }

    fn matches(&self, hook: &DefaultCardSoftwareHook) -> bool {
        if let Some(software) = &self.software {
            let path = hook.image_path();
            let prefixed = path
                .strip_prefix(software.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with(':'));
            if !hook.is_software_list_item() || !prefixed {
                return false;
            }
        }
        if let Some(extension) = &self.extension {
            if !hook
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
            {
                return false;
            }
        }
        if let Some(extrainfo) = &self.extrainfo {
            if hook.hashfile_extrainfo().as_deref() != Some(extrainfo.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Hash file metadata for one image path
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtraInfoDecl {
    #[serde(default)]
    pub system: Option<String>,
    pub path: String,
    pub info: String,
}

#[derive(Debug)]
struct ProbeRules(Vec<ProbeRule>);

impl DefaultCardProbe for ProbeRules {
    fn default_card_software(&self, hook: &DefaultCardSoftwareHook) -> String {
        if hook.image_path().is_empty() {
            return String::new();
        }
        self.0
            .iter()
            .find(|rule| rule.matches(hook))
            .map(|rule| rule.card.clone())
            .unwrap_or_default()
    }
}

/// Machine catalog backed by a TOML document
#[derive(Debug)]
pub struct TomlCatalog {
    systems: Vec<(Rc<GameDriver>, SystemDecl)>,
    cards: HashMap<String, CardDecl>,
    lists: HashMap<String, Rc<SoftwareList>>,
    extrainfo: Vec<ExtraInfoDecl>,
}

impl TomlCatalog {
    /// Parse and validate a catalog document
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(text)?;
        Self::from_file(file)
    }

    /// Load a catalog from disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        log::info!("Loading machine catalog from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_str(&text)
    }

    /// Validate an already parsed document
    pub fn from_file(file: CatalogFile) -> Result<Self> {
        let mut cards = HashMap::new();
        for card in file.cards {
            let name = card.name.clone();
            if cards.insert(name.clone(), card).is_some() {
                return Err(invalid(format!("duplicate card '{}'", name)));
            }
        }

        let mut lists = HashMap::new();
        for list in file.softlists {
            let name = list.name.clone();
            if lists.insert(name.clone(), Rc::new(list)).is_some() {
                return Err(invalid(format!("duplicate software list '{}'", name)));
            }
        }

        let mut names = HashSet::new();
        let mut systems = Vec::new();
        for system in file.systems {
            if !names.insert(system.name.to_ascii_lowercase()) {
                return Err(invalid(format!("duplicate system '{}'", system.name)));
            }
            let driver = Rc::new(GameDriver::new(&system.name, &system.description));
            systems.push((driver, system));
        }

        let catalog = Self {
            systems,
            cards,
            lists,
            extrainfo: file.extrainfo,
        };
        catalog.validate()?;

        log::debug!(
            "Catalog: {} systems, {} cards, {} software lists",
            catalog.systems.len(),
            catalog.cards.len(),
            catalog.lists.len()
        );
        Ok(catalog)
    }

    fn validate(&self) -> Result<()> {
        for (driver, system) in &self.systems {
            self.validate_devices(&driver.name, &system.slots, &system.softlists)?;
        }
        for card in self.cards.values() {
            self.validate_devices(&card.name, &card.slots, &card.softlists)?;
        }
        Ok(())
    }

    fn validate_devices(&self, owner: &str, slots: &[SlotDecl], softlists: &[SoftlistAttach]) -> Result<()> {
        for slot in slots {
            if slot.name.is_empty() || slot.name.contains(':') {
                return Err(invalid(format!("{}: bad slot name '{}'", owner, slot.name)));
            }

            let referenced = slot
                .default
                .iter()
                .chain(slot.options.iter())
                .chain(slot.probe.iter().map(|rule| &rule.card))
                .filter(|card| !card.is_empty());
            for card in referenced {
                if !self.cards.contains_key(card) {
                    return Err(invalid(format!(
                        "{}: slot '{}' references unknown card '{}'",
                        owner, slot.name, card
                    )));
                }
            }

            if let Some(rule) = slot.probe.iter().find(|rule| !rule.has_condition()) {
                return Err(invalid(format!(
                    "{}: slot '{}' has a probe rule for '{}' without a condition",
                    owner, slot.name, rule.card
                )));
            }
        }

        for attach in softlists {
            if !self.lists.contains_key(&attach.list) {
                return Err(invalid(format!(
                    "{}: unknown software list '{}'",
                    owner, attach.list
                )));
            }
        }
        Ok(())
    }

    /// Names of all systems, in declaration order
    pub fn system_names(&self) -> impl Iterator<Item = &str> {
        self.systems.iter().map(|(driver, _)| driver.name.as_str())
    }

    pub fn card_description(&self, card: &str) -> Option<&str> {
        self.cards.get(card).map(|decl| decl.description.as_str())
    }

    fn system_decl(&self, system: &GameDriver) -> Option<&SystemDecl> {
        self.systems
            .iter()
            .find(|(driver, _)| driver.name == system.name)
            .map(|(_, decl)| decl)
    }

    #[allow(clippy::too_many_arguments)]
    fn expand(
        &self,
        prefix: &str,
        slots: &[SlotDecl],
        images: &[ImageDecl],
        softlists: &[SoftlistAttach],
        selections: &dyn SlotSelections,
        config: &mut MachineConfig,
        depth: usize,
    ) {
        for image in images {
            config.add_image(image.device().with_owner(prefix));
        }

        for decl in slots {
            let slot_name = if prefix.is_empty() {
                decl.name.clone()
            } else {
                format!("{}:{}", prefix, decl.name)
            };

            let mut slot = SlotDevice::new(&slot_name, decl.fixed, decl.default.as_deref());
            if let Some(image) = &decl.image {
                slot = slot.with_image(config.add_image(image.device().with_owner(prefix)));
            }
            if !decl.probe.is_empty() {
                slot = slot.with_probe(Rc::new(ProbeRules(decl.probe.clone())));
            }
            config.add_slot(slot);

            let card_name = match selections.slot_selection(&slot_name) {
                Some(selection) => selection.card,
                None => decl.default.clone().unwrap_or_default(),
            };
            if card_name.is_empty() {
                continue;
            }

            if !decl.options.is_empty() && !decl.options.contains(&card_name) {
                log::warn!("Card '{}' is not an option for slot '{}'", card_name, slot_name);
                continue;
            }
            let Some(card) = self.cards.get(&card_name) else {
                log::warn!("Unknown card '{}' in slot '{}'", card_name, slot_name);
                continue;
            };
            if depth >= MAX_CARD_DEPTH {
                log::warn!("Card nesting too deep at slot '{}'", slot_name);
                continue;
            }

            let card_prefix = format!("{}:{}", slot_name, card_name);
            self.expand(
                &card_prefix,
                &card.slots,
                &card.images,
                &card.softlists,
                selections,
                config,
                depth + 1,
            );
        }

        for attach in softlists {
            if let Some(list) = self.lists.get(&attach.list) {
                config.add_software_list(SoftwareListDevice::new(
                    list.clone(),
                    attach.status,
                    attach.filter.as_deref(),
                ));
            }
        }
    }
}

impl MachineCatalog for TomlCatalog {
    fn find_system(&self, base_name: &str) -> Option<Rc<GameDriver>> {
        self.systems
            .iter()
            .find(|(driver, _)| driver.name.eq_ignore_ascii_case(base_name))
            .map(|(driver, _)| driver.clone())
    }

    fn machine_config(&self, system: &GameDriver, selections: &dyn SlotSelections) -> MachineConfig {
        let mut config = MachineConfig::new();
        match self.system_decl(system) {
            Some(decl) => self.expand(
                "",
                &decl.slots,
                &decl.images,
                &decl.softlists,
                selections,
                &mut config,
                0,
            ),
            None => log::warn!("System '{}' is not part of this catalog", system.name),
        }
        config
    }

    fn hashfile_extrainfo(&self, system: &GameDriver, _image: &ImageDevice, path: &str) -> Option<String> {
        self.extrainfo
            .iter()
            .find(|entry| {
                entry.path == path
                    && entry
                        .system
                        .as_deref()
                        .is_none_or(|name| name == system.name)
            })
            .map(|entry| entry.info.clone())
    }
}

fn invalid(message: String) -> OptionsError {
    OptionsError::InvalidCatalog(message)
}
