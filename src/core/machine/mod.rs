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

//! Machine configuration contracts
//!
//! The options host never builds device topologies itself. It asks a
//! [`MachineCatalog`] to resolve system names and to instantiate a
//! [`MachineConfig`] for the current slot selections, then walks the slot
//! devices, image devices and software lists that configuration exposes.
//!
//! # Example
//!
//! ```
//! use emuopts::core::machine::{ImageDevice, ImageFlags, MachineConfig, SlotDevice};
//!
//! let mut config = MachineConfig::new();
//! config.add_slot(SlotDevice::new("exp", false, Some("empty")));
//! config.add_image(ImageDevice::new("cartridge", "cart", Some("nes_cart"), ImageFlags::USER_LOADABLE));
//! config.add_image(ImageDevice::new("cartridge", "cart", Some("nes_cart"), ImageFlags::USER_LOADABLE));
//!
//! assert_eq!(config.slots().len(), 1);
//! assert_eq!(config.images()[1].instance_name, "cartridge2");
//! ```

mod naming;

pub use naming::assign_instance_names;

use super::softlist::SoftwareListDevice;
use bitflags::bitflags;
use std::fmt;
use std::rc::Rc;

/// System descriptor (the driver a system name resolves to)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameDriver {
    pub name: String,
    pub description: String,
}

impl GameDriver {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

/// Card selected for a slot, as currently resolved by the options host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotSelection {
    pub card: String,
    pub bios: Option<String>,
}

/// Read access to the current slot selections while a configuration is built
pub trait SlotSelections {
    /// Current selection for `slot_name`, or `None` if the slot is not
    /// tracked yet (the device's static default applies then)
    fn slot_selection(&self, slot_name: &str) -> Option<SlotSelection>;
}

/// Information handed to a slot device when it picks a default card
pub struct DefaultCardSoftwareHook<'a> {
    image_path: String,
    extrainfo: Option<Box<dyn Fn() -> Option<String> + 'a>>,
}

impl<'a> DefaultCardSoftwareHook<'a> {
    pub fn new(image_path: &str, extrainfo: Option<Box<dyn Fn() -> Option<String> + 'a>>) -> Self {
        Self {
            image_path: image_path.to_string(),
            extrainfo,
        }
    }

    /// Path (or `list:software:part` identifier) of the mounted image, empty if none
    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    /// Whether the mounted image names a software list item rather than a file
    pub fn is_software_list_item(&self) -> bool {
        !self.image_path.is_empty()
            && self.image_path.contains(':')
            && !self.image_path.contains(['/', '\\'])
    }

    /// Lower-case file extension of the mounted image
    pub fn extension(&self) -> Option<String> {
        if self.is_software_list_item() {
            return None;
        }
        let file_name = self
            .image_path
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.image_path);
        file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }

    /// Hash file metadata for the mounted image, if any
    pub fn hashfile_extrainfo(&self) -> Option<String> {
        if self.image_path.is_empty() {
            return None;
        }
        self.extrainfo.as_ref().and_then(|lookup| lookup())
    }
}

/// Slot device behaviour choosing a card from the mounted image
pub trait DefaultCardProbe {
    /// Preferred card for the mounted image, or an empty string for no preference
    fn default_card_software(&self, hook: &DefaultCardSoftwareHook) -> String;
}

/// A slot in the device topology
#[derive(Clone)]
pub struct SlotDevice {
    /// Full slot name (`exp`, `exp:card:child`), stable across reconfiguration
    pub slot_name: String,
    /// Fixed slots are not user-selectable
    pub fixed: bool,
    /// Static default card
    pub default_option: Option<String>,
    /// Index (into [`MachineConfig::images`]) of the image device this slot device also implements
    pub image: Option<usize>,
    pub probe: Option<Rc<dyn DefaultCardProbe>>,
}

impl SlotDevice {
    pub fn new(slot_name: &str, fixed: bool, default_option: Option<&str>) -> Self {
        Self {
            slot_name: slot_name.to_string(),
            fixed,
            default_option: default_option.map(str::to_string),
            image: None,
            probe: None,
        }
    }

    pub fn with_image(mut self, image_index: usize) -> Self {
        self.image = Some(image_index);
        self
    }

    pub fn with_probe(mut self, probe: Rc<dyn DefaultCardProbe>) -> Self {
        self.probe = Some(probe);
        self
    }

    pub fn default_card_software(&self, hook: &DefaultCardSoftwareHook) -> String {
        self.probe
            .as_ref()
            .map(|probe| probe.default_card_software(hook))
            .unwrap_or_default()
    }
}

impl fmt::Debug for SlotDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotDevice")
            .field("slot_name", &self.slot_name)
            .field("fixed", &self.fixed)
            .field("default_option", &self.default_option)
            .field("image", &self.image)
            .field("probe", &self.probe.is_some())
            .finish()
    }
}

bitflags! {
    /// Image device capabilities
    #[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
    pub struct ImageFlags: u8 {
        const USER_LOADABLE  = 1 << 0;
        const READABLE       = 1 << 1;
        const WRITEABLE      = 1 << 2;
        const CREATABLE      = 1 << 3;
        const MUST_BE_LOADED = 1 << 4;
    }
}

/// A removable-media device in the topology
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDevice {
    /// Device type name (`cartridge`)
    pub type_name: String,
    /// Brief type name (`cart`)
    pub brief_type_name: String,
    /// Display name; shifts when siblings of the same type come and go
    pub instance_name: String,
    pub brief_instance_name: String,
    /// Suffix-stable name, numbered within the owner
    pub canonical_instance_name: String,
    /// Path of the card that brought the device along, empty for the system itself
    pub owner: String,
    /// Software list interface accepted by this device
    pub interface: Option<String>,
    pub flags: ImageFlags,
}

impl ImageDevice {
    /// Create an unnamed device; names are assigned when it joins a [`MachineConfig`]
    pub fn new(type_name: &str, brief_type_name: &str, interface: Option<&str>, flags: ImageFlags) -> Self {
        Self {
            type_name: type_name.to_string(),
            brief_type_name: brief_type_name.to_string(),
            instance_name: String::new(),
            brief_instance_name: String::new(),
            canonical_instance_name: String::new(),
            owner: String::new(),
            interface: interface.map(str::to_string),
            flags,
        }
    }

    pub fn with_owner(mut self, owner: &str) -> Self {
        self.owner = owner.to_string();
        self
    }

    pub fn user_loadable(&self) -> bool {
        self.flags.contains(ImageFlags::USER_LOADABLE)
    }

    /// Names under which this device is exposed as an option
    ///
    /// A sole device of its type is also reachable through its numbered
    /// names, so `-cart1` keeps working on single-cartridge systems.
    pub fn full_option_names(&self) -> Vec<String> {
        let mut names = vec![
            self.instance_name.clone(),
            self.brief_instance_name.clone(),
        ];
        if self.type_name == self.instance_name {
            names.push(format!("{}1", self.instance_name));
            names.push(format!("{}1", self.brief_instance_name));
        }
        names
    }
}

/// Instantiated device topology for one system and one set of slot selections
#[derive(Debug, Clone, Default)]
pub struct MachineConfig {
    slots: Vec<SlotDevice>,
    images: Vec<ImageDevice>,
    software_lists: Vec<SoftwareListDevice>,
}

impl MachineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_slot(&mut self, slot: SlotDevice) {
        self.slots.push(slot);
    }

    /// Add an image device and rename its siblings
    pub fn add_image(&mut self, image: ImageDevice) -> usize {
        self.images.push(image);
        assign_instance_names(&mut self.images);
        self.images.len() - 1
    }

    pub fn add_software_list(&mut self, list: SoftwareListDevice) {
        self.software_lists.push(list);
    }

    pub fn slots(&self) -> &[SlotDevice] {
        &self.slots
    }

    pub fn images(&self) -> &[ImageDevice] {
        &self.images
    }

    pub fn software_lists(&self) -> &[SoftwareListDevice] {
        &self.software_lists
    }

    pub fn image(&self, instance_name: &str) -> Option<&ImageDevice> {
        self.images
            .iter()
            .find(|image| image.instance_name == instance_name)
    }

    /// Image device implemented by a slot device, if any
    pub fn slot_image(&self, slot: &SlotDevice) -> Option<&ImageDevice> {
        slot.image.and_then(|index| self.images.get(index))
    }
}

/// System lookup and configuration-tree provider
pub trait MachineCatalog {
    /// Resolve a system base name
    fn find_system(&self, base_name: &str) -> Option<Rc<GameDriver>>;

    /// Instantiate the device topology for `system` under the current selections
    fn machine_config(&self, system: &GameDriver, selections: &dyn SlotSelections) -> MachineConfig;

    /// Hash file metadata for the content at `path` mounted in `image`
    fn hashfile_extrainfo(&self, _system: &GameDriver, _image: &ImageDevice, _path: &str) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ExtensionProbe;

    impl DefaultCardProbe for ExtensionProbe {
        fn default_card_software(&self, hook: &DefaultCardSoftwareHook) -> String {
            match hook.extension().as_deref() {
                Some("sfc") => "lorom".to_string(),
                _ => String::new(),
            }
        }
    }

    #[test]
    fn test_hook_path_classification() {
        let hook = DefaultCardSoftwareHook::new("snes:zelda:cart", None);
        assert!(hook.is_software_list_item());
        assert_eq!(hook.extension(), None);

        let hook = DefaultCardSoftwareHook::new("/roms/Zelda.SFC", None);
        assert!(!hook.is_software_list_item());
        assert_eq!(hook.extension().as_deref(), Some("sfc"));

        let hook = DefaultCardSoftwareHook::new("", None);
        assert!(!hook.is_software_list_item());
        assert_eq!(hook.hashfile_extrainfo(), None);
    }

    #[test]
    fn test_hook_extrainfo_lookup() {
        let hook = DefaultCardSoftwareHook::new("game.bin", Some(Box::new(|| Some("ram".to_string()))));
        assert_eq!(hook.hashfile_extrainfo().as_deref(), Some("ram"));
    }

    #[test]
    fn test_slot_without_probe_has_no_preference() {
        let slot = SlotDevice::new("exp", false, Some("empty"));
        let hook = DefaultCardSoftwareHook::new("game.sfc", None);
        assert_eq!(slot.default_card_software(&hook), "");

        let slot = slot.with_probe(Rc::new(ExtensionProbe));
        assert_eq!(slot.default_card_software(&hook), "lorom");
    }

    #[test]
    fn test_full_option_names() {
        let mut config = MachineConfig::new();
        let index = config.add_image(ImageDevice::new("cartridge", "cart", None, ImageFlags::USER_LOADABLE));
        assert_eq!(
            config.images()[index].full_option_names(),
            vec!["cartridge", "cart", "cartridge1", "cart1"]
        );

        config.add_image(ImageDevice::new("cartridge", "cart", None, ImageFlags::USER_LOADABLE));
        assert_eq!(
            config.images()[index].full_option_names(),
            vec!["cartridge1", "cart1"]
        );

        let slot = SlotDevice::new("cart2", false, None).with_image(1);
        assert_eq!(config.slot_image(&slot).unwrap().instance_name, "cartridge2");
        assert!(config.slot_image(&SlotDevice::new("exp", false, None)).is_none());
    }
}
