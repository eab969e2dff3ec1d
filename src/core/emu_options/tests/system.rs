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

//! System selection and reconciliation tests

use super::super::*;
use super::{demo_options, image_names, slot_names, with_system};
use crate::core::registry::priority;

#[test]
fn test_support_levels_register_name_entries() {
    let options = demo_options(OptionSupport::Full);
    assert!(options.registry().find_entry(OPTION_SYSTEMNAME).is_some());
    assert!(options.registry().find_entry(OPTION_SOFTWARENAME).is_some());
    assert_eq!(options.value(OPTION_SYSTEMNAME).as_deref(), Some(""));

    let options = demo_options(OptionSupport::GeneralAndSystem);
    assert!(options.registry().find_entry(OPTION_SYSTEMNAME).is_some());
    assert!(options.registry().find_entry(OPTION_SOFTWARENAME).is_none());

    let options = demo_options(OptionSupport::GeneralOnly);
    assert!(options.registry().find_entry(OPTION_SYSTEMNAME).is_none());
    assert_eq!(options.int_value("frameskip"), 0);
}

#[test]
fn test_no_software_means_static_default() {
    let options = with_system("demo");

    assert_eq!(slot_names(&options), vec!["bus", "cart", "ctrl1", "exp"]);
    assert_eq!(options.slot_option("cart").value(), "empty");
    assert_eq!(options.slot_option("ctrl1").value(), "joypad");
    assert_eq!(options.slot_option("exp").value(), "");
    assert!(!options.slot_option("cart").specified());
    assert_eq!(image_names(&options), vec!["cartridge", "floppydisk"]);
}

#[test]
fn test_fixed_slots_stay_out_of_registry() {
    let options = with_system("demo");
    let registry = options.registry();

    assert!(options.find_slot_option("bus").is_some());
    assert!(registry.find_entry("bus").is_none());
    assert!(registry.find_entry("cart").is_some());
    assert!(registry.header_exists(SLOT_DEVICES_HEADER));
    assert!(registry.header_exists(IMAGE_DEVICES_HEADER));

    for name in ["cartridge", "crt", "cartridge1", "crt1", "floppydisk", "flop"] {
        assert!(registry.find_entry(name).is_some(), "missing {}", name);
    }
}

#[test]
fn test_slot_entries_follow_their_header() {
    let options = with_system("demo");
    let names: Vec<String> = options
        .registry()
        .iter()
        .map(|entry| {
            let entry = entry.borrow();
            if entry.is_header() {
                format!("#{}", entry.description().unwrap_or_default())
            } else {
                entry.name().to_string()
            }
        })
        .collect();

    let header = names
        .iter()
        .position(|name| name == &format!("#{}", SLOT_DEVICES_HEADER))
        .unwrap();
    assert_eq!(&names[header + 1..header + 4], &["cart", "ctrl1", "exp"]);
}

#[test]
fn test_unknown_system_keeps_state() {
    let mut options = with_system("demo");
    let before = options.resolved_configuration();

    let err = options.set_system_name("nosuchsystem").unwrap_err();
    assert!(matches!(err, OptionsError::UnknownSystem(ref name) if name == "nosuchsystem"));
    assert_eq!(options.attempted_system_name(), "nosuchsystem");
    assert_eq!(options.system_name(), "demo");
    assert_eq!(options.resolved_configuration(), before);
}

#[test]
fn test_system_name_is_base_name() {
    let mut options = demo_options(OptionSupport::Full);
    options.set_system_name("/roms/DEMO.zip").unwrap();
    assert_eq!(options.system_name(), "demo");
    assert_eq!(options.attempted_system_name(), "/roms/DEMO.zip");

    assert_eq!(system_base_name("a2"), "a2");
    assert_eq!(system_base_name("C:\\roms\\a2.7z"), "a2");
    assert_eq!(system_base_name(".hidden"), ".hidden");
}

#[test]
fn test_clearing_system_purges_everything() {
    let mut options = with_system("demo");
    options.specify_slot("cart", "cartridge_with_ram", false);
    assert!(options.find_slot_option("cart:cartridge_with_ram:ramexp").is_some());

    options.set_system_name("").unwrap();

    assert!(options.system().is_none());
    assert_eq!(options.slot_options().count(), 0);
    assert_eq!(options.image_options().count(), 0);
    for name in ["cart", "ctrl1", "cart:cartridge_with_ram:ramexp", "cartridge", "crt", "floppydisk"] {
        assert!(options.registry().find_entry(name).is_none(), "left behind: {}", name);
    }
}

#[test]
fn test_switching_systems_replaces_options() {
    let mut options = with_system("demo");
    options.set_software("mylist:game4").unwrap();
    assert_eq!(options.software_name(), "mylist:game4");

    options.set_system_name("a2").unwrap();

    assert_eq!(options.software_name(), "");
    assert_eq!(slot_names(&options), vec!["sl1", "sl2", "sl3", "sl6"]);
    assert_eq!(image_names(&options), vec!["floppydisk1", "floppydisk2"]);
    assert!(options.registry().find_entry("cart").is_none());
}

#[test]
fn test_reselecting_same_system_keeps_software() {
    let mut options = with_system("demo");
    options.set_software("mylist:game4").unwrap();
    options.set_system_name("demo").unwrap();
    assert_eq!(options.software_name(), "mylist:game4");
}

#[test]
fn test_general_and_system_skips_reconciliation() {
    let mut options = demo_options(OptionSupport::GeneralAndSystem);
    options.set_system_name("demo").unwrap();
    assert_eq!(options.system_name(), "demo");
    assert_eq!(options.slot_options().count(), 0);
    assert_eq!(options.image_options().count(), 0);
}

#[test]
fn test_reconciliation_is_idempotent() {
    let mut options = with_system("demo");
    options.specify_slot("exp", "floppy_exp", false);

    assert!(!options.add_and_remove_slot_options());
    assert!(!options.add_and_remove_image_options());
    assert!(!options.add_and_remove_slot_options());
}

#[test]
fn test_selected_card_exposes_child_slot() {
    let mut options = with_system("demo");
    options.specify_slot("cart", "cartridge_with_ram", false);

    let child = options.slot_option("cart:cartridge_with_ram:ramexp");
    assert_eq!(child.value(), "ram64k");
    assert!(child.option_entry().is_some());

    options.specify_slot("cart", "empty", false);
    assert!(options.find_slot_option("cart:cartridge_with_ram:ramexp").is_none());
    assert!(options
        .registry()
        .find_entry("cart:cartridge_with_ram:ramexp")
        .is_none());
}

#[test]
fn test_canonical_names_survive_new_siblings() {
    let mut options = with_system("demo");
    options.specify_image("floppydisk", "disks/boot.img", false);

    options.specify_slot("exp", "floppy_exp", false);

    assert_eq!(
        image_names(&options),
        vec!["cartridge", "floppydisk1", "floppydisk2"]
    );
    assert!(options.find_image_option("floppydisk").is_none());

    let first = options.image_option("floppydisk1");
    assert_eq!(first.canonical_instance_name(), "floppydisk1");
    assert_eq!(first.value(), "disks/boot.img");
    assert_eq!(options.image_option("floppydisk2").value(), "");

    // registry names follow the display names
    assert_eq!(options.value("flop1").as_deref(), Some("disks/boot.img"));
    assert!(options.registry().find_entry("flop").is_none());
    assert!(options.registry().find_entry("flop2").is_some());

    options.specify_slot("exp", "", false);
    assert_eq!(image_names(&options), vec!["cartridge", "floppydisk"]);
    assert_eq!(options.image_option("floppydisk").value(), "disks/boot.img");
    assert_eq!(options.value("flop").as_deref(), Some("disks/boot.img"));
    assert!(options.registry().find_entry("flop2").is_none());
}

#[test]
fn test_card_in_earlier_slot_keeps_mounted_media() {
    let mut options = with_system("a2");
    options.specify_image("floppydisk1", "boot.dsk", false);
    options
        .set_value("flop2", "data.dsk", priority::CMDLINE)
        .unwrap();

    options.specify_slot("sl3", "diskii", false);

    assert_eq!(
        image_names(&options),
        vec!["floppydisk1", "floppydisk2", "floppydisk3", "floppydisk4"]
    );
    assert_eq!(options.image_option("floppydisk1").value(), "");
    assert_eq!(options.image_option("floppydisk2").value(), "");
    assert_eq!(options.image_option("floppydisk3").value(), "boot.dsk");
    assert_eq!(
        options.image_option("floppydisk3").canonical_instance_name(),
        "sl6:diskii/floppydisk1"
    );
    assert_eq!(options.value("flop4").as_deref(), Some("data.dsk"));

    // the renamed entry keeps the priority it was written at
    let entry = options.image_option("floppydisk4").option_entry().unwrap();
    assert_eq!(entry.borrow().priority(), priority::CMDLINE);

    options.specify_slot("sl3", "", false);
    assert_eq!(options.image_option("floppydisk1").value(), "boot.dsk");
    assert_eq!(options.value("flop2").as_deref(), Some("data.dsk"));
}

#[test]
fn test_card_images_come_and_go() {
    let mut options = with_system("a2");
    assert_eq!(options.slot_option("sl6").value(), "diskii");

    options.specify_slot("sl3", "diskii", false);
    assert_eq!(
        image_names(&options),
        vec!["floppydisk1", "floppydisk2", "floppydisk3", "floppydisk4"]
    );

    options.specify_slot("sl3", "", false);
    options.specify_slot("sl6", "", false);
    assert_eq!(options.image_options().count(), 0);
}

#[test]
fn test_specify_slot_pegs_priority() {
    let mut options = with_system("demo");
    options.specify_slot("ctrl1", "paddle", true);

    let entry = options.slot_option("ctrl1").option_entry().unwrap();
    assert_eq!(entry.borrow().priority(), priority::MAXIMUM);
    assert!(!options.set_value("ctrl1", "joypad", priority::CMDLINE).unwrap());
    assert_eq!(options.slot_option("ctrl1").value(), "paddle");
}

#[test]
#[should_panic(expected = "non-existent slot option")]
fn test_missing_slot_option_panics() {
    let options = with_system("demo");
    options.slot_option("sl1");
}

#[test]
#[should_panic(expected = "non-existent image option")]
fn test_missing_image_option_panics() {
    let options = with_system("a2");
    options.image_option("cartridge");
}
