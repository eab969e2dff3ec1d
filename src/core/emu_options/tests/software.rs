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

//! Software list loading tests

use super::super::*;
use super::{demo_options, image_names, with_system};
use crate::core::catalog::TomlCatalog;
use crate::core::registry::priority;

#[test]
fn test_software_selects_default_card() {
    let mut options = with_system("demo");
    assert_eq!(options.slot_option("cart").value(), "empty");

    options.set_software("mylist:game1").unwrap();

    let cart = options.slot_option("cart");
    assert_eq!(cart.value(), "cartridge_with_ram");
    assert_eq!(cart.default_card_software(), "cartridge_with_ram");
    assert!(!cart.specified());
    assert_eq!(options.image_option("cartridge").value(), "mylist:game1:cart");
    assert_eq!(
        options.slot_option("cart:cartridge_with_ram:ramexp").value(),
        "ram64k"
    );
    assert_eq!(options.software_name(), "mylist:game1");
    assert_eq!(options.value(OPTION_SOFTWARENAME).as_deref(), Some("mylist:game1"));
}

#[test]
fn test_unqualified_name_searches_all_lists() {
    let mut options = with_system("demo");
    options.set_software("game1").unwrap();
    assert_eq!(options.image_option("cartridge").value(), "mylist:game1:cart");
}

#[test]
fn test_software_assignment_is_pegged() {
    let mut options = with_system("demo");
    options.set_software("mylist:game1").unwrap();

    let entry = options.image_option("cartridge").option_entry().unwrap();
    assert_eq!(entry.borrow().priority(), priority::MAXIMUM);

    let written = options
        .set_value("cartridge", "roms/other.bin", priority::CMDLINE)
        .unwrap();
    assert!(!written);
    assert_eq!(options.image_option("cartridge").value(), "mylist:game1:cart");
}

#[test]
fn test_unknown_software_leaves_options_untouched() {
    let mut options = with_system("demo");
    let before = options.resolved_configuration();

    let err = options.set_software("game2").unwrap_err();
    match err {
        OptionsError::SoftwareNotFound { name, suggestions } => {
            assert_eq!(name, "game2");
            assert!(suggestions.contains(&"mylist:game1".to_string()));
        }
        other => panic!("unexpected error: {}", other),
    }

    assert_eq!(options.resolved_configuration(), before);
    assert_eq!(options.software_name(), "");
}

#[test]
fn test_requirement_chain_mounts_both() {
    let mut options = with_system("demo");
    options.set_software("mylist:game3").unwrap();

    assert_eq!(options.image_option("floppydisk").value(), "mylist:game3:flop");
    assert_eq!(options.image_option("cartridge").value(), "mylist:game4:cart");
    assert_eq!(options.slot_option("cart").value(), "empty");
    assert_eq!(options.software_name(), "mylist:game3");
}

#[test]
fn test_requirement_chain_in_dependency_order() {
    let catalog = TomlCatalog::from_str(
        r#"
        [[system]]
        name = "twin"

        [[system.image]]
        type = "cartridge"
        interface = "twin_cart"

        [[system.image]]
        type = "cartridge"
        interface = "twin_cart"

        [[system.image]]
        type = "cartridge"
        interface = "twin_cart"

        [[system.softlist]]
        list = "twin"

        [[softlist]]
        name = "twin"

        [[softlist.software]]
        name = "episode3"
        [[softlist.software.part]]
        name = "cart"
        interface = "twin_cart"
        features = { requirement = "episode2" }

        [[softlist.software]]
        name = "episode2"
        [[softlist.software.part]]
        name = "cart"
        interface = "twin_cart"
        features = { requirement = "episode1" }

        [[softlist.software]]
        name = "episode1"
        [[softlist.software.part]]
        name = "cart"
        interface = "twin_cart"
        "#,
    )
    .unwrap();
    let mut options = EmuOptions::new(Rc::new(catalog), OptionSupport::Full);
    options.set_system_name("twin").unwrap();
    options.set_software("episode3").unwrap();

    // each title takes the first free drive, so drive order is resolution order
    assert_eq!(options.image_option("cartridge1").value(), "twin:episode3:cart");
    assert_eq!(options.image_option("cartridge2").value(), "twin:episode2:cart");
    assert_eq!(options.image_option("cartridge3").value(), "twin:episode1:cart");
}

#[test]
fn test_shared_feature_selects_slot_card() {
    let mut options = with_system("demo");
    options.set_software("mylist:paddlegame").unwrap();

    let ctrl1 = options.slot_option("ctrl1");
    assert_eq!(ctrl1.value(), "paddle");
    assert!(ctrl1.specified());
}

#[test]
fn test_assignment_to_late_slot_is_deferred() {
    let mut options = with_system("demo");
    assert!(options.find_slot_option("cart:cartridge_with_ram:ramexp").is_none());

    options.set_software("mylist:bigcart").unwrap();

    assert_eq!(options.slot_option("cart").value(), "cartridge_with_ram");
    assert_eq!(
        options.slot_option("cart:cartridge_with_ram:ramexp").value(),
        "ram128k"
    );
}

#[test]
fn test_unassignable_software_fails() {
    let mut options = with_system("demo");
    options
        .set_value("ctrl1", "paddle", priority::CMDLINE)
        .unwrap();
    let before = options.resolved_configuration();
    let priorities = |options: &EmuOptions| -> Vec<(String, i32)> {
        options
            .registry()
            .iter()
            .filter(|entry| !entry.borrow().is_header())
            .map(|entry| {
                let entry = entry.borrow();
                (entry.name().to_string(), entry.priority())
            })
            .collect()
    };
    let before_priorities = priorities(&options);

    // the cart card and image land before the unknown slot stalls the batch
    let err = options.set_software("mylist:ghostslot").unwrap_err();
    assert!(matches!(err, OptionsError::CouldNotAssignSoftware));
    assert_eq!(options.software_name(), "");

    assert_eq!(options.resolved_configuration(), before);
    assert_eq!(priorities(&options), before_priorities);
    assert!(options.find_slot_option("cart:cartridge_with_ram:ramexp").is_none());
    assert!(!options.slot_option("cart").specified());

    // nothing stays pegged
    assert!(options
        .set_value("cartridge", "game.bin", priority::CMDLINE)
        .unwrap());
    assert_eq!(options.image_option("cartridge").value(), "game.bin");
}

#[test]
fn test_filtered_part_is_incompatible() {
    let mut options = with_system("demo");
    let before = options.resolved_configuration();

    let err = options.set_software("mylist:palgame").unwrap_err();
    assert!(matches!(
        err,
        OptionsError::IncompatibleSoftware { ref software, ref system }
            if software == "palgame" && system == "demo"
    ));
    assert_eq!(options.resolved_configuration(), before);
}

#[test]
fn test_empty_software_is_noop() {
    let mut options = with_system("demo");
    options.specify_image("cartridge", "roms/game.bin", false);
    let before = options.resolved_configuration();

    options.set_software("").unwrap();

    assert_eq!(options.resolved_configuration(), before);
    assert_eq!(options.image_option("cartridge").value(), "roms/game.bin");
}

#[test]
fn test_software_without_system() {
    let mut options = demo_options(OptionSupport::Full);
    let err = options.set_software("game1").unwrap_err();
    assert!(matches!(err, OptionsError::SoftwareWithoutSystem));
}

#[test]
fn test_system_without_software_lists() {
    let catalog = TomlCatalog::from_str(
        r#"
        [[system]]
        name = "bare"

        [[system.image]]
        type = "cartridge"
        brief = "cart"
        "#,
    )
    .unwrap();
    let mut options = EmuOptions::new(Rc::new(catalog), OptionSupport::Full);
    options.set_system_name("bare").unwrap();

    let err = options.set_software("game1").unwrap_err();
    assert!(matches!(err, OptionsError::NoSoftwareLists(ref id) if id == "game1"));
}

#[test]
fn test_software_on_card_drives() {
    let mut options = with_system("a2");
    options.set_software("dos33").unwrap();

    assert_eq!(image_names(&options), vec!["floppydisk1", "floppydisk2"]);
    assert_eq!(options.image_option("floppydisk1").value(), "a2_flop:dos33:flop1");
    assert_eq!(options.image_option("floppydisk2").value(), "");
}
