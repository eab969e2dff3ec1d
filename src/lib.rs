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

//! Slot and image option resolution for multi-system emulators
//!
//! A system's expansion slots and removable-media devices depend on which
//! cards are plugged in, and the cards may in turn depend on the software
//! being loaded. This library keeps a dynamic option set for those slots and
//! images consistent with the static core options, resolving software list
//! identifiers into concrete slot and image assignments.
//!
//! # Example
//!
//! ```
//! use emuopts::core::{EmuOptions, OptionSupport, TomlCatalog};
//! use std::rc::Rc;
//!
//! let catalog = TomlCatalog::from_str(r#"
//!     [[system]]
//!     name = "console"
//!
//!     [[system.slot]]
//!     name = "cart"
//!     default = "empty"
//!     image = { type = "cartridge", brief = "crt", interface = "console_cart" }
//!     probe = [{ extension = "big", card = "banked" }]
//!
//!     [[card]]
//!     name = "empty"
//!
//!     [[card]]
//!     name = "banked"
//! "#).unwrap();
//!
//! let mut options = EmuOptions::new(Rc::new(catalog), OptionSupport::Full);
//! options.set_system_name("console").unwrap();
//! options.specify_image("cartridge", "game.big", false);
//! assert_eq!(options.slot_option("cart").value(), "banked");
//! ```

pub mod core;
