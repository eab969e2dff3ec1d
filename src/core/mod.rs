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

//! Option resolution components
//!
//! Leaves first:
//! - Option registry (named, typed, priority-gated values)
//! - Slot and image options
//! - Machine contracts and the TOML machine catalog
//! - Software lists and the software identifier resolver
//! - The options host reconciling all of the above

pub mod catalog;
pub mod emu_options;
pub mod error;
pub mod image;
pub mod machine;
pub mod registry;
pub mod slot;
pub mod softlist;

// Re-export commonly used types
pub use catalog::TomlCatalog;
pub use emu_options::{EmuOptions, OptionSupport, ResolvedConfiguration};
pub use error::{OptionsError, Result};
pub use image::ImageOption;
pub use machine::{GameDriver, MachineCatalog, MachineConfig};
pub use registry::{priority, CoreOptions, OptionEntry, OptionType};
pub use slot::SlotOption;
