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

//! Options host test modules
//!
//! - `system`: system selection and slot/image reconciliation
//! - `software`: software list loading and distribution
//! - `entries`: registry access to every option kind

use super::*;
use crate::core::catalog::TomlCatalog;

const DEMO: &str = include_str!("../../../../catalogs/demo.toml");

/// Options host over the demo catalog
pub(super) fn demo_options(support: OptionSupport) -> EmuOptions {
    let catalog = TomlCatalog::from_str(DEMO).unwrap();
    EmuOptions::new(Rc::new(catalog), support)
}

/// Full options host with `system` selected
pub(super) fn with_system(system: &str) -> EmuOptions {
    let mut options = demo_options(OptionSupport::Full);
    options.set_system_name(system).unwrap();
    options
}

pub(super) fn image_names(options: &EmuOptions) -> Vec<&str> {
    options.image_options().map(|(name, _)| name).collect()
}

pub(super) fn slot_names(options: &EmuOptions) -> Vec<&str> {
    options.slot_options().map(|(name, _)| name).collect()
}


#[cfg(test)]
mod software;

#[cfg(test)]
mod system;
