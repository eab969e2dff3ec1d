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

//! Test fixtures for common test scenarios

use emuopts::core::{EmuOptions, OptionSupport, TomlCatalog};
use std::path::PathBuf;
use std::rc::Rc;

/// Path of the demo catalog shipped with the crate
#[allow(dead_code)]
pub fn demo_catalog_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("catalogs")
        .join("demo.toml")
}

/// Load the demo catalog from disk
#[allow(dead_code)]
pub fn demo_catalog() -> TomlCatalog {
    TomlCatalog::load(demo_catalog_path()).expect("Failed to load demo catalog")
}

/// Create a fully featured options host over the demo catalog
#[allow(dead_code)]
pub fn create_options() -> EmuOptions {
    EmuOptions::new(Rc::new(demo_catalog()), OptionSupport::Full)
}

/// Create an options host with `system` selected
#[allow(dead_code)]
pub fn create_options_for(system: &str) -> EmuOptions {
    let mut options = create_options();
    options
        .set_system_name(system)
        .expect("Failed to select system");
    options
}
