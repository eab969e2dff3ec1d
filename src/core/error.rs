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

/// Option resolution error types
use thiserror::Error;

/// Result type for option operations
pub type Result<T> = std::result::Result<T, OptionsError>;

/// Main error type for option resolution
///
/// Every variant describes bad input (a user-supplied name or value, or a
/// malformed catalog). Defects in device or driver definitions are not
/// represented here; those panic at the point of detection.
#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("Unknown system '{0}'")]
    UnknownSystem(String),

    #[error("Cannot specify software without specifying system")]
    SoftwareWithoutSystem,

    #[error("Unknown option: {0} (system has no software lists)")]
    NoSoftwareLists(String),

    #[error("Software '{name}' not found{}", format_suggestions(.suggestions))]
    SoftwareNotFound {
        name: String,
        suggestions: Vec<String>,
    },

    #[error("Software '{software}' is incompatible with system '{system}'")]
    IncompatibleSoftware { software: String, system: String },

    #[error("Could not assign software option")]
    CouldNotAssignSoftware,

    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Illegal value for option '{name}': '{value}' ({reason})")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },

    #[error("Out-of-range value for option '{name}': '{value}' (must be between {min} and {max})")]
    OutOfRange {
        name: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog parse error: {0}")]
    CatalogParse(#[from] toml::de::Error),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!("; similar: {}", suggestions.join(", "))
    }
}
