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

use clap::Parser;
use emuopts::core::emu_options::core_entries::{OPTION_SOFTWARENAME, OPTION_SYSTEMNAME};
use emuopts::core::registry::{priority, EntryKind, OptionType};
use emuopts::core::{EmuOptions, OptionSupport, OptionsError, TomlCatalog};
use log::{error, info};
use std::path::PathBuf;
use std::rc::Rc;

const CATALOG_ENV: &str = "EMUOPTS_CATALOG";

/// Slot and image option resolver
#[derive(Parser)]
#[command(name = "emuopts")]
#[command(about = "Resolve slot and image options for an emulated system", long_about = None)]
struct Args {
    /// Machine catalog (TOML); defaults to $EMUOPTS_CATALOG
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// System to configure
    system: Option<String>,

    /// Software list item to load (`name` or `list:name`)
    software: Option<String>,

    /// Plug a card into a slot
    #[arg(long = "slot", value_name = "SLOT=CARD", value_parser = parse_assignment)]
    slots: Vec<(String, String)>,

    /// Mount a file or software list part in an image device
    #[arg(long = "image", value_name = "IMAGE=PATH", value_parser = parse_assignment)]
    images: Vec<(String, String)>,

    /// Set a core option
    #[arg(long = "set", value_name = "OPTION=VALUE", value_parser = parse_assignment)]
    options: Vec<(String, String)>,

    /// Print the resolved configuration as JSON
    #[arg(long)]
    json: bool,

    /// List the slots of the system and their cards
    #[arg(long, conflicts_with = "showusage")]
    listslots: bool,

    /// List the image devices of the system
    #[arg(long, conflicts_with = "showusage")]
    listmedia: bool,

    /// List every core option with its description
    #[arg(long)]
    showusage: bool,
}

fn parse_assignment(text: &str) -> Result<(String, String), String> {
    let (name, value) = text
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", text))?;
    if name.is_empty() {
        return Err(format!("missing option name in '{}'", text));
    }
    Ok((name.to_string(), value.to_string()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present (catalog path, log levels)
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Initialize logger with default level INFO
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let catalog_path = match args.catalog.clone() {
        Some(path) => path,
        None => match std::env::var(CATALOG_ENV) {
            Ok(path) => PathBuf::from(path),
            Err(_) => {
                error!("No machine catalog given (use --catalog or set {})", CATALOG_ENV);
                return Err("missing machine catalog".into());
            }
        },
    };

    let catalog = TomlCatalog::load(&catalog_path).map_err(|e| {
        error!("Failed to load catalog {}: {}", catalog_path.display(), e);
        e
    })?;

    let mut options = EmuOptions::new(Rc::new(catalog), OptionSupport::Full);

    if args.showusage {
        show_usage(&options);
        return Ok(());
    }

    if let Err(e) = configure(&mut options, &args) {
        error!("{}", e);
        return Err(Box::new(e));
    }

    if args.listslots || args.listmedia {
        if args.listslots {
            list_slots(&options);
        }
        if args.listmedia {
            list_media(&options);
        }
    } else if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&options.resolved_configuration())?
        );
    } else {
        print_summary(&options);
    }

    Ok(())
}

/// Apply the command line in dependency order: system, core options,
/// slots, images, then software
fn configure(options: &mut EmuOptions, args: &Args) -> Result<(), OptionsError> {
    if let Some(system) = &args.system {
        options.set_value(OPTION_SYSTEMNAME, system, priority::CMDLINE)?;
    }

    for (name, value) in &args.options {
        options.set_value(name, value, priority::CMDLINE)?;
    }

    for (name, card) in &args.slots {
        expect_kind(options, name, |kind| matches!(kind, EntryKind::Slot(_)))?;
        options.set_value(name, card, priority::CMDLINE)?;
    }

    for (name, path) in &args.images {
        expect_kind(options, name, |kind| matches!(kind, EntryKind::Image(_)))?;
        options.set_value(name, path, priority::CMDLINE)?;
    }

    if let Some(software) = &args.software {
        options.set_value(OPTION_SOFTWARENAME, software, priority::CMDLINE)?;
    }

    Ok(())
}

fn expect_kind<F>(options: &EmuOptions, name: &str, accept: F) -> Result<(), OptionsError>
where
    F: Fn(&EntryKind) -> bool,
{
    let accepted = options
        .registry()
        .find_entry(name)
        .is_some_and(|entry| accept(entry.borrow().kind()));
    if accepted {
        Ok(())
    } else {
        Err(OptionsError::UnknownOption(name.to_string()))
    }
}

fn show_usage(options: &EmuOptions) {
    for entry in options.registry().iter() {
        let entry = entry.borrow();
        if entry.is_header() {
            println!();
            println!("#");
            println!("# {}", entry.description().unwrap_or_default());
            println!("#");
            continue;
        }
        if *entry.kind() != EntryKind::Simple {
            continue;
        }

        let kind = match entry.option_type() {
            OptionType::Boolean => "<bool>",
            OptionType::Integer => "<int>",
            OptionType::Float => "<float>",
            _ => "<value>",
        };
        println!(
            "-{:<28} {:<8} {}",
            entry.names().join(" / -"),
            kind,
            entry.description().unwrap_or_default()
        );
    }
}

fn list_slots(options: &EmuOptions) {
    let Some(config) = options.machine_config() else {
        println!("No system selected");
        return;
    };

    println!("{:<16} {:<32} {}", "SYSTEM", "SLOT NAME", "CARD");
    for slot in config.slots() {
        let option = options.slot_option(&slot.slot_name);
        let mut card = option.value().to_string();
        if card.is_empty() {
            card = "[none]".to_string();
        }
        if slot.fixed {
            card.push_str(" (fixed)");
        } else if option.specified() {
            card.push_str(" (specified)");
        } else if !option.default_card_software().is_empty() {
            card.push_str(" (from software)");
        }
        println!("{:<16} {:<32} {}", options.system_name(), slot.slot_name, card);
    }
}

fn list_media(options: &EmuOptions) {
    let Some(config) = options.machine_config() else {
        println!("No system selected");
        return;
    };

    println!(
        "{:<16} {:<24} {:<10} {:<16} {}",
        "SYSTEM", "MEDIA NAME", "(BRIEF)", "INTERFACE", "MOUNTED"
    );
    for image in config.images() {
        let mounted = options
            .find_image_option(&image.instance_name)
            .map(|option| option.value().to_string())
            .unwrap_or_default();
        println!(
            "{:<16} {:<24} {:<10} {:<16} {}",
            options.system_name(),
            image.instance_name,
            format!("({})", image.brief_instance_name),
            image.interface.as_deref().unwrap_or("-"),
            mounted
        );
    }
}

fn print_summary(options: &EmuOptions) {
    let resolved = options.resolved_configuration();
    let Some(system) = &resolved.system else {
        info!("No system selected");
        return;
    };

    println!("System:   {}", system);
    if let Some(software) = &resolved.software {
        println!("Software: {}", software);
    }
    for slot in &resolved.slots {
        match &slot.bios {
            Some(bios) => println!("  -{} {},bios={}", slot.name, slot.card, bios),
            None => println!("  -{} {}", slot.name, slot.card),
        }
    }
    for image in resolved.images.iter().filter(|image| !image.value.is_empty()) {
        println!("  -{} {}", image.name, image.value);
    }
}
