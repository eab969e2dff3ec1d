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

//! Core option table
//!
//! Options every system understands, registered when the options host is
//! created, plus cached copies of the handful read on hot paths.

use crate::core::registry::{CoreOptions, OptionSpec, OptionType};
use serde::Serialize;
use std::cell::Cell;
use std::rc::Rc;

/// Unadorned first positional argument: the system name
pub const OPTION_SYSTEMNAME: &str = "<UNADORNED0>";
/// Unadorned second positional argument: the software name
pub const OPTION_SOFTWARENAME: &str = "<UNADORNED1>";

pub const OPTION_READCONFIG: &str = "readconfig";
pub const OPTION_WRITECONFIG: &str = "writeconfig";
pub const OPTION_HOMEPATH: &str = "homepath";
pub const OPTION_MEDIAPATH: &str = "rompath";
pub const OPTION_HASHPATH: &str = "hashpath";
pub const OPTION_SAMPLEPATH: &str = "samplepath";
pub const OPTION_SWPATH: &str = "swpath";
pub const OPTION_CFG_DIRECTORY: &str = "cfg_directory";
pub const OPTION_NVRAM_DIRECTORY: &str = "nvram_directory";
pub const OPTION_STATE_DIRECTORY: &str = "state_directory";
pub const OPTION_SNAPSHOT_DIRECTORY: &str = "snapshot_directory";
pub const OPTION_STATE: &str = "state";
pub const OPTION_AUTOSAVE: &str = "autosave";
pub const OPTION_REWIND: &str = "rewind";
pub const OPTION_REWIND_CAPACITY: &str = "rewind_capacity";
pub const OPTION_PLAYBACK: &str = "playback";
pub const OPTION_RECORD: &str = "record";
pub const OPTION_AUTOFRAMESKIP: &str = "autoframeskip";
pub const OPTION_FRAMESKIP: &str = "frameskip";
pub const OPTION_SECONDS_TO_RUN: &str = "seconds_to_run";
pub const OPTION_THROTTLE: &str = "throttle";
pub const OPTION_SLEEP: &str = "sleep";
pub const OPTION_SPEED: &str = "speed";
pub const OPTION_REFRESHSPEED: &str = "refreshspeed";
pub const OPTION_SAMPLERATE: &str = "samplerate";
pub const OPTION_SAMPLES: &str = "samples";
pub const OPTION_VOLUME: &str = "volume";
pub const OPTION_COIN_LOCKOUT: &str = "coin_lockout";
pub const OPTION_CTRLR: &str = "ctrlr";
pub const OPTION_MOUSE: &str = "mouse";
pub const OPTION_JOYSTICK: &str = "joystick";
pub const OPTION_JOYSTICK_DEADZONE: &str = "joystick_deadzone";
pub const OPTION_JOYSTICK_SATURATION: &str = "joystick_saturation";
pub const OPTION_JOYSTICK_CONTRADICTORY: &str = "joystick_contradictory";
pub const OPTION_COIN_IMPULSE: &str = "coin_impulse";
pub const OPTION_VERBOSE: &str = "verbose";
pub const OPTION_LOG: &str = "log";
pub const OPTION_DEBUG: &str = "debug";
pub const OPTION_BIOS: &str = "bios";
pub const OPTION_CHEAT: &str = "cheat";
pub const OPTION_SKIP_GAMEINFO: &str = "skip_gameinfo";
pub const OPTION_UI_FONT: &str = "uifont";
pub const OPTION_UI: &str = "ui";
pub const OPTION_RAMSIZE: &str = "ramsize";
pub const OPTION_CONFIRM_QUIT: &str = "confirm_quit";
pub const OPTION_UI_MOUSE: &str = "ui_mouse";
pub const OPTION_LANGUAGE: &str = "language";

/// Header grouping the registry entries of user-selectable slots
pub const SLOT_DEVICES_HEADER: &str = "SLOT DEVICES";
/// Header grouping the registry entries of user-loadable images
pub const IMAGE_DEVICES_HEADER: &str = "IMAGE DEVICES";

const fn header(description: &'static str) -> OptionSpec {
    OptionSpec {
        spec: "",
        default: None,
        option_type: OptionType::Header,
        description,
    }
}

const fn option(
    spec: &'static str,
    default: Option<&'static str>,
    option_type: OptionType,
    description: &'static str,
) -> OptionSpec {
    OptionSpec {
        spec,
        default,
        option_type,
        description,
    }
}

use OptionType::{Boolean, Float, Integer, String as Text};

/// Options registered for every system
pub static CORE_OPTION_ENTRIES: &[OptionSpec] = &[
    header("CORE CONFIGURATION OPTIONS"),
    option("readconfig;rc", Some("1"), Boolean, "enable loading of configuration files"),
    option("writeconfig;wc", Some("0"), Boolean, "writes configuration to (driver).ini on exit"),
    header("CORE SEARCH PATH OPTIONS"),
    option("homepath", Some("."), Text, "path to home directory (read/write) location"),
    option("rompath;rp;biospath;bp", Some("roms"), Text, "path to ROMsets and hard disk images"),
    option("hashpath;hash_directory;hash", Some("hash"), Text, "path to hash files"),
    option("samplepath;sp", Some("samples"), Text, "path to samplesets"),
    option("swpath", Some("software"), Text, "path to loose software"),
    header("CORE OUTPUT DIRECTORY OPTIONS"),
    option("cfg_directory", Some("cfg"), Text, "directory to save configurations"),
    option("nvram_directory", Some("nvram"), Text, "directory to save NVRAM contents"),
    option("state_directory", Some("sta"), Text, "directory to save states"),
    option("snapshot_directory", Some("snap"), Text, "directory to save/load screenshots"),
    header("CORE STATE/PLAYBACK OPTIONS"),
    option("state", None, Text, "saved state to load"),
    option("autosave", Some("0"), Boolean, "automatic restore at startup, and automatic save at exit time"),
    option("rewind", Some("0"), Boolean, "enable rewind savestates"),
    option("rewind_capacity(1-2048)", Some("100"), Integer, "rewind buffer size in megabytes"),
    option("playback;pb", None, Text, "playback an input file"),
    option("record;rec", None, Text, "record an input file"),
    header("CORE PERFORMANCE OPTIONS"),
    option("autoframeskip;afs", Some("0"), Boolean, "enable automatic frameskip selection"),
    option("frameskip;fs(0-10)", Some("0"), Integer, "set frameskip to fixed value, 0-10 (autoframeskip must be disabled)"),
    option("seconds_to_run;str", Some("0"), Integer, "number of emulated seconds to run before automatically exiting"),
    option("throttle", Some("1"), Boolean, "enable throttling to keep game running in sync with real time"),
    option("sleep", Some("1"), Boolean, "enable sleeping, which gives time back to other applications when idle"),
    option("speed(0.01-100)", Some("1.0"), Float, "controls the speed of gameplay, relative to realtime; smaller numbers are slower"),
    option("refreshspeed;rs", Some("0"), Boolean, "automatically adjusts the speed of gameplay to keep the refresh rate lower than the screen"),
    header("CORE SOUND OPTIONS"),
    option("samplerate;sr(1000-1000000)", Some("48000"), Integer, "set sound output sample rate"),
    option("samples", Some("1"), Boolean, "enable the use of external samples if available"),
    option("volume;vol(-32-0)", Some("0"), Integer, "sound volume in decibels (-32 min, 0 max)"),
    header("CORE INPUT OPTIONS"),
    option("coin_lockout;coinlock", Some("1"), Boolean, "enable coin lockouts to actually lock out coins"),
    option("ctrlr", None, Text, "preconfigure for specified controller"),
    option("mouse", Some("0"), Boolean, "enable mouse input"),
    option("joystick;joy", Some("1"), Boolean, "enable joystick input"),
    option("joystick_deadzone;joy_deadzone;jdz(0.00-1)", Some("0.3"), Float, "center deadzone range for joystick where change is ignored (0.0 center, 1.0 end)"),
    option("joystick_saturation;joy_saturation;jsat(0.00-1)", Some("0.85"), Float, "end of axis saturation range for joystick where change is ignored (0.0 center, 1.0 end)"),
    option("joystick_contradictory;joy_contradictory", Some("0"), Boolean, "enable contradictory direction digital joystick input at the same time"),
    option("coin_impulse", Some("0"), Integer, "set coin impulse time (n<0 disable impulse, n==0 obey driver, 0<n set time n)"),
    header("CORE DEBUGGING OPTIONS"),
    option("verbose;v", Some("0"), Boolean, "display additional diagnostic information"),
    option("log", Some("0"), Boolean, "generate an error.log file"),
    option("debug;d", Some("0"), Boolean, "enable/disable debugger"),
    header("CORE MISC OPTIONS"),
    option("bios", None, Text, "select the system BIOS to use"),
    option("cheat;c", Some("0"), Boolean, "enable cheat subsystem"),
    option("skip_gameinfo", Some("0"), Boolean, "skip displaying the system information screen at startup"),
    option("uifont", Some("default"), Text, "specify a font to use"),
    option("ui", Some("cabinet"), Text, "type of UI (simple|cabinet)"),
    option("ramsize;ram", None, Text, "size of RAM (if supported by driver)"),
    option("confirm_quit", Some("0"), Boolean, "ask for confirmation before exiting"),
    option("ui_mouse", Some("1"), Boolean, "display ui mouse cursor"),
    option("language;lang", Some("English"), Text, "display language"),
];

/// User interface flavour selected by the `ui` option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UiType {
    Simple,
    Cabinet,
}

impl UiType {
    fn from_value(value: &str) -> Self {
        if value == "simple" {
            UiType::Simple
        } else {
            UiType::Cabinet
        }
    }
}

/// Cached copies of frequently read options
///
/// Kept current by value-changed handlers on the registry entries.
#[derive(Debug, Clone)]
pub(crate) struct FrequentOptions {
    coin_impulse: Rc<Cell<i64>>,
    joystick_contradictory: Rc<Cell<bool>>,
    sleep: Rc<Cell<bool>>,
    refresh_speed: Rc<Cell<bool>>,
    ui: Rc<Cell<UiType>>,
}

impl FrequentOptions {
    pub(crate) fn new() -> Self {
        Self {
            coin_impulse: Rc::new(Cell::new(0)),
            joystick_contradictory: Rc::new(Cell::new(false)),
            sleep: Rc::new(Cell::new(true)),
            refresh_speed: Rc::new(Cell::new(false)),
            ui: Rc::new(Cell::new(UiType::Cabinet)),
        }
    }

    /// Hook the caches up to their registry entries
    pub(crate) fn install(&self, options: &mut CoreOptions) {
        let coin_impulse = self.coin_impulse.clone();
        options.set_value_changed_handler(
            OPTION_COIN_IMPULSE,
            Box::new(move |value| coin_impulse.set(parse_int(value))),
        );

        let joystick_contradictory = self.joystick_contradictory.clone();
        options.set_value_changed_handler(
            OPTION_JOYSTICK_CONTRADICTORY,
            Box::new(move |value| joystick_contradictory.set(parse_bool(value))),
        );

        let sleep = self.sleep.clone();
        options.set_value_changed_handler(
            OPTION_SLEEP,
            Box::new(move |value| sleep.set(parse_bool(value))),
        );

        let refresh_speed = self.refresh_speed.clone();
        options.set_value_changed_handler(
            OPTION_REFRESHSPEED,
            Box::new(move |value| refresh_speed.set(parse_bool(value))),
        );

        let ui = self.ui.clone();
        options.set_value_changed_handler(
            OPTION_UI,
            Box::new(move |value| ui.set(UiType::from_value(value))),
        );
    }

    /// Re-read every cached value, for writes that bypass the handlers
    pub(crate) fn refresh(&self, options: &CoreOptions) {
        self.coin_impulse.set(options.int_value(OPTION_COIN_IMPULSE));
        self.joystick_contradictory
            .set(options.bool_value(OPTION_JOYSTICK_CONTRADICTORY));
        self.sleep.set(options.bool_value(OPTION_SLEEP));
        self.refresh_speed.set(options.bool_value(OPTION_REFRESHSPEED));
        self.ui.set(UiType::from_value(
            options.value(OPTION_UI).as_deref().unwrap_or_default(),
        ));
    }

    pub(crate) fn coin_impulse(&self) -> i64 {
        self.coin_impulse.get()
    }

    pub(crate) fn joystick_contradictory(&self) -> bool {
        self.joystick_contradictory.get()
    }

    pub(crate) fn sleep(&self) -> bool {
        self.sleep.get()
    }

    pub(crate) fn refresh_speed(&self) -> bool {
        self.refresh_speed.get()
    }

    pub(crate) fn ui(&self) -> UiType {
        self.ui.get()
    }
}

fn parse_int(value: &str) -> i64 {
    value.trim().parse().unwrap_or(0)
}

fn parse_bool(value: &str) -> bool {
    value.trim() == "1"
}
