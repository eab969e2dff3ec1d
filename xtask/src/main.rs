use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::process::{Command, Stdio};
use std::time::Instant;

const DEMO_CATALOG: &str = "catalogs/demo.toml";

/// System/software pairs exercising the demo catalog end to end
const SCENARIOS: &[(&str, Option<&str>)] = &[
    ("demo", None),
    ("demo", Some("mylist:game1")),
    ("demo", Some("mylist:game3")),
    ("demo", Some("mylist:bigcart")),
    ("a2", None),
    ("a2", Some("a2_flop:dos33")),
];

#[derive(Parser)]
#[command(name = "x")]
#[command(about = "Development automation for emuopts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Format check, clippy, tests, then the demo scenarios
    Ci,
    /// Run tests, optionally for one module
    Test {
        #[arg(long, value_enum)]
        module: Option<Module>,
        /// Doc tests only
        #[arg(long)]
        doc: bool,
    },
    /// Resolve one system (and software) and list its slots and media
    Resolve {
        system: String,
        software: Option<String>,
        #[arg(short, long, default_value = DEMO_CATALOG)]
        catalog: String,
    },
    /// Resolve every demo scenario as JSON
    Scenarios,
}

#[derive(Clone, Copy, ValueEnum)]
enum Module {
    Registry,
    Softlist,
    Catalog,
    EmuOptions,
}

impl Module {
    fn path(self) -> &'static str {
        match self {
            Module::Registry => "core::registry",
            Module::Softlist => "core::softlist",
            Module::Catalog => "core::catalog",
            Module::EmuOptions => "core::emu_options",
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci => run_ci(),
        Commands::Test { module, doc } => run_test(module, doc),
        Commands::Resolve {
            system,
            software,
            catalog,
        } => run_resolve(&catalog, &system, software.as_deref(), &["--listslots", "--listmedia"]),
        Commands::Scenarios => run_scenarios(),
    }
}

fn run_ci() -> Result<()> {
    let start = Instant::now();

    step("fmt", cargo(&["fmt", "--all", "--", "--check"]))?;
    step("clippy", cargo(&["clippy", "--all-targets", "--", "-D", "warnings"]))?;
    step("test", cargo(&["test"]))?;
    step("scenarios", run_scenarios())?;

    println!(
        "{} {}",
        "✓ CI passed in".green().bold(),
        format!("{:.2}s", start.elapsed().as_secs_f64()).bold()
    );
    Ok(())
}

fn run_test(module: Option<Module>, doc: bool) -> Result<()> {
    let mut args = vec!["test"];
    if doc {
        args.push("--doc");
    } else if let Some(module) = module {
        args.extend(["--lib", module.path()]);
    }
    cargo(&args)
}

fn run_scenarios() -> Result<()> {
    for (system, software) in SCENARIOS {
        println!(
            "{} {} {}",
            "→".blue(),
            system.bold(),
            software.unwrap_or_default()
        );
        run_resolve(DEMO_CATALOG, system, *software, &["--json"])?;
    }
    Ok(())
}

fn run_resolve(catalog: &str, system: &str, software: Option<&str>, mode: &[&str]) -> Result<()> {
    let mut args = vec!["run", "--quiet", "--bin", "emuopts", "--", "--catalog", catalog];
    args.extend_from_slice(mode);
    args.push(system);
    args.extend(software);
    cargo(&args)
}

fn step(name: &str, outcome: Result<()>) -> Result<()> {
    match outcome {
        Ok(()) => {
            println!("{} {}", "✓".green().bold(), name);
            Ok(())
        }
        Err(e) => {
            println!("{} {}", "✗".red().bold(), name);
            Err(e)
        }
    }
}

fn cargo(args: &[&str]) -> Result<()> {
    let status = Command::new("cargo")
        .args(args)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()?;

    if !status.success() {
        anyhow::bail!("cargo {} failed: {}", args.join(" "), status);
    }
    Ok(())
}
