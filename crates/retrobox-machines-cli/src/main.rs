//! Native CLI for the retrobox machine registry: inspect the catalog, probe
//! ROM availability, and dry-run machine bring-up.
#![forbid(unsafe_code)]

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use retrobox_machines::bringup::{
    bring_up, BringupContext, BringupError, BringupMode, VideoSelection,
};
use retrobox_machines::{catalog, MachineDescriptor, MachineFlags};
use retrobox_rom::RomDir;
use serde::Deserialize;

#[derive(Debug, Parser)]
#[command(
    name = "retrobox-machines",
    about = "Inspect the retrobox machine catalog and validate BIOS ROM sets"
)]
struct Args {
    /// Persisted machine selection (JSON: machine, roms, video).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List catalog entries.
    List {
        /// Include machines gated out of this build.
        #[arg(long)]
        all: bool,
    },
    /// Show one machine's full descriptor.
    Show { machine: String },
    /// Check ROM availability without bringing the machine up.
    Probe {
        /// Machine internal name; defaults to the --config selection.
        machine: Option<String>,
        /// ROM tree root; defaults to the --config selection.
        #[arg(long)]
        roms: Option<PathBuf>,
    },
    /// Bring a machine up and print the resulting session state.
    BringUp {
        machine: Option<String>,
        #[arg(long)]
        roms: Option<PathBuf>,
        /// Video selection: `internal`, `none`, or a card's internal name.
        #[arg(long)]
        video: Option<String>,
    },
}

/// Persisted selection file, keyed by the stable machine identifier.
#[derive(Debug, Default, Deserialize)]
struct SelectionConfig {
    machine: Option<String>,
    roms: Option<PathBuf>,
    video: Option<String>,
}

fn load_config(path: Option<&PathBuf>) -> Result<SelectionConfig> {
    let Some(path) = path else {
        return Ok(SelectionConfig::default());
    };
    let file = File::open(path)
        .with_context(|| format!("failed to open config file: {}", path.display()))?;
    serde_json::from_reader(file)
        .with_context(|| format!("failed to parse config file: {}", path.display()))
}

fn resolve_machine(
    explicit: Option<&str>,
    config: &SelectionConfig,
) -> Result<&'static MachineDescriptor> {
    let Some(name) = explicit.or(config.machine.as_deref()) else {
        bail!("no machine selected; pass an internal name or use --config");
    };
    let Some(desc) = catalog::find(name) else {
        bail!("unknown machine internal name: {name}");
    };
    if !desc.available() {
        bail!("machine {name} is not available in this build");
    }
    Ok(desc)
}

fn resolve_roms(explicit: Option<PathBuf>, config: &SelectionConfig) -> Result<RomDir> {
    let Some(root) = explicit.or_else(|| config.roms.clone()) else {
        bail!("no ROM directory given; pass --roms or use --config");
    };
    Ok(RomDir::new(root))
}

fn parse_video(selection: Option<&str>) -> VideoSelection {
    match selection {
        Some("internal") => VideoSelection::Internal,
        Some("none") | None => VideoSelection::None,
        Some(card) => VideoSelection::Card(card.to_string()),
    }
}

fn bus_summary(flags: MachineFlags) -> String {
    let mut buses = Vec::new();
    for (flag, label) in [
        (MachineFlags::ISA, "ISA"),
        (MachineFlags::EISA, "EISA"),
        (MachineFlags::VLB, "VLB"),
        (MachineFlags::MCA, "MCA"),
        (MachineFlags::PCI, "PCI"),
        (MachineFlags::AGP, "AGP"),
    ] {
        if flags.contains(flag) {
            buses.push(label);
        }
    }
    buses.join("+")
}

fn cmd_list(all: bool) {
    for (index, desc) in catalog::all().iter().enumerate() {
        if !all && !desc.available() {
            continue;
        }
        let gate = if desc.available() { "" } else { " (dev build only)" };
        println!(
            "{index:>3}  {:<12} {:<9} {:<8} {}{gate}",
            desc.internal_name,
            desc.machine_type.label(),
            bus_summary(desc.flags),
            desc.name
        );
    }
}

fn cmd_show(name: &str) -> Result<()> {
    let Some(desc) = catalog::find(name) else {
        bail!("unknown machine internal name: {name}");
    };
    println!("{} ({})", desc.name, desc.internal_name);
    println!("  type:      {}", desc.machine_type.label());
    println!("  buses:     {}", bus_summary(desc.flags));
    println!(
        "  ram:       {}..{} KiB in steps of {}",
        desc.ram.min_kib, desc.ram.max_kib, desc.ram.step_kib
    );
    println!("  nvr mask:  {:#04x}", desc.nvr_mask);
    println!("  available: {}", desc.available());
    for fam in desc.cpu_families {
        println!("  cpu {}: {}", fam.family, fam.models.join(", "));
    }
    for path in desc.recipe.roms.paths() {
        println!("  rom:       {path}");
    }
    if let Some(video) = desc.onboard_video {
        println!("  video:     {} (on-board)", video.name);
    }
    Ok(())
}

fn cmd_probe(desc: &'static MachineDescriptor, roms: &RomDir) -> Result<()> {
    let mut ctx = BringupContext::new(BringupMode::BiosCheckOnly, VideoSelection::None);
    match bring_up(desc, roms, &mut ctx) {
        Ok(()) => {
            println!("{}: BIOS ROM set present", desc.internal_name);
            Ok(())
        }
        Err(e @ BringupError::RomUnavailable { .. }) => bail!("{e}"),
    }
}

fn cmd_bring_up(
    desc: &'static MachineDescriptor,
    roms: &RomDir,
    video: VideoSelection,
) -> Result<()> {
    let mut ctx = BringupContext::new(BringupMode::Full, video);
    bring_up(desc, roms, &mut ctx).with_context(|| format!("bring-up of {} failed", desc.internal_name))?;

    println!("{} ({})", desc.name, desc.internal_name);
    for window in &ctx.rom_windows {
        println!(
            "  rom window: {:#07x}..{:#07x}",
            window.base,
            window.base + window.bytes.len() as u64
        );
    }
    if let Some((mechanism, flags)) = ctx.pci.mechanism() {
        println!("  pci: {mechanism:?} flags={flags:?}");
        for slot in ctx.pci.iter() {
            println!(
                "  slot {:#04x}: {:?} pins {:?}",
                slot.slot, slot.class, slot.pins
            );
        }
        let review = ctx.pci.non_cyclic_slots();
        if !review.is_empty() {
            println!("  note: non-standard pin wiring on slots {review:#04x?}");
        }
    }
    for device in ctx.devices.iter() {
        println!("  device: {} ({})", device.name, device.internal_name);
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let config = load_config(args.config.as_ref())?;
    match args.command {
        Command::List { all } => {
            cmd_list(all);
            Ok(())
        }
        Command::Show { machine } => cmd_show(&machine),
        Command::Probe { machine, roms } => {
            let desc = resolve_machine(machine.as_deref(), &config)?;
            let roms = resolve_roms(roms, &config)?;
            cmd_probe(desc, &roms)
        }
        Command::BringUp {
            machine,
            roms,
            video,
        } => {
            let desc = resolve_machine(machine.as_deref(), &config)?;
            let roms = resolve_roms(roms, &config)?;
            let video = parse_video(video.as_deref().or(config.video.as_deref()));
            cmd_bring_up(desc, &roms, video)
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
