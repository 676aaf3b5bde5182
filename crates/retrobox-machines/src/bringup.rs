//! The machine bring-up interpreter.
//!
//! `bring_up` executes a [`BringupRecipe`] against an explicit
//! [`BringupContext`]; nothing here touches global state. The sequence is
//! fixed for every machine:
//!
//! 1. In check-only mode, probe the ROM set and return; no registration of
//!    any kind happens.
//! 2. Load the ROM set. A load failure aborts bring-up before any slot or
//!    device registration, so the context's registries are exactly as the
//!    caller left them.
//! 3. Run the recipe's chipset kit: register the PCI configuration mechanism
//!    and slot map (PCI kits only) and the kit's fixed device set.
//! 4. Apply board-specific slot overrides.
//! 5. Attach the board's on-board video only if the session's video
//!    selection is "internal".

use retrobox_devices::pci::{
    pins_for_slot, PciConfigMechanism, PciInitFlags, PciSlotMap, SlotClass, SlotDef,
};
use retrobox_devices::{profile, DeviceProfile, DeviceRegistry};
use retrobox_rom::{RomDir, RomError, RomWindow};
use thiserror::Error;
use tracing::{info, warn};

use crate::recipe::{ChipsetKit, KbcVariant};
use crate::MachineDescriptor;

/// Whether bring-up commits side effects or only validates ROM presence.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum BringupMode {
    #[default]
    Full,
    /// Validate ROM availability only. Used by configuration layers; never
    /// registers a slot or device.
    BiosCheckOnly,
}

/// Session video-card selection, checked against a board's on-board video.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum VideoSelection {
    /// Use the board's integrated video if it has one.
    Internal,
    /// An add-in card identified by its device internal name.
    Card(String),
    #[default]
    None,
}

/// Errors surfaced by machine bring-up.
///
/// The only failure mode at this layer is a missing or malformed firmware
/// image; slot and device registration are infallible build-time-constant
/// data.
#[derive(Debug, Error)]
pub enum BringupError {
    #[error("required BIOS file missing for machine {machine}")]
    RomUnavailable {
        machine: &'static str,
        #[source]
        source: Option<RomError>,
    },
}

/// Session state owned by one bring-up, replacing the ambient globals of
/// older designs.
///
/// A context is created fresh for each "switch to machine X" operation and
/// dropped (or [`reset`]) when the next switch starts; the previous session's
/// slot map and registry never overlap the next one's.
///
/// [`reset`]: BringupContext::reset
#[derive(Debug, Default)]
pub struct BringupContext {
    pub mode: BringupMode,
    pub video: VideoSelection,
    pub devices: DeviceRegistry,
    pub pci: PciSlotMap,
    pub rom_windows: Vec<RomWindow>,
}

impl BringupContext {
    pub fn new(mode: BringupMode, video: VideoSelection) -> Self {
        Self {
            mode,
            video,
            ..Self::default()
        }
    }

    /// Tear down all session state (machine close / next machine switch).
    pub fn reset(&mut self) {
        self.devices.clear();
        self.pci.clear();
        self.rom_windows.clear();
    }
}

/// Bring `desc` up into `ctx`. See the module docs for the fixed sequence.
pub fn bring_up(
    desc: &MachineDescriptor,
    roms: &RomDir,
    ctx: &mut BringupContext,
) -> Result<(), BringupError> {
    if ctx.mode == BringupMode::BiosCheckOnly {
        if roms.probe(&desc.recipe.roms) {
            return Ok(());
        }
        return Err(BringupError::RomUnavailable {
            machine: desc.internal_name,
            source: None,
        });
    }

    let windows = roms.load(&desc.recipe.roms).map_err(|source| {
        warn!(
            machine = desc.internal_name,
            error = %source,
            "BIOS image unavailable, aborting bring-up"
        );
        BringupError::RomUnavailable {
            machine: desc.internal_name,
            source: Some(source),
        }
    })?;
    ctx.rom_windows = windows;

    match desc.recipe.kit {
        ChipsetKit::Premiere {
            northbridge,
            can_switch_type,
        } => kit_premiere(ctx, northbridge, can_switch_type),
        ChipsetKit::Sis85c50x { dual_channel_ide } => kit_sis85c50x(ctx, dual_channel_ide),
        ChipsetKit::Zappa => kit_zappa(ctx),
        ChipsetKit::Award430Vx => kit_award430vx(ctx),
        ChipsetKit::Opti495 { kbc, vlb_ide } => kit_opti495(ctx, kbc, vlb_ide),
        ChipsetKit::IsaAt { chipset, kbc } => kit_isa_at(ctx, chipset, kbc),
    }

    for def in desc.recipe.slot_overrides {
        ctx.pci.register_slot(*def);
    }

    if ctx.video == VideoSelection::Internal {
        if let Some(video) = desc.onboard_video {
            ctx.devices.add(video);
        }
    }

    info!(
        machine = desc.internal_name,
        devices = ctx.devices.len(),
        pci_slots = ctx.pci.len(),
        "machine bring-up complete"
    );
    Ok(())
}

fn kbc_profile(kbc: KbcVariant) -> &'static DeviceProfile {
    match kbc {
        KbcVariant::AtAmi => &profile::KBC_AT_AMI,
        KbcVariant::AtAward => &profile::KBC_AT_AWARD,
        KbcVariant::AtMr => &profile::KBC_AT_MR,
        KbcVariant::Ps2Ami => &profile::KBC_PS2_AMI,
    }
}

fn register_expansion_slots(ctx: &mut BringupContext, slots: &[u8]) {
    for (i, &slot) in slots.iter().enumerate() {
        ctx.pci
            .register_slot(SlotDef::new(slot, SlotClass::Normal, pins_for_slot(i as u8)));
    }
}

/// Intel Premiere-style boards: i430LX/i430NX + 82378ZB SIO, mechanism #2,
/// northbridge at 0x00 and southbridge at 0x02.
fn kit_premiere(ctx: &mut BringupContext, northbridge: &'static DeviceProfile, can_switch_type: bool) {
    let mut flags = PciInitFlags::NO_IRQ_STEERING;
    if can_switch_type {
        flags |= PciInitFlags::CAN_SWITCH_TYPE;
    }
    ctx.pci.init_mechanism(PciConfigMechanism::Type2, flags);
    // The 82378ZB cannot steer PIRQ lines; routing is fixed by board wiring.
    for line in 1..=4 {
        ctx.pci.set_irq_routing(line, false);
    }
    ctx.pci
        .register_slot(SlotDef::bridge(0x00, SlotClass::Northbridge));
    ctx.pci
        .register_slot(SlotDef::bridge(0x02, SlotClass::Southbridge));
    register_expansion_slots(ctx, &[0x06, 0x0C, 0x0E]);

    ctx.devices.add(&profile::KBC_PS2_AMI);
    ctx.devices.add(&profile::SUPERIO_FDC37C665);
    ctx.devices.add(&profile::IDE_PCI_2CH);
    ctx.devices.add(northbridge);
    ctx.devices.add(&profile::SB_SIO_ZB);
    ctx.devices.add(&profile::FLASH_INTEL_BXT);
}

/// SiS 85C501/85C503 486 PCI boards, mechanism #1.
fn kit_sis85c50x(ctx: &mut BringupContext, dual_channel_ide: bool) {
    ctx.pci
        .init_mechanism(PciConfigMechanism::Type1, PciInitFlags::empty());
    ctx.pci
        .register_slot(SlotDef::bridge(0x00, SlotClass::Northbridge));
    ctx.pci
        .register_slot(SlotDef::bridge(0x01, SlotClass::Southbridge));
    register_expansion_slots(ctx, &[0x03, 0x04, 0x05, 0x06]);

    ctx.devices.add(&profile::KBC_PS2_AMI);
    ctx.devices.add(&profile::SUPERIO_FDC37C665);
    ctx.devices.add(if dual_channel_ide {
        &profile::IDE_PCI_2CH
    } else {
        &profile::IDE_PCI
    });
    ctx.devices.add(&profile::NB_SIS_85C501);
    ctx.devices.add(&profile::SB_SIS_85C503);
}

/// i430FX + PIIX boards, mechanism #1. IDE is integrated in the PIIX, so no
/// separate IDE profile is attached.
fn kit_zappa(ctx: &mut BringupContext) {
    ctx.pci
        .init_mechanism(PciConfigMechanism::Type1, PciInitFlags::empty());
    ctx.pci
        .register_slot(SlotDef::bridge(0x00, SlotClass::Northbridge));
    ctx.pci
        .register_slot(SlotDef::bridge(0x07, SlotClass::Southbridge));
    register_expansion_slots(ctx, &[0x0D, 0x0E, 0x0F, 0x10]);

    ctx.devices.add(&profile::KBC_PS2_AMI);
    ctx.devices.add(&profile::SUPERIO_PC87306);
    ctx.devices.add(&profile::NB_I430FX);
    ctx.devices.add(&profile::SB_PIIX);
    ctx.devices.add(&profile::FLASH_INTEL_BXT);
}

/// i430VX + PIIX3 Award-BIOS boards, mechanism #1.
fn kit_award430vx(ctx: &mut BringupContext) {
    ctx.pci
        .init_mechanism(PciConfigMechanism::Type1, PciInitFlags::empty());
    ctx.pci
        .register_slot(SlotDef::bridge(0x00, SlotClass::Northbridge));
    ctx.pci
        .register_slot(SlotDef::bridge(0x07, SlotClass::Southbridge));
    register_expansion_slots(ctx, &[0x08, 0x09, 0x0A, 0x0B]);

    ctx.devices.add(&profile::KBC_PS2_AMI);
    ctx.devices.add(&profile::SUPERIO_UM8669F);
    ctx.devices.add(&profile::NB_I430VX);
    ctx.devices.add(&profile::SB_PIIX3);
    ctx.devices.add(&profile::FLASH_SST_29EE010);
}

/// OPTi 82C495 ISA/VLB boards; no PCI mechanism is registered.
fn kit_opti495(ctx: &mut BringupContext, kbc: KbcVariant, vlb_ide: bool) {
    ctx.devices.add(&profile::CHIPSET_OPTI495);
    ctx.devices.add(kbc_profile(kbc));
    ctx.devices.add(&profile::FDC_AT);
    if vlb_ide {
        ctx.devices.add(&profile::IDE_VLB);
    }
}

/// Plain ISA AT boards.
fn kit_isa_at(ctx: &mut BringupContext, chipset: Option<&'static DeviceProfile>, kbc: KbcVariant) {
    if let Some(chipset) = chipset {
        ctx.devices.add(chipset);
    }
    ctx.devices.add(kbc_profile(kbc));
    ctx.devices.add(&profile::FDC_AT);
}
