//! Declarative bring-up recipes.
//!
//! A recipe is everything a board's old hand-written init function used to
//! encode: which firmware images to load, which chipset kit composes the
//! board, and any board-specific deviations from the kit's standard PCI slot
//! wiring. The interpreter in [`crate::bringup`] is the only code that acts
//! on a recipe.

use retrobox_devices::pci::SlotDef;
use retrobox_devices::DeviceProfile;
use retrobox_rom::RomSet;

/// Keyboard-controller variant fitted by a board.
///
/// The AT-class variants track the BIOS vendor; the distinction matters to
/// the KBC command set the firmware expects.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KbcVariant {
    AtAmi,
    AtAward,
    AtMr,
    Ps2Ami,
}

/// Chipset kit: selects one of the common bring-up helpers plus its variant
/// parameters.
///
/// Each kit is a fixed recipe — configuration mechanism, slot map, device
/// set — shared by every board built on that chipset family. Kits compose
/// opaque device profiles; they do not implement chipset behavior.
#[derive(Clone, Copy, Debug)]
pub enum ChipsetKit {
    /// Intel Premiere-style Socket 4/5 boards: i430LX or i430NX northbridge,
    /// 82378ZB SIO southbridge, PCI config mechanism #2, dual-channel PCI
    /// IDE.
    Premiere {
        northbridge: &'static DeviceProfile,
        /// Chipset revisions that can switch config mechanism at runtime.
        can_switch_type: bool,
    },
    /// SiS 85C501/85C503 486 PCI boards, config mechanism #1.
    Sis85c50x {
        /// Whether the board wires both IDE channels.
        dual_channel_ide: bool,
    },
    /// i430FX + PIIX boards (Intel Advanced/ZP lineage), mechanism #1.
    Zappa,
    /// i430VX + PIIX3 Award-BIOS boards, mechanism #1.
    Award430Vx,
    /// OPTi 82C495 ISA/VLB boards; no PCI.
    Opti495 {
        kbc: KbcVariant,
        /// Whether the board carries a VLB IDE controller.
        vlb_ide: bool,
    },
    /// Plain ISA AT board, optionally with a single-chip chipset.
    IsaAt {
        chipset: Option<&'static DeviceProfile>,
        kbc: KbcVariant,
    },
}

impl ChipsetKit {
    /// Whether this kit registers a PCI configuration mechanism.
    pub const fn has_pci(&self) -> bool {
        !matches!(self, ChipsetKit::Opti495 { .. } | ChipsetKit::IsaAt { .. })
    }
}

/// Everything needed to bring one board up.
#[derive(Clone, Copy, Debug)]
pub struct BringupRecipe {
    pub roms: RomSet,
    pub kit: ChipsetKit,
    /// Board-specific slot wiring applied after the kit's standard map.
    /// Last write wins per slot number, so an override replaces the kit's
    /// entry for that slot.
    pub slot_overrides: &'static [SlotDef],
}
