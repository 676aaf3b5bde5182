//! Machine registry for retrobox: the static catalog of supported boards and
//! the bring-up protocol that turns a catalog entry into a live session.
//!
//! Each [`MachineDescriptor`] is pure data: identification, CPU/RAM
//! constraints, bus-capability flags, and a [`BringupRecipe`] naming the
//! board's firmware images, chipset kit, and PCI slot wiring. A single
//! interpreter ([`bringup::bring_up`]) executes any recipe; there is no
//! per-machine init function.
//!
//! The catalog itself is process-wide, read-only `&'static` data and safe to
//! read from any thread. Bring-up state ([`bringup::BringupContext`]) is
//! session-scoped and single-threaded by construction: it is owned by the
//! caller and replaced wholesale when the active machine changes.
#![forbid(unsafe_code)]

pub mod bringup;
pub mod catalog;
pub mod recipe;

use bitflags::bitflags;
use retrobox_devices::DeviceProfile;

pub use recipe::{BringupRecipe, ChipsetKit, KbcVariant};

/// Architecture generation of a board.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum MachineType {
    P8088,
    P286,
    P386Sx,
    P386Dx,
    P486,
    Socket4,
    Socket5,
    Socket7,
}

impl MachineType {
    pub const fn label(self) -> &'static str {
        match self {
            MachineType::P8088 => "8088",
            MachineType::P286 => "286",
            MachineType::P386Sx => "386SX",
            MachineType::P386Dx => "386DX",
            MachineType::P486 => "486",
            MachineType::Socket4 => "Socket 4",
            MachineType::Socket5 => "Socket 5",
            MachineType::Socket7 => "Socket 7",
        }
    }
}

bitflags! {
    /// Architecture and bus capabilities of a board.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct MachineFlags: u32 {
        const AT = 1 << 0;
        const PS2 = 1 << 1;
        const ISA = 1 << 2;
        const CBUS = 1 << 3;
        const EISA = 1 << 4;
        const VLB = 1 << 5;
        const MCA = 1 << 6;
        const PCI = 1 << 7;
        const AGP = 1 << 8;
        /// Integrated hard disk controller.
        const HDC = 1 << 9;
        /// Integrated video.
        const VIDEO = 1 << 10;
        /// Integrated mouse port.
        const MOUSE = 1 << 11;
        /// Integrated sound.
        const SOUND = 1 << 12;
        /// Integrated floppy controller.
        const FDC = 1 << 13;
        /// Board has no NMI wiring.
        const NO_NMI = 1 << 14;
    }
}

/// One CPU package option for a board: a family label plus the concrete
/// models the board accepts.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CpuFamily {
    pub family: &'static str,
    pub models: &'static [&'static str],
}

/// Legal installed-RAM range, in KiB, with the allocation step.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RamSpec {
    pub min_kib: u32,
    pub max_kib: u32,
    pub step_kib: u32,
}

impl RamSpec {
    pub const fn new(min_kib: u32, max_kib: u32, step_kib: u32) -> Self {
        Self {
            min_kib,
            max_kib,
            step_kib,
        }
    }

    pub fn accepts(&self, kib: u32) -> bool {
        kib >= self.min_kib && kib <= self.max_kib && kib % self.step_kib == 0
    }
}

/// Build-variant availability of a catalog entry.
///
/// Boards that upstream kept behind development-build guards stay in the
/// table unconditionally; availability is a runtime filter over the static
/// catalog instead of conditional compilation of the entries themselves.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MachineGate {
    Always,
    /// Only available when the `dev-machines` cargo feature is enabled.
    DevBuild,
}

/// Static description of one supported machine.
#[derive(Debug)]
pub struct MachineDescriptor {
    /// Display name. Not unique: several BIOS revisions of one board may
    /// share it.
    pub name: &'static str,
    /// Unique stable key, used for persisted configuration and lookup.
    pub internal_name: &'static str,
    pub machine_type: MachineType,
    /// Up to five CPU package options.
    pub cpu_families: &'static [CpuFamily],
    pub flags: MachineFlags,
    pub ram: RamSpec,
    /// Mask of the persisted CMOS/NVRAM region.
    pub nvr_mask: u32,
    pub recipe: BringupRecipe,
    /// On-board video part, if the board has one. Queried independently of
    /// bring-up by configuration layers.
    pub onboard_video: Option<&'static DeviceProfile>,
    pub gate: MachineGate,
}

impl MachineDescriptor {
    /// Whether this entry is selectable under the current build's feature
    /// set.
    pub fn available(&self) -> bool {
        match self.gate {
            MachineGate::Always => true,
            MachineGate::DevBuild => cfg!(feature = "dev-machines"),
        }
    }
}
