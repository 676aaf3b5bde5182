//! The static machine catalog and its lookup API.
//!
//! Entries are pure data; table order defines the numeric index. The numeric
//! index is stable only within a single build (adding or removing entries
//! shifts it), so persisted configuration must use `internal_name` via
//! [`find`] — that is the stable path.

use retrobox_devices::pci::{SlotClass, SlotDef};
use retrobox_devices::profile;
use retrobox_rom::{PairLayout, RomLayout, RomSet};

use crate::recipe::{BringupRecipe, ChipsetKit, KbcVariant};
use crate::{CpuFamily, MachineDescriptor, MachineFlags, MachineGate, MachineType, RamSpec};

const CPUS_286: &[CpuFamily] = &[CpuFamily {
    family: "Intel 286",
    models: &["286/6", "286/8", "286/10", "286/12"],
}];

const CPUS_386SX: &[CpuFamily] = &[
    CpuFamily {
        family: "Intel 386SX",
        models: &["386SX/16", "386SX/20", "386SX/25"],
    },
    CpuFamily {
        family: "AMD 386SX",
        models: &["Am386SX/25", "Am386SX/33"],
    },
];

const CPUS_486: &[CpuFamily] = &[
    CpuFamily {
        family: "Intel 486",
        models: &["i486SX/25", "i486DX/33", "i486DX2/66", "i486DX4/100"],
    },
    CpuFamily {
        family: "AMD 486",
        models: &["Am486DX2/66", "Am486DX4/100"],
    },
];

const CPUS_SOCKET4: &[CpuFamily] = &[CpuFamily {
    family: "Intel P5",
    models: &["Pentium 60", "Pentium 66"],
}];

const CPUS_SOCKET5: &[CpuFamily] = &[CpuFamily {
    family: "Intel P54C",
    models: &["Pentium 75", "Pentium 90", "Pentium 100", "Pentium 120"],
}];

const CPUS_SOCKET7: &[CpuFamily] = &[
    CpuFamily {
        family: "Intel P54C",
        models: &["Pentium 100", "Pentium 120", "Pentium 133", "Pentium 166"],
    },
    CpuFamily {
        family: "AMD K5",
        models: &["K5 PR90", "K5 PR100", "K5 PR133"],
    },
    CpuFamily {
        family: "Cyrix 6x86",
        models: &["6x86 P120+", "6x86 P150+", "6x86 P166+"],
    },
];

const RAM_286: RamSpec = RamSpec::new(256, 15_872, 128);
const RAM_386: RamSpec = RamSpec::new(1024, 16_384, 1024);
const RAM_486_ISA: RamSpec = RamSpec::new(1024, 32_768, 1024);
const RAM_486_PCI: RamSpec = RamSpec::new(1024, 65_536, 1024);
const RAM_PREMIERE: RamSpec = RamSpec::new(2048, 131_072, 2048);
const RAM_430FX: RamSpec = RamSpec::new(8192, 131_072, 8192);
const RAM_430VX: RamSpec = RamSpec::new(8192, 131_072, 8192);

const FLAGS_AT_ISA: MachineFlags = MachineFlags::AT.union(MachineFlags::ISA).union(MachineFlags::FDC);
const FLAGS_486_VLB: MachineFlags = FLAGS_AT_ISA.union(MachineFlags::VLB).union(MachineFlags::HDC);
const FLAGS_PCI: MachineFlags = FLAGS_AT_ISA
    .union(MachineFlags::PCI)
    .union(MachineFlags::PS2)
    .union(MachineFlags::MOUSE)
    .union(MachineFlags::HDC);

/// The Epox P55-VA wires its last slot against the standard rotation; this
/// is the board's documented PIRQ routing, kept as explicit data.
const P55VA_SLOT_OVERRIDES: &[SlotDef] = &[SlotDef::new(0x0B, SlotClass::Normal, [4, 3, 2, 1])];

/// The full catalog. Table order is the (build-local) numeric index.
pub static MACHINES: &[MachineDescriptor] = &[
    // 286 ISA boards.
    MachineDescriptor {
        name: "IBM PC/AT 5170",
        internal_name: "ibmat",
        machine_type: MachineType::P286,
        cpu_families: CPUS_286,
        flags: FLAGS_AT_ISA,
        ram: RAM_286,
        nvr_mask: 0x3F,
        recipe: BringupRecipe {
            roms: RomSet::Pair {
                low: "machines/ibmat/62x0820.u27",
                high: "machines/ibmat/62x0821.u47",
                base: 0xF_0000,
                size: 0x1_0000,
                layout: PairLayout::Interleaved,
            },
            kit: ChipsetKit::IsaAt {
                chipset: None,
                kbc: KbcVariant::AtAmi,
            },
            slot_overrides: &[],
        },
        onboard_video: None,
        gate: MachineGate::Always,
    },
    MachineDescriptor {
        name: "Commodore PC 30-III",
        internal_name: "cmdpc30",
        machine_type: MachineType::P286,
        cpu_families: CPUS_286,
        flags: FLAGS_AT_ISA,
        ram: RAM_286,
        nvr_mask: 0x3F,
        recipe: BringupRecipe {
            roms: RomSet::Single {
                path: "machines/cmdpc30/cbm-pc30.bin",
                base: 0xF_0000,
                size: 0x1_0000,
                layout: RomLayout::Linear,
            },
            kit: ChipsetKit::IsaAt {
                chipset: Some(&profile::CHIPSET_SCAT),
                kbc: KbcVariant::AtAmi,
            },
            slot_overrides: &[],
        },
        onboard_video: None,
        gate: MachineGate::Always,
    },
    MachineDescriptor {
        name: "Hyundai Super-286TR",
        internal_name: "super286tr",
        machine_type: MachineType::P286,
        cpu_families: CPUS_286,
        flags: FLAGS_AT_ISA,
        ram: RAM_286,
        nvr_mask: 0x7F,
        recipe: BringupRecipe {
            roms: RomSet::Single {
                path: "machines/super286tr/award286.bin",
                base: 0xF_0000,
                size: 0x1_0000,
                layout: RomLayout::Reversed,
            },
            kit: ChipsetKit::IsaAt {
                chipset: Some(&profile::CHIPSET_SCAT),
                kbc: KbcVariant::AtAward,
            },
            slot_overrides: &[],
        },
        onboard_video: None,
        gate: MachineGate::Always,
    },
    // 386 ISA.
    MachineDescriptor {
        name: "NCR PC386sx",
        internal_name: "ncr386sx",
        machine_type: MachineType::P386Sx,
        cpu_families: CPUS_386SX,
        flags: FLAGS_AT_ISA,
        ram: RAM_386,
        nvr_mask: 0x7F,
        recipe: BringupRecipe {
            roms: RomSet::Pair {
                low: "machines/ncr386sx/f000.bin",
                high: "machines/ncr386sx/f800.bin",
                base: 0xF_0000,
                size: 0x1_0000,
                layout: PairLayout::Concat { high_offset: 0x8000 },
            },
            kit: ChipsetKit::IsaAt {
                chipset: Some(&profile::CHIPSET_NEAT),
                kbc: KbcVariant::AtAmi,
            },
            slot_overrides: &[],
        },
        onboard_video: None,
        gate: MachineGate::Always,
    },
    // 486 ISA/VLB (OPTi 495).
    MachineDescriptor {
        name: "[OPTi 495] AMI 486 clone",
        internal_name: "ami495",
        machine_type: MachineType::P486,
        cpu_families: CPUS_486,
        flags: FLAGS_486_VLB,
        ram: RAM_486_ISA,
        nvr_mask: 0x7F,
        recipe: BringupRecipe {
            roms: RomSet::Single {
                path: "machines/ami495/opti495.ami",
                base: 0xF_0000,
                size: 0x1_0000,
                layout: RomLayout::Linear,
            },
            kit: ChipsetKit::Opti495 {
                kbc: KbcVariant::AtAmi,
                vlb_ide: true,
            },
            slot_overrides: &[],
        },
        onboard_video: None,
        gate: MachineGate::Always,
    },
    MachineDescriptor {
        name: "[OPTi 495] Award 486 clone",
        internal_name: "award495",
        machine_type: MachineType::P486,
        cpu_families: CPUS_486,
        flags: FLAGS_486_VLB,
        ram: RAM_486_ISA,
        nvr_mask: 0x7F,
        recipe: BringupRecipe {
            roms: RomSet::Single {
                path: "machines/award495/opti495.awd",
                base: 0xF_0000,
                size: 0x1_0000,
                layout: RomLayout::Linear,
            },
            kit: ChipsetKit::Opti495 {
                kbc: KbcVariant::AtAward,
                vlb_ide: true,
            },
            slot_overrides: &[],
        },
        onboard_video: None,
        gate: MachineGate::Always,
    },
    MachineDescriptor {
        name: "[OPTi 495] MR BIOS 486 clone",
        internal_name: "mr495",
        machine_type: MachineType::P486,
        cpu_families: CPUS_486,
        flags: FLAGS_AT_ISA.union(MachineFlags::VLB),
        ram: RAM_486_ISA,
        nvr_mask: 0x7F,
        recipe: BringupRecipe {
            roms: RomSet::Single {
                path: "machines/mr495/opti495.mr",
                base: 0xF_0000,
                size: 0x1_0000,
                layout: RomLayout::Linear,
            },
            kit: ChipsetKit::Opti495 {
                kbc: KbcVariant::AtMr,
                vlb_ide: false,
            },
            slot_overrides: &[],
        },
        onboard_video: None,
        gate: MachineGate::Always,
    },
    // 486 PCI (SiS 85C50x).
    MachineDescriptor {
        name: "[SiS 85C501] AMI 486 PCI/ISA",
        internal_name: "ami486pci",
        machine_type: MachineType::P486,
        cpu_families: CPUS_486,
        flags: FLAGS_PCI,
        ram: RAM_486_PCI,
        nvr_mask: 0xFF,
        recipe: BringupRecipe {
            roms: RomSet::Single {
                path: "machines/ami486pci/sis501.ami",
                base: 0xE_0000,
                size: 0x2_0000,
                layout: RomLayout::Linear,
            },
            kit: ChipsetKit::Sis85c50x {
                dual_channel_ide: false,
            },
            slot_overrides: &[],
        },
        onboard_video: None,
        gate: MachineGate::Always,
    },
    MachineDescriptor {
        name: "[SiS 85C50x] Lucky Star LS-486E",
        internal_name: "ls486e",
        machine_type: MachineType::P486,
        cpu_families: CPUS_486,
        flags: FLAGS_PCI,
        ram: RAM_486_PCI,
        nvr_mask: 0xFF,
        recipe: BringupRecipe {
            roms: RomSet::Single {
                path: "machines/ls486e/ls486e.awd",
                base: 0xE_0000,
                size: 0x2_0000,
                layout: RomLayout::Linear,
            },
            kit: ChipsetKit::Sis85c50x {
                dual_channel_ide: true,
            },
            slot_overrides: &[],
        },
        onboard_video: None,
        gate: MachineGate::Always,
    },
    MachineDescriptor {
        name: "Packard Bell PB450",
        internal_name: "pb450",
        machine_type: MachineType::P486,
        cpu_families: CPUS_486,
        flags: FLAGS_PCI.union(MachineFlags::VIDEO),
        ram: RAM_486_PCI,
        nvr_mask: 0xFF,
        recipe: BringupRecipe {
            roms: RomSet::Single {
                path: "machines/pb450/pb450.bin",
                base: 0xE_0000,
                size: 0x2_0000,
                layout: RomLayout::Linear,
            },
            kit: ChipsetKit::Sis85c50x {
                dual_channel_ide: true,
            },
            slot_overrides: &[],
        },
        onboard_video: Some(&profile::VIDEO_GD5428_ONBOARD),
        gate: MachineGate::Always,
    },
    // Socket 4 (i430LX Premiere).
    MachineDescriptor {
        name: "[i430LX] Intel Premiere/PCI",
        internal_name: "revenge",
        machine_type: MachineType::Socket4,
        cpu_families: CPUS_SOCKET4,
        flags: FLAGS_PCI,
        ram: RAM_PREMIERE,
        nvr_mask: 0xFF,
        recipe: BringupRecipe {
            roms: RomSet::Pair {
                low: "machines/revenge/1009af2_.bio",
                high: "machines/revenge/1009af2_.bi1",
                base: 0xE_0000,
                size: 0x2_0000,
                layout: PairLayout::Concat {
                    high_offset: 0x1_0000,
                },
            },
            kit: ChipsetKit::Premiere {
                northbridge: &profile::NB_I430LX,
                can_switch_type: true,
            },
            slot_overrides: &[],
        },
        onboard_video: None,
        gate: MachineGate::Always,
    },
    MachineDescriptor {
        name: "[i430LX] Micronics 586MC1",
        internal_name: "586mc1",
        machine_type: MachineType::Socket4,
        cpu_families: CPUS_SOCKET4,
        flags: FLAGS_PCI,
        ram: RAM_PREMIERE,
        nvr_mask: 0xFF,
        recipe: BringupRecipe {
            roms: RomSet::Single {
                path: "machines/586mc1/is.34",
                base: 0xE_0000,
                size: 0x2_0000,
                layout: RomLayout::Linear,
            },
            kit: ChipsetKit::Premiere {
                northbridge: &profile::NB_I430LX,
                can_switch_type: false,
            },
            slot_overrides: &[],
        },
        onboard_video: None,
        gate: MachineGate::Always,
    },
    // Socket 5 (i430NX Premiere II, i430FX Zappa).
    MachineDescriptor {
        name: "[i430NX] Intel Premiere/PCI II",
        internal_name: "plato",
        machine_type: MachineType::Socket5,
        cpu_families: CPUS_SOCKET5,
        flags: FLAGS_PCI,
        ram: RAM_PREMIERE,
        nvr_mask: 0xFF,
        recipe: BringupRecipe {
            roms: RomSet::Pair {
                low: "machines/plato/1016ax1_.bio",
                high: "machines/plato/1016ax1_.bi1",
                base: 0xE_0000,
                size: 0x2_0000,
                layout: PairLayout::Concat {
                    high_offset: 0x1_0000,
                },
            },
            kit: ChipsetKit::Premiere {
                northbridge: &profile::NB_I430NX,
                can_switch_type: true,
            },
            slot_overrides: &[],
        },
        onboard_video: None,
        gate: MachineGate::Always,
    },
    MachineDescriptor {
        name: "[i430FX] Intel Advanced/ZP",
        internal_name: "zappa",
        machine_type: MachineType::Socket5,
        cpu_families: CPUS_SOCKET5,
        flags: FLAGS_PCI,
        ram: RAM_430FX,
        nvr_mask: 0xFF,
        recipe: BringupRecipe {
            roms: RomSet::Single {
                path: "machines/zappa/1006bs0_.bio",
                base: 0xE_0000,
                size: 0x2_0000,
                layout: RomLayout::Linear,
            },
            kit: ChipsetKit::Zappa,
            slot_overrides: &[],
        },
        onboard_video: None,
        gate: MachineGate::Always,
    },
    MachineDescriptor {
        name: "[i430FX] Intel Advanced/ATX",
        internal_name: "thor",
        machine_type: MachineType::Socket5,
        cpu_families: CPUS_SOCKET5,
        flags: FLAGS_PCI,
        ram: RAM_430FX,
        nvr_mask: 0xFF,
        recipe: BringupRecipe {
            roms: RomSet::Single {
                path: "machines/thor/1006cn0_.bio",
                base: 0xE_0000,
                size: 0x2_0000,
                layout: RomLayout::Linear,
            },
            kit: ChipsetKit::Zappa,
            slot_overrides: &[],
        },
        onboard_video: None,
        gate: MachineGate::Always,
    },
    // Socket 7 (i430VX).
    MachineDescriptor {
        name: "[i430VX] Shuttle HOT-557",
        internal_name: "hot557",
        machine_type: MachineType::Socket7,
        cpu_families: CPUS_SOCKET7,
        flags: FLAGS_PCI,
        ram: RAM_430VX,
        nvr_mask: 0xFF,
        recipe: BringupRecipe {
            roms: RomSet::Single {
                path: "machines/hot557/430vx.awd",
                base: 0xE_0000,
                size: 0x2_0000,
                layout: RomLayout::Linear,
            },
            kit: ChipsetKit::Award430Vx,
            slot_overrides: &[],
        },
        onboard_video: None,
        gate: MachineGate::Always,
    },
    MachineDescriptor {
        name: "[i430VX] Epox P55-VA",
        internal_name: "p55va",
        machine_type: MachineType::Socket7,
        cpu_families: CPUS_SOCKET7,
        flags: FLAGS_PCI,
        ram: RAM_430VX,
        nvr_mask: 0xFF,
        recipe: BringupRecipe {
            roms: RomSet::Single {
                path: "machines/p55va/p55va.awd",
                base: 0xE_0000,
                size: 0x2_0000,
                layout: RomLayout::Linear,
            },
            kit: ChipsetKit::Award430Vx,
            slot_overrides: P55VA_SLOT_OVERRIDES,
        },
        onboard_video: None,
        gate: MachineGate::Always,
    },
    MachineDescriptor {
        name: "[i430VX] PC Chips M540N",
        internal_name: "m540n",
        machine_type: MachineType::Socket7,
        cpu_families: CPUS_SOCKET7,
        flags: FLAGS_PCI,
        ram: RAM_430VX,
        nvr_mask: 0xFF,
        recipe: BringupRecipe {
            roms: RomSet::Single {
                path: "machines/m540n/m540n.awd",
                base: 0xE_0000,
                size: 0x2_0000,
                layout: RomLayout::Linear,
            },
            kit: ChipsetKit::Award430Vx,
            slot_overrides: &[],
        },
        onboard_video: None,
        gate: MachineGate::DevBuild,
    },
];

/// All catalog entries, including unavailable ones.
pub fn all() -> &'static [MachineDescriptor] {
    MACHINES
}

pub fn count() -> usize {
    MACHINES.len()
}

/// Entry at the (build-local) numeric index.
pub fn get(index: usize) -> Option<&'static MachineDescriptor> {
    MACHINES.get(index)
}

/// Look an entry up by its stable identifier.
pub fn find(internal_name: &str) -> Option<&'static MachineDescriptor> {
    MACHINES
        .iter()
        .find(|desc| desc.internal_name == internal_name)
}

/// Entries selectable under the current build's feature set.
pub fn iter_available() -> impl Iterator<Item = &'static MachineDescriptor> {
    MACHINES.iter().filter(|desc| desc.available())
}
