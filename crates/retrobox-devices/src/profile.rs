//! Canonical device profiles referenced by machine recipes.
//!
//! One `pub const` per part. The contract test in `tests/device_profile.rs`
//! locks in the stable identifiers so recipes and persisted configuration
//! cannot drift during refactors.

use crate::{DeviceClass, DeviceProfile};

// Keyboard controllers.

pub const KBC_AT_AMI: DeviceProfile = DeviceProfile {
    name: "AMI AT keyboard controller",
    internal_name: "kbc_at_ami",
    class: DeviceClass::KeyboardController,
};

pub const KBC_AT_AWARD: DeviceProfile = DeviceProfile {
    name: "Award AT keyboard controller",
    internal_name: "kbc_at_award",
    class: DeviceClass::KeyboardController,
};

pub const KBC_AT_MR: DeviceProfile = DeviceProfile {
    name: "MR BIOS AT keyboard controller",
    internal_name: "kbc_at_mr",
    class: DeviceClass::KeyboardController,
};

pub const KBC_PS2_AMI: DeviceProfile = DeviceProfile {
    name: "AMI PS/2 keyboard controller",
    internal_name: "kbc_ps2_ami",
    class: DeviceClass::KeyboardController,
};

// Floppy and Super I/O.

pub const FDC_AT: DeviceProfile = DeviceProfile {
    name: "PC/AT floppy controller",
    internal_name: "fdc_at",
    class: DeviceClass::FloppyController,
};

pub const SUPERIO_FDC37C665: DeviceProfile = DeviceProfile {
    name: "SMC FDC37C665 Super I/O",
    internal_name: "fdc37c665",
    class: DeviceClass::SuperIo,
};

pub const SUPERIO_PC87306: DeviceProfile = DeviceProfile {
    name: "National Semiconductor PC87306 Super I/O",
    internal_name: "pc87306",
    class: DeviceClass::SuperIo,
};

pub const SUPERIO_UM8669F: DeviceProfile = DeviceProfile {
    name: "UMC UM8669F Super I/O",
    internal_name: "um8669f",
    class: DeviceClass::SuperIo,
};

// Flash / EEPROM parts.

pub const FLASH_INTEL_BXT: DeviceProfile = DeviceProfile {
    name: "Intel 28F001BX-T flash",
    internal_name: "intel_flash_bxt",
    class: DeviceClass::Flash,
};

pub const FLASH_SST_29EE010: DeviceProfile = DeviceProfile {
    name: "SST 29EE010 flash",
    internal_name: "sst_29ee010",
    class: DeviceClass::Flash,
};

// PCI chipsets (northbridge + southbridge pairs).

pub const NB_I430LX: DeviceProfile = DeviceProfile {
    name: "Intel 82434LX (i430LX)",
    internal_name: "i430lx",
    class: DeviceClass::Northbridge,
};

pub const NB_I430NX: DeviceProfile = DeviceProfile {
    name: "Intel 82434NX (i430NX)",
    internal_name: "i430nx",
    class: DeviceClass::Northbridge,
};

pub const NB_I430FX: DeviceProfile = DeviceProfile {
    name: "Intel 82437FX (i430FX)",
    internal_name: "i430fx",
    class: DeviceClass::Northbridge,
};

pub const NB_I430VX: DeviceProfile = DeviceProfile {
    name: "Intel 82437VX (i430VX)",
    internal_name: "i430vx",
    class: DeviceClass::Northbridge,
};

pub const NB_SIS_85C501: DeviceProfile = DeviceProfile {
    name: "SiS 85C501",
    internal_name: "sis85c501",
    class: DeviceClass::Northbridge,
};

pub const SB_SIO_ZB: DeviceProfile = DeviceProfile {
    name: "Intel 82378ZB System I/O",
    internal_name: "sio_zb",
    class: DeviceClass::Southbridge,
};

pub const SB_PIIX: DeviceProfile = DeviceProfile {
    name: "Intel 82371FB (PIIX)",
    internal_name: "piix",
    class: DeviceClass::Southbridge,
};

pub const SB_PIIX3: DeviceProfile = DeviceProfile {
    name: "Intel 82371SB (PIIX3)",
    internal_name: "piix3",
    class: DeviceClass::Southbridge,
};

pub const SB_SIS_85C503: DeviceProfile = DeviceProfile {
    name: "SiS 85C503",
    internal_name: "sis85c503",
    class: DeviceClass::Southbridge,
};

// Non-PCI chipsets.

pub const CHIPSET_SCAT: DeviceProfile = DeviceProfile {
    name: "C&T 82C235 SCAT",
    internal_name: "scat",
    class: DeviceClass::Chipset,
};

pub const CHIPSET_NEAT: DeviceProfile = DeviceProfile {
    name: "C&T CS8221 NEAT",
    internal_name: "neat",
    class: DeviceClass::Chipset,
};

pub const CHIPSET_OPTI495: DeviceProfile = DeviceProfile {
    name: "OPTi 82C495",
    internal_name: "opti495",
    class: DeviceClass::Chipset,
};

// IDE controllers.

pub const IDE_PCI_2CH: DeviceProfile = DeviceProfile {
    name: "PCI IDE controller (dual channel)",
    internal_name: "ide_pci_2ch",
    class: DeviceClass::Ide,
};

pub const IDE_PCI: DeviceProfile = DeviceProfile {
    name: "PCI IDE controller (single channel)",
    internal_name: "ide_pci",
    class: DeviceClass::Ide,
};

pub const IDE_VLB: DeviceProfile = DeviceProfile {
    name: "VLB IDE controller",
    internal_name: "ide_vlb",
    class: DeviceClass::Ide,
};

// On-board video.

pub const VIDEO_GD5428_ONBOARD: DeviceProfile = DeviceProfile {
    name: "Cirrus Logic GD-5428 (on-board)",
    internal_name: "gd5428_onboard",
    class: DeviceClass::Video,
};

pub const VIDEO_TGUI9440_ONBOARD: DeviceProfile = DeviceProfile {
    name: "Trident TGUI9440 (on-board)",
    internal_name: "tgui9440_onboard",
    class: DeviceClass::Video,
};

/// Every profile in this module, for catalog-wide contract tests.
pub const ALL_PROFILES: &[&DeviceProfile] = &[
    &KBC_AT_AMI,
    &KBC_AT_AWARD,
    &KBC_AT_MR,
    &KBC_PS2_AMI,
    &FDC_AT,
    &SUPERIO_FDC37C665,
    &SUPERIO_PC87306,
    &SUPERIO_UM8669F,
    &FLASH_INTEL_BXT,
    &FLASH_SST_29EE010,
    &NB_I430LX,
    &NB_I430NX,
    &NB_I430FX,
    &NB_I430VX,
    &NB_SIS_85C501,
    &SB_SIO_ZB,
    &SB_PIIX,
    &SB_PIIX3,
    &SB_SIS_85C503,
    &CHIPSET_SCAT,
    &CHIPSET_NEAT,
    &CHIPSET_OPTI495,
    &IDE_PCI_2CH,
    &IDE_PCI,
    &IDE_VLB,
    &VIDEO_GD5428_ONBOARD,
    &VIDEO_TGUI9440_ONBOARD,
];
