use std::collections::HashSet;

use retrobox_devices::profile::*;
use retrobox_devices::DeviceClass;

#[test]
fn canonical_internal_names() {
    // Stable identifiers referenced by machine recipes and persisted
    // configuration; lock them in so they cannot drift during refactors.
    assert_eq!(NB_I430LX.internal_name, "i430lx");
    assert_eq!(NB_I430NX.internal_name, "i430nx");
    assert_eq!(NB_I430FX.internal_name, "i430fx");
    assert_eq!(NB_I430VX.internal_name, "i430vx");
    assert_eq!(SB_SIO_ZB.internal_name, "sio_zb");
    assert_eq!(SB_PIIX.internal_name, "piix");
    assert_eq!(SB_PIIX3.internal_name, "piix3");
    assert_eq!(CHIPSET_OPTI495.internal_name, "opti495");
    assert_eq!(KBC_PS2_AMI.internal_name, "kbc_ps2_ami");
    assert_eq!(SUPERIO_FDC37C665.internal_name, "fdc37c665");
    assert_eq!(FLASH_INTEL_BXT.internal_name, "intel_flash_bxt");
}

#[test]
fn internal_names_are_unique() {
    let mut seen = HashSet::new();
    for profile in ALL_PROFILES {
        assert!(
            seen.insert(profile.internal_name),
            "duplicate device internal_name: {}",
            profile.internal_name
        );
    }
}

#[test]
fn classes_are_consistent() {
    for profile in ALL_PROFILES {
        match profile.class {
            DeviceClass::Northbridge => assert!(profile.internal_name.starts_with("i4")
                || profile.internal_name.starts_with("sis")),
            DeviceClass::KeyboardController => {
                assert!(profile.internal_name.starts_with("kbc_"))
            }
            _ => {}
        }
    }
}
