//! PCI slot-map properties across the whole catalog.

use std::fs;
use std::path::Path;

use retrobox_devices::pci::{pins_for_slot, SlotClass};
use retrobox_machines::bringup::{bring_up, BringupContext, BringupMode, VideoSelection};
use retrobox_machines::{catalog, MachineDescriptor};
use retrobox_rom::{RomDir, RomSet};

fn materialize_roms(root: &Path, desc: &MachineDescriptor) {
    let per_file = match desc.recipe.roms {
        RomSet::Single { size, .. } => size,
        RomSet::Pair { size, .. } => size / 2,
    };
    for rel in desc.recipe.roms.paths() {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, vec![0xFFu8; per_file]).unwrap();
    }
}

fn bring_up_full(desc: &MachineDescriptor, root: &Path) -> BringupContext {
    materialize_roms(root, desc);
    let roms = RomDir::new(root);
    let mut ctx = BringupContext::new(BringupMode::Full, VideoSelection::None);
    bring_up(desc, &roms, &mut ctx).unwrap();
    ctx
}

fn is_rotation_of(a: [u8; 4], b: [u8; 4]) -> bool {
    (0..4).any(|r| (0..4).all(|k| a[(k + r) % 4] == b[k]))
}

#[test]
fn expansion_slot_pins_swizzle_across_consecutive_slots() {
    let tmp = tempfile::tempdir().unwrap();

    for desc in catalog::all().iter().filter(|d| d.recipe.kit.has_pci()) {
        // Boards with documented non-standard wiring are exempt; covered by
        // `non_cyclic_wiring_is_preserved_and_reported` below.
        if !desc.recipe.slot_overrides.is_empty() {
            continue;
        }
        let ctx = bring_up_full(desc, tmp.path());

        let normal: Vec<_> = ctx
            .pci
            .iter()
            .filter(|def| def.class == SlotClass::Normal)
            .collect();
        assert!(!normal.is_empty(), "{}", desc.internal_name);

        for def in &normal {
            assert!(
                (0..4).any(|r| def.pins == pins_for_slot(r)),
                "{}: slot {:#04x} pins {:?} are not a rotation of {{1,2,3,4}}",
                desc.internal_name,
                def.slot,
                def.pins
            );
        }
        for pair in normal.windows(2) {
            assert!(
                is_rotation_of(pair[0].pins, pair[1].pins),
                "{}: slots {:#04x}/{:#04x} are not rotations of each other",
                desc.internal_name,
                pair[0].slot,
                pair[1].slot
            );
        }
    }
}

#[test]
fn bridges_have_no_interrupt_pins() {
    let tmp = tempfile::tempdir().unwrap();

    for desc in catalog::all().iter().filter(|d| d.recipe.kit.has_pci()) {
        let ctx = bring_up_full(desc, tmp.path());
        for def in ctx.pci.iter() {
            if matches!(def.class, SlotClass::Northbridge | SlotClass::Southbridge) {
                assert_eq!(def.pins, [0, 0, 0, 0], "{}", desc.internal_name);
            }
        }
    }
}

#[test]
fn pirq_lines_follow_the_kits_steering_capability() {
    use retrobox_devices::pci::PciInitFlags;

    let tmp = tempfile::tempdir().unwrap();

    for desc in catalog::all().iter().filter(|d| d.recipe.kit.has_pci()) {
        let ctx = bring_up_full(desc, tmp.path());
        let (_, flags) = ctx.pci.mechanism().unwrap();
        let steerable = !flags.contains(PciInitFlags::NO_IRQ_STEERING);
        for line in 1..=4 {
            assert_eq!(
                ctx.pci.irq_routing(line),
                steerable,
                "{}: PIRQ line {line} routing disagrees with the kit's steering",
                desc.internal_name
            );
        }
    }
}

#[test]
fn non_cyclic_wiring_is_preserved_and_reported() {
    let tmp = tempfile::tempdir().unwrap();
    let desc = catalog::find("p55va").unwrap();
    let ctx = bring_up_full(desc, tmp.path());

    // The override replaced the kit's entry for slot 0x0B verbatim.
    assert_eq!(ctx.pci.slot(0x0B).unwrap().pins, [4, 3, 2, 1]);
    assert_eq!(ctx.pci.non_cyclic_slots(), vec![0x0B]);

    // Its sibling board on the same kit has fully standard wiring.
    let sibling = bring_up_full(catalog::find("hot557").unwrap(), tmp.path());
    assert!(sibling.pci.non_cyclic_slots().is_empty());
}
