//! PCI configuration-mechanism selection and the per-machine slot map.
//!
//! The slot map records, for each physical slot number, what class of device
//! the board wires there and how the slot's four interrupt pins (INTA#-INTD#)
//! land on the logical PIRQ lines. Expansion slots normally follow the
//! classic swizzle — each successive slot rotates `{1,2,3,4}` by one so
//! shared-IRQ load spreads across slots — but the map always stores pins as
//! explicit per-slot data, because a few boards wire their pins differently
//! on purpose. [`PciSlotMap::non_cyclic_slots`] reports such slots for data
//! review instead of anybody "fixing" them.

use std::collections::BTreeMap;

use bitflags::bitflags;

/// The two legacy x86 PCI configuration access mechanisms.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PciConfigMechanism {
    /// Mechanism #1 (0xCF8/0xCFC address/data ports).
    Type1,
    /// Mechanism #2 (0xC000-0xCFFF forwarding windows).
    Type2,
}

bitflags! {
    /// Board-level variations of the configuration mechanism.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
    pub struct PciInitFlags: u8 {
        /// The chipset cannot steer PIRQ lines; routing is fixed by wiring.
        const NO_IRQ_STEERING = 1 << 0;
        /// The chipset can switch between mechanism types at runtime.
        const CAN_SWITCH_TYPE = 1 << 1;
    }
}

/// What the board wires into a given physical slot number.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SlotClass {
    Northbridge,
    Southbridge,
    /// Ordinary expansion slot.
    Normal,
    /// Board-specific special function (riser, docking, ...).
    Special,
    /// On-board SCSI controller.
    Scsi,
    /// Other on-board PCI function.
    Onboard,
}

/// One slot's entry in the map. `pins` holds the logical PIRQ line (1-4) for
/// INTA#..INTD# in order; 0 means the pin is not connected (bridges).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SlotDef {
    pub slot: u8,
    pub class: SlotClass,
    pub pins: [u8; 4],
}

impl SlotDef {
    pub const fn new(slot: u8, class: SlotClass, pins: [u8; 4]) -> Self {
        Self { slot, class, pins }
    }

    /// A bridge entry with no interrupt pins wired.
    pub const fn bridge(slot: u8, class: SlotClass) -> Self {
        Self::new(slot, class, [0, 0, 0, 0])
    }
}

/// The standard swizzle: rotation of `{1,2,3,4}` by the slot's index within
/// its expansion-slot group.
pub const fn pins_for_slot(group_index: u8) -> [u8; 4] {
    let r = group_index % 4;
    [
        (r % 4) + 1,
        ((r + 1) % 4) + 1,
        ((r + 2) % 4) + 1,
        ((r + 3) % 4) + 1,
    ]
}

/// Per-machine PCI topology, rebuilt from scratch on every machine bring-up.
///
/// Not mutated after bring-up within a session; the next bring-up replaces
/// the whole map.
#[derive(Debug)]
pub struct PciSlotMap {
    mechanism: Option<(PciConfigMechanism, PciInitFlags)>,
    slots: BTreeMap<u8, SlotDef>,
    /// PIRQ line enable state, index 0 = line 1.
    irq_routing: [bool; 4],
}

impl Default for PciSlotMap {
    fn default() -> Self {
        Self::new()
    }
}

impl PciSlotMap {
    pub fn new() -> Self {
        Self {
            mechanism: None,
            slots: BTreeMap::new(),
            irq_routing: [true; 4],
        }
    }

    pub fn init_mechanism(&mut self, mechanism: PciConfigMechanism, flags: PciInitFlags) {
        self.mechanism = Some((mechanism, flags));
    }

    pub fn mechanism(&self) -> Option<(PciConfigMechanism, PciInitFlags)> {
        self.mechanism
    }

    /// Whether `init_mechanism` has been called for this session.
    pub fn is_initialized(&self) -> bool {
        self.mechanism.is_some()
    }

    /// Register a slot. Last write wins for a given slot number.
    pub fn register_slot(&mut self, def: SlotDef) {
        self.slots.insert(def.slot, def);
    }

    pub fn slot(&self, slot: u8) -> Option<&SlotDef> {
        self.slots.get(&slot)
    }

    /// Slots in ascending slot-number order.
    pub fn iter(&self) -> impl Iterator<Item = &SlotDef> + '_ {
        self.slots.values()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Enable or disable a PIRQ line (1-4).
    pub fn set_irq_routing(&mut self, line: u8, enabled: bool) {
        if (1..=4).contains(&line) {
            self.irq_routing[usize::from(line - 1)] = enabled;
        }
    }

    pub fn irq_routing(&self, line: u8) -> bool {
        (1..=4).contains(&line) && self.irq_routing[usize::from(line - 1)]
    }

    /// Expansion slots whose pins are not any rotation of `{1,2,3,4}`.
    ///
    /// Non-empty output is a data-review item, not an error: some boards
    /// genuinely wire their slots this way.
    pub fn non_cyclic_slots(&self) -> Vec<u8> {
        self.iter()
            .filter(|def| def.class == SlotClass::Normal)
            .filter(|def| !is_cyclic(def.pins))
            .map(|def| def.slot)
            .collect()
    }

    /// Drop all state (machine teardown).
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

fn is_cyclic(pins: [u8; 4]) -> bool {
    (0..4).any(|r| pins == pins_for_slot(r))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swizzle_rotates_by_group_index() {
        assert_eq!(pins_for_slot(0), [1, 2, 3, 4]);
        assert_eq!(pins_for_slot(1), [2, 3, 4, 1]);
        assert_eq!(pins_for_slot(2), [3, 4, 1, 2]);
        assert_eq!(pins_for_slot(3), [4, 1, 2, 3]);
        // Group index wraps modulo 4.
        assert_eq!(pins_for_slot(4), pins_for_slot(0));
    }

    #[test]
    fn consecutive_slots_are_rotations_of_each_other() {
        for i in 0..8u8 {
            let a = pins_for_slot(i);
            let b = pins_for_slot(i + 1);
            let rotated: Vec<u8> = (0..4).map(|k| a[(k + 1) % 4]).collect();
            assert_eq!(rotated, b.to_vec());
        }
    }

    #[test]
    fn register_slot_last_write_wins() {
        let mut map = PciSlotMap::new();
        map.register_slot(SlotDef::new(0x0C, SlotClass::Normal, pins_for_slot(0)));
        map.register_slot(SlotDef::new(0x0C, SlotClass::Normal, pins_for_slot(2)));

        assert_eq!(map.len(), 1);
        assert_eq!(map.slot(0x0C).unwrap().pins, [3, 4, 1, 2]);
    }

    #[test]
    fn non_cyclic_expansion_slots_are_reported() {
        let mut map = PciSlotMap::new();
        map.register_slot(SlotDef::bridge(0x00, SlotClass::Northbridge));
        map.register_slot(SlotDef::new(0x0C, SlotClass::Normal, [1, 2, 3, 4]));
        map.register_slot(SlotDef::new(0x0E, SlotClass::Normal, [4, 3, 2, 1]));
        // Bridge pins are all-zero but bridges are exempt from the rule.
        assert_eq!(map.non_cyclic_slots(), vec![0x0E]);
    }

    #[test]
    fn irq_routing_defaults_enabled_and_ignores_out_of_range_lines() {
        let mut map = PciSlotMap::new();
        assert!(map.irq_routing(1));
        map.set_irq_routing(2, false);
        assert!(!map.irq_routing(2));
        map.set_irq_routing(0, false);
        map.set_irq_routing(5, false);
        assert!(map.irq_routing(1));
        assert!(!map.irq_routing(0));
        assert!(!map.irq_routing(5));
    }

    #[test]
    fn clear_resets_mechanism_and_slots() {
        let mut map = PciSlotMap::new();
        map.init_mechanism(PciConfigMechanism::Type2, PciInitFlags::CAN_SWITCH_TYPE);
        map.register_slot(SlotDef::bridge(0x00, SlotClass::Northbridge));
        map.clear();
        assert!(!map.is_initialized());
        assert!(map.is_empty());
    }
}
