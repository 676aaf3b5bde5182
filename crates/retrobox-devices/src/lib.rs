//! Device descriptors and session-scoped registries for retrobox machines.
//!
//! This layer deliberately treats devices as opaque: a [`DeviceProfile`] names
//! a part and classifies it, and machine bring-up appends profiles to the
//! [`DeviceRegistry`] in a fixed order. Register-level behavior of the parts
//! lives with the emulation core, not here.
#![forbid(unsafe_code)]

pub mod pci;
pub mod profile;

/// Coarse classification of a board-level device.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DeviceClass {
    /// Keyboard controller (8042 variants).
    KeyboardController,
    /// Plain floppy controller (pre-Super-I/O boards).
    FloppyController,
    /// Super I/O chip (floppy + serial + parallel, sometimes KBC).
    SuperIo,
    /// Flash or EEPROM part backing the system BIOS.
    Flash,
    /// Chipset northbridge (CPU/memory/PCI).
    Northbridge,
    /// Chipset southbridge (PCI/ISA bridge + legacy I/O).
    Southbridge,
    /// Single-chip or discrete-logic chipset on non-PCI boards.
    Chipset,
    /// IDE controller.
    Ide,
    /// On-board video adapter.
    Video,
}

/// Opaque descriptor for a board-level device.
///
/// Profiles are declared as `pub const` items in [`profile`] and referenced
/// by machine recipes; identity comparisons use `internal_name`.
#[derive(Debug, Eq, PartialEq)]
pub struct DeviceProfile {
    /// Display name.
    pub name: &'static str,
    /// Stable identifier, unique across the profile catalog.
    pub internal_name: &'static str,
    pub class: DeviceClass,
}

/// Ordered list of devices registered during one machine bring-up.
///
/// Append-only while a machine session is live; replaced (or [`cleared`])
/// when the active machine changes. Registration is infallible: the entries
/// come from build-time-constant recipes, not user input.
///
/// [`cleared`]: DeviceRegistry::clear
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    entries: Vec<&'static DeviceProfile>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, profile: &'static DeviceProfile) {
        self.entries.push(profile);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static DeviceProfile> + '_ {
        self.entries.iter().copied()
    }

    /// Number of registered devices with the given stable identifier.
    pub fn count_of(&self, internal_name: &str) -> usize {
        self.iter()
            .filter(|p| p.internal_name == internal_name)
            .count()
    }

    /// Drop all registrations (machine teardown).
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_preserves_insertion_order() {
        let mut reg = DeviceRegistry::new();
        reg.add(&profile::KBC_PS2_AMI);
        reg.add(&profile::NB_I430LX);
        reg.add(&profile::KBC_PS2_AMI);

        let names: Vec<_> = reg.iter().map(|p| p.internal_name).collect();
        assert_eq!(names, vec!["kbc_ps2_ami", "i430lx", "kbc_ps2_ami"]);
        assert_eq!(reg.count_of("kbc_ps2_ami"), 2);

        reg.clear();
        assert!(reg.is_empty());
    }
}
