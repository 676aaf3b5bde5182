//! BIOS ROM image loading for retrobox machines.
//!
//! A machine's bring-up recipe names its firmware images as a [`RomSet`]: one
//! or two files, a load base address, an exact expected size, and a layout
//! describing how the file bytes map onto the emulated address range. Vendors
//! shipped dumps in several shapes, all of which appear in the machine
//! catalog:
//! - a single linear image,
//! - a single image with its bytes stored in reverse order,
//! - a low/high pair interleaved byte-by-byte (even/odd EPROMs), and
//! - a low/high pair occupying two halves of the window at a fixed offset.
//!
//! [`RomDir`] resolves the relative paths in a `RomSet` against a ROM root
//! directory and either assembles the load windows ([`RomDir::load`]) or
//! checks availability without reading anything into the machine
//! ([`RomDir::probe`], the "check-only" path used by configuration UIs).
#![forbid(unsafe_code)]

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// Byte layout of a single-file ROM dump.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RomLayout {
    /// File bytes map directly onto the window.
    Linear,
    /// File bytes are stored last-to-first (some dumper setups wrote the
    /// EPROM contents in descending address order).
    Reversed,
}

/// Byte layout of a two-file ROM dump.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PairLayout {
    /// `low` supplies even addresses, `high` supplies odd addresses
    /// (separate even/odd EPROMs on a 16-bit bus).
    Interleaved,
    /// `low` starts at offset 0 of the window, `high` at `high_offset`.
    Concat { high_offset: u64 },
}

/// Declarative description of a machine's firmware images.
///
/// Paths are relative to the [`RomDir`] root. `size` is the assembled window
/// size in bytes; for [`RomSet::Pair`] each file must be exactly `size / 2`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RomSet {
    Single {
        path: &'static str,
        base: u64,
        size: usize,
        layout: RomLayout,
    },
    Pair {
        low: &'static str,
        high: &'static str,
        base: u64,
        size: usize,
        layout: PairLayout,
    },
}

impl RomSet {
    /// Base guest-physical address of the assembled window.
    pub const fn base(&self) -> u64 {
        match self {
            RomSet::Single { base, .. } | RomSet::Pair { base, .. } => *base,
        }
    }

    /// Size in bytes of the assembled window.
    pub const fn size(&self) -> usize {
        match self {
            RomSet::Single { size, .. } | RomSet::Pair { size, .. } => *size,
        }
    }

    /// Relative paths of the files backing this set, in load order.
    pub fn paths(&self) -> impl Iterator<Item = &'static str> {
        let (a, b) = match self {
            RomSet::Single { path, .. } => (*path, None),
            RomSet::Pair { low, high, .. } => (*low, Some(*high)),
        };
        std::iter::once(a).chain(b)
    }
}

/// A ROM image assembled at a fixed guest-physical base address.
///
/// The emulation core maps each window read-only into the physical address
/// space, analogous to mapping a firmware ROM onto a memory bus.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RomWindow {
    pub base: u64,
    pub bytes: Vec<u8>,
}

/// Errors reading a ROM set from disk.
///
/// Machine bring-up does not distinguish the variants; any of them means
/// "required BIOS image unavailable" and aborts bring-up before any device
/// registration happens.
#[derive(Debug, Error)]
pub enum RomError {
    #[error("ROM image not found: {path}")]
    NotFound { path: PathBuf },
    #[error("ROM image {path} has wrong size: expected {expected} bytes, found {actual}")]
    WrongSize {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },
    #[error("failed to read ROM image {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Filesystem root containing the ROM tree referenced by machine recipes.
#[derive(Clone, Debug)]
pub struct RomDir {
    root: PathBuf,
}

impl RomDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Read and assemble `set` into its load windows.
    ///
    /// All files are validated before any bytes are assembled, so a failure
    /// never yields a partial result.
    pub fn load(&self, set: &RomSet) -> Result<Vec<RomWindow>, RomError> {
        match *set {
            RomSet::Single {
                path,
                base,
                size,
                layout,
            } => {
                let mut bytes = self.read_exact(path, size as u64)?;
                if layout == RomLayout::Reversed {
                    bytes.reverse();
                }
                debug!(path, base, size, "loaded ROM image");
                Ok(vec![RomWindow { base, bytes }])
            }
            RomSet::Pair {
                low,
                high,
                base,
                size,
                layout,
            } => {
                let half = (size / 2) as u64;
                let low_bytes = self.read_exact(low, half)?;
                let high_bytes = self.read_exact(high, half)?;

                let mut bytes = vec![0u8; size];
                match layout {
                    PairLayout::Interleaved => {
                        for (i, (&lo, &hi)) in low_bytes.iter().zip(&high_bytes).enumerate() {
                            bytes[i * 2] = lo;
                            bytes[i * 2 + 1] = hi;
                        }
                    }
                    PairLayout::Concat { high_offset } => {
                        let off = high_offset as usize;
                        bytes[..low_bytes.len()].copy_from_slice(&low_bytes);
                        bytes[off..off + high_bytes.len()].copy_from_slice(&high_bytes);
                    }
                }
                debug!(low, high, base, size, "loaded split ROM image pair");
                Ok(vec![RomWindow { base, bytes }])
            }
        }
    }

    /// Check that every file in `set` is present with the expected size.
    ///
    /// This never reads file contents and never has side effects; it exists
    /// so configuration layers can validate ROM availability without
    /// bringing a machine up.
    pub fn probe(&self, set: &RomSet) -> bool {
        let expected = match set {
            RomSet::Single { size, .. } => *size as u64,
            RomSet::Pair { size, .. } => (*size / 2) as u64,
        };
        set.paths().all(|rel| {
            let path = self.root.join(rel);
            match fs::metadata(&path) {
                Ok(meta) => meta.is_file() && meta.len() == expected,
                Err(_) => false,
            }
        })
    }

    fn read_exact(&self, rel: &str, expected: u64) -> Result<Vec<u8>, RomError> {
        let path = self.root.join(rel);
        let meta = match fs::metadata(&path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(RomError::NotFound { path });
            }
            Err(source) => return Err(RomError::Io { path, source }),
        };
        if meta.len() != expected {
            return Err(RomError::WrongSize {
                path,
                expected,
                actual: meta.len(),
            });
        }
        fs::read(&path).map_err(|source| RomError::Io { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_rom(dir: &Path, rel: &str, bytes: &[u8]) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, bytes).unwrap();
    }

    #[test]
    fn single_linear_load() {
        let tmp = tempfile::tempdir().unwrap();
        write_rom(tmp.path(), "machines/m/bios.bin", &[1, 2, 3, 4]);

        let dir = RomDir::new(tmp.path());
        let set = RomSet::Single {
            path: "machines/m/bios.bin",
            base: 0xF_0000,
            size: 4,
            layout: RomLayout::Linear,
        };
        let windows = dir.load(&set).unwrap();
        assert_eq!(
            windows,
            vec![RomWindow {
                base: 0xF_0000,
                bytes: vec![1, 2, 3, 4],
            }]
        );
    }

    #[test]
    fn single_reversed_load() {
        let tmp = tempfile::tempdir().unwrap();
        write_rom(tmp.path(), "bios.bin", &[1, 2, 3, 4]);

        let dir = RomDir::new(tmp.path());
        let set = RomSet::Single {
            path: "bios.bin",
            base: 0,
            size: 4,
            layout: RomLayout::Reversed,
        };
        assert_eq!(dir.load(&set).unwrap()[0].bytes, vec![4, 3, 2, 1]);
    }

    #[test]
    fn pair_interleaved_load() {
        let tmp = tempfile::tempdir().unwrap();
        write_rom(tmp.path(), "even.bin", &[0x10, 0x20]);
        write_rom(tmp.path(), "odd.bin", &[0x11, 0x21]);

        let dir = RomDir::new(tmp.path());
        let set = RomSet::Pair {
            low: "even.bin",
            high: "odd.bin",
            base: 0,
            size: 4,
            layout: PairLayout::Interleaved,
        };
        assert_eq!(dir.load(&set).unwrap()[0].bytes, vec![0x10, 0x11, 0x20, 0x21]);
    }

    #[test]
    fn pair_concat_load() {
        let tmp = tempfile::tempdir().unwrap();
        write_rom(tmp.path(), "lo.bin", &[1, 2]);
        write_rom(tmp.path(), "hi.bin", &[3, 4]);

        let dir = RomDir::new(tmp.path());
        let set = RomSet::Pair {
            low: "lo.bin",
            high: "hi.bin",
            base: 0,
            size: 4,
            layout: PairLayout::Concat { high_offset: 2 },
        };
        assert_eq!(dir.load(&set).unwrap()[0].bytes, vec![1, 2, 3, 4]);
    }

    #[test]
    fn wrong_size_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        write_rom(tmp.path(), "bios.bin", &[0; 8]);

        let dir = RomDir::new(tmp.path());
        let set = RomSet::Single {
            path: "bios.bin",
            base: 0,
            size: 16,
            layout: RomLayout::Linear,
        };
        assert!(matches!(
            dir.load(&set),
            Err(RomError::WrongSize {
                expected: 16,
                actual: 8,
                ..
            })
        ));
        assert!(!dir.probe(&set));
    }

    #[test]
    fn missing_file_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = RomDir::new(tmp.path());
        let set = RomSet::Single {
            path: "nope.bin",
            base: 0,
            size: 4,
            layout: RomLayout::Linear,
        };
        assert!(matches!(dir.load(&set), Err(RomError::NotFound { .. })));
        assert!(!dir.probe(&set));
    }

    #[test]
    fn pair_probe_requires_both_halves() {
        let tmp = tempfile::tempdir().unwrap();
        write_rom(tmp.path(), "lo.bin", &[0; 2]);

        let dir = RomDir::new(tmp.path());
        let set = RomSet::Pair {
            low: "lo.bin",
            high: "hi.bin",
            base: 0,
            size: 4,
            layout: PairLayout::Interleaved,
        };
        assert!(!dir.probe(&set));

        write_rom(tmp.path(), "hi.bin", &[0; 2]);
        assert!(dir.probe(&set));
    }
}
