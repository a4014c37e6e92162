use binrw::{BinRead, BinWrite};

use crate::{EntryVersion, Mp4Error};

/// Version and flags following the atom header
/// in "full" atoms.
///
/// ```ignore
/// | [V] [F F F] |
///    |   |
///    |   24bit flags
///    8bit version
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, BinRead, BinWrite)]
#[brw(big)]
pub struct FullAtomHeader {
    pub(crate) version: u8,
    pub(crate) flags: [u8; 3],
}

impl FullAtomHeader {
    pub fn new(version: u8, flags: [u8; 3]) -> Self {
        Self {version, flags}
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn flags(&self) -> [u8; 3] {
        self.flags
    }

    /// Flags as a 24-bit value.
    pub fn flags_u32(&self) -> u32 {
        u32::from_be_bytes([0, self.flags[0], self.flags[1], self.flags[2]])
    }

    /// Edit list entry layout for this version.
    pub fn entry_version(&self) -> Result<EntryVersion, Mp4Error> {
        EntryVersion::try_from(self.version)
    }
}
