use std::ops::Range;

use crate::{consts::{HEADER_SIZE, LARGE_HEADER_SIZE}, FourCC, Mp4Error};

/// Atom header.
/// 8 or 16 bytes in MP4, depending on whether
/// 32 or 64-bit sized.
///
/// ```ignore
/// | [X X X X] [Y Y Y Y] [Z Z Z Z Z Z Z Z] |
///    |         |         |
///    |         |         64bit size (optional, only if 32 bit size == 1)
///    |         FourCC
///    32bit size
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomHeader {
    /// Total atom size in bytes including 8/16 byte header.
    pub(crate) atom_size: u64,
    /// FourCC
    pub(crate) name: FourCC,
    /// Absolute byte offset for start of atom in the stream,
    /// i.e. byte offset for its header,
    /// starting with 32-bit size.
    pub(crate) offset: u64,
    /// Set to `true` if atom size specified
    /// in 64 bit area. Some writers specify
    /// all sizes as 64 bit regardless
    /// of actual atom size, so this can not
    /// be derived from the size alone.
    pub(crate) size_64bit: bool
}

impl AtomHeader {
    /// Header for a new atom with a data load of
    /// `data_size` bytes. Uses a 64-bit size only
    /// if the total size does not fit in 32 bits.
    pub fn new(name: FourCC, data_size: u64) -> Self {
        let size_64bit = data_size + HEADER_SIZE as u64 > u32::MAX as u64;
        let header_size = if size_64bit {LARGE_HEADER_SIZE} else {HEADER_SIZE};
        Self {
            atom_size: data_size + header_size as u64,
            name,
            offset: 0,
            size_64bit,
        }
    }

    pub fn start(&self) -> u64 {
        self.offset
    }

    pub fn end(&self) -> u64 {
        self.offset + self.atom_size
    }

    pub fn atom_size(&self) -> u64 {
        self.atom_size
    }

    pub fn name(&self) -> &FourCC {
        &self.name
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Determine header size in bytes.
    /// Returns 8 or 16 bytes.
    pub fn header_size(&self) -> u8 {
        match self.size_64bit {
            true => LARGE_HEADER_SIZE,
            false => HEADER_SIZE,
        }
    }

    /// Data load absolute offset,
    /// i.e. position after header
    /// adjusted for optional 64bit size value.
    pub fn data_offset(&self) -> u64 {
        self.offset + self.header_size() as u64
    }

    /// Size of data load, adjusted for header size
    /// (excludes header size).
    pub fn data_size(&self) -> u64 {
        self.atom_size.saturating_sub(self.header_size() as u64)
    }

    /// Returns start, end offset range for atom.
    pub fn bounds(&self) -> Range<u64> {
        self.offset .. self.end()
    }

    /// Returns `true` if this atom lies
    /// completely within `parent`.
    pub fn within(&self, parent: &AtomHeader) -> bool {
        parent.start() <= self.start() && self.end() <= parent.end()
    }

    /// Ensures user specified name (Four CC)
    /// matches that of the header.
    pub(crate) fn match_name(&self, name: &FourCC) -> Result<(), Mp4Error> {
        if &self.name != name {
            Err(Mp4Error::AtomMismatch{
                got: self.name.to_str().to_owned(),
                expected: name.to_str().to_owned()
            })
        } else {
            Ok(())
        }
    }

    /// Serialized header, 8 or 16 bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.header_size() as usize);
        match self.size_64bit {
            true => {
                bytes.extend_from_slice(&1_u32.to_be_bytes());
                bytes.extend_from_slice(&self.name.to_bytes());
                bytes.extend_from_slice(&self.atom_size.to_be_bytes());
            },
            false => {
                // `new()` only sets 32-bit sizes for atoms within range
                bytes.extend_from_slice(&(self.atom_size as u32).to_be_bytes());
                bytes.extend_from_slice(&self.name.to_bytes());
            }
        }
        bytes
    }
}

/// Prepends an atom header to `data`.
pub(crate) fn wrap(name: FourCC, data: Vec<u8>) -> Vec<u8> {
    let header = AtomHeader::new(name, data.len() as u64);
    let mut atom = header.to_bytes();
    atom.reserve(data.len());
    atom.extend(data);
    atom
}
