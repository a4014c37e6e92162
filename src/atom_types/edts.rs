//! Edit atom (`edts`).
//!
//! Location: `moov/trak[multiple]/edts`
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/edit_atom>

use std::io::{Read, Seek, Write};

use crate::{
    atom::wrap,
    AtomHeader,
    AtomReader,
    DuplicatePolicy,
    Elst,
    FourCC,
    Mp4Error,
    ReadOptions,
};

/// Edit atom (`edts`). Container for at most one edit list.
///
/// Location: `moov/trak[multiple]/edts`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Edts {
    elst: Option<Elst>,
}

impl Edts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(elst: Elst) -> Self {
        Self {elst: Some(elst)}
    }

    /// Replaces the edit list. `None` clears it.
    pub fn set_list(&mut self, elst: Option<Elst>) {
        self.elst = elst;
    }

    /// The edit list, if set.
    pub fn list(&self) -> Option<&Elst> {
        self.elst.as_ref()
    }

    /// Removes and returns the edit list, e.g. to
    /// keep it behind an `Rc` after the `edts` atom is dropped.
    pub fn take_list(&mut self) -> Option<Elst> {
        self.elst.take()
    }

    /// Returns `true` if no edit list is set.
    pub fn is_empty(&self) -> bool {
        self.elst.is_none()
    }

    /// Total size in bytes of the serialized atom.
    pub fn size(&self) -> u64 {
        let data_size = self.elst.as_ref().map(|e| e.size()).unwrap_or(0);
        AtomHeader::new(FourCC::Edts, data_size).atom_size()
    }

    /// Reads `edts` atom at current position.
    ///
    /// Unknown child atoms are skipped. If more than one `elst`
    /// is present, the first one is kept.
    pub fn read<R: Read + Seek>(reader: &mut AtomReader<R>) -> Result<Self, Mp4Error> {
        Self::read_with_options(reader, &ReadOptions::default())
    }

    /// Reads `edts` atom at current position
    /// using custom read options.
    ///
    /// Leaves the reader at the end of the `edts` atom.
    pub fn read_with_options<R: Read + Seek>(
        reader: &mut AtomReader<R>,
        options: &ReadOptions
    ) -> Result<Self, Mp4Error> {
        let header = reader.header()?;
        header.match_name(&FourCC::Edts)?;

        let mut edts = Self::default();

        while reader.pos()? < header.end() {
            let child = reader.child_header(&header)?;

            match (child.name(), edts.elst.is_some()) {
                (FourCC::Elst, false) => {
                    edts.elst = Some(Elst::read_data(reader, &child, options)?);
                },
                (FourCC::Elst, true) => match options.duplicate_elst {
                    DuplicatePolicy::FirstWins => log::warn!(
                        "ignoring duplicate 'elst' @ offset {} in 'edts' @ offset {}",
                        child.offset(), header.offset()
                    ),
                    DuplicatePolicy::Reject => return Err(Mp4Error::DuplicateChild(child.name().to_string())),
                },
                (name, _) => log::debug!(
                    "skipping '{name}' @ offset {} ({} bytes) in 'edts'",
                    child.offset(), child.atom_size()
                ),
            }

            // also skips padding after the edit list entries
            reader.skip(&child)?;
        }

        Ok(edts)
    }

    /// Serializes the atom including its header.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Mp4Error> {
        let data = match &self.elst {
            Some(elst) => elst.to_bytes()?,
            None => Vec::new(),
        };
        Ok(wrap(FourCC::Edts, data))
    }

    /// Writes the atom including its header.
    /// Nothing is written if serialization fails.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), Mp4Error> {
        let bytes = self.to_bytes()?;
        writer.write_all(&bytes)?;
        Ok(())
    }
}
