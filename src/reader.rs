//! Reader over a seekable byte stream,
//! with atom header parsing and atom bound checks.

use std::io::{Read, Seek, SeekFrom};

use binrw::{BinRead, BinReaderExt};

use crate::{AtomHeader, FourCC, FullAtomHeader, Mp4Error};

/// How to treat a second `elst` atom inside the same `edts` atom.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep the first `elst`, skip any later ones
    /// like unknown atoms.
    #[default]
    FirstWins,
    /// Raise `Mp4Error::DuplicateChild`.
    Reject,
}

/// Options for parsing edit atoms.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadOptions {
    /// Policy for multiple `elst` atoms in one `edts` atom.
    pub duplicate_elst: DuplicatePolicy,
    /// Upper limit for the declared number of edit list entries.
    /// The declared count is always checked against the
    /// atom's remaining size regardless.
    pub max_entries: Option<u32>,
}

impl ReadOptions {
    pub fn with_duplicate_policy(self, duplicate_elst: DuplicatePolicy) -> Self {
        Self {duplicate_elst, ..self}
    }

    pub fn with_max_entries(self, max_entries: u32) -> Self {
        Self {max_entries: Some(max_entries), ..self}
    }
}

/// Reader over any `Read + Seek` source,
/// e.g. `Cursor<Vec<u8>>`, `BufReader<File>`,
/// or a mutable reference to either.
///
/// Position is shared with the inner reader and
/// advances exactly by the number of bytes read.
#[derive(Debug)]
pub struct AtomReader<R> {
    inner: R,
}

impl<R: Read + Seek> AtomReader<R> {
    pub fn new(inner: R) -> Self {
        Self {inner}
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Current position of the reader.
    pub fn pos(&mut self) -> Result<u64, Mp4Error> {
        Ok(self.inner.stream_position()?)
    }

    /// Total size of the stream in bytes.
    /// Leaves position unchanged.
    pub fn len(&mut self) -> Result<u64, Mp4Error> {
        let pos = self.inner.stream_position()?;
        let len = self.inner.seek(SeekFrom::End(0))?;
        self.inner.seek(SeekFrom::Start(pos))?;
        Ok(len)
    }

    /// Returns remaining number of bytes in stream,
    /// or until the end of `bounds` if specified.
    pub fn rem(&mut self, bounds: Option<&AtomHeader>) -> Result<u64, Mp4Error> {
        let end = match bounds {
            Some(hdr) => hdr.end(),
            None => self.len()?,
        };
        Ok(end.saturating_sub(self.pos()?))
    }

    /// Seeks to absolute position `pos`.
    pub fn seek(&mut self, pos: u64) -> Result<u64, Mp4Error> {
        Ok(self.inner.seek(SeekFrom::Start(pos))?)
    }

    /// Read big endian type `T`.
    pub(crate) fn read_be<T>(&mut self) -> Result<T, Mp4Error>
    where
        T: for<'a> BinRead<Args<'a> = ()>,
    {
        Ok(self.inner.read_be::<T>()?)
    }

    /// Reads FourCC at current position.
    pub(crate) fn fourcc(&mut self) -> Result<FourCC, Mp4Error> {
        Ok(FourCC::from_u32(self.read_be::<u32>()?))
    }

    /// Returns atom header at current position.
    ///
    /// Does not verify that current position
    /// is at atom boundary.
    pub fn header(&mut self) -> Result<AtomHeader, Mp4Error> {
        let mut hdr = AtomHeader::default();

        hdr.offset = self.pos()?;

        // Read 32bit total atom size
        hdr.atom_size = self.read_be::<u32>()? as u64;

        // Can not read fourcc name as utf-8 since some
        // manufacturers use single-byte extended ascii/ISO8859-1
        hdr.name = self.fourcc()?;

        // Check if atom size is 64bit and read the 8 bytes
        // following directly after FourCC as new size if so
        if hdr.atom_size == 1 {
            hdr.atom_size = self.read_be::<u64>()?;
            hdr.size_64bit = true;
        }

        if hdr.atom_size == 0 {
            return Err(Mp4Error::ZeroSizeAtom {
                name: hdr.name.to_string(),
                offset: hdr.offset,
            });
        }

        if hdr.atom_size < hdr.header_size() as u64 {
            return Err(Mp4Error::MalformedData(format!(
                "atom '{}' @ offset {} declares size {}, smaller than its {} byte header",
                hdr.name, hdr.offset, hdr.atom_size, hdr.header_size()
            )));
        }

        // `AtomHeader::end()` relies on this
        if hdr.offset.checked_add(hdr.atom_size).is_none() {
            return Err(Mp4Error::MalformedData(format!(
                "atom '{}' @ offset {} declares size {}, exceeding the addressable range",
                hdr.name, hdr.offset, hdr.atom_size
            )));
        }

        Ok(hdr)
    }

    /// Returns atom header at current position,
    /// ensuring the atom does not extend beyond `parent`.
    pub fn child_header(&mut self, parent: &AtomHeader) -> Result<AtomHeader, Mp4Error> {
        let hdr = self.header()?;
        if !hdr.within(parent) {
            return Err(Mp4Error::MalformedData(format!(
                "atom '{}' @ offset {} ({} bytes) extends beyond parent '{}' ending @ offset {}",
                hdr.name, hdr.offset, hdr.atom_size, parent.name, parent.end()
            )));
        }
        Ok(hdr)
    }

    /// Reads version and flags for full atoms.
    pub fn full_header(&mut self) -> Result<FullAtomHeader, Mp4Error> {
        self.read_be::<FullAtomHeader>()
    }

    /// Seeks past the atom described by `header`,
    /// regardless of how much of it has been read.
    pub fn skip(&mut self, header: &AtomHeader) -> Result<u64, Mp4Error> {
        self.seek(header.end())
    }
}
