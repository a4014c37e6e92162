//! Edit list atom (`elst`).
//!
//! Location: `moov/trak[multiple]/edts/elst`
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/edit_list_atom>

use std::{fmt::Display, io::{Cursor, Read, Seek, Write}};

use binrw::{BinRead, BinWrite};
use time::Duration;

use crate::{
    atom::wrap,
    consts::{ENTRY_COUNT_SIZE, ENTRY_V0_SIZE, ENTRY_V1_SIZE, FULL_HEADER_SIZE},
    AtomHeader,
    AtomReader,
    FourCC,
    FullAtomHeader,
    Mp4Error,
    ReadOptions,
};

/// Edit list entry layout. Set by the `elst` atom version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryVersion {
    /// 32-bit duration and media time.
    V0,
    /// 64-bit duration and media time.
    V1,
}

impl EntryVersion {
    /// Atom version value.
    pub fn value(&self) -> u8 {
        match self {
            Self::V0 => 0,
            Self::V1 => 1,
        }
    }

    /// Size in bytes of a single entry.
    pub fn entry_size(&self) -> u8 {
        match self {
            Self::V0 => ENTRY_V0_SIZE,
            Self::V1 => ENTRY_V1_SIZE,
        }
    }
}

impl TryFrom<u8> for EntryVersion {
    type Error = Mp4Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::V0),
            1 => Ok(Self::V1),
            v => Err(Mp4Error::UnsupportedVersion(v)),
        }
    }
}

impl Display for EntryVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "version {}", self.value())
    }
}

/// Version 0 edit list entry. 12 bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, BinRead, BinWrite)]
#[brw(big)]
pub struct EntryV0 {
    /// Unscaled duration of this edit in movie timescale.
    pub segment_duration: u32,
    /// Unscaled starting time within the media of this edit segment.
    /// If set to -1 the edit is empty.
    pub media_time: i32,
    pub media_rate_integer: u16,
    pub media_rate_fraction: u16,
}

impl EntryV0 {
    pub fn new(
        segment_duration: u32,
        media_time: i32,
        media_rate_integer: u16,
        media_rate_fraction: u16
    ) -> Self {
        Self {segment_duration, media_time, media_rate_integer, media_rate_fraction}
    }
}

/// Version 1 edit list entry. 20 bytes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, BinRead, BinWrite)]
#[brw(big)]
pub struct EntryV1 {
    /// Unscaled duration of this edit in movie timescale.
    pub segment_duration: u64,
    /// Unscaled starting time within the media of this edit segment.
    /// If set to -1 the edit is empty.
    pub media_time: i64,
    pub media_rate_integer: u16,
    pub media_rate_fraction: u16,
}

impl EntryV1 {
    pub fn new(
        segment_duration: u64,
        media_time: i64,
        media_rate_integer: u16,
        media_rate_fraction: u16
    ) -> Self {
        Self {segment_duration, media_time, media_rate_integer, media_rate_fraction}
    }
}

impl From<EntryV0> for EntryV1 {
    fn from(value: EntryV0) -> Self {
        Self {
            segment_duration: value.segment_duration as u64,
            media_time: value.media_time as i64,
            media_rate_integer: value.media_rate_integer,
            media_rate_fraction: value.media_rate_fraction,
        }
    }
}

/// Single edit list entry in either layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditListEntry {
    V0(EntryV0),
    V1(EntryV1),
}

impl From<EntryV0> for EditListEntry {
    fn from(value: EntryV0) -> Self {
        Self::V0(value)
    }
}

impl From<EntryV1> for EditListEntry {
    fn from(value: EntryV1) -> Self {
        Self::V1(value)
    }
}

impl EditListEntry {
    pub fn version(&self) -> EntryVersion {
        match self {
            Self::V0(_) => EntryVersion::V0,
            Self::V1(_) => EntryVersion::V1,
        }
    }

    /// Unscaled segment duration.
    pub fn segment_duration(&self) -> u64 {
        match self {
            Self::V0(e) => e.segment_duration as u64,
            Self::V1(e) => e.segment_duration,
        }
    }

    /// Unscaled media start time, `-1` for empty edits.
    pub fn media_time(&self) -> i64 {
        match self {
            Self::V0(e) => e.media_time as i64,
            Self::V1(e) => e.media_time,
        }
    }

    pub fn media_rate_integer(&self) -> u16 {
        match self {
            Self::V0(e) => e.media_rate_integer,
            Self::V1(e) => e.media_rate_integer,
        }
    }

    pub fn media_rate_fraction(&self) -> u16 {
        match self {
            Self::V0(e) => e.media_rate_fraction,
            Self::V1(e) => e.media_rate_fraction,
        }
    }

    /// Media rate as a 16.16 fixed-point value.
    /// 1.0 is normal playback.
    pub fn media_rate(&self) -> f64 {
        self.media_rate_integer() as f64 + self.media_rate_fraction() as f64 / 2_u32.pow(16) as f64
    }

    /// Empty edit, i.e. no media is presented
    /// for the duration of the segment.
    pub fn is_empty_edit(&self) -> bool {
        self.media_time() == -1
    }

    /// Dwell edit, i.e. the media at `media_time`
    /// is held for the duration of the segment.
    pub fn is_dwell(&self) -> bool {
        self.media_rate_integer() == 0 && self.media_rate_fraction() == 0
    }

    /// Segment duration as `time::Duration`, given
    /// the movie time scale (units per second).
    /// Returns `None` if `time_scale` is 0.
    pub fn segment_duration_as(&self, time_scale: u32) -> Option<Duration> {
        if time_scale == 0 {
            return None
        }
        let ts = time_scale as u64;
        let duration = self.segment_duration();
        let secs = i64::try_from(duration / ts).ok()?;
        // remainder < time_scale, so nanos < 1e9
        let nanos = ((duration % ts) as u128 * 1_000_000_000 / ts as u128) as i32;
        Some(Duration::new(secs, nanos))
    }
}

/// Returns the value for the 32-bit entry count field.
pub(crate) fn entry_count(len: usize) -> Result<u32, Mp4Error> {
    u32::try_from(len).map_err(|_| Mp4Error::EncodingOverflow(len))
}

/// Edit list atom (`elst`).
///
/// Location: `moov/trak[multiple]/edts/elst`
///
/// All entries share a single layout, decided by
/// an explicitly set version or by the first entry added.
///
/// See: <https://developer.apple.com/documentation/quicktime-file-format/edit_list_atom>
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Elst {
    version: Option<EntryVersion>,
    flags: [u8; 3],
    entries: Vec<EditListEntry>,
}

impl Elst {
    pub fn new() -> Self {
        Self::default()
    }

    /// New, empty edit list that only accepts entries
    /// of the specified version.
    pub fn with_version(version: EntryVersion) -> Self {
        Self {
            version: Some(version),
            ..Self::default()
        }
    }

    /// Fixes the entry layout. Fails if the edit list
    /// already holds entries of another version.
    pub fn set_version(&mut self, version: EntryVersion) -> Result<(), Mp4Error> {
        match self.version {
            Some(v) if v != version && !self.entries.is_empty() => {
                Err(Mp4Error::InconsistentState{got: version, expected: v})
            },
            _ => {
                self.version = Some(version);
                Ok(())
            }
        }
    }

    /// Entry layout, `None` for an empty
    /// edit list without a set version.
    pub fn version(&self) -> Option<EntryVersion> {
        self.version
    }

    pub fn flags(&self) -> [u8; 3] {
        self.flags
    }

    /// Adds an entry at the end of the edit list.
    ///
    /// Fails with `Mp4Error::InconsistentState`
    /// if the entry's version differs from that of the edit list.
    /// The edit list is left unchanged in that case.
    pub fn append(&mut self, entry: impl Into<EditListEntry>) -> Result<(), Mp4Error> {
        let entry: EditListEntry = entry.into();
        if let Some(version) = self.version {
            if version != entry.version() {
                return Err(Mp4Error::InconsistentState{got: entry.version(), expected: version})
            }
        }
        self.version = Some(entry.version());
        self.entries.push(entry);
        Ok(())
    }

    /// Number of entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[EditListEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &EditListEntry> {
        self.entries.iter()
    }

    /// Returns entry at 0-based `index` if the edit list
    /// holds `expected` entries.
    ///
    /// Index is checked before version:
    /// `Mp4Error::IndexOutOfRange` for `index >= count()`,
    /// otherwise `Mp4Error::TypeMismatch` if the layout differs.
    pub fn entry_at(&self, index: usize, expected: EntryVersion) -> Result<&EditListEntry, Mp4Error> {
        let entry = self.entries.get(index)
            .ok_or(Mp4Error::IndexOutOfRange{index, len: self.entries.len()})?;
        if entry.version() != expected {
            return Err(Mp4Error::TypeMismatch{got: entry.version(), expected})
        }
        Ok(entry)
    }

    /// Returns version 0 entry at 0-based `index`.
    pub fn entry_v0(&self, index: usize) -> Result<&EntryV0, Mp4Error> {
        match self.entry_at(index, EntryVersion::V0)? {
            EditListEntry::V0(e) => Ok(e),
            EditListEntry::V1(_) => Err(Mp4Error::TypeMismatch{got: EntryVersion::V1, expected: EntryVersion::V0}),
        }
    }

    /// Returns version 1 entry at 0-based `index`.
    pub fn entry_v1(&self, index: usize) -> Result<&EntryV1, Mp4Error> {
        match self.entry_at(index, EntryVersion::V1)? {
            EditListEntry::V1(e) => Ok(e),
            EditListEntry::V0(_) => Err(Mp4Error::TypeMismatch{got: EntryVersion::V0, expected: EntryVersion::V1}),
        }
    }

    /// Sum of all unscaled segment durations, i.e. the
    /// presentation duration of the track in movie timescale.
    pub fn duration_sum(&self) -> u64 {
        self.entries.iter()
            .fold(0_u64, |sum, e| sum.saturating_add(e.segment_duration()))
    }

    /// Media time for the first non-empty edit.
    pub fn first_media_time(&self) -> Option<i64> {
        self.entries.iter()
            .find(|e| !e.is_empty_edit())
            .map(|e| e.media_time())
    }

    /// Converts to a version 1 edit list.
    pub fn into_version1(self) -> Self {
        Self {
            version: Some(EntryVersion::V1),
            flags: self.flags,
            entries: self.entries.into_iter()
                .map(|e| match e {
                    EditListEntry::V0(v0) => EditListEntry::V1(EntryV1::from(v0)),
                    v1 => v1,
                })
                .collect()
        }
    }

    /// Version written to file. Version 0 if unset.
    fn write_version(&self) -> EntryVersion {
        self.version.unwrap_or(EntryVersion::V0)
    }

    /// Size of the data load (excludes atom header).
    fn data_size(&self) -> u64 {
        FULL_HEADER_SIZE as u64
            + ENTRY_COUNT_SIZE as u64
            + self.entries.len() as u64 * self.write_version().entry_size() as u64
    }

    /// Total size in bytes of the serialized atom.
    pub fn size(&self) -> u64 {
        AtomHeader::new(FourCC::Elst, self.data_size()).atom_size()
    }

    /// Reads `elst` atom at current position.
    pub fn read<R: Read + Seek>(reader: &mut AtomReader<R>) -> Result<Self, Mp4Error> {
        Self::read_with_options(reader, &ReadOptions::default())
    }

    pub fn read_with_options<R: Read + Seek>(
        reader: &mut AtomReader<R>,
        options: &ReadOptions
    ) -> Result<Self, Mp4Error> {
        let header = reader.header()?;
        header.match_name(&FourCC::Elst)?;
        let elst = Self::read_data(reader, &header, options)?;
        reader.skip(&header)?;
        Ok(elst)
    }

    /// Reads the `elst` data load following an already
    /// parsed atom `header`, starting with version and flags.
    ///
    /// Leaves the reader after the last entry.
    pub fn read_data<R: Read + Seek>(
        reader: &mut AtomReader<R>,
        header: &AtomHeader,
        options: &ReadOptions
    ) -> Result<Self, Mp4Error> {
        let min_size = FULL_HEADER_SIZE as u64 + ENTRY_COUNT_SIZE as u64;
        if header.data_size() < min_size {
            return Err(Mp4Error::MalformedData(format!(
                "'elst' @ offset {} holds {} bytes, requires at least {min_size}",
                header.offset(), header.data_size()
            )))
        }

        let full = reader.full_header()?;
        let version = full.entry_version()?;
        let count = reader.read_be::<u32>()?;

        if let Some(max) = options.max_entries {
            if count > max {
                return Err(Mp4Error::MalformedData(format!(
                    "'elst' declares {count} entries, limit is {max}"
                )))
            }
        }

        // declared atom size may exceed the actual stream
        let rem = reader.rem(Some(header))?.min(reader.rem(None)?);
        let required = count as u64 * version.entry_size() as u64;
        if required > rem {
            return Err(Mp4Error::MalformedData(format!(
                "'elst' declares {count} entries ({required} bytes), but only {rem} bytes remain"
            )))
        }

        let mut elst = Self {
            version: Some(version),
            flags: full.flags(),
            entries: Vec::with_capacity(count as usize),
        };

        for _ in 0..count {
            let entry = match version {
                EntryVersion::V0 => EditListEntry::V0(reader.read_be::<EntryV0>()?),
                EntryVersion::V1 => EditListEntry::V1(reader.read_be::<EntryV1>()?),
            };
            elst.append(entry)?;
        }

        log::debug!("read 'elst' @ offset {}: {} {} entries", header.offset(), count, version);

        Ok(elst)
    }

    /// Serializes the atom including its header.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Mp4Error> {
        let count = entry_count(self.entries.len())?;
        let version = self.write_version();

        let mut data = Cursor::new(Vec::with_capacity(self.data_size() as usize));
        FullAtomHeader::new(version.value(), self.flags)
            .write(&mut data)
            .map_err(Mp4Error::write)?;
        count.write_be(&mut data).map_err(Mp4Error::write)?;
        for entry in self.entries.iter() {
            let written = match entry {
                EditListEntry::V0(e) => e.write(&mut data),
                EditListEntry::V1(e) => e.write(&mut data),
            };
            written.map_err(Mp4Error::write)?;
        }

        Ok(wrap(FourCC::Elst, data.into_inner()))
    }

    /// Writes the atom including its header.
    /// Nothing is written if serialization fails.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<(), Mp4Error> {
        let bytes = self.to_bytes()?;
        writer.write_all(&bytes)?;
        Ok(())
    }
}
