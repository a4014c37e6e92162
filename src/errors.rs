//! Various MP4-related errors.

use std::fmt;

use crate::EntryVersion;

/// Edit box/edit list read, write and access errors.
#[derive(Debug)]
pub enum Mp4Error {
    /// Converted `binrw` read error.
    BinReadError(binrw::Error),
    /// Converted `binrw` write error.
    BinWriteError(binrw::Error),
    /// IO error
    IOError(std::io::Error),
    /// Stream or atom exhausted before the declared
    /// structure was fully read.
    MalformedData(String),
    /// Full atom version other than 0 or 1.
    UnsupportedVersion(u8),
    /// Entry index out of range.
    IndexOutOfRange{index: usize, len: usize},
    /// Requested entry layout does not match the
    /// layout of the edit list.
    TypeMismatch{got: EntryVersion, expected: EntryVersion},
    /// Attempted to mix version 0 and version 1 entries.
    InconsistentState{got: EntryVersion, expected: EntryVersion},
    /// Entry count does not fit in the 32-bit count field.
    EncodingOverflow(usize),
    /// More than one `elst` atom nested in an `edts` atom.
    DuplicateChild(String),
    /// Atom mismatch.
    AtomMismatch{got: String, expected: String},
    /// Nested atom with size 0.
    ZeroSizeAtom{name: String, offset: u64},
}

impl std::error::Error for Mp4Error {}

impl fmt::Display for Mp4Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mp4Error::BinReadError(err) => write!(f, "{err}"),
            Mp4Error::BinWriteError(err) => write!(f, "Write error: {err}"),
            Mp4Error::IOError(err) => write!(f, "IO error: {}", err),
            Mp4Error::MalformedData(msg) => write!(f, "Malformed data: {msg}"),
            Mp4Error::UnsupportedVersion(v) => write!(f, "Unsupported atom version {v}. Expected 0 or 1."),
            Mp4Error::IndexOutOfRange{index, len} => write!(f, "Index {index} out of range for {len} entries."),
            Mp4Error::TypeMismatch{got, expected} => write!(f, "Entry type mismatch. Expected {expected}, edit list holds {got}"),
            Mp4Error::InconsistentState{got, expected} => write!(f, "Can not add {got} entry to edit list holding {expected} entries"),
            Mp4Error::EncodingOverflow(count) => write!(f, "{count} entries exceed the 32-bit entry count field."),
            Mp4Error::DuplicateChild(name) => write!(f, "Duplicate child atom '{name}'."),
            Mp4Error::AtomMismatch{got, expected} => write!(f, "Atom mismatch. Expected '{expected}', got '{got}'"),
            Mp4Error::ZeroSizeAtom{name, offset} => write!(f, "Zero size atom '{name}' @ offset {offset}."),
        }
    }
}

/// Converts std::io::Error to Mp4Error
impl From<std::io::Error> for Mp4Error {
    fn from(err: std::io::Error) -> Self {
        Mp4Error::IOError(err)
    }
}

/// Converts Mp4Error to std::io::Error
impl From<Mp4Error> for std::io::Error {
    fn from(err: Mp4Error) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, err)
    }
}

/// Converts binrw::Error to Mp4Error.
/// Running out of data is reported as `MalformedData`.
impl From<binrw::Error> for Mp4Error {
    fn from(err: binrw::Error) -> Mp4Error {
        if err.is_eof() {
            return Mp4Error::MalformedData(format!("unexpected end of data ({err})"))
        }
        Mp4Error::BinReadError(err)
    }
}

impl Mp4Error {
    /// Wraps a `binrw` error raised while serializing.
    pub(crate) fn write(err: binrw::Error) -> Self {
        Mp4Error::BinWriteError(err)
    }
}

