//! MP4 atom FourCC.
//! Only the atoms relevant to edit boxes are named,
//! everything else is kept as `FourCC::Custom`.

use std::fmt::Display;

/// MP4 atom Four CC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FourCC {
    /// Edit atom, container for the edit list.
    Edts,
    /// Edit list atom.
    Elst,
    /// Free space
    Free,
    Skip,

    Custom(String)
}

impl Display for FourCC {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FourCC {
    pub fn from_slice(fourcc: &[u8]) -> Self {
        match fourcc {
            b"edts" => Self::Edts,
            b"elst" => Self::Elst,
            b"free" => Self::Free,
            b"skip" => Self::Skip,
            // UTF-8 does not work for single-byte char above 127
            // but ISO8859-1 mapping works for range 128-255
            _ => Self::Custom(
                fourcc
                    .iter()
                    .map(|n| *n as char)
                    .collect::<String>()
                ),
        }
    }

    pub fn from_u32(value: u32) -> Self {
        Self::from_slice(&value.to_be_bytes())
    }

    pub fn from_str(fourcc: &str) -> Self {
        match fourcc {
            "edts" => Self::Edts,
            "elst" => Self::Elst,
            "free" => Self::Free,
            "skip" => Self::Skip,
            _ => Self::Custom(fourcc.to_owned()),
        }
    }

    pub fn to_str(&self) -> &str {
        match self {
            Self::Edts => "edts",
            Self::Elst => "elst",
            Self::Free => "free",
            Self::Skip => "skip",
            Self::Custom(s) => s.as_str()
        }
    }

    /// Four bytes as written to file.
    ///
    /// Custom names are mapped back as ISO8859-1,
    /// padded with spaces or truncated to four bytes.
    pub fn to_bytes(&self) -> [u8; 4] {
        let mut bytes = [b' '; 4];
        self.to_str().chars()
            .take(4)
            .enumerate()
            .for_each(|(i, c)| bytes[i] = u8::try_from(u32::from(c)).unwrap_or(b'?'));
        bytes
    }
}

impl Default for FourCC {
    fn default() -> Self {
        Self::Custom("None".to_owned())
    }
}
