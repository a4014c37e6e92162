/// Atom header size in bytes with a 32-bit size.
pub const HEADER_SIZE: u8 = 8;

/// Atom header size in bytes with a 64-bit size
/// (32-bit size set to `1`, followed by FourCC and 64-bit size).
pub const LARGE_HEADER_SIZE: u8 = 16;

/// Version (1 byte) and flags (3 bytes) in full atoms.
pub const FULL_HEADER_SIZE: u8 = 4;

/// Size of the `elst` 32-bit entry count.
pub const ENTRY_COUNT_SIZE: u8 = 4;

/// Size of a version 0 `elst` entry in bytes.
pub const ENTRY_V0_SIZE: u8 = 12;

/// Size of a version 1 `elst` entry in bytes.
pub const ENTRY_V1_SIZE: u8 = 20;
