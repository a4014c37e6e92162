//! Read and write MP4/ISOBMFF edit atoms:
//! the edit atom (`edts`) and the edit list atom (`elst`) it contains.
//!
//! An edit list maps a track's media timeline onto the presentation
//! timeline. Entries come in two layouts, 32-bit (version 0)
//! and 64-bit (version 1), and a single edit list never mixes them.
//!
//! See <https://developer.apple.com/documentation/quicktime-file-format/edit_list_atom>.
//!
//! ```rs
//! use mp4edts::{AtomReader, Edts, Elst, EntryV0};
//! use std::io::Cursor;
//!
//! fn main() -> Result<(), mp4edts::Mp4Error> {
//!     let mut elst = Elst::new();
//!     // 1000 units of empty edit, then the media from time 0 at normal rate
//!     elst.append(EntryV0::new(1000, -1, 1, 0))?;
//!     elst.append(EntryV0::new(50000, 0, 1, 0))?;
//!
//!     let bytes = Edts::with_list(elst).to_bytes()?;
//!
//!     let mut reader = AtomReader::new(Cursor::new(bytes));
//!     let edts = Edts::read(&mut reader)?;
//!     println!("{:?}", edts.list());
//!
//!     Ok(())
//! }
//! ```

pub mod fourcc;
pub mod atom;
pub mod atom_types;
pub mod consts;
pub mod errors;
pub mod reader;


pub use fourcc::FourCC;
pub use atom::{AtomHeader, FullAtomHeader};
pub use atom_types::{
    Edts,
    Elst,
    EditListEntry,
    EntryV0,
    EntryV1,
    EntryVersion,
};
pub use errors::Mp4Error;
pub use reader::{AtomReader, DuplicatePolicy, ReadOptions};
