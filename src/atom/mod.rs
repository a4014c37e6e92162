//! Atom header framing shared by the edit atoms.

mod atom_header;
mod full_header;

pub use atom_header::AtomHeader;
pub use full_header::FullAtomHeader;
pub(crate) use atom_header::wrap;
