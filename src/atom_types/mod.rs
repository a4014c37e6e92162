mod edts;
mod elst;

pub use edts::Edts;
pub use elst::{EditListEntry, Elst, EntryV0, EntryV1, EntryVersion};
#[cfg(test)]
pub(crate) use elst::entry_count;
