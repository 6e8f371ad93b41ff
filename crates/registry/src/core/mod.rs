//! Registry data model: keys, entries, errors and the indexed table.

pub mod entry;
pub mod error;
pub mod index;
pub mod key;
