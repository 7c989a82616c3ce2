//! Core value types of the reconstructed memory model.
//!
//! Everything the pipeline writes into a memory model is expressed with these
//! types: addresses and ranges, permissioned regions, labels, data items and
//! cross-references.

pub mod address;
pub mod address_range;
pub mod data_item;
pub mod label;
pub mod reference;
pub mod region;

pub use address::{Address, AddressOverflow, ADDRESS_SPACE_SIZE};
pub use address_range::AddressRange;
pub use data_item::{DataItem, DataKind};
pub use label::{Label, LabelSource};
pub use reference::{Reference, ReferenceKind};
pub use region::{MemoryRegion, Perms};
