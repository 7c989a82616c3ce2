//! Typed data items placed over bytes of an initialized region.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::address::Address;

/// Data type applied to a data item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DataKind {
    /// Little-endian 32-bit word, used for pointer-sized values
    DWord,
}

impl DataKind {
    pub fn size(&self) -> u64 {
        match self {
            DataKind::DWord => 4,
        }
    }
}

/// A data item marking `kind.size()` bytes at `address`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DataItem {
    pub address: Address,
    pub kind: DataKind,
}

impl DataItem {
    pub fn dword(address: Address) -> Self {
        Self {
            address,
            kind: DataKind::DWord,
        }
    }

    /// Exclusive end of the bytes covered by this item.
    pub fn end(&self) -> u64 {
        u64::from(self.address.value()) + self.kind.size()
    }

    pub fn overlaps(&self, other: &DataItem) -> bool {
        u64::from(self.address.value()) < other.end()
            && u64::from(other.address.value()) < self.end()
    }
}

impl fmt::Display for DataItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.address)
    }
}
