//! AddressRange type for contiguous spans of the address space.
//!
//! Ranges are half-open: `start` is inclusive and `start + size` is the
//! exclusive end. The end is kept as a `u64` so that a range may extend right
//! up to the top of the 32-bit space.

use crate::core::address::{Address, AddressOverflow, ADDRESS_SPACE_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open contiguous span of addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AddressRange {
    /// The starting address of the range (inclusive)
    pub start: Address,
    /// The size of the range in bytes
    pub size: u64,
}

impl AddressRange {
    /// Create a new AddressRange.
    ///
    /// # Errors
    /// Returns [`AddressOverflow`] if the range would run past the end of the
    /// address space.
    pub fn new(start: Address, size: u64) -> Result<Self, AddressOverflow> {
        let end = u64::from(start.value()).checked_add(size);
        match end {
            Some(end) if end <= ADDRESS_SPACE_SIZE => Ok(AddressRange { start, size }),
            _ => Err(AddressOverflow {
                base: u64::from(start.value()),
                offset: size,
            }),
        }
    }

    /// Exclusive end of the range.
    pub fn end(&self) -> u64 {
        u64::from(self.start.value()) + self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Check if this range contains the given address.
    pub fn contains(&self, address: Address) -> bool {
        let v = u64::from(address.value());
        v >= u64::from(self.start.value()) && v < self.end()
    }

    /// Check if `len` bytes starting at `address` all fall inside this range.
    pub fn contains_span(&self, address: Address, len: u64) -> bool {
        let v = u64::from(address.value());
        v >= u64::from(self.start.value()) && v.saturating_add(len) <= self.end()
    }

    /// Check if this range shares at least one address with `other`.
    pub fn overlaps(&self, other: &AddressRange) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        u64::from(self.start.value()) < other.end() && u64::from(other.start.value()) < self.end()
    }
}

impl fmt::Display for AddressRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {:#010x})", self.start, self.end())
    }
}
