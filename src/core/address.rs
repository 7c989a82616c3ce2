//! Address type for the 32-bit microcontroller address space.
//!
//! Every location in the reconstructed memory model (region bases, vector
//! slots, handler targets, register labels) is an [`Address`]. Construction
//! from wider integers and offset arithmetic are checked so that nothing can
//! silently wrap around the top of the address space.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Number of addressable bytes (the exclusive end of the address space).
pub const ADDRESS_SPACE_SIZE: u64 = 0x1_0000_0000;

/// A computed address fell outside the 32-bit address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("address {base:#x} + {offset:#x} exceeds the 32-bit address space")]
pub struct AddressOverflow {
    pub base: u64,
    pub offset: u64,
}

/// An absolute byte address in the device's 32-bit address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(u32);

impl Address {
    /// Lowest address of the space.
    pub const ZERO: Address = Address(0);

    pub const fn new(value: u32) -> Self {
        Address(value)
    }

    /// The raw numeric value.
    pub const fn value(self) -> u32 {
        self.0
    }

    /// Add a byte offset to this address.
    ///
    /// # Errors
    /// Returns [`AddressOverflow`] if the result does not fit in 32 bits.
    pub fn checked_add(self, offset: u64) -> Result<Self, AddressOverflow> {
        u64::from(self.0)
            .checked_add(offset)
            .and_then(|v| u32::try_from(v).ok())
            .map(Address)
            .ok_or(AddressOverflow {
                base: u64::from(self.0),
                offset,
            })
    }
}

impl From<u32> for Address {
    fn from(value: u32) -> Self {
        Address(value)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
