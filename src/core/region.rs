//! Memory regions of the reconstructed device map.
//!
//! A region is a named, permissioned, contiguous span of the address space.
//! Peripheral blocks are created without content; the flash image region is
//! the only one carrying bytes.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::address::Address;
use crate::core::address_range::AddressRange;

bitflags! {
    /// Permission flags for memory regions
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Perms: u8 {
        const READ = 1;
        const WRITE = 2;
        const EXECUTE = 4;
    }
}

impl Perms {
    /// Build a permission set from the three individual flags.
    pub fn from_rwx(read: bool, write: bool, execute: bool) -> Self {
        let mut perms = Perms::empty();
        perms.set(Perms::READ, read);
        perms.set(Perms::WRITE, write);
        perms.set(Perms::EXECUTE, execute);
        perms
    }

    pub fn has_read(&self) -> bool {
        self.contains(Perms::READ)
    }

    pub fn has_write(&self) -> bool {
        self.contains(Perms::WRITE)
    }

    pub fn has_execute(&self) -> bool {
        self.contains(Perms::EXECUTE)
    }
}

impl fmt::Display for Perms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut perms = String::new();
        perms.push(if self.has_read() { 'r' } else { '-' });
        perms.push(if self.has_write() { 'w' } else { '-' });
        perms.push(if self.has_execute() { 'x' } else { '-' });
        write!(f, "{}", perms)
    }
}

/// A region successfully created in the memory model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoryRegion {
    /// Region name as it appears in the device map
    pub name: String,
    /// Address span covered by the region
    pub range: AddressRange,
    /// Access permissions
    pub perms: Perms,
    /// Whether the region carries bytes (loaded image) or only layout
    pub initialized: bool,
}

impl MemoryRegion {
    pub fn new(
        name: impl Into<String>,
        range: AddressRange,
        perms: Perms,
        initialized: bool,
    ) -> Self {
        Self {
            name: name.into(),
            range,
            perms,
            initialized,
        }
    }

    pub fn base(&self) -> Address {
        self.range.start
    }

    /// Get the region size in bytes
    pub fn size(&self) -> u64 {
        self.range.size
    }

    pub fn readable(&self) -> bool {
        self.perms.has_read()
    }

    pub fn writable(&self) -> bool {
        self.perms.has_write()
    }

    pub fn executable(&self) -> bool {
        self.perms.has_execute()
    }
}

impl fmt::Display for MemoryRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Region '{}' {} {}", self.name, self.range, self.perms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perms_creation() {
        let perms = Perms::from_rwx(true, false, true);
        assert!(perms.has_read());
        assert!(!perms.has_write());
        assert!(perms.has_execute());
        assert_eq!(format!("{}", perms), "r-x");
    }

    #[test]
    fn test_region_accessors() {
        let range = AddressRange::new(Address::new(0x2000_0000), 0x20000).unwrap();
        let region = MemoryRegion::new("SRAM", range, Perms::all(), false);
        assert_eq!(region.base(), Address::new(0x2000_0000));
        assert_eq!(region.size(), 0x20000);
        assert!(region.readable() && region.writable() && region.executable());
        assert_eq!(
            region.to_string(),
            "Region 'SRAM' [0x20000000, 0x20020000) rwx"
        );
    }
}
