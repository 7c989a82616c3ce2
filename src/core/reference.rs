//! Reference type for address-to-address cross-references.
//!
//! A Reference records that the value stored at `from` points to `to`,
//! e.g. an interrupt-vector slot pointing at its handler.

use crate::core::address::Address;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Enum representing the kind of a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReferenceKind {
    /// Data reference
    DataRef,
}

impl ReferenceKind {
    pub fn as_str(&self) -> &str {
        match self {
            ReferenceKind::DataRef => "data_ref",
        }
    }
}

/// Represents a cross-reference between two locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Reference {
    /// Source address where the reference originates
    pub from: Address,
    /// Target address
    pub to: Address,
    /// Kind of the reference
    pub kind: ReferenceKind,
}

impl Reference {
    pub fn new(from: Address, to: Address, kind: ReferenceKind) -> Self {
        Reference { from, to, kind }
    }

    /// Create a new data reference (convenience constructor)
    pub fn data(from: Address, to: Address) -> Self {
        Reference::new(from, to, ReferenceKind::DataRef)
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.from, self.to, self.kind.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_reference() {
        let r = Reference::data(Address::new(0x0800_0004), Address::new(0x0800_0201));
        assert_eq!(r.kind, ReferenceKind::DataRef);
        assert_eq!(r.to_string(), "0x08000004 -> 0x08000201 (data_ref)");
    }

    #[test]
    fn test_json_shape() {
        let r = Reference::data(Address::new(4), Address::new(8));
        let json = serde_json::to_string(&r).unwrap();
        assert_eq!(json, r#"{"from":4,"to":8,"kind":"DataRef"}"#);
        let back: Reference = serde_json::from_str(&json).unwrap();
        assert_eq!(back, r);
    }
}
