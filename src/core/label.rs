//! Symbolic labels bound to addresses.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::address::Address;

/// Which pipeline phase produced a label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LabelSource {
    /// Base of a device-map region
    Region,
    /// Target of the initial stack pointer
    StackPointer,
    /// Target of an interrupt vector
    Vector,
    /// Peripheral register
    Register,
}

impl fmt::Display for LabelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LabelSource::Region => write!(f, "Region"),
            LabelSource::StackPointer => write!(f, "StackPointer"),
            LabelSource::Vector => write!(f, "Vector"),
            LabelSource::Register => write!(f, "Register"),
        }
    }
}

/// A symbolic name bound to an address
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    pub address: Address,
    pub source: LabelSource,
    /// Primary labels are the ones shown for an address carrying several names
    pub primary: bool,
}

impl Label {
    pub fn new(
        name: impl Into<String>,
        address: Address,
        source: LabelSource,
        primary: bool,
    ) -> Self {
        Self {
            name: name.into(),
            address,
            source,
            primary,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {} ({})", self.name, self.address, self.source)
    }
}

/// Check that `name` can be used as a label: non-empty and free of whitespace.
pub fn is_valid_label_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}
