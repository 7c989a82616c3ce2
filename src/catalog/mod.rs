//! Device Map Catalog: declarative description of a target device.
//!
//! A catalog lists the peripheral and memory regions of a device, the
//! interrupt-vector slots at the start of its firmware image, and the
//! register windows that get symbolic names. It is pure data; the loader
//! pipeline is the only consumer. Catalogs are checked once per process by
//! [`DeviceCatalog::validate`] and the findings are reported, not enforced,
//! since some reference tables intentionally repeat offsets.

pub mod stm32f2;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use crate::core::{Address, AddressRange, Perms};

/// One named block of the device memory map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegionSpec {
    pub name: &'static str,
    pub base: u32,
    pub size: u32,
    pub read: bool,
    pub write: bool,
    pub execute: bool,
}

impl RegionSpec {
    pub const fn new(
        name: &'static str,
        base: u32,
        size: u32,
        read: bool,
        write: bool,
        execute: bool,
    ) -> Self {
        Self {
            name,
            base,
            size,
            read,
            write,
            execute,
        }
    }

    pub fn perms(&self) -> Perms {
        Perms::from_rwx(self.read, self.write, self.execute)
    }

    /// Label-safe form of the region name (spaces become underscores).
    pub fn label_name(&self) -> String {
        crate::loader::regions::sanitize_label(self.name)
    }
}

/// An interrupt or exception vector slot, relative to the image base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VectorSpec {
    pub name: &'static str,
    pub offset: u32,
}

impl VectorSpec {
    pub const fn new(name: &'static str, offset: u32) -> Self {
        Self { name, offset }
    }
}

/// A register name at an offset from its peripheral base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegisterSpec {
    pub name: &'static str,
    pub offset: u32,
}

impl RegisterSpec {
    pub const fn new(name: &'static str, offset: u32) -> Self {
        Self { name, offset }
    }
}

/// A register table bound to the base address of one peripheral instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RegisterBank {
    pub peripheral: &'static str,
    pub base: u32,
    pub registers: &'static [RegisterSpec],
}

/// Complete static description of one device variant.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DeviceCatalog {
    /// Loader name for the device family
    pub name: &'static str,
    /// Processor language identifier (architecture:endianness:width:variant)
    pub language: &'static str,
    /// Absolute address the firmware image is mapped at
    pub image_base: u32,
    /// Maximum number of image bytes loaded
    pub max_image_size: u32,
    pub regions: &'static [RegionSpec],
    pub vectors: &'static [VectorSpec],
    pub register_banks: &'static [RegisterBank],
}

/// Kinds of findings produced by catalog validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogIssueKind {
    DuplicateRegionName,
    OverlappingRegions,
    RegionOverflow,
    ReservedVectorOffset,
    MisalignedVector,
    UnorderedVector,
    MisalignedRegister,
    DuplicateRegisterOffset,
    BankWithoutRegion,
}

impl CatalogIssueKind {
    /// Whether the finding reflects data copied verbatim from the reference
    /// tables rather than a transcription mistake.
    pub fn is_expected(&self) -> bool {
        matches!(self, CatalogIssueKind::DuplicateRegisterOffset)
    }
}

/// A single catalog validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogIssue {
    pub kind: CatalogIssueKind,
    pub detail: String,
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.detail)
    }
}

impl DeviceCatalog {
    pub fn image_base(&self) -> Address {
        Address::new(self.image_base)
    }

    pub fn region(&self, name: &str) -> Option<&RegionSpec> {
        self.regions.iter().find(|r| r.name == name)
    }

    pub fn vector(&self, name: &str) -> Option<&VectorSpec> {
        self.vectors.iter().find(|v| v.name == name)
    }

    pub fn bank_at(&self, base: u32) -> Option<&RegisterBank> {
        self.register_banks.iter().find(|b| b.base == base)
    }

    /// Check the tables for transcription mistakes.
    pub fn validate(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();
        let mut issue = |kind, detail: String| issues.push(CatalogIssue { kind, detail });

        let mut names = HashSet::new();
        let mut ranges: Vec<(&str, AddressRange)> = Vec::new();
        for region in self.regions {
            if !names.insert(region.name) {
                issue(
                    CatalogIssueKind::DuplicateRegionName,
                    format!("region '{}' is listed more than once", region.name),
                );
            }
            match AddressRange::new(Address::new(region.base), u64::from(region.size)) {
                Ok(range) => {
                    for (other, other_range) in &ranges {
                        if range.overlaps(other_range) {
                            issue(
                                CatalogIssueKind::OverlappingRegions,
                                format!(
                                    "region '{}' {} overlaps '{}' {}",
                                    region.name, range, other, other_range
                                ),
                            );
                        }
                    }
                    ranges.push((region.name, range));
                }
                Err(e) => issue(
                    CatalogIssueKind::RegionOverflow,
                    format!("region '{}': {}", region.name, e),
                ),
            }
        }

        let mut previous: Option<u32> = None;
        for vector in self.vectors {
            if vector.offset == 0 {
                issue(
                    CatalogIssueKind::ReservedVectorOffset,
                    format!("vector '{}' uses the stack pointer slot", vector.name),
                );
            }
            if vector.offset % 4 != 0 {
                issue(
                    CatalogIssueKind::MisalignedVector,
                    format!("vector '{}' at {:#x} is not word aligned", vector.name, vector.offset),
                );
            }
            if previous.is_some_and(|p| vector.offset <= p) {
                issue(
                    CatalogIssueKind::UnorderedVector,
                    format!(
                        "vector '{}' at {:#x} is out of table order",
                        vector.name, vector.offset
                    ),
                );
            }
            previous = Some(vector.offset);
        }

        for bank in self.register_banks {
            if !self.regions.iter().any(|r| r.base == bank.base) {
                issue(
                    CatalogIssueKind::BankWithoutRegion,
                    format!("{} bank at {:#x} has no matching region", bank.peripheral, bank.base),
                );
            }
            let mut seen: BTreeMap<u32, &str> = BTreeMap::new();
            for reg in bank.registers {
                if reg.offset % 4 != 0 {
                    issue(
                        CatalogIssueKind::MisalignedRegister,
                        format!("register '{}' at {:#x} is not word aligned", reg.name, reg.offset),
                    );
                }
                if let Some(first) = seen.insert(reg.offset, reg.name) {
                    issue(
                        CatalogIssueKind::DuplicateRegisterOffset,
                        format!(
                            "{} offset {:#x} names both '{}' and '{}'",
                            bank.peripheral, reg.offset, first, reg.name
                        ),
                    );
                }
            }
        }

        issues
    }
}

/// Supported target devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeviceVariant {
    #[default]
    #[serde(rename = "stm32f2")]
    Stm32F2,
}

static STM32F2_ISSUES: Lazy<Vec<CatalogIssue>> = Lazy::new(|| stm32f2::CATALOG.validate());

impl DeviceVariant {
    pub fn catalog(&self) -> &'static DeviceCatalog {
        match self {
            DeviceVariant::Stm32F2 => &stm32f2::CATALOG,
        }
    }

    /// Validation findings for this variant's catalog, computed once.
    pub fn issues(&self) -> &'static [CatalogIssue] {
        match self {
            DeviceVariant::Stm32F2 => &STM32F2_ISSUES,
        }
    }
}

impl fmt::Display for DeviceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.catalog().name)
    }
}

impl FromStr for DeviceVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stm32f2" | "stm32f2xx" => Ok(DeviceVariant::Stm32F2),
            other => Err(format!("unknown device variant: {}", other)),
        }
    }
}
