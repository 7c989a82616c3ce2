//! The memory model the loader pipeline writes into.
//!
//! [`MemoryModel`] is the minimal capability surface the pipeline needs:
//! create regions, labels, data items and references, and read back image
//! words. [`ProgramModel`] is the deterministic in-memory implementation;
//! every collection is ordered so two runs over the same input produce
//! identical models and identical snapshots.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use tracing::trace;

use crate::core::label::is_valid_label_name;
use crate::core::{
    Address, AddressOverflow, AddressRange, DataItem, Label, LabelSource, MemoryRegion, Perms,
    Reference,
};
use crate::error::Stm32MapError;

/// Errors returned by memory model operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error(transparent)]
    AddressOverflow(#[from] AddressOverflow),

    #[error("region '{name}' {range} overlaps existing region '{existing}'")]
    RegionConflict {
        name: String,
        range: AddressRange,
        existing: String,
    },

    #[error("a region named '{0}' already exists")]
    DuplicateRegionName(String),

    #[error("region '{0}' has zero size")]
    ZeroSizeRegion(String),

    #[error("'{0}' is not a valid label name")]
    InvalidLabelName(String),

    #[error("{address} (+{len} bytes) is not inside an initialized region")]
    Unmapped { address: Address, len: u64 },

    #[error("data item at {address} overlaps existing data item at {existing}")]
    DataConflict { address: Address, existing: Address },

    #[error("no data item at {0} to originate a reference")]
    MissingDataItem(Address),
}

/// What happens when a label is created at an address that already has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelPolicy {
    /// Keep every name; the newest primary label takes over as primary
    #[default]
    Coexist,
    /// Drop the labels previously at the address
    Replace,
}

/// Result of a label creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelOutcome {
    /// First label at the address
    Created,
    /// Added next to labels already at the address
    Coexisting { existing: Vec<String> },
    /// Superseded the labels previously at the address
    Replaced { previous: Vec<String> },
    /// The same name was already bound to the address
    AlreadyPresent,
}

impl LabelOutcome {
    pub fn is_collision(&self) -> bool {
        !matches!(self, LabelOutcome::Created)
    }
}

/// Capability interface the loader pipeline mutates.
pub trait MemoryModel {
    /// Create a region without content: only layout and permissions.
    fn create_region(
        &mut self,
        name: &str,
        range: AddressRange,
        perms: Perms,
    ) -> Result<MemoryRegion, ModelError>;

    /// Create a region holding `bytes`, starting at `base`.
    fn create_initialized_region(
        &mut self,
        name: &str,
        base: Address,
        perms: Perms,
        bytes: Vec<u8>,
    ) -> Result<MemoryRegion, ModelError>;

    /// Bind `name` to `address`.
    fn create_label(
        &mut self,
        address: Address,
        name: &str,
        source: LabelSource,
        primary: bool,
    ) -> Result<LabelOutcome, ModelError>;

    /// Mark bytes of an initialized region as a typed data item.
    fn create_data(&mut self, item: DataItem) -> Result<(), ModelError>;

    /// Record a cross-reference originating at an existing data item.
    fn create_reference(&mut self, reference: Reference) -> Result<(), ModelError>;

    /// Read a little-endian word from an initialized region.
    fn read_u32_le(&self, address: Address) -> Result<u32, ModelError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RegionEntry {
    region: MemoryRegion,
    bytes: Option<Vec<u8>>,
}

/// Deterministic in-memory memory model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramModel {
    policy: LabelPolicy,
    regions: Vec<RegionEntry>,
    labels: BTreeMap<Address, Vec<Label>>,
    data: BTreeMap<Address, DataItem>,
    references: BTreeSet<Reference>,
}

impl ProgramModel {
    pub fn new(policy: LabelPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn policy(&self) -> LabelPolicy {
        self.policy
    }

    /// Regions in creation order.
    pub fn regions(&self) -> impl Iterator<Item = &MemoryRegion> {
        self.regions.iter().map(|e| &e.region)
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn region_named(&self, name: &str) -> Option<&MemoryRegion> {
        self.regions().find(|r| r.name == name)
    }

    /// Content of an initialized region.
    pub fn region_bytes(&self, name: &str) -> Option<&[u8]> {
        self.regions
            .iter()
            .find(|e| e.region.name == name)
            .and_then(|e| e.bytes.as_deref())
    }

    pub fn labels_at(&self, address: Address) -> &[Label] {
        self.labels.get(&address).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_label(&self, address: Address, name: &str) -> bool {
        self.labels_at(address).iter().any(|l| l.name == name)
    }

    /// The label shown for `address`: the primary one, else the first created.
    pub fn primary_label(&self, address: Address) -> Option<&Label> {
        let labels = self.labels_at(address);
        labels.iter().find(|l| l.primary).or_else(|| labels.first())
    }

    /// All labels in address order, then creation order.
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.labels.values().flatten()
    }

    pub fn label_count(&self) -> usize {
        self.labels.values().map(Vec::len).sum()
    }

    pub fn data_at(&self, address: Address) -> Option<&DataItem> {
        self.data.get(&address)
    }

    pub fn data_items(&self) -> impl Iterator<Item = &DataItem> {
        self.data.values()
    }

    pub fn references(&self) -> impl Iterator<Item = &Reference> {
        self.references.iter()
    }

    pub fn references_from(&self, from: Address) -> impl Iterator<Item = &Reference> {
        self.references.iter().filter(move |r| r.from == from)
    }

    pub fn references_to(&self, to: Address) -> impl Iterator<Item = &Reference> {
        self.references.iter().filter(move |r| r.to == to)
    }

    /// Serializable view of everything the pipeline created.
    pub fn snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            regions: self.regions().cloned().collect(),
            labels: self.labels().cloned().collect(),
            data: self.data_items().copied().collect(),
            references: self.references().copied().collect(),
        }
    }

    fn insert_region(
        &mut self,
        region: MemoryRegion,
        bytes: Option<Vec<u8>>,
    ) -> Result<MemoryRegion, ModelError> {
        if region.range.is_empty() {
            return Err(ModelError::ZeroSizeRegion(region.name));
        }
        if self.region_named(&region.name).is_some() {
            return Err(ModelError::DuplicateRegionName(region.name));
        }
        if let Some(existing) = self.regions().find(|r| r.range.overlaps(&region.range)) {
            return Err(ModelError::RegionConflict {
                name: region.name,
                range: region.range,
                existing: existing.name.clone(),
            });
        }
        trace!(name = %region.name, range = %region.range, perms = %region.perms, "region created");
        self.regions.push(RegionEntry {
            region: region.clone(),
            bytes,
        });
        Ok(region)
    }

    fn initialized_containing(&self, address: Address, len: u64) -> Option<&RegionEntry> {
        self.regions
            .iter()
            .find(|e| e.bytes.is_some() && e.region.range.contains_span(address, len))
    }
}

impl MemoryModel for ProgramModel {
    fn create_region(
        &mut self,
        name: &str,
        range: AddressRange,
        perms: Perms,
    ) -> Result<MemoryRegion, ModelError> {
        self.insert_region(MemoryRegion::new(name, range, perms, false), None)
    }

    fn create_initialized_region(
        &mut self,
        name: &str,
        base: Address,
        perms: Perms,
        bytes: Vec<u8>,
    ) -> Result<MemoryRegion, ModelError> {
        let range = AddressRange::new(base, bytes.len() as u64)?;
        self.insert_region(MemoryRegion::new(name, range, perms, true), Some(bytes))
    }

    fn create_label(
        &mut self,
        address: Address,
        name: &str,
        source: LabelSource,
        primary: bool,
    ) -> Result<LabelOutcome, ModelError> {
        if !is_valid_label_name(name) {
            return Err(ModelError::InvalidLabelName(name.to_string()));
        }
        let policy = self.policy;
        let labels = self.labels.entry(address).or_default();
        if labels.iter().any(|l| l.name == name) {
            return Ok(LabelOutcome::AlreadyPresent);
        }

        let label = Label::new(name, address, source, primary);
        let outcome = if labels.is_empty() {
            LabelOutcome::Created
        } else {
            match policy {
                LabelPolicy::Coexist => {
                    let existing = labels.iter().map(|l| l.name.clone()).collect();
                    if primary {
                        labels.iter_mut().for_each(|l| l.primary = false);
                    }
                    LabelOutcome::Coexisting { existing }
                }
                LabelPolicy::Replace => {
                    let previous = labels.drain(..).map(|l| l.name).collect();
                    LabelOutcome::Replaced { previous }
                }
            }
        };
        trace!(%address, name, ?outcome, "label created");
        labels.push(label);
        Ok(outcome)
    }

    fn create_data(&mut self, item: DataItem) -> Result<(), ModelError> {
        let len = item.kind.size();
        if self.initialized_containing(item.address, len).is_none() {
            return Err(ModelError::Unmapped {
                address: item.address,
                len,
            });
        }
        if self.data.get(&item.address) == Some(&item) {
            return Ok(());
        }
        // Items are at most a word wide, so only the neighbours can overlap.
        let before = self.data.range(..item.address).next_back();
        let after = self.data.range(item.address..).next();
        if let Some((existing, _)) = before
            .into_iter()
            .chain(after)
            .find(|(_, other)| other.overlaps(&item))
        {
            return Err(ModelError::DataConflict {
                address: item.address,
                existing: *existing,
            });
        }
        self.data.insert(item.address, item);
        Ok(())
    }

    fn create_reference(&mut self, reference: Reference) -> Result<(), ModelError> {
        if !self.data.contains_key(&reference.from) {
            return Err(ModelError::MissingDataItem(reference.from));
        }
        self.references.insert(reference);
        Ok(())
    }

    fn read_u32_le(&self, address: Address) -> Result<u32, ModelError> {
        let entry = self
            .initialized_containing(address, 4)
            .ok_or(ModelError::Unmapped { address, len: 4 })?;
        let bytes = entry.bytes.as_deref().unwrap_or_default();
        let start = (address.value() - entry.region.base().value()) as usize;
        let word = bytes
            .get(start..start + 4)
            .ok_or(ModelError::Unmapped { address, len: 4 })?;
        Ok(u32::from_le_bytes([word[0], word[1], word[2], word[3]]))
    }
}

/// Serializable view of a [`ProgramModel`], without region contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSnapshot {
    pub regions: Vec<MemoryRegion>,
    pub labels: Vec<Label>,
    pub data: Vec<DataItem>,
    pub references: Vec<Reference>,
}

impl ModelSnapshot {
    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, Stm32MapError> {
        serde_json::to_string_pretty(self).map_err(|e| Stm32MapError::Serialization(e.to_string()))
    }

    /// Deserialize from JSON string
    pub fn from_json(json_str: &str) -> Result<Self, Stm32MapError> {
        serde_json::from_str(json_str).map_err(|e| Stm32MapError::Serialization(e.to_string()))
    }

    /// Serialize to binary
    pub fn to_bincode(&self) -> Result<Vec<u8>, Stm32MapError> {
        bincode::serde::encode_to_vec(self, bincode::config::standard())
            .map_err(|e| Stm32MapError::Serialization(e.to_string()))
    }

    /// Deserialize from binary
    pub fn from_bincode(data: &[u8]) -> Result<Self, Stm32MapError> {
        bincode::serde::decode_from_slice(data, bincode::config::standard())
            .map(|(snapshot, _)| snapshot)
            .map_err(|e| Stm32MapError::Serialization(e.to_string()))
    }
}
