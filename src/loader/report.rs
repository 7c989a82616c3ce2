//! Per-phase results and the non-fatal failure list.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

use crate::core::{Address, Label, MemoryRegion};
use crate::error::Stm32MapError;
use crate::loader::image::ImageSummary;
use crate::model::ModelError;

/// Pipeline phases, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Regions,
    Image,
    Vectors,
    Registers,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Regions => write!(f, "regions"),
            Phase::Image => write!(f, "image"),
            Phase::Vectors => write!(f, "vectors"),
            Phase::Registers => write!(f, "registers"),
        }
    }
}

/// Classification of a non-fatal failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FailureKind {
    /// Region overlaps a previously created region
    RegionConflict,
    /// Computed address or range end is outside the address space
    AddressOverflow,
    /// A region with the same name already exists
    DuplicateRegionName,
    /// Region cannot exist (zero size)
    InvalidRegion,
    /// A label already existed at the address; the new one was still applied
    DuplicateLabel,
    /// Name cannot be used as a label
    InvalidLabelName,
    /// Vector pointer could not be turned into a label and reference
    InvalidVectorTarget,
    /// Slot lies beyond the loaded image bytes
    UnreadableSlot,
    /// Slot overlaps a differently placed data item
    DataConflict,
}

impl From<&ModelError> for FailureKind {
    fn from(err: &ModelError) -> Self {
        match err {
            ModelError::AddressOverflow(_) => FailureKind::AddressOverflow,
            ModelError::RegionConflict { .. } => FailureKind::RegionConflict,
            ModelError::DuplicateRegionName(_) => FailureKind::DuplicateRegionName,
            ModelError::ZeroSizeRegion(_) => FailureKind::InvalidRegion,
            ModelError::InvalidLabelName(_) => FailureKind::InvalidLabelName,
            ModelError::Unmapped { .. } => FailureKind::UnreadableSlot,
            ModelError::DataConflict { .. } => FailureKind::DataConflict,
            ModelError::MissingDataItem(_) => FailureKind::InvalidVectorTarget,
        }
    }
}

/// A recorded non-fatal condition, tied to the item that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub phase: Phase,
    /// Catalog name of the region, vector or register
    pub item: String,
    pub address: Option<Address>,
    pub kind: FailureKind,
    /// Whether the item was left out of the model
    pub skipped: bool,
    pub detail: String,
}

impl Failure {
    /// The item was not applied to the model.
    pub fn skip(
        phase: Phase,
        item: impl Into<String>,
        address: Option<Address>,
        kind: FailureKind,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            phase,
            item: item.into(),
            address,
            kind,
            skipped: true,
            detail: detail.into(),
        }
    }

    /// The item was applied but something about it deserves a diagnostic.
    pub fn note(
        phase: Phase,
        item: impl Into<String>,
        address: Option<Address>,
        kind: FailureKind,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            skipped: false,
            ..Self::skip(phase, item, address, kind, detail)
        }
    }

    pub(crate) fn from_model(
        phase: Phase,
        item: &str,
        address: Option<Address>,
        err: &ModelError,
    ) -> Self {
        Self::skip(phase, item, address, FailureKind::from(err), err.to_string())
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {:?}", self.phase, self.item, self.kind)?;
        if let Some(address) = self.address {
            write!(f, " at {}", address)?;
        }
        write!(f, ": {}", self.detail)
    }
}

/// Items a phase created, plus what it could not create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseOutcome<T> {
    pub created: Vec<T>,
    pub failures: Vec<Failure>,
    /// The phase stopped early on a cancellation request
    pub cancelled: bool,
}

impl<T> Default for PhaseOutcome<T> {
    fn default() -> Self {
        Self {
            created: Vec::new(),
            failures: Vec::new(),
            cancelled: false,
        }
    }
}

impl<T> PhaseOutcome<T> {
    pub(crate) fn record(&mut self, failure: Failure) {
        warn!(
            phase = %failure.phase,
            item = %failure.item,
            kind = ?failure.kind,
            skipped = failure.skipped,
            "{}",
            failure.detail
        );
        self.failures.push(failure);
    }

    /// Failures that kept their item out of the model.
    pub fn skipped(&self) -> impl Iterator<Item = &Failure> {
        self.failures.iter().filter(|f| f.skipped)
    }
}

/// A vector slot whose pointer value was read from the image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedVector {
    pub name: String,
    /// Offset of the slot from the image base
    pub offset: u32,
    pub slot: Address,
    pub target: Address,
    /// Data item, label and reference were all created
    pub valid: bool,
}

/// Terminal state of a pipeline run that did not abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    Completed,
    Cancelled { phase: Phase },
}

/// Everything a pipeline run produced, for diagnostics and reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub device: String,
    pub state: LoadState,
    pub regions: Vec<MemoryRegion>,
    pub image: Option<ImageSummary>,
    pub stack_pointer: Option<ResolvedVector>,
    pub vectors: Vec<ResolvedVector>,
    pub register_labels: Vec<Label>,
    pub failures: Vec<Failure>,
}

impl LoadReport {
    pub(crate) fn new(device: &str) -> Self {
        Self {
            device: device.to_string(),
            state: LoadState::Completed,
            regions: Vec::new(),
            image: None,
            stack_pointer: None,
            vectors: Vec::new(),
            register_labels: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == LoadState::Completed
    }

    pub fn failures_of(&self, kind: FailureKind) -> impl Iterator<Item = &Failure> {
        self.failures.iter().filter(move |f| f.kind == kind)
    }

    pub fn skipped(&self) -> impl Iterator<Item = &Failure> {
        self.failures.iter().filter(|f| f.skipped)
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> Result<String, Stm32MapError> {
        serde_json::to_string_pretty(self).map_err(|e| Stm32MapError::Serialization(e.to_string()))
    }
}
