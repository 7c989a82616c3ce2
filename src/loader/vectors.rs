//! Vector Table Resolver: turns the pointer table at the start of the image
//! into data items, labels and references.
//!
//! Slot 0 holds the initial stack pointer and is handled on its own: its
//! target gets the stack label and it never counts as an interrupt vector.
//! Every other slot listed in the catalog is resolved independently. Slot
//! words are read back from the model. For a slot whose word can be read,
//! the slot becomes a dword, the handler address it holds gets the vector's
//! name and a data reference links the two. Problems with one slot are
//! recorded and the loop moves on.

use tracing::{debug, info_span};

use crate::cancel::CancellationToken;
use crate::catalog::VectorSpec;
use crate::core::label::is_valid_label_name;
use crate::core::{Address, DataItem, LabelSource, Reference};
use crate::loader::image::LoadedImage;
use crate::loader::report::{Failure, FailureKind, Phase, PhaseOutcome, ResolvedVector};
use crate::model::{LabelOutcome, MemoryModel, ModelError};

/// Result of resolving the stack pointer and the vector table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VectorResolution {
    /// The stack pointer slot, when its word could be read
    pub stack_pointer: Option<ResolvedVector>,
    /// One entry per vector whose slot could be read, in table order
    pub vectors: PhaseOutcome<ResolvedVector>,
}

/// Create the dword at `slot`, label `target` and link them.
///
/// The name is checked and the data item created before anything else, so
/// an error leaves the model untouched.
fn link_pointer<M: MemoryModel + ?Sized>(
    model: &mut M,
    slot: Address,
    target: Address,
    name: &str,
    source: LabelSource,
) -> Result<LabelOutcome, ModelError> {
    if !is_valid_label_name(name) {
        return Err(ModelError::InvalidLabelName(name.to_string()));
    }
    model.create_data(DataItem::dword(slot))?;
    let outcome = model.create_label(target, name, source, true)?;
    model.create_reference(Reference::data(slot, target))?;
    Ok(outcome)
}

/// Read the word `offset` bytes into the image, recording why it cannot be.
fn read_slot<M: MemoryModel + ?Sized>(
    model: &M,
    image: &LoadedImage,
    name: &str,
    offset: u32,
    outcome: &mut PhaseOutcome<ResolvedVector>,
) -> Option<(Address, Address)> {
    let slot = match image.base().checked_add(u64::from(offset)) {
        Ok(slot) => slot,
        Err(e) => {
            outcome.record(Failure::skip(
                Phase::Vectors,
                name,
                None,
                FailureKind::AddressOverflow,
                e.to_string(),
            ));
            return None;
        }
    };
    match model.read_u32_le(slot) {
        Ok(value) => Some((slot, Address::new(value))),
        Err(e) => {
            outcome.record(Failure::skip(
                Phase::Vectors,
                name,
                Some(slot),
                FailureKind::from(&e),
                format!("slot {:#x} of the {}-byte image: {}", offset, image.len(), e),
            ));
            None
        }
    }
}

fn note_collision(
    outcome: &mut PhaseOutcome<ResolvedVector>,
    name: &str,
    target: Address,
    result: &LabelOutcome,
) {
    if result.is_collision() {
        outcome.record(Failure::note(
            Phase::Vectors,
            name,
            Some(target),
            FailureKind::DuplicateLabel,
            format!(
                "label '{}' at {} collides with existing labels: {:?}",
                name, target, result
            ),
        ));
    }
}

/// Resolve the stack pointer slot, then every vector in table order.
pub fn resolve_vectors<M: MemoryModel + ?Sized>(
    image: &LoadedImage,
    vectors: &[VectorSpec],
    stack_label: &str,
    model: &mut M,
    cancel: &CancellationToken,
) -> VectorResolution {
    let span = info_span!("resolve_vectors", count = vectors.len(), image_len = image.len());
    let _guard = span.enter();
    let mut resolution = VectorResolution::default();
    if cancel.is_cancelled() {
        resolution.vectors.cancelled = true;
        return resolution;
    }
    let outcome = &mut resolution.vectors;

    // Stack pointer: best effort, never part of the vector list.
    if let Some((slot, target)) = read_slot(&*model, image, stack_label, 0, outcome) {
        match link_pointer(model, slot, target, stack_label, LabelSource::StackPointer) {
            Ok(result) => {
                note_collision(outcome, stack_label, target, &result);
                debug!(%target, "initial stack pointer");
                resolution.stack_pointer = Some(ResolvedVector {
                    name: stack_label.to_string(),
                    offset: 0,
                    slot,
                    target,
                    valid: true,
                });
            }
            Err(e) => {
                outcome.record(Failure::from_model(Phase::Vectors, stack_label, Some(slot), &e))
            }
        }
    }

    for vector in vectors {
        if cancel.is_cancelled() {
            outcome.cancelled = true;
            break;
        }
        let Some((slot, target)) = read_slot(&*model, image, vector.name, vector.offset, outcome)
        else {
            continue;
        };

        let valid = match link_pointer(model, slot, target, vector.name, LabelSource::Vector) {
            Ok(result) => {
                note_collision(outcome, vector.name, target, &result);
                debug!(name = vector.name, %slot, %target, "vector resolved");
                true
            }
            Err(e) => {
                let kind = match e {
                    ModelError::DataConflict { .. } => FailureKind::DataConflict,
                    _ => FailureKind::InvalidVectorTarget,
                };
                outcome.record(Failure::skip(
                    Phase::Vectors,
                    vector.name,
                    Some(slot),
                    kind,
                    e.to_string(),
                ));
                false
            }
        };
        outcome.created.push(ResolvedVector {
            name: vector.name.to_string(),
            offset: vector.offset,
            slot,
            target,
            valid,
        });
    }

    debug!(
        resolved = outcome.created.iter().filter(|v| v.valid).count(),
        failed = outcome.failures.len(),
        "vector table resolved"
    );
    resolution
}
