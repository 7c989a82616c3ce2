//! Memory Map Builder: creates the catalog's regions in the model.
//!
//! Entries are processed in table order and independently of each other. A
//! region that overflows the address space, overlaps an already created
//! region or reuses a name is skipped and recorded; later entries are still
//! attempted. Each created region gets a label at its base.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, info_span};

use crate::cancel::CancellationToken;
use crate::catalog::RegionSpec;
use crate::core::{Address, AddressRange, LabelSource, MemoryRegion};
use crate::loader::report::{Failure, FailureKind, Phase, PhaseOutcome};
use crate::model::MemoryModel;

static RE_WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s").expect("valid whitespace regex"));

/// Turn a region name into a label: every whitespace character becomes `_`.
pub fn sanitize_label(name: &str) -> String {
    RE_WHITESPACE.replace_all(name, "_").into_owned()
}

/// Create one uninitialized region per catalog entry.
pub fn build_regions<M: MemoryModel + ?Sized>(
    specs: &[RegionSpec],
    model: &mut M,
    cancel: &CancellationToken,
) -> PhaseOutcome<MemoryRegion> {
    let span = info_span!("build_regions", count = specs.len());
    let _guard = span.enter();
    let mut outcome = PhaseOutcome::default();

    for spec in specs {
        if cancel.is_cancelled() {
            outcome.cancelled = true;
            break;
        }
        let base = Address::new(spec.base);

        let range = match AddressRange::new(base, u64::from(spec.size)) {
            Ok(range) => range,
            Err(e) => {
                outcome.record(Failure::skip(
                    Phase::Regions,
                    spec.name,
                    Some(base),
                    FailureKind::AddressOverflow,
                    e.to_string(),
                ));
                continue;
            }
        };

        let region = match model.create_region(spec.name, range, spec.perms()) {
            Ok(region) => region,
            Err(e) => {
                outcome.record(Failure::from_model(Phase::Regions, spec.name, Some(base), &e));
                continue;
            }
        };
        debug!(name = spec.name, range = %range, perms = %region.perms, "region created");

        let label = spec.label_name();
        match model.create_label(base, &label, LabelSource::Region, false) {
            Ok(result) if result.is_collision() => outcome.record(Failure::note(
                Phase::Regions,
                spec.name,
                Some(base),
                FailureKind::DuplicateLabel,
                format!("label '{}' joins existing labels at {}: {:?}", label, base, result),
            )),
            Ok(_) => {}
            Err(e) => outcome.record(Failure {
                skipped: false,
                ..Failure::from_model(Phase::Regions, spec.name, Some(base), &e)
            }),
        }
        outcome.created.push(region);
    }

    debug!(
        created = outcome.created.len(),
        failed = outcome.failures.len(),
        "regions built"
    );
    outcome
}
