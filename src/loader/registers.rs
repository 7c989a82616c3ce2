//! Register Labeler: names the registers of a peripheral bank.

use tracing::{debug, info_span};

use crate::cancel::CancellationToken;
use crate::catalog::RegisterSpec;
use crate::core::{Address, Label, LabelSource};
use crate::loader::report::{Failure, FailureKind, Phase, PhaseOutcome};
use crate::model::{LabelOutcome, MemoryModel};

/// Label `base + offset` with each register's name, in table order.
///
/// The same offset may appear more than once; each entry is applied and the
/// collision is noted, never skipped. `created` lists the register labels the
/// model holds afterwards, so a repeated name is reported once.
pub fn label_registers<M: MemoryModel + ?Sized>(
    registers: &[RegisterSpec],
    base: Address,
    model: &mut M,
    cancel: &CancellationToken,
) -> PhaseOutcome<Label> {
    let span = info_span!("label_registers", %base, count = registers.len());
    let _guard = span.enter();
    let mut outcome = PhaseOutcome::default();

    for register in registers {
        if cancel.is_cancelled() {
            outcome.cancelled = true;
            break;
        }
        let address = match base.checked_add(u64::from(register.offset)) {
            Ok(address) => address,
            Err(e) => {
                outcome.record(Failure::skip(
                    Phase::Registers,
                    register.name,
                    None,
                    FailureKind::AddressOverflow,
                    e.to_string(),
                ));
                continue;
            }
        };

        match model.create_label(address, register.name, LabelSource::Register, true) {
            Ok(result) => {
                if result.is_collision() {
                    outcome.record(Failure::note(
                        Phase::Registers,
                        register.name,
                        Some(address),
                        FailureKind::DuplicateLabel,
                        format!("register label at {} collides: {:?}", address, result),
                    ));
                }
                match result {
                    LabelOutcome::AlreadyPresent => continue,
                    LabelOutcome::Replaced { previous } => outcome
                        .created
                        .retain(|l: &Label| l.address != address || !previous.contains(&l.name)),
                    _ => {}
                }
                outcome
                    .created
                    .push(Label::new(register.name, address, LabelSource::Register, true));
            }
            Err(e) => outcome.record(Failure::from_model(
                Phase::Registers,
                register.name,
                Some(address),
                &e,
            )),
        }
    }

    debug!(labeled = outcome.created.len(), "register bank labeled");
    outcome
}
