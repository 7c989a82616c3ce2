//! The loader pipeline.
//!
//! A load runs four phases in a fixed order against one [`MemoryModel`]:
//!
//! 1. [`regions`]: every catalog region, uninitialized, with a label at its base
//! 2. [`image`]: the firmware bytes as the initialized flash region
//! 3. [`vectors`]: stack pointer and vector table slots
//! 4. [`registers`]: register labels for each peripheral bank
//!
//! Only the image phase can abort a load. Everything else records
//! [`Failure`]s in the [`LoadReport`] and carries on.

pub mod image;
pub mod regions;
pub mod registers;
pub mod report;
pub mod vectors;

pub use image::{load_image, ImageSummary, LoadedImage};
pub use regions::{build_regions, sanitize_label};
pub use registers::label_registers;
pub use report::{
    Failure, FailureKind, LoadReport, LoadState, Phase, PhaseOutcome, ResolvedVector,
};
pub use vectors::{resolve_vectors, VectorResolution};

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info, info_span, warn};

use crate::cancel::CancellationToken;
use crate::config::LoaderConfig;
use crate::core::Address;
use crate::error::Result;
use crate::model::{MemoryModel, ProgramModel};

/// Drives the pipeline for one configured device.
#[derive(Debug, Clone)]
pub struct Stm32Loader {
    config: LoaderConfig,
    cancel: CancellationToken,
}

impl Default for Stm32Loader {
    fn default() -> Self {
        Self {
            config: LoaderConfig::default(),
            cancel: CancellationToken::new(),
        }
    }
}

impl Stm32Loader {
    /// Build a loader, rejecting configurations the pipeline cannot honour.
    pub fn new(config: LoaderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cancel: CancellationToken::new(),
        })
    }

    /// Observe `cancel` between items; a tripped token ends the load early.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    /// Run every phase against `model`, reading the image from `stream`.
    ///
    /// # Errors
    /// Returns an error only when the image cannot be read or mapped; the
    /// model then holds the regions built so far.
    pub fn load<R: Read, M: MemoryModel + ?Sized>(
        &self,
        stream: R,
        model: &mut M,
    ) -> Result<LoadReport> {
        let device = self.config.device;
        let catalog = device.catalog();
        let span = info_span!("load", device = catalog.name);
        let _guard = span.enter();

        for issue in device.issues() {
            if issue.kind.is_expected() {
                debug!(%issue, "catalog note");
            } else {
                warn!(%issue, "catalog inconsistency");
            }
        }

        let mut report = LoadReport::new(catalog.name);

        let regions = build_regions(catalog.regions, model, &self.cancel);
        report.regions = regions.created;
        report.failures.extend(regions.failures);
        if regions.cancelled {
            return Ok(self.cancelled(report, Phase::Regions));
        }

        if self.cancel.is_cancelled() {
            return Ok(self.cancelled(report, Phase::Image));
        }
        let (image, flash) = load_image(stream, &self.config.image, model)?;
        report.image = Some(image.summary(&flash.name));

        let resolution = resolve_vectors(
            &image,
            catalog.vectors,
            &self.config.labels.stack_label,
            model,
            &self.cancel,
        );
        report.stack_pointer = resolution.stack_pointer;
        report.vectors = resolution.vectors.created;
        report.failures.extend(resolution.vectors.failures);
        if resolution.vectors.cancelled {
            return Ok(self.cancelled(report, Phase::Vectors));
        }

        for bank in catalog.register_banks {
            let outcome =
                label_registers(bank.registers, Address::new(bank.base), model, &self.cancel);
            report.register_labels.extend(outcome.created);
            report.failures.extend(outcome.failures);
            if outcome.cancelled {
                return Ok(self.cancelled(report, Phase::Registers));
            }
        }

        info!(
            regions = report.regions.len(),
            vectors = report.vectors.iter().filter(|v| v.valid).count(),
            registers = report.register_labels.len(),
            failures = report.failures.len(),
            "load complete"
        );
        Ok(report)
    }

    /// Load an in-memory image into a fresh [`ProgramModel`].
    pub fn load_bytes(&self, data: &[u8]) -> Result<(LoadReport, ProgramModel)> {
        let mut model = ProgramModel::new(self.config.labels.policy);
        let report = self.load(data, &mut model)?;
        Ok((report, model))
    }

    /// Load an image file into a fresh [`ProgramModel`].
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<(LoadReport, ProgramModel)> {
        let file = File::open(path.as_ref())?;
        let mut model = ProgramModel::new(self.config.labels.policy);
        let report = self.load(BufReader::new(file), &mut model)?;
        Ok((report, model))
    }

    fn cancelled(&self, mut report: LoadReport, phase: Phase) -> LoadReport {
        warn!(%phase, "load cancelled");
        report.state = LoadState::Cancelled { phase };
        report
    }
}
