//! Memory-map loader for STM32F2 firmware images.
//!
//! Reconstructs the memory model of a raw flash image: the device's
//! peripheral and memory regions, the image itself mapped at flash, the
//! interrupt vector table with labels at each handler, and the USB OTG
//! register names.

/// Cooperative cancellation
pub mod cancel;
/// Static device descriptions
pub mod catalog;
/// Loader configuration
pub mod config;
/// Core data types module
pub mod core;
pub mod error;
pub mod hashing;
/// The four-phase loader pipeline
pub mod loader;
pub mod logging;
pub mod model;

#[cfg(feature = "python-ext")]
pub mod python_bindings;

pub use cancel::CancellationToken;
pub use catalog::{DeviceCatalog, DeviceVariant};
pub use config::LoaderConfig;
pub use error::{Result, Stm32MapError};
pub use loader::{Failure, FailureKind, LoadReport, LoadState, Phase, Stm32Loader};
pub use model::{LabelPolicy, MemoryModel, ModelSnapshot, ProgramModel};

#[cfg(feature = "python-ext")]
use pyo3::prelude::*;

/// Python extension module.
#[cfg(feature = "python-ext")]
#[pymodule]
fn stm32map(m: &Bound<'_, PyModule>) -> PyResult<()> {
    python_bindings::register_python_bindings(m)
}
