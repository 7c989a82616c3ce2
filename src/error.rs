//! Error types for the firmware memory-map loader.
//!
//! Only conditions that abort a load are errors here. Per-item problems
//! (a conflicting region, an unreadable vector slot, a colliding label) are
//! collected as [`crate::loader::Failure`] entries instead and never stop a
//! run.

use thiserror::Error;

use crate::model::ModelError;

/// Main error type for loader operations.
#[derive(Debug, Error)]
pub enum Stm32MapError {
    /// The firmware byte stream could not be read
    #[error("I/O error while reading firmware image: {0}")]
    Io(#[from] std::io::Error),

    /// The firmware byte stream contained no bytes
    #[error("firmware image is empty")]
    EmptyImage,

    /// The flash image region could not be created
    #[error("cannot map firmware image: {0}")]
    MainMemory(#[source] ModelError),

    /// Configuration failed validation
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for loader operations
pub type Result<T> = std::result::Result<T, Stm32MapError>;

/// Convert loader errors to PyO3 exceptions
#[cfg(feature = "python-ext")]
impl From<Stm32MapError> for pyo3::PyErr {
    fn from(err: Stm32MapError) -> pyo3::PyErr {
        use pyo3::exceptions::{PyException, PyIOError, PyValueError};

        match err {
            Stm32MapError::Io(e) => PyIOError::new_err(e.to_string()),
            Stm32MapError::EmptyImage | Stm32MapError::InvalidConfig(_) => {
                PyValueError::new_err(err.to_string())
            }
            _ => PyException::new_err(err.to_string()),
        }
    }
}
