//! Python bindings for the loader.
//!
//! Results cross the boundary as JSON documents; Python callers get the
//! load report and a snapshot of the resulting model.

use pyo3::prelude::*;
use serde::Serialize;

use crate::config::LoaderConfig;
use crate::error::Stm32MapError;
use crate::loader::{LoadReport, Stm32Loader};
use crate::model::ModelSnapshot;

#[derive(Serialize)]
struct LoadResult {
    report: LoadReport,
    model: ModelSnapshot,
}

fn loader_from(config_json: Option<&str>) -> Result<Stm32Loader, Stm32MapError> {
    let config = match config_json {
        Some(json) => LoaderConfig::from_json(json)?,
        None => LoaderConfig::default(),
    };
    Stm32Loader::new(config)
}

/// Load a firmware image from bytes and return the report and model as JSON.
#[pyfunction]
#[pyo3(signature = (data, config_json=None))]
pub fn load_firmware(data: &[u8], config_json: Option<&str>) -> PyResult<String> {
    let (report, model) = loader_from(config_json)?.load_bytes(data)?;
    let result = LoadResult {
        report,
        model: model.snapshot(),
    };
    serde_json::to_string(&result)
        .map_err(|e| Stm32MapError::Serialization(e.to_string()).into())
}

/// Load a firmware image file and return the report and model as JSON.
#[pyfunction]
#[pyo3(signature = (path, config_json=None))]
pub fn load_firmware_path(path: &str, config_json: Option<&str>) -> PyResult<String> {
    let (report, model) = loader_from(config_json)?.load_path(path)?;
    let result = LoadResult {
        report,
        model: model.snapshot(),
    };
    serde_json::to_string(&result)
        .map_err(|e| Stm32MapError::Serialization(e.to_string()).into())
}

/// Install a tracing subscriber, optionally emitting JSON lines.
#[pyfunction]
#[pyo3(signature = (json=false))]
pub fn init_logging(json: bool) {
    if json {
        crate::logging::init_tracing_json();
    } else {
        crate::logging::init_tracing();
    }
}

/// Register all Python bindings with the module.
pub fn register_python_bindings(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(load_firmware, m)?)?;
    m.add_function(wrap_pyfunction!(load_firmware_path, m)?)?;
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;
    Ok(())
}
