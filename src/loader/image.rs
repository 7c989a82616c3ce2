//! Image Loader: maps the raw firmware bytes into flash.
//!
//! The stream is read up to the configured cap, never past its end, and the
//! bytes become the one initialized region of the model. Any failure here is
//! fatal for the load: the vector table lives in these bytes.

use serde::{Deserialize, Serialize};
use std::io::Read;
use tracing::{debug, info, info_span};

use crate::config::ImageConfig;
use crate::core::{Address, MemoryRegion, Perms};
use crate::error::{Result, Stm32MapError};
use crate::hashing::sha256_digest;
use crate::model::MemoryModel;

/// Placement of the firmware image once its bytes live in the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    base: Address,
    length: u32,
    sha256: String,
}

/// Identifying facts about a loaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSummary {
    pub region: String,
    pub base: Address,
    pub length: u32,
    pub sha256: String,
}

impl LoadedImage {
    /// Describe `bytes` mapped at `base`; `bytes` must not exceed the address
    /// space remaining above `base`.
    pub fn new(base: Address, bytes: &[u8]) -> Self {
        Self {
            base,
            length: bytes.len() as u32,
            sha256: sha256_digest(bytes),
        }
    }

    pub fn base(&self) -> Address {
        self.base
    }

    pub fn len(&self) -> u32 {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    pub fn summary(&self, region: &str) -> ImageSummary {
        ImageSummary {
            region: region.to_string(),
            base: self.base,
            length: self.length,
            sha256: self.sha256.clone(),
        }
    }
}

/// Read at most `config.max_size` bytes from `stream` and map them at
/// `config.base` as a read/execute region.
///
/// # Errors
/// - [`Stm32MapError::Io`] if the stream fails
/// - [`Stm32MapError::EmptyImage`] if the stream holds no bytes
/// - [`Stm32MapError::MainMemory`] if the region cannot be created
pub fn load_image<R: Read, M: MemoryModel + ?Sized>(
    stream: R,
    config: &ImageConfig,
    model: &mut M,
) -> Result<(LoadedImage, MemoryRegion)> {
    let span = info_span!("load_image", base = config.base, max_size = config.max_size);
    let _guard = span.enter();

    let mut bytes = Vec::new();
    stream
        .take(u64::from(config.max_size))
        .read_to_end(&mut bytes)?;
    if bytes.is_empty() {
        return Err(Stm32MapError::EmptyImage);
    }
    debug!(length = bytes.len(), "image bytes read");

    let base = Address::new(config.base);
    let image = LoadedImage::new(base, &bytes);
    let region = model
        .create_initialized_region(&config.region_name, base, Perms::READ | Perms::EXECUTE, bytes)
        .map_err(Stm32MapError::MainMemory)?;

    info!(
        region = %region.name,
        range = %region.range,
        "firmware image mapped"
    );
    Ok((image, region))
}
