//! Configuration for the loader pipeline.
//!
//! Defaults reproduce the reference STM32F2 load: image at `0x0800_0000`,
//! at most `0xFFFFF` bytes, colliding labels kept side by side.

use serde::{Deserialize, Serialize};

use crate::catalog::DeviceVariant;
use crate::core::address::ADDRESS_SPACE_SIZE;
use crate::core::label::is_valid_label_name;
use crate::error::{Result, Stm32MapError};
use crate::model::LabelPolicy;

/// Name of the label placed at the initial stack pointer target.
pub const DEFAULT_STACK_LABEL: &str = "_STACK_BEGIN";

/// Master configuration for a load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Target device whose catalog drives the load.
    pub device: DeviceVariant,
    /// Placement of the firmware image.
    pub image: ImageConfig,
    /// Label naming and collision handling.
    pub labels: LabelConfig,
}

/// Placement of the firmware image in flash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    /// Absolute load address (default: 0x0800_0000).
    pub base: u32,
    /// Maximum number of bytes mapped (default: 0xFFFFF).
    pub max_size: u32,
    /// Name of the region holding the image.
    pub region_name: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        let catalog = DeviceVariant::default().catalog();
        Self {
            base: catalog.image_base,
            max_size: catalog.max_image_size,
            region_name: "Main Memory".to_string(),
        }
    }
}

impl ImageConfig {
    /// Image placement matching a device's catalog.
    pub fn for_device(device: DeviceVariant) -> Self {
        let catalog = device.catalog();
        Self {
            base: catalog.image_base,
            max_size: catalog.max_image_size,
            ..Self::default()
        }
    }
}

/// Label naming and collision handling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub policy: LabelPolicy,
    pub stack_label: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            policy: LabelPolicy::Coexist,
            stack_label: DEFAULT_STACK_LABEL.to_string(),
        }
    }
}

impl LoaderConfig {
    /// Default configuration for a device.
    pub fn for_device(device: DeviceVariant) -> Self {
        Self {
            device,
            image: ImageConfig::for_device(device),
            labels: LabelConfig::default(),
        }
    }

    /// Parse a configuration from JSON; missing fields take their defaults.
    pub fn from_json(json_str: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json_str)
            .map_err(|e| Stm32MapError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Stm32MapError::Serialization(e.to_string()))
    }

    /// Check the configuration for values the pipeline cannot honour.
    pub fn validate(&self) -> Result<()> {
        if self.image.max_size == 0 {
            return Err(Stm32MapError::InvalidConfig(
                "image.max_size must be non-zero".to_string(),
            ));
        }
        if u64::from(self.image.base) + u64::from(self.image.max_size) > ADDRESS_SPACE_SIZE {
            return Err(Stm32MapError::InvalidConfig(format!(
                "image window {:#x}+{:#x} exceeds the address space",
                self.image.base, self.image.max_size
            )));
        }
        if self.image.region_name.trim().is_empty() {
            return Err(Stm32MapError::InvalidConfig(
                "image.region_name cannot be empty".to_string(),
            ));
        }
        if !is_valid_label_name(&self.labels.stack_label) {
            return Err(Stm32MapError::InvalidConfig(format!(
                "'{}' is not a valid stack label",
                self.labels.stack_label
            )));
        }
        Ok(())
    }
}
