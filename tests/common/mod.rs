//! Common test utilities and helpers.
//!
//! Firmware images are built in memory: a stack pointer word followed by
//! vector table entries, padded out to any requested length.

#![allow(dead_code)]

use stm32map::catalog::stm32f2::{IMAGE_BASE, VECTORS};

/// Initial stack pointer used by the synthetic images
pub const STACK_TOP: u32 = 0x2001_FFF0;

/// Handler address written into the slot at `offset`.
pub fn handler_for(offset: u32) -> u32 {
    IMAGE_BASE + 0x1000 + offset * 0x10 + 1
}

/// Builder for little-endian firmware images.
#[derive(Debug, Clone, Default)]
pub struct FirmwareBuilder {
    bytes: Vec<u8>,
}

impl FirmwareBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the word at `offset`, growing the image as needed.
    pub fn word(mut self, offset: u32, value: u32) -> Self {
        let start = offset as usize;
        if self.bytes.len() < start + 4 {
            self.bytes.resize(start + 4, 0);
        }
        self.bytes[start..start + 4].copy_from_slice(&value.to_le_bytes());
        self
    }

    pub fn stack_pointer(self, value: u32) -> Self {
        self.word(0, value)
    }

    /// Fill every catalog vector slot with its distinct handler.
    pub fn full_vector_table(self) -> Self {
        VECTORS
            .iter()
            .fold(self.stack_pointer(STACK_TOP), |b, v| b.word(v.offset, handler_for(v.offset)))
    }

    /// Pad with `0xFF` (erased flash) up to `len` bytes.
    pub fn pad_to(mut self, len: usize) -> Self {
        if self.bytes.len() < len {
            self.bytes.resize(len, 0xFF);
        }
        self
    }

    /// Cut the image to `len` bytes.
    pub fn truncate(mut self, len: usize) -> Self {
        self.bytes.truncate(len);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// A complete vector table followed by some erased flash.
pub fn full_image() -> Vec<u8> {
    FirmwareBuilder::new().full_vector_table().pad_to(0x400).build()
}
