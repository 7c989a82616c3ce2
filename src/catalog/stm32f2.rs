//! STM32F2xx device map.
//!
//! Region bases and sizes, vector offsets and USB OTG register offsets as
//! given by the STM32F2 reference manual memory map (RM0033). Peripheral
//! windows are declared one byte short of their 1 KiB boundary, as in the
//! reference tables. The USB OTG register tables repeat some offsets and
//! names; they are kept exactly as listed.

use super::{DeviceCatalog, RegionSpec, RegisterBank, RegisterSpec, VectorSpec};

/// Absolute address the flash image is mapped at.
pub const IMAGE_BASE: u32 = 0x0800_0000;
/// Maximum number of image bytes mapped into flash.
pub const MAX_IMAGE_SIZE: u32 = 0xF_FFFF;
/// Base of the USB OTG full-speed controller.
pub const USB_OTG_FS_BASE: u32 = 0x5000_0000;
/// Base of the USB OTG high-speed controller.
pub const USB_OTG_HS_BASE: u32 = 0x4004_0000;

pub static CATALOG: DeviceCatalog = DeviceCatalog {
    name: "STM32F2",
    language: "ARM:LE:32:Cortex",
    image_base: IMAGE_BASE,
    max_image_size: MAX_IMAGE_SIZE,
    regions: REGIONS,
    vectors: VECTORS,
    register_banks: REGISTER_BANKS,
};

pub const REGISTER_BANKS: &[RegisterBank] = &[
    RegisterBank {
        peripheral: "USB OTG HS",
        base: USB_OTG_HS_BASE,
        registers: USB_OTG_HS_REGISTERS,
    },
    RegisterBank {
        peripheral: "USB OTG FS",
        base: USB_OTG_FS_BASE,
        registers: USB_OTG_FS_REGISTERS,
    },
];

pub const REGIONS: &[RegionSpec] = &[
    RegionSpec::new("TIM2", 0x4000_0000, 0x3FF, true, true, false),
    RegionSpec::new("TIM3", 0x4000_0400, 0x3FF, true, true, false),
    RegionSpec::new("TIM4", 0x4000_0800, 0x3FF, true, true, false),
    RegionSpec::new("TIM5", 0x4000_0C00, 0x3FF, true, true, false),
    RegionSpec::new("TIM6", 0x4000_1000, 0x3FF, true, true, false),
    RegionSpec::new("TIM7", 0x4000_1400, 0x3FF, true, true, false),
    RegionSpec::new("TIM12", 0x4000_1800, 0x3FF, true, true, false),
    RegionSpec::new("TIM13", 0x4000_1C00, 0x3FF, true, true, false),
    RegionSpec::new("TIM14", 0x4000_2000, 0x3FF, true, true, false),
    RegionSpec::new("RTC/BKP", 0x4000_2800, 0x3FF, true, true, false),
    RegionSpec::new("WWDG", 0x4000_2C00, 0x3FF, true, true, false),
    RegionSpec::new("IWDG", 0x4000_3000, 0x3FF, true, true, false),
    RegionSpec::new("SPI2/I2S2", 0x4000_3800, 0x3FF, true, true, false),
    RegionSpec::new("SPI3/I2S3", 0x4000_3C00, 0x3FF, true, true, false),
    RegionSpec::new("USART2", 0x4000_4400, 0x3FF, true, true, false),
    RegionSpec::new("USART3", 0x4000_4800, 0x3FF, true, true, false),
    RegionSpec::new("USART4", 0x4000_4C00, 0x3FF, true, true, false),
    RegionSpec::new("USART5", 0x4000_5000, 0x3FF, true, true, false),
    RegionSpec::new("I2C1", 0x4000_5400, 0x3FF, true, true, false),
    RegionSpec::new("I2C2", 0x4000_5800, 0x3FF, true, true, false),
    RegionSpec::new("I2C3", 0x4000_5C00, 0x3FF, true, true, false),
    RegionSpec::new("CAN1", 0x4000_6400, 0x3FF, true, true, false),
    RegionSpec::new("CAN2", 0x4000_6800, 0x3FF, true, true, false),
    RegionSpec::new("PWR", 0x4000_7000, 0x3FF, true, true, false),
    RegionSpec::new("DAC", 0x4000_7400, 0x3FF, true, true, false),
    RegionSpec::new("TIM1", 0x4001_0000, 0x3FF, true, true, false),
    RegionSpec::new("TIM8", 0x4001_0400, 0x3FF, true, true, false),
    RegionSpec::new("USART1", 0x4001_1000, 0x3FF, true, true, false),
    RegionSpec::new("USART6", 0x4001_1400, 0x3FF, true, true, false),
    RegionSpec::new("ADC1/2/3", 0x4001_2000, 0x3FF, true, true, false),
    RegionSpec::new("SDIO", 0x4001_2C00, 0x3FF, true, true, false),
    RegionSpec::new("SPI1", 0x4001_3000, 0x3FF, true, true, false),
    RegionSpec::new("SYSCFG", 0x4001_3800, 0x3FF, true, true, false),
    RegionSpec::new("EXTI", 0x4001_3C00, 0x3FF, true, true, false),
    RegionSpec::new("TIM9", 0x4001_4000, 0x3FF, true, true, false),
    RegionSpec::new("TIM10", 0x4001_4400, 0x3FF, true, true, false),
    RegionSpec::new("TIM11", 0x4001_4800, 0x3FF, true, true, false),
    RegionSpec::new("GPIOA", 0x4002_0000, 0x3FF, true, true, false),
    RegionSpec::new("GPIOB", 0x4002_0400, 0x3FF, true, true, false),
    RegionSpec::new("GPIOC", 0x4002_0800, 0x3FF, true, true, false),
    RegionSpec::new("GPIOD", 0x4002_0C00, 0x3FF, true, true, false),
    RegionSpec::new("GPIOE", 0x4002_1000, 0x3FF, true, true, false),
    RegionSpec::new("GPIOF", 0x4002_1400, 0x3FF, true, true, false),
    RegionSpec::new("GPIOG", 0x4002_1800, 0x3FF, true, true, false),
    RegionSpec::new("GPIOH", 0x4002_1C00, 0x3FF, true, true, false),
    RegionSpec::new("GPIOI", 0x4002_2000, 0x3FF, true, true, false),
    RegionSpec::new("CRC", 0x4002_3000, 0x3FF, true, true, false),
    RegionSpec::new("RCC", 0x4002_3800, 0x3FF, true, true, false),
    RegionSpec::new("Flash Interface Register", 0x4002_3C00, 0x3FF, true, true, false),
    RegionSpec::new("BKPSRAM", 0x4002_4000, 0x3FF, true, true, false),
    RegionSpec::new("DMA1", 0x4002_6000, 0x3FF, true, true, false),
    RegionSpec::new("DMA2", 0x4002_6400, 0x3FF, true, true, false),
    RegionSpec::new("Ethernet Mac", 0x4002_8000, 0x13FF, true, true, false),
    RegionSpec::new("USB OTG HS", 0x4004_0000, 0x3FFFF, true, true, false),
    RegionSpec::new("USB OTG FS", 0x5000_0000, 0x3FFFF, true, true, false),
    RegionSpec::new("DCMI", 0x5005_0000, 0x3FF, true, true, false),
    RegionSpec::new("CRYP", 0x5006_0000, 0x3FF, true, true, false),
    RegionSpec::new("HASH", 0x5006_0400, 0x3FF, true, true, false),
    RegionSpec::new("RNG", 0x5006_0800, 0x3FF, true, true, false),
    RegionSpec::new("FSMC Control Register", 0xA000_0000, 0xFFF, true, true, false),
    RegionSpec::new("SRAM", 0x2000_0000, 0x20000, true, true, true),
    RegionSpec::new("System Memory", 0x1FFF_0000, 0x77FF, true, true, true),
    // One-time programmable area and option bytes are read-only.
    RegionSpec::new("OTP", 0x1FFF_7800, 0x20F, true, false, false),
    RegionSpec::new("Option Bytes", 0x1FFF_C000, 0xF, true, false, false),
];

/// Exception and interrupt vectors after the initial stack pointer.
pub const VECTORS: &[VectorSpec] = &[
    VectorSpec::new("RESET", 0x4),
    VectorSpec::new("NMI", 0x8),
    VectorSpec::new("HardFault", 0xC),
    VectorSpec::new("MemManage", 0x10),
    VectorSpec::new("BusFault", 0x14),
    VectorSpec::new("UsageFault", 0x18),
    VectorSpec::new("SVCall", 0x2C),
    VectorSpec::new("Debug Monitor", 0x30),
    VectorSpec::new("PendSV", 0x38),
    VectorSpec::new("SysTick", 0x3C),
    VectorSpec::new("WWDG", 0x40),
    VectorSpec::new("PVD", 0x44),
    VectorSpec::new("TAMP_STAMP", 0x48),
    VectorSpec::new("RTC_WKUP", 0x4C),
    VectorSpec::new("FLASH", 0x50),
    VectorSpec::new("RCC", 0x54),
    VectorSpec::new("EXTI0", 0x58),
    VectorSpec::new("EXTI1", 0x5C),
    VectorSpec::new("EXTI2", 0x60),
    VectorSpec::new("EXTI3", 0x64),
    VectorSpec::new("EXTI4", 0x68),
    VectorSpec::new("DMA1_Stream0", 0x6C),
    VectorSpec::new("DMA1_Stream1", 0x70),
    VectorSpec::new("DMA1_Stream2", 0x74),
    VectorSpec::new("DMA1_Stream3", 0x78),
    VectorSpec::new("DMA1_Stream4", 0x7C),
    VectorSpec::new("DMA1_Stream5", 0x80),
    VectorSpec::new("DMA1_Stream6", 0x84),
    VectorSpec::new("ADC", 0x88),
    VectorSpec::new("CAN1_TX", 0x8C),
    VectorSpec::new("CAN1_RX0", 0x90),
    VectorSpec::new("CAN1_RX1", 0x94),
    VectorSpec::new("CAN1_SCE", 0x98),
    VectorSpec::new("EXTI9_5", 0x9C),
    VectorSpec::new("TIM1_BRK_TIM9", 0xA0),
    VectorSpec::new("TIM1_UP_TIM10", 0xA4),
    VectorSpec::new("TIM1_TRG_COM_TIM11", 0xA8),
    VectorSpec::new("TIM1_CC", 0xAC),
    VectorSpec::new("TIM2", 0xB0),
    VectorSpec::new("TIM3", 0xB4),
    VectorSpec::new("TIM4", 0xB8),
    VectorSpec::new("I2C1_EV", 0xBC),
    VectorSpec::new("I2C1_ER", 0xC0),
    VectorSpec::new("I2C2_EV", 0xC4),
    VectorSpec::new("I2C2_ER", 0xC8),
    VectorSpec::new("SPI1", 0xCC),
    VectorSpec::new("SPI2", 0xD0),
    VectorSpec::new("USART1", 0xD4),
    VectorSpec::new("USART2", 0xD8),
    VectorSpec::new("USART3", 0xDC),
    VectorSpec::new("EXTI15_10", 0xE0),
    VectorSpec::new("RTC_Alarm", 0xE4),
    VectorSpec::new("OTG_FS_WKUP", 0xE8),
    VectorSpec::new("TIM8_BRK_TIM12", 0xEC),
    VectorSpec::new("TIM8_UP_TIM13", 0xF0),
    VectorSpec::new("TIM8_TRG_COM_TIM14", 0xF4),
    VectorSpec::new("TIM8_CC", 0xF8),
    VectorSpec::new("DMA1_Stream7", 0xFC),
    VectorSpec::new("FSMC", 0x100),
    VectorSpec::new("SDIO", 0x104),
    VectorSpec::new("TIM5", 0x108),
    VectorSpec::new("SPI3", 0x10C),
    VectorSpec::new("UART4", 0x110),
    VectorSpec::new("UART5", 0x114),
    VectorSpec::new("TIM6_DAC", 0x118),
    VectorSpec::new("TIM7", 0x11C),
    VectorSpec::new("DMA2_Stream0", 0x120),
    VectorSpec::new("DMA2_Stream1", 0x124),
    VectorSpec::new("DMA2_Stream2", 0x128),
    VectorSpec::new("DMA2_Stream3", 0x12C),
    VectorSpec::new("DMA2_Stream4", 0x130),
    VectorSpec::new("ETH", 0x134),
    VectorSpec::new("ETH_WKUP", 0x138),
    VectorSpec::new("CAN2_TX", 0x13C),
    VectorSpec::new("CAN2_RX0", 0x140),
    VectorSpec::new("CAN2_RX1", 0x144),
    VectorSpec::new("CAN2_SCE", 0x148),
    VectorSpec::new("OTG_FS", 0x14C),
    VectorSpec::new("DMA2_Stream5", 0x150),
    VectorSpec::new("DMA2_Stream6", 0x154),
    VectorSpec::new("DMA2_Stream7", 0x158),
    VectorSpec::new("USART6", 0x15C),
    VectorSpec::new("I2C3_EV", 0x160),
    VectorSpec::new("I2C3_ER", 0x164),
    VectorSpec::new("OTG_HS_EP1_OUT", 0x168),
    VectorSpec::new("OTG_HS_EP1_IN", 0x16C),
    VectorSpec::new("OTG_HS_WKUP", 0x170),
    VectorSpec::new("OTG_HS", 0x174),
    VectorSpec::new("DCMI", 0x178),
    VectorSpec::new("CRYP", 0x17C),
    VectorSpec::new("HACH_RNG", 0x180),
];

pub const USB_OTG_FS_REGISTERS: &[RegisterSpec] = &[
    RegisterSpec::new("OTG_FS_GOTGCTL", 0x0),
    RegisterSpec::new("OTG_FS_GOTGINT", 0x4),
    RegisterSpec::new("OTG_FS_GAHBCFG", 0x8),
    RegisterSpec::new("OTG_FS_GUSBCFG", 0xC),
    RegisterSpec::new("OTG_FS_GRSTCTL", 0x10),
    RegisterSpec::new("OTG_FS_GINTSTS", 0x14),
    RegisterSpec::new("OTG_FS_GINTMSK", 0x18),
    RegisterSpec::new("OTG_FS_GRXSTSR", 0x1C),
    RegisterSpec::new("OTG_FS_GRXSTSP", 0x20),
    RegisterSpec::new("OTG_FS_GRXFSIZ", 0x24),
    RegisterSpec::new("OTG_FS_HNPTXFSIZ", 0x28),
    RegisterSpec::new("OTG_FS_HNPTXSTS", 0x2C),
    RegisterSpec::new("OTG_FS_GCCFG", 0x38),
    RegisterSpec::new("OTG_FS_CID", 0x3C),
    RegisterSpec::new("OTG_FS_HPTIZ", 0x100),
    RegisterSpec::new("OTG_FS_DIEPTXF1", 0x104),
    RegisterSpec::new("OTG_FS_DIEPTXF2", 0x108),
    RegisterSpec::new("OTG_FS_DIEPTXF3", 0x10C),
    RegisterSpec::new("OTG_FS_HCFG", 0x400),
    RegisterSpec::new("OTG_FS_HFIR", 0x404),
    RegisterSpec::new("OTG_FS_HFNUM", 0x408),
    RegisterSpec::new("OTG_FS_HPTXSTS", 0x410),
    RegisterSpec::new("OTG_FS_HAINT", 0x414),
    RegisterSpec::new("OTG_FS_HAINTMSK", 0x418),
    RegisterSpec::new("OTG_FS_HPRT", 0x440),
    RegisterSpec::new("OTG_FS_HCINTx", 0x508),
    RegisterSpec::new("OTG_FS_HCINTMSKx", 0x50C),
    RegisterSpec::new("OTG_FS_HCTSIZx", 0x510),
    RegisterSpec::new("OTG_FS_DCFG", 0x800),
    RegisterSpec::new("OTG_FS_DCTL", 0x804),
    RegisterSpec::new("OTG_FS_DSTS", 0x808),
    RegisterSpec::new("OTG_FS_DIEPMSK", 0x810),
    RegisterSpec::new("OTG_FS_DOEPMSK", 0x814),
    RegisterSpec::new("OTG_FS_DAINT", 0x818),
    RegisterSpec::new("OTG_FS_DAINTMSK", 0x81C),
    RegisterSpec::new("OTG_FS_DVBUSDIS", 0x828),
    RegisterSpec::new("OTG_FS_DVBUSPULSE", 0x82C),
    RegisterSpec::new("OTG_FS_DIEPEMPMSK", 0x834),
    RegisterSpec::new("OTG_FS_DIEPCTL0", 0x900),
    RegisterSpec::new("OTG_FS_DIEPINTx", 0x908),
    RegisterSpec::new("OTG_FS_DIEPTSIZ0", 0x910),
    RegisterSpec::new("OTG_FS_DIEPTSIZ1", 0x930),
    RegisterSpec::new("OTG_FS_DIEPTSIZ1", 0x950),
    RegisterSpec::new("OTG_FS_DIEPTSIZ1", 0x970),
    RegisterSpec::new("OTG_FS_DOEPCTL0", 0xB00),
    RegisterSpec::new("OTG_FS_DOEPCTL1", 0xB20),
    RegisterSpec::new("OTG_FS_DOEPCTL2", 0xB40),
    RegisterSpec::new("OTG_FS_DOEPCTL3", 0xB60),
    RegisterSpec::new("OTG_FS_DOEPINT", 0xB08),
    RegisterSpec::new("OTG_FS_DOEPTSIZ", 0xB10),
];

pub const USB_OTG_HS_REGISTERS: &[RegisterSpec] = &[
    RegisterSpec::new("OTG_HS_GOTGCTL", 0x0),
    RegisterSpec::new("OTG_HS_GOTGINT", 0x4),
    RegisterSpec::new("OTG_HS_GAHBCFG", 0x8),
    RegisterSpec::new("OTG_HS_GUSBCFG", 0xC),
    RegisterSpec::new("OTG_HS_GRSTCTL", 0x10),
    RegisterSpec::new("OTG_HS_GINTSTS", 0x14),
    RegisterSpec::new("OTG_HS_GINTMSK", 0x18),
    RegisterSpec::new("OTG_HS_GRXSTSR", 0x1C),
    RegisterSpec::new("OTG_HS_GRXSTSP", 0x20),
    RegisterSpec::new("OTG_HS_GRXFSIZ", 0x24),
    RegisterSpec::new("OTG_HS_HNPTXFSIZ", 0x28),
    RegisterSpec::new("OTG_HS_HNPTXSTS", 0x2C),
    RegisterSpec::new("OTG_HS_GCCFG", 0x38),
    RegisterSpec::new("OTG_HS_CID", 0x3C),
    RegisterSpec::new("OTG_HS_HPTIZ", 0x100),
    RegisterSpec::new("OTG_HS_DIEPTXF1", 0x104),
    RegisterSpec::new("OTG_HS_DIEPTXF2", 0x108),
    RegisterSpec::new("OTG_HS_DIEPTXF3", 0x10C),
    RegisterSpec::new("OTG_HS_DIEPTXF5", 0x110),
    RegisterSpec::new("OTG_HS_DIEPTXF6", 0x114),
    RegisterSpec::new("OTG_HS_DIEPTXF7", 0x118),
    RegisterSpec::new("OTG_HS_HCFG", 0x400),
    RegisterSpec::new("OTG_HS_HFIR", 0x404),
    RegisterSpec::new("OTG_HS_HFNUM", 0x408),
    RegisterSpec::new("OTG_HS_HPTXSTS", 0x410),
    RegisterSpec::new("OTG_HS_HAINT", 0x414),
    RegisterSpec::new("OTG_HS_HAINTMSK", 0x418),
    RegisterSpec::new("OTG_HS_HPRT", 0x440),
    RegisterSpec::new("OTG_HS_HCSPLT", 0x504),
    RegisterSpec::new("OTG_HS_HCINT", 0x508),
    RegisterSpec::new("OTG_HS_HCINTMSK", 0x50C),
    RegisterSpec::new("OTG_HS_HCTSIZx", 0x510),
    RegisterSpec::new("OTG_HS_HCDMA", 0x514),
    RegisterSpec::new("OTG_HS_HCCHAR0", 0x500),
    RegisterSpec::new("OTG_HS_HCCHAR1", 0x520),
    RegisterSpec::new("OTG_HS_HCCHAR2", 0x540),
    RegisterSpec::new("OTG_HS_HCCHAR3", 0x560),
    RegisterSpec::new("OTG_HS_HCCHAR4", 0x580),
    RegisterSpec::new("OTG_HS_HCCHAR5", 0x5A0),
    RegisterSpec::new("OTG_HS_HCCHAR6", 0x5C0),
    RegisterSpec::new("OTG_HS_HCCHAR7", 0x5E0),
    RegisterSpec::new("OTG_HS_HCCHAR8", 0x600),
    RegisterSpec::new("OTG_HS_HCCHAR9", 0x620),
    RegisterSpec::new("OTG_HS_HCCHAR10", 0x640),
    RegisterSpec::new("OTG_HS_HCCHAR11", 0x660),
    RegisterSpec::new("OTG_HS_DCFG", 0x800),
    RegisterSpec::new("OTG_HS_DCTL", 0x804),
    RegisterSpec::new("OTG_HS_DSTS", 0x808),
    RegisterSpec::new("OTG_HS_DIEPMSK", 0x810),
    RegisterSpec::new("OTG_HS_DOEPMSK", 0x814),
    RegisterSpec::new("OTG_HS_DAINT", 0x818),
    RegisterSpec::new("OTG_HS_DAINTMSK", 0x81C),
    RegisterSpec::new("OTG_HS_DVBUSDIS", 0x828),
    RegisterSpec::new("OTG_HS_DVBUSPULSE", 0x82C),
    RegisterSpec::new("OTG_HS_DIEPEMPMSK", 0x834),
    RegisterSpec::new("OTG_HS_DEACHINT", 0x838),
    RegisterSpec::new("OTG_HS_DEACHINTMSK", 0x83C),
    RegisterSpec::new("OTG_HS_DIEPEACHMSK1", 0x844),
    RegisterSpec::new("OTG_HS_DOEPEACHMSK1", 0x884),
    RegisterSpec::new("OTG_HS_DIEPCTL0", 0x900),
    RegisterSpec::new("OTG_HS_DIEPCTL1", 0x920),
    RegisterSpec::new("OTG_HS_DIEPCTL2", 0x940),
    RegisterSpec::new("OTG_HS_DIEPCTL3", 0x960),
    RegisterSpec::new("OTG_HS_DIEPCTL4", 0x980),
    RegisterSpec::new("OTG_HS_DIEPCTL5", 0x9A0),
    RegisterSpec::new("OTG_HS_DIEPCTL6", 0x9C0),
    RegisterSpec::new("OTG_HS_DIEPCTL7", 0x9E0),
    RegisterSpec::new("OTG_HS_DIEPCTL0", 0x900),
    RegisterSpec::new("OTG_HS_DIEPINTx", 0x908),
    RegisterSpec::new("OTG_HS_DIEPTSIZ0", 0x910),
    RegisterSpec::new("OTG_HS_DIEPTSIZ1", 0x930),
    RegisterSpec::new("OTG_HS_DIEPTSIZ1", 0x950),
    RegisterSpec::new("OTG_HS_DIEPTSIZ1", 0x970),
    RegisterSpec::new("OTG_HS_DOEPCTL0", 0xB00),
    RegisterSpec::new("OTG_HS_DOEPCTL1", 0xB20),
    RegisterSpec::new("OTG_HS_DOEPCTL2", 0xB40),
    RegisterSpec::new("OTG_HS_DOEPCTL3", 0xB60),
    RegisterSpec::new("OTG_HS_DOEPINT", 0xB08),
    RegisterSpec::new("OTG_HS_DOEPTSIZ", 0xB10),
];
