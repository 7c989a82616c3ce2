use stm32map::catalog::stm32f2::VECTORS;
use stm32map::core::Address;
use stm32map::{FailureKind, LoaderConfig, Phase, Stm32Loader, Stm32MapError};

use crate::common::FirmwareBuilder;

#[test]
fn truncated_vector_table_skips_missing_slots() {
    let data = FirmwareBuilder::new().full_vector_table().truncate(0x40).build();
    let (report, model) = Stm32Loader::default().load_bytes(&data).unwrap();
    assert!(report.is_complete());

    let readable = VECTORS.iter().filter(|v| v.offset + 4 <= 0x40).count();
    assert_eq!(report.vectors.len(), readable);
    let unreadable: Vec<_> = report.failures_of(FailureKind::UnreadableSlot).collect();
    assert_eq!(unreadable.len(), VECTORS.len() - readable);
    assert!(unreadable.iter().all(|f| f.phase == Phase::Vectors && f.skipped));

    // Registers are still labelled after the truncated table.
    assert!(model.has_label(Address::new(0x5000_0014), "OTG_FS_GINTSTS"));
}

#[test]
fn partial_last_slot_is_unreadable() {
    let data = FirmwareBuilder::new().full_vector_table().truncate(0x7).build();
    let (report, _) = Stm32Loader::default().load_bytes(&data).unwrap();
    assert!(report.stack_pointer.is_some());
    assert!(report.vectors.is_empty());
    assert_eq!(
        report.failures_of(FailureKind::UnreadableSlot).count(),
        VECTORS.len()
    );
}

#[test]
fn image_under_one_word() {
    let (report, model) = Stm32Loader::default().load_bytes(&[0xAA, 0xBB]).unwrap();
    assert!(report.is_complete());
    assert!(report.stack_pointer.is_none());
    assert_eq!(model.region_named("Main Memory").unwrap().size(), 2);
    assert_eq!(model.data_items().count(), 0);
}

#[test]
fn oversized_image_is_capped() {
    let data = vec![0u8; 0x20_0000];
    let (report, model) = Stm32Loader::default().load_bytes(&data).unwrap();
    assert_eq!(report.image.unwrap().length, 0xF_FFFF);
    assert_eq!(model.region_named("Main Memory").unwrap().size(), 0xF_FFFF);
}

#[test]
fn configured_cap_applies() {
    let mut config = LoaderConfig::default();
    config.image.max_size = 0x100;
    let data = FirmwareBuilder::new().full_vector_table().build();
    let (report, _) = Stm32Loader::new(config).unwrap().load_bytes(&data).unwrap();
    assert_eq!(report.image.as_ref().unwrap().length, 0x100);
    assert!(report.failures_of(FailureKind::UnreadableSlot).count() > 0);
}

#[test]
fn empty_image_is_an_error() {
    let err = Stm32Loader::default().load_bytes(&[]).unwrap_err();
    assert!(matches!(err, Stm32MapError::EmptyImage));
}
