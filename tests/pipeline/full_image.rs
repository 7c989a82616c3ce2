use stm32map::catalog::stm32f2::{REGIONS, VECTORS};
use stm32map::core::{Address, LabelSource, Perms};
use stm32map::{FailureKind, Stm32Loader};

use crate::common::{full_image, STACK_TOP};

#[test]
fn full_image_builds_complete_model() {
    let data = full_image();
    let (report, model) = Stm32Loader::default().load_bytes(&data).unwrap();

    assert!(report.is_complete());
    assert_eq!(report.regions.len(), REGIONS.len());
    assert_eq!(model.region_count(), REGIONS.len() + 1);
    assert_eq!(report.vectors.len(), VECTORS.len());
    // OTG_HS_DIEPCTL0 appears twice at the same offset.
    assert_eq!(report.register_labels.len(), 50 + 78);

    let flash = model.region_named("Main Memory").unwrap();
    assert_eq!(flash.base(), Address::new(0x0800_0000));
    assert_eq!(flash.size(), data.len() as u64);
    assert!(flash.initialized);
    assert_eq!(flash.perms, Perms::READ | Perms::EXECUTE);

    let summary = report.image.as_ref().unwrap();
    assert_eq!(summary.length, 0x400);
    assert_eq!(summary.sha256.len(), 64);

    let sp = report.stack_pointer.as_ref().unwrap();
    assert_eq!(sp.target, Address::new(STACK_TOP));
    assert_eq!(
        model.primary_label(Address::new(STACK_TOP)).unwrap().source,
        LabelSource::StackPointer
    );
}

#[test]
fn only_expected_failures_on_full_image() {
    let (report, _) = Stm32Loader::default().load_bytes(&full_image()).unwrap();

    // Vector name with a space cannot become a label.
    let invalid: Vec<_> = report.failures_of(FailureKind::InvalidVectorTarget).collect();
    assert_eq!(invalid.len(), 1);
    assert_eq!(invalid[0].item, "Debug Monitor");
    assert!(invalid[0].skipped);

    // Bank base registers meet the region labels, and one HS offset repeats.
    let notes: Vec<_> = report.failures_of(FailureKind::DuplicateLabel).collect();
    let addresses: Vec<_> = notes.iter().filter_map(|f| f.address).collect();
    assert_eq!(
        addresses,
        vec![
            Address::new(0x4004_0000),
            Address::new(0x4004_0900),
            Address::new(0x5000_0000)
        ]
    );
    assert!(notes.iter().all(|f| !f.skipped));
    assert_eq!(report.failures.len(), 4);
}

#[test]
fn every_region_has_its_sanitized_label() {
    let (_, model) = Stm32Loader::default().load_bytes(&full_image()).unwrap();
    for spec in REGIONS {
        let base = Address::new(spec.base);
        let region = model.region_named(spec.name).unwrap();
        assert_eq!(region.size(), u64::from(spec.size));
        assert_eq!(region.perms, spec.perms());
        assert!(!region.initialized);
        assert!(
            model.has_label(base, &spec.name.replace(' ', "_")),
            "missing label for {}",
            spec.name
        );
    }
    assert!(model.has_label(Address::new(0x4002_3C00), "Flash_Interface_Register"));
}

#[test]
fn total_label_count() {
    let (_, model) = Stm32Loader::default().load_bytes(&full_image()).unwrap();
    // 64 regions, the stack, 90 nameable vectors, 50 FS and 78 distinct HS registers.
    assert_eq!(model.label_count(), 64 + 1 + 90 + 50 + 78);
}
