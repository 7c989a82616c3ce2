use stm32map::catalog::stm32f2::{USB_OTG_FS_BASE, USB_OTG_HS_BASE};
use stm32map::core::{Address, LabelSource};
use stm32map::{LabelPolicy, LoaderConfig, Stm32Loader};

use crate::common::{full_image, FirmwareBuilder};

#[test]
fn fs_register_at_documented_address() {
    let (_, model) = Stm32Loader::default().load_bytes(&full_image()).unwrap();
    let labels = model.labels_at(Address::new(0x5000_0014));
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].name, "OTG_FS_GINTSTS");
    assert_eq!(labels[0].source, LabelSource::Register);
}

#[test]
fn hs_table_quirks_do_not_fail_the_load() {
    let (report, model) = Stm32Loader::default().load_bytes(&full_image()).unwrap();
    assert!(report.is_complete());
    let hs = Address::new(USB_OTG_HS_BASE);
    assert!(model.has_label(hs.checked_add(0x900).unwrap(), "OTG_HS_DIEPCTL0"));
    assert!(model.has_label(hs.checked_add(0x930).unwrap(), "OTG_HS_DIEPTSIZ1"));
    assert!(model.has_label(hs.checked_add(0x950).unwrap(), "OTG_HS_DIEPTSIZ1"));
    assert_eq!(model.labels_at(hs.checked_add(0x900).unwrap()).len(), 1);
    assert!(report
        .skipped()
        .all(|f| f.item != "OTG_HS_DIEPCTL0" && f.item != "OTG_HS_DIEPTSIZ1"));
}

#[test]
fn register_label_takes_primary_over_region_label() {
    let (_, model) = Stm32Loader::default().load_bytes(&full_image()).unwrap();
    let base = Address::new(USB_OTG_FS_BASE);
    assert!(model.has_label(base, "USB_OTG_FS"));
    assert_eq!(model.primary_label(base).unwrap().name, "OTG_FS_GOTGCTL");
}

#[test]
fn banks_are_labelled_high_speed_first() {
    let (report, _) = Stm32Loader::default().load_bytes(&full_image()).unwrap();
    let first = report.register_labels.first().unwrap();
    let last = report.register_labels.last().unwrap();
    assert!(first.name.starts_with("OTG_HS_"));
    assert!(last.name.starts_with("OTG_FS_"));
}

#[test]
fn reported_register_labels_match_the_model() {
    let data = FirmwareBuilder::new().stack_pointer(0x2000_1000).word(0x4, 0x0800_0201).build();
    for policy in [LabelPolicy::Coexist, LabelPolicy::Replace] {
        let mut config = LoaderConfig::default();
        config.labels.policy = policy;
        let (report, model) = Stm32Loader::new(config).unwrap().load_bytes(&data).unwrap();
        let in_model = model
            .labels()
            .filter(|l| l.source == LabelSource::Register)
            .count();
        assert_eq!(report.register_labels.len(), in_model, "{:?}", policy);
        assert!(report
            .register_labels
            .iter()
            .all(|l| model.has_label(l.address, &l.name)));
    }
}
