use stm32map::core::{Address, LabelSource, Reference};
use stm32map::model::LabelOutcome;
use stm32map::{FailureKind, LabelPolicy, LoaderConfig, MemoryModel, ProgramModel, Stm32Loader};

use crate::common::{handler_for, FirmwareBuilder, STACK_TOP};

#[test]
fn reset_handler_gets_label_and_reference() {
    let data = FirmwareBuilder::new()
        .stack_pointer(0x2000_1000)
        .word(0x4, 0x0800_0201)
        .pad_to(0x200)
        .build();
    let (report, model) = Stm32Loader::default().load_bytes(&data).unwrap();

    let reset = report.vectors.iter().find(|v| v.name == "RESET").unwrap();
    assert!(reset.valid);
    assert_eq!(reset.slot, Address::new(0x0800_0004));
    assert_eq!(reset.target, Address::new(0x0800_0201));

    let label = model.primary_label(Address::new(0x0800_0201)).unwrap();
    assert_eq!(label.name, "RESET");
    assert_eq!(label.source, LabelSource::Vector);
    assert!(model
        .references()
        .any(|r| *r == Reference::data(Address::new(0x0800_0004), Address::new(0x0800_0201))));
    assert!(model.data_at(Address::new(0x0800_0004)).is_some());
    assert!(model.has_label(Address::new(0x2000_1000), "_STACK_BEGIN"));
}

#[test]
fn stack_pointer_slot_is_linked_but_not_a_vector() {
    let data = FirmwareBuilder::new().full_vector_table().build();
    let (report, model) = Stm32Loader::default().load_bytes(&data).unwrap();
    assert!(report.vectors.iter().all(|v| v.offset != 0));
    assert_eq!(
        model.references_from(Address::new(0x0800_0000)).collect::<Vec<_>>(),
        vec![&Reference::data(Address::new(0x0800_0000), Address::new(STACK_TOP))]
    );
}

#[test]
fn every_slot_becomes_a_dword() {
    let data = FirmwareBuilder::new().full_vector_table().build();
    let (report, model) = Stm32Loader::default().load_bytes(&data).unwrap();
    for vector in report.vectors.iter().filter(|v| v.valid) {
        assert!(model.data_at(vector.slot).is_some(), "{} slot not typed", vector.name);
        assert_eq!(vector.target, Address::new(handler_for(vector.offset)));
        assert!(model.has_label(vector.target, &vector.name));
    }
    // stack plus 90 nameable vectors
    assert_eq!(model.data_items().count(), 91);
    assert_eq!(model.references().count(), 91);
}

#[test]
fn debug_monitor_is_reported_and_left_out() {
    let data = FirmwareBuilder::new().full_vector_table().build();
    let (report, model) = Stm32Loader::default().load_bytes(&data).unwrap();
    let entry = report.vectors.iter().find(|v| v.name == "Debug Monitor").unwrap();
    assert!(!entry.valid);
    assert!(model.data_at(Address::new(0x0800_0030)).is_none());
    assert!(model.labels_at(entry.target).is_empty());
    assert_eq!(report.failures_of(FailureKind::InvalidVectorTarget).count(), 1);
}

#[test]
fn shared_handler_keeps_both_names() {
    let data = FirmwareBuilder::new()
        .stack_pointer(STACK_TOP)
        .word(0x8, 0x0800_0401)
        .word(0xC, 0x0800_0401)
        .build();
    let (report, model) = Stm32Loader::default().load_bytes(&data).unwrap();
    let handler = Address::new(0x0800_0401);
    assert!(model.has_label(handler, "NMI"));
    assert!(model.has_label(handler, "HardFault"));
    assert_eq!(model.primary_label(handler).unwrap().name, "HardFault");
    assert_eq!(model.references_to(handler).count(), 2);
    assert!(report
        .failures_of(FailureKind::DuplicateLabel)
        .any(|f| f.item == "HardFault" && !f.skipped));
}

#[test]
fn replace_policy_keeps_only_latest_name() {
    let data = FirmwareBuilder::new()
        .stack_pointer(STACK_TOP)
        .word(0x8, 0x0800_0401)
        .word(0xC, 0x0800_0401)
        .build();
    let mut config = LoaderConfig::default();
    config.labels.policy = LabelPolicy::Replace;
    let (_, model) = Stm32Loader::new(config).unwrap().load_bytes(&data).unwrap();
    let labels = model.labels_at(Address::new(0x0800_0401));
    assert_eq!(labels.len(), 1);
    assert_eq!(labels[0].name, "HardFault");
}

#[test]
fn handler_outside_any_region_still_labelled() {
    let data = FirmwareBuilder::new()
        .stack_pointer(STACK_TOP)
        .word(0x4, 0xDEAD_BEEF)
        .build();
    let (report, model) = Stm32Loader::default().load_bytes(&data).unwrap();
    assert!(report.vectors[0].valid);
    assert!(model.has_label(Address::new(0xDEAD_BEEF), "RESET"));
}

#[test]
fn custom_stack_label() {
    let data = FirmwareBuilder::new().stack_pointer(STACK_TOP).build();
    let mut config = LoaderConfig::default();
    config.labels.stack_label = "_estack".to_string();
    let (report, model) = Stm32Loader::new(config).unwrap().load_bytes(&data).unwrap();
    assert_eq!(report.stack_pointer.unwrap().name, "_estack");
    assert!(model.has_label(Address::new(STACK_TOP), "_estack"));
}

#[test]
fn loader_writes_into_caller_model() {
    let mut model = ProgramModel::default();
    let outcome = model
        .create_label(Address::new(0x0800_0201), "entry", LabelSource::Vector, true)
        .unwrap();
    assert_eq!(outcome, LabelOutcome::Created);

    let data = FirmwareBuilder::new()
        .stack_pointer(STACK_TOP)
        .word(0x4, 0x0800_0201)
        .build();
    let report = Stm32Loader::default().load(data.as_slice(), &mut model).unwrap();
    assert!(model.has_label(Address::new(0x0800_0201), "entry"));
    assert!(model.has_label(Address::new(0x0800_0201), "RESET"));
    assert!(report
        .failures_of(FailureKind::DuplicateLabel)
        .any(|f| f.item == "RESET"));
}
