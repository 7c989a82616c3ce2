use stm32map::{LoadReport, ModelSnapshot, Stm32Loader};

use crate::common::{full_image, FirmwareBuilder};

#[test]
fn repeated_loads_are_identical() {
    let data = full_image();
    let loader = Stm32Loader::default();
    let (report_a, model_a) = loader.load_bytes(&data).unwrap();
    let (report_b, model_b) = loader.load_bytes(&data).unwrap();
    assert_eq!(report_a, report_b);
    assert_eq!(model_a, model_b);
    assert_eq!(
        model_a.snapshot().to_json().unwrap(),
        model_b.snapshot().to_json().unwrap()
    );
}

#[test]
fn report_json_roundtrip() {
    let data = FirmwareBuilder::new().full_vector_table().truncate(0x20).build();
    let (report, _) = Stm32Loader::default().load_bytes(&data).unwrap();
    let json = report.to_json().unwrap();
    let parsed: LoadReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report);
    assert!(json.contains("\"UnreadableSlot\""));
}

#[test]
fn snapshot_bincode_roundtrip() {
    let (_, model) = Stm32Loader::default().load_bytes(&full_image()).unwrap();
    let snapshot = model.snapshot();
    let bytes = snapshot.to_bincode().unwrap();
    assert_eq!(ModelSnapshot::from_bincode(&bytes).unwrap(), snapshot);
}
