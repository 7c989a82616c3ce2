use std::io::Write;

use stm32map::core::Address;
use stm32map::{Stm32Loader, Stm32MapError};

use crate::common::full_image;

#[test]
fn load_from_file_matches_in_memory_load() {
    let data = full_image();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&data).unwrap();
    file.flush().unwrap();

    let loader = Stm32Loader::default();
    let (from_file, file_model) = loader.load_path(file.path()).unwrap();
    let (from_bytes, byte_model) = loader.load_bytes(&data).unwrap();
    assert_eq!(from_file, from_bytes);
    assert_eq!(file_model, byte_model);
    assert_eq!(
        file_model.region_bytes("Main Memory").unwrap(),
        data.as_slice()
    );
    assert!(file_model.has_label(Address::new(0x2001_FFF0), "_STACK_BEGIN"));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Stm32Loader::default()
        .load_path(dir.path().join("absent.bin"))
        .unwrap_err();
    assert!(matches!(err, Stm32MapError::Io(_)));
}
