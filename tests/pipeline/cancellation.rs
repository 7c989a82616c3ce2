use std::io::{self, Read};
use std::time::Duration;

use stm32map::core::Address;
use stm32map::{CancellationToken, LoadState, Phase, ProgramModel, Stm32Loader};

use crate::common::{full_image, STACK_TOP};

#[test]
fn cancelled_token_stops_before_any_region() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let loader = Stm32Loader::default().with_cancellation(cancel);
    let (report, model) = loader.load_bytes(&full_image()).unwrap();
    assert_eq!(report.state, LoadState::Cancelled { phase: Phase::Regions });
    assert!(!report.is_complete());
    assert_eq!(model.region_count(), 0);
    assert!(report.image.is_none());
}

#[test]
fn expired_deadline_cancels() {
    let cancel = CancellationToken::with_deadline(Duration::ZERO);
    let loader = Stm32Loader::default().with_cancellation(cancel);
    let (report, _) = loader.load_bytes(&full_image()).unwrap();
    assert!(matches!(report.state, LoadState::Cancelled { .. }));
}

#[test]
fn generous_deadline_completes() {
    let cancel = CancellationToken::with_deadline(Duration::from_secs(3600));
    let loader = Stm32Loader::default().with_cancellation(cancel);
    let (report, _) = loader.load_bytes(&full_image()).unwrap();
    assert!(report.is_complete());
}

/// Reader that trips a token once the image has been consumed.
struct CancellingReader {
    inner: io::Cursor<Vec<u8>>,
    cancel: CancellationToken,
}

impl Read for CancellingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n == 0 {
            self.cancel.cancel();
        }
        Ok(n)
    }
}

#[test]
fn cancel_during_image_read_stops_before_stack_pointer() {
    let cancel = CancellationToken::new();
    let reader = CancellingReader {
        inner: io::Cursor::new(full_image()),
        cancel: cancel.clone(),
    };
    let loader = Stm32Loader::default().with_cancellation(cancel);
    let mut model = ProgramModel::default();
    let report = loader.load(reader, &mut model).unwrap();

    assert_eq!(report.state, LoadState::Cancelled { phase: Phase::Vectors });
    assert!(report.image.is_some());
    assert!(report.stack_pointer.is_none());
    assert!(report.vectors.is_empty());
    assert!(model.region_named("Main Memory").is_some());
    assert!(model.data_at(Address::new(0x0800_0000)).is_none());
    assert!(model.labels_at(Address::new(STACK_TOP)).is_empty());
}
