#![no_main]
use kwlog::decoder::{MAX_FIELD_LEN, MAX_UNIT_LEN, decode_units, decode_values};
use kwlog::transport::{MeasurementBlock, Response};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // First byte is the block title, the rest the payload
    if let Some((&title, payload)) = data.split_first() {
        let _ = Response::from_block(title, payload);
    }

    for chunk in data.chunks_exact(12) {
        let Ok(block) = MeasurementBlock::try_from(chunk) else {
            continue;
        };
        let values = decode_values(&block);
        let units = decode_units(&block);
        assert_eq!(values.matches(';').count(), 4);
        assert_eq!(units.matches(';').count(), 4);
        assert!(values.len() <= 4 * (MAX_FIELD_LEN + 1));
        assert!(units.len() <= 4 * (MAX_UNIT_LEN + 1));
        assert!(values.is_ascii());
    }
});
