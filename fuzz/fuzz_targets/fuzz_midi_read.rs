#![no_main]

use libfuzzer_sys::fuzz_target;
use scaleset_backend_midi::read_note_spans;

fuzz_target!(|data: &[u8]| {
    if let Ok(spans) = read_note_spans(data) {
        for span in spans {
            assert!(span.end_seconds >= span.start_seconds);
        }
    }
});
