#![no_main]

use libfuzzer_sys::fuzz_target;
use scaleset_dataset::{plan_rows, DatasetConfig};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(config) = DatasetConfig::from_json(text) {
        // Cap the enumeration so huge inputs stay fast.
        if config.roots.len() * config.modes.len() <= 256 {
            let _ = plan_rows(&config);
        }
    }
});
