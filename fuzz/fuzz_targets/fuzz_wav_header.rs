#![no_main]

use libfuzzer_sys::fuzz_target;
use wavewrite::{extract_pcm_data, WavHeader};

fuzz_target!(|data: &[u8]| {
    if let Ok(header) = WavHeader::parse(data) {
        let _ = header.is_consistent(data.len() as u64);
        let _ = header.duration_seconds();
    }
    let _ = extract_pcm_data(data);
});
