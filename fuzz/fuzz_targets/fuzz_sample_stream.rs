#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use wavewrite::{WavHeader, WaveFileWriter};

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let bits = if selector & 1 == 0 { 16 } else { 24 };
    let channels = u16::from(selector >> 6) + 1;

    let mut writer = WaveFileWriter::new(Cursor::new(Vec::new()));
    writer.configure(44100, channels, bits).unwrap();
    let samples: Vec<f32> = rest
        .chunks_exact(4)
        .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();
    writer.write_buffer(&samples).unwrap();
    let bytes = writer.close().unwrap().into_inner();

    let header = WavHeader::parse(&bytes).unwrap();
    assert!(header.is_consistent(bytes.len() as u64));
});
