//! Property tests for sample quantization and declared chunk sizes.

use std::io::Cursor;

use proptest::prelude::*;
use wavewrite::{pcm16_from_sample, pcm24_from_sample, WavHeader, WaveFileWriter};

proptest! {
    #[test]
    fn pcm16_within_one_lsb(value in -1.0f32..=1.0) {
        let expected = f64::from(value) * 32767.0;
        let pcm = f64::from(pcm16_from_sample(value));
        prop_assert!((expected - pcm).abs() <= 1.0);
    }

    #[test]
    fn pcm24_within_one_lsb(value in -1.0f32..=1.0) {
        let expected = f64::from(value) * 8_388_607.0;
        let pcm = f64::from(pcm24_from_sample(value));
        prop_assert!((expected - pcm).abs() <= 1.0);
    }

    #[test]
    fn pcm24_always_in_range(value in proptest::num::f32::ANY) {
        let pcm = pcm24_from_sample(value);
        prop_assert!((-(1 << 23)..(1 << 23)).contains(&pcm));
    }

    #[test]
    fn declared_sizes_match_output(
        frames in 0usize..200,
        channels in 1u16..=4,
        bits in prop_oneof![Just(16u16), Just(24u16)],
    ) {
        let mut writer = WaveFileWriter::new(Cursor::new(Vec::new()));
        writer.configure(32000, channels, bits).unwrap();
        let samples = vec![0.125f32; frames * usize::from(channels)];
        writer.write_buffer(&samples).unwrap();
        let bytes = writer.close().unwrap().into_inner();

        let header = WavHeader::parse(&bytes).unwrap();
        let sample_bytes = samples.len() as u64 * u64::from(bits / 8);
        prop_assert_eq!(u64::from(header.data_size), sample_bytes);
        prop_assert_eq!(u64::from(header.riff_size), bytes.len() as u64 - 8);
        prop_assert_eq!(header.frame_count(), frames as u64);
    }
}
