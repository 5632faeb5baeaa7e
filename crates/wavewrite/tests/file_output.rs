//! End-to-end tests writing real files and reading them back with an
//! independent decoder.

use std::fs;

use pretty_assertions::assert_eq;
use tempfile::tempdir;
use wavewrite::{compute_pcm_hash, WavError, WavFormat, WavHeader, WaveFileWriter};

fn sine(frames: usize, channels: usize, freq: f32, rate: f32) -> Vec<f32> {
    (0..frames)
        .flat_map(|i| {
            let v = 0.8 * (2.0 * std::f32::consts::PI * freq * i as f32 / rate).sin();
            std::iter::repeat(v).take(channels)
        })
        .collect()
}

#[test]
fn stereo_16_bit_file_matches_spec_scenario() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stereo.wav");

    let mut writer = WaveFileWriter::create(&path).unwrap();
    writer.configure(44100, 2, 16).unwrap();
    writer.write_buffer(&sine(50, 2, 440.0, 44100.0)).unwrap();
    writer.close().unwrap();

    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes.len(), 244);
    assert_eq!(&bytes[4..8], &236u32.to_le_bytes());
    assert_eq!(&bytes[40..44], &200u32.to_le_bytes());
}

#[test]
fn hound_decodes_16_bit_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("mono16.wav");
    let samples = [0.0f32, 1.0, -1.0, 0.5, -0.5, 2.0, -2.0];

    let mut writer = WaveFileWriter::create(&path).unwrap();
    writer.write_buffer(&samples).unwrap();
    writer.close().unwrap();

    let mut reader = hound::WavReader::open(&path).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);

    let decoded: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(decoded, vec![0, 32767, -32767, 16384, -16383, 32767, -32768]);
}

#[test]
fn hound_decodes_24_bit_stereo_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("stereo24.wav");
    let samples = sine(256, 2, 1000.0, 48000.0);

    let mut writer = WaveFileWriter::create(&path).unwrap();
    writer.configure(48000, 2, 24).unwrap();
    writer.write_buffer(&samples).unwrap();
    writer.close().unwrap();

    let mut reader = hound::WavReader::open(&path).unwrap();
    assert_eq!(reader.spec().bits_per_sample, 24);
    assert_eq!(reader.spec().channels, 2);
    assert_eq!(reader.duration(), 256);

    let decoded: Vec<i32> = reader.samples::<i32>().map(|s| s.unwrap()).collect();
    assert_eq!(decoded.len(), samples.len());
    for (&value, &pcm) in samples.iter().zip(&decoded) {
        let expected = f64::from(value) * 8_388_607.0;
        assert!(
            (expected - f64::from(pcm)).abs() <= 1.0,
            "{} encoded as {}",
            value,
            pcm
        );
    }
}

#[test]
fn header_reports_consistent_sizes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("tone.wav");

    let format = WavFormat::new(22050, 1, 24).unwrap();
    let file = fs::File::create(&path).unwrap();
    let mut writer = WaveFileWriter::with_format(file, format).unwrap();
    writer.write_samples(&sine(1000, 1, 220.0, 22050.0), 100, 500).unwrap();
    writer.close().unwrap();

    let bytes = fs::read(&path).unwrap();
    let header = WavHeader::parse(&bytes).unwrap();
    assert_eq!(header.format, format);
    assert_eq!(header.data_size, 1500);
    assert_eq!(header.frame_count(), 500);
    assert!(header.is_finalized());
    assert!(header.is_consistent(bytes.len() as u64));
}

#[test]
fn unclosed_file_keeps_placeholder_sizes() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("abandoned.wav");

    let mut writer = WaveFileWriter::create(&path).unwrap();
    writer.write_buffer(&[0.25; 10]).unwrap();
    drop(writer);

    let bytes = fs::read(&path).unwrap();
    let header = WavHeader::parse(&bytes).unwrap();
    assert!(!header.is_finalized());
    assert!(compute_pcm_hash(&bytes).is_none());
}

#[test]
fn identical_audio_hashes_identically_across_rates() {
    let dir = tempdir().unwrap();
    let samples = sine(64, 1, 100.0, 8000.0);
    let mut hashes = Vec::new();

    for rate in [8000, 16000] {
        let path = dir.path().join(format!("{}.wav", rate));
        let mut writer = WaveFileWriter::create(&path).unwrap();
        writer.set_frame_rate(rate).unwrap();
        writer.write_buffer(&samples).unwrap();
        writer.close().unwrap();
        hashes.push(compute_pcm_hash(&fs::read(&path).unwrap()).unwrap());
    }

    assert_eq!(hashes[0], hashes[1]);
}

#[test]
fn create_in_missing_directory_is_io_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing").join("out.wav");
    let err = WaveFileWriter::create(&path).unwrap_err();
    assert!(matches!(err, WavError::Io(_)));
}
