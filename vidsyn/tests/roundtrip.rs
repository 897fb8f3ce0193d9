//! End-to-end pipeline tests over synthesized inputs.
//!
//! Every fixture is generated on the fly: clips come from this
//! workspace's own encoder, and the no-video-stream case uses a
//! hand-written WAV file. Nothing binary is checked in.

use std::fs;
use std::io::Write;
use std::path::Path;

use media_decode::VideoDecoder;
use media_encode::{SEQUENCE_END_CODE, VideoEncoder, VideoEncoderConfig};
use media_types::{Error, Pts, Rational};

use vidsyn::{
    ClipSettings, image_over_video, image_pair_to_video, image_then_video, image_to_video,
    pattern, probe_media, synthetic_video,
};

/// Encode `frames` gradient frames into a raw MPEG-1 stream at `path`.
fn make_clip(path: &Path, width: u32, height: u32, frames: u32) {
    let mut encoder =
        VideoEncoder::create(path, VideoEncoderConfig::mpeg1(width, height, 25)).unwrap();
    for i in 0..frames {
        let mut frame = pattern::gradient_frame(width, height, i, Rational::per_second(25));
        frame.pts = Some(Pts(i as i64));
        encoder.encode(&frame).unwrap();
    }
    encoder.finish().unwrap();
}

/// Write a minimal PCM WAV file: a container with one audio stream and
/// no video.
fn make_wav(path: &Path) {
    let sample_rate: u32 = 8000;
    let data: Vec<u8> = vec![0u8; (sample_rate * 2) as usize]; // 1 s of silent s16 mono

    let mut file = fs::File::create(path).unwrap();
    file.write_all(b"RIFF").unwrap();
    file.write_all(&(36 + data.len() as u32).to_le_bytes()).unwrap();
    file.write_all(b"WAVE").unwrap();
    file.write_all(b"fmt ").unwrap();
    file.write_all(&16u32.to_le_bytes()).unwrap();
    file.write_all(&1u16.to_le_bytes()).unwrap(); // PCM
    file.write_all(&1u16.to_le_bytes()).unwrap(); // mono
    file.write_all(&sample_rate.to_le_bytes()).unwrap();
    file.write_all(&(sample_rate * 2).to_le_bytes()).unwrap(); // byte rate
    file.write_all(&2u16.to_le_bytes()).unwrap(); // block align
    file.write_all(&16u16.to_le_bytes()).unwrap(); // bits per sample
    file.write_all(b"data").unwrap();
    file.write_all(&(data.len() as u32).to_le_bytes()).unwrap();
    file.write_all(&data).unwrap();
}

#[test]
fn round_trip_100_frames_at_640x480() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("synth.mpg");

    let report =
        synthetic_video(&output, &ClipSettings::default(), (640, 480), 4).unwrap();
    assert_eq!(report.frames, 100);

    let summary = probe_media(&output, true).unwrap();
    assert_eq!(summary.width, 640);
    assert_eq!(summary.height, 480);
    assert_eq!(summary.frames, Some(100));
}

#[test]
fn output_is_nonempty_and_ends_with_sequence_end_code() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("synth.mpg");

    synthetic_video(&output, &ClipSettings::default(), (160, 120), 1).unwrap();

    let bytes = fs::read(&output).unwrap();
    assert!(bytes.len() > SEQUENCE_END_CODE.len());
    assert_eq!(&bytes[bytes.len() - 4..], &SEQUENCE_END_CODE);
}

#[test]
fn single_frame_stream_decodes_once_then_exhausts() {
    let dir = tempfile::tempdir().unwrap();
    let clip = dir.path().join("one.mpg");
    make_clip(&clip, 160, 120, 1);

    let mut decoder = VideoDecoder::open(&clip).unwrap();
    let frame = decoder.next_frame().unwrap().expect("one frame");
    assert_eq!(frame.width, 160);
    assert_eq!(frame.height, 120);

    assert!(decoder.next_frame().unwrap().is_none());
    // Exhaustion is stable across repeated pulls.
    assert!(decoder.next_frame().unwrap().is_none());
}

#[test]
fn audio_only_container_fails_with_stream_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let wav = dir.path().join("tone.wav");
    make_wav(&wav);

    let err = VideoDecoder::open(&wav).unwrap_err();
    assert!(matches!(err, Error::StreamNotFound));
}

#[test]
fn pass_through_keeps_every_frame() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("source.mpg");
    make_clip(&source, 160, 120, 30);

    // Decode the source and count what a pass-through pipeline would feed
    // to an encoder.
    let mut decoder = VideoDecoder::open(&source).unwrap();
    let mut pulled = 0u64;
    while decoder.next_frame().unwrap().is_some() {
        pulled += 1;
    }
    assert_eq!(pulled, 30);
}

#[test]
fn still_image_becomes_fixed_duration_clip() {
    let dir = tempfile::tempdir().unwrap();
    let still = dir.path().join("still.mpg");
    let output = dir.path().join("clip.mpg");
    make_clip(&still, 160, 120, 1);

    let report = image_to_video(&still, &output, &ClipSettings::default(), 2).unwrap();
    assert_eq!(report.frames, 50);

    // Output resolution follows the decoded input.
    let summary = probe_media(&output, true).unwrap();
    assert_eq!(summary.width, 160);
    assert_eq!(summary.height, 120);
    assert_eq!(summary.frames, Some(50));
}

#[test]
fn overlay_pipeline_keeps_video_frame_count_and_resolution() {
    let dir = tempfile::tempdir().unwrap();
    let video = dir.path().join("video.mpg");
    let still = dir.path().join("still.mpg");
    let output = dir.path().join("overlay.mpg");

    make_clip(&video, 160, 120, 25);
    make_clip(&still, 80, 60, 1);

    let settings = ClipSettings {
        gop_size: 10,
        ..ClipSettings::default()
    };
    let report = image_over_video(&still, &video, &output, &settings).unwrap();
    assert_eq!(report.frames, 25);

    let summary = probe_media(&output, true).unwrap();
    assert_eq!(summary.width, 160);
    assert_eq!(summary.height, 120);
    assert_eq!(summary.frames, Some(25));
}

#[test]
fn image_pair_holds_each_still_for_its_duration() {
    let dir = tempfile::tempdir().unwrap();
    let first = dir.path().join("first.mpg");
    let second = dir.path().join("second.mpg");
    let output = dir.path().join("pair.mpg");

    make_clip(&first, 160, 120, 1);
    make_clip(&second, 80, 60, 1);

    let report = image_pair_to_video(
        &first,
        &second,
        &output,
        &ClipSettings::default(),
        2,
        (160, 120),
    )
    .unwrap();
    assert_eq!(report.frames, 100); // 2 stills x 2 s x 25 fps

    let summary = probe_media(&output, true).unwrap();
    assert_eq!(summary.frames, Some(100));
}

#[test]
fn image_then_video_concatenates_under_one_timeline() {
    let dir = tempfile::tempdir().unwrap();
    let still = dir.path().join("still.mpg");
    let video = dir.path().join("video.mpg");
    let output = dir.path().join("concat.mpg");

    make_clip(&still, 160, 120, 1);
    make_clip(&video, 160, 120, 25);

    let report = image_then_video(
        &still,
        &video,
        &output,
        &ClipSettings::default(),
        1,
        (160, 120),
    )
    .unwrap();
    assert_eq!(report.frames, 25 + 25);

    let summary = probe_media(&output, true).unwrap();
    assert_eq!(summary.frames, Some(50));
}
