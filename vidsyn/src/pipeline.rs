/*!
    The pipeline drivers.

    Every function here is a fixed sequence over the media crate family:
    open, derive the encoder configuration, scale, stamp, encode, finalize.
    Inputs, output path, and settings are explicit parameters; failures are
    returned, never fatal to the process.
*/

use std::path::Path;

use media_decode::VideoDecoder;
use media_encode::VideoEncoder;
use media_transform::{ScalerConfig, VideoScaler};
use media_types::{Error, PixelFormat, Pts, Rational, Result, VideoFrame};

use crate::config::ClipSettings;
use crate::overlay;
use crate::pattern;

/**
    Outcome of a finished pipeline run.
*/
#[derive(Clone, Copy, Debug)]
pub struct EncodeReport {
    /// Frames the encoder accepted.
    pub frames: u64,
    /// Compressed packets written to the output.
    pub packets: u64,
}

/**
    Properties of a media file's video stream, as reported by a decode
    session.
*/
#[derive(Clone, Copy, Debug)]
pub struct MediaSummary {
    pub width: u32,
    pub height: u32,
    pub pixel_format: PixelFormat,
    pub time_base: Rational,
    pub stream_index: usize,
    /// Decoded frame count, if counting was requested.
    pub frames: Option<u64>,
}

/**
    Encode a single still image as a fixed-duration clip at the image's
    own resolution.
*/
pub fn image_to_video(
    image: &Path,
    output: &Path,
    settings: &ClipSettings,
    seconds: u32,
) -> Result<EncodeReport> {
    let mut decoder = VideoDecoder::open(image)?;
    let (width, height) = (decoder.width(), decoder.height());

    let mut encoder = VideoEncoder::create(output, settings.encoder_config(width, height))?;
    let mut scaler = VideoScaler::new(ScalerConfig::to_yuv420p(width, height));

    let frame = pull_still(&mut decoder, image)?;
    let mut scaled = scaler.scale(&frame)?;

    for i in 0..settings.frames_for(seconds) {
        scaled.pts = Some(Pts(i as i64));
        encoder.encode(&scaled)?;
    }
    finish(encoder, output)
}

/**
    Encode two still images back to back, each held for a fixed number of
    seconds, at a fixed output resolution.
*/
pub fn image_pair_to_video(
    first: &Path,
    second: &Path,
    output: &Path,
    settings: &ClipSettings,
    seconds_per_image: u32,
    size: (u32, u32),
) -> Result<EncodeReport> {
    let (width, height) = size;
    let mut encoder = VideoEncoder::create(output, settings.encoder_config(width, height))?;

    let pts = append_still(first, &mut encoder, settings, seconds_per_image, Pts(0))?;
    append_still(second, &mut encoder, settings, seconds_per_image, pts)?;
    finish(encoder, output)
}

/**
    Encode a still image for a fixed duration, then every frame of a
    video, concatenated under one timestamp sequence.
*/
pub fn image_then_video(
    image: &Path,
    video: &Path,
    output: &Path,
    settings: &ClipSettings,
    image_seconds: u32,
    size: (u32, u32),
) -> Result<EncodeReport> {
    let (width, height) = size;
    let mut encoder = VideoEncoder::create(output, settings.encoder_config(width, height))?;

    let pts = append_still(image, &mut encoder, settings, image_seconds, Pts(0))?;
    append_video(video, &mut encoder, pts)?;
    finish(encoder, output)
}

/**
    Re-encode a video with a still image composited into the top-left
    quadrant of every frame, at the video's own resolution.
*/
pub fn image_over_video(
    image: &Path,
    video: &Path,
    output: &Path,
    settings: &ClipSettings,
) -> Result<EncodeReport> {
    let mut decoder = VideoDecoder::open(video)?;
    let (width, height) = (decoder.width(), decoder.height());

    let still = load_scaled_still(image, width / 2, height / 2)?;

    let mut encoder = VideoEncoder::create(output, settings.encoder_config(width, height))?;
    let mut rgb_scaler = VideoScaler::new(ScalerConfig::to_rgb24(width, height));
    let mut yuv_scaler = VideoScaler::new(ScalerConfig::to_yuv420p(width, height));

    let mut pts = Pts(0);
    while let Some(frame) = decoder.next_frame()? {
        let mut rgb = rgb_scaler.scale(&frame)?;
        overlay::blit_top_left(&mut rgb, &still)?;
        let mut yuv = yuv_scaler.scale(&rgb)?;
        yuv.pts = Some(pts);
        encoder.encode(&yuv)?;
        pts = pts.next();
    }
    finish(encoder, output)
}

/**
    Encode a fixed duration of the synthetic gradient test pattern.
    Needs no input media.
*/
pub fn synthetic_video(
    output: &Path,
    settings: &ClipSettings,
    size: (u32, u32),
    seconds: u32,
) -> Result<EncodeReport> {
    let (width, height) = size;
    let mut encoder = VideoEncoder::create(output, settings.encoder_config(width, height))?;
    let time_base = Rational::per_second(settings.fps);

    for i in 0..settings.frames_for(seconds) {
        let mut frame = pattern::gradient_frame(width, height, i as u32, time_base);
        frame.pts = Some(Pts(i as i64));
        encoder.encode(&frame)?;
    }
    finish(encoder, output)
}

/**
    Open a media file and report its video stream properties, optionally
    decoding it end to end to count frames.
*/
pub fn probe_media(path: &Path, count_frames: bool) -> Result<MediaSummary> {
    let mut decoder = VideoDecoder::open(path)?;
    let mut summary = MediaSummary {
        width: decoder.width(),
        height: decoder.height(),
        pixel_format: decoder.pixel_format(),
        time_base: decoder.time_base(),
        stream_index: decoder.stream_index(),
        frames: None,
    };

    if count_frames {
        let mut frames = 0u64;
        while decoder.next_frame()?.is_some() {
            frames += 1;
        }
        summary.frames = Some(frames);
    }
    Ok(summary)
}

/**
    Pull the single frame a still image is expected to hold.
*/
fn pull_still(decoder: &mut VideoDecoder, path: &Path) -> Result<VideoFrame> {
    decoder
        .next_frame()?
        .ok_or_else(|| Error::decode(format!("no frame decoded from {}", path.display())))
}

/**
    Decode a still, scale it to the given RGB24 geometry.
*/
fn load_scaled_still(path: &Path, width: u32, height: u32) -> Result<VideoFrame> {
    let mut decoder = VideoDecoder::open(path)?;
    let frame = pull_still(&mut decoder, path)?;
    VideoScaler::new(ScalerConfig::to_rgb24(width, height)).scale(&frame)
}

/**
    Decode a still and feed it to the encoder for `seconds` worth of
    frames, starting at `pts`. Returns the timestamp after the last
    encoded frame.
*/
fn append_still(
    path: &Path,
    encoder: &mut VideoEncoder,
    settings: &ClipSettings,
    seconds: u32,
    mut pts: Pts,
) -> Result<Pts> {
    let config = *encoder.config();
    let mut decoder = VideoDecoder::open(path)?;
    let mut scaler = VideoScaler::new(ScalerConfig::to_yuv420p(config.width, config.height));

    let frame = pull_still(&mut decoder, path)?;
    let mut scaled = scaler.scale(&frame)?;

    for _ in 0..settings.frames_for(seconds) {
        scaled.pts = Some(pts);
        encoder.encode(&scaled)?;
        pts = pts.next();
    }
    Ok(pts)
}

/**
    Decode a whole video and feed every frame to the encoder, starting at
    `pts`. Returns the timestamp after the last encoded frame.
*/
fn append_video(path: &Path, encoder: &mut VideoEncoder, mut pts: Pts) -> Result<Pts> {
    let config = *encoder.config();
    let mut decoder = VideoDecoder::open(path)?;
    let mut scaler = VideoScaler::new(ScalerConfig::to_yuv420p(config.width, config.height));

    while let Some(frame) = decoder.next_frame()? {
        let mut scaled = scaler.scale(&frame)?;
        scaled.pts = Some(pts);
        encoder.encode(&scaled)?;
        pts = pts.next();
    }
    Ok(pts)
}

fn finish(mut encoder: VideoEncoder, output: &Path) -> Result<EncodeReport> {
    encoder.finish()?;
    let report = EncodeReport {
        frames: encoder.frames_encoded(),
        packets: encoder.packets_written(),
    };
    log::info!(
        "wrote {}: {} frames, {} packets",
        output.display(),
        report.frames,
        report.packets
    );
    Ok(report)
}
