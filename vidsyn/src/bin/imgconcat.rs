use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use vidsyn::{ClipSettings, image_then_video};

#[derive(Parser, Debug)]
#[command(name = "imgconcat")]
#[command(about = "Encode a still image followed by a whole video as one MPEG-1 clip")]
struct Args {
    /// Leading image file
    image: PathBuf,

    /// Video file appended after the image
    video: PathBuf,

    /// Output elementary stream
    #[arg(short, long, default_value = "imgconcat.mpg")]
    output: PathBuf,

    /// Seconds the image is held before the video starts
    #[arg(short, long, default_value = "2")]
    seconds: u32,

    /// Output width in pixels
    #[arg(long, default_value = "640")]
    width: u32,

    /// Output height in pixels
    #[arg(long, default_value = "480")]
    height: u32,

    /// Frames per second
    #[arg(long, default_value = "25")]
    fps: u32,

    /// Bit rate in bits per second
    #[arg(long, default_value = "200000")]
    bit_rate: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = ClipSettings {
        fps: args.fps,
        bit_rate: args.bit_rate,
        ..ClipSettings::default()
    };

    let report = image_then_video(
        &args.image,
        &args.video,
        &args.output,
        &settings,
        args.seconds,
        (args.width, args.height),
    )
    .with_context(|| {
        format!(
            "concatenating {} and {}",
            args.image.display(),
            args.video.display()
        )
    })?;

    println!("{}: {} frames", args.output.display(), report.frames);
    Ok(())
}
