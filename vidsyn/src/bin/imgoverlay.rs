use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use vidsyn::{ClipSettings, image_over_video};

#[derive(Parser, Debug)]
#[command(name = "imgoverlay")]
#[command(about = "Re-encode a video with a still image in the top-left quadrant")]
struct Args {
    /// Image to composite onto each frame
    image: PathBuf,

    /// Input video file
    video: PathBuf,

    /// Output elementary stream
    #[arg(short, long, default_value = "imgoverlay.mpg")]
    output: PathBuf,

    /// Frames per second
    #[arg(long, default_value = "25")]
    fps: u32,

    /// Bit rate in bits per second
    #[arg(long, default_value = "200000")]
    bit_rate: usize,

    /// Group-of-pictures size
    #[arg(long, default_value = "10")]
    gop_size: u32,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = ClipSettings {
        fps: args.fps,
        bit_rate: args.bit_rate,
        gop_size: args.gop_size,
        ..ClipSettings::default()
    };

    let report = image_over_video(&args.image, &args.video, &args.output, &settings)
        .with_context(|| {
            format!(
                "overlaying {} onto {}",
                args.image.display(),
                args.video.display()
            )
        })?;

    println!("{}: {} frames", args.output.display(), report.frames);
    Ok(())
}
