use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use vidsyn::{ClipSettings, image_to_video};

#[derive(Parser, Debug)]
#[command(name = "img2vid")]
#[command(about = "Encode a still image as a fixed-duration MPEG-1 clip")]
struct Args {
    /// Input image file
    image: PathBuf,

    /// Output elementary stream
    #[arg(short, long, default_value = "img2vid.mpg")]
    output: PathBuf,

    /// Clip duration in seconds
    #[arg(short, long, default_value = "4")]
    seconds: u32,

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

    let report = image_to_video(&args.image, &args.output, &settings, args.seconds)
        .with_context(|| format!("encoding {}", args.image.display()))?;

    println!("{}: {} frames", args.output.display(), report.frames);
    Ok(())
}
