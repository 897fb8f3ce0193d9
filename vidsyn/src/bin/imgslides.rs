use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use vidsyn::{ClipSettings, image_pair_to_video};

#[derive(Parser, Debug)]
#[command(name = "imgslides")]
#[command(about = "Encode two still images back to back as an MPEG-1 clip")]
struct Args {
    /// First image file
    first: PathBuf,

    /// Second image file
    second: PathBuf,

    /// Output elementary stream
    #[arg(short, long, default_value = "imgslides.mpg")]
    output: PathBuf,

    /// Seconds each image is held
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

    let report = image_pair_to_video(
        &args.first,
        &args.second,
        &args.output,
        &settings,
        args.seconds,
        (args.width, args.height),
    )
    .with_context(|| {
        format!(
            "encoding {} and {}",
            args.first.display(),
            args.second.display()
        )
    })?;

    println!("{}: {} frames", args.output.display(), report.frames);
    Ok(())
}
