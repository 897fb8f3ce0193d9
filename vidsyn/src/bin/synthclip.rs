use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use vidsyn::{ClipSettings, synthetic_video};

#[derive(Parser, Debug)]
#[command(name = "synthclip")]
#[command(about = "Encode a synthetic gradient test pattern as an MPEG-1 clip")]
struct Args {
    /// Output elementary stream
    #[arg(short, long, default_value = "synthclip.mpg")]
    output: PathBuf,

    /// Clip duration in seconds
    #[arg(short, long, default_value = "4")]
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

    let report = synthetic_video(
        &args.output,
        &settings,
        (args.width, args.height),
        args.seconds,
    )
    .with_context(|| format!("writing {}", args.output.display()))?;

    println!("{}: {} frames", args.output.display(), report.frames);
    Ok(())
}
