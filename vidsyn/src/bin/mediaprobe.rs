use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use vidsyn::probe_media;

#[derive(Parser, Debug)]
#[command(name = "mediaprobe")]
#[command(about = "Report the video stream properties of a media or image file")]
struct Args {
    /// Media or image file to inspect
    input: PathBuf,

    /// Decode the whole stream and report the frame count
    #[arg(short, long)]
    count: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let summary = probe_media(&args.input, args.count)
        .with_context(|| format!("probing {}", args.input.display()))?;

    println!("{}", args.input.display());
    println!("  stream index: {}", summary.stream_index);
    println!("  resolution:   {}x{}", summary.width, summary.height);
    println!("  pixel format: {:?}", summary.pixel_format);
    println!("  time base:    {}", summary.time_base);
    if let Some(frames) = summary.frames {
        println!("  frames:       {frames}");
    }
    Ok(())
}
