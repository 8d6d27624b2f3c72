use anyhow::{ensure, Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;
use types::{format_dimensions, ICON_SIZES, REFERENCE_SIZE};

/// Draw the cube favicon at 16 to 256 px and pack it into a .ico
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Icon container to write
    #[arg(long, default_value = "public/favicon.ico")]
    output: PathBuf,

    /// Standalone PNG of the 128 px frame
    #[arg(long, default_value = "public/cube-favicon.png")]
    reference: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    info!("drawing cube at {:?}", ICON_SIZES);
    let frames = render::draw_all(&ICON_SIZES)?;
    ensure!(frames.is_complete(), "missing frames: got {:?}", frames.sizes());

    io::write_icon(&args.output, &frames)?;
    println!(
        "Successfully created {} with sizes: {}",
        args.output.display(),
        format_dimensions(&frames.dimensions())
    );

    let reference = frames
        .get(REFERENCE_SIZE)
        .with_context(|| format!("no {REFERENCE_SIZE}px frame to export"))?;
    io::export_png(&args.reference, reference)?;
    println!("Also created {} for reference", args.reference.display());
    Ok(())
}
