use anyhow::{ensure, Result};
use clap::Parser;
use log::info;
use render::VectorSource;
use std::path::PathBuf;
use types::{format_dimensions, ICON_SIZES};

/// Rasterize an SVG into a multi-resolution .ico (16 to 256 px)
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Vector source to rasterize
    #[arg(long, default_value = "public/cube-icon.svg")]
    input: PathBuf,

    /// Icon container to write
    #[arg(long, default_value = "public/favicon.ico")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let text = io::read_vector_source(&args.input)?;
    let source = VectorSource::parse(&text)?;
    info!("rasterizing {} at {:?}", args.input.display(), ICON_SIZES);
    let frames = source.rasterize_all(&ICON_SIZES)?;
    ensure!(frames.is_complete(), "missing frames: got {:?}", frames.sizes());

    io::write_icon(&args.output, &frames)?;
    println!(
        "Successfully created {} with sizes: {}",
        args.output.display(),
        format_dimensions(&frames.dimensions())
    );
    Ok(())
}
