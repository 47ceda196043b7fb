use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use lumen_core::io::image_io::load_image;
use lumen_core::io::snapshot::SnapshotFormat;
use lumen_core::pipeline::Session;

use super::{ChainArgs, ConsoleObserver};
use crate::summary::print_chain_summary;

#[derive(Args)]
pub struct ApplyArgs {
    /// Input image file (PNG, JPEG, BMP, TIFF)
    pub file: PathBuf,

    #[command(flatten)]
    pub chain: ChainArgs,

    /// Output file path; the extension picks the format
    #[arg(short, long, default_value = "filtered.png")]
    pub output: PathBuf,
}

pub fn run(args: &ApplyArgs) -> Result<()> {
    let mut config = args.chain.build_config()?;
    config.snapshot.format = SnapshotFormat::from_path(&args.output);

    let mut session = Session::new(&config)?.with_observer(Arc::new(ConsoleObserver::default()));
    print_chain_summary(&config, session.chain(), &args.file, &args.output);

    let ticket = session.begin_load();
    let processed = session
        .complete_load(ticket, load_image(&args.file))
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    if !processed {
        bail!("{} was loaded but not processed (processor busy)", args.file.display());
    }

    let snapshot = session
        .export()
        .context("Pipeline produced no output")?;
    snapshot
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Saved {}x{} {} to {}",
        snapshot.width,
        snapshot.height,
        snapshot.format,
        args.output.display()
    );
    Ok(())
}
