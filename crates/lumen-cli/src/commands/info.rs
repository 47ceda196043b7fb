use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use lumen_core::filters::luma;
use lumen_core::io::image_io::load_image;

#[derive(Args)]
pub struct InfoArgs {
    /// Input image file
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let buffer = load_image(&args.file)?;
    let file_size = std::fs::metadata(&args.file)?.len();

    let mut luma_sum = 0.0f64;
    let mut translucent = 0usize;
    for px in buffer.samples().chunks_exact(4) {
        luma_sum += luma(px[0], px[1], px[2]) as f64;
        if px[3] < 255 {
            translucent += 1;
        }
    }
    let pixels = buffer.pixel_count();

    println!("File:        {}", args.file.display());
    let format = args
        .file
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_uppercase())
        .unwrap_or_else(|| "unknown".to_string());
    println!("Format:      {}", format);
    println!("Dimensions:  {}x{}", buffer.width(), buffer.height());
    println!("Pixels:      {}", pixels);
    println!("Mean luma:   {:.1}", luma_sum / pixels as f64);
    println!(
        "Alpha:       {}",
        if translucent == 0 {
            "opaque".to_string()
        } else {
            format!("{translucent} translucent pixel(s)")
        }
    );
    println!("File size:   {:.1} KB", file_size as f64 / 1024.0);

    Ok(())
}
