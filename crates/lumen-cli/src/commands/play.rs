use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use lumen_core::io::image_io::{frame_paths, load_image};
use lumen_core::pipeline::{Session, TickOutcome};
use lumen_core::source::FrameSequence;
use tracing::{debug, info};

use super::{ChainArgs, ConsoleObserver};
use crate::summary::print_chain_summary;

#[derive(Args)]
pub struct PlayArgs {
    /// Directory of frames, played in file-name order
    pub dir: PathBuf,

    #[command(flatten)]
    pub chain: ChainArgs,

    /// Restart from the first frame after the last one
    #[arg(long = "loop")]
    pub looping: bool,

    /// Stop after this many processed frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Tick interval in milliseconds (overrides the config)
    #[arg(long)]
    pub interval: Option<u64>,

    /// Output directory for processed frames
    #[arg(short, long, default_value = "frames_out")]
    pub output: PathBuf,
}

pub fn run(args: &PlayArgs) -> Result<()> {
    let mut config = args.chain.build_config()?;
    if let Some(ms) = args.interval {
        config.playback.frame_interval_ms = ms;
    }
    config.playback.loop_frames |= args.looping;
    if config.playback.loop_frames && args.frames.is_none() {
        bail!("--loop needs --frames to know when to stop");
    }

    let paths = frame_paths(&args.dir)
        .with_context(|| format!("Failed to list frames in {}", args.dir.display()))?;
    if paths.is_empty() {
        bail!("No image files in {}", args.dir.display());
    }
    let frames = paths
        .iter()
        .map(|p| load_image(p).with_context(|| format!("Failed to load {}", p.display())))
        .collect::<Result<Vec<_>>>()?;
    info!(frames = frames.len(), "Frames loaded");

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    let mut session = Session::new(&config)?.with_observer(Arc::new(ConsoleObserver::default()));
    print_chain_summary(&config, session.chain(), &args.dir, &args.output);

    let name = args.dir.display().to_string();
    let total = args.frames.unwrap_or(frames.len() as u64);
    session.bind_live(Box::new(FrameSequence::new(
        name,
        frames,
        config.playback.loop_frames,
    )));
    session.start_playback()?;
    let interval = Duration::from_millis(config.playback.frame_interval_ms);
    let ext = config.snapshot.format.extension();

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg:12} [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );
    pb.set_message("Playing");

    let mut written = 0u64;
    while written < total {
        let report = session.tick();
        debug!(outcome = ?report.outcome, ended = report.ended, "Tick");

        if report.outcome == TickOutcome::Processed {
            if let Some(snapshot) = session.export() {
                let path = args.output.join(format!("frame_{written:05}.{ext}"));
                snapshot
                    .save(&path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                written += 1;
                pb.inc(1);
            }
        }

        if !report.reschedule || written >= total {
            break;
        }
        std::thread::sleep(interval);
    }
    session.stop_playback();

    pb.finish_with_message("Done");
    let stats = session.scheduler_stats();
    println!(
        "\n{} frame(s) written to {} ({} dropped, {} failed)",
        written,
        args.output.display(),
        stats.dropped,
        stats.failed
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::buffer::PixelBuffer;
    use lumen_core::io::image_io::save_image;
    use std::path::Path;

    fn write_frames(dir: &Path, n: u8) {
        for i in 0..n {
            let v = i * 40;
            let frame = PixelBuffer::from_fn(2, 2, |_, _| [v, v, v, 255]).unwrap();
            save_image(&frame, &dir.join(format!("in_{i:02}.png"))).unwrap();
        }
    }

    fn play_args(dir: &Path, output: PathBuf, frames: Option<u64>) -> PlayArgs {
        PlayArgs {
            dir: dir.to_path_buf(),
            chain: ChainArgs {
                config: None,
                filters: vec!["brightness:level=1.0".into()],
                seed: Some(1),
                max_filters: None,
            },
            looping: false,
            frames,
            interval: Some(0),
            output,
        }
    }

    fn written(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[test]
    fn test_play_writes_one_file_per_frame() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_frames(input.path(), 3);
        run(&play_args(input.path(), output.path().join("out"), None)).unwrap();
        assert_eq!(written(&output.path().join("out")), 3);
    }

    #[test]
    fn test_play_stops_at_frame_limit() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_frames(input.path(), 3);
        run(&play_args(input.path(), output.path().join("out"), Some(2))).unwrap();
        assert_eq!(written(&output.path().join("out")), 2);
    }

    #[test]
    fn test_play_zero_frames_writes_nothing() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        write_frames(input.path(), 3);
        run(&play_args(input.path(), output.path().join("out"), Some(0))).unwrap();
        assert_eq!(written(&output.path().join("out")), 0);
    }
}
