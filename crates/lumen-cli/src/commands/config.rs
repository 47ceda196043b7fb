use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use lumen_core::chain::FilterChain;

use super::ChainArgs;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(flatten)]
    pub chain: ChainArgs,

    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save a PipelineConfig as TOML, defaults plus any `--filter`s.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let config = args.chain.build_config()?;
    // Reject chains that would not load back.
    FilterChain::from_config(config.max_filters, &config.filters)?;
    let toml_str = toml::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
