pub mod apply;
pub mod config;
pub mod filters;
pub mod info;
pub mod play;

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use clap::Args;
use console::Style;
use lumen_core::catalog::{FilterKind, ParamValue};
use lumen_core::chain::InstanceId;
use lumen_core::error::LumenError;
use lumen_core::pipeline::config::{FilterConfig, PipelineConfig};
use lumen_core::pipeline::{PipelineObserver, SkippedFilter};

/// Chain options shared by `apply`, `play` and `config`.
#[derive(Args)]
pub struct ChainArgs {
    /// Pipeline config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Filter to append, as "kind" or "kind:param=value,..." (repeatable)
    #[arg(short, long = "filter", value_name = "SPEC")]
    pub filters: Vec<String>,

    /// Seed for vintage grain (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Maximum number of filters in the chain
    #[arg(long)]
    pub max_filters: Option<usize>,
}

impl ChainArgs {
    /// Config file (or defaults), with command-line filters appended and
    /// command-line overrides applied.
    pub fn build_config(&self) -> Result<PipelineConfig> {
        let mut config = if let Some(ref path) = self.config {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            toml::from_str(&contents).context("Invalid pipeline config")?
        } else {
            PipelineConfig::default()
        };

        for spec in &self.filters {
            config.filters.push(parse_filter_spec(spec)?);
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(max) = self.max_filters {
            config.max_filters = max;
        }
        Ok(config)
    }
}

/// Parse "kind" or "kind:name=value,name=value".
///
/// Values that parse as numbers are stored as numbers, anything else as text.
pub fn parse_filter_spec(spec: &str) -> Result<FilterConfig> {
    let (kind_str, params_str) = match spec.split_once(':') {
        Some((k, p)) => (k, Some(p)),
        None => (spec, None),
    };
    let kind: FilterKind = kind_str.parse()?;
    let mut filter = FilterConfig::new(kind);

    for pair in params_str.into_iter().flat_map(|p| p.split(',')) {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        let Some((name, value)) = pair.split_once('=') else {
            bail!("Invalid parameter '{pair}' in '{spec}' (expected name=value)");
        };
        let value = value.trim();
        let value = match value.parse::<f64>() {
            Ok(n) => ParamValue::Number(n),
            Err(_) => ParamValue::from(value),
        };
        filter = filter.with_param(name.trim(), value);
    }
    Ok(filter)
}

/// Prints skipped filters and pipeline errors to stderr, once per filter.
#[derive(Default)]
pub struct ConsoleObserver {
    reported: Mutex<BTreeSet<InstanceId>>,
}

impl PipelineObserver for ConsoleObserver {
    fn filter_skipped(&self, skipped: &SkippedFilter) {
        let Ok(mut reported) = self.reported.lock() else {
            return;
        };
        if reported.insert(skipped.id) {
            eprintln!(
                "  {} {} {}: {}",
                Style::new().yellow().bold().apply_to("skipped"),
                skipped.kind,
                skipped.id,
                skipped.reason
            );
        }
    }

    fn error(&self, error: &LumenError) {
        eprintln!("  {} {}", Style::new().red().bold().apply_to("error"), error);
    }
}
