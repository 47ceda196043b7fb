use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, warn};

use crate::buffer::PixelBuffer;
use crate::chain::FilterChain;
use crate::error::Result;
use crate::filters::{apply_filter_step, FilterStep};
use crate::io::snapshot::{encode_snapshot, SnapshotConfig};

use super::types::{Processed, Rendered, SkippedFilter};

/// Folds a filter chain over a buffer, left to right.
///
/// Every transform is deterministic except vintage grain, which draws from
/// the processor's RNG. Use [`Processor::with_seed`] for reproducible output.
pub struct Processor {
    rng: StdRng,
    snapshot: SnapshotConfig,
}

impl Default for Processor {
    fn default() -> Self {
        Self::new()
    }
}

impl Processor {
    /// Processor whose grain RNG is seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            snapshot: SnapshotConfig::default(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            snapshot: SnapshotConfig::default(),
        }
    }

    pub fn with_snapshot_config(mut self, snapshot: SnapshotConfig) -> Self {
        self.snapshot = snapshot;
        self
    }

    pub fn snapshot_config(&self) -> &SnapshotConfig {
        &self.snapshot
    }

    /// Apply the chain. An empty chain returns the input untouched.
    pub fn process(&mut self, source: PixelBuffer, chain: &FilterChain) -> PixelBuffer {
        self.process_reported(source, chain).buffer
    }

    /// Apply the chain, reporting filters skipped for invalid parameters.
    pub fn process_reported(&mut self, source: PixelBuffer, chain: &FilterChain) -> Processed {
        let start = Instant::now();
        let mut buffer = source;
        let mut skipped = Vec::new();

        for instance in chain.order() {
            match FilterStep::resolve(instance) {
                Ok(step) => {
                    buffer = apply_filter_step(buffer, &step, &mut self.rng);
                }
                Err(e) => {
                    warn!(id = %instance.id, kind = %instance.kind, error = %e, "Skipping filter");
                    skipped.push(SkippedFilter {
                        id: instance.id,
                        kind: instance.kind,
                        reason: e.to_string(),
                    });
                }
            }
        }

        debug!(
            filters = chain.len(),
            skipped = skipped.len(),
            width = buffer.width(),
            height = buffer.height(),
            elapsed_us = start.elapsed().as_micros() as u64,
            "Chain applied"
        );
        Processed { buffer, skipped }
    }

    /// Apply the chain and encode the result as a snapshot.
    pub fn render(&mut self, source: PixelBuffer, chain: &FilterChain) -> Result<Rendered> {
        let Processed { buffer, skipped } = self.process_reported(source, chain);
        let snapshot = encode_snapshot(&buffer, &self.snapshot)?;
        Ok(Rendered {
            buffer,
            snapshot,
            skipped,
        })
    }
}
