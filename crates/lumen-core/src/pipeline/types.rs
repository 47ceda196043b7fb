use crate::buffer::PixelBuffer;
use crate::catalog::FilterKind;
use crate::chain::InstanceId;
use crate::error::LumenError;
use crate::io::snapshot::Snapshot;

/// A filter the processor skipped because its parameters did not resolve.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedFilter {
    pub id: InstanceId,
    pub kind: FilterKind,
    pub reason: String,
}

/// Output of folding a chain over one buffer.
#[derive(Clone, Debug)]
pub struct Processed {
    pub buffer: PixelBuffer,
    pub skipped: Vec<SkippedFilter>,
}

/// Processed output plus its encoded snapshot.
#[derive(Clone, Debug)]
pub struct Rendered {
    pub buffer: PixelBuffer,
    pub snapshot: Snapshot,
    pub skipped: Vec<SkippedFilter>,
}

/// Notifications for the collaborator layer (UI, CLI, ...).
///
/// All methods have default no-op implementations.
pub trait PipelineObserver: Send + Sync {
    /// A filter was added to the chain.
    fn filter_applied(&self, _id: InstanceId, _kind: FilterKind) {}

    fn filter_removed(&self, _id: InstanceId, _kind: FilterKind) {}

    fn chain_cleared(&self) {}

    /// A filter was left out of a run because of an invalid parameter.
    fn filter_skipped(&self, _skipped: &SkippedFilter) {}

    /// A run finished and produced a new snapshot.
    fn processing_complete(&self, _snapshot: &Snapshot) {}

    fn error(&self, _error: &LumenError) {}
}

/// Observer that ignores every notification.
pub struct NoOpObserver;
impl PipelineObserver for NoOpObserver {}
