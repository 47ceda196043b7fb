use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::buffer::PixelBuffer;
use crate::catalog::{FilterKind, ParamValue};
use crate::chain::{FilterChain, InstanceId};
use crate::error::{LumenError, Result};
use crate::io::snapshot::Snapshot;
use crate::source::{FrameSource, LiveStream, LoadTicket, SourceState};

use super::config::PipelineConfig;
use super::processor::Processor;
use super::scheduler::{FrameScheduler, PlaybackHandle, SchedulerStats, TickReport};
use super::token::ProcessingToken;
use super::types::{NoOpObserver, PipelineObserver, Rendered};

/// The pipeline as the collaborator layer sees it.
///
/// Owns the chain, the frame source, the processor and the scheduler, turns
/// user intents into pipeline operations and reports back through a
/// [`PipelineObserver`]. Chain mutations reprocess the current still frame;
/// while playing, the next tick picks them up instead.
pub struct Session {
    chain: FilterChain,
    source: FrameSource,
    processor: Processor,
    scheduler: FrameScheduler,
    token: ProcessingToken,
    observer: Arc<dyn PipelineObserver>,
    latest: Option<Rendered>,
}

impl Session {
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        let chain = FilterChain::from_config(config.max_filters, &config.filters)?;
        let processor = match config.seed {
            Some(seed) => Processor::with_seed(seed),
            None => Processor::new(),
        }
        .with_snapshot_config(config.snapshot.clone());
        info!(
            filters = chain.len(),
            max_filters = chain.max_filters(),
            format = %config.snapshot.format,
            "Session created"
        );
        Ok(Self {
            chain,
            source: FrameSource::new(),
            processor,
            scheduler: FrameScheduler::new(config.playback.frame_interval()),
            token: ProcessingToken::new(),
            observer: Arc::new(NoOpObserver),
            latest: None,
        })
    }

    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn chain(&self) -> &FilterChain {
        &self.chain
    }

    pub fn source_state(&self) -> SourceState {
        self.source.state()
    }

    /// Shared handle on the processing slot, e.g. for a worker that runs
    /// its own reprocessing.
    pub fn processing_token(&self) -> ProcessingToken {
        self.token.clone()
    }

    pub fn playback_handle(&self) -> PlaybackHandle {
        self.scheduler.handle()
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn scheduler_stats(&self) -> SchedulerStats {
        self.scheduler.stats()
    }

    // -- chain intents ------------------------------------------------------

    pub fn add_filter(&mut self, kind: FilterKind) -> Result<InstanceId> {
        match self.chain.add(kind) {
            Ok(id) => {
                self.observer.filter_applied(id, kind);
                self.refresh();
                Ok(id)
            }
            Err(e) => {
                warn!(%kind, error = %e, "Filter rejected");
                self.observer.error(&e);
                Err(e)
            }
        }
    }

    pub fn remove_filter(&mut self, id: InstanceId) -> bool {
        let Some(removed) = self.chain.remove(id) else {
            return false;
        };
        self.observer.filter_removed(removed.id, removed.kind);
        self.refresh();
        true
    }

    pub fn set_parameter(
        &mut self,
        id: InstanceId,
        name: impl Into<String>,
        value: impl Into<ParamValue>,
    ) -> bool {
        let changed = self.chain.set_parameter(id, name, value);
        if changed {
            self.refresh();
        }
        changed
    }

    pub fn move_filter(&mut self, id: InstanceId, new_index: usize) -> bool {
        let moved = self.chain.move_to(id, new_index);
        if moved {
            self.refresh();
        }
        moved
    }

    pub fn clear_filters(&mut self) {
        self.chain.clear();
        self.observer.chain_cleared();
        self.refresh();
    }

    // -- source intents -----------------------------------------------------

    /// Bind an already decoded still image and process it.
    ///
    /// Returns `Ok(false)` when the image was bound but the processing token
    /// was busy, so no output was produced.
    pub fn load_image(&mut self, buffer: PixelBuffer) -> Result<bool> {
        self.halt_playback();
        self.latest = None;
        self.source.load_static(buffer);
        self.reprocess()
    }

    /// Start an asynchronous still-image load; see [`Session::complete_load`].
    pub fn begin_load(&mut self) -> LoadTicket {
        self.halt_playback();
        self.latest = None;
        self.source.begin_load()
    }

    /// Deliver a decode result. The image is processed on success.
    ///
    /// Returns `Ok(true)` only when the image was bound and processed;
    /// `Ok(false)` for a superseded ticket or a busy processing token.
    pub fn complete_load(&mut self, ticket: LoadTicket, decoded: Result<PixelBuffer>) -> Result<bool> {
        match self.source.complete_load(ticket, decoded) {
            Ok(true) => self.reprocess(),
            Ok(false) => Ok(false),
            Err(e) => {
                self.observer.error(&e);
                Err(e)
            }
        }
    }

    pub fn bind_live(&mut self, stream: Box<dyn LiveStream>) {
        self.halt_playback();
        self.latest = None;
        self.source.bind_live(stream);
    }

    pub fn unbind(&mut self) {
        self.halt_playback();
        self.source.unbind();
        self.latest = None;
    }

    // -- playback -----------------------------------------------------------

    pub fn start_playback(&mut self) -> Result<()> {
        self.scheduler.start(&mut self.source).inspect_err(|e| {
            warn!(error = %e, "Playback could not start");
            self.observer.error(e);
        })
    }

    pub fn stop_playback(&mut self) {
        self.scheduler.stop(&mut self.source);
    }

    pub fn is_playing(&self) -> bool {
        self.scheduler.is_playing()
    }

    /// One scheduler tick. Call once per display refresh while
    /// `reschedule` is true.
    pub fn tick(&mut self) -> TickReport {
        let Self {
            chain,
            source,
            processor,
            scheduler,
            token,
            observer,
            latest,
        } = self;
        scheduler.tick(source, token, |frame| {
            run_frame(processor, chain, observer.as_ref(), latest, frame)
        })
    }

    // -- processing ---------------------------------------------------------

    /// Manual re-apply of the chain to the current frame.
    ///
    /// A live stream is not advanced: the frame on show is re-rendered.
    /// Returns `Ok(false)` when another run holds the processing token; the
    /// request is dropped rather than queued.
    pub fn reprocess(&mut self) -> Result<bool> {
        let Some(_guard) = self.token.try_acquire() else {
            debug!("Reprocess dropped, processor busy");
            return Ok(false);
        };
        let Some(frame) = self.source.current() else {
            return Err(LumenError::NoFrame);
        };
        run_frame(
            &mut self.processor,
            &self.chain,
            self.observer.as_ref(),
            &mut self.latest,
            frame,
        )?;
        Ok(true)
    }

    /// Latest processed buffer.
    pub fn latest_output(&self) -> Option<&PixelBuffer> {
        self.latest.as_ref().map(|r| &r.buffer)
    }

    /// Latest encoded snapshot, for display or download.
    pub fn export(&self) -> Option<&Snapshot> {
        self.latest.as_ref().map(|r| &r.snapshot)
    }

    fn refresh(&mut self) {
        if !matches!(self.source.state(), SourceState::Ready | SourceState::Paused) {
            return;
        }
        if let Err(e) = self.reprocess() {
            debug!(error = %e, "Refresh after chain change failed");
        }
    }

    fn halt_playback(&mut self) {
        if self.scheduler.is_playing() {
            self.scheduler.stop(&mut self.source);
        }
    }
}

fn run_frame(
    processor: &mut Processor,
    chain: &FilterChain,
    observer: &dyn PipelineObserver,
    latest: &mut Option<Rendered>,
    frame: PixelBuffer,
) -> Result<()> {
    match processor.render(frame, chain) {
        Ok(rendered) => {
            for skipped in &rendered.skipped {
                observer.filter_skipped(skipped);
            }
            observer.processing_complete(&rendered.snapshot);
            *latest = Some(rendered);
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "Processing failed");
            observer.error(&e);
            Err(e)
        }
    }
}
