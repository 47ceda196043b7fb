use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::buffer::PixelBuffer;
use crate::error::Result;
use crate::source::{FrameSource, SourceState};

use super::token::ProcessingToken;

/// What a single scheduler tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Playback is not running; nothing happened.
    Stopped,
    /// One frame went through the processor.
    Processed,
    /// The processing token was held by another run; the tick was dropped.
    Dropped,
    /// The source had no frame to offer yet.
    NoFrame,
    /// Processing ran but failed (reported to the observer).
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub outcome: TickOutcome,
    /// Whether the driver should schedule another tick.
    pub reschedule: bool,
    /// A finite live source delivered its last frame; playback stopped.
    pub ended: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    pub processed: u64,
    pub dropped: u64,
    pub empty: u64,
    pub failed: u64,
}

/// Cloneable stop switch for a running scheduler.
///
/// Stopping from inside a tick (e.g. from a completion callback) lets that
/// tick finish but prevents it from rescheduling.
#[derive(Clone, Debug)]
pub struct PlaybackHandle {
    playing: Arc<AtomicBool>,
}

impl PlaybackHandle {
    pub fn stop(&self) {
        self.playing.store(false, Ordering::Release);
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }
}

/// Cooperative frame loop for live sources.
///
/// The driver (display refresh callback, timer, CLI loop) calls
/// [`FrameScheduler::tick`] once per refresh and keeps going while the
/// report says to reschedule. Each tick processes at most one frame.
#[derive(Debug)]
pub struct FrameScheduler {
    playing: Arc<AtomicBool>,
    interval: Duration,
    stats: SchedulerStats,
}

impl FrameScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            playing: Arc::new(AtomicBool::new(false)),
            interval,
            stats: SchedulerStats::default(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }

    pub fn handle(&self) -> PlaybackHandle {
        PlaybackHandle {
            playing: Arc::clone(&self.playing),
        }
    }

    pub fn start(&mut self, source: &mut FrameSource) -> Result<()> {
        source.play()?;
        self.playing.store(true, Ordering::Release);
        info!(interval_ms = self.interval.as_millis() as u64, "Playback started");
        Ok(())
    }

    pub fn stop(&mut self, source: &mut FrameSource) {
        self.playing.store(false, Ordering::Release);
        source.pause();
        info!(processed = self.stats.processed, dropped = self.stats.dropped, "Playback stopped");
    }

    /// Run one tick: take the token, pull the freshest frame, hand it to
    /// `process`.
    ///
    /// The frame is captured only after the token is held, so a new frame is
    /// never pulled while the previous one is still being processed.
    pub fn tick<F>(
        &mut self,
        source: &mut FrameSource,
        token: &ProcessingToken,
        process: F,
    ) -> TickReport
    where
        F: FnOnce(PixelBuffer) -> Result<()>,
    {
        if !self.is_playing() {
            if source.state() == SourceState::Playing {
                source.pause();
            }
            return self.report(TickOutcome::Stopped, source);
        }

        let Some(_guard) = token.try_acquire() else {
            self.stats.dropped += 1;
            debug!(dropped = self.stats.dropped, "Tick dropped, processor busy");
            return self.report(TickOutcome::Dropped, source);
        };

        let Some(frame) = source.capture() else {
            self.stats.empty += 1;
            return self.report(TickOutcome::NoFrame, source);
        };

        let outcome = match process(frame) {
            Ok(()) => {
                self.stats.processed += 1;
                TickOutcome::Processed
            }
            Err(e) => {
                self.stats.failed += 1;
                debug!(error = %e, "Tick processing failed");
                TickOutcome::Failed
            }
        };

        if source.is_ended() {
            info!(processed = self.stats.processed, "Live source ended");
            self.stop(source);
            return TickReport {
                outcome,
                reschedule: false,
                ended: true,
            };
        }
        self.report(outcome, source)
    }

    fn report(&self, outcome: TickOutcome, source: &mut FrameSource) -> TickReport {
        let reschedule = self.is_playing();
        if !reschedule && source.state() == SourceState::Playing {
            source.pause();
        }
        TickReport {
            outcome,
            reschedule,
            ended: false,
        }
    }
}
