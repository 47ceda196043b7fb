//! Frame sources: a static image decoded once, or a live stream that keeps
//! producing frames.

use std::fmt;

use tracing::{debug, info, warn};

use crate::buffer::PixelBuffer;
use crate::error::{LumenError, Result};

/// Lifecycle of a frame source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceState {
    /// Nothing bound.
    Idle,
    /// Static decode in flight.
    Loading,
    /// A frame is available but the source is not advancing.
    Ready,
    /// Live source advancing.
    Playing,
    Paused,
}

impl fmt::Display for SourceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Loading => write!(f, "Loading"),
            Self::Ready => write!(f, "Ready"),
            Self::Playing => write!(f, "Playing"),
            Self::Paused => write!(f, "Paused"),
        }
    }
}

/// A continuously updating frame provider (camera, video decoder, ...).
///
/// The capture side is owned by the collaborator; the pipeline only pulls
/// the freshest frame.
pub trait LiveStream: Send {
    /// Begin producing frames.
    fn play(&mut self) -> Result<()>;

    fn pause(&mut self) {}

    /// Freshest available frame, as an owned copy. Playing streams advance.
    fn latest_frame(&mut self) -> Option<PixelBuffer>;

    /// The frame last handed out by [`LiveStream::latest_frame`] (or the one
    /// it would hand out next, before the first pull). Never advances.
    fn current_frame(&self) -> Option<PixelBuffer>;

    /// True once a finite stream has delivered its last frame.
    fn is_ended(&self) -> bool {
        false
    }

    fn describe(&self) -> String {
        "live stream".to_string()
    }
}

/// Handle for one pending static decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadTicket(u64);

enum Binding {
    None,
    /// `None` while the decode is pending.
    Static(Option<PixelBuffer>),
    Live(Box<dyn LiveStream>),
}

pub struct FrameSource {
    state: SourceState,
    binding: Binding,
    generation: u64,
}

impl Default for FrameSource {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FrameSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let binding = match &self.binding {
            Binding::None => "none".to_string(),
            Binding::Static(Some(b)) => format!("static {}x{}", b.width(), b.height()),
            Binding::Static(None) => "static (pending)".to_string(),
            Binding::Live(s) => s.describe(),
        };
        f.debug_struct("FrameSource")
            .field("state", &self.state)
            .field("binding", &binding)
            .finish()
    }
}

impl FrameSource {
    pub fn new() -> Self {
        Self {
            state: SourceState::Idle,
            binding: Binding::None,
            generation: 0,
        }
    }

    pub fn state(&self) -> SourceState {
        self.state
    }

    pub fn is_live(&self) -> bool {
        matches!(self.binding, Binding::Live(_))
    }

    /// True when a live stream has run out of frames.
    pub fn is_ended(&self) -> bool {
        match &self.binding {
            Binding::Live(stream) => stream.is_ended(),
            _ => false,
        }
    }

    /// Start a static load. The decode itself runs elsewhere and reports back
    /// through [`FrameSource::complete_load`].
    pub fn begin_load(&mut self) -> LoadTicket {
        self.rebind(Binding::Static(None), SourceState::Loading);
        info!(ticket = self.generation, "Static image decode started");
        LoadTicket(self.generation)
    }

    /// Deliver the result of a decode started with [`FrameSource::begin_load`].
    ///
    /// Returns `Ok(false)` if the ticket was superseded by a later bind. A
    /// failed decode returns the source to `Idle` and reports `DecodeFailure`.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        decoded: Result<PixelBuffer>,
    ) -> Result<bool> {
        if ticket.0 != self.generation || self.state != SourceState::Loading {
            debug!(ticket = ticket.0, current = self.generation, "Ignoring stale decode");
            return Ok(false);
        }
        match decoded {
            Ok(buffer) => {
                info!(
                    width = buffer.width(),
                    height = buffer.height(),
                    "Static image ready"
                );
                self.binding = Binding::Static(Some(buffer));
                self.state = SourceState::Ready;
                Ok(true)
            }
            Err(e) => {
                warn!(error = %e, "Static image decode failed");
                self.binding = Binding::None;
                self.state = SourceState::Idle;
                Err(match e {
                    LumenError::DecodeFailure(msg) => LumenError::DecodeFailure(msg),
                    other => LumenError::DecodeFailure(other.to_string()),
                })
            }
        }
    }

    /// Bind an already decoded still image.
    pub fn load_static(&mut self, buffer: PixelBuffer) {
        self.rebind(Binding::Static(Some(buffer)), SourceState::Ready);
    }

    /// Bind a live stream. It does not advance until [`FrameSource::play`].
    pub fn bind_live(&mut self, stream: Box<dyn LiveStream>) {
        info!(stream = %stream.describe(), "Live stream bound");
        self.rebind(Binding::Live(stream), SourceState::Ready);
    }

    pub fn play(&mut self) -> Result<()> {
        match &mut self.binding {
            Binding::Live(stream) => {
                if self.state == SourceState::Playing {
                    return Ok(());
                }
                stream.play().map_err(|e| match e {
                    LumenError::SourceUnavailable(msg) => LumenError::SourceUnavailable(msg),
                    other => LumenError::SourceUnavailable(other.to_string()),
                })?;
                self.state = SourceState::Playing;
                Ok(())
            }
            Binding::Static(_) => Err(LumenError::SourceUnavailable(
                "a still image cannot be played".to_string(),
            )),
            Binding::None => Err(LumenError::SourceUnavailable(
                "no source bound".to_string(),
            )),
        }
    }

    pub fn pause(&mut self) {
        if self.state != SourceState::Playing {
            return;
        }
        if let Binding::Live(stream) = &mut self.binding {
            stream.pause();
        }
        self.state = SourceState::Paused;
    }

    /// Drop whatever is bound and return to `Idle`.
    pub fn unbind(&mut self) {
        self.rebind(Binding::None, SourceState::Idle);
    }

    /// Pull the next frame as an owned buffer.
    ///
    /// Static sources hand out a copy of the decoded image; live sources the
    /// freshest frame, advancing a playing stream. `None` while loading or
    /// when nothing is bound.
    pub fn capture(&mut self) -> Option<PixelBuffer> {
        match &mut self.binding {
            Binding::Static(buffer) => buffer.clone(),
            Binding::Live(stream) => stream.latest_frame(),
            Binding::None => None,
        }
    }

    /// Copy of the frame currently on show, without advancing a live stream.
    pub fn current(&self) -> Option<PixelBuffer> {
        match &self.binding {
            Binding::Static(buffer) => buffer.clone(),
            Binding::Live(stream) => stream.current_frame(),
            Binding::None => None,
        }
    }

    fn rebind(&mut self, binding: Binding, state: SourceState) {
        self.pause();
        self.generation += 1;
        self.binding = binding;
        self.state = state;
    }
}

/// An in-memory list of frames played back one per pull.
pub struct FrameSequence {
    name: String,
    frames: Vec<PixelBuffer>,
    cursor: usize,
    /// Index of the frame last handed out.
    shown: Option<usize>,
    looping: bool,
    playing: bool,
    ended: bool,
}

impl FrameSequence {
    pub fn new(name: impl Into<String>, frames: Vec<PixelBuffer>, looping: bool) -> Self {
        Self {
            name: name.into(),
            frames,
            cursor: 0,
            shown: None,
            looping,
            playing: false,
            ended: false,
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl LiveStream for FrameSequence {
    fn play(&mut self) -> Result<()> {
        if self.frames.is_empty() {
            return Err(LumenError::SourceUnavailable(format!(
                "{} has no frames",
                self.name
            )));
        }
        if self.ended {
            self.cursor = 0;
            self.ended = false;
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn latest_frame(&mut self) -> Option<PixelBuffer> {
        let frame = self.frames.get(self.cursor)?.clone();
        self.shown = Some(self.cursor);
        if self.playing && !self.ended {
            if self.cursor + 1 < self.frames.len() {
                self.cursor += 1;
            } else if self.looping {
                self.cursor = 0;
            } else {
                self.ended = true;
            }
        }
        Some(frame)
    }

    fn current_frame(&self) -> Option<PixelBuffer> {
        self.frames.get(self.shown.unwrap_or(self.cursor)).cloned()
    }

    fn is_ended(&self) -> bool {
        self.ended
    }

    fn describe(&self) -> String {
        format!("{} ({} frames)", self.name, self.frames.len())
    }
}
