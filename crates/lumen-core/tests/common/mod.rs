#![allow(dead_code)]

use std::sync::Mutex;

use lumen_core::buffer::PixelBuffer;
use lumen_core::catalog::FilterKind;
use lumen_core::chain::InstanceId;
use lumen_core::error::LumenError;
use lumen_core::io::snapshot::Snapshot;
use lumen_core::pipeline::{PipelineObserver, SkippedFilter};

pub const WHITE: [u8; 4] = [255, 255, 255, 255];
pub const BLACK: [u8; 4] = [0, 0, 0, 255];

pub fn solid(w: u32, h: u32, rgba: [u8; 4]) -> PixelBuffer {
    PixelBuffer::filled(w, h, rgba).expect("valid dimensions")
}

/// Checkerboard of `block`-sized squares, white in the top-left corner.
pub fn checkerboard(w: u32, h: u32, block: u32) -> PixelBuffer {
    PixelBuffer::from_fn(w, h, |x, y| {
        if ((x / block) + (y / block)) % 2 == 0 {
            WHITE
        } else {
            BLACK
        }
    })
    .expect("valid dimensions")
}

/// Left half black, right half white.
pub fn split_vertical(w: u32, h: u32) -> PixelBuffer {
    PixelBuffer::from_fn(w, h, |x, _| if x < w / 2 { BLACK } else { WHITE })
        .expect("valid dimensions")
}

/// Deterministic, non-uniform colour pattern with varying alpha.
pub fn pattern(w: u32, h: u32) -> PixelBuffer {
    PixelBuffer::from_fn(w, h, |x, y| {
        [
            ((x * 37 + y * 11) % 256) as u8,
            ((x * 5 + y * 53) % 256) as u8,
            ((x * 91 + y * 7 + 13) % 256) as u8,
            (200 + (x + y) % 56) as u8,
        ]
    })
    .expect("valid dimensions")
}

/// Coordinates of every pixel within `margin` of an edge.
pub fn border_pixels(w: u32, h: u32, margin: u32) -> Vec<(u32, u32)> {
    let mut out = Vec::new();
    for y in 0..h {
        for x in 0..w {
            if x < margin || y < margin || x + margin >= w || y + margin >= h {
                out.push((x, y));
            }
        }
    }
    out
}

#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Applied(InstanceId, FilterKind),
    Removed(InstanceId, FilterKind),
    Cleared,
    Skipped(InstanceId, FilterKind),
    Complete(usize),
    Error(String),
}

/// Observer that records every notification in order.
#[derive(Default)]
pub struct RecordingObserver {
    pub events: Mutex<Vec<Event>>,
}

impl RecordingObserver {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn completions(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, Event::Complete(_)))
            .count()
    }

    fn push(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }
}

impl PipelineObserver for RecordingObserver {
    fn filter_applied(&self, id: InstanceId, kind: FilterKind) {
        self.push(Event::Applied(id, kind));
    }

    fn filter_removed(&self, id: InstanceId, kind: FilterKind) {
        self.push(Event::Removed(id, kind));
    }

    fn chain_cleared(&self) {
        self.push(Event::Cleared);
    }

    fn filter_skipped(&self, skipped: &SkippedFilter) {
        self.push(Event::Skipped(skipped.id, skipped.kind));
    }

    fn processing_complete(&self, snapshot: &Snapshot) {
        self.push(Event::Complete(snapshot.bytes.len()));
    }

    fn error(&self, error: &LumenError) {
        self.push(Event::Error(error.to_string()));
    }
}
