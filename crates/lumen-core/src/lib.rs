//! Real-time pixel filter pipeline.
//!
//! A [`chain::FilterChain`] of catalog filters is folded over RGBA
//! [`buffer::PixelBuffer`]s pulled from a [`source::FrameSource`], either
//! once for a still image or repeatedly by the [`pipeline::FrameScheduler`]
//! for live sources.

pub mod buffer;
pub mod catalog;
pub mod chain;
pub mod consts;
pub mod error;
pub mod filters;
pub mod io;
pub mod pipeline;
pub mod source;
