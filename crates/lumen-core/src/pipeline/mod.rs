pub mod config;
mod processor;
mod scheduler;
mod session;
mod token;
mod types;

pub use processor::Processor;
pub use scheduler::{FrameScheduler, PlaybackHandle, SchedulerStats, TickOutcome, TickReport};
pub use session::Session;
pub use token::{ProcessingToken, TokenGuard};
pub use types::{NoOpObserver, PipelineObserver, Processed, Rendered, SkippedFilter};
