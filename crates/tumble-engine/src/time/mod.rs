//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the runtime.
//! Intended usage:
//! - one `FrameClock` per window (or per render loop)
//! - call `tick()` once per presented frame to obtain `FrameTime`
//! - one-shot `Timeout`s polled against `FrameTime::now`

mod frame_clock;
mod timeout;

pub use frame_clock::{FrameClock, FrameTime};
pub use timeout::Timeout;
