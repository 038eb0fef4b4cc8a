//! Measurement sessions.
//!
//! A session owns the analyzer for its lifetime and drives the
//! metronome: a lead-in countdown, then a beat loop that emits a click
//! and records its timestamp once per beat period. The loop is a
//! suspending wait, cancellable at any point - stopping a session
//! interrupts a pending sleep so no beat is emitted or recorded after
//! cancellation. Tap recording never blocks.

mod emitter;
mod errors;
mod runner;

pub use emitter::{BeatEmitter, SilentEmitter};
pub use errors::{SessionError, SessionResult};
pub use runner::Session;
