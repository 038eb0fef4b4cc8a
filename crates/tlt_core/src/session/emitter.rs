//! Beat emitter seam.

use super::errors::SessionResult;

/// Something that makes a beat perceptible - a click, a bell, a flash.
///
/// The session calls `prepare` once before the countdown; a failure
/// there aborts the start and leaves the analyzer untouched. `emit` is
/// called once per beat from the scheduler and must not block.
pub trait BeatEmitter: Send + Sync {
    /// Acquire whatever resource the emitter needs before the first
    /// beat (open the audio device, probe the terminal, ...).
    fn prepare(&self) -> SessionResult<()> {
        Ok(())
    }

    /// Emit one beat.
    fn emit(&self);
}

/// Emitter that produces nothing.
///
/// For headless use and tests where only the recorded timestamps
/// matter.
#[derive(Debug, Default)]
pub struct SilentEmitter;

impl BeatEmitter for SilentEmitter {
    fn emit(&self) {}
}
