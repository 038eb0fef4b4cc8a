//! Terminal beat emitter.

use std::io::{self, Write};

use tlt_core::session::{BeatEmitter, SessionError, SessionResult};

/// Clicks by writing a BEL plus a visible marker to the terminal.
///
/// Character-level output is the whole point here: this tool measures
/// UI-callback-scale latency, not sample-accurate audio latency, so a
/// terminal bell is as good a beat as a decoded kick drum.
#[derive(Debug, Default)]
pub struct TerminalBeatEmitter;

impl BeatEmitter for TerminalBeatEmitter {
    fn prepare(&self) -> SessionResult<()> {
        // Fail the session start on a dead stdout (closed pipe, no
        // terminal) instead of failing silently on every beat.
        io::stdout()
            .flush()
            .map_err(|e| SessionError::resource_unavailable("terminal", e.to_string()))
    }

    fn emit(&self) {
        let mut out = io::stdout().lock();
        let _ = out.write_all(b"\x07  *click*\n");
        let _ = out.flush();
    }
}
