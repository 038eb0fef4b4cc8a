//! TLT Core - backend logic for the Tap Latency Tester.
//!
//! This crate contains all measurement and session logic with zero UI
//! dependencies. A frontend supplies the beat sound, the input events,
//! and the rendering; everything between a timestamp arriving and a
//! tempo/latency reading coming out lives here.

pub mod analysis;
pub mod clock;
pub mod config;
pub mod logging;
pub mod models;
pub mod session;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
