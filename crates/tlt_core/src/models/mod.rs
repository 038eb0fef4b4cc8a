//! Data models shared across the crate.

mod enums;

pub use enums::SessionState;
