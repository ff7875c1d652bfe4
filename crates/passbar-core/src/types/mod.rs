//! Core types for passbar.

mod entry;
mod plaintext;

pub use entry::*;
pub use plaintext::*;
