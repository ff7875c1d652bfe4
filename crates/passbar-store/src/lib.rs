//! Password store access for passbar.
//!
//! Scans a `pass`-style store into a tree of entries, decrypts entries by
//! shelling out to `gpg`, and drives the bounded passphrase workflow that
//! ends in a copy or a reveal.

pub mod catalog;
pub mod error;
pub mod gpg;
pub mod setup;
pub mod workflow;

pub use error::{Result, StoreError};
pub use gpg::{Decrypt, GpgClient};
pub use workflow::{Outcome, PassphraseAttempt, PassphraseWorkflow, MAX_ATTEMPTS};
