//! `passforge-store` — Storage delegates for PASSFORGE.
//!
//! Keeps the generation history encrypted at rest and the user's generator
//! options on disk, behind the [`PersistentState`] and [`Encryptor`]
//! collaborator traits.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod state;

pub mod cipher;

pub mod history;
pub mod options;

pub use cipher::{AesGcmCipher, EncryptedBlob, Encryptor, KeyAvailability, KEY_LEN};
pub use error::StoreError;
pub use history::{HistoryEntry, HistoryStore, MAX_HISTORY_ENTRIES};
pub use options::OptionsStore;
pub use state::{JsonFileState, MemoryState, PersistentState, StorageLocation, StorageOptions};
