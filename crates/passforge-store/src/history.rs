//! Encrypted generation history.
//!
//! The history is a most-recent-first list of generated secrets, capped at
//! [`MAX_HISTORY_ENTRIES`]. It is persisted encrypted on disk and cached
//! decrypted in memory; nothing is read or recorded while no key is loaded.

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use passforge_core::{generate_password, GenerationOptions, SecureRandom};

use crate::cipher::{EncryptedBlob, Encryptor, KeyAvailability};
use crate::error::StoreError;
use crate::state::{PersistentState, StorageOptions};

/// Maximum number of history entries kept; older ones are evicted.
pub const MAX_HISTORY_ENTRIES: usize = 100;

/// Disk key of the encrypted history.
const ENCRYPTED_HISTORY_KEY: &str = "generatedPasswordHistory";

/// Memory key of the decrypted history cache.
const DECRYPTED_HISTORY_KEY: &str = "decryptedPasswordGenerationHistory";

// ── Entries ────────────────────────────────────────────────────────

/// One generated secret and when it was generated.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// The generated password or passphrase.
    pub secret: String,
    /// Milliseconds since the Unix epoch.
    pub generated_at_epoch_millis: i64,
}

impl HistoryEntry {
    /// An entry for `secret` stamped with the current time.
    #[must_use]
    pub fn now(secret: &str) -> Self {
        Self {
            secret: secret.to_string(),
            generated_at_epoch_millis: epoch_millis(),
        }
    }
}

impl fmt::Debug for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryEntry")
            .field("secret", &"***")
            .field("generated_at_epoch_millis", &self.generated_at_epoch_millis)
            .finish()
    }
}

/// On-disk form: the secret encrypted, the timestamp in clear.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EncryptedHistoryEntry {
    secret: EncryptedBlob,
    generated_at_epoch_millis: i64,
}

fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}

// ── Store ──────────────────────────────────────────────────────────

/// History of generated secrets for one active scope.
///
/// Reads and writes go through `state`; secrets are protected by `cipher`.
/// Calls are not serialized against each other: two interleaved
/// read-modify-write sequences on the same backend resolve as last writer
/// wins.
#[derive(Debug)]
pub struct HistoryStore<S, C> {
    state: S,
    cipher: C,
    scope: String,
}

impl<S: PersistentState, C: Encryptor + KeyAvailability> HistoryStore<S, C> {
    /// History for `scope`, stored in `state` and encrypted with `cipher`.
    pub fn new(state: S, cipher: C, scope: &str) -> Self {
        Self {
            state,
            cipher,
            scope: scope.to_string(),
        }
    }

    /// The backing state.
    pub const fn state(&self) -> &S {
        &self.state
    }

    /// The backing state, mutably.
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// The cipher, e.g. to check key availability.
    pub const fn cipher(&self) -> &C {
        &self.cipher
    }

    /// The cipher, mutably, e.g. to lock or unlock it.
    pub fn cipher_mut(&mut self) -> &mut C {
        &mut self.cipher
    }

    /// The active scope.
    #[must_use]
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// All entries, most recent first.
    ///
    /// Returns an empty list while no key is loaded. The first call after
    /// startup or [`invalidate_cache`](Self::invalidate_cache) decrypts the
    /// persisted history and caches it in memory; later calls read the
    /// cache.
    ///
    /// # Errors
    ///
    /// [`StoreError::Decryption`] if any persisted entry fails to decrypt;
    /// the whole call fails rather than skipping entries. Backend and
    /// serialization errors are propagated.
    pub fn get_history(&mut self) -> Result<Vec<HistoryEntry>, StoreError> {
        if !self.cipher.has_key() {
            return Ok(Vec::new());
        }

        let memory = StorageOptions::memory(&self.scope);
        if let Some(cached) = self.state.get(DECRYPTED_HISTORY_KEY, &memory)? {
            return Ok(serde_json::from_value(cached)?);
        }

        let disk = StorageOptions::disk(&self.scope);
        let Some(stored) = self.state.get(ENCRYPTED_HISTORY_KEY, &disk)? else {
            return Ok(Vec::new());
        };
        let encrypted: Vec<EncryptedHistoryEntry> = serde_json::from_value(stored)?;

        let history = match self.decrypt_history(&encrypted) {
            Ok(history) => history,
            Err(err) => {
                tracing::warn!(scope = %self.scope, error = %err, "history decryption failed");
                return Err(err);
            }
        };

        self.state.set(
            DECRYPTED_HISTORY_KEY,
            Some(serde_json::to_value(&history)?),
            &memory,
        )?;
        tracing::debug!(scope = %self.scope, entries = history.len(), "history cache populated");
        Ok(history)
    }

    /// Record `secret` as the most recent entry.
    ///
    /// Does nothing while no key is loaded, or when `secret` equals the
    /// current most recent entry. Entries beyond [`MAX_HISTORY_ENTRIES`]
    /// are evicted from the old end. Both the encrypted disk copy and the
    /// decrypted memory copy are written.
    ///
    /// # Errors
    ///
    /// Propagates read errors from [`get_history`](Self::get_history),
    /// encryption errors, and the first failing write. Both writes are
    /// attempted even when the first one fails.
    pub fn add_history(&mut self, secret: &str) -> Result<(), StoreError> {
        if !self.cipher.has_key() {
            tracing::debug!(scope = %self.scope, "no key loaded, history not recorded");
            return Ok(());
        }

        let mut history = self.get_history()?;
        if history.first().is_some_and(|latest| latest.secret == secret) {
            return Ok(());
        }

        history.insert(0, HistoryEntry::now(secret));
        if history.len() > MAX_HISTORY_ENTRIES {
            history.truncate(MAX_HISTORY_ENTRIES);
            tracing::debug!(scope = %self.scope, "history truncated to {MAX_HISTORY_ENTRIES} entries");
        }

        self.persist(&history)
    }

    /// Generate a secret with `options` and record it.
    ///
    /// # Errors
    ///
    /// [`StoreError::Generator`] if generation fails, otherwise as
    /// [`add_history`](Self::add_history).
    pub fn generate_and_record<R: SecureRandom + ?Sized>(
        &mut self,
        options: &GenerationOptions,
        rng: &mut R,
    ) -> Result<String, StoreError> {
        let secret = generate_password(options, rng)?;
        self.add_history(&secret)?;
        Ok(secret)
    }

    /// Remove both the encrypted and decrypted history of `scope`, or of
    /// the active scope when `None`. Works with or without a key.
    ///
    /// # Errors
    ///
    /// The first failing removal; both are attempted.
    pub fn clear(&mut self, scope: Option<&str>) -> Result<(), StoreError> {
        let scope = scope.unwrap_or(&self.scope).to_string();
        let memory_result =
            self.state
                .set(DECRYPTED_HISTORY_KEY, None, &StorageOptions::memory(&scope));
        let disk_result = self
            .state
            .set(ENCRYPTED_HISTORY_KEY, None, &StorageOptions::disk(&scope));
        tracing::debug!(scope = %scope, "history cleared");
        memory_result.and(disk_result)
    }

    /// Drop the decrypted cache of the active scope, so the next read
    /// decrypts from disk again.
    ///
    /// # Errors
    ///
    /// Backend errors from the removal.
    pub fn invalidate_cache(&mut self) -> Result<(), StoreError> {
        self.state.set(
            DECRYPTED_HISTORY_KEY,
            None,
            &StorageOptions::memory(&self.scope),
        )
    }

    fn persist(&mut self, history: &[HistoryEntry]) -> Result<(), StoreError> {
        let encrypted = self.encrypt_history(history)?;
        let decrypted = serde_json::to_value(history)?;
        let encrypted = serde_json::to_value(&encrypted)?;

        let memory_result = self.state.set(
            DECRYPTED_HISTORY_KEY,
            Some(decrypted),
            &StorageOptions::memory(&self.scope),
        );
        let disk_result = self.state.set(
            ENCRYPTED_HISTORY_KEY,
            Some(encrypted),
            &StorageOptions::disk(&self.scope),
        );
        memory_result.and(disk_result)
    }

    fn encrypt_history(
        &self,
        history: &[HistoryEntry],
    ) -> Result<Vec<EncryptedHistoryEntry>, StoreError> {
        history
            .iter()
            .map(|entry| {
                Ok(EncryptedHistoryEntry {
                    secret: self.cipher.encrypt(&entry.secret)?,
                    generated_at_epoch_millis: entry.generated_at_epoch_millis,
                })
            })
            .collect()
    }

    fn decrypt_history(
        &self,
        encrypted: &[EncryptedHistoryEntry],
    ) -> Result<Vec<HistoryEntry>, StoreError> {
        encrypted
            .iter()
            .map(|entry| {
                Ok(HistoryEntry {
                    secret: self.cipher.decrypt(&entry.secret)?,
                    generated_at_epoch_millis: entry.generated_at_epoch_millis,
                })
            })
            .collect()
    }
}

// ── Tests ──────────────────────────────────────────────────────────
