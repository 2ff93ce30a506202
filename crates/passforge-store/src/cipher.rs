//! At-rest encryption for generation history.
//!
//! This module provides:
//! - [`KeyAvailability`] / [`Encryptor`] — the collaborator seams the
//!   history store is written against
//! - [`EncryptedBlob`] — base64 text of `nonce || ciphertext || tag`
//! - [`AesGcmCipher`] — AES-256-GCM implementation holding a lockable key

use std::fmt;

use data_encoding::BASE64;
use rand::rngs::OsRng;
use rand::RngCore;
use ring::aead;
use secrecy::{ExposeSecret, SecretBox};
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::StoreError;

/// AES-256-GCM nonce length in bytes (96 bits).
pub const NONCE_LEN: usize = 12;

/// AES-256-GCM authentication tag length in bytes (128 bits).
pub const TAG_LEN: usize = 16;

/// AES-256-GCM key length in bytes (256 bits).
pub const KEY_LEN: usize = 32;

/// Minimum valid decoded length: nonce + empty ciphertext + tag.
const MIN_SEALED_LEN: usize = NONCE_LEN + TAG_LEN;

/// Associated data binding every blob to the history domain.
const HISTORY_AAD: &[u8] = b"passforge.history.v1";

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// Reports whether a key is currently loaded.
pub trait KeyAvailability {
    /// `true` when encrypt/decrypt can succeed.
    fn has_key(&self) -> bool;
}

/// String encryption for values persisted at rest.
pub trait Encryptor {
    /// Encrypt `plaintext` under the current key.
    ///
    /// # Errors
    ///
    /// [`StoreError::KeyUnavailable`] without a key,
    /// [`StoreError::Encryption`] if the primitive fails.
    fn encrypt(&self, plaintext: &str) -> Result<EncryptedBlob, StoreError>;

    /// Decrypt and authenticate `blob`.
    ///
    /// # Errors
    ///
    /// [`StoreError::KeyUnavailable`] without a key,
    /// [`StoreError::Decryption`] for any tampered or foreign blob.
    fn decrypt(&self, blob: &EncryptedBlob) -> Result<String, StoreError>;
}

// ---------------------------------------------------------------------------
// EncryptedBlob
// ---------------------------------------------------------------------------

/// Encrypted value as stored: base64 of `nonce (12) || ciphertext || tag (16)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedBlob(String);

impl EncryptedBlob {
    /// Wrap already-encoded text, e.g. read back from storage.
    #[must_use]
    pub const fn from_encoded(encoded: String) -> Self {
        Self(encoded)
    }

    /// The encoded text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_sealed(sealed: &[u8]) -> Self {
        Self(BASE64.encode(sealed))
    }

    fn to_sealed(&self) -> Result<Vec<u8>, StoreError> {
        let bytes = BASE64
            .decode(self.0.as_bytes())
            .map_err(|_| StoreError::Decryption)?;
        if bytes.len() < MIN_SEALED_LEN {
            return Err(StoreError::Decryption);
        }
        Ok(bytes)
    }
}

// ---------------------------------------------------------------------------
// AesGcmCipher
// ---------------------------------------------------------------------------

/// AES-256-GCM [`Encryptor`] with a key that can be loaded and dropped.
///
/// The key lives in a [`SecretBox`] and is zeroized when the cipher is
/// locked or dropped. A fresh random nonce is drawn from `OsRng` per call.
#[derive(Default)]
pub struct AesGcmCipher {
    key: Option<SecretBox<[u8; KEY_LEN]>>,
}

impl AesGcmCipher {
    /// A cipher with no key loaded.
    #[must_use]
    pub const fn locked() -> Self {
        Self { key: None }
    }

    /// A cipher unlocked with `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Encryption`] if `key` is not exactly 32 bytes.
    pub fn with_key(key: &[u8]) -> Result<Self, StoreError> {
        let mut cipher = Self::locked();
        cipher.unlock(key)?;
        Ok(cipher)
    }

    /// Load `key`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Encryption`] if `key` is not exactly 32 bytes.
    pub fn unlock(&mut self, key: &[u8]) -> Result<(), StoreError> {
        if key.len() != KEY_LEN {
            return Err(StoreError::Encryption(format!(
                "invalid key length: {} bytes (expected {KEY_LEN})",
                key.len()
            )));
        }
        self.key = Some(SecretBox::init_with_mut(|slot: &mut [u8; KEY_LEN]| {
            slot.copy_from_slice(key);
        }));
        Ok(())
    }

    /// Drop the key. Subsequent calls fail with [`StoreError::KeyUnavailable`].
    pub fn lock(&mut self) {
        self.key = None;
    }

    fn sealing_key(&self) -> Result<aead::LessSafeKey, StoreError> {
        let key = self.key.as_ref().ok_or(StoreError::KeyUnavailable)?;
        let unbound = aead::UnboundKey::new(&aead::AES_256_GCM, key.expose_secret())
            .map_err(|_| StoreError::Encryption("failed to create AES-256-GCM key".into()))?;
        Ok(aead::LessSafeKey::new(unbound))
    }
}

impl KeyAvailability for AesGcmCipher {
    fn has_key(&self) -> bool {
        self.key.is_some()
    }
}

impl Encryptor for AesGcmCipher {
    fn encrypt(&self, plaintext: &str) -> Result<EncryptedBlob, StoreError> {
        let key = self.sealing_key()?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);
        let nonce = aead::Nonce::assume_unique_for_key(nonce_bytes);

        let mut in_out = plaintext.as_bytes().to_vec();
        let Ok(tag) = key.seal_in_place_separate_tag(nonce, aead::Aad::from(HISTORY_AAD), &mut in_out)
        else {
            in_out.zeroize();
            return Err(StoreError::Encryption("AES-256-GCM encryption failed".into()));
        };

        let capacity = NONCE_LEN
            .saturating_add(in_out.len())
            .saturating_add(TAG_LEN);
        let mut sealed = Vec::with_capacity(capacity);
        sealed.extend_from_slice(&nonce_bytes);
        sealed.extend_from_slice(&in_out);
        sealed.extend_from_slice(tag.as_ref());

        Ok(EncryptedBlob::from_sealed(&sealed))
    }

    fn decrypt(&self, blob: &EncryptedBlob) -> Result<String, StoreError> {
        let key = self.sealing_key()?;
        let mut sealed = blob.to_sealed()?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        nonce_bytes.copy_from_slice(&sealed[..NONCE_LEN]);
        let nonce = aead::Nonce::assume_unique_for_key(nonce_bytes);

        let mut ct_tag = sealed.split_off(NONCE_LEN);
        let opened = key
            .open_in_place(nonce, aead::Aad::from(HISTORY_AAD), &mut ct_tag)
            .map(|plain| String::from_utf8(plain.to_vec()));
        ct_tag.zeroize();

        match opened {
            Ok(Ok(plaintext)) => Ok(plaintext),
            Ok(Err(not_utf8)) => {
                not_utf8.into_bytes().zeroize();
                Err(StoreError::Decryption)
            }
            Err(_) => Err(StoreError::Decryption),
        }
    }
}

impl fmt::Debug for AesGcmCipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AesGcmCipher")
            .field("key", &self.key.as_ref().map(|_| "***"))
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
