//! `passforge-core` — Pure credential generation engine for PASSFORGE.
//!
//! Derives an effective generator configuration from user options and
//! organization policies, then produces a random password or passphrase.
//! Zero I/O: storage and encryption live in `passforge-store`.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;
pub mod random;

pub mod charset;
pub mod options;

pub mod policy;

pub mod normalize;

pub mod password;

pub use charset::{CharacterClass, SlotTag};
pub use error::GeneratorError;
pub use normalize::{normalize, sanitize_length};
pub use options::{
    GenerationOptions, GeneratorType, PartialGenerationOptions, DEFAULT_LENGTH, DEFAULT_NUM_WORDS,
    DEFAULT_WORD_SEPARATOR,
};
pub use password::passphrase::generate_passphrase;
pub use password::{generate_password, MAX_GENERATED_LENGTH};
pub use policy::{
    apply_policy, enforce_policies, merge_policies, EnforcedPolicyOptions,
    PasswordGeneratorPolicyData, PolicyRecord, PolicySource, PolicyType, StaticPolicySource,
};
pub use random::{shuffle, CryptoRandom, SecureRandom};
