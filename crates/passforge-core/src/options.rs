//! Generator option types and the default table.
//!
//! [`GenerationOptions`] is the fully resolved record every operation works
//! on. [`PartialGenerationOptions`] is the stored or caller-supplied form in
//! which any field may be missing; [`PartialGenerationOptions::resolve`]
//! overlays it onto [`GenerationOptions::default`].

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Default password length.
pub const DEFAULT_LENGTH: u32 = 14;

/// Default passphrase word count.
pub const DEFAULT_NUM_WORDS: u32 = 3;

/// Default passphrase word separator.
pub const DEFAULT_WORD_SEPARATOR: &str = "-";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which kind of secret to generate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GeneratorType {
    /// Character-class password.
    #[default]
    Password,
    /// Word-list passphrase.
    Passphrase,
}

/// Fully resolved generator options.
///
/// Counts are unsigned, so "minimum >= 0" holds by construction. The
/// relationship between minimums and `length` is restored by
/// [`crate::normalize`] and [`crate::sanitize_length`].
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationOptions {
    /// Password or passphrase.
    #[serde(rename = "type")]
    pub kind: GeneratorType,
    /// Password length in code points.
    pub length: u32,
    /// Include visually ambiguous glyphs (`l`, `I`, `O`, `0`, `1`).
    #[serde(rename = "ambiguous")]
    pub allow_ambiguous: bool,

    /// Include uppercase letters.
    pub uppercase: bool,
    /// Guaranteed uppercase letters.
    pub min_uppercase: u32,
    /// Include lowercase letters.
    pub lowercase: bool,
    /// Guaranteed lowercase letters.
    pub min_lowercase: u32,
    /// Include digits.
    pub number: bool,
    /// Guaranteed digits.
    pub min_number: u32,
    /// Include ASCII symbols.
    pub special: bool,
    /// Guaranteed ASCII symbols.
    pub min_special: u32,
    /// Include CJK ideographs.
    pub ideographs: bool,
    /// Guaranteed CJK ideographs.
    pub min_ideographs: u32,
    /// Include kana.
    pub kana: bool,
    /// Guaranteed kana.
    pub min_kana: u32,
    /// Include emoji.
    pub emoji: bool,
    /// Guaranteed emoji.
    pub min_emoji: u32,

    /// Passphrase word count.
    pub num_words: u32,
    /// Passphrase separator (one character after normalization).
    pub word_separator: String,
    /// Capitalize the first letter of each passphrase word.
    pub capitalize: bool,
    /// Append a digit to one random passphrase word.
    pub include_number: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            kind: GeneratorType::Password,
            length: DEFAULT_LENGTH,
            allow_ambiguous: false,
            uppercase: true,
            min_uppercase: 0,
            lowercase: true,
            min_lowercase: 0,
            number: true,
            min_number: 1,
            special: false,
            min_special: 1,
            ideographs: false,
            min_ideographs: 1,
            kana: false,
            min_kana: 1,
            emoji: false,
            min_emoji: 1,
            num_words: DEFAULT_NUM_WORDS,
            word_separator: DEFAULT_WORD_SEPARATOR.to_string(),
            capitalize: false,
            include_number: false,
        }
    }
}

/// Generator options where every field is optional.
///
/// This is what gets persisted and what callers may hand in; missing fields
/// take their value from the default table on [`resolve`](Self::resolve).
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialGenerationOptions {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<GeneratorType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(rename = "ambiguous", skip_serializing_if = "Option::is_none")]
    pub allow_ambiguous: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uppercase: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_uppercase: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowercase: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_lowercase: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_special: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ideographs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_ideographs: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kana: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_kana: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_emoji: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_words: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_separator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capitalize: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_number: Option<bool>,
}

impl PartialGenerationOptions {
    /// Overlay the present fields onto the default table.
    #[must_use]
    pub fn resolve(self) -> GenerationOptions {
        let d = GenerationOptions::default();
        GenerationOptions {
            kind: self.kind.unwrap_or(d.kind),
            length: self.length.unwrap_or(d.length),
            allow_ambiguous: self.allow_ambiguous.unwrap_or(d.allow_ambiguous),
            uppercase: self.uppercase.unwrap_or(d.uppercase),
            min_uppercase: self.min_uppercase.unwrap_or(d.min_uppercase),
            lowercase: self.lowercase.unwrap_or(d.lowercase),
            min_lowercase: self.min_lowercase.unwrap_or(d.min_lowercase),
            number: self.number.unwrap_or(d.number),
            min_number: self.min_number.unwrap_or(d.min_number),
            special: self.special.unwrap_or(d.special),
            min_special: self.min_special.unwrap_or(d.min_special),
            ideographs: self.ideographs.unwrap_or(d.ideographs),
            min_ideographs: self.min_ideographs.unwrap_or(d.min_ideographs),
            kana: self.kana.unwrap_or(d.kana),
            min_kana: self.min_kana.unwrap_or(d.min_kana),
            emoji: self.emoji.unwrap_or(d.emoji),
            min_emoji: self.min_emoji.unwrap_or(d.min_emoji),
            num_words: self.num_words.unwrap_or(d.num_words),
            word_separator: self.word_separator.unwrap_or(d.word_separator),
            capitalize: self.capitalize.unwrap_or(d.capitalize),
            include_number: self.include_number.unwrap_or(d.include_number),
        }
    }
}

impl From<GenerationOptions> for PartialGenerationOptions {
    fn from(o: GenerationOptions) -> Self {
        Self {
            kind: Some(o.kind),
            length: Some(o.length),
            allow_ambiguous: Some(o.allow_ambiguous),
            uppercase: Some(o.uppercase),
            min_uppercase: Some(o.min_uppercase),
            lowercase: Some(o.lowercase),
            min_lowercase: Some(o.min_lowercase),
            number: Some(o.number),
            min_number: Some(o.min_number),
            special: Some(o.special),
            min_special: Some(o.min_special),
            ideographs: Some(o.ideographs),
            min_ideographs: Some(o.min_ideographs),
            kana: Some(o.kana),
            min_kana: Some(o.min_kana),
            emoji: Some(o.emoji),
            min_emoji: Some(o.min_emoji),
            num_words: Some(o.num_words),
            word_separator: Some(o.word_separator),
            capitalize: Some(o.capitalize),
            include_number: Some(o.include_number),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────
