//! Passphrase vocabulary.
//!
//! 7776 distinct lowercase words of three to nine letters, so each word
//! drawn adds log2(7776) ≈ 12.9 bits to a passphrase. The list ships inside
//! the binary, one word per line, and is split into a slice the first time
//! a passphrase is generated.

use std::sync::OnceLock;

/// Number of words in the vocabulary (6^5, one per five-dice roll).
pub const WORDLIST_SIZE: usize = 7776;

const WORDS_RAW: &str = include_str!("wordlists/words.txt");

static WORDS: OnceLock<Box<[&'static str]>> = OnceLock::new();

/// The vocabulary, in sorted order.
///
/// # Panics
///
/// Panics if the embedded file does not hold exactly [`WORDLIST_SIZE`]
/// non-blank lines, so a truncated list can never weaken passphrases
/// silently.
#[must_use]
pub fn words() -> &'static [&'static str] {
    WORDS.get_or_init(|| {
        let words: Vec<&'static str> = WORDS_RAW
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .collect();
        assert!(
            words.len() == WORDLIST_SIZE,
            "passphrase vocabulary needs {WORDLIST_SIZE} words, found {}",
            words.len()
        );
        words.into_boxed_slice()
    })
}
