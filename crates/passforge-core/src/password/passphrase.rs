//! Word-list passphrase generation.

use crate::options::{GenerationOptions, DEFAULT_NUM_WORDS};
use crate::random::SecureRandom;

use super::wordlist;

/// Separator used when the configured one is empty or longer than one
/// character.
const FALLBACK_SEPARATOR: &str = " ";

/// Generate a passphrase from the embedded wordlist.
///
/// Words are drawn independently and with replacement, so a word may
/// repeat. A word count of two or less falls back to three. With
/// `include_number`, one random word gets a random digit `0-9` appended.
#[must_use]
pub fn generate_passphrase<R: SecureRandom + ?Sized>(
    options: &GenerationOptions,
    rng: &mut R,
) -> String {
    let num_words = if options.num_words <= 2 {
        DEFAULT_NUM_WORDS
    } else {
        options.num_words
    };

    let separator = if options.word_separator.chars().count() == 1 {
        options.word_separator.as_str()
    } else {
        FALLBACK_SEPARATOR
    };

    let list = wordlist::words();
    let last = list.len().saturating_sub(1);

    let mut words: Vec<String> = (0..num_words)
        .map(|_| {
            let word = list[rng.next_in_range(0, last)];
            if options.capitalize {
                capitalize(word)
            } else {
                word.to_string()
            }
        })
        .collect();

    if options.include_number {
        append_random_digit(&mut words, rng);
    }

    words.join(separator)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |c| {
        c.to_uppercase().collect::<String>() + chars.as_str()
    })
}

fn append_random_digit<R: SecureRandom + ?Sized>(words: &mut [String], rng: &mut R) {
    if words.is_empty() {
        return;
    }
    let index = rng.next_in_range(0, words.len().saturating_sub(1));
    let digit = u32::try_from(rng.next_in_range(0, 9))
        .ok()
        .and_then(|d| char::from_digit(d, 10))
        .unwrap_or('0');
    if let Some(word) = words.get_mut(index) {
        word.push(digit);
    }
}
