//! Option clamping.
//!
//! [`normalize`] is the edit-time clamp applied whenever options are shown
//! or saved. [`sanitize_length`] is the shared length repair step; with
//! `for_generation` it also locks in one guaranteed character per enabled
//! class, which is what the password algorithm relies on.

use crate::charset::CharacterClass;
use crate::options::{GenerationOptions, DEFAULT_NUM_WORDS};
use crate::policy::EnforcedPolicyOptions;

/// Shortest length the editor accepts.
pub const MIN_EDIT_LENGTH: u32 = 5;

/// Longest length the editor accepts.
pub const MAX_EDIT_LENGTH: u32 = 128;

/// Largest per-class minimum the editor accepts for digits and symbols.
pub const MAX_EDIT_CLASS_MINIMUM: u32 = 9;

/// Largest passphrase word count the editor accepts.
pub const MAX_EDIT_NUM_WORDS: u32 = 20;

/// Length used when sanitization finds no usable length at all.
const FALLBACK_LENGTH: u32 = 10;

/// Clamp `options` into the editor's safe ranges and the enforced floors.
///
/// After this call `min_special + min_number <= length` holds, with the
/// special minimum yielding first.
pub fn normalize(options: &mut GenerationOptions, enforced: &EnforcedPolicyOptions) {
    options.min_lowercase = 0;
    options.min_uppercase = 0;

    let requested_length = options.length;
    options.length = options
        .length
        .clamp(MIN_EDIT_LENGTH, MAX_EDIT_LENGTH)
        .max(enforced.min_length);

    let class_cap = options.length.min(MAX_EDIT_CLASS_MINIMUM);
    options.min_number = options.min_number.min(class_cap).max(enforced.number_count);
    options.min_special = options
        .min_special
        .min(class_cap)
        .max(enforced.special_count);

    if options.min_special.saturating_add(options.min_number) > options.length {
        options.min_special = options.length.saturating_sub(options.min_number);
    }
    // An enforced digit count can exceed every other bound; length grows to fit it.
    options.length = options.length.max(options.min_number);

    if options.num_words == 0 {
        options.num_words = DEFAULT_NUM_WORDS;
    }
    options.num_words = options
        .num_words
        .min(MAX_EDIT_NUM_WORDS)
        .max(enforced.min_number_words);

    if let Some(first) = options.word_separator.chars().next() {
        if options.word_separator.chars().nth(1).is_some() {
            options.word_separator = first.to_string();
        }
    }

    sanitize_length(options, false);

    if options.length != requested_length {
        tracing::debug!(
            requested = requested_length,
            normalized = options.length,
            "password length normalized"
        );
    }
}

/// Make `length` large enough for every enabled class.
///
/// Each enabled class needs at least one character, or its stated minimum
/// when that is larger; disabled classes need none. A zero length falls
/// back to 10 before the check. With `for_generation` the per-class
/// minimums on `options` are overwritten with the computed ones; without
/// it only `length` changes.
pub fn sanitize_length(options: &mut GenerationOptions, for_generation: bool) {
    let required: Vec<(CharacterClass, u32)> = CharacterClass::ALL
        .iter()
        .map(|&class| {
            let needed = if class.is_enabled(options) {
                class.minimum(options).max(1)
            } else {
                0
            };
            (class, needed)
        })
        .collect();

    if options.length < 1 {
        options.length = FALLBACK_LENGTH;
    }

    let min_length = required
        .iter()
        .fold(0u32, |sum, &(_, needed)| sum.saturating_add(needed));
    options.length = options.length.max(min_length);

    if for_generation {
        for (class, needed) in required {
            class.set_minimum(options, needed);
        }
    }
}
