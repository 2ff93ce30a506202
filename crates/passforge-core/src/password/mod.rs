//! Secret generation.
//!
//! A password is planned as a list of slots, one per guaranteed class
//! character plus "any enabled class" filler, shuffled, then filled one
//! code point at a time. Passphrase options are routed to [`passphrase`],
//! which draws words from [`wordlist`].

pub mod passphrase;
pub mod wordlist;

use std::collections::HashMap;

use crate::charset::{CharacterClass, SlotTag};
use crate::error::GeneratorError;
use crate::normalize::sanitize_length;
use crate::options::{GenerationOptions, GeneratorType};
use crate::random::{shuffle, SecureRandom};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Generate a secret according to `options`.
///
/// Passphrase options are delegated to [`passphrase::generate_passphrase`].
/// For passwords:
///
/// 1. Length is sanitized and every enabled class is locked to at least one
///    guaranteed character.
/// 2. A slot-assignment list is built: one tag per guaranteed character, in
///    class order, padded to `length` with "any enabled class" tags.
/// 3. The list is Fisher-Yates shuffled.
/// 4. Each slot samples one code point uniformly from its class.
///
/// The result is exactly `length` code points long. `options` is not
/// modified.
///
/// # Errors
///
/// Returns [`GeneratorError::Configuration`] if a slot resolves to an empty
/// character set, which only happens when every class is disabled, or if
/// the sanitized length exceeds [`MAX_GENERATED_LENGTH`].
pub fn generate_password<R: SecureRandom + ?Sized>(
    options: &GenerationOptions,
    rng: &mut R,
) -> Result<String, GeneratorError> {
    if options.kind == GeneratorType::Passphrase {
        return Ok(passphrase::generate_passphrase(options, rng));
    }

    let mut o = options.clone();
    sanitize_length(&mut o, true);

    let min_length = CharacterClass::ALL
        .iter()
        .fold(0u32, |sum, class| sum.saturating_add(class.minimum(&o)));
    o.length = o.length.max(min_length);

    let mut slots = slot_assignments(&o)?;
    shuffle(&mut slots, rng);

    let mut sets: HashMap<SlotTag, Vec<char>> = HashMap::new();
    let mut password = String::with_capacity(slots.len());
    for tag in slots {
        let set = sets.entry(tag).or_insert_with(|| tag.resolve(&o));
        if set.is_empty() {
            return Err(GeneratorError::Configuration(
                "at least one character class must be enabled".to_string(),
            ));
        }
        let index = rng.next_in_range(0, set.len().saturating_sub(1));
        password.push(set[index]);
    }

    Ok(password)
}

/// Largest password length the generator will plan for.
///
/// Normalized options never exceed 128 plus the class minimums; anything
/// past this bound means the options skipped normalization.
pub const MAX_GENERATED_LENGTH: u32 = 4096;

/// Build the unshuffled per-position plan for a sanitized `options`.
fn slot_assignments(options: &GenerationOptions) -> Result<Vec<SlotTag>, GeneratorError> {
    if options.length > MAX_GENERATED_LENGTH {
        return Err(GeneratorError::Configuration(format!(
            "length {} exceeds {MAX_GENERATED_LENGTH}",
            options.length
        )));
    }
    let length = usize::try_from(options.length)
        .map_err(|_| GeneratorError::Configuration("length does not fit in memory".into()))?;

    let mut slots = Vec::with_capacity(length);
    for class in CharacterClass::ALL {
        if !class.is_enabled(options) {
            continue;
        }
        let count = usize::try_from(class.minimum(options)).unwrap_or(0);
        slots.extend(std::iter::repeat(SlotTag::Class(class)).take(count));
    }

    if slots.len() > length {
        return Err(GeneratorError::Configuration(format!(
            "{} guaranteed characters exceed length {length}",
            slots.len()
        )));
    }
    slots.resize(length, SlotTag::Any);
    Ok(slots)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::CryptoRandom;
    use std::collections::HashSet;

    fn count_in(password: &str, class: CharacterClass) -> usize {
        password.chars().filter(|c| class.contains(*c)).count()
    }

    #[test]
    fn default_options_produce_default_length() {
        let pw = generate_password(&GenerationOptions::default(), &mut CryptoRandom::os()).unwrap();
        assert_eq!(pw.chars().count(), 14);
    }

    #[test]
    fn contains_every_enabled_class() {
        let options = GenerationOptions {
            length: 12,
            special: true,
            ..GenerationOptions::default()
        };
        for _ in 0..50 {
            let pw = generate_password(&options, &mut CryptoRandom::os()).unwrap();
            for class in [
                CharacterClass::Lowercase,
                CharacterClass::Uppercase,
                CharacterClass::Number,
                CharacterClass::Special,
            ] {
                assert!(count_in(&pw, class) >= 1, "missing {class:?} in: {pw}");
            }
        }
    }

    #[test]
    fn honours_large_minimums() {
        let options = GenerationOptions {
            length: 20,
            min_number: 6,
            special: true,
            min_special: 5,
            ..GenerationOptions::default()
        };
        for _ in 0..20 {
            let pw = generate_password(&options, &mut CryptoRandom::os()).unwrap();
            assert_eq!(pw.chars().count(), 20);
            assert!(count_in(&pw, CharacterClass::Number) >= 6, "{pw}");
            assert!(count_in(&pw, CharacterClass::Special) >= 5, "{pw}");
        }
    }

    #[test]
    fn length_grows_to_fit_minimums() {
        let options = GenerationOptions {
            length: 4,
            min_number: 5,
            special: true,
            min_special: 5,
            ..GenerationOptions::default()
        };
        let pw = generate_password(&options, &mut CryptoRandom::os()).unwrap();
        // 1 lower + 1 upper + 5 digits + 5 symbols
        assert_eq!(pw.chars().count(), 12);
    }

    #[test]
    fn wide_classes_counted_by_code_point() {
        let options = GenerationOptions {
            length: 16,
            lowercase: false,
            uppercase: false,
            number: false,
            ideographs: true,
            min_ideographs: 4,
            kana: true,
            min_kana: 4,
            emoji: true,
            min_emoji: 4,
            ..GenerationOptions::default()
        };
        let pw = generate_password(&options, &mut CryptoRandom::os()).unwrap();
        assert_eq!(pw.chars().count(), 16);
        assert!(pw.len() > 16, "multi-byte classes must not be byte-indexed");
        assert!(count_in(&pw, CharacterClass::Ideograph) >= 4);
        assert!(count_in(&pw, CharacterClass::Kana) >= 4);
        assert!(count_in(&pw, CharacterClass::Emoji) >= 4);
    }

    #[test]
    fn disabled_classes_never_appear() {
        let options = GenerationOptions {
            length: 64,
            uppercase: false,
            number: false,
            ..GenerationOptions::default()
        };
        let pw = generate_password(&options, &mut CryptoRandom::os()).unwrap();
        assert!(pw.chars().all(|c| CharacterClass::Lowercase.contains(c)), "{pw}");
    }

    #[test]
    fn ambiguous_glyphs_absent_by_default() {
        let pw = generate_password(
            &GenerationOptions {
                length: 128,
                ..GenerationOptions::default()
            },
            &mut CryptoRandom::os(),
        )
        .unwrap();
        assert!(!pw.contains(['l', 'I', 'O', '0', '1']), "{pw}");
    }

    #[test]
    fn no_enabled_class_is_a_configuration_error() {
        let options = GenerationOptions {
            lowercase: false,
            uppercase: false,
            number: false,
            ..GenerationOptions::default()
        };
        let err = generate_password(&options, &mut CryptoRandom::os()).unwrap_err();
        assert!(matches!(err, GeneratorError::Configuration(_)));
    }

    #[test]
    fn oversized_options_rejected_before_allocating() {
        for options in [
            GenerationOptions {
                kana: true,
                min_kana: u32::MAX,
                ..GenerationOptions::default()
            },
            GenerationOptions {
                length: u32::MAX,
                ..GenerationOptions::default()
            },
        ] {
            let err = generate_password(&options, &mut CryptoRandom::os()).unwrap_err();
            assert!(matches!(err, GeneratorError::Configuration(_)), "{err}");
        }
    }

    #[test]
    fn largest_allowed_length_generates() {
        let options = GenerationOptions {
            length: MAX_GENERATED_LENGTH,
            ..GenerationOptions::default()
        };
        let pw = generate_password(&options, &mut CryptoRandom::os()).unwrap();
        assert_eq!(pw.chars().count(), 4096);
    }

    #[test]
    fn passphrase_kind_delegates() {
        let options = GenerationOptions {
            kind: GeneratorType::Passphrase,
            num_words: 4,
            word_separator: "_".into(),
            ..GenerationOptions::default()
        };
        let pp = generate_password(&options, &mut CryptoRandom::os()).unwrap();
        assert_eq!(pp.split('_').count(), 4);
    }

    #[test]
    fn caller_options_untouched() {
        let options = GenerationOptions {
            length: 2,
            ..GenerationOptions::default()
        };
        let before = options.clone();
        let _ = generate_password(&options, &mut CryptoRandom::os()).unwrap();
        assert_eq!(options, before);
    }

    #[test]
    fn slot_plan_is_ordered_before_shuffle() {
        let mut o = GenerationOptions {
            length: 6,
            special: true,
            ..GenerationOptions::default()
        };
        sanitize_length(&mut o, true);
        let slots = slot_assignments(&o).unwrap();
        assert_eq!(
            slots,
            vec![
                SlotTag::Class(CharacterClass::Lowercase),
                SlotTag::Class(CharacterClass::Uppercase),
                SlotTag::Class(CharacterClass::Number),
                SlotTag::Class(CharacterClass::Special),
                SlotTag::Any,
                SlotTag::Any,
            ]
        );
    }

    #[test]
    fn uniqueness_random() {
        let passwords: HashSet<String> = (0..100)
            .map(|_| {
                generate_password(&GenerationOptions::default(), &mut CryptoRandom::os()).unwrap()
            })
            .collect();
        assert_eq!(passwords.len(), 100, "generated duplicate passwords");
    }
}
