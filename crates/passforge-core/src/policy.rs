//! Organization password-generator policies.
//!
//! A user may belong to several organizations, each publishing its own
//! generator policy. [`merge_policies`] folds every enabled policy into one
//! [`EnforcedPolicyOptions`] (the strictest combination), and
//! [`apply_policy`] raises a user's options to meet it. Both are pure: the
//! enforced value is derived fresh on every call and never cached.

use serde::{Deserialize, Serialize};

use crate::options::{GenerationOptions, GeneratorType};

// ---------------------------------------------------------------------------
// Policy records
// ---------------------------------------------------------------------------

/// Kind of organization policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PolicyType {
    /// Master password complexity requirements.
    MasterPassword,
    /// Password generator constraints.
    PasswordGenerator,
    /// Require two-step login.
    TwoFactorAuthentication,
}

/// Structured payload of a password-generator policy.
///
/// Every field is optional in the source JSON; missing booleans read as
/// `false` and missing minimums as `0`, which are neutral for the merge.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PasswordGeneratorPolicyData {
    pub default_type: Option<GeneratorType>,
    pub min_length: u32,
    pub use_upper: bool,
    pub use_lower: bool,
    pub use_numbers: bool,
    pub min_numbers: u32,
    pub use_special: bool,
    pub min_special: u32,
    pub min_number_words: u32,
    pub capitalize: bool,
    pub include_number: bool,
}

/// One organization's policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyRecord {
    /// Which policy this is.
    #[serde(rename = "type")]
    pub policy_type: PolicyType,
    /// Disabled policies are ignored.
    pub enabled: bool,
    /// Generator constraints; records without data are ignored.
    #[serde(default)]
    pub data: Option<PasswordGeneratorPolicyData>,
}

/// Supplies the policies that apply to the current user.
pub trait PolicySource {
    /// All policies of `policy_type` across the user's organizations.
    fn get_all(&self, policy_type: PolicyType) -> Vec<PolicyRecord>;
}

/// [`PolicySource`] over a fixed list of records.
#[derive(Debug, Clone, Default)]
pub struct StaticPolicySource {
    records: Vec<PolicyRecord>,
}

impl StaticPolicySource {
    /// Wrap an owned list of records.
    #[must_use]
    pub const fn new(records: Vec<PolicyRecord>) -> Self {
        Self { records }
    }
}

impl PolicySource for StaticPolicySource {
    fn get_all(&self, policy_type: PolicyType) -> Vec<PolicyRecord> {
        self.records
            .iter()
            .filter(|r| r.policy_type == policy_type)
            .cloned()
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Enforced options
// ---------------------------------------------------------------------------

/// The strictest combination of all applicable generator policies.
///
/// Always derived, never persisted. The all-zero [`Default`] is the inert
/// value used when no policy applies.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnforcedPolicyOptions {
    /// Forced generator type. `Password` wins when organizations disagree.
    pub default_type: Option<GeneratorType>,
    pub min_length: u32,
    pub use_uppercase: bool,
    pub use_lowercase: bool,
    pub use_numbers: bool,
    pub number_count: u32,
    pub use_special: bool,
    pub special_count: u32,
    pub min_number_words: u32,
    pub capitalize: bool,
    pub include_number: bool,
}

impl EnforcedPolicyOptions {
    /// Whether any constraint is active.
    #[must_use]
    pub const fn in_effect(&self) -> bool {
        self.default_type.is_some()
            || self.min_length > 0
            || self.number_count > 0
            || self.special_count > 0
            || self.use_uppercase
            || self.use_lowercase
            || self.use_numbers
            || self.use_special
            || self.min_number_words > 0
            || self.capitalize
            || self.include_number
    }

    fn absorb(&mut self, data: &PasswordGeneratorPolicyData) {
        // Once a policy forces "password", later "passphrase" values are ignored.
        if data.default_type.is_some() && self.default_type != Some(GeneratorType::Password) {
            self.default_type = data.default_type;
        }

        self.min_length = self.min_length.max(data.min_length);
        self.use_uppercase |= data.use_upper;
        self.use_lowercase |= data.use_lower;
        self.use_numbers |= data.use_numbers;
        self.number_count = self.number_count.max(data.min_numbers);
        self.use_special |= data.use_special;
        self.special_count = self.special_count.max(data.min_special);
        self.min_number_words = self.min_number_words.max(data.min_number_words);
        self.capitalize |= data.capitalize;
        self.include_number |= data.include_number;
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Fold every enabled policy with data into one [`EnforcedPolicyOptions`].
///
/// Booleans are OR-ed, minimums take the running maximum, and the default
/// type is adopted from the first record that sets one unless a previous
/// record already forced `Password`. Returns `None` when no enabled record
/// carries data.
#[must_use]
pub fn merge_policies(policies: &[PolicyRecord]) -> Option<EnforcedPolicyOptions> {
    let mut enforced: Option<EnforcedPolicyOptions> = None;
    let mut applied = 0usize;

    for data in policies
        .iter()
        .filter(|p| p.enabled)
        .filter_map(|p| p.data.as_ref())
    {
        enforced.get_or_insert_with(EnforcedPolicyOptions::default).absorb(data);
        applied = applied.saturating_add(1);
    }

    if let Some(ref e) = enforced {
        tracing::debug!(
            policies = applied,
            default_type = ?e.default_type,
            min_length = e.min_length,
            "merged generator policies"
        );
    }
    enforced
}

/// Raise `options` to satisfy `enforced`.
///
/// Every constraint only ever raises a value, never lowers it. Afterwards,
/// if the special and number minimums no longer fit in `length`, the
/// special minimum yields. A forced default type replaces the user's
/// choice. Without a policy the options come back unchanged, paired with
/// the inert all-zero enforced value.
#[must_use]
pub fn apply_policy(
    mut options: GenerationOptions,
    enforced: Option<&EnforcedPolicyOptions>,
) -> (GenerationOptions, EnforcedPolicyOptions) {
    let Some(enforced) = enforced else {
        return (options, EnforcedPolicyOptions::default());
    };

    options.length = options.length.max(enforced.min_length);

    if enforced.use_uppercase {
        options.uppercase = true;
    }
    if enforced.use_lowercase {
        options.lowercase = true;
    }
    if enforced.use_numbers {
        options.number = true;
    }
    options.min_number = options.min_number.max(enforced.number_count);

    if enforced.use_special {
        options.special = true;
    }
    options.min_special = options.min_special.max(enforced.special_count);

    if options.min_special.saturating_add(options.min_number) > options.length {
        options.min_special = options.length.saturating_sub(options.min_number);
    }

    options.num_words = options.num_words.max(enforced.min_number_words);
    if enforced.capitalize {
        options.capitalize = true;
    }
    if enforced.include_number {
        options.include_number = true;
    }

    if let Some(kind) = enforced.default_type {
        options.kind = kind;
    }

    (options, enforced.clone())
}

/// Fetch the generator policies from `source`, merge and apply them.
#[must_use]
pub fn enforce_policies<P: PolicySource + ?Sized>(
    source: &P,
    options: GenerationOptions,
) -> (GenerationOptions, EnforcedPolicyOptions) {
    let policies = source.get_all(PolicyType::PasswordGenerator);
    let merged = merge_policies(&policies);
    apply_policy(options, merged.as_ref())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn record(data: PasswordGeneratorPolicyData) -> PolicyRecord {
        PolicyRecord {
            policy_type: PolicyType::PasswordGenerator,
            enabled: true,
            data: Some(data),
        }
    }

    fn typed(kind: GeneratorType) -> PolicyRecord {
        record(PasswordGeneratorPolicyData {
            default_type: Some(kind),
            ..PasswordGeneratorPolicyData::default()
        })
    }

    // ── merge_policies ────────────────────────────────────────────

    #[test]
    fn merge_empty_is_none() {
        assert_eq!(merge_policies(&[]), None);
    }

    #[test]
    fn merge_ignores_disabled_and_dataless_records() {
        let disabled = PolicyRecord {
            enabled: false,
            ..record(PasswordGeneratorPolicyData {
                min_length: 30,
                ..PasswordGeneratorPolicyData::default()
            })
        };
        let dataless = PolicyRecord {
            policy_type: PolicyType::PasswordGenerator,
            enabled: true,
            data: None,
        };
        assert_eq!(merge_policies(&[disabled, dataless]), None);
    }

    #[test]
    fn merge_takes_maximum_and_or() {
        let a = record(PasswordGeneratorPolicyData {
            min_length: 12,
            use_upper: true,
            min_numbers: 4,
            ..PasswordGeneratorPolicyData::default()
        });
        let b = record(PasswordGeneratorPolicyData {
            min_length: 20,
            use_special: true,
            min_numbers: 2,
            min_special: 3,
            min_number_words: 5,
            include_number: true,
            ..PasswordGeneratorPolicyData::default()
        });
        let merged = merge_policies(&[a.clone(), b.clone()]).unwrap();
        assert_eq!(merged.min_length, 20);
        assert_eq!(merged.number_count, 4);
        assert_eq!(merged.special_count, 3);
        assert_eq!(merged.min_number_words, 5);
        assert!(merged.use_uppercase && merged.use_special && merged.include_number);
        assert!(!merged.use_lowercase && !merged.capitalize);

        // OR/max fields are order-independent.
        assert_eq!(merge_policies(&[b, a]).unwrap(), merged);
    }

    #[test]
    fn password_wins_over_later_passphrase() {
        let merged =
            merge_policies(&[typed(GeneratorType::Password), typed(GeneratorType::Passphrase)])
                .unwrap();
        assert_eq!(merged.default_type, Some(GeneratorType::Password));
    }

    #[test]
    fn password_wins_over_earlier_passphrase() {
        let merged =
            merge_policies(&[typed(GeneratorType::Passphrase), typed(GeneratorType::Password)])
                .unwrap();
        assert_eq!(merged.default_type, Some(GeneratorType::Password));
    }

    #[test]
    fn untyped_record_keeps_earlier_type() {
        let merged = merge_policies(&[
            typed(GeneratorType::Passphrase),
            record(PasswordGeneratorPolicyData::default()),
        ])
        .unwrap();
        assert_eq!(merged.default_type, Some(GeneratorType::Passphrase));
    }

    #[test]
    fn merge_does_not_touch_inputs() {
        let records = vec![typed(GeneratorType::Passphrase)];
        let before = records.clone();
        let _ = merge_policies(&records);
        assert_eq!(records, before);
    }

    #[test]
    fn in_effect_reflects_constraints() {
        assert!(!EnforcedPolicyOptions::default().in_effect());
        let e = EnforcedPolicyOptions {
            capitalize: true,
            ..EnforcedPolicyOptions::default()
        };
        assert!(e.in_effect());
    }

    #[test]
    fn policy_record_parses_from_json() {
        let json = r#"{
            "type": "passwordGenerator",
            "enabled": true,
            "data": { "defaultType": "passphrase", "minLength": 16, "useSpecial": true }
        }"#;
        let r: PolicyRecord = serde_json::from_str(json).unwrap();
        let data = r.data.unwrap();
        assert_eq!(data.default_type, Some(GeneratorType::Passphrase));
        assert_eq!(data.min_length, 16);
        assert!(data.use_special);
        assert_eq!(data.min_numbers, 0);
    }

    // ── apply_policy ──────────────────────────────────────────────

    #[test]
    fn apply_without_policy_is_identity() {
        let options = GenerationOptions::default();
        let (out, enforced) = apply_policy(options.clone(), None);
        assert_eq!(out, options);
        assert_eq!(enforced, EnforcedPolicyOptions::default());
    }

    #[test]
    fn apply_raises_but_never_lowers() {
        let options = GenerationOptions {
            length: 40,
            min_number: 5,
            num_words: 8,
            ..GenerationOptions::default()
        };
        let enforced = EnforcedPolicyOptions {
            min_length: 12,
            number_count: 2,
            min_number_words: 4,
            ..EnforcedPolicyOptions::default()
        };
        let (out, _) = apply_policy(options, Some(&enforced));
        assert_eq!(out.length, 40);
        assert_eq!(out.min_number, 5);
        assert_eq!(out.num_words, 8);
    }

    #[test]
    fn apply_turns_on_required_classes_and_flags() {
        let options = GenerationOptions {
            uppercase: false,
            lowercase: false,
            number: false,
            special: false,
            ..GenerationOptions::default()
        };
        let enforced = EnforcedPolicyOptions {
            use_uppercase: true,
            use_lowercase: true,
            use_numbers: true,
            use_special: true,
            capitalize: true,
            include_number: true,
            ..EnforcedPolicyOptions::default()
        };
        let (out, _) = apply_policy(options, Some(&enforced));
        assert!(out.uppercase && out.lowercase && out.number && out.special);
        assert!(out.capitalize && out.include_number);
    }

    #[test]
    fn special_yields_to_numbers_when_over_length() {
        let options = GenerationOptions {
            length: 10,
            min_number: 1,
            min_special: 1,
            ..GenerationOptions::default()
        };
        let enforced = EnforcedPolicyOptions {
            number_count: 7,
            special_count: 6,
            ..EnforcedPolicyOptions::default()
        };
        let (out, _) = apply_policy(options, Some(&enforced));
        assert_eq!(out.min_number, 7);
        assert_eq!(out.min_special, 3);
    }

    #[test]
    fn forced_type_overrides_user_choice() {
        let options = GenerationOptions {
            kind: GeneratorType::Password,
            ..GenerationOptions::default()
        };
        let enforced = EnforcedPolicyOptions {
            default_type: Some(GeneratorType::Passphrase),
            ..EnforcedPolicyOptions::default()
        };
        let (out, echoed) = apply_policy(options, Some(&enforced));
        assert_eq!(out.kind, GeneratorType::Passphrase);
        assert_eq!(echoed, enforced);
    }

    #[test]
    fn enforce_reads_only_generator_policies() {
        let source = StaticPolicySource::new(vec![
            PolicyRecord {
                policy_type: PolicyType::MasterPassword,
                enabled: true,
                data: Some(PasswordGeneratorPolicyData {
                    min_length: 99,
                    ..PasswordGeneratorPolicyData::default()
                }),
            },
            record(PasswordGeneratorPolicyData {
                min_length: 20,
                ..PasswordGeneratorPolicyData::default()
            }),
        ]);
        let (out, enforced) = enforce_policies(&source, GenerationOptions::default());
        assert_eq!(enforced.min_length, 20);
        assert_eq!(out.length, 20);
    }
}
