//! Persisted generator options.

use passforge_core::{
    enforce_policies, EnforcedPolicyOptions, GenerationOptions, PartialGenerationOptions,
    PolicySource,
};

use crate::error::StoreError;
use crate::state::{PersistentState, StorageOptions};

/// Disk key of the stored options.
const OPTIONS_KEY: &str = "passwordGenerationOptions";

/// Loads and saves the user's generator options for one scope.
#[derive(Debug)]
pub struct OptionsStore<S> {
    state: S,
    scope: String,
}

impl<S: PersistentState> OptionsStore<S> {
    /// Options for `scope`, stored in `state`.
    pub fn new(state: S, scope: &str) -> Self {
        Self {
            state,
            scope: scope.to_string(),
        }
    }

    /// The backing state.
    pub const fn state(&self) -> &S {
        &self.state
    }

    /// Load the stored options, fill gaps from the default table, write
    /// the completed options back, then apply the policies from `policies`.
    ///
    /// A stored value that no longer parses is replaced by the defaults.
    ///
    /// # Errors
    ///
    /// Backend and serialization errors from the read or the write-back.
    pub fn get_options<P: PolicySource + ?Sized>(
        &mut self,
        policies: &P,
    ) -> Result<(GenerationOptions, EnforcedPolicyOptions), StoreError> {
        let disk = StorageOptions::disk(&self.scope);
        let stored = match self.state.get(OPTIONS_KEY, &disk)? {
            Some(value) => serde_json::from_value::<PartialGenerationOptions>(value)
                .unwrap_or_else(|err| {
                    tracing::warn!(scope = %self.scope, error = %err, "stored options unreadable, using defaults");
                    PartialGenerationOptions::default()
                }),
            None => PartialGenerationOptions::default(),
        };

        let options = stored.resolve();
        self.state
            .set(OPTIONS_KEY, Some(serde_json::to_value(&options)?), &disk)?;

        Ok(enforce_policies(policies, options))
    }

    /// Persist `options` as given.
    ///
    /// # Errors
    ///
    /// Backend and serialization errors from the write.
    pub fn save_options(&mut self, options: &GenerationOptions) -> Result<(), StoreError> {
        self.state.set(
            OPTIONS_KEY,
            Some(serde_json::to_value(options)?),
            &StorageOptions::disk(&self.scope),
        )
    }
}
