//! Translator configuration.
//!
//! Placeholder prefixes are configurable so embedders can namespace DynaMap's
//! placeholders away from hand-written expression fragments on the same
//! request. Defaults reproduce the canonical `#a0` / `:p0` scheme.

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Configuration for a [`Translator`](crate::expression::Translator).
///
/// # Examples
///
/// ```
/// use dynamap_core::config::TranslatorConfig;
///
/// let config = TranslatorConfig::default();
/// assert_eq!(config.name_prefix, "a");
/// assert_eq!(config.value_prefix, "p");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct TranslatorConfig {
    /// Identifier prefix for attribute-name placeholders (`#a0`, `#a1`, ...).
    #[builder(default = String::from("a"), setter(into))]
    pub name_prefix: String,

    /// Identifier prefix for value placeholders (`:p0`, `:p1`, ...).
    #[builder(default = String::from("p"), setter(into))]
    pub value_prefix: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            name_prefix: String::from("a"),
            value_prefix: String::from("p"),
        }
    }
}

impl TranslatorConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads the following environment variables (falling back to defaults):
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `DYNAMAP_NAME_PREFIX` | `a` |
    /// | `DYNAMAP_VALUE_PREFIX` | `p` |
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("DYNAMAP_NAME_PREFIX") {
            config.name_prefix = v;
        }
        if let Ok(v) = std::env::var("DYNAMAP_VALUE_PREFIX") {
            config.value_prefix = v;
        }

        config
    }
}
