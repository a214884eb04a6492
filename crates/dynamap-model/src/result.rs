//! Output of one translation call.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::parameter::ParameterMetadata;
use crate::request::UpdateItemRequest;
use crate::value::Value;

/// The complete result of translating one update description.
///
/// Consumed by the network client: `expression` and `attribute_names` go on
/// the wire as-is; `parameters` still carries plaintext for any
/// encryption-flagged literal and must go through the caller's
/// deferred-encryption handoff before a value table is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    /// The rendered update-expression string.
    pub expression: String,

    /// Attribute-name placeholder map (`#a0` -> real attribute name).
    pub attribute_names: HashMap<String, String>,

    /// All literals captured during translation, in capture order.
    pub parameters: Vec<ParameterMetadata>,
}

impl TranslationResult {
    /// Returns `true` if any captured parameter is flagged for deferred
    /// encryption.
    #[must_use]
    pub fn has_deferred_encryption(&self) -> bool {
        self.parameters.iter().any(|p| p.requires_encryption)
    }

    /// Assemble the plaintext `:placeholder -> value` table.
    ///
    /// Only safe to send when [`has_deferred_encryption`] is `false`;
    /// otherwise the caller must run the deferred-encryption handoff and use
    /// the sealed table it produces instead.
    ///
    /// [`has_deferred_encryption`]: Self::has_deferred_encryption
    #[must_use]
    pub fn value_map(&self) -> HashMap<String, Value> {
        self.parameters
            .iter()
            .map(|p| (p.placeholder.clone(), p.value.clone()))
            .collect()
    }

    /// Assemble the final `UpdateItem` request payload.
    ///
    /// `values` is the sealed value table: either [`value_map`] when nothing
    /// was flagged for encryption, or the output of the caller's
    /// deferred-encryption handoff.
    ///
    /// [`value_map`]: Self::value_map
    #[must_use]
    pub fn into_request(
        self,
        table_name: impl Into<String>,
        key: HashMap<String, Value>,
        values: HashMap<String, Value>,
    ) -> UpdateItemRequest {
        UpdateItemRequest {
            table_name: table_name.into(),
            key,
            update_expression: if self.expression.is_empty() {
                None
            } else {
                Some(self.expression)
            },
            condition_expression: None,
            expression_attribute_names: self.attribute_names,
            expression_attribute_values: values,
        }
    }
}
