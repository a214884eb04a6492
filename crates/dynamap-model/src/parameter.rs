//! Captured expression parameters.

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// One literal captured during translation.
///
/// Created exactly once per literal; `requires_encryption` is copied from the
/// field's [`PropertyMetadata`](crate::metadata::PropertyMetadata) at capture
/// time and never mutated afterwards by the translation core. When the flag
/// is set, `value` still holds the plaintext (post-format) literal: the
/// caller substitutes ciphertext during the deferred-encryption handoff,
/// after translation and before the write is sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterMetadata {
    /// Value placeholder this parameter is bound to (e.g. `:p0`).
    pub placeholder: String,

    /// The captured literal, after format application.
    pub value: Value,

    /// Whether the caller must encrypt `value` before sending the write.
    pub requires_encryption: bool,

    /// Logical field name the literal was captured for.
    pub field_name: String,

    /// Storage attribute name the literal is written to.
    pub attribute_name: String,
}
