//! Translation error taxonomy.
//!
//! The translator fails fast: the first error wins and no partial result is
//! produced, because a partially-rendered update expression could silently
//! drop a clause. Every variant carries enough context for the caller to
//! build an actionable message without re-deriving it.

use dynamap_model::Value;

/// Errors produced while translating an update description.
#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    /// The update expression for a field falls outside the supported set of
    /// shapes. No best-effort translation is attempted.
    #[error("unsupported update expression for field {field_name}: {shape}")]
    UnsupportedShape {
        /// The targeted logical field name.
        field_name: String,
        /// A rendering of the rejected (sub-)expression.
        shape: String,
    },

    /// The update targets a field with no metadata entry.
    #[error("no property metadata for field: {field_name}")]
    UnknownField {
        /// The unknown logical field name.
        field_name: String,
    },

    /// Two clauses target the same storage attribute. The store forbids an
    /// attribute from appearing in more than one clause of a single request,
    /// so this is caught before rendering.
    #[error("attribute targeted by more than one update clause: {attribute_name}")]
    DuplicateAttribute {
        /// The doubly-targeted storage attribute name.
        attribute_name: String,
    },

    /// A format string could not be applied to a captured literal.
    #[error(
        "cannot apply format {format:?} to field {field_name} \
         (attribute {attribute_name}, value {value}): {reason}"
    )]
    FormatFailed {
        /// The targeted logical field name.
        field_name: String,
        /// The storage attribute name.
        attribute_name: String,
        /// The format string from the property metadata.
        format: String,
        /// The literal the format was applied to.
        value: Value,
        /// Why format application failed.
        reason: String,
    },
}
