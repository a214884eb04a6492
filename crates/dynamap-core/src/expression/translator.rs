//! The translation orchestrator.

use std::collections::HashSet;

use tracing::debug;

use dynamap_model::{EntityMetadata, TranslationResult};

use super::classifier;
use super::context::ExpressionContext;
use crate::config::TranslatorConfig;
use crate::error::TranslationError;
use crate::expression::UpdateDescription;

/// Translates update descriptions into update-expression strings.
///
/// The translator itself is stateless: every call builds one fresh
/// [`ExpressionContext`], so concurrent calls from multiple threads never
/// contend and placeholder numbering restarts from zero each time.
///
/// # Examples
///
/// ```
/// use dynamap_core::expression::{Translator, UpdateDescription};
/// use dynamap_model::{DeclaredType, EntityMetadata, PropertyMetadata};
///
/// let metadata = EntityMetadata::new(
///     "User",
///     vec![
///         PropertyMetadata::builder()
///             .field_name("name")
///             .attribute_name("name")
///             .declared_type(DeclaredType::String)
///             .build(),
///     ],
/// )
/// .unwrap();
///
/// let update = UpdateDescription::new().set("name", "x");
/// let result = Translator::new().translate(&update, &metadata).unwrap();
/// assert_eq!(result.expression, "SET #a0 = :p0");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Translator {
    config: TranslatorConfig,
}

impl Translator {
    /// Create a translator with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a translator with an explicit configuration.
    #[must_use]
    pub fn with_config(config: TranslatorConfig) -> Self {
        Self { config }
    }

    /// Translate one update description against an entity's metadata table.
    ///
    /// Walks the field updates in caller order and fails fast: the first
    /// error wins and no partial result is ever returned, since a partially
    /// rendered expression could silently drop a clause.
    ///
    /// # Errors
    ///
    /// - [`TranslationError::UnknownField`] if a targeted field has no
    ///   metadata entry.
    /// - [`TranslationError::DuplicateAttribute`] if two updates target one
    ///   storage attribute, in any combination of clause categories.
    /// - [`TranslationError::UnsupportedShape`] for expressions outside the
    ///   closed clause set.
    /// - [`TranslationError::FormatFailed`] when a format string cannot be
    ///   applied to a captured literal.
    pub fn translate(
        &self,
        update: &UpdateDescription,
        metadata: &EntityMetadata,
    ) -> Result<TranslationResult, TranslationError> {
        let mut ctx = ExpressionContext::new(&self.config);
        let mut targeted: HashSet<String> = HashSet::with_capacity(update.len());

        for field_update in update {
            let meta = metadata.property(&field_update.field_name).ok_or_else(|| {
                TranslationError::UnknownField {
                    field_name: field_update.field_name.clone(),
                }
            })?;

            // The store forbids one attribute in two clauses of a request,
            // so catch it here instead of letting the write bounce.
            if !targeted.insert(meta.attribute_name.clone()) {
                return Err(TranslationError::DuplicateAttribute {
                    attribute_name: meta.attribute_name.clone(),
                });
            }

            let clause = classifier::lower(&field_update.field_name, &field_update.expr)?;
            classifier::classify(&mut ctx, meta, clause)?;
        }

        let clauses = ctx.clause_count();
        let result = ctx.finish();
        debug!(
            entity = metadata.entity_name(),
            clauses,
            attributes = result.attribute_names.len(),
            parameters = result.parameters.len(),
            "translated update description"
        );
        Ok(result)
    }
}
