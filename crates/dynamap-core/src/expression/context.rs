//! Per-call translation context and placeholder allocation.
//!
//! One [`ExpressionContext`] is created per translation call, mutated only by
//! that call's walk, consumed once into a
//! [`TranslationResult`](dynamap_model::TranslationResult), then discarded.
//! Nothing is pooled or shared, which is what makes the translator reentrant
//! without locks.

use std::collections::HashMap;

use dynamap_model::{ParameterMetadata, PropertyMetadata, TranslationResult, Value};

use super::renderer;
use crate::config::TranslatorConfig;
use crate::error::TranslationError;
use crate::format;

/// Mutable scratch space for one translation call.
///
/// Owns the four clause-text lists, both placeholder namespaces (counters
/// start at zero for every call and only grow), and the captured parameters.
/// Attribute-name placeholders are deduplicated: referencing the same
/// attribute twice yields the same placeholder, so one clause never names one
/// attribute through two different tokens.
#[derive(Debug)]
pub struct ExpressionContext<'a> {
    config: &'a TranslatorConfig,
    set_clauses: Vec<String>,
    add_clauses: Vec<String>,
    remove_clauses: Vec<String>,
    delete_clauses: Vec<String>,
    attribute_names: HashMap<String, String>,
    placeholder_by_attribute: HashMap<String, String>,
    next_name: usize,
    next_value: usize,
    parameters: Vec<ParameterMetadata>,
}

impl<'a> ExpressionContext<'a> {
    /// Create a fresh context with zeroed placeholder counters.
    #[must_use]
    pub fn new(config: &'a TranslatorConfig) -> Self {
        Self {
            config,
            set_clauses: Vec::new(),
            add_clauses: Vec::new(),
            remove_clauses: Vec::new(),
            delete_clauses: Vec::new(),
            attribute_names: HashMap::new(),
            placeholder_by_attribute: HashMap::new(),
            next_name: 0,
            next_value: 0,
            parameters: Vec::new(),
        }
    }

    /// Allocate (or reuse) the name placeholder for a storage attribute.
    ///
    /// Raw attribute names are never interpolated into the expression; the
    /// store reserves a keyword set, so every reference goes through a
    /// placeholder.
    pub fn name_placeholder(&mut self, attribute_name: &str) -> String {
        if let Some(existing) = self.placeholder_by_attribute.get(attribute_name) {
            return existing.clone();
        }
        let placeholder = format!("#{}{}", self.config.name_prefix, self.next_name);
        self.next_name += 1;
        self.attribute_names
            .insert(placeholder.clone(), attribute_name.to_owned());
        self.placeholder_by_attribute
            .insert(attribute_name.to_owned(), placeholder.clone());
        placeholder
    }

    /// Run the value pipeline on a literal and capture it as a parameter.
    ///
    /// Applies the field's format string, allocates the next value
    /// placeholder, and records the parameter with the field's encryption
    /// flag. The value itself is never encrypted here (see the crate-level
    /// deferred-encryption contract).
    pub fn capture(
        &mut self,
        meta: &PropertyMetadata,
        value: Value,
    ) -> Result<String, TranslationError> {
        let formatted =
            format::apply(value.clone(), meta).map_err(|e| TranslationError::FormatFailed {
                field_name: meta.field_name.clone(),
                attribute_name: meta.attribute_name.clone(),
                format: meta.format.clone().unwrap_or_default(),
                value,
                reason: e.to_string(),
            })?;

        let placeholder = format!(":{}{}", self.config.value_prefix, self.next_value);
        self.next_value += 1;
        self.parameters.push(ParameterMetadata {
            placeholder: placeholder.clone(),
            value: formatted,
            requires_encryption: meta.requires_encryption,
            field_name: meta.field_name.clone(),
            attribute_name: meta.attribute_name.clone(),
        });
        Ok(placeholder)
    }

    /// Append a clause to the `SET` category.
    pub fn push_set(&mut self, clause: String) {
        self.set_clauses.push(clause);
    }

    /// Append a clause to the `ADD` category.
    pub fn push_add(&mut self, clause: String) {
        self.add_clauses.push(clause);
    }

    /// Append a clause to the `REMOVE` category.
    pub fn push_remove(&mut self, clause: String) {
        self.remove_clauses.push(clause);
    }

    /// Append a clause to the `DELETE` category.
    pub fn push_delete(&mut self, clause: String) {
        self.delete_clauses.push(clause);
    }

    /// Number of clauses accumulated across all categories.
    #[must_use]
    pub fn clause_count(&self) -> usize {
        self.set_clauses.len()
            + self.add_clauses.len()
            + self.remove_clauses.len()
            + self.delete_clauses.len()
    }

    /// Consume the context into a translation result.
    #[must_use]
    pub fn finish(self) -> TranslationResult {
        let expression = renderer::render(
            &self.set_clauses,
            &self.add_clauses,
            &self.remove_clauses,
            &self.delete_clauses,
        );
        TranslationResult {
            expression,
            attribute_names: self.attribute_names,
            parameters: self.parameters,
        }
    }
}
