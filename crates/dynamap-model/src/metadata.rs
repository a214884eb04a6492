//! Property metadata for mapped entity fields.
//!
//! The annotation scanner materializes one [`EntityMetadata`] table per mapped
//! entity type. The translator only ever reads these tables; it never mutates
//! them. Tables are shipped as JSON, so everything here derives serde with
//! `SCREAMING_SNAKE_CASE` wire names for the declared-type enum.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Declared storage type of a mapped field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeclaredType {
    /// UTF-8 string.
    String,
    /// Arbitrary-precision number.
    Number,
    /// Boolean.
    Boolean,
    /// Timestamp, carried as an RFC 3339 string.
    Timestamp,
    /// Raw binary.
    Binary,
    /// Ordered list of values.
    List,
    /// String-keyed map of values.
    Map,
    /// Set of strings.
    StringSet,
    /// Set of numbers.
    NumberSet,
}

impl DeclaredType {
    /// Returns the wire-format string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Number => "NUMBER",
            Self::Boolean => "BOOLEAN",
            Self::Timestamp => "TIMESTAMP",
            Self::Binary => "BINARY",
            Self::List => "LIST",
            Self::Map => "MAP",
            Self::StringSet => "STRING_SET",
            Self::NumberSet => "NUMBER_SET",
        }
    }

    /// Returns `true` if this type supports native arithmetic updates.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Number)
    }

    /// Returns `true` if this is a set type.
    #[must_use]
    pub fn is_set(&self) -> bool {
        matches!(self, Self::StringSet | Self::NumberSet)
    }
}

impl std::fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping metadata for one field of a mapped entity.
///
/// # Examples
///
/// ```
/// use dynamap_model::metadata::{DeclaredType, PropertyMetadata};
///
/// let prop = PropertyMetadata::builder()
///     .field_name("score")
///     .attribute_name("score")
///     .declared_type(DeclaredType::Number)
///     .format("0.00")
///     .build();
/// assert!(prop.format.is_some());
/// assert!(!prop.requires_encryption);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct PropertyMetadata {
    /// Logical field name on the mapped type.
    #[builder(setter(into))]
    pub field_name: String,

    /// Storage attribute name the field maps to.
    #[builder(setter(into))]
    pub attribute_name: String,

    /// Declared storage type.
    pub declared_type: DeclaredType,

    /// Optional format string applied to captured literals before they are
    /// handed to the store.
    #[builder(default, setter(strip_option, into))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Whether captured literals must be encrypted before the write is sent.
    #[builder(default)]
    #[serde(default)]
    pub requires_encryption: bool,
}

/// Errors raised while assembling an entity's metadata table.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// A property declared an empty storage attribute name.
    #[error("empty attribute name for field: {field_name}")]
    EmptyAttributeName {
        /// The offending logical field name.
        field_name: String,
    },
    /// Two properties map to the same storage attribute name.
    #[error("duplicate attribute name in entity metadata: {attribute_name}")]
    DuplicateAttributeName {
        /// The duplicated storage attribute name.
        attribute_name: String,
    },
    /// Two properties share one logical field name.
    #[error("duplicate field name in entity metadata: {field_name}")]
    DuplicateFieldName {
        /// The duplicated logical field name.
        field_name: String,
    },
}

/// Validated, read-only metadata table for one entity type.
///
/// Construction enforces the table invariants: attribute names are non-empty
/// and unique, and each logical field appears once. Deserialization funnels
/// through the same validation, so a table loaded from JSON is as trustworthy
/// as one built in process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "EntityMetadataWire", rename_all = "camelCase")]
pub struct EntityMetadata {
    entity_name: String,
    properties: Vec<PropertyMetadata>,
    #[serde(skip)]
    by_field: HashMap<String, usize>,
}

/// Raw wire shape of [`EntityMetadata`], pre-validation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntityMetadataWire {
    entity_name: String,
    properties: Vec<PropertyMetadata>,
}

impl TryFrom<EntityMetadataWire> for EntityMetadata {
    type Error = MetadataError;

    fn try_from(wire: EntityMetadataWire) -> Result<Self, Self::Error> {
        Self::new(wire.entity_name, wire.properties)
    }
}

impl EntityMetadata {
    /// Build a validated table from a property list.
    pub fn new(
        entity_name: impl Into<String>,
        properties: Vec<PropertyMetadata>,
    ) -> Result<Self, MetadataError> {
        let mut by_field = HashMap::with_capacity(properties.len());
        let mut seen_attrs = HashMap::with_capacity(properties.len());

        for (idx, prop) in properties.iter().enumerate() {
            if prop.attribute_name.is_empty() {
                return Err(MetadataError::EmptyAttributeName {
                    field_name: prop.field_name.clone(),
                });
            }
            if seen_attrs
                .insert(prop.attribute_name.clone(), idx)
                .is_some()
            {
                return Err(MetadataError::DuplicateAttributeName {
                    attribute_name: prop.attribute_name.clone(),
                });
            }
            if by_field.insert(prop.field_name.clone(), idx).is_some() {
                return Err(MetadataError::DuplicateFieldName {
                    field_name: prop.field_name.clone(),
                });
            }
        }

        Ok(Self {
            entity_name: entity_name.into(),
            properties,
            by_field,
        })
    }

    /// The mapped entity type's name.
    #[must_use]
    pub fn entity_name(&self) -> &str {
        &self.entity_name
    }

    /// Look up a property by logical field name.
    #[must_use]
    pub fn property(&self, field_name: &str) -> Option<&PropertyMetadata> {
        self.by_field
            .get(field_name)
            .map(|&idx| &self.properties[idx])
    }

    /// All properties, in declaration order.
    #[must_use]
    pub fn properties(&self) -> &[PropertyMetadata] {
        &self.properties
    }
}
