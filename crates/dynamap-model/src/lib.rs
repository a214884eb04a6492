//! Data model for the DynaMap update-expression translator.
//!
//! This crate holds everything that crosses the translator's boundaries:
//! store values, per-field property metadata, captured parameters, the
//! translation result, and the assembled `UpdateItem` request payload. The
//! translation logic itself lives in `dynamap-core`.
#![allow(clippy::module_name_repetitions)]

pub mod metadata;
pub mod parameter;
pub mod request;
pub mod result;
pub mod value;

pub use metadata::{DeclaredType, EntityMetadata, MetadataError, PropertyMetadata};
pub use parameter::ParameterMetadata;
pub use request::UpdateItemRequest;
pub use result::TranslationResult;
pub use value::Value;
