//! Update-expression translation core for DynaMap.
//!
//! Converts typed per-field update descriptions into the store's
//! update-expression string, placeholder tables, and captured parameters,
//! deferring field-level encryption to the caller's asynchronous context.
#![allow(clippy::doc_markdown, clippy::module_name_repetitions)]

pub mod config;
pub mod encryption;
pub mod error;
pub mod expression;
pub mod format;
pub mod registry;

pub use config::TranslatorConfig;
pub use encryption::{EncryptionError, Encryptor, seal_parameters};
pub use error::TranslationError;
pub use expression::{Translator, UpdateDescription, UpdateExpr};
pub use registry::{MetadataRegistry, RegistryError};
