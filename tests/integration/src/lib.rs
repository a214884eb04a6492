//! Integration tests for the DynaMap translator.
//!
//! These drive the full public surface: build metadata, describe an update,
//! translate, seal parameters, assemble the request payload. Shared fixtures
//! live here; the tests themselves are grouped by concern in the `test_*`
//! modules.

use std::sync::Once;

use dynamap_model::{DeclaredType, EntityMetadata, PropertyMetadata};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Metadata table for the canonical test entity.
///
/// Covers every shape the translator distinguishes: plain strings, plain and
/// formatted numbers, an encrypted field, a formatted timestamp, a list, and
/// a string set.
#[must_use]
pub fn user_metadata() -> EntityMetadata {
    init_tracing();

    EntityMetadata::new(
        "User",
        vec![
            PropertyMetadata::builder()
                .field_name("name")
                .attribute_name("name")
                .declared_type(DeclaredType::String)
                .build(),
            PropertyMetadata::builder()
                .field_name("description")
                .attribute_name("description")
                .declared_type(DeclaredType::String)
                .build(),
            PropertyMetadata::builder()
                .field_name("score")
                .attribute_name("score")
                .declared_type(DeclaredType::Number)
                .build(),
            PropertyMetadata::builder()
                .field_name("balance")
                .attribute_name("balance")
                .declared_type(DeclaredType::Number)
                .format("0.00")
                .build(),
            PropertyMetadata::builder()
                .field_name("ssn")
                .attribute_name("ssn")
                .declared_type(DeclaredType::String)
                .requires_encryption(true)
                .build(),
            PropertyMetadata::builder()
                .field_name("lastSeen")
                .attribute_name("lastSeenDate")
                .declared_type(DeclaredType::Timestamp)
                .format("%Y-%m-%d")
                .build(),
            PropertyMetadata::builder()
                .field_name("history")
                .attribute_name("history")
                .declared_type(DeclaredType::List)
                .build(),
            PropertyMetadata::builder()
                .field_name("tags")
                .attribute_name("tags")
                .declared_type(DeclaredType::StringSet)
                .build(),
        ],
    )
    .expect("fixture metadata is valid")
}

mod test_registry;
mod test_request;
mod test_sealing;
mod test_translator;
