//! Deferred-encryption handoff.
//!
//! Translation is synchronous and pure, while encryption is an asynchronous
//! operation against a key-management service. Blocking on it from inside
//! the translator is off the table, so the value pipeline only *tags*
//! parameters (`requires_encryption`) and leaves the plaintext in place.
//! This module is where the caller settles that debt: after translation and
//! before the write is sent, [`seal_parameters`] produces the final value
//! table with ciphertext substituted for every flagged placeholder.
//!
//! Flagged parameters are independent of one another, so they encrypt
//! concurrently. The handoff is all-or-nothing: one failure (or dropping
//! the future) means no table is produced, and a partially-encrypted
//! request can never be sent.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::future::try_join_all;

use dynamap_model::{TranslationResult, Value};

/// Errors raised during the deferred-encryption handoff.
#[derive(Debug, thiserror::Error)]
pub enum EncryptionError {
    /// Parameters are flagged for encryption but no encryptor is configured.
    #[error("update contains encryption-deferred parameters but no encryptor is configured")]
    Unconfigured,

    /// A single parameter failed to encrypt; the whole write must be aborted.
    #[error("encryption failed for field {field_name}: {reason}")]
    Failed {
        /// The field whose parameter failed to encrypt.
        field_name: String,
        /// Failure detail from the encryption backend.
        reason: String,
    },
}

/// An encryption backend, typically a client for a key-management service.
#[async_trait]
pub trait Encryptor: Send + Sync {
    /// Encrypt one plaintext parameter value.
    ///
    /// `field_name` identifies the mapped field, letting backends select
    /// per-field keys.
    async fn encrypt(&self, field_name: &str, plaintext: &Value)
    -> Result<Value, EncryptionError>;
}

/// Build the final `:placeholder -> value` table for a translation result.
///
/// Unflagged parameters pass through as-is. Flagged parameters are encrypted
/// concurrently through `encryptor` and replaced with the ciphertext. When
/// flagged parameters exist and `encryptor` is `None`, this fails with
/// [`EncryptionError::Unconfigured`] before any work happens. The check
/// belongs here, at send time, because the translator itself has no
/// dependency on the encryption subsystem.
///
/// # Errors
///
/// [`EncryptionError::Unconfigured`] or the first
/// [`EncryptionError::Failed`] from the backend.
pub async fn seal_parameters(
    result: &TranslationResult,
    encryptor: Option<&dyn Encryptor>,
) -> Result<HashMap<String, Value>, EncryptionError> {
    let mut table = result.value_map();

    let flagged: Vec<_> = result
        .parameters
        .iter()
        .filter(|p| p.requires_encryption)
        .collect();
    if flagged.is_empty() {
        return Ok(table);
    }

    let Some(encryptor) = encryptor else {
        return Err(EncryptionError::Unconfigured);
    };

    let sealed = try_join_all(flagged.into_iter().map(|param| async move {
        let ciphertext = encryptor.encrypt(&param.field_name, &param.value).await?;
        Ok::<_, EncryptionError>((param.placeholder.clone(), ciphertext))
    }))
    .await?;

    for (placeholder, ciphertext) in sealed {
        table.insert(placeholder, ciphertext);
    }
    Ok(table)
}
