//! Deferred-encryption handoff scenarios.

use async_trait::async_trait;

use dynamap_core::encryption::{EncryptionError, Encryptor, seal_parameters};
use dynamap_core::expression::{Translator, UpdateDescription};
use dynamap_model::Value;

use crate::user_metadata;

/// Backend that marks values instead of encrypting them.
#[derive(Debug)]
struct MarkerEncryptor;

#[async_trait]
impl Encryptor for MarkerEncryptor {
    async fn encrypt(
        &self,
        field_name: &str,
        plaintext: &Value,
    ) -> Result<Value, EncryptionError> {
        let text = plaintext.as_s().ok_or_else(|| EncryptionError::Failed {
            field_name: field_name.to_owned(),
            reason: "only string plaintext supported".to_owned(),
        })?;
        Ok(Value::string(format!("enc:{field_name}:{text}")))
    }
}

#[tokio::test]
async fn test_should_seal_flagged_parameters_only() {
    let update = UpdateDescription::new().set("name", "x").set("ssn", "123-45-6789");
    let result = Translator::new().translate(&update, &user_metadata()).unwrap();

    let table = seal_parameters(&result, Some(&MarkerEncryptor)).await.unwrap();

    assert_eq!(table[":p0"], Value::string("x"));
    assert_eq!(table[":p1"], Value::string("enc:ssn:123-45-6789"));
    // Sealing never mutates the translation result.
    assert_eq!(result.parameters[1].value, Value::string("123-45-6789"));
}

#[tokio::test]
async fn test_should_fail_before_send_when_encryptor_missing() {
    let update = UpdateDescription::new().set("ssn", "123-45-6789");
    let result = Translator::new().translate(&update, &user_metadata()).unwrap();

    let err = seal_parameters(&result, None).await.unwrap_err();
    assert!(matches!(err, EncryptionError::Unconfigured));
}

#[tokio::test]
async fn test_should_not_require_encryptor_without_flagged_parameters() {
    let update = UpdateDescription::new().set("name", "x").increment("score", 1);
    let result = Translator::new().translate(&update, &user_metadata()).unwrap();
    assert!(!result.has_deferred_encryption());

    let table = seal_parameters(&result, None).await.unwrap();
    assert_eq!(table.len(), 2);
}
