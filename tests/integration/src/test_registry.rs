//! Metadata registry scenarios, including concurrent translation.

use std::sync::Arc;
use std::thread;

use dynamap_core::expression::{Translator, UpdateDescription};
use dynamap_core::registry::{MetadataRegistry, RegistryError};

use crate::user_metadata;

#[test]
fn test_should_translate_through_registry_lookup() {
    let registry = MetadataRegistry::new();
    registry.register(user_metadata()).unwrap();

    let metadata = registry.require("User").unwrap();
    let update = UpdateDescription::new().set("name", "x");
    let result = Translator::new().translate(&update, &metadata).unwrap();

    assert_eq!(result.expression, "SET #a0 = :p0");
}

#[test]
fn test_should_reject_unknown_entity() {
    let registry = MetadataRegistry::new();
    let err = registry.require("Order").unwrap_err();
    assert!(matches!(err, RegistryError::UnknownEntity { .. }));
}

#[test]
fn test_should_translate_concurrently_without_shared_state() {
    let registry = Arc::new(MetadataRegistry::new());
    registry.register(user_metadata()).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let metadata = registry.require("User").unwrap();
                let translator = Translator::new();
                let update = UpdateDescription::new()
                    .set("name", format!("user-{i}"))
                    .increment("score", 1);
                translator.translate(&update, &metadata).unwrap()
            })
        })
        .collect();

    for handle in handles {
        let result = handle.join().unwrap();
        // Placeholder numbering restarts from zero in every call, no matter
        // how many calls run at once.
        assert_eq!(result.expression, "SET #a0 = :p0 ADD #a1 :p1");
    }
}
