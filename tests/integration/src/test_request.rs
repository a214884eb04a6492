//! Request-payload assembly scenarios.

use std::collections::HashMap;

use dynamap_core::encryption::seal_parameters;
use dynamap_core::expression::{Translator, UpdateDescription};
use dynamap_model::Value;

use crate::user_metadata;

#[tokio::test]
async fn test_should_assemble_wire_payload_from_translation() {
    let update = UpdateDescription::new().set("name", "x").remove("description");
    let result = Translator::new().translate(&update, &user_metadata()).unwrap();

    let values = seal_parameters(&result, None).await.unwrap();
    let key = HashMap::from([("id".to_owned(), Value::string("u1"))]);
    let request = result.into_request("users", key, values);

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["TableName"], "users");
    assert_eq!(json["UpdateExpression"], "SET #a0 = :p0 REMOVE #a1");
    assert_eq!(json["ExpressionAttributeNames"]["#a0"], "name");
    assert_eq!(json["ExpressionAttributeNames"]["#a1"], "description");
    assert_eq!(json["ExpressionAttributeValues"][":p0"]["S"], "x");
    assert_eq!(json["Key"]["id"]["S"], "u1");
}

#[tokio::test]
async fn test_should_omit_expression_for_empty_update() {
    let update = UpdateDescription::new();
    let result = Translator::new().translate(&update, &user_metadata()).unwrap();

    let values = seal_parameters(&result, None).await.unwrap();
    let request = result.into_request("users", HashMap::new(), values);

    let json = serde_json::to_value(&request).unwrap();
    assert!(json.get("UpdateExpression").is_none());
    assert!(json.get("ExpressionAttributeNames").is_none());
}
