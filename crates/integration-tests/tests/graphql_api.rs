//! End-to-end scenarios against a running server and database.

#![allow(clippy::unwrap_used)]

use emporium_integration_tests::TestContext;
use serde_json::{Value, json};

const UPSERT_ADDRESS: &str = r"
mutation ($id: ID, $userId: ID!, $line1: String!, $city: String!, $state: String!, $postalCode: String!, $country: String!) {
    upsertAddress(
        id: $id
        userId: $userId
        addressLine1: $line1
        city: $city
        state: $state
        postalCode: $postalCode
        country: $country
    ) {
        address { id city }
        success
        message
        errors
    }
}";

async fn upsert_address(ctx: &TestContext, id: Option<&str>, user_id: &str, city: &str) -> Value {
    let variables = json!({
        "id": id,
        "userId": user_id,
        "line1": "1 Main St",
        "city": city,
        "state": "IL",
        "postalCode": "62704",
        "country": "US",
    });
    let data = ctx.graphql(UPSERT_ADDRESS, variables).await.unwrap();
    data["upsertAddress"].clone()
}

async fn addresses_of(ctx: &TestContext, user_id: &str) -> Vec<Value> {
    let data = ctx
        .graphql(
            r"query ($userId: ID!) { getAddressesByUserId(userId: $userId) { id city } }",
            json!({ "userId": user_id }),
        )
        .await
        .unwrap();
    data["getAddressesByUserId"].as_array().unwrap().clone()
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_health() {
    let ctx = TestContext::new();
    let response = ctx
        .client
        .get(format!("{}/health", ctx.api_url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_create_address() {
    let ctx = TestContext::new();
    let user = ctx.register_user().await.unwrap();

    let result = upsert_address(&ctx, None, &user, "Springfield").await;

    assert_eq!(result["success"], json!(true));
    assert_eq!(result["message"], json!("Address created successfully."));
    assert_eq!(result["errors"], json!([]));
    assert_eq!(result["address"]["city"], json!("Springfield"));
    assert_eq!(addresses_of(&ctx, &user).await.len(), 1);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_blank_city_writes_nothing() {
    let ctx = TestContext::new();
    let user = ctx.register_user().await.unwrap();

    let result = upsert_address(&ctx, None, &user, "   ").await;

    assert_eq!(result["success"], json!(false));
    assert_eq!(result["address"], Value::Null);
    assert_eq!(result["errors"], json!(["City cannot be blank."]));
    assert!(addresses_of(&ctx, &user).await.is_empty());
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_identical_creates_are_distinct() {
    let ctx = TestContext::new();
    let user = ctx.register_user().await.unwrap();

    let first = upsert_address(&ctx, None, &user, "Springfield").await;
    let second = upsert_address(&ctx, None, &user, "Springfield").await;

    assert_ne!(first["address"]["id"], second["address"]["id"]);
    assert_eq!(addresses_of(&ctx, &user).await.len(), 2);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_update_by_other_user_is_refused() {
    let ctx = TestContext::new();
    let owner = ctx.register_user().await.unwrap();
    let intruder = ctx.register_user().await.unwrap();

    let created = upsert_address(&ctx, None, &owner, "Springfield").await;
    let id = created["address"]["id"].as_str().unwrap().to_string();

    let refused = upsert_address(&ctx, Some(&id), &intruder, "Shelbyville").await;
    assert_eq!(refused["success"], json!(false));
    assert_eq!(
        refused["errors"],
        json!(["You do not have permission to update this address."])
    );

    let updated = upsert_address(&ctx, Some(&id), &owner, "Capital City").await;
    assert_eq!(updated["message"], json!("Address updated successfully."));

    let stored = addresses_of(&ctx, &owner).await;
    assert_eq!(stored, vec![json!({ "id": id, "city": "Capital City" })]);
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_cart_item_delete_by_other_user_is_refused() {
    let ctx = TestContext::new();
    let owner = ctx.register_user().await.unwrap();
    let intruder = ctx.register_user().await.unwrap();

    let data = ctx
        .graphql(
            r"mutation ($userId: ID!, $productId: ID!) {
                upsertCartItem(userId: $userId, productId: $productId, quantity: 2) {
                    cartItem { id quantity product { id } }
                    success
                }
            }",
            json!({ "userId": owner, "productId": ctx.product_id }),
        )
        .await
        .unwrap();
    assert_eq!(data["upsertCartItem"]["success"], json!(true));
    let item_id = data["upsertCartItem"]["cartItem"]["id"].clone();

    let delete = r"mutation ($id: ID!, $userId: ID!) {
        deleteCartItem(id: $id, userId: $userId) { success message errors }
    }";
    let data = ctx
        .graphql(delete, json!({ "id": item_id, "userId": intruder }))
        .await
        .unwrap();
    assert_eq!(
        data["deleteCartItem"],
        json!({
            "success": false,
            "message": null,
            "errors": ["You do not have permission to delete this cart item."],
        })
    );

    let data = ctx
        .graphql(
            r"query ($id: ID!) { getCartItemById(id: $id) { id } }",
            json!({ "id": item_id }),
        )
        .await
        .unwrap();
    assert_eq!(data["getCartItemById"]["id"], item_id);

    let data = ctx
        .graphql(delete, json!({ "id": item_id, "userId": owner }))
        .await
        .unwrap();
    assert_eq!(
        data["deleteCartItem"]["message"],
        json!("Cart item deleted successfully.")
    );
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_zero_quantity_is_rejected() {
    let ctx = TestContext::new();
    let user = ctx.register_user().await.unwrap();

    let data = ctx
        .graphql(
            r"mutation ($userId: ID!, $productId: ID!) {
                upsertCartItem(userId: $userId, productId: $productId, quantity: 0) {
                    success errors
                }
            }",
            json!({ "userId": user, "productId": ctx.product_id }),
        )
        .await
        .unwrap();

    assert_eq!(
        data["upsertCartItem"],
        json!({ "success": false, "errors": ["Quantity must be at least 1."] })
    );
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_favorite_lifecycle() {
    let ctx = TestContext::new();
    let user = ctx.register_user().await.unwrap();

    let data = ctx
        .graphql(
            r"mutation ($userId: ID!, $productId: ID!) {
                upsertFavorite(userId: $userId, productId: $productId) {
                    favorite { id user { id } }
                    message
                }
            }",
            json!({ "userId": user, "productId": ctx.product_id }),
        )
        .await
        .unwrap();
    assert_eq!(
        data["upsertFavorite"]["message"],
        json!("Favorite created successfully.")
    );
    assert_eq!(data["upsertFavorite"]["favorite"]["user"]["id"], json!(user));
    let id = data["upsertFavorite"]["favorite"]["id"].clone();

    let data = ctx
        .graphql(
            r"mutation ($id: ID!, $userId: ID!) {
                deleteFavorite(id: $id, userId: $userId) { success message }
            }",
            json!({ "id": id, "userId": user }),
        )
        .await
        .unwrap();
    assert_eq!(
        data["deleteFavorite"],
        json!({ "success": true, "message": "Favorite deleted successfully." })
    );
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_missing_records() {
    let ctx = TestContext::new();
    let user = ctx.register_user().await.unwrap();

    let data = ctx
        .graphql(r#"{ getAddressById(id: "999999999") { id } }"#, json!({}))
        .await
        .unwrap();
    assert_eq!(data["getAddressById"], Value::Null);

    let data = ctx
        .graphql(
            r#"mutation ($userId: ID!) {
                upsertFavorite(userId: $userId, productId: "999999999") { success errors }
            }"#,
            json!({ "userId": user }),
        )
        .await
        .unwrap();
    assert_eq!(
        data["upsertFavorite"]["errors"],
        json!(["Product does not exist."])
    );
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_unknown_user_is_reported_before_malformed_ids() {
    let ctx = TestContext::new();
    let user = ctx.register_user().await.unwrap();

    let data = ctx
        .graphql(
            r#"mutation {
                upsertCartItem(id: "x", userId: "999999999", productId: "y", quantity: 1) {
                    errors
                }
                deleteAddress(id: "x", userId: "999999999") { errors }
            }"#,
            json!({}),
        )
        .await
        .unwrap();
    assert_eq!(
        data,
        json!({
            "upsertCartItem": { "errors": ["User does not exist."] },
            "deleteAddress": { "errors": ["User does not exist."] },
        })
    );

    let data = ctx
        .graphql(
            r#"mutation ($userId: ID!) {
                upsertCartItem(id: "x", userId: $userId, productId: "y", quantity: 1) {
                    errors
                }
            }"#,
            json!({ "userId": user }),
        )
        .await
        .unwrap();
    assert_eq!(
        data["upsertCartItem"]["errors"],
        json!(["Product does not exist."])
    );
}

#[tokio::test]
#[ignore = "Requires running API server and database"]
async fn test_token_auth_rejects_wrong_password() {
    let ctx = TestContext::new();

    let data = ctx
        .graphql(
            r#"mutation {
                tokenAuth(email: "nobody@example.com", password: "not-the-password") {
                    success errors token user { id }
                }
            }"#,
            json!({}),
        )
        .await
        .unwrap();

    assert_eq!(
        data["tokenAuth"],
        json!({
            "success": false,
            "errors": ["Please, enter valid credentials."],
            "token": null,
            "user": null,
        })
    );
}
