//! End-to-end tests for the Emporium API.
//!
//! # Running Tests
//!
//! ```bash
//! # Migrate and seed a database, then start the server
//! cargo run -p emporium-cli -- migrate
//! cargo run -p emporium-cli -- seed products data/products.yaml
//! cargo run -p emporium-api
//!
//! # Run the ignored tests against it
//! cargo test -p emporium-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `EMPORIUM_API_URL` - Server base URL (default: `http://localhost:8000`)
//! - `PRODUCT_ID` - Id of an existing product (default: `1`)

use serde_json::{Value, json};

/// HTTP client bound to a running API server.
pub struct TestContext {
    pub client: reqwest::Client,
    pub api_url: String,
    pub product_id: String,
}

impl TestContext {
    #[must_use]
    pub fn new() -> Self {
        let api_url = std::env::var("EMPORIUM_API_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string())
            .trim_end_matches('/')
            .to_string();
        let product_id = std::env::var("PRODUCT_ID").unwrap_or_else(|_| "1".to_string());

        Self {
            client: reqwest::Client::new(),
            api_url,
            product_id,
        }
    }

    /// Execute a GraphQL operation and return its `data` object.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-JSON bodies and GraphQL-level errors.
    pub async fn graphql(&self, query: &str, variables: Value) -> Result<Value, String> {
        let body: Value = self
            .client
            .post(format!("{}/graphql", self.api_url))
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await
            .map_err(|e| e.to_string())?
            .json()
            .await
            .map_err(|e| e.to_string())?;

        if let Some(errors) = body.get("errors") {
            return Err(errors.to_string());
        }
        body.get("data")
            .cloned()
            .ok_or_else(|| format!("response without data: {body}"))
    }

    /// Register a fresh account and return its user id.
    ///
    /// # Errors
    ///
    /// Fails if registration is refused or the user cannot be looked up.
    pub async fn register_user(&self) -> Result<String, String> {
        let email = format!("it-{}@example.com", uuid::Uuid::new_v4());

        let data = self
            .graphql(
                r"mutation ($email: String!) {
                    register(email: $email, username: $email, password1: $email, password2: $email) {
                        success errors
                    }
                }",
                json!({ "email": email }),
            )
            .await?;
        if data["register"]["success"] != json!(true) {
            return Err(format!("registration refused: {data}"));
        }

        let data = self
            .graphql(
                r"query ($email: String!) {
                    getUserByEmail(email: $email) { users { id } status }
                }",
                json!({ "email": email }),
            )
            .await?;
        data["getUserByEmail"]["users"][0]["id"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| format!("user not found after registration: {data}"))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
