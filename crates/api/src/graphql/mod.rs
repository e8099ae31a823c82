//! GraphQL schema and HTTP endpoint.
//!
//! Each entity contributes a query object and a mutation object; the roots
//! merge them, so adding an entity means adding one module and one entry in
//! each root.

pub mod address;
pub mod auth;
pub mod cart_item;
pub mod favorite;
pub mod payload;
pub mod product;
pub mod user;

use async_graphql::http::GraphiQLSource;
use async_graphql::{EmptySubscription, MergedObject, Schema, SchemaBuilder};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};

use crate::config::GraphQlConfig;
use crate::error::add_breadcrumb;
use crate::state::AppState;

use address::{AddressMutation, AddressQuery};
use auth::AuthMutation;
use cart_item::{CartItemMutation, CartItemQuery};
use favorite::{FavoriteMutation, FavoriteQuery};
use user::UserQuery;

/// Path the schema is served on.
pub const GRAPHQL_PATH: &str = "/graphql";

pub type ApiSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

#[derive(MergedObject, Default)]
pub struct QueryRoot(UserQuery, AddressQuery, CartItemQuery, FavoriteQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(
    AddressMutation,
    CartItemMutation,
    FavoriteMutation,
    AuthMutation,
);

fn schema_builder(limits: GraphQlConfig) -> SchemaBuilder<QueryRoot, MutationRoot, EmptySubscription> {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .limit_depth(limits.depth_limit)
    .limit_complexity(limits.complexity_limit)
}

/// Build the executable schema with the application state as context data.
#[must_use]
pub fn build_schema(state: AppState) -> ApiSchema {
    let limits = state.config().graphql;
    schema_builder(limits).data(state).finish()
}

/// Schema definition in SDL, for `emporium schema`.
#[must_use]
pub fn schema_sdl() -> String {
    schema_builder(GraphQlConfig::default()).finish().sdl()
}

/// Routes for `GRAPHQL_PATH`: POST executes, GET serves `GraphiQL` when enabled.
pub fn router(schema: ApiSchema, playground: bool) -> Router {
    let route = if playground {
        get(graphql_playground).post(graphql_handler)
    } else {
        post(graphql_handler)
    };

    Router::new()
        .route(GRAPHQL_PATH, route)
        .with_state(schema)
}

async fn graphql_playground() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

async fn graphql_handler(State(schema): State<ApiSchema>, req: GraphQLRequest) -> GraphQLResponse {
    let request = req.into_inner();
    if let Some(operation) = request.operation_name.as_deref() {
        add_breadcrumb("graphql", operation);
    }

    schema.execute(request).await.into()
}
