//! HTTP surface: the GraphQL endpoint plus health checks.

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::graphql;
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    let playground = state.config().graphql.playground;
    let schema = graphql::build_schema(state.clone());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .with_state(state)
        .merge(graphql::router(schema, playground))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness: the process is up.
async fn health() -> &'static str {
    "ok"
}

/// Readiness: the database answers.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::Request;
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use super::*;
    use crate::config::{ApiConfig, GraphQlConfig};
    use crate::middleware::REQUEST_ID_HEADER;

    /// State whose pool points at a port nothing listens on.
    fn unreachable_state(playground: bool) -> AppState {
        let url = "postgres://emporium@127.0.0.1:1/emporium";
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(500))
            .connect_lazy(url)
            .unwrap();
        let config = ApiConfig {
            database_url: SecretString::from(url),
            host: "127.0.0.1".parse().unwrap(),
            port: 8000,
            base_url: "http://localhost:8000".to_string(),
            graphql: GraphQlConfig {
                playground,
                ..GraphQlConfig::default()
            },
            email: None,
            sentry_dsn: None,
            sentry_environment: None,
        };
        AppState::new(config, pool).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_health_carries_request_id() {
        let response = app(unreachable_state(true))
            .oneshot(get("/health"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_readiness_without_database() {
        let response = app(unreachable_state(true))
            .oneshot(get("/health/ready"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_playground_toggle() {
        let enabled = app(unreachable_state(true))
            .oneshot(get(graphql::GRAPHQL_PATH))
            .await
            .unwrap();
        assert_eq!(enabled.status(), StatusCode::OK);

        let disabled = app(unreachable_state(false))
            .oneshot(get(graphql::GRAPHQL_PATH))
            .await
            .unwrap();
        assert_eq!(disabled.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
