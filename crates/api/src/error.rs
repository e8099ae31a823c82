//! Unified error handling with Sentry integration.
//!
//! Resolvers convert store failures at the GraphQL boundary with
//! [`ResolverResultExt::or_internal`], which captures the error to Sentry and
//! hands the client a sanitized message.

use thiserror::Error;

use crate::db::RepositoryError;

/// Message returned to clients for any server-side failure.
pub const INTERNAL_ERROR: &str = "Internal server error";

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),
}

impl AppError {
    /// Capture to Sentry and convert into a client-safe GraphQL error.
    #[must_use]
    pub fn into_graphql(self) -> async_graphql::Error {
        let event_id = sentry::capture_error(&self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Request error"
        );

        // Don't expose internal error details to clients
        async_graphql::Error::new(INTERNAL_ERROR)
    }
}

/// Extension for converting repository results at the resolver boundary.
pub trait ResolverResultExt<T> {
    /// Map any error through [`AppError::into_graphql`].
    ///
    /// # Errors
    ///
    /// Returns the sanitized GraphQL error.
    fn or_internal(self) -> async_graphql::Result<T>;
}

impl<T, E: Into<AppError>> ResolverResultExt<T> for std::result::Result<T, E> {
    fn or_internal(self) -> async_graphql::Result<T> {
        self.map_err(|e| e.into().into_graphql())
    }
}

/// Add a breadcrumb for API actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str) {
    sentry::add_breadcrumb(sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    });
}
