//! Mutation response shapes.
//!
//! Every mutation answers with `success`, `message` and `errors`; upserts add
//! the saved record under an entity-specific field. Refusals never surface as
//! GraphQL errors, only as `success: false` with the reasons in `errors`.

use async_graphql::SimpleObject;

use crate::services::mutation::{Deleted, MutationError, Saved};

/// Result of an upsert, before it is shaped into an entity-specific payload.
pub struct Outcome<T> {
    pub entity: Option<T>,
    pub success: bool,
    pub message: Option<String>,
    pub errors: Vec<String>,
}

impl<T> Outcome<T> {
    /// Wraps the pipeline result, converting the saved record with `wrap`.
    pub fn from_saved<R>(
        result: Result<Saved<R>, MutationError>,
        wrap: impl FnOnce(R) -> T,
    ) -> Self {
        match result {
            Ok(saved) => Self {
                entity: Some(wrap(saved.record)),
                success: true,
                message: Some(saved.message),
                errors: Vec::new(),
            },
            Err(err) => Self {
                entity: None,
                success: false,
                message: None,
                errors: err.into_messages(),
            },
        }
    }
}

/// Response of `deleteAddress`, `deleteCartItem` and `deleteFavorite`.
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct DeletePayload {
    pub success: bool,
    pub message: Option<String>,
    pub errors: Option<Vec<String>>,
}

impl From<Result<Deleted, MutationError>> for DeletePayload {
    fn from(result: Result<Deleted, MutationError>) -> Self {
        match result {
            Ok(deleted) => Self {
                success: true,
                message: Some(deleted.message),
                errors: Some(Vec::new()),
            },
            Err(err) => Self {
                success: false,
                message: None,
                errors: Some(err.into_messages()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_payload_success() {
        let payload = DeletePayload::from(Ok(Deleted {
            message: "Favorite deleted successfully.".to_string(),
        }));

        assert!(payload.success);
        assert_eq!(payload.message.as_deref(), Some("Favorite deleted successfully."));
        assert_eq!(payload.errors, Some(Vec::new()));
    }

    #[test]
    fn test_delete_payload_failure() {
        let payload = DeletePayload::from(Err(MutationError::Forbidden(
            "You do not have permission to delete this favorite.".to_string(),
        )));

        assert!(!payload.success);
        assert_eq!(payload.message, None);
        assert_eq!(
            payload.errors,
            Some(vec![
                "You do not have permission to delete this favorite.".to_string()
            ])
        );
    }

    #[test]
    fn test_outcome_failure_has_no_entity() {
        let outcome: Outcome<()> = Outcome::from_saved::<()>(
            Err(MutationError::Validation(vec!["City cannot be blank.".to_string()])),
            |()| (),
        );

        assert!(!outcome.success);
        assert!(outcome.entity.is_none());
        assert_eq!(outcome.errors, vec!["City cannot be blank.".to_string()]);
    }
}
