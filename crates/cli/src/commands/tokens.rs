//! Auth token housekeeping.

use emporium_api::db::AuthTokenRepository;

use super::{CliError, connect};

/// Delete tokens that expired or were already consumed.
///
/// # Errors
///
/// Returns an error if the database is unreachable or the delete fails.
pub async fn purge() -> Result<(), CliError> {
    let pool = connect().await?;

    let removed = AuthTokenRepository::new(&pool).purge_expired().await?;
    tracing::info!(removed, "Purged auth tokens");
    Ok(())
}
