//! GraphQL schema export.

use std::path::Path;

use super::CliError;

/// Write the schema SDL to `output`, or print it.
///
/// # Errors
///
/// Returns an error if the output file cannot be written.
pub fn export(output: Option<&Path>) -> Result<(), CliError> {
    let sdl = emporium_api::graphql::schema_sdl();

    match output {
        Some(path) => {
            std::fs::write(path, &sdl).map_err(|source| CliError::Io {
                path: path.display().to_string(),
                source,
            })?;
            tracing::info!(path = %path.display(), "Schema written");
        }
        None => {
            #[allow(clippy::print_stdout)]
            {
                println!("{sdl}");
            }
        }
    }
    Ok(())
}
