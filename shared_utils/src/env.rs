use thiserror::Error;

/// An environment variable required by the application is not set.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVarError(pub String);

/// Reads an optional environment variable, trimming surrounding whitespace.
///
/// Returns `None` when the variable is unset, not valid unicode, or blank;
/// an exported but empty variable is almost always a shell mistake.
///
/// # Arguments
/// * `name` - The name of the environment variable to read.
pub fn get_optional_env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
