//! Token-source resolution and zone defaulting for cfddns.

use crate::error::{CfddnsError, Result};
use std::path::PathBuf;

/// Environment variable consulted when no token source is given.
pub const TOKEN_ENV_VAR: &str = "CLOUDFLARE_API_TOKEN";

/// Where the API token comes from.
///
/// The two sources are mutually exclusive on the command line; when
/// neither is given, [`TOKEN_ENV_VAR`] is consulted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenSource {
    /// Plaintext file whose trimmed contents are the token.
    File(PathBuf),
    /// Name of an environment variable holding the token.
    Env(String),
}

impl TokenSource {
    /// Build the source from parsed CLI options.
    pub fn from_args(file: Option<PathBuf>, env_var: Option<String>) -> Self {
        match (file, env_var) {
            (Some(path), _) => TokenSource::File(path),
            (None, Some(var)) => TokenSource::Env(var),
            (None, None) => TokenSource::Env(TOKEN_ENV_VAR.to_string()),
        }
    }

    /// Read the token. Runs before any network call; a failure here
    /// means no request is ever issued.
    pub fn resolve(&self) -> Result<String> {
        match self {
            TokenSource::File(path) => {
                let contents = std::fs::read_to_string(path).map_err(|e| {
                    CfddnsError::Token(format!("{}: {}", path.display(), e))
                })?;
                let token = contents.trim();
                if token.is_empty() {
                    return Err(CfddnsError::Token(format!(
                        "{} is empty",
                        path.display()
                    )));
                }
                Ok(token.to_string())
            }
            TokenSource::Env(var) => std::env::var(var).map_err(|_| {
                CfddnsError::Token(format!("environment variable {} is not set", var))
            }),
        }
    }
}

/// Default zone for a sub-domain: its last two dot-separated labels.
///
/// `www.example.com` -> `example.com`; inputs with fewer than three
/// labels are returned unchanged.
pub fn derive_zone(sub_domain: &str) -> String {
    let labels: Vec<&str> = sub_domain.split('.').collect();
    if labels.len() <= 2 {
        sub_domain.to_string()
    } else {
        labels[labels.len() - 2..].join(".")
    }
}
