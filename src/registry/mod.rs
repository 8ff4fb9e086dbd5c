mod client;
mod prune;

pub use client::RegistryClient;
pub use prune::{run, PruneOutcome};

use serde::Deserialize;

/// Where the registry lives and how to authenticate. Supplied once per run,
/// never persisted.
pub struct RegistryEndpoint {
    pub base_url: String,
    pub username: String,
    pub password: String,
}

impl RegistryEndpoint {
    pub fn new(url: &str, username: &str, password: &str) -> Result<Self, RegistryError> {
        let base_url = url.trim().trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(RegistryError::InvalidUrl(url.to_string()));
        }
        Ok(RegistryEndpoint {
            base_url,
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("registry URL must start with http:// or https://, got '{0}'")]
    InvalidUrl(String),

    #[error("registry authentication failed: check username and password")]
    AuthFailed,

    #[error("registry unreachable: {0}")]
    Unreachable(String),

    #[error("unexpected registry response: {0}")]
    Unexpected(String),
}

/// One page of `GET /v2/_catalog`.
#[derive(Deserialize)]
pub(crate) struct CatalogPage {
    pub repositories: Vec<String>,
}

/// `GET /v2/{repo}/tags/list`. A repository whose manifests were all
/// deleted reports `"tags": null`.
#[derive(Deserialize)]
pub(crate) struct TagList {
    pub tags: Option<Vec<String>>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_endpoint_requires_http_scheme() {
        assert!(RegistryEndpoint::new("https://reg.example.com", "u", "p").is_ok());
        assert!(RegistryEndpoint::new("http://10.0.0.1:5000", "u", "p").is_ok());
        assert!(matches!(
            RegistryEndpoint::new("reg.example.com", "u", "p"),
            Err(RegistryError::InvalidUrl(_))
        ));
        assert!(matches!(
            RegistryEndpoint::new("ftp://reg.example.com", "u", "p"),
            Err(RegistryError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_endpoint_strips_trailing_slash() {
        let endpoint = RegistryEndpoint::new("https://reg.example.com/", "u", "p").unwrap();
        assert_eq!("https://reg.example.com", endpoint.base_url);
    }
}
