use super::{CatalogPage, RegistryEndpoint, RegistryError, TagList};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::StatusCode;

/// Repositories fetched per catalog page.
const CATALOG_PAGE_SIZE: usize = 100;

/// Manifest media type whose digest the registry reports back in the
/// Docker-Content-Digest header.
const MANIFEST_V2: &str = "application/vnd.docker.distribution.manifest.v2+json";

const DIGEST_HEADER: &str = "Docker-Content-Digest";

/// Blocking client for the registry v2 HTTP API. One request is in flight
/// at a time; the transport's default timeout is the only timeout.
pub struct RegistryClient {
    http: Client,
    endpoint: RegistryEndpoint,
}

impl RegistryClient {
    /// Probe `GET /v2/` before anything else, classifying the three ways a
    /// registry refuses: bad credentials, nothing listening, or an answer
    /// that is not a v2 registry.
    pub fn connect(endpoint: RegistryEndpoint) -> Result<Self, RegistryError> {
        let http = Client::new();
        let url = format!("{}/v2/", endpoint.base_url);
        let response = http
            .get(&url)
            .basic_auth(&endpoint.username, Some(&endpoint.password))
            .send()
            .map_err(|e| RegistryError::Unreachable(e.to_string()))?;

        match response.status() {
            StatusCode::OK => Ok(RegistryClient { http, endpoint }),
            StatusCode::UNAUTHORIZED => Err(RegistryError::AuthFailed),
            status => Err(RegistryError::Unexpected(format!(
                "liveness probe returned {status}"
            ))),
        }
    }

    fn get(&self, url: String) -> RequestBuilder {
        self.http
            .get(url)
            .basic_auth(&self.endpoint.username, Some(&self.endpoint.password))
    }

    /// Walk `GET /v2/_catalog` page by page. A page shorter than the page
    /// size ends the walk; otherwise its last name is the cursor for the
    /// next request. Any failed page fails the whole enumeration, so a
    /// truncated listing is never mistaken for a complete one.
    pub fn list_repositories(&self) -> Result<Vec<String>, RegistryError> {
        let mut repositories = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut request = self
                .get(format!("{}/v2/_catalog", self.endpoint.base_url))
                .query(&[("n", CATALOG_PAGE_SIZE.to_string())]);
            if let Some(last) = &cursor {
                request = request.query(&[("last", last)]);
            }

            let response = request
                .send()
                .map_err(|e| RegistryError::Unreachable(e.to_string()))?;
            if response.status() != StatusCode::OK {
                return Err(RegistryError::Unexpected(format!(
                    "catalog listing returned {}",
                    response.status()
                )));
            }

            let page: CatalogPage = response.json().map_err(|e| {
                RegistryError::Unexpected(format!("malformed catalog response: {e}"))
            })?;

            let page_len = page.repositories.len();
            cursor = page.repositories.last().cloned();
            repositories.extend(page.repositories);

            if page_len < CATALOG_PAGE_SIZE {
                return Ok(repositories);
            }
        }
    }

    /// Single, unpaginated tag listing. `"tags": null` and a missing
    /// repository both come back as an empty list for the caller to skip.
    pub fn list_tags(&self, repository: &str) -> Result<Vec<String>, RegistryError> {
        let response = self
            .get(format!(
                "{}/v2/{}/tags/list",
                self.endpoint.base_url, repository
            ))
            .send()
            .map_err(|e| RegistryError::Unreachable(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(RegistryError::Unexpected(format!(
                "tag listing for {repository} returned {}",
                response.status()
            )));
        }

        let list: TagList = response
            .json()
            .map_err(|e| RegistryError::Unexpected(format!("malformed tag response: {e}")))?;

        Ok(list.tags.unwrap_or_default())
    }

    /// Resolve a tag to the digest of its current manifest, the unit the
    /// registry actually deletes.
    pub fn resolve_digest(&self, repository: &str, tag: &str) -> Result<String, RegistryError> {
        let response = self
            .get(format!(
                "{}/v2/{}/manifests/{}",
                self.endpoint.base_url, repository, tag
            ))
            .header(reqwest::header::ACCEPT, MANIFEST_V2)
            .send()
            .map_err(|e| RegistryError::Unreachable(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(RegistryError::Unexpected(format!(
                "manifest for {repository}:{tag} returned {}",
                response.status()
            )));
        }

        response
            .headers()
            .get(DIGEST_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(String::from)
            .ok_or_else(|| {
                RegistryError::Unexpected(format!(
                    "no {DIGEST_HEADER} header on manifest for {repository}:{tag}"
                ))
            })
    }

    /// Delete a manifest by digest. The registry answers 202 (accepted) or
    /// 200 depending on version; a 404 means someone got there first, which
    /// is just as deleted.
    pub fn delete_manifest(&self, repository: &str, digest: &str) -> Result<(), RegistryError> {
        let response = self
            .http
            .delete(format!(
                "{}/v2/{}/manifests/{}",
                self.endpoint.base_url, repository, digest
            ))
            .basic_auth(&self.endpoint.username, Some(&self.endpoint.password))
            .send()
            .map_err(|e| RegistryError::Unreachable(e.to_string()))?;

        match response.status() {
            StatusCode::ACCEPTED | StatusCode::OK | StatusCode::NOT_FOUND => Ok(()),
            status => Err(RegistryError::Unexpected(format!(
                "delete returned {status}"
            ))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use mockito::Matcher;

    fn connect(server: &mockito::Server) -> RegistryClient {
        let endpoint = RegistryEndpoint::new(&server.url(), "admin", "hunter2").unwrap();
        RegistryClient::connect(endpoint).unwrap()
    }

    fn probe_ok(server: &mut mockito::Server) -> mockito::Mock {
        server.mock("GET", "/v2/").with_status(200).create()
    }

    #[test]
    fn test_connect_classifies_bad_credentials() {
        let mut server = mockito::Server::new();
        server.mock("GET", "/v2/").with_status(401).create();

        let endpoint = RegistryEndpoint::new(&server.url(), "admin", "wrong").unwrap();
        assert!(matches!(
            RegistryClient::connect(endpoint),
            Err(RegistryError::AuthFailed)
        ));
    }

    #[test]
    fn test_connect_classifies_unexpected_status() {
        let mut server = mockito::Server::new();
        server.mock("GET", "/v2/").with_status(500).create();

        let endpoint = RegistryEndpoint::new(&server.url(), "admin", "hunter2").unwrap();
        assert!(matches!(
            RegistryClient::connect(endpoint),
            Err(RegistryError::Unexpected(_))
        ));
    }

    #[test]
    fn test_connect_classifies_unreachable() {
        // Nothing listens on port 9; connection is refused immediately.
        let endpoint = RegistryEndpoint::new("http://127.0.0.1:9", "admin", "hunter2").unwrap();
        assert!(matches!(
            RegistryClient::connect(endpoint),
            Err(RegistryError::Unreachable(_))
        ));
    }

    #[test]
    fn test_catalog_pagination_follows_cursor() {
        let mut server = mockito::Server::new();
        probe_ok(&mut server);

        let first_page: Vec<String> = (1..=100).map(|i| format!("r{i}")).collect();
        let first = server
            .mock("GET", "/v2/_catalog")
            .match_query(Matcher::Exact("n=100".to_string()))
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!({ "repositories": first_page }).to_string())
            .expect(1)
            .create();
        let second = server
            .mock("GET", "/v2/_catalog")
            .match_query(Matcher::Exact("n=100&last=r100".to_string()))
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!({ "repositories": ["r101"] }).to_string())
            .expect(1)
            .create();

        let repos = connect(&server).list_repositories().unwrap();

        assert_eq!(101, repos.len());
        assert_eq!("r1", repos[0]);
        assert_eq!("r100", repos[99]);
        assert_eq!("r101", repos[100]);
        first.assert();
        second.assert();
    }

    #[test]
    fn test_short_first_page_ends_enumeration() {
        let mut server = mockito::Server::new();
        probe_ok(&mut server);

        let page = server
            .mock("GET", "/v2/_catalog")
            .match_query(Matcher::Exact("n=100".to_string()))
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!({ "repositories": ["app", "db"] }).to_string())
            .expect(1)
            .create();

        let repos = connect(&server).list_repositories().unwrap();

        assert_eq!(vec!["app".to_string(), "db".to_string()], repos);
        page.assert();
    }

    #[test]
    fn test_failed_catalog_page_fails_enumeration() {
        let mut server = mockito::Server::new();
        probe_ok(&mut server);
        server.mock("GET", "/v2/_catalog")
            .match_query(Matcher::Any)
            .with_status(502)
            .create();

        assert!(matches!(
            connect(&server).list_repositories(),
            Err(RegistryError::Unexpected(_))
        ));
    }

    #[test]
    fn test_malformed_catalog_body_is_not_zero_results() {
        let mut server = mockito::Server::new();
        probe_ok(&mut server);
        server.mock("GET", "/v2/_catalog")
            .match_query(Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body("{\"repos\": []}")
            .create();

        assert!(matches!(
            connect(&server).list_repositories(),
            Err(RegistryError::Unexpected(_))
        ));
    }

    #[test]
    fn test_list_tags_handles_null() {
        let mut server = mockito::Server::new();
        probe_ok(&mut server);
        server.mock("GET", "/v2/app/tags/list")
            .with_header("content-type", "application/json")
            .with_body("{\"name\": \"app\", \"tags\": null}")
            .create();

        assert!(connect(&server).list_tags("app").unwrap().is_empty());
    }

    #[test]
    fn test_resolve_digest_reads_header() {
        let mut server = mockito::Server::new();
        probe_ok(&mut server);
        server.mock("GET", "/v2/app/manifests/v1")
            .match_header("accept", MANIFEST_V2)
            .with_header(DIGEST_HEADER, "sha256:abc123")
            .create();

        assert_eq!(
            "sha256:abc123",
            connect(&server).resolve_digest("app", "v1").unwrap()
        );
    }

    #[test]
    fn test_resolve_digest_without_header_is_an_error() {
        let mut server = mockito::Server::new();
        probe_ok(&mut server);
        server.mock("GET", "/v2/app/manifests/v1").create();

        assert!(matches!(
            connect(&server).resolve_digest("app", "v1"),
            Err(RegistryError::Unexpected(_))
        ));
    }

    #[test]
    fn test_delete_accepts_both_success_codes() {
        let mut server = mockito::Server::new();
        probe_ok(&mut server);
        server.mock("DELETE", "/v2/app/manifests/sha256:aaa")
            .with_status(202)
            .create();
        server.mock("DELETE", "/v2/app/manifests/sha256:bbb")
            .with_status(200)
            .create();

        let client = connect(&server);
        assert!(client.delete_manifest("app", "sha256:aaa").is_ok());
        assert!(client.delete_manifest("app", "sha256:bbb").is_ok());
    }

    #[test]
    fn test_delete_tolerates_already_deleted() {
        let mut server = mockito::Server::new();
        probe_ok(&mut server);
        server.mock("DELETE", "/v2/app/manifests/sha256:aaa")
            .with_status(404)
            .create();

        assert!(connect(&server).delete_manifest("app", "sha256:aaa").is_ok());
    }

    #[test]
    fn test_delete_failure_carries_status() {
        let mut server = mockito::Server::new();
        probe_ok(&mut server);
        server.mock("DELETE", "/v2/app/manifests/sha256:aaa")
            .with_status(405)
            .create();

        let err = connect(&server)
            .delete_manifest("app", "sha256:aaa")
            .unwrap_err();
        assert!(err.to_string().contains("405"));
    }
}
