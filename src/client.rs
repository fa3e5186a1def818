//! GitLab API client.
//!
//! Low-level HTTP client that handles authentication, request construction
//! and response decoding. Resource operations are implemented via traits on
//! model types and reach the network only through [`GitlabClient::new_request`]
//! and [`GitlabClient::execute`].

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{GitlabError, Result};
use crate::response::ApiResponse;
use crate::services::EpicsService;

const DEFAULT_API_URL: &str = "https://gitlab.com/api/v4";
const USER_AGENT: &str = concat!("glapi/", env!("CARGO_PKG_VERSION"));

/// Credential used to authenticate requests.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthToken {
    /// Personal, project or group access token (`PRIVATE-TOKEN` header).
    Private(String),
    /// OAuth2 access token (`Authorization: Bearer`).
    OAuth(String),
    /// CI job token (`JOB-TOKEN` header).
    Job(String),
}

impl AuthToken {
    /// Build a token from its kind name (`private`, `oauth` or `job`).
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown kind.
    pub fn from_kind(kind: &str, token: String) -> Result<Self> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "" | "private" => Ok(Self::Private(token)),
            "oauth" => Ok(Self::OAuth(token)),
            "job" => Ok(Self::Job(token)),
            other => Err(GitlabError::ConfigMissing(format!(
                "unknown GITLAB_TOKEN_KIND '{other}' (expected private, oauth or job)"
            ))),
        }
    }

    fn apply(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::Private(token) => builder.header("PRIVATE-TOKEN", token),
            Self::OAuth(token) => builder.bearer_auth(token),
            Self::Job(token) => builder.header("JOB-TOKEN", token),
        }
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::Private(_) => "Private",
            Self::OAuth(_) => "OAuth",
            Self::Job(_) => "Job",
        };
        f.debug_tuple(kind).field(&"<redacted>").finish()
    }
}

/// Low-level GitLab API client.
///
/// Handles authentication and HTTP requests. Resource-specific operations
/// are implemented via the `Get` and `List` traits on model types, or
/// through the service accessors such as [`GitlabClient::epics`].
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use glapi::GitlabClient;
///
/// # fn example() -> glapi::Result<()> {
/// // Create from environment variables
/// let client = GitlabClient::from_env()?;
///
/// // Or configure manually
/// let client = GitlabClient::new("glpat-xxxx", "https://gitlab.com/api/v4")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct GitlabClient {
    http: Client,
    base_url: Arc<Url>,
    auth: AuthToken,
}

impl std::fmt::Debug for GitlabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitlabClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl GitlabClient {
    /// Create a client from environment variables.
    ///
    /// Uses `GITLAB_TOKEN` for authentication, `GITLAB_TOKEN_KIND` to pick
    /// the header (defaults to `private`), and optionally `GITLAB_URL` for
    /// the base URL (defaults to `https://gitlab.com/api/v4`).
    ///
    /// # Errors
    ///
    /// Returns an error if `GITLAB_TOKEN` is not set or the kind is unknown.
    pub fn from_env() -> Result<Self> {
        let token = env::var("GITLAB_TOKEN").map_err(|_| {
            GitlabError::ConfigMissing("GITLAB_TOKEN environment variable not set".to_string())
        })?;

        let kind = env::var("GITLAB_TOKEN_KIND").unwrap_or_default();
        let auth = AuthToken::from_kind(&kind, token)?;

        let base_url = env::var("GITLAB_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Self::with_auth(auth, &base_url)
    }

    /// Create a new client authenticating with a private token.
    ///
    /// # Arguments
    ///
    /// * `token` - GitLab access token
    /// * `base_url` - Base URL for the API (e.g., `https://gitlab.com/api/v4`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(token: &str, base_url: &str) -> Result<Self> {
        Self::with_auth(AuthToken::Private(token.to_string()), base_url)
    }

    /// Create a new client with an explicit credential kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn with_auth(auth: AuthToken, base_url: &str) -> Result<Self> {
        // Ensure base URL ends with /
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(300))
            .build()
            .map_err(GitlabError::HttpError)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
            auth,
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Accessor for the group epics endpoints.
    pub fn epics(&self) -> EpicsService<'_> {
        EpicsService::new(self)
    }

    /// Build an authenticated request for `path`, relative to the base URL.
    ///
    /// When `query` is given it is serialized as a URL query string; fields
    /// the query type skips produce no pairs at all.
    ///
    /// # Errors
    ///
    /// Returns [`GitlabError::RequestConstruction`] if the path does not
    /// join onto the base URL or the query cannot be encoded.
    pub fn new_request<Q: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: Option<&Q>,
    ) -> Result<Request> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| GitlabError::RequestConstruction(format!("{path}: {e}")))?;

        let mut builder = self.auth.apply(self.http.request(method, url));
        if let Some(query) = query {
            builder = builder.query(query);
        }

        builder
            .build()
            .map_err(|e| GitlabError::RequestConstruction(e.to_string()))
    }

    /// Send a request and decode its JSON body into `T`.
    ///
    /// # Errors
    ///
    /// Returns a transport failure on network errors, non-success status
    /// codes, or a body that does not decode into `T`.
    #[tracing::instrument(skip(self, request), fields(method = %request.method(), url = %request.url()))]
    pub async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<(T, ApiResponse)> {
        tracing::debug!("sending request");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(GitlabError::HttpError)?;

        let response = Self::check_response(response).await?;
        let envelope = ApiResponse::from_parts(response.status(), response.headers());

        let body = response.bytes().await.map_err(GitlabError::HttpError)?;
        let data = serde_json::from_slice(&body)?;

        Ok((data, envelope))
    }

    /// Check response status and convert errors.
    async fn check_response(response: Response) -> Result<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        tracing::warn!(status = status.as_u16(), "GitLab API returned an error status");

        // Handle rate limiting
        if status.as_u16() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(GitlabError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let envelope = ApiResponse::from_parts(status, response.headers());
        let message = Self::extract_error_message(response, status).await;
        Err(GitlabError::ApiError {
            message,
            status_code: Some(status.as_u16()),
            response: Some(Box::new(envelope)),
        })
    }

    /// Extract error message from a failed response.
    async fn extract_error_message(response: Response, status: reqwest::StatusCode) -> String {
        let body = match response.text().await {
            Ok(b) => b,
            Err(_) => return format!("HTTP {status}"),
        };

        // GitLab reports {"message": ...} or {"error": ...}; message may be an object
        if let Ok(json) = serde_json::from_str::<serde_json::Value>(&body) {
            match json.get("message") {
                Some(serde_json::Value::String(msg)) => return msg.clone(),
                Some(other) if !other.is_null() => return other.to_string(),
                _ => {}
            }
            if let Some(err) = json.get("error").and_then(|m| m.as_str()) {
                return err.to_string();
            }
        }

        if body.is_empty() {
            format!("HTTP {status}")
        } else {
            body
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_debug() {
        let client = GitlabClient::new("test-token", "https://gitlab.com/api/v4").unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("GitlabClient"));
        assert!(debug.contains("base_url"));
        // Token should not be in debug output
        assert!(!debug.contains("test-token"));
    }

    #[test]
    fn test_auth_token_debug_is_redacted() {
        let debug = format!("{:?}", AuthToken::OAuth("secret".to_string()));
        assert_eq!(debug, r#"OAuth("<redacted>")"#);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = GitlabClient::new("token", "https://gitlab.com/api/v4").unwrap();
        let client2 = GitlabClient::new("token", "https://gitlab.com/api/v4/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_new_request_joins_path_and_sets_private_token() {
        let client = GitlabClient::new("glpat-abc", "https://gitlab.example.com/api/v4").unwrap();
        let request = client
            .new_request::<()>(Method::GET, "groups/acme%2Fplatform/epics", None)
            .unwrap();

        assert_eq!(request.method(), Method::GET);
        assert_eq!(
            request.url().as_str(),
            "https://gitlab.example.com/api/v4/groups/acme%2Fplatform/epics"
        );
        assert_eq!(request.headers()["PRIVATE-TOKEN"], "glpat-abc");
    }

    #[test]
    fn test_new_request_uses_header_for_token_kind() {
        let oauth =
            GitlabClient::with_auth(AuthToken::OAuth("tok".into()), "https://gitlab.com/api/v4")
                .unwrap();
        let request = oauth.new_request::<()>(Method::GET, "groups/1/epics", None).unwrap();
        assert_eq!(request.headers()["authorization"], "Bearer tok");

        let job = GitlabClient::with_auth(AuthToken::Job("ci".into()), "https://gitlab.com/api/v4")
            .unwrap();
        let request = job.new_request::<()>(Method::GET, "groups/1/epics", None).unwrap();
        assert_eq!(request.headers()["JOB-TOKEN"], "ci");
    }

    #[test]
    fn test_auth_token_from_kind() {
        assert!(matches!(
            AuthToken::from_kind("", "t".into()).unwrap(),
            AuthToken::Private(_)
        ));
        assert!(matches!(
            AuthToken::from_kind("OAuth", "t".into()).unwrap(),
            AuthToken::OAuth(_)
        ));
        assert!(AuthToken::from_kind("kerberos", "t".into()).is_err());
    }
}
