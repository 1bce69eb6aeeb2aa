//! HTTP client for the provider API.
//!
//! Collection endpoints are paginated: each page may carry an opaque
//! `pages.next_url` cursor, which is followed verbatim until absent. Any
//! non-success status aborts the whole fetch; partial results are never
//! returned.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::dashboard::schema::{
    AssignmentRecord, LoginResponse, MessageResponse, Page, RevisionSession, SubjectRecord,
    SummaryReport,
};
use crate::dashboard::source::DashboardSource;
use crate::domain::entities::SubjectKind;

/// Failures surfaced by [`ApiClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The provider rejected the credential (HTTP 401).
    #[error("credential rejected by {url}")]
    Unauthorized { url: String },

    /// Any other non-success status.
    #[error("upstream returned {status} for {url}: {message}")]
    Upstream {
        status: u16,
        url: String,
        message: String,
    },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The provider advertised a next page that was already fetched.
    #[error("pagination loop: {url} was already visited")]
    PaginationLoop { url: String },

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized { .. })
    }
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Client bound to one API base URL.
///
/// Collection paths (`assignments`, `subjects`, `summary`,
/// `revision-session`) are joined onto the base, so the base must end with
/// `/`. Account paths (`/signup`, `/login`) resolve against the host root.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    /// Builds a client with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] if the TLS backend fails to
    /// initialize.
    pub fn new(base: Url, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("srs-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(path)?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &Url,
        token: Option<&str>,
    ) -> Result<T, ClientError> {
        let mut request = self.http.get(url.clone());
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        self.send(request, url).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &Url,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized {
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(ClientError::Upstream {
                status: status.as_u16(),
                url: url.to_string(),
                message: error_message(status, &body),
            });
        }

        serde_json::from_slice(&body).map_err(|source| ClientError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// Follows `pages.next_url` from `start` until it is absent.
    ///
    /// Items are returned in page order. Relative cursors resolve against the
    /// page that returned them.
    ///
    /// # Errors
    ///
    /// Fails on the first non-success page, and with
    /// [`ClientError::PaginationLoop`] if a cursor repeats.
    pub async fn fetch_all_pages<T: DeserializeOwned>(
        &self,
        start: Url,
        token: &str,
    ) -> Result<Vec<T>, ClientError> {
        let mut items = Vec::new();
        let mut visited = HashSet::new();
        let mut url = start;

        loop {
            if !visited.insert(url.to_string()) {
                return Err(ClientError::PaginationLoop {
                    url: url.to_string(),
                });
            }

            let page: Page<T> = self.get_json(&url, Some(token)).await?;
            tracing::debug!(url = %url, items = page.data.len(), "page fetched");

            let next = page.next_url().map(|next| url.join(next)).transpose()?;
            items.extend(page.data);

            match next {
                Some(next) => url = next,
                None => break,
            }
        }

        Ok(items)
    }

    /// Registers an account and returns the provider's message.
    pub async fn signup(&self, username: &str, password: &str) -> Result<String, ClientError> {
        let url = self.endpoint("/signup")?;
        let request = self
            .http
            .post(url.clone())
            .json(&Credentials { username, password });
        let response: MessageResponse = self.send(request, &url).await?;
        Ok(response.message)
    }

    /// Exchanges credentials for a bearer token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ClientError> {
        let url = self.endpoint("/login")?;
        let request = self
            .http
            .post(url.clone())
            .json(&Credentials { username, password });
        let response: LoginResponse = self.send(request, &url).await?;
        Ok(response.access_token)
    }

    /// Asks the provider for a random subject to revise.
    pub async fn revision_session(&self, token: &str) -> Result<RevisionSession, ClientError> {
        let url = self.endpoint("revision-session")?;
        self.get_json(&url, Some(token)).await
    }
}

#[async_trait]
impl DashboardSource for ApiClient {
    async fn fetch_assignments(
        &self,
        token: &str,
        kind: SubjectKind,
    ) -> Result<Vec<AssignmentRecord>, ClientError> {
        let mut url = self.endpoint("assignments")?;
        url.query_pairs_mut()
            .append_pair("subject_types", kind.as_str());
        self.fetch_all_pages(url, token).await
    }

    async fn fetch_available_lessons(
        &self,
        token: &str,
    ) -> Result<Vec<AssignmentRecord>, ClientError> {
        let mut url = self.endpoint("assignments")?;
        url.query_pairs_mut()
            .append_pair("immediately_available_for_lessons", "true");
        self.fetch_all_pages(url, token).await
    }

    async fn fetch_subjects(
        &self,
        token: &str,
        ids: &[u64],
    ) -> Result<HashMap<u64, SubjectRecord>, ClientError> {
        let query = subject_ids_query(ids);
        if query.is_empty() {
            return Ok(HashMap::new());
        }

        let mut url = self.endpoint("subjects")?;
        url.set_query(Some(&format!("ids={query}")));

        let subjects: Vec<SubjectRecord> = self.fetch_all_pages(url, token).await?;
        Ok(subjects.into_iter().map(|s| (s.id, s)).collect())
    }

    async fn fetch_summary(&self, token: &str) -> Result<SummaryReport, ClientError> {
        let url = self.endpoint("summary")?;
        self.get_json(&url, Some(token)).await
    }
}

/// Comma-joined ids, first occurrence order, duplicates dropped.
fn subject_ids_query(ids: &[u64]) -> String {
    let mut seen = HashSet::new();
    ids.iter()
        .filter(|id| seen.insert(**id))
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .ok()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(Url::parse(base).unwrap(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_collection_paths_join_onto_base() {
        let client = client("http://localhost:3000/v2/");
        assert_eq!(
            client.endpoint("summary").unwrap().as_str(),
            "http://localhost:3000/v2/summary"
        );
    }

    #[test]
    fn test_account_paths_resolve_against_host_root() {
        let client = client("http://localhost:3000/v2/");
        assert_eq!(
            client.endpoint("/login").unwrap().as_str(),
            "http://localhost:3000/login"
        );
    }

    #[test]
    fn test_subject_ids_query_drops_duplicates() {
        assert_eq!(subject_ids_query(&[3, 1, 3, 2, 1]), "3,1,2");
        assert_eq!(subject_ids_query(&[]), "");
    }

    #[test]
    fn test_error_message_reads_error_envelope() {
        let body = br#"{"error":{"code":"CONFLICT","message":"user already exists","details":{}}}"#;
        assert_eq!(
            error_message(StatusCode::CONFLICT, body),
            "user already exists"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_reason() {
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, b"<html>"),
            "Internal Server Error"
        );
    }

    #[tokio::test]
    async fn test_fetch_subjects_with_no_ids_makes_no_request() {
        // Unroutable base; any request would fail.
        let client = client("http://127.0.0.1:9/v2/");
        let subjects = client.fetch_subjects("token", &[]).await.unwrap();
        assert!(subjects.is_empty());
    }
}
