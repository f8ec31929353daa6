use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use url::Url;

use crate::identity::Identity;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Unsupported URL scheme {0:?} (expected http or https)")]
    UnsupportedScheme(String),
    #[error("Cloud timeout must be at least one second")]
    ZeroTimeout,
    #[error("Header {0} is empty or contains invalid characters (non-visible ASCII)")]
    InvalidHeader(&'static str),
}

const CLIENT_ID: HeaderName = HeaderName::from_static("client-id");

/// Status and body of a completed exchange.
///
/// `body` holds at most `max_body + 1` bytes of what the server sent; the
/// extra byte marks a body that was cut short.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// HTTP transport used by the probe.
///
/// Wraps [`reqwest::Client`] with a base URL and the identifying headers
/// every request to the cloud server carries (`Accept`, `User-Agent`,
/// `Client-Id`).
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    /// Create a new client for the given base URL and identity.
    pub fn new(base_url: &str, identity: &Identity) -> Result<Self, ProbeError> {
        let base_url = parse_base_url(base_url)?;
        let headers = identity_headers(identity)?;

        let inner = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self { inner, base_url })
    }

    /// Append `path` (which may carry a query string) to the base URL.
    ///
    /// Unlike [`Url::join`], a path prefix on the base URL is kept:
    /// `https://host/prefix` + `/x` is `https://host/prefix/x`.
    pub fn endpoint(&self, path: &str) -> Result<Url, ProbeError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{path}"))?)
    }

    /// GET `{base_url}{path}` and return the status and body, whatever the
    /// status is.
    ///
    /// Reading stops once the body is longer than `max_body`.
    pub async fn get_raw(&self, path: &str, max_body: usize) -> Result<RawResponse, ProbeError> {
        let url = self.endpoint(path)?;
        let mut resp = self.inner.get(url).send().await?;
        let status = resp.status().as_u16();

        let mut body = Vec::new();
        while let Some(chunk) = resp.chunk().await? {
            body.extend_from_slice(&chunk);
            if body.len() > max_body {
                body.truncate(max_body + 1);
                break;
            }
        }
        Ok(RawResponse { status, body })
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

/// Headers sent on every request to the cloud server.
pub fn identity_headers(identity: &Identity) -> Result<HeaderMap, ProbeError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("text/plain"));
    headers.insert(
        USER_AGENT,
        header_value("User-Agent", identity.user_agent())?,
    );
    headers.insert(CLIENT_ID, header_value("Client-Id", identity.client_id())?);
    Ok(headers)
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue, ProbeError> {
    if value.trim().is_empty() {
        return Err(ProbeError::InvalidHeader(name));
    }
    HeaderValue::from_str(value).map_err(|_| ProbeError::InvalidHeader(name))
}

/// Parse a cloud base URL, accepting only `http` and `https`.
pub fn parse_base_url(base_url: &str) -> Result<Url, ProbeError> {
    let url = Url::parse(base_url)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ProbeError::UnsupportedScheme(other.to_string())),
    }
}
