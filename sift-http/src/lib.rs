//! Minimal HTTP client for page retrieval with safe, structured logging.
//!
//! - Request options: headers, query params, timeout
//! - Redacts sensitive query params and authorization headers in logs
//! - Non-2xx responses are errors; there is no retry policy, each URL is
//!   attempted exactly once
//! - Optional *raw* request/response logging via `SIFT_HTTP_RAW=1`
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), sift_http::HttpError> {
//! let client = sift_http::HttpClient::new()?;
//! let page = client
//!     .get_text("https://pib.gov.in/PressReleasePage.aspx", sift_http::RequestOpts::default())
//!     .await?;
//! println!("{} bytes from {}", page.body.len(), page.final_url);
//! # Ok(()) }
//! ```
//!
//! Observability: structured `tracing` events are emitted for request start,
//! response headers, body snippets (truncated), final errors, and (optionally)
//! raw request/response lines (target `http.raw`) when `SIFT_HTTP_RAW=1`.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, StatusCode, Url};
use std::borrow::Cow;
use std::env;
use std::time::Duration;
use thiserror::Error;

// ==============================
// Raw logging toggles
// ==============================

const RAW_ENV: &str = "SIFT_HTTP_RAW";
const RAW_MAX_BODY: usize = 64 * 1024; // cap raw body logs (64 KiB)

const SECRET_QUERY_KEYS: &[&str] = &[
    "access_token",
    "authorization",
    "auth",
    "key",
    "api_key",
    "token",
    "secret",
    "client_secret",
    "bearer",
];

fn raw_enabled() -> bool {
    matches!(
        env::var(RAW_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

fn is_secret_key(k: &str) -> bool {
    SECRET_QUERY_KEYS.contains(&k.to_ascii_lowercase().as_str())
}

/// Render a best-effort curl command for repro/debug, with secrets redacted.
fn make_curl(method: &Method, url: &Url, headers: &HeaderMap) -> String {
    let mut parts = vec!["curl".to_string(), format!("-X{}", method)];
    for (name, val) in redact_headers(headers) {
        parts.push(format!("-H '{}: {}'", name, val.replace('\'', r"'\''")));
    }
    let (host_path, query) = redact_query(url);
    let mut target = format!("{}://{}", url.scheme(), host_path);
    if !query.is_empty() {
        let q: Vec<String> = query.iter().map(|(k, v)| format!("{k}={v}")).collect();
        target.push('?');
        target.push_str(&q.join("&"));
    }
    parts.push(format!("'{}'", target));
    parts.join(" ")
}

/// Redact sensitive headers for logging
fn redact_headers(h: &HeaderMap) -> Vec<(String, String)> {
    h.iter()
        .map(|(k, v)| {
            let key = k.as_str().to_string();
            let mut val = v.to_str().unwrap_or("").to_string();
            if key.eq_ignore_ascii_case("authorization") || key.eq_ignore_ascii_case("cookie") {
                val = "<redacted>".into();
            }
            (key, val)
        })
        .collect()
}

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("network error: {0}")]
    Network(String),
    #[error("server returned error {status} for url: {url}")]
    Api {
        status: StatusCode,
        url: String,
        request_id: String,
    },
}

// ==============================
// Request Options / Response
// ==============================

/// Per-request tuning knobs for the HTTP client.
///
/// ```
/// use sift_http::RequestOpts;
/// use std::borrow::Cow;
/// use std::time::Duration;
///
/// let opts = RequestOpts {
///     timeout: Some(Duration::from_secs(30)),
///     query: Some(vec![("PRID", Cow::Borrowed("2120456"))]),
///     ..Default::default()
/// };
///
/// assert_eq!(opts.timeout.unwrap().as_secs(), 30);
/// assert!(opts.headers.is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub timeout: Option<Duration>,
    pub headers: Option<HeaderMap>,
    pub query: Option<Vec<(&'a str, Cow<'a, str>)>>,
}

/// A successfully retrieved (2xx) text body.
#[derive(Clone, Debug)]
pub struct TextResponse {
    /// URL after redirects.
    pub final_url: Url,
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

// ==============================
// Client
// ==============================

#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
    pub default_timeout: Duration,
    pub user_agent: String,
}

impl HttpClient {
    /// Construct a client with a 10 second default timeout.
    ///
    /// ```no_run
    /// use sift_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new()?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(10));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new() -> Result<Self, HttpError> {
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            inner,
            default_timeout: Duration::from_secs(10),
            user_agent: concat!("sift/", env!("CARGO_PKG_VERSION")).to_string(),
        })
    }

    /// Override the default timeout returned by [`HttpClient::new`].
    ///
    /// ```no_run
    /// use sift_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new()?.with_timeout(Duration::from_secs(2));
    /// assert_eq!(client.default_timeout, Duration::from_secs(2));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    /// GET an absolute URL and decode the body as text.
    ///
    /// Any non-2xx status is reported as [`HttpError::Api`].
    pub async fn get_text(&self, url: &str, opts: RequestOpts<'_>) -> Result<TextResponse, HttpError> {
        let url = Url::parse(url).map_err(|e| HttpError::Url(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(HttpError::Url(format!("unsupported scheme: {}", url.scheme())));
        }
        self.request_text_internal(Method::GET, url, opts).await
    }

    // ==============================
    // Core request implementation
    // ==============================

    async fn request_text_internal(
        &self,
        method: Method,
        url: Url,
        opts: RequestOpts<'_>,
    ) -> Result<TextResponse, HttpError> {
        let timeout = opts.timeout.unwrap_or(self.default_timeout);

        let mut headers = opts.headers.clone().unwrap_or_default();
        if !headers.contains_key(USER_AGENT) {
            let ua = HeaderValue::from_str(&self.user_agent)
                .map_err(|e| HttpError::Build(format!("invalid user agent: {e}")))?;
            headers.insert(USER_AGENT, ua);
        }

        // ----- Build request -----
        let mut rb = self
            .inner
            .request(method.clone(), url.clone())
            .timeout(timeout)
            .headers(headers.clone());
        if let Some(q) = &opts.query {
            let pairs: Vec<(&str, &str)> = q.iter().map(|(k, v)| (*k, v.as_ref())).collect();
            rb = rb.query(&pairs);
        }

        // ----- Safe request logging (pre-send) -----
        let (host_path, redacted_q) = redact_query(&url);
        let req_id = format!(
            "r{:x}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        );

        tracing::debug!(
            req_id=%req_id,
            method=%method,
            host_path=%host_path,
            query=?redacted_q,
            timeout_ms=timeout.as_millis() as u64,
            "http.request.start"
        );

        if raw_enabled() {
            let curl = make_curl(&method, &url, &headers);
            tracing::debug!(target: "http.raw", %req_id, %curl, "request");
        }

        // ----- Send -----
        let t0 = std::time::Instant::now();
        let resp = rb.send().await.map_err(|err| {
            let e = classify_send_error(err, timeout);
            tracing::warn!(req_id=%req_id, host_path=%host_path, message=%e, "http.network_error.send");
            e
        })?;
        let status = resp.status();
        let final_url = resp.url().clone();
        let resp_headers = resp.headers().clone();
        // decoded with the charset from Content-Type, UTF-8 otherwise
        let body = resp.text().await.map_err(|err| {
            let e = classify_send_error(err, timeout);
            tracing::warn!(req_id=%req_id, host_path=%host_path, message=%e, "http.network_error.body");
            e
        })?;
        let dur_ms = t0.elapsed().as_millis() as u64;

        let req_hdr_id = resp_headers
            .get("x-request-id")
            .or_else(|| resp_headers.get("x-correlation-id"))
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        let content_type = resp_headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        tracing::debug!(
            req_id=%req_id,
            %status,
            duration_ms=dur_ms,
            body_len=body.len(),
            content_type=?content_type,
            x_request_id=%req_hdr_id,
            "http.response.headers"
        );

        if raw_enabled() {
            let hdrs = redact_headers(&resp_headers);
            let truncated = body.len() > RAW_MAX_BODY;
            let text = prefix_at_char_boundary(&body, RAW_MAX_BODY);
            tracing::info!(
                target:"http.raw",
                %req_id,
                status=%status,
                duration_ms=dur_ms,
                headers=?hdrs,
                body=%text,
                truncated
            );
        }

        let snippet = snip_body(&body);
        tracing::trace!(req_id=%req_id, body_snippet=%snippet, "http.response.body_snippet");

        if !status.is_success() {
            tracing::warn!(
                req_id=%req_id,
                %status,
                host_path=%host_path,
                x_request_id=%req_hdr_id,
                body_snippet=%snippet,
                "http.error"
            );
            return Err(HttpError::Api {
                status,
                url: final_url.to_string(),
                request_id: req_hdr_id.to_string(),
            });
        }

        Ok(TextResponse {
            final_url,
            status,
            content_type,
            body,
        })
    }
}

// ==============================
// Helpers
// ==============================

fn classify_send_error(err: reqwest::Error, timeout: Duration) -> HttpError {
    if err.is_timeout() {
        HttpError::Timeout(timeout)
    } else if err.is_builder() {
        HttpError::Build(err.to_string())
    } else {
        HttpError::Network(err.to_string())
    }
}

fn prefix_at_char_boundary(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    &s[..cut]
}

fn snip_body(body: &str) -> String {
    let prefix = prefix_at_char_boundary(body, 500);
    if prefix.len() < body.len() {
        format!("{prefix}...")
    } else {
        prefix.to_string()
    }
}

fn redact_query(url: &Url) -> (String, Vec<(String, String)>) {
    // Return "host + path" string and redacted query list for logging
    let host_path = format!("{}{}", url.host_str().unwrap_or("-"), url.path());
    let redacted = url
        .query_pairs()
        .map(|(k, v)| {
            let k = k.to_string();
            let v = if is_secret_key(&k) {
                "<redacted>".to_string()
            } else {
                v.to_string()
            };
            (k, v)
        })
        .collect::<Vec<_>>();
    (host_path, redacted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_secret_query_params() {
        let url = Url::parse("https://example.org/page?id=7&api_key=hunter2&Token=x").unwrap();
        let (host_path, q) = redact_query(&url);
        assert_eq!(host_path, "example.org/page");
        assert_eq!(
            q,
            vec![
                ("id".to_string(), "7".to_string()),
                ("api_key".to_string(), "<redacted>".to_string()),
                ("Token".to_string(), "<redacted>".to_string()),
            ]
        );
    }

    #[test]
    fn curl_line_never_contains_secrets() {
        let url = Url::parse("https://example.org/p?token=abc&lang=en").unwrap();
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_static("Bearer abc"));
        let curl = make_curl(&Method::GET, &url, &headers);
        assert!(!curl.contains("abc"));
        assert!(curl.contains("lang=en"));
        assert!(curl.starts_with("curl -XGET"));
    }

    #[test]
    fn snip_body_truncates_on_char_boundary() {
        let body = "₹".repeat(400);
        let snip = snip_body(&body);
        assert!(snip.ends_with("..."));
        assert!(snip.len() <= 503);
    }
}
