// src/checker/probe.rs
// =============================================================================
// This module decides whether a single site is online.
//
// How a probe works:
// 1. Strip the target down to a bare host ("https://example.com/a" -> "example.com")
// 2. Try "http://<host>" with a HEAD request
// 3. If that fails, try "https://<host>"
// 4. The first scheme that gets ANY HTTP response means "online"
// 5. If every scheme fails, the site is "offline" and we keep the LAST error
//
// Why HEAD?
// - HEAD asks only for the response headers, no body
// - We don't care about the page, only that the server answers
//
// The actual network call sits behind the `HeadRequester` trait so the
// scheme-by-scheme logic can be tested without touching the network.
//
// Rust concepts:
// - Traits: Define behaviour that different types can implement
// - async-trait: Async methods in traits (usable as trait objects)
// - Enums with data: A tagged result instead of "bool + maybe error"
// - Generics: SiteProber<R> works with any HeadRequester
// =============================================================================

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;
use url::Url;

// Schemes we try, in order
pub const SCHEMES: [&str; 2] = ["http", "https"];

// A single URL/host string the user asked us to check
//
// This is a "newtype": a struct wrapping one value. It stops us from mixing
// up targets with any other random String in the program.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Target(String);

impl Target {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Target {
    fn from(raw: &str) -> Self {
        Target(raw.to_string())
    }
}

impl From<String> for Target {
    fn from(raw: String) -> Self {
        Target(raw)
    }
}

impl AsRef<str> for Target {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Why a single scheme attempt failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptError {
    /// No response within the timeout
    #[error("timed out")]
    TimedOut,
    /// Could not connect (DNS failure, connection refused, ...)
    #[error("{0}")]
    Connection(String),
    /// Anything else (invalid URL, TLS failure, protocol error, ...)
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for AttemptError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            AttemptError::TimedOut
        } else if error.is_connect() {
            AttemptError::Connection(describe_error(&error))
        } else {
            AttemptError::Other(describe_error(&error))
        }
    }
}

// The result of probing one target
//
// Online carries nothing; every offline variant says why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Online,
    TimedOut,
    ConnectionError(String),
    Other(String),
}

impl ProbeOutcome {
    pub fn is_online(&self) -> bool {
        matches!(self, ProbeOutcome::Online)
    }

    /// Human-readable cause when the target is offline, `None` when online
    pub fn error_detail(&self) -> Option<String> {
        match self {
            ProbeOutcome::Online => None,
            ProbeOutcome::TimedOut => Some(AttemptError::TimedOut.to_string()),
            ProbeOutcome::ConnectionError(detail) | ProbeOutcome::Other(detail) => {
                Some(detail.clone())
            }
        }
    }
}

impl From<AttemptError> for ProbeOutcome {
    fn from(error: AttemptError) -> Self {
        match error {
            AttemptError::TimedOut => ProbeOutcome::TimedOut,
            AttemptError::Connection(detail) => ProbeOutcome::ConnectionError(detail),
            AttemptError::Other(detail) => ProbeOutcome::Other(detail),
        }
    }
}

// Sends one HEAD request and reports whether ANY response came back
#[async_trait]
pub trait HeadRequester: Send + Sync {
    async fn head(&self, url: &Url) -> Result<(), AttemptError>;
}

// Checks whether a target is online
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, target: &Target) -> ProbeOutcome;
}

// The real HeadRequester, backed by reqwest
pub struct ReqwestHead {
    client: Client,
}

impl ReqwestHead {
    // Creates the HTTP client
    //
    // - timeout: applies to each request (connect + response headers)
    // - redirect none: a 301 is already proof the server is up
    // - pool_max_idle_per_host(0): no keep-alive, every attempt opens and
    //   closes its own connection
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .pool_max_idle_per_host(0)
            .build()?;

        Ok(ReqwestHead { client })
    }
}

#[async_trait]
impl HeadRequester for ReqwestHead {
    async fn head(&self, url: &Url) -> Result<(), AttemptError> {
        // Any status code counts: a 404 or 500 still means the server answered
        self.client.head(url.clone()).send().await?;
        Ok(())
    }
}

// Probes a target by trying each scheme in SCHEMES until one answers
pub struct SiteProber<R> {
    requester: R,
}

impl<R: HeadRequester> SiteProber<R> {
    pub fn new(requester: R) -> Self {
        SiteProber { requester }
    }
}

#[async_trait]
impl<R: HeadRequester> Prober for SiteProber<R> {
    async fn probe(&self, target: &Target) -> ProbeOutcome {
        let host = bare_host(target.as_str());
        let mut last_error: Option<AttemptError> = None;

        for scheme in SCHEMES {
            let attempt = match candidate_url(scheme, host) {
                Ok(url) => {
                    let result = self.requester.head(&url).await;
                    debug!(site = %target, url = %url, ?result, "HEAD attempt finished");
                    result
                }
                Err(e) => {
                    debug!(site = %target, scheme, error = %e, "Could not build URL");
                    Err(e)
                }
            };

            match attempt {
                Ok(()) => return ProbeOutcome::Online,
                Err(e) => last_error = Some(e),
            }
        }

        match last_error {
            Some(e) => ProbeOutcome::from(e),
            // Only reachable if SCHEMES were empty
            None => ProbeOutcome::Other("unknown error".to_string()),
        }
    }
}

// Reduces a target to its host part
//
// Examples:
//   "example.com"                   -> "example.com"
//   "https://example.com/docs?q=1"  -> "example.com"
//   "localhost:8080/health"         -> "localhost:8080"
//   "http://"                       -> ""
pub fn bare_host(target: &str) -> &str {
    let target = target.trim();

    let without_scheme = match target.find("://") {
        Some(index) => &target[index + 3..],
        None => target,
    };

    match without_scheme.find(['/', '?', '#']) {
        Some(index) => &without_scheme[..index],
        None => without_scheme,
    }
}

// Builds and validates "<scheme>://<host>"
//
// An empty or malformed host fails here, which is recorded as that
// attempt's error like any network failure.
fn candidate_url(scheme: &str, host: &str) -> Result<Url, AttemptError> {
    Url::parse(&format!("{}://{}", scheme, host))
        .map_err(|e| AttemptError::Other(format!("invalid URL '{}://{}': {}", scheme, host, e)))
}

// Formats an error together with all of its causes
//
// reqwest's own message is just "error sending request for url (...)";
// the useful part (e.g. the DNS failure) lives in the source chain.
fn describe_error(error: &dyn std::error::Error) -> String {
    let mut detail = error.to_string();
    let mut source = error.source();

    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !detail.contains(&cause_text) {
            detail.push_str(": ");
            detail.push_str(&cause_text);
        }
        source = cause.source();
    }

    detail
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a trait for the HTTP call?
//    - Real network calls are slow and flaky in tests
//    - Tests plug in a fake HeadRequester that returns scripted results
//    - The production code uses ReqwestHead; the logic is identical
//
// 2. What is #[async_trait]?
//    - Lets us write `async fn` inside traits and still use `dyn Prober`
//    - It rewrites the method to return a boxed future behind the scenes
//
// 3. Why `Send + Sync` on the traits?
//    - tokio may move our futures between threads
//    - Send: the value can move to another thread
//    - Sync: the value can be shared (&T) between threads
//
// 4. What does the ? on `.send().await?` do here?
//    - head() returns Result<(), AttemptError>
//    - ? converts reqwest::Error into AttemptError using our From impl
//
// 5. Why return &str from bare_host?
//    - The host is just a slice of the input string, no copy needed
//    - The lifetime ties the result to the input (compiler checks this)
// -----------------------------------------------------------------------------
