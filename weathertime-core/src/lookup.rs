use std::sync::Arc;

use reqwest::{Client, StatusCode, Url};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Credentials;

pub mod time;
pub mod weather;

pub use time::TimeLookup;
pub use weather::WeatherLookup;

/// Error from the network leg of a lookup.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Error from mapping a response body to display text.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("timestamp {0} is out of range")]
    TimestampOutOfRange(i64),
}

/// Per-endpoint configuration of the lookup flow: how to build the request
/// URL and how to turn a response body into display text.
pub trait Lookup: Send + Sync {
    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Build the request URL for `location`, or `None` when the lookup
    /// must be skipped without a network call (e.g. no timezone mapping).
    fn request_url(&self, location: &str, credentials: &Credentials) -> Option<Url>;

    /// Map a response body to the text shown to the user.
    fn parse(&self, body: &str) -> Result<String, ParseError>;

    /// Fixed message shown when `parse` fails. Parse causes are logged,
    /// never rendered.
    fn parse_failure_text(&self) -> &'static str;
}

/// One request → parse → display pipeline.
///
/// An invocation produces at most one display update: `Some(text)` on the
/// async branch (lookup result or error message), `None` when a guard
/// skipped the call synchronously. Nothing is retried and no failure
/// escapes past this boundary.
pub struct LookupFlow {
    lookup: Box<dyn Lookup>,
    credentials: Credentials,
    http: Client,
}

impl LookupFlow {
    pub fn new(lookup: Box<dyn Lookup>, credentials: Credentials) -> Self {
        Self { lookup, credentials, http: Client::new() }
    }

    /// Run one lookup to completion. A single GET, no timeout override,
    /// no retry; non-2xx counts as a transport failure.
    pub async fn execute(&self, location: &str) -> Option<String> {
        if location.is_empty() {
            return None;
        }

        let url = self.lookup.request_url(location, &self.credentials)?;
        debug!(lookup = self.lookup.name(), %location, "sending request");

        Some(match self.fetch(url).await {
            Ok(body) => self.parsed_text(&body),
            Err(err) => {
                warn!(lookup = self.lookup.name(), error = %err, "request failed");
                format!("Error: {err}")
            }
        })
    }

    /// Spawn [`Self::execute`] on the runtime and hand the single update
    /// (if any) to `sink`. The network call runs on a worker task; `sink`
    /// must only forward the text to whatever owns the display, e.g. a
    /// channel sender.
    pub fn dispatch<F>(self: Arc<Self>, location: String, sink: F)
    where
        F: FnOnce(String) + Send + 'static,
    {
        tokio::spawn(async move {
            if let Some(text) = self.execute(&location).await {
                sink(text);
            }
        });
    }

    fn parsed_text(&self, body: &str) -> String {
        match self.lookup.parse(body) {
            Ok(text) => text,
            Err(err) => {
                warn!(lookup = self.lookup.name(), error = %err, "unexpected response shape");
                self.lookup.parse_failure_text().to_string()
            }
        }
    }

    async fn fetch(&self, url: Url) -> Result<String, TransportError> {
        let res = self.http.get(url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(TransportError::Status { status, body: truncate_body(&body) });
        }

        Ok(body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct StubLookup {
        url: String,
        parses: bool,
    }

    impl Lookup for StubLookup {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn request_url(&self, location: &str, _credentials: &Credentials) -> Option<Url> {
            if location == "Nowhere" {
                return None;
            }
            Url::parse(&self.url).ok()
        }

        fn parse(&self, body: &str) -> Result<String, ParseError> {
            if self.parses {
                Ok(body.to_string())
            } else {
                Err(serde_json::from_str::<serde_json::Value>("not json").unwrap_err().into())
            }
        }

        fn parse_failure_text(&self) -> &'static str {
            "Failed to retrieve stub data."
        }
    }

    fn stub_flow(parses: bool) -> LookupFlow {
        stub_flow_at("http://example.invalid/lookup", parses)
    }

    fn stub_flow_at(url: &str, parses: bool) -> LookupFlow {
        let credentials =
            Credentials { weather_key: String::new(), timezone_key: String::new() };
        LookupFlow::new(Box::new(StubLookup { url: url.to_string(), parses }), credentials)
    }

    #[tokio::test]
    async fn empty_location_is_a_silent_no_op() {
        let flow = stub_flow(true);
        assert_eq!(flow.execute("").await, None);
    }

    #[tokio::test]
    async fn unmapped_location_is_a_silent_no_op() {
        let flow = stub_flow(true);
        assert_eq!(flow.execute("Nowhere").await, None);
    }

    #[test]
    fn parse_failure_renders_fixed_message() {
        let flow = stub_flow(false);
        assert_eq!(flow.parsed_text("{}"), "Failed to retrieve stub data.");
    }

    #[test]
    fn parse_success_renders_parsed_text() {
        let flow = stub_flow(true);
        assert_eq!(flow.parsed_text("hello"), "hello");
    }

    #[test]
    fn transport_error_text_embeds_the_cause() {
        let err = TransportError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "upstream down".to_string(),
        };

        let rendered = format!("Error: {err}");
        assert!(rendered.starts_with("Error: "));
        assert!(rendered.contains("503"));
        assert!(rendered.contains("upstream down"));
    }

    #[tokio::test]
    async fn connection_failure_renders_error_text() {
        // Bind to an ephemeral port and release it, so connecting fails fast.
        let addr = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap()
        };

        let flow = stub_flow_at(&format!("http://{addr}/lookup"), true);
        let text = flow.execute("City").await.expect("one display update");

        assert!(text.starts_with("Error: "), "unexpected text: {text}");
    }

    #[test]
    fn long_error_bodies_are_truncated() {
        let body = "x".repeat(500);
        let truncated = truncate_body(&body);

        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));
    }
}
