//! Fetch a few historical events that happened "on this day" from the
//! [Wikidata query service], using the [SPARQL1.1 protocol].
//!
//! Example:
//! ```no_run
//! use chrono::NaiveDate;
//! use daily_facts::{QueryRunner, SparqlClient, WIKIDATA_ENDPOINT};
//!
//! # fn bla() -> Result<(), Box<dyn std::error::Error>> {
//! let cli = SparqlClient::new(WIKIDATA_ENDPOINT);
//! let day = NaiveDate::from_ymd_opt(2024, 6, 18).unwrap();
//! for row in QueryRunner::new(cli, day).fetch()? {
//!     println!("{:?}\t{:?}", row.label, row.date);
//! }
//! # Ok(()) }
//! ```
//!
//! [Wikidata query service]: https://query.wikidata.org/
//! [SPARQL1.1 protocol]: https://www.w3.org/TR/sparql11-protocol/
use log::{debug, trace, warn};
use std::io::{self, Read};
use std::time::Duration;
use ureq::{Agent, Error as UreqError};

pub mod query;
pub mod report;
mod results;
mod runner;

pub use report::ResultRow;
pub use results::{BindingsDocument, Term, TermKind};
pub use runner::QueryRunner;

/// The public Wikidata SPARQL endpoint.
pub const WIKIDATA_ENDPOINT: &str = "https://query.wikidata.org/sparql";

/// Wikidata's usage policy rejects requests without an identifying User-Agent.
pub const USER_AGENT: &str = "DailyFactsBot/1.0 (mailto:your_email@example.com)";

/// Largest response body read from the endpoint.
const MAX_BODY: u64 = 10 * 1024 * 1024;

/// Wikidata itself aborts queries after 60 seconds.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Something able to answer a SPARQL `SELECT` query.
pub trait SparqlEndpoint {
    fn select(&self, query: &str) -> Result<BindingsDocument, Error>;
}

impl<T: SparqlEndpoint + ?Sized> SparqlEndpoint for &T {
    fn select(&self, query: &str) -> Result<BindingsDocument, Error> {
        (**self).select(query)
    }
}

pub struct SparqlClient {
    endpoint: Box<str>,
    agent: Agent,
    accept: Option<String>,
    user_agent: String,
    timeout: Option<Duration>,
}

impl SparqlClient {
    /// The default [Accept HTTP header](https://tools.ietf.org/html/rfc7231.html#section-5.3.2) used by clients.
    const DEFAULT_ACCEPT: &'static str = "application/sparql-results+json";

    /// Create a [`SparqlClient`] on the given SPARQL-endpoint URL.
    ///
    /// Requests carry [`USER_AGENT`] and have no timeout until [`with_timeout`](Self::with_timeout) is called.
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: Box::from(endpoint),
            agent: Agent::new(),
            accept: None,
            user_agent: USER_AGENT.to_string(),
            timeout: None,
        }
    }

    /// Replace the underlying [`ureq::Agent`] of this client.
    pub fn with_agent(mut self, agent: Agent) -> Self {
        self.agent = agent;
        self
    }

    /// Replace the [Accept HTTP header](https://tools.ietf.org/html/rfc7231.html#section-5.3.2) used by this client.
    ///
    /// See also [`DEFAULT_ACCEPT`](Self::DEFAULT_ACCEPT)
    pub fn with_accept<T: ToString>(mut self, accept: T) -> Self {
        self.accept = Some(accept.to_string());
        self
    }

    pub fn with_user_agent<T: ToString>(mut self, user_agent: T) -> Self {
        self.user_agent = user_agent.to_string();
        self
    }

    /// Bound the whole request (connect, send, read). `None` waits forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The [Accept HTTP header](https://tools.ietf.org/html/rfc7231.html#section-5.3.2) used by this client.
    pub fn accept(&self) -> &str {
        self.accept.as_deref().unwrap_or(Self::DEFAULT_ACCEPT)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SparqlEndpoint for SparqlClient {
    fn select(&self, query: &str) -> Result<BindingsDocument, Error> {
        debug!("GET {} with query:{}", self.endpoint, query);
        let mut req = self
            .agent
            .get(&self.endpoint)
            .set("Accept", self.accept())
            .set("User-Agent", &self.user_agent)
            .query("format", "json")
            .query("query", query);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        let resp = req.call()?;
        match resp.content_type() {
            "application/sparql-results+json" | "application/json" => (),
            ctype => warn!("unexpected content-type {:?}, parsing as JSON anyway", ctype),
        }
        let mut buf = Vec::new();
        resp.into_reader().take(MAX_BODY).read_to_end(&mut buf)?;
        let body =
            String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        trace!("response body: {}", body);
        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(
        #[source]
        #[from]
        std::io::Error,
    ),
    #[error("http error: {}", describe(.0))]
    Http(#[source] Box<UreqError>),
    #[error("JSON parsing error: {0}")]
    Json(
        #[source]
        #[from]
        serde_json::Error,
    ),
}

impl From<UreqError> for Error {
    fn from(other: UreqError) -> Error {
        Error::Http(Box::new(other))
    }
}

/// ureq's own message embeds the full request URL, query included.
fn describe(err: &UreqError) -> String {
    match err {
        UreqError::Status(code, resp) => format!("status code {} {}", code, resp.status_text()),
        UreqError::Transport(t) => {
            let mut msg = t.kind().to_string();
            if let Some(detail) = t.message() {
                msg = format!("{}: {}", msg, detail);
            }
            if let Some(source) = std::error::Error::source(t) {
                msg = format!("{}: {}", msg, source);
            }
            msg
        }
    }
}
