//! Candidate requests and the first-success executor.
//!
//! The backend's route shape is not known up front. Each logical operation is
//! described as an ordered [`FallbackChain`] of [`Candidate`] requests, each a
//! separate guess at the API. [`FallbackExecutor`] sends them one after the
//! other and stops at the first 2xx response. A candidate is tried at most
//! once per call and there is no backoff.

use crate::error::{ClientError, Result};
use reqwest::{Client, Method, Response};
use serde::Serialize;
use tracing::{debug, warn};
use url::Url;

/// One hypothesized request shape: verb, path and optional query pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    method: Method,
    segments: Vec<String>,
    query: Option<(&'static str, String)>,
}

impl Candidate {
    pub fn new(method: Method, segments: &[&str]) -> Self {
        Self {
            method,
            segments: segments.iter().map(|s| (*s).to_string()).collect(),
            query: None,
        }
    }

    /// Add a query parameter. The value is percent-encoded when rendered.
    pub fn with_query(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.query = Some((key, value.into()));
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Render the candidate against a base URL.
    ///
    /// Segments are appended to whatever path the base already has.
    pub fn url(&self, base: &Url) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidUrl(format!("{} cannot be a base", base)))?
            .pop_if_empty()
            .extend(&self.segments);

        if let Some((key, value)) = &self.query {
            url.query_pairs_mut().append_pair(key, value);
        }

        Ok(url)
    }
}

/// Ordered candidates for one logical operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackChain {
    candidates: Vec<Candidate>,
}

impl FallbackChain {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    /// A chain with a single known endpoint.
    pub fn single(candidate: Candidate) -> Self {
        Self::new(vec![candidate])
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

impl FromIterator<Candidate> for FallbackChain {
    fn from_iter<I: IntoIterator<Item = Candidate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Terminal state of a chain.
#[derive(Debug)]
pub enum Outcome {
    /// A candidate answered with a success status.
    Hit {
        /// Position of the winning candidate in the chain.
        index: usize,
        response: Response,
    },
    /// Every candidate failed. Carries the last attempted status and body.
    Exhausted { status: u16, body: String },
}

/// Sends a chain's candidates in order until one succeeds.
pub struct FallbackExecutor<'a> {
    http: &'a Client,
    base_url: &'a Url,
}

impl<'a> FallbackExecutor<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a Url) -> Self {
        Self { http, base_url }
    }

    /// Run the chain, sending `body` as JSON with every candidate.
    ///
    /// Candidates are attempted strictly sequentially. A transport error
    /// aborts the chain instead of moving on to the next candidate.
    pub async fn first_success<B>(&self, chain: &FallbackChain, body: Option<&B>) -> Result<Outcome>
    where
        B: Serialize + ?Sized,
    {
        let mut last_status = 0;
        let mut last_body = String::new();

        for (index, candidate) in chain.candidates().iter().enumerate() {
            let url = candidate.url(self.base_url)?;
            debug!(method = %candidate.method(), url = %url, index, "Trying candidate");

            let mut request = self.http.request(candidate.method().clone(), url.clone());
            if let Some(body) = body {
                request = request.json(body);
            }

            let response = request.send().await.map_err(ClientError::transport)?;
            let status = response.status();

            if status.is_success() {
                if index > 0 {
                    warn!(
                        method = %candidate.method(),
                        url = %url,
                        index,
                        "Fallback candidate succeeded; local state assumes primary semantics"
                    );
                }
                return Ok(Outcome::Hit { index, response });
            }

            last_status = status.as_u16();
            last_body = response.text().await.unwrap_or_default();
            debug!(status = last_status, url = %url, "Candidate missed");
        }

        warn!(
            candidates = chain.len(),
            status = last_status,
            "All candidates failed"
        );

        Ok(Outcome::Exhausted {
            status: last_status,
            body: last_body,
        })
    }
}
