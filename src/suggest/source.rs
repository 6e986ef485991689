use dioxus::logger::tracing;
use futures::future::{FutureExt, LocalBoxFuture};
use futures::stream::{self, Stream, StreamExt};
use reqwest::{RequestBuilder, Url};
use std::time::Duration;

use super::model::{parse_suggestions, Suggestion};
use super::suggest_box::LookupRequest;
use crate::contexts::{LookupError, LookupResult};
use crate::utils::config::TERM_QUERY_PARAM;
use crate::utils::settings::Settings;

/// Anything that can answer a term with a list of suggestions
pub trait SuggestionSource {
    fn lookup(&self, term: &str) -> LocalBoxFuture<'static, LookupResult<Vec<Suggestion>>>;
}

/// Suggestion source backed by an HTTP endpoint returning a JSON array
#[derive(Clone, Debug)]
pub struct HttpSuggestionSource {
    endpoint: Url,
    timeout: Option<Duration>,
    client: reqwest::Client,
}

impl HttpSuggestionSource {
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> LookupResult<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            endpoint,
            timeout,
            client,
        })
    }

    pub fn from_settings(settings: &Settings) -> LookupResult<Self> {
        let endpoint = settings
            .suggest_endpoint()
            .map_err(|e| LookupError::InvalidEndpoint(e.to_string()))?;
        Self::new(endpoint, settings.request_timeout())
    }

    /// The endpoint with the term appended as the `term` query parameter
    pub fn request_url(&self, term: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair(TERM_QUERY_PARAM, term);
        url
    }
}

impl SuggestionSource for HttpSuggestionSource {
    fn lookup(&self, term: &str) -> LocalBoxFuture<'static, LookupResult<Vec<Suggestion>>> {
        let client = self.client.clone();
        let url = self.request_url(term);
        let timeout = self.timeout;

        async move {
            let request = with_timeout(client.get(url), timeout);
            let response = request.send().await?.error_for_status()?;
            let body = response.bytes().await?;
            parse_suggestions(&body)
        }
        .boxed_local()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn with_timeout(request: RequestBuilder, timeout: Option<Duration>) -> RequestBuilder {
    match timeout {
        Some(timeout) => request.timeout(timeout),
        None => request,
    }
}

// The browser fetch backend has no per-request timeout
#[cfg(target_arch = "wasm32")]
fn with_timeout(request: RequestBuilder, _timeout: Option<Duration>) -> RequestBuilder {
    request
}

/// Run `request` against `source` as a lazy, one-shot stream of suggestions.
///
/// Nothing is sent until the stream is polled. A failed lookup is logged and
/// yields no items.
pub fn fetch_suggestions<S>(source: &S, request: &LookupRequest) -> impl Stream<Item = Suggestion>
where
    S: SuggestionSource + ?Sized,
{
    let term = request.term.clone();
    let lookup = source.lookup(&request.term);

    stream::once(async move {
        match lookup.await {
            Ok(items) => {
                tracing::debug!("Lookup for {:?} returned {} suggestions", term, items.len());
                items
            }
            Err(e) => {
                tracing::warn!("Lookup for {:?} failed: {}", term, e);
                Vec::new()
            }
        }
    })
    .flat_map(stream::iter)
}
