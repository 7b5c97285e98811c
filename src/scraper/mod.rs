//! The request normalizer: one logical query in, normalized records out.
//!
//! Every operation is a single stateless translation. The query kind selects
//! an endpoint descriptor, the descriptor's base URL plus the query's
//! parameters become one GET, and the descriptor's response shape selects the
//! parsing routine. The public entry points below are parameter-shaping
//! wrappers over that one path.

pub mod similar;

use reqwest::Url;
use serde_json::Value;
use tracing::{info, instrument};

use crate::common::error::{Result, ScraperError};
use crate::common::storefront::StoreFront;
use crate::common::types::{AppId, AppRecord, Query};
use crate::endpoints::{descriptor, Endpoint, ResponseShape};
use crate::infra::http_client::{ReqwestStoreClient, StoreClient, StorePayload, StoreRequest};

pub struct AppStoreScraper {
    client: Box<dyn StoreClient>,
}

impl Default for AppStoreScraper {
    fn default() -> Self {
        Self::new()
    }
}

impl AppStoreScraper {
    pub fn new() -> Self {
        Self {
            client: Box::new(ReqwestStoreClient::new()),
        }
    }

    /// Scraper backed by a caller-supplied client, used by tests to feed
    /// canned responses.
    pub fn with_client(client: Box<dyn StoreClient>) -> Self {
        Self { client }
    }

    /// Resolve a logical query against a storefront into normalized records.
    ///
    /// Exactly one outbound GET per call; each call runs to completion or
    /// fails before returning. No retries.
    #[instrument(skip(self))]
    pub async fn resolve(&self, query: &Query, store: &StoreFront) -> Result<Vec<AppRecord>> {
        let endpoint = descriptor(query.kind());
        let request = build_request(endpoint, query, store)?;
        let payload = self.client.get(&request).await?;
        ensure_success(&request, &payload)?;
        let records = normalize(endpoint.shape, query, &payload)?;
        info!(
            "resolved {} record(s) for {:?} query",
            records.len(),
            query.kind()
        );
        Ok(records)
    }

    /// App ids matching a search term. At most `num * page` ids are
    /// returned; the service pages at 50 per request by default.
    pub async fn app_ids_for_query(
        &self,
        term: &str,
        num: usize,
        page: usize,
        store: &StoreFront,
    ) -> Result<Vec<u64>> {
        let query = Query::Search {
            term: term.to_string(),
            num,
            page,
        };
        let records = self.resolve(&query, store).await?;
        Ok(records.iter().filter_map(AppRecord::track_id).collect())
    }

    /// App ids in a named collection feed, e.g. `topfreeapplications`,
    /// optionally narrowed to a genre id.
    pub async fn app_ids_for_collection(
        &self,
        collection: &str,
        category: Option<u32>,
        num: usize,
        store: &StoreFront,
    ) -> Result<Vec<u64>> {
        let query = Query::Collection {
            collection: collection.to_string(),
            category,
            num,
        };
        let records = self.resolve(&query, store).await?;
        Ok(records.iter().filter_map(AppRecord::track_id).collect())
    }

    /// App ids published by a developer. Unknown developer ids yield an
    /// empty list. The count for a live developer drifts with the upstream
    /// catalog.
    pub async fn app_ids_for_developer(
        &self,
        developer_id: u64,
        store: &StoreFront,
    ) -> Result<Vec<u64>> {
        let query = Query::Developer { developer_id };
        let records = self.resolve(&query, store).await?;
        Ok(records.iter().filter_map(AppRecord::track_id).collect())
    }

    /// Full records for every app attributed to a developer.
    pub async fn apps_for_developer(
        &self,
        developer_id: u64,
        store: &StoreFront,
    ) -> Result<Vec<AppRecord>> {
        self.resolve(&Query::Developer { developer_id }, store).await
    }

    /// Ids of apps the store associates with the given app. A page without
    /// the similar-apps payload yields an empty list.
    pub async fn similar_app_ids_for_app(
        &self,
        app_id: u64,
        store: &StoreFront,
    ) -> Result<Vec<u64>> {
        let query = Query::Similar { app_id };
        let records = self.resolve(&query, store).await?;
        Ok(records.iter().filter_map(AppRecord::track_id).collect())
    }

    /// Detail record for one app. Zero upstream results means the id does
    /// not exist in this storefront: that is `None`, not an error.
    pub async fn app_details(&self, app_id: &AppId, store: &StoreFront) -> Result<Option<AppRecord>> {
        let query = Query::Details {
            app_id: app_id.clone(),
        };
        let records = self.resolve(&query, store).await?;
        Ok(records.into_iter().next())
    }

    /// Detail records for several app ids in one request. The service
    /// silently drops ids it cannot resolve, so the result may be shorter
    /// than the input; records correlate by id, never by position.
    pub async fn multiple_app_details(
        &self,
        app_ids: &[u64],
        store: &StoreFront,
    ) -> Result<Vec<AppRecord>> {
        let query = Query::BatchDetails {
            app_ids: app_ids.to_vec(),
        };
        self.resolve(&query, store).await
    }
}

fn ensure_success(request: &StoreRequest, payload: &StorePayload) -> Result<()> {
    if (200..=299).contains(&payload.status) {
        Ok(())
    } else {
        Err(ScraperError::Fetch(format!(
            "unexpected HTTP status {} for {}",
            payload.status, request.url
        )))
    }
}

fn build_request(endpoint: &Endpoint, query: &Query, store: &StoreFront) -> Result<StoreRequest> {
    match query {
        Query::Search { term, .. } => {
            if term.trim().is_empty() {
                return Err(ScraperError::InvalidQuery("no search term was given".into()));
            }
            let url = Url::parse_with_params(
                endpoint.base,
                &[
                    ("clientApplication", "Software"),
                    ("media", "software"),
                    ("term", term.as_str()),
                ],
            )
            .map_err(|e| ScraperError::InvalidQuery(e.to_string()))?;
            Ok(StoreRequest::new(url.to_string())
                .with_header(
                    "X-Apple-Store-Front",
                    format!("{},24 t:native", store.store_id),
                )
                .with_header("Accept-Language", store.lang.clone()))
        }
        Query::Collection {
            collection,
            category,
            num,
        } => {
            let mut url = format!("{}/{}", endpoint.base, collection);
            if let Some(genre) = category {
                url.push_str(&format!("/{}", genre));
            }
            url.push_str(&format!("/limit={}/json?s={}", num, store.store_id));
            Ok(StoreRequest::new(url))
        }
        Query::Developer { developer_id } => {
            lookup_request(endpoint, "id", &developer_id.to_string(), store)
        }
        Query::Similar { app_id } => {
            // Path country is fixed; the storefront header selects the store.
            let url = format!("{}/us/app/app/id{}", endpoint.base, app_id);
            Ok(StoreRequest::new(url)
                .with_header("X-Apple-Store-Front", format!("{},32", store.store_id))
                .with_header("Accept-Language", store.lang.clone()))
        }
        Query::Details { app_id } => match app_id {
            AppId::Track(id) => lookup_request(endpoint, "id", &id.to_string(), store),
            AppId::Bundle(bundle) => lookup_request(endpoint, "bundleId", bundle, store),
        },
        Query::BatchDetails { app_ids } => {
            if app_ids.is_empty() {
                return Err(ScraperError::InvalidQuery("no app ids were given".into()));
            }
            let joined = app_ids
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(",");
            lookup_request(endpoint, "id", &joined, store)
        }
    }
}

fn lookup_request(
    endpoint: &Endpoint,
    id_field: &str,
    id_value: &str,
    store: &StoreFront,
) -> Result<StoreRequest> {
    let url = Url::parse_with_params(
        endpoint.base,
        &[
            (id_field, id_value),
            ("country", store.country.as_str()),
            ("entity", "software"),
        ],
    )
    .map_err(|e| ScraperError::InvalidQuery(e.to_string()))?;
    Ok(StoreRequest::new(url.to_string()))
}

fn normalize(shape: ResponseShape, query: &Query, payload: &StorePayload) -> Result<Vec<AppRecord>> {
    match shape {
        ResponseShape::SearchBubbles => {
            let limit = match query {
                Query::Search { num, page, .. } => num.saturating_mul((*page).max(1)),
                _ => usize::MAX,
            };
            parse_search(parse_json(&payload.body)?, limit)
        }
        ResponseShape::Feed => parse_feed(parse_json(&payload.body)?),
        ResponseShape::LookupResults => {
            let records = parse_lookup(parse_json(&payload.body)?)?;
            Ok(filter_lookup(records, query))
        }
        ResponseShape::EmbeddedJson => {
            let ids = similar::extract_similar_ids(&payload.text())?;
            Ok(ids.into_iter().map(AppRecord::from_track_id).collect())
        }
    }
}

fn parse_json(body: &[u8]) -> Result<Value> {
    Ok(serde_json::from_slice(body)?)
}

/// `bubbles[0].results` from the search service. A response with no bubble
/// at all is zero results; a bubble without its results container is
/// malformed.
fn parse_search(value: Value, limit: usize) -> Result<Vec<AppRecord>> {
    let bubbles = value
        .get("bubbles")
        .and_then(Value::as_array)
        .ok_or_else(|| ScraperError::Parse("search response has no bubbles container".into()))?;
    let results = match bubbles.first() {
        Some(bubble) => bubble
            .get("results")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                ScraperError::Parse("search bubble has no results container".into())
            })?,
        None => return Ok(Vec::new()),
    };
    Ok(results
        .iter()
        .take(limit)
        .cloned()
        .filter_map(AppRecord::from_value)
        .collect())
}

/// `feed.entry` from the RSS generator. A feed without entries is zero
/// results; the generator emits a bare object instead of an array when the
/// feed has exactly one entry.
fn parse_feed(value: Value) -> Result<Vec<AppRecord>> {
    let feed = value
        .get("feed")
        .ok_or_else(|| ScraperError::Parse("collection response has no feed container".into()))?;
    let records = match feed.get("entry") {
        Some(Value::Array(entries)) => entries
            .iter()
            .cloned()
            .filter_map(AppRecord::from_value)
            .collect(),
        Some(entry @ Value::Object(_)) => {
            AppRecord::from_value(entry.clone()).into_iter().collect()
        }
        Some(_) => {
            return Err(ScraperError::Parse(
                "collection feed entry container has an unexpected shape".into(),
            ))
        }
        None => Vec::new(),
    };
    Ok(records)
}

/// `results` from the lookup service. A missing container is how the service
/// answers an id it does not know at all, so that is zero results rather
/// than a malformed response.
fn parse_lookup(value: Value) -> Result<Vec<AppRecord>> {
    match value.get("results") {
        Some(Value::Array(results)) => Ok(results
            .iter()
            .cloned()
            .filter_map(AppRecord::from_value)
            .collect()),
        Some(_) => Err(ScraperError::Parse(
            "lookup results container is not an array".into(),
        )),
        None => Ok(Vec::new()),
    }
}

/// Post-filter lookup results per query: developer listings keep only
/// software entries (the first result is the artist wrapper), batch lookups
/// keep only records whose id was actually asked for.
fn filter_lookup(records: Vec<AppRecord>, query: &Query) -> Vec<AppRecord> {
    match query {
        Query::Developer { .. } => records
            .into_iter()
            .filter(|record| record.wrapper_type() == Some("software"))
            .collect(),
        Query::BatchDetails { app_ids } => records
            .into_iter()
            .filter(|record| {
                record
                    .track_id()
                    .map(|id| app_ids.contains(&id))
                    .unwrap_or(false)
            })
            .collect(),
        _ => records,
    }
}
