use std::time::Duration;

use async_trait::async_trait;

use crate::common::constants::{REQUEST_TIMEOUT_SECS, USER_AGENT};
use crate::common::error::Result;

/// A single outbound GET: absolute URL plus any extra request headers.
#[derive(Debug, Clone)]
pub struct StoreRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
}

impl StoreRequest {
    pub fn new(url: String) -> Self {
        Self {
            url,
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &'static str, value: String) -> Self {
        self.headers.push((name, value));
        self
    }
}

/// Raw response as fetched: the status is carried through so the caller
/// decides what counts as a failure.
#[derive(Debug, Clone)]
pub struct StorePayload {
    pub status: u16,
    pub body: Vec<u8>,
}

impl StorePayload {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

/// Outbound HTTP seam. Production goes through reqwest; tests substitute a
/// canned implementation so every normalizer path runs offline.
#[async_trait]
pub trait StoreClient: Send + Sync {
    async fn get(&self, request: &StoreRequest) -> Result<StorePayload>;
}

pub struct ReqwestStoreClient {
    client: reqwest::Client,
}

impl Default for ReqwestStoreClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestStoreClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .expect("HTTP client construction");
        Self { client }
    }
}

#[async_trait]
impl StoreClient for ReqwestStoreClient {
    async fn get(&self, request: &StoreRequest) -> Result<StorePayload> {
        tracing::debug!("HTTP GET request to: {}", request.url);
        let mut builder = self.client.get(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }
        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?.to_vec();
        tracing::debug!("HTTP response: status={}, size={} bytes", status, body.len());
        Ok(StorePayload { status, body })
    }
}
