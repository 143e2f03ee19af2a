//! HTTP client for the upstream space data APIs.
//!
//! All requests are read-only GETs returning JSON. Base URLs and the NASA key
//! come from [`DashboardConfig`]; every request carries the configured timeout.

use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use astrapatch_core::models::*;

use crate::config::DashboardConfig;

/// Upstream launch query size; filtering happens client-side.
const LAUNCH_FETCH_LIMIT: &str = "20";
const CREW_FETCH_LIMIT: &str = "20";
const SPACEWALK_FETCH_LIMIT: &str = "10";

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure, including timeouts.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Upstream returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for Launch Library 2, Where The ISS At, and NASA's open APIs.
#[derive(Debug, Clone)]
pub struct SpaceClient {
    launch_api_url: String,
    iss_api_url: String,
    nasa_api_url: String,
    nasa_api_key: String,
    client: Client,
}

impl SpaceClient {
    pub fn new(config: &DashboardConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("astrapatch/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            launch_api_url: trim_base(&config.launch_api_url),
            iss_api_url: trim_base(&config.iss_api_url),
            nasa_api_url: trim_base(&config.nasa_api_url),
            nasa_api_key: config.nasa_api_key.clone(),
            client,
        })
    }

    /// GET `url` with query parameters and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).query(query).send().await?;
        self.handle_response(response).await
    }

    /// Handle response, converting HTTP errors to ClientError.
    ///
    /// The body is decoded separately from the transfer so malformed JSON
    /// surfaces as [`ClientError::Decode`].
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        if status.is_success() {
            let body = response.bytes().await?;
            Ok(serde_json::from_slice(&body)?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ClientError::Status { status, body })
        }
    }

    // ============================================================
    // Launch Library
    // ============================================================

    pub async fn upcoming_launches(&self) -> Result<LaunchListResponse, ClientError> {
        let url = format!("{}/launch/upcoming/", self.launch_api_url);
        self.get_json(&url, &[("mode", "detailed"), ("limit", LAUNCH_FETCH_LIMIT)])
            .await
    }

    pub async fn iss_crew(&self) -> Result<CrewResponse, ClientError> {
        let url = format!("{}/astronaut/", self.launch_api_url);
        self.get_json(&url, &[("on_iss", "true"), ("limit", CREW_FETCH_LIMIT)])
            .await
    }

    pub async fn upcoming_spacewalks(&self) -> Result<SpacewalkResponse, ClientError> {
        let url = format!("{}/spacewalk/upcoming/", self.launch_api_url);
        self.get_json(&url, &[("limit", SPACEWALK_FETCH_LIMIT)]).await
    }

    // ============================================================
    // ISS
    // ============================================================

    pub async fn iss_position(&self) -> Result<IssPositionPayload, ClientError> {
        let url = format!("{}/satellites/{}", self.iss_api_url, ISS_NORAD_ID);
        self.get_json(&url, &[]).await
    }

    // ============================================================
    // NASA
    // ============================================================

    /// Events from one DONKI feed between two dates, inclusive.
    ///
    /// DONKI answers `null` for an empty window; that reads as no events.
    pub async fn donki<T: DeserializeOwned>(
        &self,
        kind: SolarKind,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<T>, ClientError> {
        let url = format!("{}/DONKI/{}", self.nasa_api_url, kind.endpoint());
        let start = start.format("%Y-%m-%d").to_string();
        let end = end.format("%Y-%m-%d").to_string();
        let events: Option<Vec<T>> = self
            .get_json(
                &url,
                &[
                    ("startDate", start.as_str()),
                    ("endDate", end.as_str()),
                    ("api_key", self.nasa_api_key.as_str()),
                ],
            )
            .await?;
        Ok(events.unwrap_or_default())
    }

    pub async fn neo_feed(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<NeoFeedResponse, ClientError> {
        let url = format!("{}/neo/rest/v1/feed", self.nasa_api_url);
        let start = start.format("%Y-%m-%d").to_string();
        let end = end.format("%Y-%m-%d").to_string();
        self.get_json(
            &url,
            &[
                ("start_date", start.as_str()),
                ("end_date", end.as_str()),
                ("api_key", self.nasa_api_key.as_str()),
            ],
        )
        .await
    }

    pub async fn apod(&self) -> Result<ApodPayload, ClientError> {
        let url = format!("{}/planetary/apod", self.nasa_api_url);
        self.get_json(&url, &[("api_key", self.nasa_api_key.as_str())])
            .await
    }
}

fn trim_base(url: &str) -> String {
    url.trim_end_matches('/').to_string()
}
