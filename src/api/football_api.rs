use crate::config::FootballApiConfig;
use crate::error::{CatalogError, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const API_HOST: &str = "v3.football.api-sports.io";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Envelope shared by every API-Football endpoint
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub get: String,
    // An empty array on success, an object keyed by problem otherwise
    #[serde(default)]
    pub errors: serde_json::Value,
    #[serde(default)]
    pub results: u32,
    pub response: Vec<T>,
}

impl<T> ApiEnvelope<T> {
    fn reported_errors(&self) -> Option<String> {
        match &self.errors {
            serde_json::Value::Null => None,
            serde_json::Value::Array(items) if items.is_empty() => None,
            serde_json::Value::Object(map) if map.is_empty() => None,
            other => Some(other.to_string()),
        }
    }
}

pub type TeamsResponse = ApiEnvelope<TeamItem>;
pub type FixturesResponse = ApiEnvelope<FixtureItem>;

/// One entry of `/teams`
#[derive(Debug, Clone, Deserialize)]
pub struct TeamItem {
    pub team: ApiTeam,
    pub venue: Option<ApiVenue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiTeam {
    pub id: i64,
    pub name: String,
    pub code: Option<String>,
    pub country: Option<String>,
    #[serde(default)]
    pub logo: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiVenue {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub city: Option<String>,
}

/// One entry of `/fixtures`
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureItem {
    pub fixture: ApiFixture,
    pub league: ApiLeague,
    pub teams: ApiMatchup,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiFixture {
    pub id: i64,
    pub date: String, // RFC3339
    pub timezone: Option<String>,
    pub status: ApiFixtureStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiFixtureStatus {
    #[serde(default)]
    pub long: String,
    pub short: String,
    pub elapsed: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiLeague {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    pub season: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMatchup {
    pub home: ApiSide,
    pub away: ApiSide,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiSide {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    response: AccountStatus,
}

#[derive(Debug, Deserialize)]
pub struct AccountStatus {
    pub requests: RequestQuota,
}

#[derive(Debug, Deserialize)]
pub struct RequestQuota {
    pub current: u32,
    pub limit_day: u32,
}

pub struct FootballApiClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl FootballApiClient {
    pub fn new(config: &FootballApiConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(CatalogError::Upstream(
                "FOOTBALL_API_KEY is not set".to_string(),
            ));
        }

        Ok(Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()?,
        })
    }

    /// Teams taking part in a league season
    pub async fn fetch_teams(&self, league: u32, season: u32) -> Result<TeamsResponse> {
        let response: TeamsResponse = self.get_season("teams", league, season).await?;
        tracing::info!(
            "Fetched {} teams for league {} season {}",
            response.response.len(),
            league,
            season
        );
        Ok(response)
    }

    /// Every fixture of a league season
    pub async fn fetch_fixtures(&self, league: u32, season: u32) -> Result<FixturesResponse> {
        let response: FixturesResponse = self.get_season("fixtures", league, season).await?;
        tracing::info!(
            "Fetched {} fixtures for league {} season {}",
            response.response.len(),
            league,
            season
        );
        Ok(response)
    }

    /// Daily request quota for the configured key
    pub async fn check_usage(&self) -> Result<RequestQuota> {
        let body = self.get_text("status", &[]).await?;
        let status: StatusResponse = serde_json::from_str(&body)?;
        Ok(status.response.requests)
    }

    async fn get_season<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        league: u32,
        season: u32,
    ) -> Result<ApiEnvelope<T>> {
        let league = league.to_string();
        let season = season.to_string();
        let body = self
            .get_text(endpoint, &[("league", league.as_str()), ("season", season.as_str())])
            .await?;
        parse_envelope(&body)
    }

    async fn get_text(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<String> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(query)
            .header("X-RapidAPI-Key", &self.api_key)
            .header("X-RapidAPI-Host", API_HOST)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(CatalogError::Upstream(format!(
                "{} returned {}: {}",
                endpoint, status, body
            )));
        }
        Ok(body)
    }
}

/// Decode a provider body, treating a non-empty `errors` field as a failed call
pub fn parse_envelope<T: DeserializeOwned>(body: &str) -> Result<ApiEnvelope<T>> {
    let envelope: ApiEnvelope<T> = serde_json::from_str(body)?;
    if let Some(errors) = envelope.reported_errors() {
        return Err(CatalogError::Upstream(format!(
            "provider reported errors for {}: {}",
            envelope.get, errors
        )));
    }
    Ok(envelope)
}
