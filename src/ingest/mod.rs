//! Turns provider payloads into catalog records and stores them.

use crate::api::football_api::{FixtureItem, FixturesResponse, TeamItem, TeamsResponse};
use crate::db::Database;
use crate::error::{CatalogError, Result};
use crate::models::{NewFixture, NewTeam, Team};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// What to do with a record that cannot be mapped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum FailurePolicy {
    /// Record the failure and keep going with the rest of the batch
    #[default]
    Skip,
    /// Stop at the first failure; nothing from the batch is stored
    Abort,
}

/// A provider record that did not make it into the catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestFailure {
    pub provider_id: i64,
    pub reason: String,
}

/// Outcome of one ingestion run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngestReport {
    pub fetched: usize,
    pub mapped: usize,
    pub inserted: u64,
    pub failures: Vec<IngestFailure>,
}

impl IngestReport {
    /// Mapped records that were already stored
    pub fn unchanged(&self) -> u64 {
        self.mapped as u64 - self.inserted
    }

    pub fn format(&self) -> String {
        format!(
            "fetched {}, mapped {}, inserted {}, already stored {}, failed {}",
            self.fetched,
            self.mapped,
            self.inserted,
            self.unchanged(),
            self.failures.len()
        )
    }
}

pub fn map_team(item: &TeamItem, sport_id: i64) -> NewTeam {
    NewTeam {
        name: item.team.name.clone(),
        sport_id,
        description: String::new(), // Not supplied by the provider
        image_url: item.team.logo.clone(),
        is_active: true,
        api_id: item.team.id,
    }
}

pub fn map_teams(response: &TeamsResponse, sport_id: i64) -> Vec<NewTeam> {
    response
        .response
        .iter()
        .map(|item| map_team(item, sport_id))
        .collect()
}

/// Resolves provider team ids for one sport, remembering hits for the rest of the run
pub struct TeamResolver<'a> {
    db: &'a Database,
    sport_id: i64,
    known: HashMap<i64, Team>,
}

impl<'a> TeamResolver<'a> {
    pub fn new(db: &'a Database, sport_id: i64) -> Self {
        Self {
            db,
            sport_id,
            known: HashMap::new(),
        }
    }

    pub async fn resolve(&mut self, api_id: i64) -> Result<Team> {
        if let Some(team) = self.known.get(&api_id) {
            return Ok(team.clone());
        }
        let team = self.db.resolve_team(self.sport_id, api_id).await?;
        self.known.insert(api_id, team.clone());
        Ok(team)
    }
}

fn parse_kickoff(item: &FixtureItem) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(&item.fixture.date)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            CatalogError::Upstream(format!(
                "fixture {} has an invalid date {:?}: {}",
                item.fixture.id, item.fixture.date, e
            ))
        })
}

/// Map one provider fixture onto internal team ids
pub async fn map_fixture(resolver: &mut TeamResolver<'_>, item: &FixtureItem) -> Result<NewFixture> {
    let home = resolver.resolve(item.teams.home.id).await?;
    let away = resolver.resolve(item.teams.away.id).await?;
    if home.id == away.id {
        return Err(CatalogError::Upstream(format!(
            "fixture {} has {} on both sides",
            item.fixture.id, home.name
        )));
    }
    let kickoff = parse_kickoff(item)?;

    Ok(NewFixture::between(
        &home,
        &away,
        kickoff,
        item.fixture.status.short.clone(),
    ))
}

/// Records that mapped cleanly plus the ones that did not
#[derive(Debug, Default)]
pub struct MappedBatch<T> {
    pub records: Vec<T>,
    pub failures: Vec<IngestFailure>,
}

pub async fn map_fixtures(
    db: &Database,
    response: &FixturesResponse,
    sport_id: i64,
    policy: FailurePolicy,
) -> Result<MappedBatch<NewFixture>> {
    let mut resolver = TeamResolver::new(db, sport_id);
    let mut batch = MappedBatch {
        records: Vec::with_capacity(response.response.len()),
        failures: Vec::new(),
    };

    for item in &response.response {
        match map_fixture(&mut resolver, item).await {
            Ok(fixture) => batch.records.push(fixture),
            // A broken store is never a per-record problem
            Err(err @ CatalogError::Storage(_)) => return Err(err),
            Err(err) if policy == FailurePolicy::Abort => return Err(err),
            Err(err) => {
                tracing::warn!(
                    "Skipping fixture {} ({} vs {}): {}",
                    item.fixture.id,
                    item.teams.home.name,
                    item.teams.away.name,
                    err
                );
                batch.failures.push(IngestFailure {
                    provider_id: item.fixture.id,
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(batch)
}

/// Map and store a provider team listing
pub async fn ingest_teams(
    db: &Database,
    response: &TeamsResponse,
    sport_id: i64,
) -> Result<IngestReport> {
    let teams = map_teams(response, sport_id);
    let inserted = db.insert_teams(&teams).await?;

    let report = IngestReport {
        fetched: response.response.len(),
        mapped: teams.len(),
        inserted,
        failures: Vec::new(),
    };
    tracing::info!("Team ingestion: {}", report.format());
    Ok(report)
}

/// Map and store a provider fixture listing
pub async fn ingest_fixtures(
    db: &Database,
    response: &FixturesResponse,
    sport_id: i64,
    policy: FailurePolicy,
) -> Result<IngestReport> {
    let batch = map_fixtures(db, response, sport_id, policy).await?;
    let inserted = db.insert_fixtures(&batch.records).await?;

    let report = IngestReport {
        fetched: response.response.len(),
        mapped: batch.records.len(),
        inserted,
        failures: batch.failures,
    };
    tracing::info!("Fixture ingestion: {}", report.format());
    Ok(report)
}
