pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod ingest;
pub mod models;
pub mod query;
pub mod routes;
pub mod utils;

pub use config::Config;
pub use db::Database;
pub use error::CatalogError;
pub use models::*;

use api::football_api::FootballApiClient;
use error::Result;
use ingest::{FailurePolicy, IngestReport};

/// Which provider listing to pull and where it belongs in the catalog
#[derive(Debug, Clone, Copy)]
pub struct SyncTarget {
    pub league: u32,
    pub season: u32,
    pub sport_id: i64,
}

/// Fetch a league season's teams from the provider and store the new ones
pub async fn sync_teams(
    db: &Database,
    client: &FootballApiClient,
    target: SyncTarget,
) -> Result<IngestReport> {
    // Teams hang off a sport, so refuse early instead of failing inside the batch
    if !db.sport_exists(target.sport_id).await? {
        return Err(CatalogError::not_found("Sport", target.sport_id));
    }

    let response = client.fetch_teams(target.league, target.season).await?;
    ingest::ingest_teams(db, &response, target.sport_id).await
}

/// Fetch a league season's fixtures from the provider and store the new ones.
///
/// Teams must already be ingested for the same sport; see [`sync_teams`].
pub async fn sync_fixtures(
    db: &Database,
    client: &FootballApiClient,
    target: SyncTarget,
    policy: FailurePolicy,
) -> Result<IngestReport> {
    if !db.sport_exists(target.sport_id).await? {
        return Err(CatalogError::not_found("Sport", target.sport_id));
    }

    let response = client.fetch_fixtures(target.league, target.season).await?;
    ingest::ingest_fixtures(db, &response, target.sport_id, policy).await
}
