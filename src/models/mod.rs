use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A sport such as soccer or basketball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Sport {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image_url: String,
    pub is_active: bool,
}

/// A team belonging to exactly one sport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub sport_id: i64,
    pub description: String,
    pub image_url: String,
    pub is_active: bool,
    pub api_id: i64, // Provider id, 0 when not externally sourced
}

/// A team ready to be inserted, before the store assigns an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTeam {
    pub name: String,
    pub sport_id: i64,
    pub description: String,
    pub image_url: String,
    pub is_active: bool,
    pub api_id: i64,
}

/// Display snapshot stored alongside a fixture.
///
/// Captured when the fixture is ingested, so team names here can lag behind a
/// later rename of the live team record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureDetails {
    pub home_team: String,
    pub away_team: String,
    pub date_time: DateTime<Utc>,
    pub status: String,
}

/// A scheduled match between two teams of the same sport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: i64,
    pub sport_id: i64,
    pub team_id_1: i64, // Home
    pub team_id_2: i64, // Away
    pub date_time: DateTime<Utc>,
    pub details: FixtureDetails,
    pub status: String, // Provider short code, passed through untouched
}

/// A fixture ready to be inserted, before the store assigns an id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFixture {
    pub sport_id: i64,
    pub team_id_1: i64,
    pub team_id_2: i64,
    pub date_time: DateTime<Utc>,
    pub details: FixtureDetails,
    pub status: String,
}

impl NewFixture {
    /// Build a fixture from two resolved teams, snapshotting their current names
    pub fn between(
        home: &Team,
        away: &Team,
        date_time: DateTime<Utc>,
        status: impl Into<String>,
    ) -> Self {
        let status = status.into();
        Self {
            sport_id: home.sport_id,
            team_id_1: home.id,
            team_id_2: away.id,
            date_time,
            details: FixtureDetails {
                home_team: home.name.clone(),
                away_team: away.name.clone(),
                date_time,
                status: status.clone(),
            },
            status,
        }
    }
}
