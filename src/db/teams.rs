use super::Database;
use crate::error::{CatalogError, Result};
use crate::models::{NewTeam, Team};
use sqlx::{QueryBuilder, Sqlite};

const TEAM_COLUMNS: &str = "id, name, sport_id, description, image_url, is_active, api_id";

impl Database {
    pub async fn team_exists(&self, id: i64) -> Result<bool> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM teams WHERE id = ?)")
            .bind(id)
            .fetch_one(self.pool())
            .await?;
        Ok(exists != 0)
    }

    pub async fn get_team(&self, id: i64) -> Result<Team> {
        let sql = format!("SELECT {} FROM teams WHERE id = ?", TEAM_COLUMNS);
        sqlx::query_as::<_, Team>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| CatalogError::not_found("Team", id))
    }

    /// Find the team a provider id refers to.
    ///
    /// Provider ids are only unique within a sport, so the lookup is scoped to
    /// the sport being ingested. An id of 0 never resolves.
    pub async fn resolve_team(&self, sport_id: i64, api_id: i64) -> Result<Team> {
        if api_id == 0 {
            return Err(CatalogError::not_found("Team", "api_id 0"));
        }

        let sql = format!(
            "SELECT {} FROM teams WHERE sport_id = ? AND api_id = ?",
            TEAM_COLUMNS
        );
        sqlx::query_as::<_, Team>(&sql)
            .bind(sport_id)
            .bind(api_id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| {
                CatalogError::not_found("Team", format!("api_id {} in sport {}", api_id, sport_id))
            })
    }

    /// Insert teams in one statement. A row that clashes with a stored team, either on
    /// `(name, sport_id)` or on the sport's provider id, is left untouched.
    /// Returns how many rows were actually added.
    pub async fn insert_teams(&self, teams: &[NewTeam]) -> Result<u64> {
        if teams.is_empty() {
            return Ok(0);
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "INSERT INTO teams (name, sport_id, description, image_url, is_active, api_id) ",
        );
        builder.push_values(teams, |mut row, team| {
            row.push_bind(team.name.clone())
                .push_bind(team.sport_id)
                .push_bind(team.description.clone())
                .push_bind(team.image_url.clone())
                .push_bind(team.is_active)
                .push_bind(team.api_id);
        });
        builder.push(" ON CONFLICT DO NOTHING");

        let result = builder.build().execute(self.pool()).await?;
        tracing::debug!(
            "Inserted {} of {} teams",
            result.rows_affected(),
            teams.len()
        );
        Ok(result.rows_affected())
    }
}
