use super::{decode_timestamp, encode_timestamp, Database};
use crate::error::Result;
use crate::models::{Fixture, FixtureDetails, NewFixture};
use chrono::{DateTime, Utc};
use sqlx::{QueryBuilder, Sqlite};

/// A fixture as it sits in the table, before the text columns are decoded
#[derive(Debug, sqlx::FromRow)]
struct FixtureRow {
    id: i64,
    sport_id: i64,
    team_id_1: i64,
    team_id_2: i64,
    date_time: String,
    details: String,
    status: String,
}

impl TryFrom<FixtureRow> for Fixture {
    type Error = crate::error::CatalogError;

    fn try_from(row: FixtureRow) -> Result<Self> {
        let details: FixtureDetails = serde_json::from_str(&row.details)
            .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(Fixture {
            id: row.id,
            sport_id: row.sport_id,
            team_id_1: row.team_id_1,
            team_id_2: row.team_id_2,
            date_time: decode_timestamp(&row.date_time)?,
            details,
            status: row.status,
        })
    }
}

impl Database {
    /// Every fixture with `start <= date_time <= end`, earliest first.
    /// Callers validate the range; this only talks to the store.
    pub async fn fixtures_between(
        &self,
        start: &DateTime<Utc>,
        end: &DateTime<Utc>,
    ) -> Result<Vec<Fixture>> {
        let rows = sqlx::query_as::<_, FixtureRow>(
            "SELECT id, sport_id, team_id_1, team_id_2, date_time, details, status \
             FROM fixtures \
             WHERE date_time >= ? AND date_time <= ? \
             ORDER BY date_time, id",
        )
        .bind(encode_timestamp(start))
        .bind(encode_timestamp(end))
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(Fixture::try_from).collect()
    }

    /// Insert fixtures in one statement. A fixture whose
    /// `(sport_id, team_id_1, team_id_2, date_time)` is already stored is skipped,
    /// so status changes upstream are not picked up by re-ingesting.
    /// Returns how many rows were actually added.
    pub async fn insert_fixtures(&self, fixtures: &[NewFixture]) -> Result<u64> {
        if fixtures.is_empty() {
            return Ok(0);
        }

        let encoded = fixtures
            .iter()
            .map(|fixture| -> Result<(&NewFixture, String, String)> {
                let details = serde_json::to_string(&fixture.details)
                    .map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
                Ok((fixture, encode_timestamp(&fixture.date_time), details))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "INSERT INTO fixtures (sport_id, team_id_1, team_id_2, date_time, details, status) ",
        );
        builder.push_values(encoded, |mut row, (fixture, date_time, details)| {
            row.push_bind(fixture.sport_id)
                .push_bind(fixture.team_id_1)
                .push_bind(fixture.team_id_2)
                .push_bind(date_time)
                .push_bind(details)
                .push_bind(fixture.status.clone());
        });
        builder.push(" ON CONFLICT (sport_id, team_id_1, team_id_2, date_time) DO NOTHING");

        let result = builder.build().execute(self.pool()).await?;
        tracing::debug!(
            "Inserted {} of {} fixtures",
            result.rows_affected(),
            fixtures.len()
        );
        Ok(result.rows_affected())
    }
}
