use super::Database;
use crate::error::{CatalogError, Result};
use crate::models::Sport;

const SPORT_COLUMNS: &str = "id, name, description, image_url, is_active";

impl Database {
    pub async fn sport_exists(&self, id: i64) -> Result<bool> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM sports WHERE id = ?)")
            .bind(id)
            .fetch_one(self.pool())
            .await?;
        Ok(exists != 0)
    }

    pub async fn get_sport(&self, id: i64) -> Result<Sport> {
        let sql = format!("SELECT {} FROM sports WHERE id = ?", SPORT_COLUMNS);
        sqlx::query_as::<_, Sport>(&sql)
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| CatalogError::not_found("Sport", id))
    }

    /// Sports visible in listings
    pub async fn active_sports(&self) -> Result<Vec<Sport>> {
        let sql = format!(
            "SELECT {} FROM sports WHERE is_active = 1 ORDER BY id",
            SPORT_COLUMNS
        );
        let sports = sqlx::query_as::<_, Sport>(&sql)
            .fetch_all(self.pool())
            .await?;
        Ok(sports)
    }

    pub async fn create_sport(&self, name: &str, description: &str, image_url: &str) -> Result<Sport> {
        let sql = format!(
            "INSERT INTO sports (name, description, image_url, is_active) VALUES (?, ?, ?, 1) RETURNING {}",
            SPORT_COLUMNS
        );
        let sport = sqlx::query_as::<_, Sport>(&sql)
            .bind(name)
            .bind(description)
            .bind(image_url)
            .fetch_one(self.pool())
            .await?;
        tracing::info!("Created sport {} ({})", sport.name, sport.id);
        Ok(sport)
    }

    /// Show or hide a sport in the active listing. Lookups by id are unaffected.
    pub async fn set_sport_active(&self, id: i64, is_active: bool) -> Result<()> {
        let result = sqlx::query("UPDATE sports SET is_active = ? WHERE id = ?")
            .bind(is_active)
            .bind(id)
            .execute(self.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(CatalogError::not_found("Sport", id));
        }
        tracing::info!("Sport {} active: {}", id, is_active);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sport_lookups() {
        let db = Database::in_memory().await.unwrap();
        let soccer = db.create_sport("Soccer", "Association football", "").await.unwrap();

        assert!(db.sport_exists(soccer.id).await.unwrap());
        assert!(!db.sport_exists(soccer.id + 100).await.unwrap());

        let fetched = db.get_sport(soccer.id).await.unwrap();
        assert_eq!(fetched, soccer);
        assert!(fetched.is_active);

        let missing = db.get_sport(soccer.id + 100).await.unwrap_err();
        assert!(matches!(missing, CatalogError::NotFound { entity: "Sport", .. }));
    }

    #[tokio::test]
    async fn test_active_sports_hides_inactive() {
        let db = Database::in_memory().await.unwrap();
        let baseball = db.create_sport("Baseball", "", "").await.unwrap();
        let hockey = db.create_sport("Hockey", "", "").await.unwrap();
        db.set_sport_active(baseball.id, false).await.unwrap();

        let active = db.active_sports().await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, hockey.id);

        // Inactive sports are still reachable by id
        assert!(db.sport_exists(baseball.id).await.unwrap());

        db.set_sport_active(baseball.id, true).await.unwrap();
        assert_eq!(db.active_sports().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_toggle_unknown_sport() {
        let db = Database::in_memory().await.unwrap();
        let err = db.set_sport_active(7, false).await.unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { entity: "Sport", .. }));
    }

    #[tokio::test]
    async fn test_sport_names_are_unique() {
        let db = Database::in_memory().await.unwrap();
        db.create_sport("Soccer", "", "").await.unwrap();
        let err = db.create_sport("Soccer", "", "").await.unwrap_err();
        assert!(matches!(err, CatalogError::Storage(_)));
    }
}
