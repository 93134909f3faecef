use sqlx::PgPool;

use crate::database::{models::SystemSettings, utils::sql};

#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn get(&self) -> Result<Option<SystemSettings>, sqlx::Error> {
        sqlx::query_as::<_, SystemSettings>(&sql(r#"
            SELECT
                timezone,
                timezone_updated_by,
                timezone_updated_at,
                currency,
                currency_updated_by,
                currency_updated_at,
                quarterly_budget,
                quarterly_budget_updated_by,
                quarterly_budget_updated_at
            FROM
                system_settings
            WHERE
                id = 1
        "#))
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn upsert(&self, settings: &SystemSettings) -> Result<(), sqlx::Error> {
        sqlx::query(&sql(r#"
            INSERT INTO
                system_settings (
                    id,
                    timezone,
                    timezone_updated_by,
                    timezone_updated_at,
                    currency,
                    currency_updated_by,
                    currency_updated_at,
                    quarterly_budget,
                    quarterly_budget_updated_by,
                    quarterly_budget_updated_at
                )
            VALUES
                (1, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (id) DO UPDATE SET
                timezone = EXCLUDED.timezone,
                timezone_updated_by = EXCLUDED.timezone_updated_by,
                timezone_updated_at = EXCLUDED.timezone_updated_at,
                currency = EXCLUDED.currency,
                currency_updated_by = EXCLUDED.currency_updated_by,
                currency_updated_at = EXCLUDED.currency_updated_at,
                quarterly_budget = EXCLUDED.quarterly_budget,
                quarterly_budget_updated_by = EXCLUDED.quarterly_budget_updated_by,
                quarterly_budget_updated_at = EXCLUDED.quarterly_budget_updated_at
        "#))
        .bind(&settings.timezone)
        .bind(settings.timezone_updated_by)
        .bind(settings.timezone_updated_at)
        .bind(&settings.currency)
        .bind(settings.currency_updated_by)
        .bind(settings.currency_updated_at)
        .bind(settings.quarterly_budget)
        .bind(settings.quarterly_budget_updated_by)
        .bind(settings.quarterly_budget_updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
