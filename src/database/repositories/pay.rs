use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{PgPool, types::Json};
use uuid::Uuid;

use crate::database::{
    models::{ApprovalStatus, Pay, PayWeek},
    types::{PayApproveRow, PayRow},
    utils::sql,
};
use crate::error::AppError;

const COLUMNS: &str = r#"
    id,
    user_id,
    week_start,
    week_end,
    hours_worked,
    gross_amount,
    amount,
    adjustments,
    approved_by,
    approved_at,
    created_at
"#;

#[derive(Clone)]
pub struct PayRepository {
    pool: PgPool,
}

impl PayRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_for_week(&self, week: PayWeek) -> Result<Vec<Pay>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM pays WHERE week_start = ? AND week_end = ?",
            COLUMNS
        );
        let rows = sqlx::query_as::<_, PayRow>(&sql(&query))
            .bind(week.week_start)
            .bind(week.week_end)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn find_all(&self, user_id: Option<Uuid>) -> Result<Vec<Pay>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {}
            FROM pays
            WHERE ?::UUID IS NULL OR user_id = ?::UUID
            ORDER BY week_end DESC, created_at DESC
            "#,
            COLUMNS
        );
        let rows = sqlx::query_as::<_, PayRow>(&sql(&query))
            .bind(user_id)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Pay>, sqlx::Error> {
        let query = format!("SELECT {} FROM pays WHERE id = ?", COLUMNS);
        let row = sqlx::query_as::<_, PayRow>(&sql(&query))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    pub async fn latest_week_end(&self) -> Result<Option<NaiveDate>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<NaiveDate>>("SELECT MAX(week_end) FROM pays")
            .fetch_one(&self.pool)
            .await
    }

    /// Removes the pool row and writes its ledger entry in one transaction.
    /// With `expected` set, only a row still in that status is taken.
    pub async fn approve(
        &self,
        id: Uuid,
        approved_by: Uuid,
        approved_at: DateTime<Utc>,
        expected: Option<ApprovalStatus>,
    ) -> Result<Option<Pay>, AppError> {
        let statuses: Vec<String> = match expected {
            Some(status) => vec![status.to_string()],
            None => vec![
                ApprovalStatus::Pending.to_string(),
                ApprovalStatus::Held.to_string(),
            ],
        };

        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query_as::<_, PayApproveRow>(&sql(r#"
            DELETE FROM
                pay_approvals
            WHERE
                id = ? AND status = ANY(?)
            RETURNING
                id,
                user_id,
                week_start,
                week_end,
                hours_worked,
                gross_amount,
                amount,
                adjustments,
                status,
                created_at,
                updated_at
        "#))
        .bind(id)
        .bind(statuses)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(removed) = removed else {
            tx.rollback().await?;
            return Ok(None);
        };

        let pay = Pay::from_approval(removed.into(), approved_by, approved_at);
        let query = format!(
            "INSERT INTO pays ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            COLUMNS
        );
        let inserted = sqlx::query(&sql(&query))
            .bind(pay.id)
            .bind(pay.user_id)
            .bind(pay.week_start)
            .bind(pay.week_end)
            .bind(pay.hours_worked)
            .bind(pay.gross_amount)
            .bind(pay.amount)
            .bind(Json(&pay.adjustments))
            .bind(pay.approved_by)
            .bind(pay.approved_at)
            .bind(pay.created_at)
            .execute(&mut *tx)
            .await;

        match inserted {
            Ok(_) => {
                tx.commit().await?;
                Ok(Some(pay))
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                log::warn!(
                    "Ledger already holds pay for employee {} week ending {}, rolling back",
                    pay.user_id,
                    pay.week_end
                );
                tx.rollback().await?;
                Err(AppError::invalid_state("Pay record already approved"))
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    log::error!(
                        "Rollback failed after error (orig: {}, rollback: {})",
                        err,
                        rollback_err
                    );
                }
                Err(err.into())
            }
        }
    }
}
