use sqlx::{PgPool, types::Json};
use uuid::Uuid;

use crate::database::{
    models::{ApprovalStatus, PayApprove, PayWeek},
    types::PayApproveRow,
    utils::sql,
};

const COLUMNS: &str = r#"
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
"#;

#[derive(Clone)]
pub struct PayApproveRepository {
    pool: PgPool,
}

impl PayApproveRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_for_week(&self, week: PayWeek) -> Result<Vec<PayApprove>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {}
            FROM pay_approvals
            WHERE week_start = ? AND week_end = ?
            ORDER BY status, created_at, id
            "#,
            COLUMNS
        );
        let rows = sqlx::query_as::<_, PayApproveRow>(&sql(&query))
            .bind(week.week_start)
            .bind(week.week_end)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_statuses(
        &self,
        statuses: &[ApprovalStatus],
    ) -> Result<Vec<PayApprove>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {}
            FROM pay_approvals
            WHERE status = ANY(?)
            ORDER BY status ASC, week_end DESC, created_at ASC, id
            "#,
            COLUMNS
        );
        let statuses: Vec<String> = statuses.iter().map(|s| s.to_string()).collect();
        let rows = sqlx::query_as::<_, PayApproveRow>(&sql(&query))
            .bind(statuses)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<PayApprove>, sqlx::Error> {
        let query = format!("SELECT {} FROM pay_approvals WHERE id = ?", COLUMNS);
        let row = sqlx::query_as::<_, PayApproveRow>(&sql(&query))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// Inserts a pool row unless the ledger already holds the same employee
    /// and week. Returns `false` when the ledger row blocked the insert.
    pub async fn insert(&self, record: &PayApprove) -> Result<bool, sqlx::Error> {
        let query = format!(
            r#"
            INSERT INTO pay_approvals ({})
            SELECT ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?
            WHERE NOT EXISTS (
                SELECT 1 FROM pays
                WHERE user_id = ? AND week_start = ? AND week_end = ?
            )
            "#,
            COLUMNS
        );
        let result = sqlx::query(&sql(&query))
            .bind(record.id)
            .bind(record.user_id)
            .bind(record.week_start)
            .bind(record.week_end)
            .bind(record.hours_worked)
            .bind(record.gross_amount)
            .bind(record.amount)
            .bind(Json(&record.adjustments))
            .bind(record.status)
            .bind(record.created_at)
            .bind(record.updated_at)
            .bind(record.user_id)
            .bind(record.week_start)
            .bind(record.week_end)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn update_figures(&self, record: &PayApprove) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(&sql(r#"
            UPDATE
                pay_approvals
            SET
                hours_worked = ?,
                gross_amount = ?,
                amount = ?,
                adjustments = ?,
                updated_at = ?
            WHERE
                id = ?
        "#))
        .bind(record.hours_worked)
        .bind(record.gross_amount)
        .bind(record.amount)
        .bind(Json(&record.adjustments))
        .bind(record.updated_at)
        .bind(record.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn set_status(
        &self,
        id: Uuid,
        from: ApprovalStatus,
        to: ApprovalStatus,
    ) -> Result<Option<PayApprove>, sqlx::Error> {
        let query = format!(
            r#"
            UPDATE pay_approvals
            SET status = ?, updated_at = NOW()
            WHERE id = ? AND status = ?
            RETURNING {}
            "#,
            COLUMNS
        );
        let row = sqlx::query_as::<_, PayApproveRow>(&sql(&query))
            .bind(to)
            .bind(id)
            .bind(from)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    pub async fn delete_with_status(
        &self,
        id: Uuid,
        expected_status: ApprovalStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(&sql("DELETE FROM pay_approvals WHERE id = ? AND status = ?"))
            .bind(id)
            .bind(expected_status)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
