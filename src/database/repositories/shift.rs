use chrono::NaiveDate;
use sqlx::PgPool;

use crate::database::{
    models::{Shift, ShiftStatus},
    utils::sql,
};

#[derive(Clone)]
pub struct ShiftRepository {
    pool: PgPool,
}

impl ShiftRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Shifts in `status` whose date falls in the inclusive range
    pub async fn find_by_status(
        &self,
        status: ShiftStatus,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Shift>, sqlx::Error> {
        sqlx::query_as::<_, Shift>(&sql(r#"
            SELECT
                id,
                employee_id,
                shift_date,
                start_time,
                end_time,
                status
            FROM
                shifts
            WHERE
                status = ?
                AND (?::DATE IS NULL OR shift_date >= ?::DATE)
                AND (?::DATE IS NULL OR shift_date <= ?::DATE)
            ORDER BY
                shift_date,
                start_time
        "#))
        .bind(status)
        .bind(from)
        .bind(from)
        .bind(to)
        .bind(to)
        .fetch_all(&self.pool)
        .await
    }

    pub async fn latest_date(&self, status: ShiftStatus) -> Result<Option<NaiveDate>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<NaiveDate>>(&sql(r#"
            SELECT
                MAX(shift_date)
            FROM
                shifts
            WHERE
                status = ?
        "#))
        .bind(status)
        .fetch_one(&self.pool)
        .await
    }
}
