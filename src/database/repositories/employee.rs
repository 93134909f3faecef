use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{models::Employee, utils::sql};

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: PgPool,
}

impl EmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, sqlx::Error> {
        sqlx::query_as::<_, Employee>(&sql(r#"
            SELECT
                id,
                name,
                email,
                pay_rate,
                status,
                created_at
            FROM
                employees
            WHERE
                id = ?
        "#))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    pub async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Employee>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Employee>(&sql(r#"
            SELECT
                id,
                name,
                email,
                pay_rate,
                status,
                created_at
            FROM
                employees
            WHERE
                id = ANY(?)
        "#))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
    }
}
