use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{AdjustmentType, AssignmentStatus, EmployeeAdjustment},
    utils::sql,
};

const TYPE_COLUMNS: &str = r#"
    id,
    name,
    direction,
    mode,
    rate_or_amount,
    cap_per_period,
    apply_on,
    overtime_rule,
    applies_globally,
    note,
    effective_start,
    effective_end,
    created_at,
    updated_at
"#;

const ASSIGNMENT_COLUMNS: &str = r#"
    id,
    employee_id,
    adjustment_type_id,
    override_rate_or_amount,
    override_cap,
    replace_global,
    status,
    note,
    effective_start,
    effective_end,
    created_at,
    updated_at
"#;

#[derive(Clone)]
pub struct AdjustmentRepository {
    pool: PgPool,
}

impl AdjustmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_types(&self) -> Result<Vec<AdjustmentType>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM adjustment_types ORDER BY created_at ASC, id",
            TYPE_COLUMNS
        );
        sqlx::query_as::<_, AdjustmentType>(&sql(&query))
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_type_by_id(&self, id: Uuid) -> Result<Option<AdjustmentType>, sqlx::Error> {
        let query = format!("SELECT {} FROM adjustment_types WHERE id = ?", TYPE_COLUMNS);
        sqlx::query_as::<_, AdjustmentType>(&sql(&query))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn insert_type(&self, adjustment: &AdjustmentType) -> Result<(), sqlx::Error> {
        let query = format!(
            "INSERT INTO adjustment_types ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            TYPE_COLUMNS
        );
        sqlx::query(&sql(&query))
            .bind(adjustment.id)
            .bind(&adjustment.name)
            .bind(adjustment.direction)
            .bind(adjustment.mode)
            .bind(adjustment.rate_or_amount)
            .bind(adjustment.cap_per_period)
            .bind(adjustment.apply_on)
            .bind(adjustment.overtime_rule)
            .bind(adjustment.applies_globally)
            .bind(&adjustment.note)
            .bind(adjustment.effective_start)
            .bind(adjustment.effective_end)
            .bind(adjustment.created_at)
            .bind(adjustment.updated_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn update_type(&self, adjustment: &AdjustmentType) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(&sql(r#"
            UPDATE
                adjustment_types
            SET
                name = ?,
                direction = ?,
                mode = ?,
                rate_or_amount = ?,
                cap_per_period = ?,
                apply_on = ?,
                overtime_rule = ?,
                applies_globally = ?,
                note = ?,
                effective_start = ?,
                effective_end = ?,
                updated_at = ?
            WHERE
                id = ?
        "#))
        .bind(&adjustment.name)
        .bind(adjustment.direction)
        .bind(adjustment.mode)
        .bind(adjustment.rate_or_amount)
        .bind(adjustment.cap_per_period)
        .bind(adjustment.apply_on)
        .bind(adjustment.overtime_rule)
        .bind(adjustment.applies_globally)
        .bind(&adjustment.note)
        .bind(adjustment.effective_start)
        .bind(adjustment.effective_end)
        .bind(adjustment.updated_at)
        .bind(adjustment.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn find_assignments_for_employee(
        &self,
        employee_id: Uuid,
        status: Option<AssignmentStatus>,
    ) -> Result<Vec<EmployeeAdjustment>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {}
            FROM employee_adjustments
            WHERE employee_id = ? AND (?::VARCHAR IS NULL OR status = ?::VARCHAR)
            ORDER BY created_at ASC, id
            "#,
            ASSIGNMENT_COLUMNS
        );
        let status = status.map(|s| s.to_string());
        sqlx::query_as::<_, EmployeeAdjustment>(&sql(&query))
            .bind(employee_id)
            .bind(status.clone())
            .bind(status)
            .fetch_all(&self.pool)
            .await
    }

    pub async fn find_assignment_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<EmployeeAdjustment>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM employee_adjustments WHERE id = ?",
            ASSIGNMENT_COLUMNS
        );
        sqlx::query_as::<_, EmployeeAdjustment>(&sql(&query))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn insert_assignment(&self, assignment: &EmployeeAdjustment) -> Result<(), sqlx::Error> {
        let query = format!(
            "INSERT INTO employee_adjustments ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            ASSIGNMENT_COLUMNS
        );
        sqlx::query(&sql(&query))
            .bind(assignment.id)
            .bind(assignment.employee_id)
            .bind(assignment.adjustment_type_id)
            .bind(assignment.override_rate_or_amount)
            .bind(assignment.override_cap)
            .bind(assignment.replace_global)
            .bind(assignment.status)
            .bind(&assignment.note)
            .bind(assignment.effective_start)
            .bind(assignment.effective_end)
            .bind(assignment.created_at)
            .bind(assignment.updated_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    pub async fn update_assignment(&self, assignment: &EmployeeAdjustment) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(&sql(r#"
            UPDATE
                employee_adjustments
            SET
                override_rate_or_amount = ?,
                override_cap = ?,
                replace_global = ?,
                status = ?,
                note = ?,
                effective_start = ?,
                effective_end = ?,
                updated_at = ?
            WHERE
                id = ?
        "#))
        .bind(assignment.override_rate_or_amount)
        .bind(assignment.override_cap)
        .bind(assignment.replace_global)
        .bind(assignment.status)
        .bind(&assignment.note)
        .bind(assignment.effective_start)
        .bind(assignment.effective_end)
        .bind(assignment.updated_at)
        .bind(assignment.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
