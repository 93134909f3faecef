use chrono::{DateTime, NaiveDate, Utc};
use sqlx::types::Json;
use uuid::Uuid;

use super::models::{AppliedAdjustment, ApprovalStatus, Pay, PayApprove};

// Row types for tables whose columns don't map one-to-one onto the models
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PayApproveRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub hours_worked: f64,
    pub gross_amount: f64,
    pub amount: f64,
    pub adjustments: Json<Vec<AppliedAdjustment>>,
    pub status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PayRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub hours_worked: f64,
    pub gross_amount: f64,
    pub amount: f64,
    pub adjustments: Json<Vec<AppliedAdjustment>>,
    pub approved_by: Uuid,
    pub approved_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

// Conversion functions
impl From<PayApproveRow> for PayApprove {
    fn from(row: PayApproveRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            week_start: row.week_start,
            week_end: row.week_end,
            hours_worked: row.hours_worked,
            gross_amount: row.gross_amount,
            amount: row.amount,
            adjustments: row.adjustments.0,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<PayRow> for Pay {
    fn from(row: PayRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            week_start: row.week_start,
            week_end: row.week_end,
            hours_worked: row.hours_worked,
            gross_amount: row.gross_amount,
            amount: row.amount,
            adjustments: row.adjustments.0,
            approved_by: row.approved_by,
            approved_at: row.approved_at,
            created_at: row.created_at,
        }
    }
}
