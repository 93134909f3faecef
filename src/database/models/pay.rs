use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::adjustment::AppliedAdjustment;
use super::macros::string_enum;

string_enum! {
    /// States a record can be in while it sits in the pending pool. Approved
    /// records live in the ledger and have no representation here.
    #[derive(Default)]
    pub enum ApprovalStatus {
        #[default]
        Pending => "pending",
        Held => "held",
    }
}

impl ApprovalStatus {
    pub fn toggled(self) -> Self {
        match self {
            ApprovalStatus::Pending => ApprovalStatus::Held,
            ApprovalStatus::Held => ApprovalStatus::Pending,
        }
    }
}

/// Saturday-through-Friday window used as the unit of wage aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayWeek {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
}

/// Unresolved pay computation for one employee and one pay week.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayApprove {
    pub id: Uuid,
    pub user_id: Uuid,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub hours_worked: f64,
    pub gross_amount: f64,
    pub amount: f64,
    pub adjustments: Vec<AppliedAdjustment>,
    pub status: ApprovalStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PayApprove {
    pub fn week(&self) -> PayWeek {
        PayWeek {
            week_start: self.week_start,
            week_end: self.week_end,
        }
    }
}

/// Immutable ledger entry for an approved pay record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pay {
    pub id: Uuid,
    pub user_id: Uuid,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub hours_worked: f64,
    pub gross_amount: f64,
    pub amount: f64,
    pub adjustments: Vec<AppliedAdjustment>,
    pub approved_by: Uuid,
    pub approved_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Pay {
    /// Ledger entry carrying the pool record's id and final figures.
    pub fn from_approval(record: PayApprove, approved_by: Uuid, approved_at: DateTime<Utc>) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            week_start: record.week_start,
            week_end: record.week_end,
            hours_worked: record.hours_worked,
            gross_amount: record.gross_amount,
            amount: record.amount,
            adjustments: record.adjustments,
            approved_by,
            approved_at,
            created_at: approved_at,
        }
    }

    pub fn week(&self) -> PayWeek {
        PayWeek {
            week_start: self.week_start,
            week_end: self.week_end,
        }
    }
}

/// Record as presented to callers, from either the pool or the ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayRecordView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub employee_name: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub hours_worked: f64,
    pub gross_amount: f64,
    pub amount: f64,
    pub adjustments: Vec<AppliedAdjustment>,
    pub status: String,
    pub approved_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl PayRecordView {
    pub fn from_pending(record: PayApprove, employee_name: String) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            employee_name,
            week_start: record.week_start,
            week_end: record.week_end,
            hours_worked: record.hours_worked,
            gross_amount: record.gross_amount,
            amount: record.amount,
            adjustments: record.adjustments,
            status: record.status.to_string(),
            approved_by: None,
            created_at: record.created_at,
        }
    }

    pub fn from_ledger(record: Pay, employee_name: String) -> Self {
        Self {
            id: record.id,
            user_id: record.user_id,
            employee_name,
            week_start: record.week_start,
            week_end: record.week_end,
            hours_worked: record.hours_worked,
            gross_amount: record.gross_amount,
            amount: record.amount,
            adjustments: record.adjustments,
            status: "approved".to_string(),
            approved_by: Some(record.approved_by),
            created_at: record.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSummary {
    pub generated: usize,
    pub weeks_processed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    pub synced_weeks: usize,
    pub generated: usize,
}

/// Result of a hold toggle or an approval.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalOutcome {
    pub id: Uuid,
    pub status: String,
    pub approved_by: Option<Uuid>,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkApprovalOutcome {
    pub approved: usize,
    pub approved_by: Uuid,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
}
