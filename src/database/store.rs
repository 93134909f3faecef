use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::database::models::{
    AdjustmentType, ApprovalStatus, AssignmentStatus, Employee, EmployeeAdjustment, Pay,
    PayApprove, PayWeek, Shift, ShiftStatus, SystemSettings,
};
use crate::error::AppError;

/// Persistence operations the payroll core depends on. Implementations make
/// no transactional promise beyond what each method documents.
#[async_trait]
pub trait PayrollStore: Send + Sync {
    // Shifts

    /// Shifts in `status` whose date lies in the inclusive range; an absent
    /// bound is open.
    async fn find_shifts(
        &self,
        status: ShiftStatus,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Shift>, AppError>;

    async fn latest_shift_date(&self, status: ShiftStatus) -> Result<Option<NaiveDate>, AppError>;

    // Employees

    async fn get_employee(&self, id: Uuid) -> Result<Option<Employee>, AppError>;

    async fn find_employees(&self, ids: &[Uuid]) -> Result<Vec<Employee>, AppError>;

    // Adjustment types

    /// All types in creation order, which is the order they are applied in.
    async fn find_adjustment_types(&self) -> Result<Vec<AdjustmentType>, AppError>;

    async fn get_adjustment_type(&self, id: Uuid) -> Result<Option<AdjustmentType>, AppError>;

    async fn insert_adjustment_type(&self, adjustment: &AdjustmentType) -> Result<(), AppError>;

    async fn update_adjustment_type(&self, adjustment: &AdjustmentType) -> Result<bool, AppError>;

    // Employee adjustments

    /// Assignments of one employee in creation order.
    async fn find_employee_adjustments(
        &self,
        employee_id: Uuid,
        status: Option<AssignmentStatus>,
    ) -> Result<Vec<EmployeeAdjustment>, AppError>;

    async fn get_employee_adjustment(
        &self,
        id: Uuid,
    ) -> Result<Option<EmployeeAdjustment>, AppError>;

    async fn insert_employee_adjustment(
        &self,
        assignment: &EmployeeAdjustment,
    ) -> Result<(), AppError>;

    async fn update_employee_adjustment(
        &self,
        assignment: &EmployeeAdjustment,
    ) -> Result<bool, AppError>;

    // Pending pool

    async fn find_pay_approvals_for_week(&self, week: PayWeek) -> Result<Vec<PayApprove>, AppError>;

    /// Pool rows in any of `statuses`, ordered by status, then newest week
    /// first, then oldest record first.
    async fn find_pay_approvals(
        &self,
        statuses: &[ApprovalStatus],
    ) -> Result<Vec<PayApprove>, AppError>;

    async fn get_pay_approval(&self, id: Uuid) -> Result<Option<PayApprove>, AppError>;

    /// Fails with `InvalidState` when the pool or the ledger already holds
    /// the same employee and week.
    async fn insert_pay_approval(&self, record: &PayApprove) -> Result<(), AppError>;

    /// Overwrites the figures and adjustment snapshot of an existing row.
    /// The status is left as stored.
    async fn update_pay_approval(&self, record: &PayApprove) -> Result<bool, AppError>;

    /// Compare-and-set on the status. Returns the updated row, or `None` when
    /// the row is gone or not currently in `from`.
    async fn set_pay_approval_status(
        &self,
        id: Uuid,
        from: ApprovalStatus,
        to: ApprovalStatus,
    ) -> Result<Option<PayApprove>, AppError>;

    /// Compare-and-delete. Returns `false` when the row is gone or its status
    /// no longer matches.
    async fn delete_pay_approval(
        &self,
        id: Uuid,
        expected_status: ApprovalStatus,
    ) -> Result<bool, AppError>;

    // Ledger

    async fn find_pays_for_week(&self, week: PayWeek) -> Result<Vec<Pay>, AppError>;

    /// Ledger rows, optionally for one employee, newest week first.
    async fn find_pays(&self, user_id: Option<Uuid>) -> Result<Vec<Pay>, AppError>;

    async fn get_pay(&self, id: Uuid) -> Result<Option<Pay>, AppError>;

    async fn latest_pay_week_end(&self) -> Result<Option<NaiveDate>, AppError>;

    /// Moves a pool row into the ledger as one step: the pool row is removed
    /// and a ledger row with the same id is written. Returns `None` when the
    /// pool row no longer exists, or when `expected` is set and the row has
    /// moved out of that status. Fails with `InvalidState` if the ledger
    /// already holds that employee and week.
    async fn approve_pay_approval(
        &self,
        id: Uuid,
        approved_by: Uuid,
        approved_at: DateTime<Utc>,
        expected: Option<ApprovalStatus>,
    ) -> Result<Option<Pay>, AppError>;

    // Settings

    async fn get_settings(&self) -> Result<Option<SystemSettings>, AppError>;

    async fn save_settings(&self, settings: &SystemSettings) -> Result<(), AppError>;
}
