use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::models::{
    AdjustmentType, ApprovalStatus, AssignmentStatus, Employee, EmployeeAdjustment, Pay,
    PayApprove, PayWeek, Shift, ShiftStatus, SystemSettings,
};
use crate::database::store::PayrollStore;
use crate::error::AppError;

pub mod adjustment;
pub mod employee;
pub mod pay;
pub mod pay_approve;
pub mod settings;
pub mod shift;

pub use adjustment::AdjustmentRepository;
pub use employee::EmployeeRepository;
pub use pay::PayRepository;
pub use pay_approve::PayApproveRepository;
pub use settings::SettingsRepository;
pub use shift::ShiftRepository;

/// Postgres-backed store composed of the per-table repositories.
#[derive(Clone)]
pub struct PgPayrollStore {
    shifts: ShiftRepository,
    employees: EmployeeRepository,
    adjustments: AdjustmentRepository,
    pay_approvals: PayApproveRepository,
    pays: PayRepository,
    settings: SettingsRepository,
}

impl PgPayrollStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            shifts: ShiftRepository::new(pool.clone()),
            employees: EmployeeRepository::new(pool.clone()),
            adjustments: AdjustmentRepository::new(pool.clone()),
            pay_approvals: PayApproveRepository::new(pool.clone()),
            pays: PayRepository::new(pool.clone()),
            settings: SettingsRepository::new(pool),
        }
    }
}

#[async_trait]
impl PayrollStore for PgPayrollStore {
    async fn find_shifts(
        &self,
        status: ShiftStatus,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Shift>, AppError> {
        Ok(self.shifts.find_by_status(status, from, to).await?)
    }

    async fn latest_shift_date(&self, status: ShiftStatus) -> Result<Option<NaiveDate>, AppError> {
        Ok(self.shifts.latest_date(status).await?)
    }

    async fn get_employee(&self, id: Uuid) -> Result<Option<Employee>, AppError> {
        Ok(self.employees.find_by_id(id).await?)
    }

    async fn find_employees(&self, ids: &[Uuid]) -> Result<Vec<Employee>, AppError> {
        Ok(self.employees.find_by_ids(ids).await?)
    }

    async fn find_adjustment_types(&self) -> Result<Vec<AdjustmentType>, AppError> {
        Ok(self.adjustments.find_types().await?)
    }

    async fn get_adjustment_type(&self, id: Uuid) -> Result<Option<AdjustmentType>, AppError> {
        Ok(self.adjustments.find_type_by_id(id).await?)
    }

    async fn insert_adjustment_type(&self, adjustment: &AdjustmentType) -> Result<(), AppError> {
        Ok(self.adjustments.insert_type(adjustment).await?)
    }

    async fn update_adjustment_type(&self, adjustment: &AdjustmentType) -> Result<bool, AppError> {
        Ok(self.adjustments.update_type(adjustment).await?)
    }

    async fn find_employee_adjustments(
        &self,
        employee_id: Uuid,
        status: Option<AssignmentStatus>,
    ) -> Result<Vec<EmployeeAdjustment>, AppError> {
        Ok(self
            .adjustments
            .find_assignments_for_employee(employee_id, status)
            .await?)
    }

    async fn get_employee_adjustment(
        &self,
        id: Uuid,
    ) -> Result<Option<EmployeeAdjustment>, AppError> {
        Ok(self.adjustments.find_assignment_by_id(id).await?)
    }

    async fn insert_employee_adjustment(
        &self,
        assignment: &EmployeeAdjustment,
    ) -> Result<(), AppError> {
        Ok(self.adjustments.insert_assignment(assignment).await?)
    }

    async fn update_employee_adjustment(
        &self,
        assignment: &EmployeeAdjustment,
    ) -> Result<bool, AppError> {
        Ok(self.adjustments.update_assignment(assignment).await?)
    }

    async fn find_pay_approvals_for_week(&self, week: PayWeek) -> Result<Vec<PayApprove>, AppError> {
        Ok(self.pay_approvals.find_for_week(week).await?)
    }

    async fn find_pay_approvals(
        &self,
        statuses: &[ApprovalStatus],
    ) -> Result<Vec<PayApprove>, AppError> {
        Ok(self.pay_approvals.find_by_statuses(statuses).await?)
    }

    async fn get_pay_approval(&self, id: Uuid) -> Result<Option<PayApprove>, AppError> {
        Ok(self.pay_approvals.find_by_id(id).await?)
    }

    async fn insert_pay_approval(&self, record: &PayApprove) -> Result<(), AppError> {
        match self.pay_approvals.insert(record).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(AppError::invalid_state(format!(
                "Employee {} is already approved for week ending {}",
                record.user_id, record.week_end
            ))),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::invalid_state(format!(
                    "Pay record for employee {} and week ending {} already exists",
                    record.user_id, record.week_end
                )))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn update_pay_approval(&self, record: &PayApprove) -> Result<bool, AppError> {
        Ok(self.pay_approvals.update_figures(record).await?)
    }

    async fn set_pay_approval_status(
        &self,
        id: Uuid,
        from: ApprovalStatus,
        to: ApprovalStatus,
    ) -> Result<Option<PayApprove>, AppError> {
        Ok(self.pay_approvals.set_status(id, from, to).await?)
    }

    async fn delete_pay_approval(
        &self,
        id: Uuid,
        expected_status: ApprovalStatus,
    ) -> Result<bool, AppError> {
        Ok(self
            .pay_approvals
            .delete_with_status(id, expected_status)
            .await?)
    }

    async fn find_pays_for_week(&self, week: PayWeek) -> Result<Vec<Pay>, AppError> {
        Ok(self.pays.find_for_week(week).await?)
    }

    async fn find_pays(&self, user_id: Option<Uuid>) -> Result<Vec<Pay>, AppError> {
        Ok(self.pays.find_all(user_id).await?)
    }

    async fn get_pay(&self, id: Uuid) -> Result<Option<Pay>, AppError> {
        Ok(self.pays.find_by_id(id).await?)
    }

    async fn latest_pay_week_end(&self) -> Result<Option<NaiveDate>, AppError> {
        Ok(self.pays.latest_week_end().await?)
    }

    async fn approve_pay_approval(
        &self,
        id: Uuid,
        approved_by: Uuid,
        approved_at: DateTime<Utc>,
        expected: Option<ApprovalStatus>,
    ) -> Result<Option<Pay>, AppError> {
        self.pays.approve(id, approved_by, approved_at, expected).await
    }

    async fn get_settings(&self) -> Result<Option<SystemSettings>, AppError> {
        Ok(self.settings.get().await?)
    }

    async fn save_settings(&self, settings: &SystemSettings) -> Result<(), AppError> {
        Ok(self.settings.upsert(settings).await?)
    }
}
