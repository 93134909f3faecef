use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::models::{
    AdjustmentType, ApprovalStatus, AssignmentStatus, Employee, EmployeeAdjustment, Pay,
    PayApprove, PayWeek, Shift, ShiftStatus, SystemSettings,
};
use crate::database::store::PayrollStore;
use crate::error::AppError;

#[derive(Default)]
struct Inner {
    shifts: HashMap<Uuid, Shift>,
    employees: HashMap<Uuid, Employee>,
    adjustment_types: HashMap<Uuid, AdjustmentType>,
    employee_adjustments: HashMap<Uuid, EmployeeAdjustment>,
    pay_approvals: HashMap<Uuid, PayApprove>,
    pays: HashMap<Uuid, Pay>,
    settings: Option<SystemSettings>,
}

/// Process-local store. Every operation runs under one lock, so the
/// compare-and-set style methods are atomic with respect to each other.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_employee(&self, employee: Employee) {
        self.inner.write().await.employees.insert(employee.id, employee);
    }

    pub async fn remove_employee(&self, id: Uuid) -> Option<Employee> {
        self.inner.write().await.employees.remove(&id)
    }

    pub async fn insert_shift(&self, shift: Shift) {
        self.inner.write().await.shifts.insert(shift.id, shift);
    }

    pub async fn remove_shift(&self, id: Uuid) -> Option<Shift> {
        self.inner.write().await.shifts.remove(&id)
    }

    pub async fn set_shift_status(&self, id: Uuid, status: ShiftStatus) -> bool {
        match self.inner.write().await.shifts.get_mut(&id) {
            Some(shift) => {
                shift.status = status;
                true
            }
            None => false,
        }
    }

    pub async fn pay_approval_count(&self) -> usize {
        self.inner.read().await.pay_approvals.len()
    }

    pub async fn pay_count(&self) -> usize {
        self.inner.read().await.pays.len()
    }
}

fn sort_pool(records: &mut [PayApprove]) {
    records.sort_by(|a, b| {
        a.status
            .as_str()
            .cmp(b.status.as_str())
            .then(b.week_end.cmp(&a.week_end))
            .then(a.created_at.cmp(&b.created_at))
            .then(a.id.cmp(&b.id))
    });
}

#[async_trait]
impl PayrollStore for MemoryStore {
    async fn find_shifts(
        &self,
        status: ShiftStatus,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<Shift>, AppError> {
        let inner = self.inner.read().await;
        let mut shifts: Vec<Shift> = inner
            .shifts
            .values()
            .filter(|s| s.status == status)
            .filter(|s| from.is_none_or(|f| s.shift_date >= f))
            .filter(|s| to.is_none_or(|t| s.shift_date <= t))
            .cloned()
            .collect();
        shifts.sort_by_key(|s| (s.shift_date, s.start_time));
        Ok(shifts)
    }

    async fn latest_shift_date(&self, status: ShiftStatus) -> Result<Option<NaiveDate>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .shifts
            .values()
            .filter(|s| s.status == status)
            .map(|s| s.shift_date)
            .max())
    }

    async fn get_employee(&self, id: Uuid) -> Result<Option<Employee>, AppError> {
        Ok(self.inner.read().await.employees.get(&id).cloned())
    }

    async fn find_employees(&self, ids: &[Uuid]) -> Result<Vec<Employee>, AppError> {
        let inner = self.inner.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| inner.employees.get(id).cloned())
            .collect())
    }

    async fn find_adjustment_types(&self) -> Result<Vec<AdjustmentType>, AppError> {
        let mut types: Vec<AdjustmentType> =
            self.inner.read().await.adjustment_types.values().cloned().collect();
        types.sort_by_key(|t| (t.created_at, t.id));
        Ok(types)
    }

    async fn get_adjustment_type(&self, id: Uuid) -> Result<Option<AdjustmentType>, AppError> {
        Ok(self.inner.read().await.adjustment_types.get(&id).cloned())
    }

    async fn insert_adjustment_type(&self, adjustment: &AdjustmentType) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .adjustment_types
            .insert(adjustment.id, adjustment.clone());
        Ok(())
    }

    async fn update_adjustment_type(&self, adjustment: &AdjustmentType) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        match inner.adjustment_types.get_mut(&adjustment.id) {
            Some(existing) => {
                *existing = adjustment.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_employee_adjustments(
        &self,
        employee_id: Uuid,
        status: Option<AssignmentStatus>,
    ) -> Result<Vec<EmployeeAdjustment>, AppError> {
        let inner = self.inner.read().await;
        let mut assignments: Vec<EmployeeAdjustment> = inner
            .employee_adjustments
            .values()
            .filter(|a| a.employee_id == employee_id)
            .filter(|a| status.is_none_or(|s| a.status == s))
            .cloned()
            .collect();
        assignments.sort_by_key(|a| (a.created_at, a.id));
        Ok(assignments)
    }

    async fn get_employee_adjustment(
        &self,
        id: Uuid,
    ) -> Result<Option<EmployeeAdjustment>, AppError> {
        Ok(self.inner.read().await.employee_adjustments.get(&id).cloned())
    }

    async fn insert_employee_adjustment(
        &self,
        assignment: &EmployeeAdjustment,
    ) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .employee_adjustments
            .insert(assignment.id, assignment.clone());
        Ok(())
    }

    async fn update_employee_adjustment(
        &self,
        assignment: &EmployeeAdjustment,
    ) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        match inner.employee_adjustments.get_mut(&assignment.id) {
            Some(existing) => {
                *existing = assignment.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn find_pay_approvals_for_week(&self, week: PayWeek) -> Result<Vec<PayApprove>, AppError> {
        let inner = self.inner.read().await;
        let mut records: Vec<PayApprove> = inner
            .pay_approvals
            .values()
            .filter(|r| r.week() == week)
            .cloned()
            .collect();
        sort_pool(&mut records);
        Ok(records)
    }

    async fn find_pay_approvals(
        &self,
        statuses: &[ApprovalStatus],
    ) -> Result<Vec<PayApprove>, AppError> {
        let inner = self.inner.read().await;
        let mut records: Vec<PayApprove> = inner
            .pay_approvals
            .values()
            .filter(|r| statuses.contains(&r.status))
            .cloned()
            .collect();
        sort_pool(&mut records);
        Ok(records)
    }

    async fn get_pay_approval(&self, id: Uuid) -> Result<Option<PayApprove>, AppError> {
        Ok(self.inner.read().await.pay_approvals.get(&id).cloned())
    }

    async fn insert_pay_approval(&self, record: &PayApprove) -> Result<(), AppError> {
        let mut inner = self.inner.write().await;
        let duplicate = inner
            .pay_approvals
            .values()
            .any(|r| r.user_id == record.user_id && r.week() == record.week());
        if duplicate {
            return Err(AppError::invalid_state(format!(
                "Pay record for employee {} and week ending {} already exists",
                record.user_id, record.week_end
            )));
        }
        let approved = inner
            .pays
            .values()
            .any(|p| p.user_id == record.user_id && p.week() == record.week());
        if approved {
            return Err(AppError::invalid_state(format!(
                "Employee {} is already approved for week ending {}",
                record.user_id, record.week_end
            )));
        }
        inner.pay_approvals.insert(record.id, record.clone());
        Ok(())
    }

    async fn update_pay_approval(&self, record: &PayApprove) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        match inner.pay_approvals.get_mut(&record.id) {
            Some(existing) => {
                existing.hours_worked = record.hours_worked;
                existing.gross_amount = record.gross_amount;
                existing.amount = record.amount;
                existing.adjustments = record.adjustments.clone();
                existing.updated_at = record.updated_at;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_pay_approval_status(
        &self,
        id: Uuid,
        from: ApprovalStatus,
        to: ApprovalStatus,
    ) -> Result<Option<PayApprove>, AppError> {
        let mut inner = self.inner.write().await;
        match inner.pay_approvals.get_mut(&id) {
            Some(record) if record.status == from => {
                record.status = to;
                record.updated_at = Utc::now();
                Ok(Some(record.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete_pay_approval(
        &self,
        id: Uuid,
        expected_status: ApprovalStatus,
    ) -> Result<bool, AppError> {
        let mut inner = self.inner.write().await;
        let matches = inner
            .pay_approvals
            .get(&id)
            .is_some_and(|r| r.status == expected_status);
        if matches {
            inner.pay_approvals.remove(&id);
        }
        Ok(matches)
    }

    async fn find_pays_for_week(&self, week: PayWeek) -> Result<Vec<Pay>, AppError> {
        let inner = self.inner.read().await;
        Ok(inner
            .pays
            .values()
            .filter(|p| p.week() == week)
            .cloned()
            .collect())
    }

    async fn find_pays(&self, user_id: Option<Uuid>) -> Result<Vec<Pay>, AppError> {
        let inner = self.inner.read().await;
        let mut pays: Vec<Pay> = inner
            .pays
            .values()
            .filter(|p| user_id.is_none_or(|u| p.user_id == u))
            .cloned()
            .collect();
        pays.sort_by(|a, b| {
            b.week_end
                .cmp(&a.week_end)
                .then(b.created_at.cmp(&a.created_at))
        });
        Ok(pays)
    }

    async fn get_pay(&self, id: Uuid) -> Result<Option<Pay>, AppError> {
        Ok(self.inner.read().await.pays.get(&id).cloned())
    }

    async fn latest_pay_week_end(&self) -> Result<Option<NaiveDate>, AppError> {
        Ok(self.inner.read().await.pays.values().map(|p| p.week_end).max())
    }

    async fn approve_pay_approval(
        &self,
        id: Uuid,
        approved_by: Uuid,
        approved_at: DateTime<Utc>,
        expected: Option<ApprovalStatus>,
    ) -> Result<Option<Pay>, AppError> {
        let mut inner = self.inner.write().await;
        let Some(record) = inner.pay_approvals.get(&id) else {
            return Ok(None);
        };
        if expected.is_some_and(|status| record.status != status) {
            return Ok(None);
        }

        let already_paid = inner.pays.contains_key(&id)
            || inner
                .pays
                .values()
                .any(|p| p.user_id == record.user_id && p.week() == record.week());
        if already_paid {
            return Err(AppError::invalid_state("Pay record already approved"));
        }

        let Some(record) = inner.pay_approvals.remove(&id) else {
            return Ok(None);
        };
        let pay = Pay::from_approval(record, approved_by, approved_at);
        inner.pays.insert(pay.id, pay.clone());
        Ok(Some(pay))
    }

    async fn get_settings(&self) -> Result<Option<SystemSettings>, AppError> {
        Ok(self.inner.read().await.settings.clone())
    }

    async fn save_settings(&self, settings: &SystemSettings) -> Result<(), AppError> {
        self.inner.write().await.settings = Some(settings.clone());
        Ok(())
    }
}
