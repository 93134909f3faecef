use std::collections::{HashMap, HashSet};

use chrono::Utc;
use uuid::Uuid;

use crate::database::models::{
    ApprovalOutcome, ApprovalStatus, BulkApprovalOutcome, PayRecordView, PayWeek,
};
use crate::error::AppError;

use super::PayrollService;

const UNKNOWN_EMPLOYEE: &str = "Unknown";

impl PayrollService {
    async fn employee_names(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, String>, AppError> {
        let unique: Vec<Uuid> = ids
            .iter()
            .copied()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        Ok(self
            .store
            .find_employees(&unique)
            .await?
            .into_iter()
            .map(|e| (e.id, e.name))
            .collect())
    }

    /// Works out why a pool row could not be acted on: it was approved, it
    /// changed underneath us, or it never existed.
    async fn unavailable(&self, id: Uuid, approved_message: &str) -> AppError {
        match self.store.get_pay(id).await {
            Ok(Some(_)) => AppError::invalid_state(approved_message),
            Ok(None) => match self.store.get_pay_approval(id).await {
                Ok(Some(_)) => AppError::invalid_state("Pay record was modified concurrently"),
                Ok(None) => AppError::not_found("Pay record not found"),
                Err(err) => err,
            },
            Err(err) => err,
        }
    }

    /// Pending and held records ordered by status name, then newest week
    /// first.
    pub async fn list_pending(&self) -> Result<Vec<PayRecordView>, AppError> {
        let records = self
            .store
            .find_pay_approvals(&[ApprovalStatus::Pending, ApprovalStatus::Held])
            .await?;
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = records.iter().map(|r| r.user_id).collect();
        let names = self.employee_names(&ids).await?;

        Ok(records
            .into_iter()
            .map(|record| {
                let name = names
                    .get(&record.user_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string());
                PayRecordView::from_pending(record, name)
            })
            .collect())
    }

    pub async fn list_approved(&self) -> Result<Vec<PayRecordView>, AppError> {
        let pays = self.store.find_pays(None).await?;
        if pays.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = pays.iter().map(|p| p.user_id).collect();
        let names = self.employee_names(&ids).await?;

        Ok(pays
            .into_iter()
            .map(|pay| {
                let name = names
                    .get(&pay.user_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string());
                PayRecordView::from_ledger(pay, name)
            })
            .collect())
    }

    /// Approved pay of one employee, newest week first.
    pub async fn list_for_employee(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<PayRecordView>, AppError> {
        let name = self.employee_name(employee_id).await?;
        let pays = self.store.find_pays(Some(employee_id)).await?;

        Ok(pays
            .into_iter()
            .map(|pay| PayRecordView::from_ledger(pay, name.clone()))
            .collect())
    }

    pub async fn get_for_employee(
        &self,
        employee_id: Uuid,
        id: Uuid,
    ) -> Result<PayRecordView, AppError> {
        let pay = self
            .store
            .get_pay(id)
            .await?
            .filter(|pay| pay.user_id == employee_id)
            .ok_or_else(|| AppError::not_found("Pay record not found"))?;

        let name = self.employee_name(employee_id).await?;
        Ok(PayRecordView::from_ledger(pay, name))
    }

    async fn employee_name(&self, employee_id: Uuid) -> Result<String, AppError> {
        Ok(self
            .store
            .get_employee(employee_id)
            .await?
            .map(|e| e.name)
            .unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string()))
    }

    /// Flips a pool record between pending and held.
    pub async fn toggle_hold(&self, id: Uuid) -> Result<ApprovalOutcome, AppError> {
        let Some(record) = self.store.get_pay_approval(id).await? else {
            return Err(self.unavailable(id, "Approved records cannot be held").await);
        };

        let updated = self
            .store
            .set_pay_approval_status(id, record.status, record.status.toggled())
            .await?;

        match updated {
            Some(record) => {
                log::info!("Pay record {} is now {}", record.id, record.status);
                Ok(ApprovalOutcome {
                    id: record.id,
                    status: record.status.to_string(),
                    approved_by: None,
                    week_start: record.week_start,
                    week_end: record.week_end,
                })
            }
            None => Err(self.unavailable(id, "Approved records cannot be held").await),
        }
    }

    /// Moves a pending or held record into the ledger.
    pub async fn approve(&self, id: Uuid, approved_by: Uuid) -> Result<ApprovalOutcome, AppError> {
        let approved_at = self.settings.now();

        match self
            .store
            .approve_pay_approval(id, approved_by, approved_at, None)
            .await?
        {
            Some(pay) => {
                log::info!(
                    "Pay record {} for employee {} approved by {}",
                    pay.id,
                    pay.user_id,
                    approved_by
                );
                Ok(ApprovalOutcome {
                    id: pay.id,
                    status: "approved".to_string(),
                    approved_by: Some(approved_by),
                    week_start: pay.week_start,
                    week_end: pay.week_end,
                })
            }
            None => Err(self.unavailable(id, "Pay record already approved").await),
        }
    }

    /// Approves every pending record across all weeks. Held records stay in
    /// the pool.
    pub async fn approve_all(&self, approved_by: Uuid) -> Result<BulkApprovalOutcome, AppError> {
        let pending = self
            .store
            .find_pay_approvals(&[ApprovalStatus::Pending])
            .await?;
        if pending.is_empty() {
            return Err(AppError::invalid_state("No pending pay records to approve"));
        }

        let current = PayWeek::containing(self.settings.current_date().await?);
        let approved_at = self.settings.now();
        let mut approved = 0;
        for record in pending {
            match self
                .store
                .approve_pay_approval(
                    record.id,
                    approved_by,
                    approved_at,
                    Some(ApprovalStatus::Pending),
                )
                .await
            {
                Ok(Some(_)) => approved += 1,
                Ok(None) => {
                    log::warn!(
                        "Pay record {} was held or removed before approval, skipping",
                        record.id
                    );
                }
                Err(AppError::InvalidState(message)) => {
                    log::warn!("Skipping pay record {}: {}", record.id, message);
                }
                Err(err) => return Err(err),
            }
        }

        log::info!("Bulk approval by {} approved {} records", approved_by, approved);

        Ok(BulkApprovalOutcome {
            approved,
            approved_by,
            week_start: current.week_start,
            week_end: current.week_end,
        })
    }
}
