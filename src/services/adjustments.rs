use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::database::PayrollStore;
use crate::database::models::{
    AdjustmentType, CreateAdjustmentTypeInput, CreateEmployeeAdjustmentInput, EmployeeAdjustment,
    UpdateAdjustmentTypeInput, UpdateEmployeeAdjustmentInput,
};
use crate::error::AppError;

fn ensure_non_negative(field: &str, value: Option<f64>) -> Result<(), AppError> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(AppError::validation(format!(
            "{} must be a non-negative number",
            field
        ))),
        _ => Ok(()),
    }
}

fn ensure_window(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<(), AppError> {
    match (start, end) {
        (Some(start), Some(end)) if start > end => Err(AppError::validation(
            "effectiveStart must not be after effectiveEnd",
        )),
        _ => Ok(()),
    }
}

fn validate_type(adjustment: &AdjustmentType) -> Result<(), AppError> {
    if adjustment.name.trim().is_empty() {
        return Err(AppError::validation("Name is required"));
    }
    ensure_non_negative("rateOrAmount", Some(adjustment.rate_or_amount))?;
    ensure_non_negative("capPerPeriod", adjustment.cap_per_period)?;
    ensure_window(adjustment.effective_start, adjustment.effective_end)
}

fn validate_assignment(assignment: &EmployeeAdjustment) -> Result<(), AppError> {
    ensure_non_negative("overrideRateOrAmount", assignment.override_rate_or_amount)?;
    ensure_non_negative("overrideCap", assignment.override_cap)?;
    ensure_window(assignment.effective_start, assignment.effective_end)
}

/// Administration of adjustment rules and their per-employee assignments.
#[derive(Clone)]
pub struct AdjustmentService {
    store: Arc<dyn PayrollStore>,
}

impl AdjustmentService {
    pub fn new(store: Arc<dyn PayrollStore>) -> Self {
        Self { store }
    }

    pub async fn create_type(
        &self,
        input: CreateAdjustmentTypeInput,
    ) -> Result<AdjustmentType, AppError> {
        let now = Utc::now();
        let adjustment = AdjustmentType {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            direction: input.direction,
            mode: input.mode,
            rate_or_amount: input.rate_or_amount,
            cap_per_period: input.cap_per_period,
            apply_on: input.apply_on,
            overtime_rule: input.overtime_rule,
            applies_globally: input.applies_globally,
            note: input.note,
            effective_start: input.effective_start,
            effective_end: input.effective_end,
            created_at: now,
            updated_at: now,
        };
        validate_type(&adjustment)?;

        self.store.insert_adjustment_type(&adjustment).await?;
        log::info!("Created adjustment type {} ({})", adjustment.name, adjustment.id);
        Ok(adjustment)
    }

    /// Newest first.
    /// Newest first.
    pub async fn list_types(&self) -> Result<Vec<AdjustmentType>, AppError> {
        let mut types = self.store.find_adjustment_types().await?;
        types.reverse();
        Ok(types)
    }

    pub async fn update_type(
        &self,
        id: Uuid,
        patch: UpdateAdjustmentTypeInput,
    ) -> Result<AdjustmentType, AppError> {
        let mut adjustment = self
            .store
            .get_adjustment_type(id)
            .await?
            .ok_or_else(|| AppError::not_found("Adjustment type not found"))?;

        if let Some(name) = patch.name {
            adjustment.name = name.trim().to_string();
        }
        if let Some(direction) = patch.direction {
            adjustment.direction = direction;
        }
        if let Some(mode) = patch.mode {
            adjustment.mode = mode;
        }
        if let Some(rate) = patch.rate_or_amount {
            adjustment.rate_or_amount = rate;
        }
        if let Some(cap) = patch.cap_per_period {
            adjustment.cap_per_period = cap;
        }
        if let Some(apply_on) = patch.apply_on {
            adjustment.apply_on = apply_on;
        }
        if let Some(rule) = patch.overtime_rule {
            adjustment.overtime_rule = rule;
        }
        if let Some(applies_globally) = patch.applies_globally {
            adjustment.applies_globally = applies_globally;
        }
        if let Some(note) = patch.note {
            adjustment.note = note;
        }
        if let Some(start) = patch.effective_start {
            adjustment.effective_start = start;
        }
        if let Some(end) = patch.effective_end {
            adjustment.effective_end = end;
        }
        validate_type(&adjustment)?;
        adjustment.updated_at = Utc::now();

        if !self.store.update_adjustment_type(&adjustment).await? {
            return Err(AppError::not_found("Adjustment type not found"));
        }
        Ok(adjustment)
    }

    pub async fn assign_to_employee(
        &self,
        employee_id: Uuid,
        input: CreateEmployeeAdjustmentInput,
    ) -> Result<EmployeeAdjustment, AppError> {
        if self.store.get_employee(employee_id).await?.is_none() {
            return Err(AppError::not_found("Employee not found"));
        }
        if self
            .store
            .get_adjustment_type(input.adjustment_type_id)
            .await?
            .is_none()
        {
            return Err(AppError::not_found("Adjustment type not found"));
        }

        let now = Utc::now();
        let assignment = EmployeeAdjustment {
            id: Uuid::new_v4(),
            employee_id,
            adjustment_type_id: input.adjustment_type_id,
            override_rate_or_amount: input.override_rate_or_amount,
            override_cap: input.override_cap,
            replace_global: input.replace_global,
            status: input.status,
            note: input.note,
            effective_start: input.effective_start,
            effective_end: input.effective_end,
            created_at: now,
            updated_at: now,
        };
        validate_assignment(&assignment)?;

        self.store.insert_employee_adjustment(&assignment).await?;
        log::info!(
            "Assigned adjustment type {} to employee {}",
            assignment.adjustment_type_id,
            employee_id
        );
        Ok(assignment)
    }

    /// All of an employee's assignments, active and paused, newest first.
    pub async fn list_for_employee(
        &self,
        employee_id: Uuid,
    ) -> Result<Vec<EmployeeAdjustment>, AppError> {
        let mut assignments = self
            .store
            .find_employee_adjustments(employee_id, None)
            .await?;
        assignments.reverse();
        Ok(assignments)
    }

    pub async fn update_assignment(
        &self,
        employee_id: Uuid,
        assignment_id: Uuid,
        patch: UpdateEmployeeAdjustmentInput,
    ) -> Result<EmployeeAdjustment, AppError> {
        let mut assignment = self
            .store
            .get_employee_adjustment(assignment_id)
            .await?
            .filter(|a| a.employee_id == employee_id)
            .ok_or_else(|| AppError::not_found("Employee adjustment not found"))?;

        if let Some(rate) = patch.override_rate_or_amount {
            assignment.override_rate_or_amount = rate;
        }
        if let Some(cap) = patch.override_cap {
            assignment.override_cap = cap;
        }
        if let Some(replace_global) = patch.replace_global {
            assignment.replace_global = replace_global;
        }
        if let Some(status) = patch.status {
            assignment.status = status;
        }
        if let Some(note) = patch.note {
            assignment.note = note;
        }
        if let Some(start) = patch.effective_start {
            assignment.effective_start = start;
        }
        if let Some(end) = patch.effective_end {
            assignment.effective_end = end;
        }
        validate_assignment(&assignment)?;
        assignment.updated_at = Utc::now();

        if !self.store.update_employee_adjustment(&assignment).await? {
            return Err(AppError::not_found("Employee adjustment not found"));
        }
        Ok(assignment)
    }
}
