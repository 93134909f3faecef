use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::database::models::{
    AdjustmentDirection, AdjustmentMode, AdjustmentType, AppliedAdjustment, ApplyOn,
    AssignmentStatus, EmployeeAdjustment,
};

use super::wage::round2;

/// Adjustments applied to one pay record and their signed total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedAdjustments {
    pub applied: Vec<AppliedAdjustment>,
    pub net_delta: f64,
}

/// Works out which rules apply to `employee_id` on `reference` and what each
/// one is worth against `gross` and `overtime_pay`.
///
/// Globals active on the reference date apply at their own rate, except those
/// an active assignment of the employee replaces. Assignments active on the
/// reference date follow the globals in the order given. Paused assignments
/// and assignments whose type no longer exists contribute nothing.
pub fn resolve_adjustments(
    types: &[AdjustmentType],
    assignments: &[EmployeeAdjustment],
    employee_id: Uuid,
    gross: f64,
    overtime_pay: f64,
    reference: NaiveDate,
) -> ResolvedAdjustments {
    let assignments: Vec<&EmployeeAdjustment> = assignments
        .iter()
        .filter(|a| a.employee_id == employee_id && a.status == AssignmentStatus::Active)
        .collect();

    let replaced: HashSet<Uuid> = assignments
        .iter()
        .filter(|a| a.replace_global)
        .map(|a| a.adjustment_type_id)
        .collect();

    let globals = types
        .iter()
        .filter(|t| t.applies_globally && t.is_effective_on(reference))
        .filter(|t| !replaced.contains(&t.id))
        .map(|t| (t, None));

    let assigned = assignments
        .iter()
        .filter(|a| a.is_effective_on(reference))
        .filter_map(|a| {
            let adjustment_type = types.iter().find(|t| t.id == a.adjustment_type_id)?;
            Some((adjustment_type, Some(*a)))
        });

    let mut resolved = ResolvedAdjustments::default();
    for (adjustment_type, assignment) in globals.chain(assigned) {
        let entry = apply(adjustment_type, assignment, gross, overtime_pay);
        match entry.direction {
            AdjustmentDirection::Add => resolved.net_delta += entry.amount_applied,
            AdjustmentDirection::Deduct => resolved.net_delta -= entry.amount_applied,
        }
        resolved.applied.push(entry);
    }
    resolved.net_delta = round2(resolved.net_delta);
    resolved
}

fn apply(
    adjustment_type: &AdjustmentType,
    assignment: Option<&EmployeeAdjustment>,
    gross: f64,
    overtime_pay: f64,
) -> AppliedAdjustment {
    let rate = assignment
        .and_then(|a| a.override_rate_or_amount)
        .unwrap_or(adjustment_type.rate_or_amount);
    let cap = assignment
        .and_then(|a| a.override_cap)
        .or(adjustment_type.cap_per_period);

    let base = match adjustment_type.apply_on {
        ApplyOn::OvertimeOnly => overtime_pay,
        ApplyOn::All => gross,
    };
    let mut value = match adjustment_type.mode {
        AdjustmentMode::Flat => rate,
        AdjustmentMode::Percent => base * (rate / 100.0),
    };
    value = round2(value);

    let mut cap_hit = false;
    if let Some(cap) = cap.filter(|cap| value > *cap) {
        value = round2(cap);
        cap_hit = true;
    }

    AppliedAdjustment {
        name: adjustment_type.name.clone(),
        direction: adjustment_type.direction,
        mode: adjustment_type.mode,
        rate_or_amount: rate,
        apply_on: adjustment_type.apply_on,
        overtime_rule: adjustment_type.overtime_rule,
        cap_per_period: cap,
        amount_applied: value,
        cap_hit,
    }
}
