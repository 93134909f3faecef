use std::collections::{BTreeSet, HashMap, HashSet};

use chrono::Utc;
use uuid::Uuid;

use crate::database::models::{
    AppliedAdjustment, ApprovalStatus, AssignmentStatus, Employee, GenerateSummary, PayApprove,
    PayWeek, ShiftStatus, SyncSummary,
};
use crate::error::AppError;

use super::{PayrollService, hours_by_employee, resolve_adjustments, round2, wage::WageBreakdown};

const HOURS_TOLERANCE: f64 = 0.001;
const AMOUNT_TOLERANCE: f64 = 0.01;

/// Bulk generation is skipped while the newest completed shift is at most
/// this many days past the newest approved week.
const GENERATE_GUARD_DAYS: i64 = 7;

/// Figures computed for one employee and week.
struct Computed {
    hours_worked: f64,
    gross_amount: f64,
    amount: f64,
    adjustments: Vec<AppliedAdjustment>,
}

impl Computed {
    fn differs_from(&self, record: &PayApprove) -> bool {
        (record.hours_worked - self.hours_worked).abs() > HOURS_TOLERANCE
            || (record.amount - self.amount).abs() > AMOUNT_TOLERANCE
            || (record.gross_amount - self.gross_amount).abs() > AMOUNT_TOLERANCE
    }
}

impl PayrollService {
    /// Brings the pending pool for `week` in line with completed shifts.
    /// Employees already approved for the week are never touched, held rows
    /// are corrected but keep their status, and pending rows no longer backed
    /// by hours are removed. Returns the number of newly created rows.
    pub async fn sync_week(&self, week: PayWeek) -> Result<usize, AppError> {
        let shifts = self
            .store
            .find_shifts(
                ShiftStatus::Completed,
                Some(week.week_start),
                Some(week.week_end),
            )
            .await?;
        let hours = hours_by_employee(&shifts);

        // Pool before ledger: a row approved between the two reads then shows
        // up as approved instead of as missing from the pool.
        let existing = self.store.find_pay_approvals_for_week(week).await?;
        let existing_by_user: HashMap<Uuid, &PayApprove> =
            existing.iter().map(|r| (r.user_id, r)).collect();

        let approved: HashSet<Uuid> = self
            .store
            .find_pays_for_week(week)
            .await?
            .into_iter()
            .map(|pay| pay.user_id)
            .collect();

        let mut generated = 0;
        let mut updated = 0;

        if !hours.is_empty() {
            let mut employee_ids: Vec<Uuid> = hours.keys().copied().collect();
            employee_ids.sort();

            let employees: HashMap<Uuid, Employee> = self
                .store
                .find_employees(&employee_ids)
                .await?
                .into_iter()
                .map(|e| (e.id, e))
                .collect();
            let types = self.store.find_adjustment_types().await?;

            for employee_id in employee_ids {
                if approved.contains(&employee_id) {
                    log::debug!(
                        "Employee {} already approved for week ending {}, skipping",
                        employee_id,
                        week.week_end
                    );
                    continue;
                }

                let Some(employee) = employees.get(&employee_id) else {
                    log::warn!(
                        "Completed shifts reference unknown employee {}, skipping",
                        employee_id
                    );
                    continue;
                };

                let assignments = self
                    .store
                    .find_employee_adjustments(employee_id, Some(AssignmentStatus::Active))
                    .await?;

                let worked = hours[&employee_id];
                let wage = WageBreakdown::compute(worked, employee.hourly_rate());
                let resolved = resolve_adjustments(
                    &types,
                    &assignments,
                    employee_id,
                    wage.gross,
                    wage.overtime_pay,
                    week.week_end,
                );
                let computed = Computed {
                    hours_worked: round2(worked),
                    gross_amount: wage.gross,
                    amount: round2(wage.gross + resolved.net_delta),
                    adjustments: resolved.applied,
                };

                match existing_by_user.get(&employee_id) {
                    Some(record) => {
                        if !computed.differs_from(record) {
                            continue;
                        }
                        let mut record = (*record).clone();
                        record.hours_worked = computed.hours_worked;
                        record.gross_amount = computed.gross_amount;
                        record.amount = computed.amount;
                        record.adjustments = computed.adjustments;
                        record.updated_at = Utc::now();

                        if self.store.update_pay_approval(&record).await? {
                            log::debug!(
                                "Updated {} pay record {} for employee {}",
                                record.status,
                                record.id,
                                employee_id
                            );
                            updated += 1;
                        }
                    }
                    None => {
                        let now = Utc::now();
                        let record = PayApprove {
                            id: Uuid::new_v4(),
                            user_id: employee_id,
                            week_start: week.week_start,
                            week_end: week.week_end,
                            hours_worked: computed.hours_worked,
                            gross_amount: computed.gross_amount,
                            amount: computed.amount,
                            adjustments: computed.adjustments,
                            status: ApprovalStatus::Pending,
                            created_at: now,
                            updated_at: now,
                        };

                        match self.store.insert_pay_approval(&record).await {
                            Ok(()) => {
                                log::debug!(
                                    "Created pay record {} for employee {}",
                                    record.id,
                                    employee_id
                                );
                                generated += 1;
                            }
                            // A concurrent sync or approval got there first
                            Err(AppError::InvalidState(message)) => {
                                log::warn!("{}", message);
                            }
                            Err(err) => return Err(err),
                        }
                    }
                }
            }
        }

        let mut removed = 0;
        for record in existing
            .iter()
            .filter(|r| r.status == ApprovalStatus::Pending && !hours.contains_key(&r.user_id))
        {
            if self
                .store
                .delete_pay_approval(record.id, ApprovalStatus::Pending)
                .await?
            {
                log::debug!(
                    "Removed pay record {} for employee {} with no remaining hours",
                    record.id,
                    record.user_id
                );
                removed += 1;
            }
        }

        log::info!(
            "Synced week {} to {}: {} generated, {} updated, {} removed",
            week.week_start,
            week.week_end,
            generated,
            updated,
            removed
        );

        Ok(generated)
    }

    /// Syncs every distinct week that contains at least one completed shift.
    pub async fn sync_missing_from_shifts(&self) -> Result<SyncSummary, AppError> {
        let shifts = self
            .store
            .find_shifts(ShiftStatus::Completed, None, None)
            .await?;

        let weeks: BTreeSet<PayWeek> = shifts
            .iter()
            .map(|shift| PayWeek::containing(shift.shift_date))
            .collect();

        let mut generated = 0;
        for week in &weeks {
            generated += self.sync_week(*week).await?;
        }

        Ok(SyncSummary {
            synced_weeks: weeks.len(),
            generated,
        })
    }

    /// Runs the bulk sync unless completed shifts are already covered by
    /// the most recent approved week.
    pub async fn generate_if_needed(&self) -> Result<GenerateSummary, AppError> {
        let Some(latest_shift) = self
            .store
            .latest_shift_date(ShiftStatus::Completed)
            .await?
        else {
            return Ok(GenerateSummary {
                generated: 0,
                weeks_processed: 0,
            });
        };

        if let Some(latest_week_end) = self.store.latest_pay_week_end().await? {
            let gap = (latest_shift - latest_week_end).num_days();
            if gap <= GENERATE_GUARD_DAYS {
                log::debug!(
                    "Latest completed shift {} is within {} days of approved week ending {}, nothing to generate",
                    latest_shift,
                    GENERATE_GUARD_DAYS,
                    latest_week_end
                );
                return Ok(GenerateSummary {
                    generated: 0,
                    weeks_processed: 0,
                });
            }
        }

        let summary = self.sync_missing_from_shifts().await?;
        Ok(GenerateSummary {
            generated: summary.generated,
            weeks_processed: summary.synced_weeks,
        })
    }
}
