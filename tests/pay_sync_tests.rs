use std::time::Duration as StdDuration;

use chrono::Duration;
use pretty_assertions::assert_eq;

use payroll::PayrollStore;
use payroll::services::PayrollScheduler;
use payroll::database::models::{ApprovalStatus, PayWeek, ShiftStatus};

mod common;
use common::{TestContext, date, week};

#[tokio::test]
async fn test_sync_week_creates_pending_record_with_adjustments() {
    // Arrange
    let ctx = TestContext::new();
    let employee = ctx.add_employee("20.00").await;
    ctx.add_overtime_week(employee.id).await;
    ctx.add_income_tax().await;

    // Act
    let generated = ctx.state.payroll.sync_week(week()).await.unwrap();

    // Assert
    assert_eq!(generated, 1);
    let records = ctx.store.find_pay_approvals_for_week(week()).await.unwrap();
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.user_id, employee.id);
    assert_eq!(record.status, ApprovalStatus::Pending);
    assert_eq!(record.hours_worked, 45.0);
    assert_eq!(record.gross_amount, 950.0);
    assert_eq!(record.amount, 900.0);
    assert_eq!(record.adjustments.len(), 1);
    assert_eq!(record.adjustments[0].amount_applied, 50.0);
    assert!(record.adjustments[0].cap_hit);
}

#[tokio::test]
async fn test_sync_week_is_idempotent() {
    let ctx = TestContext::new();
    let employee = ctx.add_employee("18.75").await;
    let other = ctx.add_employee("22.10").await;
    ctx.add_overtime_week(employee.id).await;
    ctx.add_shift(other.id, date(2025, 9, 13), 9, 14).await;
    ctx.add_income_tax().await;

    let first = ctx.state.payroll.sync_week(week()).await.unwrap();
    let before = ctx.store.find_pay_approvals_for_week(week()).await.unwrap();

    let second = ctx.state.payroll.sync_week(week()).await.unwrap();
    let after = ctx.store.find_pay_approvals_for_week(week()).await.unwrap();

    assert_eq!(first, 2);
    assert_eq!(second, 0);
    assert_eq!(before.len(), after.len());
    for (a, b) in before.iter().zip(after.iter()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.amount, b.amount);
        assert_eq!(a.hours_worked, b.hours_worked);
        assert_eq!(a.updated_at, b.updated_at);
    }
}

#[tokio::test]
async fn test_concurrent_syncs_of_same_week_leave_one_row_per_employee() {
    let ctx = TestContext::new();
    let employee = ctx.add_employee("20.00").await;
    ctx.add_overtime_week(employee.id).await;

    let (a, b) = tokio::join!(
        ctx.state.payroll.sync_week(week()),
        ctx.state.payroll.sync_week(week())
    );

    assert_eq!(a.unwrap() + b.unwrap(), 1);
    assert_eq!(ctx.store.pay_approval_count().await, 1);
}

#[tokio::test]
async fn test_sync_updates_existing_record_when_hours_change() {
    let ctx = TestContext::new();
    let employee = ctx.add_employee("20.00").await;
    ctx.add_shift(employee.id, date(2025, 9, 15), 9, 17).await;

    ctx.state.payroll.sync_week(week()).await.unwrap();
    let original = ctx.store.find_pay_approvals_for_week(week()).await.unwrap()[0].clone();

    ctx.add_shift(employee.id, date(2025, 9, 16), 9, 13).await;
    let generated = ctx.state.payroll.sync_week(week()).await.unwrap();

    let records = ctx.store.find_pay_approvals_for_week(week()).await.unwrap();
    assert_eq!(generated, 0);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, original.id);
    assert_eq!(records[0].hours_worked, 12.0);
    assert_eq!(records[0].gross_amount, 240.0);
    assert_eq!(records[0].amount, 240.0);
}

#[tokio::test]
async fn test_approved_week_is_never_regenerated() {
    let ctx = TestContext::new();
    let employee = ctx.add_employee("20.00").await;
    let approver = uuid::Uuid::new_v4();
    ctx.add_overtime_week(employee.id).await;

    ctx.state.payroll.sync_week(week()).await.unwrap();
    let record = ctx.store.find_pay_approvals_for_week(week()).await.unwrap()[0].clone();
    ctx.state.payroll.approve(record.id, approver).await.unwrap();

    // More work shows up for the already-approved week
    ctx.add_shift(employee.id, date(2025, 9, 13), 10, 14).await;
    let generated = ctx.state.payroll.sync_week(week()).await.unwrap();
    let summary = ctx.state.payroll.sync_missing_from_shifts().await.unwrap();

    assert_eq!(generated, 0);
    assert_eq!(summary.generated, 0);
    assert_eq!(ctx.store.pay_approval_count().await, 0);

    let ledger = ctx.store.find_pays_for_week(week()).await.unwrap();
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger[0].hours_worked, 45.0);
    assert_eq!(ledger[0].amount, 950.0);
}

#[tokio::test]
async fn test_zero_hour_pending_record_is_removed() {
    let ctx = TestContext::new();
    let employee = ctx.add_employee("20.00").await;
    let shift = ctx.add_shift(employee.id, date(2025, 9, 15), 9, 17).await;

    ctx.state.payroll.sync_week(week()).await.unwrap();
    assert_eq!(ctx.store.pay_approval_count().await, 1);

    ctx.store.remove_shift(shift.id).await;
    let generated = ctx.state.payroll.sync_week(week()).await.unwrap();

    assert_eq!(generated, 0);
    assert_eq!(ctx.store.pay_approval_count().await, 0);
}

#[tokio::test]
async fn test_zero_hour_held_record_is_kept() {
    let ctx = TestContext::new();
    let employee = ctx.add_employee("20.00").await;
    let shift = ctx.add_shift(employee.id, date(2025, 9, 15), 9, 17).await;

    ctx.state.payroll.sync_week(week()).await.unwrap();
    let record = ctx.store.find_pay_approvals_for_week(week()).await.unwrap()[0].clone();
    ctx.state.payroll.toggle_hold(record.id).await.unwrap();

    // Shift reverted to assigned: no completed hours remain
    ctx.store
        .set_shift_status(shift.id, ShiftStatus::Assigned)
        .await;
    ctx.state.payroll.sync_week(week()).await.unwrap();

    let records = ctx.store.find_pay_approvals_for_week(week()).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, record.id);
    assert_eq!(records[0].status, ApprovalStatus::Held);
    assert_eq!(records[0].hours_worked, 8.0);
}

#[tokio::test]
async fn test_held_record_is_corrected_but_stays_held() {
    let ctx = TestContext::new();
    let employee = ctx.add_employee("15.00").await;
    ctx.add_shift(employee.id, date(2025, 9, 15), 9, 17).await;

    ctx.state.payroll.sync_week(week()).await.unwrap();
    let record = ctx.store.find_pay_approvals_for_week(week()).await.unwrap()[0].clone();
    ctx.state.payroll.toggle_hold(record.id).await.unwrap();

    ctx.add_shift(employee.id, date(2025, 9, 18), 9, 11).await;
    ctx.state.payroll.sync_week(week()).await.unwrap();

    let updated = ctx.store.get_pay_approval(record.id).await.unwrap().unwrap();
    assert_eq!(updated.status, ApprovalStatus::Held);
    assert_eq!(updated.hours_worked, 10.0);
    assert_eq!(updated.amount, 150.0);
}

#[tokio::test]
async fn test_only_completed_shifts_are_paid() {
    let ctx = TestContext::new();
    let employee = ctx.add_employee("20.00").await;
    ctx.add_shift(employee.id, date(2025, 9, 15), 9, 17).await;
    ctx.add_shift_with_status(
        employee.id,
        date(2025, 9, 16),
        9,
        17,
        ShiftStatus::Assigned,
    )
    .await;

    ctx.state.payroll.sync_week(week()).await.unwrap();

    let records = ctx.store.find_pay_approvals_for_week(week()).await.unwrap();
    assert_eq!(records[0].hours_worked, 8.0);
    assert_eq!(records[0].amount, 160.0);
}

#[tokio::test]
async fn test_shifts_of_unknown_employee_are_skipped() {
    let ctx = TestContext::new();
    let known = ctx.add_employee("20.00").await;
    ctx.add_shift(known.id, date(2025, 9, 15), 9, 17).await;
    ctx.add_shift(uuid::Uuid::new_v4(), date(2025, 9, 15), 9, 17)
        .await;

    let generated = ctx.state.payroll.sync_week(week()).await.unwrap();

    assert_eq!(generated, 1);
    let records = ctx.store.find_pay_approvals_for_week(week()).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].user_id, known.id);
}

#[tokio::test]
async fn test_empty_week_still_cleans_up_pending_records() {
    let ctx = TestContext::new();
    let employee = ctx.add_employee("20.00").await;
    let shifts = ctx.add_overtime_week(employee.id).await;
    ctx.state.payroll.sync_week(week()).await.unwrap();

    for shift in shifts {
        ctx.store.remove_shift(shift.id).await;
    }
    let generated = ctx.state.payroll.sync_week(week()).await.unwrap();

    assert_eq!(generated, 0);
    assert_eq!(ctx.store.pay_approval_count().await, 0);
}

#[tokio::test]
async fn test_sync_missing_processes_each_distinct_week_once() {
    let ctx = TestContext::new();
    let employee = ctx.add_employee("20.00").await;
    ctx.add_shift(employee.id, date(2025, 9, 15), 9, 17).await;
    ctx.add_shift(employee.id, date(2025, 9, 19), 9, 17).await;
    ctx.add_shift(employee.id, date(2025, 9, 20), 9, 17).await;

    let summary = ctx.state.payroll.sync_missing_from_shifts().await.unwrap();

    assert_eq!(summary.synced_weeks, 2);
    assert_eq!(summary.generated, 2);

    let next_week = PayWeek::containing(date(2025, 9, 20));
    let first = ctx.store.find_pay_approvals_for_week(week()).await.unwrap();
    let second = ctx.store.find_pay_approvals_for_week(next_week).await.unwrap();
    assert_eq!(first[0].hours_worked, 16.0);
    assert_eq!(second[0].hours_worked, 8.0);
    assert_eq!(second[0].week_start, date(2025, 9, 20));
    assert_eq!(second[0].week_end, date(2025, 9, 26));
}

#[tokio::test]
async fn test_generate_if_needed_runs_without_ledger() {
    let ctx = TestContext::new();
    let employee = ctx.add_employee("20.00").await;
    ctx.add_shift(employee.id, date(2025, 9, 15), 9, 17).await;

    let summary = ctx.state.payroll.generate_if_needed().await.unwrap();

    assert_eq!(summary.generated, 1);
    assert_eq!(summary.weeks_processed, 1);
}

#[tokio::test]
async fn test_generate_if_needed_without_shifts_does_nothing() {
    let ctx = TestContext::new();

    let summary = ctx.state.payroll.generate_if_needed().await.unwrap();

    assert_eq!(summary.generated, 0);
    assert_eq!(summary.weeks_processed, 0);
}

#[tokio::test]
async fn test_generate_if_needed_skips_when_shifts_are_covered() {
    let ctx = TestContext::new();
    let employee = ctx.add_employee("20.00").await;
    let approver = uuid::Uuid::new_v4();
    ctx.add_shift(employee.id, date(2025, 9, 15), 9, 17).await;

    ctx.state.payroll.sync_week(week()).await.unwrap();
    let record = ctx.store.find_pay_approvals_for_week(week()).await.unwrap()[0].clone();
    ctx.state.payroll.approve(record.id, approver).await.unwrap();

    // Exactly seven days past the approved week end: still covered
    let covered_day = week().week_end + Duration::days(7);
    ctx.add_shift(employee.id, covered_day, 9, 17).await;
    let skipped = ctx.state.payroll.generate_if_needed().await.unwrap();
    assert_eq!(skipped.generated, 0);
    assert_eq!(skipped.weeks_processed, 0);
    assert_eq!(ctx.store.pay_approval_count().await, 0);

    // Eight days past: bulk sync runs over every week with completed shifts
    ctx.add_shift(employee.id, covered_day + Duration::days(1), 9, 17)
        .await;
    let summary = ctx.state.payroll.generate_if_needed().await.unwrap();
    assert_eq!(summary.weeks_processed, 3);
    assert_eq!(summary.generated, 2);
}

#[tokio::test]
async fn test_scheduler_tick_generates_pending_records() {
    // Arrange
    let ctx = TestContext::new();
    let employee = ctx.add_employee("20.00").await;
    ctx.add_shift(employee.id, date(2025, 9, 15), 9, 17).await;
    let scheduler = PayrollScheduler::new(ctx.state.payroll.clone(), StdDuration::ZERO);

    // Act
    scheduler.run_once().await;

    // Assert
    assert_eq!(ctx.store.pay_approval_count().await, 1);
    assert!(scheduler.start().is_none());
}

#[tokio::test]
async fn test_saturday_shift_is_paid_in_the_week_it_opens() {
    // Arrange
    let ctx = TestContext::new();
    let employee = ctx.add_employee("20.00").await;
    ctx.add_shift(employee.id, date(2025, 9, 13), 9, 17).await;

    // Act
    let summary = ctx.state.payroll.sync_missing_from_shifts().await.unwrap();

    // Assert
    assert_eq!(summary.synced_weeks, 1);
    assert_eq!(summary.generated, 1);
    let records = ctx.store.find_pay_approvals_for_week(week()).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].week_start, date(2025, 9, 13));
    assert_eq!(records[0].week_end, date(2025, 9, 19));
    assert_eq!(records[0].hours_worked, 8.0);
}

#[tokio::test]
async fn test_thursday_shift_is_paid_in_the_week_ending_next_day() {
    // Arrange
    let ctx = TestContext::new();
    let employee = ctx.add_employee("20.00").await;
    ctx.add_shift(employee.id, date(2025, 9, 18), 9, 13).await;

    // Act
    let summary = ctx.state.payroll.sync_missing_from_shifts().await.unwrap();

    // Assert
    assert_eq!(summary.generated, 1);
    let records = ctx.store.find_pay_approvals_for_week(week()).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].week_end, date(2025, 9, 19));
    assert_eq!(records[0].amount, 80.0);
}
