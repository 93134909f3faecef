use chrono::Duration;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use payroll::database::models::{
    AdjustmentDirection, AdjustmentMode, ApplyOn, AssignmentStatus, CreateAdjustmentTypeInput,
    CreateEmployeeAdjustmentInput, OvertimeRule, UpdateAdjustmentTypeInput,
    UpdateEmployeeAdjustmentInput,
};
use payroll::{AppError, PayrollStore};

mod common;
use common::{TestContext, date, week};

fn tax_input() -> CreateAdjustmentTypeInput {
    CreateAdjustmentTypeInput {
        name: "Income tax".to_string(),
        direction: AdjustmentDirection::Deduct,
        mode: AdjustmentMode::Percent,
        rate_or_amount: 10.0,
        cap_per_period: Some(50.0),
        apply_on: ApplyOn::All,
        overtime_rule: Some(OvertimeRule::None),
        applies_globally: true,
        note: None,
        effective_start: None,
        effective_end: None,
    }
}

fn assignment_input(adjustment_type_id: Uuid) -> CreateEmployeeAdjustmentInput {
    CreateEmployeeAdjustmentInput {
        adjustment_type_id,
        override_rate_or_amount: None,
        override_cap: None,
        replace_global: false,
        status: AssignmentStatus::Active,
        note: None,
        effective_start: None,
        effective_end: None,
    }
}

#[tokio::test]
async fn test_create_type_validates_before_writing() {
    let ctx = TestContext::new();

    let mut blank = tax_input();
    blank.name = "   ".to_string();
    let mut negative = tax_input();
    negative.rate_or_amount = -1.0;
    let mut negative_cap = tax_input();
    negative_cap.cap_per_period = Some(-5.0);
    let mut inverted = tax_input();
    inverted.effective_start = Some(date(2025, 10, 1));
    inverted.effective_end = Some(date(2025, 9, 1));

    for input in [blank, negative, negative_cap, inverted] {
        let result = ctx.state.adjustments.create_type(input).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }
    assert!(ctx.state.adjustments.list_types().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_type_applies_partial_patch() {
    let ctx = TestContext::new();
    let created = ctx.state.adjustments.create_type(tax_input()).await.unwrap();

    let patch: UpdateAdjustmentTypeInput =
        serde_json::from_str(r#"{"capPerPeriod": null, "rateOrAmount": 12}"#).unwrap();
    let updated = ctx
        .state
        .adjustments
        .update_type(created.id, patch)
        .await
        .unwrap();

    assert_eq!(updated.cap_per_period, None);
    assert_eq!(updated.rate_or_amount, 12.0);
    assert_eq!(updated.name, "Income tax");
    assert!(updated.applies_globally);

    let missing = ctx
        .state
        .adjustments
        .update_type(Uuid::new_v4(), UpdateAdjustmentTypeInput::default())
        .await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_assignment_requires_existing_employee_and_type() {
    let ctx = TestContext::new();
    let employee = ctx.add_employee("20.00").await;
    let tax = ctx.state.adjustments.create_type(tax_input()).await.unwrap();

    let no_employee = ctx
        .state
        .adjustments
        .assign_to_employee(Uuid::new_v4(), assignment_input(tax.id))
        .await;
    let no_type = ctx
        .state
        .adjustments
        .assign_to_employee(employee.id, assignment_input(Uuid::new_v4()))
        .await;

    assert!(matches!(no_employee, Err(AppError::NotFound(_))));
    assert!(matches!(no_type, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_assignment_of_another_employee_cannot_be_updated() {
    let ctx = TestContext::new();
    let owner = ctx.add_employee("20.00").await;
    let stranger = ctx.add_employee("20.00").await;
    let tax = ctx.state.adjustments.create_type(tax_input()).await.unwrap();
    let assignment = ctx
        .state
        .adjustments
        .assign_to_employee(owner.id, assignment_input(tax.id))
        .await
        .unwrap();

    let result = ctx
        .state
        .adjustments
        .update_assignment(
            stranger.id,
            assignment.id,
            UpdateEmployeeAdjustmentInput::default(),
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn test_replacement_assignment_changes_synced_amount() {
    // Arrange
    let ctx = TestContext::new();
    let employee = ctx.add_employee("20.00").await;
    ctx.add_overtime_week(employee.id).await;
    let tax = ctx.state.adjustments.create_type(tax_input()).await.unwrap();

    let mut own = assignment_input(tax.id);
    own.replace_global = true;
    own.override_rate_or_amount = Some(5.0);
    ctx.state
        .adjustments
        .assign_to_employee(employee.id, own)
        .await
        .unwrap();

    // Act
    ctx.state.payroll.sync_week(week()).await.unwrap();

    // Assert
    let record = ctx.store.find_pay_approvals_for_week(week()).await.unwrap()[0].clone();
    assert_eq!(record.gross_amount, 950.0);
    assert_eq!(record.adjustments.len(), 1);
    assert_eq!(record.adjustments[0].rate_or_amount, 5.0);
    assert_eq!(record.amount, 902.5);
}

#[tokio::test]
async fn test_pausing_an_assignment_is_picked_up_by_next_sync() {
    let ctx = TestContext::new();
    let employee = ctx.add_employee("20.00").await;
    ctx.add_overtime_week(employee.id).await;
    let bonus = ctx
        .state
        .adjustments
        .create_type(CreateAdjustmentTypeInput {
            name: "Weekend premium".to_string(),
            direction: AdjustmentDirection::Add,
            mode: AdjustmentMode::Flat,
            rate_or_amount: 75.0,
            applies_globally: false,
            cap_per_period: None,
            ..tax_input()
        })
        .await
        .unwrap();
    let assignment = ctx
        .state
        .adjustments
        .assign_to_employee(employee.id, assignment_input(bonus.id))
        .await
        .unwrap();

    ctx.state.payroll.sync_week(week()).await.unwrap();
    let first = ctx.store.find_pay_approvals_for_week(week()).await.unwrap()[0].clone();
    assert_eq!(first.amount, 1025.0);

    let patch = UpdateEmployeeAdjustmentInput {
        status: Some(AssignmentStatus::Paused),
        ..Default::default()
    };
    ctx.state
        .adjustments
        .update_assignment(employee.id, assignment.id, patch)
        .await
        .unwrap();
    ctx.state.payroll.sync_week(week()).await.unwrap();

    let second = ctx.store.get_pay_approval(first.id).await.unwrap().unwrap();
    assert_eq!(second.amount, 950.0);
    assert!(second.adjustments.is_empty());

    let listed = ctx
        .state
        .adjustments
        .list_for_employee(employee.id)
        .await
        .unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].status, AssignmentStatus::Paused);
}

#[tokio::test]
async fn test_snapshot_lists_rules_in_creation_order() {
    // Arrange
    let ctx = TestContext::new();
    let employee = ctx.add_employee("20.00").await;
    ctx.add_overtime_week(employee.id).await;
    let first = ctx
        .add_global_rule("First", AdjustmentDirection::Deduct, AdjustmentMode::Flat, 10.0, None)
        .await;
    let mut second = ctx
        .add_global_rule("Second", AdjustmentDirection::Add, AdjustmentMode::Flat, 20.0, None)
        .await;
    second.created_at = first.created_at + Duration::seconds(1);
    ctx.store.update_adjustment_type(&second).await.unwrap();
    let mut own = ctx
        .add_global_rule("Own", AdjustmentDirection::Add, AdjustmentMode::Flat, 5.0, None)
        .await;
    own.applies_globally = false;
    own.created_at = first.created_at - Duration::seconds(1);
    ctx.store.update_adjustment_type(&own).await.unwrap();
    ctx.state
        .adjustments
        .assign_to_employee(employee.id, assignment_input(own.id))
        .await
        .unwrap();

    // Act
    ctx.state.payroll.sync_week(week()).await.unwrap();

    // Assert
    let record = ctx.store.find_pay_approvals_for_week(week()).await.unwrap()[0].clone();
    let names: Vec<&str> = record.adjustments.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["First", "Second", "Own"]);
    assert_eq!(record.amount, 965.0);

    let listed: Vec<String> = ctx
        .state
        .adjustments
        .list_types()
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(listed, vec!["Second", "First", "Own"]);
}
