#![allow(dead_code)]

use std::sync::Arc;

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveTime, Utc};
use fake::Fake;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use uuid::Uuid;

use payroll::database::models::{
    AdjustmentDirection, AdjustmentMode, AdjustmentType, ApplyOn, Employee, EmployeeStatus,
    PayWeek, Shift, ShiftStatus,
};
use payroll::services::FixedClock;
use payroll::{AppState, MemoryStore, PayrollStore};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Saturday 2025-09-13 through Friday 2025-09-19.
pub fn week() -> PayWeek {
    PayWeek::containing(date(2025, 9, 17))
}

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub state: AppState,
}

impl TestContext {
    /// Context whose clock reads noon UTC on `today`.
    pub fn on(today: NaiveDate) -> Self {
        let store = Arc::new(MemoryStore::new());
        let dyn_store: Arc<dyn PayrollStore> = store.clone();
        let state = AppState::new(dyn_store, Arc::new(FixedClock::on(today)));
        Self { store, state }
    }

    pub fn new() -> Self {
        Self::on(date(2025, 9, 22))
    }

    pub async fn add_employee(&self, pay_rate: &str) -> Employee {
        let employee = Employee {
            id: Uuid::new_v4(),
            name: Name().fake(),
            email: SafeEmail().fake(),
            pay_rate: pay_rate.parse::<BigDecimal>().unwrap(),
            status: EmployeeStatus::Active,
            created_at: Utc::now(),
        };
        self.store.insert_employee(employee.clone()).await;
        employee
    }

    pub async fn add_shift(
        &self,
        employee_id: Uuid,
        day: NaiveDate,
        start_hour: u32,
        end_hour: u32,
    ) -> Shift {
        self.add_shift_with_status(employee_id, day, start_hour, end_hour, ShiftStatus::Completed)
            .await
    }

    pub async fn add_shift_with_status(
        &self,
        employee_id: Uuid,
        day: NaiveDate,
        start_hour: u32,
        end_hour: u32,
        status: ShiftStatus,
    ) -> Shift {
        let shift = Shift {
            id: Uuid::new_v4(),
            employee_id,
            shift_date: day,
            start_time: NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(end_hour, 0, 0).unwrap(),
            status,
        };
        self.store.insert_shift(shift.clone()).await;
        shift
    }

    /// Five nine-hour days, Monday to Friday of `week()`: 45 hours.
    pub async fn add_overtime_week(&self, employee_id: Uuid) -> Vec<Shift> {
        let mut shifts = Vec::new();
        for day in 15..=19 {
            shifts.push(self.add_shift(employee_id, date(2025, 9, day), 8, 17).await);
        }
        shifts
    }

    pub async fn add_global_rule(
        &self,
        name: &str,
        direction: AdjustmentDirection,
        mode: AdjustmentMode,
        rate: f64,
        cap: Option<f64>,
    ) -> AdjustmentType {
        let now = Utc::now();
        let rule = AdjustmentType {
            id: Uuid::new_v4(),
            name: name.to_string(),
            direction,
            mode,
            rate_or_amount: rate,
            cap_per_period: cap,
            apply_on: ApplyOn::All,
            overtime_rule: None,
            applies_globally: true,
            note: None,
            effective_start: None,
            effective_end: None,
            created_at: now,
            updated_at: now,
        };
        self.store.insert_adjustment_type(&rule).await.unwrap();
        rule
    }

    /// The 10% income tax capped at 50 per period.
    pub async fn add_income_tax(&self) -> AdjustmentType {
        self.add_global_rule(
            "Income tax",
            AdjustmentDirection::Deduct,
            AdjustmentMode::Percent,
            10.0,
            Some(50.0),
        )
        .await
    }
}
