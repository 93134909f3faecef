use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

string_enum! {
    pub enum AdjustmentDirection {
        Add => "add",
        Deduct => "deduct",
    }
}

string_enum! {
    pub enum AdjustmentMode {
        Percent => "percent",
        Flat => "flat",
    }
}

string_enum! {
    /// Which part of the wage a percentage rule is computed against.
    #[derive(Default)]
    pub enum ApplyOn {
        #[default]
        All => "all",
        OvertimeOnly => "overtime_only",
    }
}

string_enum! {
    /// Informational tag only; it is never evaluated against hours.
    pub enum OvertimeRule {
        None => "none",
        EightHourDay => "8h_day",
        FortyHourWeek => "40h_week",
    }
}

string_enum! {
    #[derive(Default)]
    pub enum AssignmentStatus {
        #[default]
        Active => "active",
        Paused => "paused",
    }
}

/// `true` when `day` lies inside the inclusive window; a missing bound is open.
pub fn within_window(start: Option<NaiveDate>, end: Option<NaiveDate>, day: NaiveDate) -> bool {
    if start.is_some_and(|s| day < s) {
        return false;
    }
    if end.is_some_and(|e| day > e) {
        return false;
    }
    true
}

/// A reusable deduction or premium rule.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentType {
    pub id: Uuid,
    pub name: String,
    pub direction: AdjustmentDirection,
    pub mode: AdjustmentMode,
    pub rate_or_amount: f64,
    pub cap_per_period: Option<f64>,
    pub apply_on: ApplyOn,
    pub overtime_rule: Option<OvertimeRule>,
    pub applies_globally: bool,
    pub note: Option<String>,
    pub effective_start: Option<NaiveDate>,
    pub effective_end: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AdjustmentType {
    pub fn is_effective_on(&self, day: NaiveDate) -> bool {
        within_window(self.effective_start, self.effective_end, day)
    }
}

/// Assignment of an adjustment type to a single employee, optionally
/// overriding its rate and cap.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeAdjustment {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub adjustment_type_id: Uuid,
    pub override_rate_or_amount: Option<f64>,
    pub override_cap: Option<f64>,
    pub replace_global: bool,
    pub status: AssignmentStatus,
    pub note: Option<String>,
    pub effective_start: Option<NaiveDate>,
    pub effective_end: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EmployeeAdjustment {
    pub fn is_effective_on(&self, day: NaiveDate) -> bool {
        within_window(self.effective_start, self.effective_end, day)
    }
}

/// Snapshot of one rule as it was applied to a pay record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedAdjustment {
    pub name: String,
    pub direction: AdjustmentDirection,
    pub mode: AdjustmentMode,
    pub rate_or_amount: f64,
    pub apply_on: ApplyOn,
    pub overtime_rule: Option<OvertimeRule>,
    pub cap_per_period: Option<f64>,
    pub amount_applied: f64,
    pub cap_hit: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdjustmentTypeInput {
    pub name: String,
    pub direction: AdjustmentDirection,
    pub mode: AdjustmentMode,
    pub rate_or_amount: f64,
    pub cap_per_period: Option<f64>,
    #[serde(default)]
    pub apply_on: ApplyOn,
    #[serde(default = "default_overtime_rule")]
    pub overtime_rule: Option<OvertimeRule>,
    #[serde(default)]
    pub applies_globally: bool,
    pub note: Option<String>,
    pub effective_start: Option<NaiveDate>,
    pub effective_end: Option<NaiveDate>,
}

/// Partial update. Nullable fields distinguish "absent" (`None`) from an
/// explicit `null` (`Some(None)`), which clears the stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdjustmentTypeInput {
    pub name: Option<String>,
    pub direction: Option<AdjustmentDirection>,
    pub mode: Option<AdjustmentMode>,
    pub rate_or_amount: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    pub cap_per_period: Option<Option<f64>>,
    pub apply_on: Option<ApplyOn>,
    #[serde(default, deserialize_with = "double_option")]
    pub overtime_rule: Option<Option<OvertimeRule>>,
    pub applies_globally: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub note: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub effective_start: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub effective_end: Option<Option<NaiveDate>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeAdjustmentInput {
    pub adjustment_type_id: Uuid,
    pub override_rate_or_amount: Option<f64>,
    pub override_cap: Option<f64>,
    #[serde(default)]
    pub replace_global: bool,
    #[serde(default)]
    pub status: AssignmentStatus,
    pub note: Option<String>,
    pub effective_start: Option<NaiveDate>,
    pub effective_end: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEmployeeAdjustmentInput {
    #[serde(default, deserialize_with = "double_option")]
    pub override_rate_or_amount: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    pub override_cap: Option<Option<f64>>,
    pub replace_global: Option<bool>,
    pub status: Option<AssignmentStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub note: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub effective_start: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    pub effective_end: Option<Option<NaiveDate>>,
}

fn default_overtime_rule() -> Option<OvertimeRule> {
    Some(OvertimeRule::None)
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    #[test]
    fn window_bounds_are_inclusive() {
        assert!(within_window(Some(date(10)), Some(date(19)), date(10)));
        assert!(within_window(Some(date(10)), Some(date(19)), date(19)));
        assert!(!within_window(Some(date(10)), Some(date(19)), date(9)));
        assert!(!within_window(Some(date(10)), Some(date(19)), date(20)));
        assert!(within_window(None, None, date(1)));
        assert!(within_window(None, Some(date(5)), date(1)));
    }

    #[test]
    fn overtime_rule_uses_wire_names() {
        assert_eq!(
            serde_json::to_string(&OvertimeRule::EightHourDay).unwrap(),
            "\"8h_day\""
        );
        assert_eq!("40h_week".parse::<OvertimeRule>(), Ok(OvertimeRule::FortyHourWeek));
        assert_eq!(ApplyOn::OvertimeOnly.to_string(), "overtime_only");
    }

    #[test]
    fn update_input_distinguishes_null_from_absent() {
        let patch: UpdateAdjustmentTypeInput =
            serde_json::from_str(r#"{"capPerPeriod": null, "rateOrAmount": 7.5}"#).unwrap();
        assert_eq!(patch.cap_per_period, Some(None));
        assert_eq!(patch.rate_or_amount, Some(7.5));
        assert_eq!(patch.note, None);
    }

    #[test]
    fn create_input_defaults() {
        let input: CreateAdjustmentTypeInput = serde_json::from_str(
            r#"{"name": "Income tax", "direction": "deduct", "mode": "percent", "rateOrAmount": 10}"#,
        )
        .unwrap();
        assert_eq!(input.apply_on, ApplyOn::All);
        assert_eq!(input.overtime_rule, Some(OvertimeRule::None));
        assert!(!input.applies_globally);
        assert_eq!(input.cap_per_period, None);
    }

    #[test]
    fn enum_defaults() {
        assert_eq!(ApplyOn::default(), ApplyOn::All);
        assert_eq!(AssignmentStatus::default(), AssignmentStatus::Active);
    }
}
