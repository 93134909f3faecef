use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

string_enum! {
    #[derive(Default)]
    pub enum ShiftStatus {
        #[default]
        Assigned => "assigned",
        Completed => "completed",
    }
}

/// A scheduled block of work for one employee on one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Shift {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub shift_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub status: ShiftStatus,
}

impl Shift {
    /// Worked duration in decimal hours. Start and end are wall-clock times on
    /// the same day, so an end at or before the start counts as zero.
    pub fn hours(&self) -> f64 {
        let seconds = (self.end_time - self.start_time).num_seconds();
        if seconds <= 0 { 0.0 } else { seconds as f64 / 3600.0 }
    }

    pub fn is_completed(&self) -> bool {
        self.status == ShiftStatus::Completed
    }
}
