use chrono::{Datelike, Duration, NaiveDate};

use crate::database::models::PayWeek;

impl PayWeek {
    /// The Saturday-to-Friday week containing `reference`. A Friday closes
    /// its own week.
    pub fn containing(reference: NaiveDate) -> Self {
        // Monday = 0, so Friday = 4
        let weekday = reference.weekday().num_days_from_monday() as i64;
        let days_until_friday = (4 - weekday + 7) % 7;
        let week_end = reference + Duration::days(days_until_friday);

        Self {
            week_start: week_end - Duration::days(6),
            week_end,
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.week_start && day <= self.week_end
    }
}
