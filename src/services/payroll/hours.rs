use std::collections::HashMap;

use uuid::Uuid;

use crate::database::models::Shift;

/// Total worked hours per employee. Only completed shifts count, and
/// employees whose total is zero are left out.
pub fn hours_by_employee<'a, I>(shifts: I) -> HashMap<Uuid, f64>
where
    I: IntoIterator<Item = &'a Shift>,
{
    let mut totals: HashMap<Uuid, f64> = HashMap::new();
    for shift in shifts.into_iter().filter(|s| s.is_completed()) {
        *totals.entry(shift.employee_id).or_default() += shift.hours();
    }
    totals.retain(|_, hours| *hours > 0.0);
    totals
}
