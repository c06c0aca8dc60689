//! Calendar date helpers shared by the depreciation schedules.

use chrono::{Datelike, NaiveDate};

/// Returns the number of whole calendar months from `from` to `to`.
///
/// The month count is the calendar `year * 12 + month` difference, reduced
/// by one when the final month is not yet complete (the day of month in `to`
/// is earlier than in `from`). The result truncates toward zero, so a `to`
/// before `from` yields zero or a negative count.
///
/// # Examples
///
/// ```
/// use hr_engine::calculation::months_elapsed;
/// use chrono::NaiveDate;
///
/// let issued = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
///
/// assert_eq!(months_elapsed(issued, NaiveDate::from_ymd_opt(2024, 4, 15).unwrap()), 3);
/// assert_eq!(months_elapsed(issued, NaiveDate::from_ymd_opt(2024, 4, 14).unwrap()), 2);
/// assert_eq!(months_elapsed(issued, NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()), -1);
/// ```
pub fn months_elapsed(from: NaiveDate, to: NaiveDate) -> i32 {
    let calendar_months =
        (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);

    if calendar_months > 0 && to.day() < from.day() {
        calendar_months - 1
    } else if calendar_months < 0 && to.day() > from.day() {
        calendar_months + 1
    } else {
        calendar_months
    }
}
