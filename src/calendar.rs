// File: ./src/calendar.rs
//! Month-grid generation for the care calendar.
//!
//! The grid is the flat, row-major cell list a traditional 7-column
//! calendar renders: leading days of the previous month pad the first row
//! back to Sunday, then every day of the requested month, then trailing
//! days of the next month to complete the last row.

use chrono::{Datelike, Duration, Month, NaiveDate};

/// One cell of the month grid. Derived on every call, never persisted.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
}

/// Build the cell list for `month`/`year`.
///
/// `today` is injected rather than read from the clock so the grid is a
/// pure function. Only cells of the requested month can carry
/// `is_today`; a leading or trailing cell never does, even when its date
/// happens to be today. The output length is always a multiple of 7.
pub fn month_grid(year: i32, month: Month, today: NaiveDate) -> Vec<CalendarDay> {
    let month_num = month.number_from_month();
    // Infallible for any year chrono can represent.
    let first = NaiveDate::from_ymd_opt(year, month_num, 1).unwrap();
    let next_month_first = if month_num == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(year, month_num + 1, 1).unwrap()
    };

    let leading = i64::from(first.weekday().num_days_from_sunday());
    let mut cells = Vec::with_capacity(42);
    let mut cursor = first - Duration::days(leading);

    while cursor < first {
        cells.push(CalendarDay {
            date: cursor,
            is_current_month: false,
            is_today: false,
        });
        cursor += Duration::days(1);
    }

    while cursor < next_month_first {
        cells.push(CalendarDay {
            date: cursor,
            is_current_month: true,
            is_today: cursor == today,
        });
        cursor += Duration::days(1);
    }

    while cells.len() % 7 != 0 {
        cells.push(CalendarDay {
            date: cursor,
            is_current_month: false,
            is_today: false,
        });
        cursor += Duration::days(1);
    }

    cells
}

/// Heading for a rendered month, e.g. "February 2024".
pub fn month_title(year: i32, month: Month) -> String {
    format!("{} {}", month.name(), year)
}
