// File: ./src/schedule.rs
//! Care-schedule math: days until the next care action, urgency, status
//! buckets and task grouping.
//!
//! Every function here is a pure transformation of `(last_cared,
//! frequency_days, now)`. Nothing reads the wall clock; callers resolve
//! `now` once at the outer edge (the CLI does, tests inject fixed values).

use crate::model::{CareTask, Plant};
use chrono::{DateTime, Duration, Utc};
use std::fmt;

const MS_PER_DAY: i64 = 86_400_000;

/// Whole days until the next care action is due.
///
/// `None` means the plant has never been cared for; callers treat that as
/// "care needed now". Once the due date has passed the result saturates
/// at `Some(0)`; the magnitude of lateness lives in [`CareStatus`].
/// Partial days round up: due in 12 hours is "due in 1 day".
pub fn days_until_next_care(
    last_cared: Option<DateTime<Utc>>,
    frequency_days: u32,
    now: DateTime<Utc>,
) -> Option<u32> {
    let last = last_cared?;
    let next_due = last + Duration::days(i64::from(frequency_days));
    let remaining_ms = (next_due - now).num_milliseconds();
    if remaining_ms <= 0 {
        return Some(0);
    }
    Some(ceil_days(remaining_ms))
}

fn ceil_days(ms: i64) -> u32 {
    ((ms + MS_PER_DAY - 1) / MS_PER_DAY) as u32
}

/// Normalized urgency in `[0, 1]`: the fraction of the care interval that
/// has elapsed. Never cared for -> `1.0`. Saturates at `1.0` past the due
/// date and is non-decreasing as `now` advances.
pub fn care_urgency(
    last_cared: Option<DateTime<Utc>>,
    frequency_days: u32,
    now: DateTime<Utc>,
) -> f64 {
    let Some(last) = last_cared else {
        return 1.0;
    };
    let elapsed_days = (now - last).num_milliseconds() as f64 / MS_PER_DAY as f64;
    (elapsed_days / f64::from(frequency_days)).clamp(0.0, 1.0)
}

/// Whether the plant is due for care right now, on whole elapsed days.
/// A plant with no care history always needs care.
pub fn needs_care(
    last_cared: Option<DateTime<Utc>>,
    frequency_days: u32,
    now: DateTime<Utc>,
) -> bool {
    match last_cared {
        None => true,
        Some(last) => (now - last).num_days() >= i64::from(frequency_days),
    }
}

/// Scheduling status of a single plant/care pair.
///
/// `DueNow` carries how many whole days overdue the plant is; exactly-due
/// is `overdue_days == 0`. Surfaces that only want "days until" read
/// [`days_until_next_care`]; surfaces that show lateness read the
/// magnitude from here.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CareStatus {
    NeverCared,
    DueNow { overdue_days: u32 },
    DueIn { days: u32 },
}

impl CareStatus {
    pub fn is_due_now(&self) -> bool {
        matches!(self, CareStatus::NeverCared | CareStatus::DueNow { .. })
    }
}

impl fmt::Display for CareStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CareStatus::NeverCared => write!(f, "Not yet cared for"),
            CareStatus::DueNow { overdue_days: 0 } => write!(f, "Needed now"),
            CareStatus::DueNow { overdue_days: 1 } => write!(f, "Overdue by 1 day"),
            CareStatus::DueNow { overdue_days } => write!(f, "Overdue by {} days", overdue_days),
            CareStatus::DueIn { days: 1 } => write!(f, "Tomorrow"),
            CareStatus::DueIn { days } => write!(f, "In {} days", days),
        }
    }
}

pub fn care_status(
    last_cared: Option<DateTime<Utc>>,
    frequency_days: u32,
    now: DateTime<Utc>,
) -> CareStatus {
    let Some(last) = last_cared else {
        return CareStatus::NeverCared;
    };
    let next_due = last + Duration::days(i64::from(frequency_days));
    let remaining_ms = (next_due - now).num_milliseconds();
    if remaining_ms <= 0 {
        // num_days truncates toward zero, i.e. floors the non-negative span.
        let overdue_days = (now - next_due).num_days().max(0) as u32;
        return CareStatus::DueNow { overdue_days };
    }
    CareStatus::DueIn {
        days: ceil_days(remaining_ms),
    }
}

// --- TASK GROUPING ---

/// Tasks partitioned into the four display groups. Every input task lands
/// in exactly one group; input order is preserved within each group.
#[derive(Debug, Clone, Default)]
pub struct TaskBuckets {
    pub today: Vec<CareTask>,
    pub tomorrow: Vec<CareTask>,
    pub this_week: Vec<CareTask>,
    pub later: Vec<CareTask>,
}

impl TaskBuckets {
    pub fn len(&self) -> usize {
        self.today.len() + self.tomorrow.len() + self.this_week.len() + self.later.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Group tasks by scheduled date relative to `now`.
///
/// All comparisons are on midnight-truncated dates. "This week" is the
/// half-open span after tomorrow and strictly before `now + 7 days`; a
/// task dated exactly seven days out is `later`. Past-dated tasks also
/// fall into `later`.
pub fn bucket_tasks_by_date(tasks: Vec<CareTask>, now: DateTime<Utc>) -> TaskBuckets {
    let today = now.date_naive();
    let tomorrow = today + Duration::days(1);
    let week_end = today + Duration::days(7);

    let mut buckets = TaskBuckets::default();
    for task in tasks {
        let date = task.date.date_naive();
        if date == today {
            buckets.today.push(task);
        } else if date == tomorrow {
            buckets.tomorrow.push(task);
        } else if date > tomorrow && date < week_end {
            buckets.this_week.push(task);
        } else {
            buckets.later.push(task);
        }
    }
    buckets
}

// --- ATTENTION RANKING ---

/// Plants ordered most-thirsty-first. Ties (e.g. several plants saturated
/// at urgency 1.0) fall back to name order so the listing is stable.
pub fn rank_by_urgency(mut plants: Vec<Plant>, now: DateTime<Utc>) -> Vec<Plant> {
    plants.sort_by(|a, b| {
        b.watering_urgency(now)
            .total_cmp(&a.watering_urgency(now))
            .then_with(|| a.name.cmp(&b.name))
    });
    plants
}
