// File: tests/task_buckets.rs
use chrono::{DateTime, TimeZone, Utc};
use sprout::model::{CareKind, CareTask};
use sprout::schedule::bucket_tasks_by_date;
use std::collections::HashSet;

fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

fn task(id: u32, date: DateTime<Utc>) -> CareTask {
    CareTask {
        id,
        plant_id: 1,
        title: format!("task {}", id),
        kind: CareKind::Watering,
        date,
        completed: false,
    }
}

fn ids(tasks: &[CareTask]) -> Vec<u32> {
    tasks.iter().map(|t| t.id).collect()
}

#[test]
fn test_partition_is_exact() {
    let now = utc(2024, 3, 15, 14, 30);
    let tasks = vec![
        task(1, utc(2024, 3, 14, 9, 0)),  // yesterday -> later
        task(2, utc(2024, 3, 15, 23, 0)), // today, later time of day
        task(3, utc(2024, 3, 16, 0, 0)),  // tomorrow
        task(4, utc(2024, 3, 18, 8, 0)),  // this week
        task(5, utc(2024, 3, 21, 0, 0)),  // last day inside the week window
        task(6, utc(2024, 3, 22, 0, 0)),  // exactly 7 days out -> later
        task(7, utc(2024, 3, 25, 0, 0)),  // later
    ];

    let buckets = bucket_tasks_by_date(tasks, now);

    assert_eq!(ids(&buckets.today), vec![2]);
    assert_eq!(ids(&buckets.tomorrow), vec![3]);
    assert_eq!(ids(&buckets.this_week), vec![4, 5]);
    assert_eq!(ids(&buckets.later), vec![1, 6, 7]);

    // No task lost or duplicated.
    assert_eq!(buckets.len(), 7);
    let mut seen = HashSet::new();
    for group in [
        &buckets.today,
        &buckets.tomorrow,
        &buckets.this_week,
        &buckets.later,
    ] {
        for t in group {
            assert!(seen.insert(t.id), "task {} appeared twice", t.id);
        }
    }
}

#[test]
fn test_input_order_preserved_within_group() {
    let now = utc(2024, 3, 15, 10, 0);
    // Three tasks on the same day, deliberately not in title order.
    let tasks = vec![
        task(30, utc(2024, 3, 18, 12, 0)),
        task(10, utc(2024, 3, 18, 6, 0)),
        task(20, utc(2024, 3, 18, 18, 0)),
    ];

    let buckets = bucket_tasks_by_date(tasks, now);
    assert_eq!(ids(&buckets.this_week), vec![30, 10, 20]);
}

#[test]
fn test_today_at_any_time_of_day() {
    // "now" just before midnight, task stamped at midnight: still today.
    let now = utc(2024, 3, 15, 23, 59);
    let buckets = bucket_tasks_by_date(vec![task(1, utc(2024, 3, 15, 0, 0))], now);
    assert_eq!(ids(&buckets.today), vec![1]);

    // And the other way around.
    let now = utc(2024, 3, 15, 0, 0);
    let buckets = bucket_tasks_by_date(vec![task(1, utc(2024, 3, 15, 23, 59))], now);
    assert_eq!(ids(&buckets.today), vec![1]);
}

#[test]
fn test_seven_day_boundary_is_exclusive() {
    let now = utc(2024, 3, 15, 0, 0);

    let buckets = bucket_tasks_by_date(vec![task(1, utc(2024, 3, 22, 0, 0))], now);
    assert!(buckets.this_week.is_empty());
    assert_eq!(ids(&buckets.later), vec![1]);

    let buckets = bucket_tasks_by_date(vec![task(1, utc(2024, 3, 21, 23, 0))], now);
    assert_eq!(ids(&buckets.this_week), vec![1]);
}

#[test]
fn test_empty_input() {
    let buckets = bucket_tasks_by_date(vec![], utc(2024, 3, 15, 0, 0));
    assert!(buckets.is_empty());
    assert_eq!(buckets.len(), 0);
}
