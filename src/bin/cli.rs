use anyhow::{Result, bail};
use chrono::{DateTime, Datelike, Local, Month, NaiveDate, Utc};
use log::LevelFilter;
use simplelog::WriteLogger;
use sprout::calendar;
use sprout::cli;
use sprout::config::Config;
use sprout::context::{AppContext, StandardContext};
use sprout::model::{CareKind, CareTask, NewCareTask, NewPlant};
use sprout::schedule::{TaskBuckets, bucket_tasks_by_date};
use sprout::storage::LocalStorage;
use sprout::store::PlantStore;
use std::collections::HashSet;
use std::env;
use std::path::PathBuf;
use strum::IntoEnumIterator;

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().skip(1).collect();

    let wants_help = args.first().is_some_and(|a| a == "help")
        || args.iter().any(|a| a == "--help" || a == "-h");
    if wants_help {
        cli::print_help("sprout");
        return Ok(());
    }

    let root = take_flag_value(&mut args, "--root", Some("-r"))?.map(PathBuf::from);
    let ctx = StandardContext::new(root);
    init_logging(&ctx);

    let cfg = Config::load_or_default(&ctx)?;

    // The only wall-clock reads in the whole program; everything below
    // receives time as a parameter.
    let now = Utc::now();
    let today = Local::now().date_naive();

    let command = if args.is_empty() {
        "status".to_string()
    } else {
        args.remove(0)
    };

    match command.as_str() {
        "status" => cmd_status(&ctx, &cfg, now),
        "plants" => cmd_plants(&ctx, now),
        "add" => cmd_add(&ctx, &cfg, args),
        "water" => cmd_water(&ctx, args, now),
        "task" => cmd_task(&ctx, args, today),
        "tasks" => cmd_tasks(&ctx, &cfg, args, now),
        "done" => cmd_done(&ctx, args, now),
        "calendar" => cmd_calendar(&ctx, args, today),
        other => {
            eprintln!("Unknown command '{}'. See 'sprout --help'.", other);
            std::process::exit(2);
        }
    }
}

fn init_logging(ctx: &dyn AppContext) {
    if let Ok(path) = ctx.get_log_path()
        && let Ok(file) = std::fs::File::create(&path)
    {
        let _ = WriteLogger::init(LevelFilter::Info, simplelog::Config::default(), file);
    }
}

/// Remove `--flag value` (or its short form) from `args`, returning the
/// value when present.
fn take_flag_value(
    args: &mut Vec<String>,
    long: &str,
    short: Option<&str>,
) -> Result<Option<String>> {
    let Some(pos) = args
        .iter()
        .position(|a| a == long || short.is_some_and(|s| a == s))
    else {
        return Ok(None);
    };
    if pos + 1 >= args.len() {
        bail!("Missing value for {}", long);
    }
    let value = args.remove(pos + 1);
    args.remove(pos);
    Ok(Some(value))
}

fn parse_id(args: &[String], what: &str) -> Result<u32> {
    let Some(raw) = args.first() else {
        bail!("Missing {} id", what);
    };
    raw.parse::<u32>()
        .map_err(|_| anyhow::anyhow!("Invalid {} id '{}'", what, raw))
}

fn format_date(dt: DateTime<Utc>) -> String {
    dt.format("%b %-d, %Y").to_string()
}

fn urgency_bar(urgency: f64) -> String {
    let filled = ((urgency * 10.0).round() as usize).min(10);
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled),
        "-".repeat(10 - filled),
        urgency * 100.0
    )
}

// --- COMMANDS ---

fn cmd_status(ctx: &dyn AppContext, cfg: &Config, now: DateTime<Utc>) -> Result<()> {
    let store = LocalStorage::load(ctx)?;
    let summary = store.care_summary(now);

    println!(
        "Plants: {} total, {} need water",
        summary.total_plants, summary.needs_watering
    );
    let counts: Vec<String> = CareKind::iter()
        .map(|k| format!("{} {}", k, summary.open_count(k)))
        .collect();
    println!("Open tasks: {}", counts.join(" | "));

    let attention = store.attention_list(cfg.attention_limit);
    if !attention.is_empty() {
        println!();
        println!("NEEDS ATTENTION");
        for (plant, task) in attention {
            println!(
                "  [{}] {} ({}): {} ({})",
                task.id,
                plant.name,
                plant.location,
                task.kind.action_label(),
                format_date(task.date)
            );
        }
    }

    let recent = store.recent_activities(cfg.recent_activity_limit);
    if !recent.is_empty() {
        println!();
        println!("RECENT ACTIVITY");
        for activity in recent {
            println!(
                "  {}  {}",
                format_date(activity.timestamp),
                activity.description
            );
        }
    }
    Ok(())
}

fn cmd_plants(ctx: &dyn AppContext, now: DateTime<Utc>) -> Result<()> {
    let store = LocalStorage::load(ctx)?;
    let plants = store.plants_by_urgency(now);
    if plants.is_empty() {
        println!("No plants yet. Add one with 'sprout add <name>'.");
        return Ok(());
    }
    for plant in plants {
        println!(
            "  {:>3}  {:<20} {:<16} {}  {}",
            plant.id,
            plant.name,
            plant.location,
            urgency_bar(plant.watering_urgency(now)),
            plant.watering_status(now)
        );
    }
    Ok(())
}

fn cmd_add(ctx: &dyn AppContext, cfg: &Config, mut args: Vec<String>) -> Result<()> {
    let frequency = match take_flag_value(&mut args, "--frequency", None)? {
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| anyhow::anyhow!("Invalid watering frequency '{}'", raw))?,
        None => cfg.default_watering_frequency_days,
    };
    let location =
        take_flag_value(&mut args, "--location", None)?.unwrap_or_else(|| "Home".to_string());
    let species = take_flag_value(&mut args, "--species", None)?;
    let light_needs =
        take_flag_value(&mut args, "--light", None)?.unwrap_or_else(|| "Indirect".to_string());
    let notes = take_flag_value(&mut args, "--notes", None)?;

    let name = args.join(" ");
    if name.trim().is_empty() {
        bail!("Missing plant name");
    }

    let mut store = LocalStorage::load(ctx)?;
    let id = store.add_plant(NewPlant {
        name: name.clone(),
        species,
        location,
        watering_frequency_days: frequency,
        light_needs,
        notes,
    })?;
    LocalStorage::save(ctx, &store)?;
    println!("Added plant [{}] {} (water every {} days)", id, name, frequency);
    Ok(())
}

fn cmd_water(ctx: &dyn AppContext, args: Vec<String>, now: DateTime<Utc>) -> Result<()> {
    let id = parse_id(&args, "plant")?;
    let mut store = LocalStorage::load(ctx)?;
    store.mark_watered(id, now)?;
    LocalStorage::save(ctx, &store)?;
    let name = store.get_plant(id).map(|p| p.name.clone()).unwrap_or_default();
    println!("Watered {} [{}]", name, id);
    Ok(())
}

fn cmd_task(ctx: &dyn AppContext, mut args: Vec<String>, today: NaiveDate) -> Result<()> {
    let kind = match take_flag_value(&mut args, "--kind", None)? {
        Some(raw) => raw.parse::<CareKind>()?,
        None => CareKind::Watering,
    };
    let date = match take_flag_value(&mut args, "--date", None)? {
        Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("Invalid date '{}', expected YYYY-MM-DD", raw))?,
        None => today,
    };

    if args.is_empty() {
        bail!("Usage: sprout task <plant-id> <title> [--kind <kind>] [--date <YYYY-MM-DD>]");
    }
    let plant_id = parse_id(&args, "plant")?;
    let title = args[1..].join(" ");
    if title.trim().is_empty() {
        bail!("Missing task title");
    }

    let mut store = LocalStorage::load(ctx)?;
    let id = store.add_task(NewCareTask {
        plant_id,
        title: title.clone(),
        kind,
        date: date.and_hms_opt(0, 0, 0).unwrap().and_utc(),
    })?;
    LocalStorage::save(ctx, &store)?;
    println!("Scheduled task [{}] {} ({}) for {}", id, title, kind, date);
    Ok(())
}

fn cmd_tasks(
    ctx: &dyn AppContext,
    cfg: &Config,
    mut args: Vec<String>,
    now: DateTime<Utc>,
) -> Result<()> {
    let kind = take_flag_value(&mut args, "--kind", None)?
        .map(|raw| raw.parse::<CareKind>())
        .transpose()?;

    let store = LocalStorage::load(ctx)?;
    let buckets = bucket_tasks_by_date(store.open_tasks(kind), now);
    if buckets.is_empty() {
        println!("No open care tasks. Your plants are happy.");
    } else {
        print_buckets(&store, &buckets);
    }

    if cfg.show_completed_tasks {
        let mut done: Vec<_> = store
            .tasks()
            .into_iter()
            .filter(|t| t.completed && kind.is_none_or(|k| t.kind == k))
            .cloned()
            .collect();
        done.sort();
        if !done.is_empty() {
            println!();
            println!("COMPLETED");
            for task in &done {
                print_task_line(&store, task);
            }
        }
    }
    Ok(())
}

fn print_buckets(store: &PlantStore, buckets: &TaskBuckets) {
    let sections = [
        ("TODAY", &buckets.today),
        ("TOMORROW", &buckets.tomorrow),
        ("THIS WEEK", &buckets.this_week),
        ("LATER", &buckets.later),
    ];
    let mut first = true;
    for (heading, tasks) in sections {
        if tasks.is_empty() {
            continue;
        }
        if !first {
            println!();
        }
        first = false;
        println!("{}", heading);
        for task in tasks {
            print_task_line(store, task);
        }
    }
}

fn print_task_line(store: &PlantStore, task: &CareTask) {
    let plant_name = store
        .get_plant(task.plant_id)
        .map(|p| p.name.as_str())
        .unwrap_or("?");
    println!(
        "  [{}] {} ({}, {}) on {}",
        task.id,
        task.title,
        plant_name,
        task.kind,
        format_date(task.date)
    );
}

fn cmd_done(ctx: &dyn AppContext, args: Vec<String>, now: DateTime<Utc>) -> Result<()> {
    let id = parse_id(&args, "task")?;
    let mut store = LocalStorage::load(ctx)?;
    store.complete_task(id, now)?;
    LocalStorage::save(ctx, &store)?;
    println!("Completed task [{}]", id);
    Ok(())
}

fn cmd_calendar(ctx: &dyn AppContext, mut args: Vec<String>, today: NaiveDate) -> Result<()> {
    let year = match take_flag_value(&mut args, "--year", None)? {
        Some(raw) => raw
            .parse::<i32>()
            .map_err(|_| anyhow::anyhow!("Invalid year '{}'", raw))?,
        None => today.year(),
    };
    let month = match take_flag_value(&mut args, "--month", None)? {
        Some(raw) => {
            let number = raw
                .parse::<u8>()
                .map_err(|_| anyhow::anyhow!("Invalid month '{}'", raw))?;
            Month::try_from(number)
                .map_err(|_| anyhow::anyhow!("Month must be between 1 and 12, got {}", number))?
        }
        // Month numbers from chrono are always in 1..=12.
        None => Month::try_from(today.month() as u8).unwrap(),
    };

    let store = LocalStorage::load(ctx)?;
    let task_days: HashSet<NaiveDate> = store
        .open_tasks(None)
        .iter()
        .map(|t| t.date.date_naive())
        .collect();

    let grid = calendar::month_grid(year, month, today);

    println!("{:^28}", calendar::month_title(year, month));
    println!(" Su  Mo  Tu  We  Th  Fr  Sa");
    for week in grid.chunks(7) {
        let mut line = String::new();
        for day in week {
            let cell = if !day.is_current_month {
                "    ".to_string()
            } else if day.is_today {
                format!("[{:>2}]", day.date.day())
            } else if task_days.contains(&day.date) {
                format!(" {:>2}*", day.date.day())
            } else {
                format!(" {:>2} ", day.date.day())
            };
            line.push_str(&cell);
        }
        println!("{}", line.trim_end());
    }
    if grid
        .iter()
        .any(|d| d.is_current_month && task_days.contains(&d.date))
    {
        println!();
        println!(" * scheduled care task");
    }
    Ok(())
}
