// File: ./src/cli.rs
//! Shared command-line interface logic, like printing help.

pub fn print_help(binary_name: &str) {
    println!(
        "Sprout v{} - Plant care tracker: watering schedules, tasks and calendar",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>] [command]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("COMMANDS:");
    println!("    status                 Care overview: counts, attention list, recent activity (default)");
    println!("    plants                 List all plants, most thirsty first");
    println!("    add <name>             Add a plant");
    println!("    water <plant-id>       Record a watering for a plant");
    println!("    task <plant-id> <title>  Schedule a care task for a plant");
    println!("    tasks                  List open tasks grouped by date");
    println!("    done <task-id>         Complete a task");
    println!("    calendar               Show the month calendar with scheduled care days");
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>      Use a different directory for config and data.");
    println!("    -h, --help             Show this help message.");
    println!();
    println!("ADD OPTIONS:");
    println!("    --frequency <days>     Watering interval in days (default from config)");
    println!("    --location <place>     Where the plant lives (default \"Home\")");
    println!("    --species <name>       Botanical name");
    println!("    --light <needs>        Light needs, e.g. \"Bright indirect\"");
    println!("    --notes <text>         Free-form notes");
    println!();
    println!("TASK OPTIONS:");
    println!("    --kind <kind>          watering | fertilizing | pruning | light (default watering)");
    println!("    --date <YYYY-MM-DD>    Scheduled date (default today)");
    println!();
    println!("TASKS OPTIONS:");
    println!("    --kind <kind>          Only show tasks of one care kind");
    println!();
    println!("CALENDAR OPTIONS:");
    println!("    --month <1-12>         Month to display (default: current)");
    println!("    --year <year>          Year to display (default: current)");
    println!();
    println!("EXAMPLES:");
    println!("    {} add Monstera --frequency 7 --location \"Living room\"", binary_name);
    println!("    {} water 1", binary_name);
    println!("    {} task 1 \"Feed the monstera\" --kind fertilizing --date 2026-03-01", binary_name);
    println!("    {} tasks --kind watering", binary_name);
    println!("    {} calendar --month 2 --year 2026", binary_name);
    println!();
    println!("MORE INFO:");
    println!("    Repository: https://codeberg.org/ferndesk/sprout");
    println!("    License:    GPL-3.0");
}
