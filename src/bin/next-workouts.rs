use std::path::Path;

use chrono::Utc;

use periolifts_schedule::cache::Cache;
use periolifts_schedule::{DateKey, Planner, ScheduleSettings};

const DEFAULT_CACHE_FILE: &str = "periolifts-cache.json";


#[tokio::main]
async fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let cache_path = Path::new(args.get(1).map(|s| s.as_str()).unwrap_or(DEFAULT_CACHE_FILE));

    let today = match args.get(2) {
        Some(arg) => match arg.parse::<DateKey>() {
            Ok(d) => d,
            Err(err) => {
                eprintln!("{}", err);
                std::process::exit(2);
            }
        },
        None => match DateKey::from_datetime(&Utc::now()) {
            Ok(d) => d,
            Err(err) => {
                eprintln!("{}", err);
                std::process::exit(2);
            }
        },
    };

    let cache = match Cache::from_file(cache_path) {
        Ok(cache) => cache,
        Err(err) => {
            log::warn!("Invalid cache file: {}. Using a default cache", err);
            Cache::new(cache_path)
        }
    };
    let planner = Planner::new(cache, ScheduleSettings::default());

    match planner.active_plan().await {
        Ok(Some(plan)) => {
            println!("---- Plan {} -----", plan.name());
            periolifts_schedule::utils::print_schedule(&plan.schedule_store(&planner.settings().compiler()));
        },
        Ok(None) => println!("---- No active plan -----"),
        Err(err) => log::error!("Unable to read plans: {}", err),
    }

    println!("---- Next workouts ({}) -----", today);
    let next = planner.next_workouts(today).await;
    periolifts_schedule::utils::print_next_workouts(&next);

    let monday = today.week_start().unwrap_or(today);
    let sunday = monday.checked_add_days(6).unwrap_or(today);
    println!("---- Week of {} -----", monday);
    match planner.calendar_events(monday, sunday).await {
        Ok(events) => periolifts_schedule::utils::print_calendar_events(&events),
        Err(err) => log::error!("Unable to build the calendar: {}", err),
    }
}
