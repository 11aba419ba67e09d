//! plan-runner: headless weekly staffing planner.
//!
//! Usage:
//!   plan-runner --seed 12345 --start 2026-10-19 --staff 10
//!   plan-runner --week data/weeks/sample_week.json --data-dir ./data --json

use anyhow::{Context, Result};
use chrono::{Datelike, Days, Local, NaiveDate};
use staffplan_core::{
    synthetic::{synthetic_staff_pool, SyntheticWeek},
    DayContext, DayPlan, PlanConfig, PlanResult, StaffingPlanner, WeekSummary,
};
use std::env;

#[derive(serde::Serialize)]
struct DayOutcome<'a> {
    date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    plan: Option<&'a DayPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

#[derive(serde::Serialize)]
struct WeekReport<'a> {
    days: Vec<DayOutcome<'a>>,
    summary: WeekSummary,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let staff = parse_arg(&args, "--staff", 10usize);
    let json = args.iter().any(|a| a == "--json");
    let data_dir = str_arg(&args, "--data-dir");
    let week_file = str_arg(&args, "--week");
    let start = match str_arg(&args, "--start") {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("--start expects YYYY-MM-DD, got {s}"))?,
        None => next_monday(Local::now().date_naive()),
    };

    let config = match data_dir {
        Some(dir) => PlanConfig::load(dir)?,
        None => PlanConfig::default(),
    };
    let planner = StaffingPlanner::new(config)?;

    let contexts: Vec<DayContext> = match week_file {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Cannot read {path}"))?;
            serde_json::from_str(&content).with_context(|| format!("Cannot parse {path}"))?
        }
        None => SyntheticWeek::generate(start, seed),
    };
    let pool = synthetic_staff_pool(seed, staff);
    log::debug!("Planning {} days with a staff pool of {}", contexts.len(), pool.len());

    if !json {
        println!("Staffing plan-runner");
        println!("  seed:      {seed}");
        println!("  days:      {}", contexts.len());
        println!("  staff:     {}", pool.len());
        println!("  source:    {}", week_file.unwrap_or("synthetic"));
        println!();
    }

    let outcomes = planner.plan_week(&contexts, &pool);
    let summary = WeekSummary::from_outcomes(&outcomes);

    if json {
        let report = WeekReport {
            days: contexts
                .iter()
                .zip(&outcomes)
                .map(|(ctx, outcome)| day_outcome(ctx, outcome))
                .collect(),
            summary,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for (ctx, outcome) in contexts.iter().zip(&outcomes) {
            print_day(ctx, outcome);
        }
        print_summary(&summary);
    }

    Ok(())
}

fn day_outcome<'a>(ctx: &DayContext, outcome: &'a PlanResult<DayPlan>) -> DayOutcome<'a> {
    match outcome {
        Ok(plan) => DayOutcome { date: ctx.date, plan: Some(plan), error: None },
        Err(e) => DayOutcome { date: ctx.date, plan: None, error: Some(e.to_string()) },
    }
}

fn print_day(ctx: &DayContext, outcome: &PlanResult<DayPlan>) {
    println!("=== {} ({}) ===", ctx.date, ctx.day_of_week());
    match outcome {
        Err(e) => println!("  NO PLAN: {e}"),
        Ok(plan) => {
            for line in plan.explanation.lines() {
                println!("  {line}");
            }
            println!("  Shifts:");
            for a in &plan.assignments {
                println!(
                    "    {:<10} {:<8} {:02}:00 - {:02}:00 ({}h)",
                    a.worker.as_deref().unwrap_or("(open)"),
                    format!("{:?}", a.role),
                    a.start_hour,
                    a.end_hour,
                    a.hours()
                );
            }
            let c = &plan.cost_report;
            let u = &plan.utilization;
            match (c.labor_cost_pct, c.band) {
                (Some(pct), Some(band)) => println!(
                    "  Labour: {}h | ${:.2} | {:.1}% of ${:.0} revenue ({})",
                    c.total_hours,
                    c.labor_cost,
                    pct,
                    c.revenue,
                    band.advisory()
                ),
                _ => println!(
                    "  Labour: {}h | ${:.2} | no forecast revenue",
                    c.total_hours, c.labor_cost
                ),
            }
            println!(
                "  Peak capacity: {:.0}% of {} orders/hr ({})",
                u.utilization_pct,
                u.max_hourly_capacity,
                u.band.advisory()
            );
        }
    }
    println!();
}

fn print_summary(summary: &WeekSummary) {
    println!("=== WEEK SUMMARY ===");
    println!("  planned days:   {}", summary.planned_days);
    println!("  failed days:    {}", summary.failed_days);
    println!("  total orders:   {}", summary.total_orders);
    println!("  revenue:        ${:.2}", summary.total_revenue);
    println!("  labour hours:   {}", summary.total_labor_hours);
    println!("  labour cost:    ${:.2} ({:.1}%)", summary.total_labor_cost, summary.labor_cost_pct);
    if let Some((date, orders)) = summary.busiest_day {
        println!("  busiest day:    {date} ({orders} orders)");
    }
    if !summary.critical_days.is_empty() {
        let days: Vec<String> = summary.critical_days.iter().map(|d| d.to_string()).collect();
        println!("  critical peaks: {}", days.join(", "));
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].as_str())
}

fn next_monday(today: NaiveDate) -> NaiveDate {
    let ahead = (7 - today.weekday().num_days_from_monday()) % 7;
    today.checked_add_days(Days::new(ahead as u64)).unwrap_or(today)
}
