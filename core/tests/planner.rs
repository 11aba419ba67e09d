//! End-to-end pipeline: scenarios, idempotence, per-day failure isolation.

use chrono::NaiveDate;
use staffplan_core::{
    analysis::UtilizationBand,
    staffing::count_for,
    types::Role,
    DayContext, LocalEvent, PlanConfig, PlanError, StaffingPlanner, Weather, WeekSummary,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

fn staff() -> Vec<String> {
    ["Alice", "Bob", "Carol", "Dave", "Mary", "Luis", "Priya", "Tom"]
        .iter()
        .map(|n| n.to_string())
        .collect()
}

fn planner() -> StaffingPlanner {
    StaffingPlanner::new(PlanConfig::default()).expect("default config is valid")
}

fn week() -> Vec<DayContext> {
    (19..=25)
        .map(|d| DayContext::new(date(d), Weather::new(64.0, 10.0, "Partly cloudy")))
        .collect()
}

/// A clear Monday gets the minimum crew and no prep.
#[test]
fn clear_monday_plan() {
    init_logging();
    let ctx = DayContext::new(date(19), Weather::new(62.0, 0.0, "Clear"));

    let plan = planner().plan_day(&ctx, &staff()).unwrap();

    assert_eq!(plan.forecast.daily_orders, 165);
    assert_eq!(plan.forecast.peak_orders, 45);
    assert_eq!(count_for(&plan.requirements, Role::Cook), 2);
    assert_eq!(count_for(&plan.requirements, Role::Cashier), 2);
    assert_eq!(count_for(&plan.requirements, Role::Prep), 0);
    assert_eq!(plan.assignments.len(), 4);
    assert_eq!(plan.cost_report.total_hours, 32);
    assert!(!plan.explanation.contains("Rain:"));
    assert!(!plan.explanation.contains("Event:"));
}

/// A game-day Saturday runs at full capacity with prep.
#[test]
fn game_day_saturday_plan() {
    init_logging();
    let ctx = DayContext::new(date(24), Weather::new(70.0, 0.0, "Sunny Saturday"))
        .with_event(LocalEvent::new("College game day", 1.25));

    let plan = planner().plan_day(&ctx, &staff()).unwrap();

    assert_eq!(plan.forecast.daily_orders, 341);
    assert_eq!(plan.forecast.peak_orders, 50);
    assert_eq!(count_for(&plan.requirements, Role::Cook), 2);
    assert_eq!(count_for(&plan.requirements, Role::Cashier), 2);
    assert_eq!(count_for(&plan.requirements, Role::Prep), 1);
    assert_eq!(plan.assignments.len(), 5);
    assert_eq!(plan.cost_report.total_hours, 40);
    assert_eq!(plan.utilization.utilization_pct, 100.0);
    assert_eq!(plan.utilization.band, UtilizationBand::Critical);
    assert!(plan.explanation.contains("Weather: Sunny Saturday"));
    assert!(plan.explanation.contains("Event: College game day"));
    assert!(plan.explanation.contains("1 prep cook"));
}

/// Planning the same day twice gives identical JSON.
#[test]
fn identical_inputs_give_byte_identical_plans() {
    let ctx = DayContext::new(date(23), Weather::new(71.0, 20.0, "Light rain"))
        .with_event(LocalEvent::new("Street fair", 1.15));

    let a = planner().plan_day(&ctx, &staff()).unwrap();
    let b = planner().plan_day(&ctx, &staff()).unwrap();

    assert_eq!(a, b);
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
}

/// A bad context produces a validation error and no plan.
#[test]
fn invalid_day_yields_no_plan() {
    let ctx = DayContext::new(date(19), Weather::new(62.0, 120.0, "Rain"));
    let err = planner().plan_day(&ctx, &staff()).unwrap_err();
    assert!(err.is_validation());
}

/// Week outcomes come back in input order.
#[test]
fn week_keeps_input_order() {
    init_logging();
    let contexts = week();

    let outcomes = planner().plan_week(&contexts, &staff());

    assert_eq!(outcomes.len(), 7);
    for (ctx, outcome) in contexts.iter().zip(&outcomes) {
        assert_eq!(outcome.as_ref().unwrap().forecast.date, ctx.date);
    }
}

/// Failed days are isolated from the rest of the week.
#[test]
fn one_bad_day_does_not_sink_the_week() {
    init_logging();
    let mut contexts = week();
    contexts[2].weather.rain_chance_pct = -10.0;
    contexts[5].event = Some(LocalEvent::new("Broken feed", 0.0));

    let outcomes = planner().plan_week(&contexts, &staff());

    assert_eq!(outcomes.len(), 7);
    for (i, outcome) in outcomes.iter().enumerate() {
        match i {
            2 | 5 => assert!(matches!(outcome, Err(PlanError::Validation { .. }))),
            _ => assert!(outcome.is_ok(), "day {i} should plan"),
        }
    }

    let summary = WeekSummary::from_outcomes(&outcomes);
    assert_eq!(summary.planned_days, 5);
    assert_eq!(summary.failed_days, 2);
}

/// The parallel week equals planning each day alone.
#[test]
fn week_matches_single_day_runs() {
    let contexts = week();
    let p = planner();

    let outcomes = p.plan_week(&contexts, &staff());

    for (ctx, outcome) in contexts.iter().zip(outcomes) {
        assert_eq!(outcome.unwrap(), p.plan_day(ctx, &staff()).unwrap());
    }
}

/// Week roll-up totals, busiest day and critical days.
#[test]
fn week_summary_totals() {
    let contexts = week();
    let outcomes = planner().plan_week(&contexts, &staff());

    let summary = WeekSummary::from_outcomes(&outcomes);

    // Partly cloudy is a neutral bucket: 4 × 165 + 190 + 2 × 210.
    assert_eq!(summary.total_orders, 1_270);
    assert!((summary.total_revenue - 1_270.0 * 18.5).abs() < 1e-6);
    // Prep only on the two weekend days: 5 × 32h + 2 × 40h.
    assert_eq!(summary.total_labor_hours, 240);
    assert!((summary.total_labor_cost - 240.0 * 16.5).abs() < 1e-6);
    assert_eq!(summary.busiest_day, Some((date(24), 210)));
    // Friday peaks at 48 of 50 (96%), the weekend at 50 of 50.
    assert_eq!(summary.critical_days, vec![date(23), date(24), date(25)]);
}

/// A day forecast to zero orders still gets the minimum crew.
#[test]
fn zero_order_day_still_plans_minimum_crew() {
    init_logging();
    let ctx = DayContext::new(date(19), Weather::new(20.0, 90.0, "Heavy snow"))
        .with_event(LocalEvent::new("Blizzard shutdown", 0.001));

    let plan = planner().plan_day(&ctx, &staff()).unwrap();

    assert_eq!(plan.forecast.daily_orders, 0);
    assert_eq!(count_for(&plan.requirements, Role::Cook), 2);
    assert_eq!(count_for(&plan.requirements, Role::Cashier), 2);
    assert_eq!(plan.cost_report.total_hours, 32);
    assert_eq!(plan.cost_report.labor_cost_pct, None);
    assert_eq!(plan.cost_report.band, None);
}

/// Week order totals do not overflow when single days approach `u32::MAX`.
#[test]
fn week_summary_sums_large_days_without_overflow() {
    let surge = LocalEvent::new("Festival surge", 1e7);
    let contexts: Vec<DayContext> = [19, 24, 25]
        .into_iter()
        .map(|d| {
            DayContext::new(date(d), Weather::new(62.0, 0.0, "Clear")).with_event(surge.clone())
        })
        .collect();

    let outcomes = planner().plan_week(&contexts, &staff());
    let summary = WeekSummary::from_outcomes(&outcomes);

    assert_eq!(summary.planned_days, 3);
    assert_eq!(summary.total_orders, 1_650_000_000 + 2 * 2_100_000_000);
    assert!(summary.total_orders > u64::from(u32::MAX));
}

/// An inconsistent config is refused when the planner is built.
#[test]
fn invalid_config_rejected_up_front() {
    let mut config = PlanConfig::default();
    config.bands.utilization_caution_from = 99.0;

    match StaffingPlanner::new(config) {
        Err(PlanError::Configuration(_)) => {}
        Err(other) => panic!("expected configuration error, got {other:?}"),
        Ok(_) => panic!("expected configuration error"),
    }
}
