//! Explanation builder: exact line order and conditional lines.

use chrono::NaiveDate;
use staffplan_core::{
    demand::DemandSynthesizer, explain::ExplanationBuilder, staffing::StaffingAllocator,
    DayContext, LocalEvent, PlanConfig, Weather,
};

fn explain(ctx: &DayContext) -> String {
    let config = PlanConfig::default();
    let forecast = DemandSynthesizer::new(&config).synthesize(ctx).unwrap();
    let reqs = StaffingAllocator::new(&config).allocate(&forecast).unwrap();
    ExplanationBuilder::new(&config).explain(ctx, &forecast, &reqs)
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
}

/// Optional lines are left out when there is nothing to say.
#[test]
fn clear_monday_has_no_rain_or_event_lines() {
    let ctx = DayContext::new(date(19), Weather::new(62.0, 0.0, "Clear"));

    assert_eq!(
        explain(&ctx),
        "Forecast: 165 orders on Monday 2026-10-19\n\
         Weather: Clear, 62°F (demand x1.00)\n\
         Peak: 12–2pm lunch, 45 orders/hr at 12:00\n\
         Staffing: 2 cooks (1 per 25 orders/hr)\n\
         Staffing: 2 cashiers (1 per 30 orders/hr)"
    );
}

/// Event and prep lines appear when they apply.
#[test]
fn game_day_saturday_includes_event_and_prep() {
    let ctx = DayContext::new(date(24), Weather::new(70.0, 0.0, "Sunny Saturday"))
        .with_event(LocalEvent::new("College game day", 1.25));

    assert_eq!(
        explain(&ctx),
        "Forecast: 341 orders on Saturday 2026-10-24\n\
         Weather: Sunny Saturday, 70°F (demand x1.30)\n\
         Event: College game day (+25% demand)\n\
         Peak: 1–8pm sustained, 50 orders/hr at 13:00\n\
         Staffing: 2 cooks (1 per 25 orders/hr)\n\
         Staffing: 2 cashiers (1 per 30 orders/hr)\n\
         Staffing: 1 prep cook (daily orders > 200)"
    );
}

/// Lines keep their fixed order.
#[test]
fn rain_line_follows_weather_line() {
    let ctx = DayContext::new(date(21), Weather::new(57.0, 85.0, "Heavy rain PM"));
    let text = explain(&ctx);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[1], "Weather: Heavy rain PM, 57°F (demand x1.10)");
    assert_eq!(lines[2], "Rain: 85% chance");
    assert!(lines[3].starts_with("Peak: "));
    assert!(!text.contains("Event:"));
    assert!(!text.contains("prep cook"));
}

/// A dampening event shows a negative uplift.
#[test]
fn negative_event_uplift_is_signed() {
    let ctx = DayContext::new(date(20), Weather::new(55.0, 30.0, "Overcast"))
        .with_event(LocalEvent::new("Road construction", 0.9));
    let text = explain(&ctx);
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[2], "Rain: 30% chance");
    assert_eq!(lines[3], "Event: Road construction (-10% demand)");
}

/// The same inputs always give the same text.
#[test]
fn explanation_is_deterministic() {
    let ctx = DayContext::new(date(23), Weather::new(75.0, 5.0, "Sunny"))
        .with_event(LocalEvent::new("Street fair", 1.15));
    assert_eq!(explain(&ctx), explain(&ctx));
}
