//! Synthetic forecast inputs for demos and tests when no real forecast
//! is available.
//!
//! This path is separate from the planning pipeline: it only produces
//! `DayContext`s and worker names, which are then planned like real ones.
//! All randomness comes from a caller-supplied seed (same seed = same week).

use crate::{
    context::{DayContext, LocalEvent, Weather},
    rng::{PlanRng, RngBank, StreamSlot},
    types::{DayType, WorkerName},
};
use chrono::{Datelike, Days, NaiveDate};

/// (description, temperature range °F, rain chance range %)
const WEATHER_MENU: &[(&str, (f64, f64), (f64, f64))] = &[
    ("Clear",         (55.0, 75.0), (0.0, 0.0)),
    ("Sunny",         (65.0, 85.0), (0.0, 0.0)),
    ("Partly cloudy", (55.0, 72.0), (0.0, 20.0)),
    ("Light rain",    (50.0, 65.0), (40.0, 70.0)),
    ("Heavy rain PM", (50.0, 65.0), (70.0, 100.0)),
];

const EVENT_MENU: &[(&str, f64)] = &[
    ("College game day",  1.25),
    ("Street fair",       1.15),
    ("Concert nearby",    1.20),
    ("Road construction", 0.90),
];

const WEEKDAY_EVENT_CHANCE: f64 = 0.10;
const WEEKEND_EVENT_CHANCE: f64 = 0.30;

pub struct SyntheticWeek;

impl SyntheticWeek {
    /// Seven consecutive days starting at `start`.
    pub fn generate(start: NaiveDate, seed: u64) -> Vec<DayContext> {
        let bank = RngBank::new(seed);
        let mut weather_rng = bank.stream(StreamSlot::Weather);
        let mut event_rng = bank.stream(StreamSlot::Events);
        log::debug!(
            "synthetic week from {start}: seed={seed} streams={}/{}",
            weather_rng.name,
            event_rng.name
        );

        (0..7u64)
            .filter_map(|offset| start.checked_add_days(Days::new(offset)))
            .map(|date| {
                let weather = Self::weather(&mut weather_rng);
                let ctx = DayContext::new(date, weather);
                match Self::event(&mut event_rng, DayType::from(date.weekday())) {
                    Some(event) => ctx.with_event(event),
                    None => ctx,
                }
            })
            .collect()
    }

    fn weather(rng: &mut PlanRng) -> Weather {
        let (description, (t_lo, t_hi), (r_lo, r_hi)) = *rng.pick(WEATHER_MENU);
        let temperature = rng.range_f64(t_lo, t_hi).round();
        let rain = if r_hi > r_lo { rng.range_f64(r_lo, r_hi).round() } else { r_lo };
        Weather::new(temperature, rain, description)
    }

    fn event(rng: &mut PlanRng, day_type: DayType) -> Option<LocalEvent> {
        let p = match day_type {
            DayType::Weekend => WEEKEND_EVENT_CHANCE,
            _ => WEEKDAY_EVENT_CHANCE,
        };
        // Always draw both values so the stream advances identically per day.
        let happens = rng.chance(p);
        let (description, multiplier) = *rng.pick(EVENT_MENU);
        happens.then(|| LocalEvent::new(description, multiplier))
    }
}

/// `n` distinct worker names drawn deterministically from a curated list.
pub fn synthetic_staff_pool(seed: u64, n: usize) -> Vec<WorkerName> {
    let mut rng = RngBank::new(seed).stream(StreamSlot::Staff);
    log::debug!("staff pool of {n}: seed={seed} stream={}", rng.name);
    let mut names: Vec<&str> = FIRST_NAMES.to_vec();

    // Partial Fisher–Yates: the first n slots become the draw.
    let take = n.min(names.len());
    for i in 0..take {
        let j = i + rng.next_u64_below((names.len() - i) as u64) as usize;
        names.swap(i, j);
    }

    (0..n)
        .map(|i| {
            let name = names[i % names.len()];
            match i / names.len() {
                0 => name.to_string(),
                round => format!("{name} {}", round + 1),
            }
        })
        .collect()
}

const FIRST_NAMES: &[&str] = &[
    "Alice", "Bob", "Carol", "Dave", "Mary", "Luis", "Priya", "Tom",
    "Aisha", "Marco", "Grace", "Ken", "Sofia", "Jamal", "Nina", "Omar",
    "Rosa", "Ethan", "Mei", "Diego", "Hannah", "Ivan", "Leila", "Sam",
    "Chloe", "Ravi", "Tess", "Victor", "Yuki", "Zoe", "Ben", "Elena",
];
