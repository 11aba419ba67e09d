//! Demand synthesizer: day-of-week baseline × weather × event.
//!
//! The hourly curve is a shape proxy scaled to a day-type peak. It is not
//! reconciled with `daily_orders`: the two can disagree, and the allocator
//! staffs from the curve's peak while the cost report prices the daily total.

use crate::{
    config::{PlanConfig, WeatherFactors},
    context::{DayContext, Weather},
    error::{PlanError, PlanResult},
    types::Hour,
};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherBucket {
    Clear,
    Sunny,
    Perfect,
    LightRain,
    HeavyRain,
}

impl WeatherBucket {
    /// Classify from the free-text description, with temperature and rain
    /// chance separating a merely sunny day from a perfect one.
    pub fn classify(weather: &Weather, factors: &WeatherFactors) -> Self {
        let text = weather.description.to_lowercase();
        let has = |words: &[&str]| words.iter().any(|w| text.contains(w));

        if has(&["heavy rain", "storm", "thunder", "downpour"]) {
            WeatherBucket::HeavyRain
        } else if has(&["rain", "drizzle", "shower"]) {
            WeatherBucket::LightRain
        } else if has(&["perfect"]) {
            WeatherBucket::Perfect
        } else if has(&["sunny"]) {
            let ideal_temp = (factors.perfect_temp_min_f..=factors.perfect_temp_max_f)
                .contains(&weather.temperature_f);
            if ideal_temp && weather.rain_chance_pct == 0.0 {
                WeatherBucket::Perfect
            } else {
                WeatherBucket::Sunny
            }
        } else {
            WeatherBucket::Clear
        }
    }

    pub fn factor(&self, factors: &WeatherFactors) -> f64 {
        match self {
            WeatherBucket::Clear     => factors.clear,
            WeatherBucket::Sunny     => factors.sunny,
            WeatherBucket::Perfect   => factors.perfect,
            WeatherBucket::LightRain => factors.light_rain,
            WeatherBucket::HeavyRain => factors.heavy_rain,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyDemand {
    pub hour: Hour,
    pub orders: u32,
}

/// Derived demand for one day. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandForecast {
    pub date: NaiveDate,
    pub day_of_week: Weekday,
    pub baseline_orders: u32,
    pub weather_bucket: WeatherBucket,
    pub weather_factor: f64,
    pub event_factor: f64,
    pub daily_orders: u32,
    pub hourly: Vec<HourlyDemand>,
    pub peak_hour: Hour,
    pub peak_orders: u32,
    pub peak_window: String,
}

impl DemandForecast {
    pub fn hourly_total(&self) -> u32 {
        self.hourly.iter().map(|h| h.orders).sum()
    }
}

pub struct DemandSynthesizer<'a> {
    config: &'a PlanConfig,
}

impl<'a> DemandSynthesizer<'a> {
    pub fn new(config: &'a PlanConfig) -> Self {
        Self { config }
    }

    pub fn synthesize(&self, ctx: &DayContext) -> PlanResult<DemandForecast> {
        ctx.validate()?;

        let day = ctx.day_of_week();
        let baseline = self.config.baselines.get(day);

        let bucket = WeatherBucket::classify(&ctx.weather, &self.config.weather);
        let weather_factor = ctx
            .weather
            .demand_factor
            .unwrap_or_else(|| bucket.factor(&self.config.weather));
        let event_factor = ctx.event.as_ref().map_or(1.0, |e| e.demand_multiplier);

        let raw_orders = (baseline as f64 * weather_factor * event_factor).round();
        if !raw_orders.is_finite() || raw_orders > u32::MAX as f64 {
            return Err(PlanError::Computation(format!(
                "{}: daily orders {raw_orders} out of range (baseline {baseline} \
                 x weather {weather_factor} x event {event_factor})",
                ctx.date
            )));
        }
        let daily_orders = raw_orders as u32;

        let curve = self.config.curve_for(day)?;
        let peak_target = self.config.peak_targets.get(day) as f64;
        let max_point = curve.max_point();
        if max_point <= 0.0 {
            return Err(PlanError::Configuration(format!(
                "Demand curve for {day} has no positive point"
            )));
        }
        let scale = peak_target / max_point;
        let hourly = curve
            .shape
            .iter()
            .enumerate()
            .map(|(i, point)| {
                Hour::try_from(i)
                    .ok()
                    .and_then(|i| self.config.open_hour.checked_add(i))
                    .map(|hour| HourlyDemand {
                        hour,
                        orders: (point * scale).round() as u32,
                    })
                    .ok_or_else(|| {
                        PlanError::Configuration(format!(
                            "Demand curve for {day} runs past the last hour from open_hour {}",
                            self.config.open_hour
                        ))
                    })
            })
            .collect::<PlanResult<Vec<_>>>()?;

        // Earliest hour wins a tie.
        let peak = hourly
            .iter()
            .copied()
            .reduce(|best, h| if h.orders > best.orders { h } else { best })
            .ok_or_else(|| PlanError::Configuration(format!("Demand curve for {day} is empty")))?;

        log::debug!(
            "{} {day}: baseline={baseline} weather={bucket:?}x{weather_factor:.2} \
             event=x{event_factor:.2} daily={daily_orders} peak={}@{}:00",
            ctx.date,
            peak.orders,
            peak.hour
        );

        Ok(DemandForecast {
            date: ctx.date,
            day_of_week: day,
            baseline_orders: baseline,
            weather_bucket: bucket,
            weather_factor,
            event_factor,
            daily_orders,
            hourly,
            peak_hour: peak.hour,
            peak_orders: peak.orders,
            peak_window: curve.peak_window.clone(),
        })
    }
}
