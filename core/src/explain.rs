//! Explanation builder: a deterministic, auditable justification per day.
//!
//! Line order is fixed. The rain line appears only when rain chance is
//! above zero, the event line only when an event is present, and the prep
//! line only when a prep cook is scheduled.

use crate::{
    config::PlanConfig,
    context::DayContext,
    demand::DemandForecast,
    staffing::RoleRequirement,
    types::Role,
};
use chrono::Weekday;

pub struct ExplanationBuilder<'a> {
    config: &'a PlanConfig,
}

impl<'a> ExplanationBuilder<'a> {
    pub fn new(config: &'a PlanConfig) -> Self {
        Self { config }
    }

    pub fn explain(
        &self,
        ctx: &DayContext,
        forecast: &DemandForecast,
        requirements: &[RoleRequirement],
    ) -> String {
        let weather = &ctx.weather;
        let mut lines = vec![
            format!(
                "Forecast: {} orders on {} {}",
                forecast.daily_orders,
                weekday_name(forecast.day_of_week),
                forecast.date
            ),
            format!(
                "Weather: {}, {:.0}°F (demand x{:.2})",
                weather.description, weather.temperature_f, forecast.weather_factor
            ),
        ];

        if weather.rain_chance_pct > 0.0 {
            lines.push(format!("Rain: {:.0}% chance", weather.rain_chance_pct));
        }
        if let Some(event) = &ctx.event {
            lines.push(format!(
                "Event: {} ({:+.0}% demand)",
                event.description,
                event.uplift_pct()
            ));
        }

        lines.push(format!(
            "Peak: {}, {} orders/hr at {:02}:00",
            forecast.peak_window, forecast.peak_orders, forecast.peak_hour
        ));

        for req in requirements {
            match (req.role, req.throughput_per_worker) {
                (Role::Prep, _) if req.count > 0 => lines.push(format!(
                    "Staffing: {} {} (daily orders > {})",
                    req.count,
                    req.role.label(req.count),
                    self.config.prep_daily_orders_threshold
                )),
                (Role::Prep, _) => {}
                (_, Some(throughput)) => lines.push(format!(
                    "Staffing: {} {} (1 per {throughput} orders/hr)",
                    req.count,
                    req.role.label(req.count)
                )),
                (_, None) => lines.push(format!(
                    "Staffing: {} {}",
                    req.count,
                    req.role.label(req.count)
                )),
            }
        }

        lines.join("\n")
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
