//! Per-day planning inputs supplied by the external forecast collaborator.

use crate::error::{PlanError, PlanResult};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    pub temperature_f: f64,
    /// Chance of rain, 0–100.
    pub rain_chance_pct: f64,
    pub description: String,
    /// Explicit factor from the forecast-adjustment source. When absent the
    /// factor is derived from the description bucket.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demand_factor: Option<f64>,
}

impl Weather {
    pub fn new(temperature_f: f64, rain_chance_pct: f64, description: impl Into<String>) -> Self {
        Self {
            temperature_f,
            rain_chance_pct,
            description: description.into(),
            demand_factor: None,
        }
    }

    pub fn with_factor(mut self, factor: f64) -> Self {
        self.demand_factor = Some(factor);
        self
    }
}

/// A local event expected to move demand. 1.0 means no effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalEvent {
    pub description: String,
    pub demand_multiplier: f64,
}

impl LocalEvent {
    pub fn new(description: impl Into<String>, demand_multiplier: f64) -> Self {
        Self { description: description.into(), demand_multiplier }
    }

    /// Signed percentage change in demand, e.g. 1.25 → 25.
    pub fn uplift_pct(&self) -> f64 {
        (self.demand_multiplier - 1.0) * 100.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayContext {
    pub date: NaiveDate,
    pub weather: Weather,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<LocalEvent>,
}

impl DayContext {
    pub fn new(date: NaiveDate, weather: Weather) -> Self {
        Self { date, weather, event: None }
    }

    pub fn with_event(mut self, event: LocalEvent) -> Self {
        self.event = Some(event);
        self
    }

    pub fn day_of_week(&self) -> Weekday {
        self.date.weekday()
    }

    /// Reject out-of-range inputs. Values are never clamped.
    pub fn validate(&self) -> PlanResult<()> {
        let reject = |reason: String| Err(PlanError::Validation { date: self.date, reason });
        let w = &self.weather;

        if !w.temperature_f.is_finite() {
            return reject(format!("temperature {} is not a number", w.temperature_f));
        }
        if !(0.0..=100.0).contains(&w.rain_chance_pct) {
            return reject(format!("rain chance {}% outside [0, 100]", w.rain_chance_pct));
        }
        if let Some(factor) = w.demand_factor {
            if !factor.is_finite() || factor <= 0.0 {
                return reject(format!("weather factor {factor} must be > 0"));
            }
        }
        if let Some(event) = &self.event {
            let m = event.demand_multiplier;
            if !m.is_finite() || m <= 0.0 {
                return reject(format!(
                    "event '{}' multiplier {m} must be > 0",
                    event.description
                ));
            }
        }
        Ok(())
    }
}
