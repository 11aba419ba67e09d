//! Rate, throughput, shift and curve tables for the planning pipeline.
//!
//! Loaded once and shared read-only by every day's pipeline run.
//! In tests, use PlanConfig::default().

use crate::{
    error::{PlanError, PlanResult},
    types::{DayTypeTable, Hour, Role},
};
use chrono::Weekday;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleConfig {
    pub role: Role,
    /// Orders per hour one worker can serve. `None` for roles that are
    /// not throughput-scaled (prep).
    pub throughput_per_worker: Option<u32>,
    pub min_count: u32,
    pub max_count: u32,
    pub hourly_wage: f64,
    /// Share of this role in the blended labour rate.
    pub blend_weight: f64,
}

/// A fixed shift block for one role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftTemplate {
    pub role: Role,
    pub start_hour: Hour,
    pub end_hour: Hour,
}

impl ShiftTemplate {
    pub fn hours(&self) -> u32 {
        self.end_hour.saturating_sub(self.start_hour)
    }

    pub fn label(&self) -> String {
        format!("{:02}:00 - {:02}:00", self.start_hour, self.end_hour)
    }
}

/// Canonical intraday demand shape for one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandCurve {
    pub day: Weekday,
    /// Human-readable peak description, e.g. "12–2pm lunch".
    pub peak_window: String,
    /// One point per operating hour, starting at `open_hour`.
    pub shape: Vec<f64>,
}

impl DemandCurve {
    pub fn max_point(&self) -> f64 {
        self.shape.iter().copied().fold(0.0, f64::max)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherFactors {
    pub clear: f64,
    pub sunny: f64,
    pub perfect: f64,
    pub light_rain: f64,
    /// Above 1.0: delivery orders outweigh lost walk-ins.
    pub heavy_rain: f64,
    pub perfect_temp_min_f: f64,
    pub perfect_temp_max_f: f64,
}

/// Classification thresholds. Every band is inclusive on its lower bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyBands {
    pub utilization_optimal_from: f64,
    pub utilization_caution_from: f64,
    pub utilization_critical_from: f64,
    pub labor_within_target_from: f64,
    pub labor_high_from: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    pub average_order_value: f64,
    pub open_hour: Hour,
    pub baselines: DayTypeTable<u32>,
    pub peak_targets: DayTypeTable<u32>,
    pub weather: WeatherFactors,
    pub roles: Vec<RoleConfig>,
    pub prep_daily_orders_threshold: u32,
    pub shifts: Vec<ShiftTemplate>,
    pub curves: Vec<DemandCurve>,
    pub bands: PolicyBands,
}

impl PlanConfig {
    /// Load from the data/ directory and validate.
    pub fn load(data_dir: &str) -> PlanResult<Self> {
        let path = format!("{data_dir}/staffing/plan_config.json");
        let content = std::fs::read_to_string(&path)
            .map_err(|e| PlanError::Configuration(format!("Cannot read {path}: {e}")))?;
        let config: PlanConfig = serde_json::from_str(&content)
            .map_err(|e| PlanError::Configuration(format!("Cannot parse {path}: {e}")))?;
        config.validate()?;
        log::debug!("Loaded plan config from {path}");
        Ok(config)
    }

    pub fn role(&self, role: Role) -> PlanResult<&RoleConfig> {
        self.roles
            .iter()
            .find(|r| r.role == role)
            .ok_or_else(|| PlanError::Configuration(format!("No role entry for {role:?}")))
    }

    /// Throughput for a throughput-scaled role.
    pub fn throughput(&self, role: Role) -> PlanResult<u32> {
        match self.role(role)?.throughput_per_worker {
            Some(t) if t > 0 => Ok(t),
            _ => Err(PlanError::Configuration(format!(
                "Role {role:?} has no positive throughput"
            ))),
        }
    }

    pub fn shifts_for(&self, role: Role) -> PlanResult<Vec<&ShiftTemplate>> {
        let shifts: Vec<&ShiftTemplate> = self.shifts.iter().filter(|s| s.role == role).collect();
        if shifts.is_empty() {
            return Err(PlanError::Configuration(format!("No shift templates for {role:?}")));
        }
        Ok(shifts)
    }

    pub fn curve_for(&self, day: Weekday) -> PlanResult<&DemandCurve> {
        self.curves
            .iter()
            .find(|c| c.day == day)
            .ok_or_else(|| PlanError::Configuration(format!("No demand curve for {day}")))
    }

    /// Weighted average of role wages. A single blended rate is applied
    /// to every labour hour rather than summing per-role pay.
    pub fn blended_hourly_rate(&self) -> PlanResult<f64> {
        let total_weight: f64 = self.roles.iter().map(|r| r.blend_weight).sum();
        if total_weight <= 0.0 {
            return Err(PlanError::Configuration("Role blend weights sum to zero".into()));
        }
        let weighted: f64 = self.roles.iter().map(|r| r.hourly_wage * r.blend_weight).sum();
        Ok(weighted / total_weight)
    }

    pub fn validate(&self) -> PlanResult<()> {
        let bad = |msg: String| Err(PlanError::Configuration(msg));

        if !positive(self.average_order_value) {
            return bad(format!("average_order_value must be > 0, got {}", self.average_order_value));
        }

        for role in Role::ALL {
            let rc = self.role(role)?;
            if rc.min_count > rc.max_count {
                return bad(format!(
                    "{role:?} bounds inverted: min {} > max {}",
                    rc.min_count, rc.max_count
                ));
            }
            if !non_negative(rc.hourly_wage) || !non_negative(rc.blend_weight) {
                return bad(format!("{role:?} wage and blend weight must be non-negative"));
            }
            let shifts = self.shifts_for(role)?;
            if let Some(s) = shifts.iter().find(|s| s.hours() == 0 || s.end_hour > 24) {
                return bad(format!("{role:?} shift {} is not a valid block", s.label()));
            }
        }
        self.throughput(Role::Cook)?;
        self.throughput(Role::Cashier)?;
        self.blended_hourly_rate()?;

        for day in [
            Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu,
            Weekday::Fri, Weekday::Sat, Weekday::Sun,
        ] {
            let curve = self.curve_for(day)?;
            if curve.shape.is_empty() || !curve.shape.iter().copied().all(non_negative) {
                return bad(format!("Demand curve for {day} must be non-empty and non-negative"));
            }
            if curve.max_point() <= 0.0 {
                return bad(format!("Demand curve for {day} has no positive point"));
            }
            if self.open_hour as usize + curve.shape.len() > 24 {
                return bad(format!("Demand curve for {day} runs past midnight"));
            }
        }

        let w = &self.weather;
        if ![w.clear, w.sunny, w.perfect, w.light_rain, w.heavy_rain]
            .into_iter()
            .all(positive)
        {
            return bad("Weather factors must all be > 0".into());
        }
        if w.perfect_temp_min_f > w.perfect_temp_max_f {
            return bad("Perfect temperature band is inverted".into());
        }

        let b = &self.bands;
        if !(0.0 <= b.utilization_optimal_from
            && b.utilization_optimal_from <= b.utilization_caution_from
            && b.utilization_caution_from <= b.utilization_critical_from)
        {
            return bad("Utilization bands must be ascending".into());
        }
        if !(0.0 <= b.labor_within_target_from && b.labor_within_target_from <= b.labor_high_from) {
            return bad("Labour cost bands must be ascending".into());
        }
        Ok(())
    }
}

fn positive(x: f64) -> bool {
    x.is_finite() && x > 0.0
}

fn non_negative(x: f64) -> bool {
    x.is_finite() && x >= 0.0
}

impl Default for PlanConfig {
    fn default() -> Self {
        let role = |role, throughput_per_worker, min_count, max_count, hourly_wage, blend_weight| {
            RoleConfig { role, throughput_per_worker, min_count, max_count, hourly_wage, blend_weight }
        };
        let shift = |role, start_hour, end_hour| ShiftTemplate { role, start_hour, end_hour };
        let curve = |day, peak_window: &str, shape: [f64; 12]| DemandCurve {
            day,
            peak_window: peak_window.into(),
            shape: shape.to_vec(),
        };

        Self {
            average_order_value: 18.50,
            open_hour: 10,
            baselines: DayTypeTable { weekday: 165, friday: 190, weekend: 210 },
            peak_targets: DayTypeTable { weekday: 45, friday: 48, weekend: 50 },
            weather: WeatherFactors {
                clear: 1.00,
                sunny: 1.05,
                perfect: 1.30,
                light_rain: 0.95,
                heavy_rain: 1.10,
                perfect_temp_min_f: 65.0,
                perfect_temp_max_f: 80.0,
            },
            roles: vec![
                role(Role::Cook,    Some(25), 2, 4, 18.00, 0.5),
                role(Role::Cashier, Some(30), 2, 3, 15.00, 0.5),
                role(Role::Prep,    None,     0, 1, 16.00, 0.0),
            ],
            prep_daily_orders_threshold: 200,
            shifts: vec![
                shift(Role::Cook,    10, 18),
                shift(Role::Cook,    12, 20),
                shift(Role::Cook,    14, 22),
                shift(Role::Cashier, 10, 18),
                shift(Role::Cashier, 14, 22),
                shift(Role::Prep,     8, 16),
            ],
            curves: vec![
                curve(Weekday::Mon, "12–2pm lunch",
                    [14.0, 26.0, 45.0, 41.0, 30.0, 22.0, 18.0, 22.0, 28.0, 24.0, 15.0, 8.0]),
                curve(Weekday::Tue, "12–2pm lunch",
                    [12.0, 24.0, 42.0, 45.0, 32.0, 22.0, 19.0, 24.0, 30.0, 26.0, 16.0, 9.0]),
                curve(Weekday::Wed, "6–8pm dinner",
                    [10.0, 18.0, 34.0, 32.0, 22.0, 18.0, 20.0, 30.0, 45.0, 42.0, 24.0, 12.0]),
                curve(Weekday::Thu, "6–8pm dinner",
                    [10.0, 18.0, 33.0, 31.0, 22.0, 18.0, 21.0, 32.0, 43.0, 45.0, 26.0, 12.0]),
                curve(Weekday::Fri, "6–8pm dinner",
                    [12.0, 20.0, 36.0, 34.0, 24.0, 20.0, 24.0, 36.0, 48.0, 46.0, 32.0, 18.0]),
                curve(Weekday::Sat, "1–8pm sustained",
                    [16.0, 28.0, 40.0, 50.0, 48.0, 46.0, 45.0, 47.0, 49.0, 46.0, 34.0, 20.0]),
                curve(Weekday::Sun, "11am–2pm brunch",
                    [22.0, 40.0, 50.0, 47.0, 38.0, 30.0, 26.0, 28.0, 32.0, 28.0, 18.0, 10.0]),
            ],
            bands: PolicyBands {
                utilization_optimal_from: 70.0,
                utilization_caution_from: 90.0,
                utilization_critical_from: 95.0,
                labor_within_target_from: 25.0,
                labor_high_from: 30.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        PlanConfig::default().validate().unwrap();
    }

    #[test]
    fn blended_rate_is_weighted_average() {
        let rate = PlanConfig::default().blended_hourly_rate().unwrap();
        assert!((rate - 16.5).abs() < 1e-9, "got {rate}");
    }

    #[test]
    fn missing_role_is_configuration_error() {
        let mut config = PlanConfig::default();
        config.roles.retain(|r| r.role != Role::Cashier);
        assert!(matches!(config.validate(), Err(PlanError::Configuration(_))));
    }

    #[test]
    fn inverted_bounds_rejected() {
        let mut config = PlanConfig::default();
        config.roles[0].min_count = 5;
        assert!(matches!(config.validate(), Err(PlanError::Configuration(_))));
    }

    #[test]
    fn missing_curve_rejected() {
        let mut config = PlanConfig::default();
        config.curves.retain(|c| c.day != Weekday::Sun);
        assert!(matches!(config.validate(), Err(PlanError::Configuration(_))));
    }
}
