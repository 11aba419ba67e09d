//! Cost & utilization analyzer.
//!
//! Labour cost uses one blended hourly rate for every hour worked, not a
//! per-role wage sum. Utilization compares the peak hour against cook
//! capacity only.

use crate::{
    config::{PlanConfig, PolicyBands},
    demand::DemandForecast,
    error::{PlanError, PlanResult},
    staffing::StaffAssignment,
    types::Role,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UtilizationBand {
    Underutilized,
    Optimal,
    Caution,
    Critical,
}

impl UtilizationBand {
    pub fn classify(utilization_pct: f64, bands: &PolicyBands) -> Self {
        if utilization_pct >= bands.utilization_critical_from {
            UtilizationBand::Critical
        } else if utilization_pct >= bands.utilization_caution_from {
            UtilizationBand::Caution
        } else if utilization_pct >= bands.utilization_optimal_from {
            UtilizationBand::Optimal
        } else {
            UtilizationBand::Underutilized
        }
    }

    pub fn advisory(&self) -> &'static str {
        match self {
            UtilizationBand::Underutilized => "underutilized",
            UtilizationBand::Optimal       => "optimal",
            UtilizationBand::Caution       => "caution, monitor",
            UtilizationBand::Critical      => "critical, add staff",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LaborCostBand {
    Efficient,
    WithinTarget,
    High,
}

impl LaborCostBand {
    pub fn classify(labor_cost_pct: f64, bands: &PolicyBands) -> Self {
        if labor_cost_pct >= bands.labor_high_from {
            LaborCostBand::High
        } else if labor_cost_pct >= bands.labor_within_target_from {
            LaborCostBand::WithinTarget
        } else {
            LaborCostBand::Efficient
        }
    }

    pub fn advisory(&self) -> &'static str {
        match self {
            LaborCostBand::Efficient    => "optimal/efficient",
            LaborCostBand::WithinTarget => "good, within target",
            LaborCostBand::High         => "high, warn",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaborCostReport {
    pub total_hours: u32,
    pub blended_hourly_rate: f64,
    pub labor_cost: f64,
    /// daily_orders × average order value.
    pub revenue: f64,
    /// Labour cost as a percentage (0–100+) of revenue. `None` when the
    /// forecast has no revenue.
    pub labor_cost_pct: Option<f64>,
    /// Revenue per labour hour.
    pub revenue_per_hour: f64,
    /// Revenue of the peak hour alone.
    pub peak_revenue: f64,
    pub band: Option<LaborCostBand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityUtilization {
    pub cook_count: u32,
    pub max_hourly_capacity: u32,
    pub peak_orders: u32,
    pub utilization_pct: f64,
    pub band: UtilizationBand,
}

pub struct CostAnalyzer<'a> {
    config: &'a PlanConfig,
}

impl<'a> CostAnalyzer<'a> {
    pub fn new(config: &'a PlanConfig) -> Self {
        Self { config }
    }

    pub fn analyze(
        &self,
        assignments: &[StaffAssignment],
        forecast: &DemandForecast,
    ) -> PlanResult<(LaborCostReport, CapacityUtilization)> {
        Ok((
            self.labor_cost(assignments, forecast)?,
            self.utilization(assignments, forecast)?,
        ))
    }

    fn labor_cost(
        &self,
        assignments: &[StaffAssignment],
        forecast: &DemandForecast,
    ) -> PlanResult<LaborCostReport> {
        let total_hours: u32 = assignments.iter().map(|a| a.hours()).sum();
        if total_hours == 0 && forecast.daily_orders > 0 {
            return Err(PlanError::Computation(format!(
                "{}: {} orders forecast but no labour hours scheduled",
                forecast.date, forecast.daily_orders
            )));
        }

        let aov = self.config.average_order_value;
        let revenue = forecast.daily_orders as f64 * aov;
        let rate = self.config.blended_hourly_rate()?;
        let labor_cost = total_hours as f64 * rate;
        let labor_cost_pct = (revenue > 0.0).then(|| labor_cost / revenue * 100.0);
        let band = labor_cost_pct.map(|pct| LaborCostBand::classify(pct, &self.config.bands));

        match labor_cost_pct {
            Some(pct) => log::debug!(
                "{}: hours={total_hours} rate={rate:.2} cost={labor_cost:.2} \
                 revenue={revenue:.2} pct={pct:.1}",
                forecast.date
            ),
            None => log::debug!(
                "{}: hours={total_hours} rate={rate:.2} cost={labor_cost:.2} revenue=0, \
                 labour % undefined",
                forecast.date
            ),
        }
        if let (Some(LaborCostBand::High), Some(pct)) = (band, labor_cost_pct) {
            log::warn!("{}: labour cost {pct:.1}% of revenue", forecast.date);
        }

        let revenue_per_hour = if total_hours == 0 {
            0.0
        } else {
            revenue / total_hours as f64
        };

        Ok(LaborCostReport {
            total_hours,
            blended_hourly_rate: rate,
            labor_cost,
            revenue,
            labor_cost_pct,
            revenue_per_hour,
            peak_revenue: forecast.peak_orders as f64 * aov,
            band,
        })
    }

    fn utilization(
        &self,
        assignments: &[StaffAssignment],
        forecast: &DemandForecast,
    ) -> PlanResult<CapacityUtilization> {
        let cook_count = assignments.iter().filter(|a| a.role == Role::Cook).count() as u32;
        let max_hourly_capacity = cook_count * self.config.throughput(Role::Cook)?;
        if max_hourly_capacity == 0 {
            return Err(PlanError::Computation(format!(
                "{}: no cook capacity to serve peak of {}",
                forecast.date, forecast.peak_orders
            )));
        }

        let utilization_pct = forecast.peak_orders as f64 / max_hourly_capacity as f64 * 100.0;
        let band = UtilizationBand::classify(utilization_pct, &self.config.bands);
        if band == UtilizationBand::Critical {
            log::warn!(
                "{}: peak utilization {utilization_pct:.0}% ({})",
                forecast.date,
                band.advisory()
            );
        }

        Ok(CapacityUtilization {
            cook_count,
            max_hourly_capacity,
            peak_orders: forecast.peak_orders,
            utilization_pct,
            band,
        })
    }
}
