//! Roll-up of a week's day plans for the weekly staffing overview.

use crate::{
    analysis::UtilizationBand,
    error::PlanResult,
    planner::DayPlan,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekSummary {
    pub planned_days: usize,
    pub failed_days: usize,
    pub total_orders: u64,
    pub total_revenue: f64,
    pub total_labor_hours: u32,
    pub total_labor_cost: f64,
    /// Week labour cost as a percentage of week revenue; 0 with no revenue.
    pub labor_cost_pct: f64,
    pub busiest_day: Option<(NaiveDate, u32)>,
    pub critical_days: Vec<NaiveDate>,
}

impl WeekSummary {
    /// Failed days are counted but contribute nothing to the totals.
    pub fn from_outcomes(outcomes: &[PlanResult<DayPlan>]) -> Self {
        let plans: Vec<&DayPlan> = outcomes.iter().filter_map(|o| o.as_ref().ok()).collect();

        let total_revenue: f64 = plans.iter().map(|p| p.cost_report.revenue).sum();
        let total_labor_cost: f64 = plans.iter().map(|p| p.cost_report.labor_cost).sum();

        // First day wins a tie.
        let busiest_day = plans
            .iter()
            .map(|p| (p.forecast.date, p.forecast.daily_orders))
            .reduce(|best, d| if d.1 > best.1 { d } else { best });

        Self {
            planned_days: plans.len(),
            failed_days: outcomes.len() - plans.len(),
            total_orders: plans.iter().map(|p| u64::from(p.forecast.daily_orders)).sum(),
            total_revenue,
            total_labor_hours: plans.iter().map(|p| p.cost_report.total_hours).sum(),
            total_labor_cost,
            labor_cost_pct: if total_revenue > 0.0 {
                total_labor_cost / total_revenue * 100.0
            } else {
                0.0
            },
            busiest_day,
            critical_days: plans
                .iter()
                .filter(|p| p.utilization.band == UtilizationBand::Critical)
                .map(|p| p.forecast.date)
                .collect(),
        }
    }
}
