//! The planning pipeline.
//!
//! STAGE ORDER (fixed, each stage consumes the previous stage's output):
//!   1. Demand synthesizer   DayContext      -> DemandForecast
//!   2. Staffing allocator   DemandForecast  -> RoleRequirement[], StaffAssignment[]
//!   3. Cost analyzer        assignments     -> LaborCostReport, CapacityUtilization
//!   4. Explanation builder  all of the above -> String
//!
//! RULES:
//!   - A plan is a value. Nothing is cached or mutated between runs; a new
//!     plan supersedes the old one wholesale.
//!   - A day that fails at any stage yields no plan, never a partial one.
//!   - Days are independent. A week runs them in parallel and one day's
//!     error never aborts the others.

use crate::{
    analysis::{CapacityUtilization, CostAnalyzer, LaborCostReport},
    config::PlanConfig,
    context::DayContext,
    demand::{DemandForecast, DemandSynthesizer},
    error::PlanResult,
    explain::ExplanationBuilder,
    staffing::{RoleRequirement, StaffAssignment, StaffingAllocator},
    types::WorkerName,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    pub forecast: DemandForecast,
    pub requirements: Vec<RoleRequirement>,
    pub assignments: Vec<StaffAssignment>,
    pub cost_report: LaborCostReport,
    pub utilization: CapacityUtilization,
    pub explanation: String,
}

impl DayPlan {
    pub fn to_json(&self) -> PlanResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

pub struct StaffingPlanner {
    config: PlanConfig,
}

impl StaffingPlanner {
    /// Fails with a configuration error if the tables are inconsistent.
    pub fn new(config: PlanConfig) -> PlanResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlanConfig {
        &self.config
    }

    pub fn plan_day(&self, ctx: &DayContext, staff_pool: &[WorkerName]) -> PlanResult<DayPlan> {
        let forecast = DemandSynthesizer::new(&self.config).synthesize(ctx)?;

        let allocator = StaffingAllocator::new(&self.config);
        let requirements = allocator.allocate(&forecast)?;
        let assignments = allocator.assign(&requirements, staff_pool)?;

        let (cost_report, utilization) =
            CostAnalyzer::new(&self.config).analyze(&assignments, &forecast)?;

        let explanation = ExplanationBuilder::new(&self.config).explain(ctx, &forecast, &requirements);

        Ok(DayPlan {
            forecast,
            requirements,
            assignments,
            cost_report,
            utilization,
            explanation,
        })
    }

    /// Plan each day independently. Results are in input order.
    pub fn plan_week(
        &self,
        contexts: &[DayContext],
        staff_pool: &[WorkerName],
    ) -> Vec<PlanResult<DayPlan>> {
        let outcomes: Vec<PlanResult<DayPlan>> = contexts
            .par_iter()
            .map(|ctx| {
                self.plan_day(ctx, staff_pool)
                    .inspect_err(|e| log::warn!("{}: no plan produced: {e}", ctx.date))
            })
            .collect();

        let planned = outcomes.iter().filter(|o| o.is_ok()).count();
        log::info!("Planned {planned} of {} days", contexts.len());
        outcomes
    }
}
