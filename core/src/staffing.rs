//! Staffing allocator: peak demand to role counts, role counts to shifts.
//!
//! Counts always round up. Role minimums hold even at zero demand.

use crate::{
    config::PlanConfig,
    demand::DemandForecast,
    error::{PlanError, PlanResult},
    types::{Hour, Role, WorkerName},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRequirement {
    pub role: Role,
    pub count: u32,
    /// `None` for prep, which is a binary add-on rather than throughput-scaled.
    pub throughput_per_worker: Option<u32>,
}

/// A worker bound to a role and shift for one day. `worker` is `None`
/// when the staff pool ran out before every slot was labelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffAssignment {
    pub worker: Option<WorkerName>,
    pub role: Role,
    pub start_hour: Hour,
    pub end_hour: Hour,
}

impl StaffAssignment {
    pub fn hours(&self) -> u32 {
        self.end_hour.saturating_sub(self.start_hour)
    }

    pub fn is_open(&self) -> bool {
        self.worker.is_none()
    }
}

/// Count of `role` in a requirement set, zero when absent.
pub fn count_for(requirements: &[RoleRequirement], role: Role) -> u32 {
    requirements
        .iter()
        .find(|r| r.role == role)
        .map_or(0, |r| r.count)
}

pub struct StaffingAllocator<'a> {
    config: &'a PlanConfig,
}

impl<'a> StaffingAllocator<'a> {
    pub fn new(config: &'a PlanConfig) -> Self {
        Self { config }
    }

    /// Cook, cashier and prep requirements, in that order.
    pub fn allocate(&self, forecast: &DemandForecast) -> PlanResult<Vec<RoleRequirement>> {
        let cook = self.scaled(Role::Cook, forecast.peak_orders)?;
        let cashier = self.scaled(Role::Cashier, forecast.peak_orders)?;
        let prep = RoleRequirement {
            role: Role::Prep,
            count: u32::from(forecast.daily_orders > self.config.prep_daily_orders_threshold),
            throughput_per_worker: None,
        };

        log::debug!(
            "{}: peak={} daily={} -> cooks={} cashiers={} prep={}",
            forecast.date,
            forecast.peak_orders,
            forecast.daily_orders,
            cook.count,
            cashier.count,
            prep.count
        );

        Ok(vec![cook, cashier, prep])
    }

    fn scaled(&self, role: Role, peak_orders: u32) -> PlanResult<RoleRequirement> {
        let rc = self.config.role(role)?;
        let throughput = self.config.throughput(role)?;
        if rc.min_count > rc.max_count {
            return Err(PlanError::Configuration(format!(
                "{role:?} bounds inverted: min {} > max {}",
                rc.min_count, rc.max_count
            )));
        }
        Ok(RoleRequirement {
            role,
            count: peak_orders.div_ceil(throughput).clamp(rc.min_count, rc.max_count),
            throughput_per_worker: Some(throughput),
        })
    }

    /// Label every required slot with a pool name and a shift block.
    ///
    /// Names are consumed in pool order across roles; shift templates
    /// rotate round-robin within each role's library.
    pub fn assign(
        &self,
        requirements: &[RoleRequirement],
        staff_pool: &[WorkerName],
    ) -> PlanResult<Vec<StaffAssignment>> {
        let mut names = staff_pool.iter();
        let mut assignments = Vec::new();

        for req in requirements {
            if req.count == 0 {
                continue;
            }
            let shifts = self.config.shifts_for(req.role)?;
            for slot in 0..req.count as usize {
                let shift = shifts[slot % shifts.len()];
                assignments.push(StaffAssignment {
                    worker: names.next().cloned(),
                    role: req.role,
                    start_hour: shift.start_hour,
                    end_hour: shift.end_hour,
                });
            }
        }

        let open = assignments.iter().filter(|a| a.is_open()).count();
        if open > 0 {
            log::warn!(
                "Staff pool of {} covers {} of {} shifts; {open} left open",
                staff_pool.len(),
                assignments.len() - open,
                assignments.len()
            );
        }
        Ok(assignments)
    }
}
