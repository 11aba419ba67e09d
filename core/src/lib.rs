//! Demand-driven staffing and capacity planning.
//!
//! Turns one day's forecast inputs into a crew plan, a labour cost and
//! utilization report, and a plain-text explanation of why.

pub mod analysis;
pub mod config;
pub mod context;
pub mod demand;
pub mod error;
pub mod explain;
pub mod planner;
pub mod rng;
pub mod staffing;
pub mod summary;
pub mod synthetic;
pub mod types;

pub use config::PlanConfig;
pub use context::{DayContext, LocalEvent, Weather};
pub use error::{PlanError, PlanResult};
pub use planner::{DayPlan, StaffingPlanner};
pub use summary::WeekSummary;
