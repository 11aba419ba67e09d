//! Shared primitive types used across the planning pipeline.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Hour of day, 0..24. Hour 13 covers 13:00–13:59.
pub type Hour = u32;

/// A worker name from the caller-supplied staff pool.
pub type WorkerName = String;

/// Labour roles the allocator staffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Cook,
    Cashier,
    Prep,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Cook, Role::Cashier, Role::Prep];

    pub fn label(&self, count: u32) -> &'static str {
        match (self, count == 1) {
            (Role::Cook, true)     => "cook",
            (Role::Cook, false)    => "cooks",
            (Role::Cashier, true)  => "cashier",
            (Role::Cashier, false) => "cashiers",
            (Role::Prep, true)     => "prep cook",
            (Role::Prep, false)    => "prep cooks",
        }
    }
}

/// Coarse grouping of weekdays. Baselines and peak targets are keyed by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Weekday,
    Friday,
    Weekend,
}

impl From<Weekday> for DayType {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Fri                => DayType::Friday,
            Weekday::Sat | Weekday::Sun => DayType::Weekend,
            _                           => DayType::Weekday,
        }
    }
}

/// One value per `DayType`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayTypeTable<T> {
    pub weekday: T,
    pub friday:  T,
    pub weekend: T,
}

impl<T: Copy> DayTypeTable<T> {
    pub fn get(&self, day: Weekday) -> T {
        match DayType::from(day) {
            DayType::Weekday => self.weekday,
            DayType::Friday  => self.friday,
            DayType::Weekend => self.weekend,
        }
    }
}
