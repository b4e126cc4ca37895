use serde::{Deserialize, Serialize};

use super::location::{NamedDestination, TimestampedCoordinate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Driver,
    Dispatcher,
    Admin,
}

/// User/driver record as handed over by the session layer and the job backend.
///
/// Only `current_location` is ever replaced, and only by the demo simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverSnapshot {
    pub role: UserRole,
    #[serde(default)]
    pub gps_enabled: bool,
    #[serde(default)]
    pub active_loads: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<TimestampedCoordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_pickup_location: Option<NamedDestination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_dropoff_location: Option<NamedDestination>,
}

impl DriverSnapshot {
    pub fn is_driver(&self) -> bool {
        self.role == UserRole::Driver
    }

    /// Driver role with GPS switched on; every tracking decision requires both.
    pub fn is_tracking(&self) -> bool {
        self.is_driver() && self.gps_enabled
    }
}
