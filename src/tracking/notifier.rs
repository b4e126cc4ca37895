use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use super::policy::{Arrival, ArrivalLeg};

/// Remembers which arrivals were already announced so a polling caller gets
/// one notification per geofence entry instead of one per tick.
#[derive(Debug, Default)]
pub struct ArrivalNotifier {
    announced: Mutex<HashMap<Uuid, HashSet<ArrivalLeg>>>,
}

impl ArrivalNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the latest arrival check for a driver.
    ///
    /// Returns the arrival only the first time it is seen for that leg. Legs
    /// the driver is no longer inside are forgotten, so leaving and coming
    /// back announces again.
    pub fn observe(&self, driver_id: Uuid, arrival: Option<&Arrival>) -> AppResult<Option<Arrival>> {
        let mut announced = self.lock()?;

        let Some(arrival) = arrival else {
            announced.remove(&driver_id);
            return Ok(None);
        };

        let legs = announced.entry(driver_id).or_default();
        legs.retain(|leg| *leg == arrival.leg);

        if legs.insert(arrival.leg) {
            tracing::info!(
                driver_id = %driver_id,
                leg = ?arrival.leg,
                location = %arrival.location_name,
                "Arrival notification issued"
            );
            Ok(Some(arrival.clone()))
        } else {
            Ok(None)
        }
    }

    pub fn reset(&self, driver_id: Uuid) -> AppResult<bool> {
        Ok(self.lock()?.remove(&driver_id).is_some())
    }

    pub fn is_announced(&self, driver_id: Uuid, leg: ArrivalLeg) -> AppResult<bool> {
        Ok(self
            .lock()?
            .get(&driver_id)
            .is_some_and(|legs| legs.contains(&leg)))
    }

    fn lock(&self) -> AppResult<std::sync::MutexGuard<'_, HashMap<Uuid, HashSet<ArrivalLeg>>>> {
        self.announced
            .lock()
            .map_err(|_| AppError::Internal("Arrival notifier state poisoned".to_string()))
    }
}
