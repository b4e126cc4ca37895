pub mod notifier;
pub mod policy;

pub use notifier::ArrivalNotifier;
pub use policy::{
    Arrival, ArrivalLeg, SimulationParams, check_location_arrival, detect_arrival,
    handle_gps_status_change, simulate_location_update, simulate_location_update_with,
};
