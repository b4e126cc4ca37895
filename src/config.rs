use std::env;
use std::str::FromStr;

use crate::error::{AppError, AppResult};
use crate::tracking::policy::{RANDOM_ARRIVAL_THRESHOLD, SIMULATION_JITTER_KM};
use crate::utils::geo::NEARBY_DISTANCE_KM;

/// Largest accepted simulation jitter; anything wider stops looking like the dropoff.
pub const MAX_SIMULATION_JITTER_KM: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub geofence_radius_km: f64,
    pub simulation_enabled: bool,
    pub simulation_arrival_threshold: f64,
    pub simulation_jitter_km: f64,
    pub rate_limit_per_ms: u64,
    pub rate_limit_burst: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            geofence_radius_km: NEARBY_DISTANCE_KM,
            simulation_enabled: false,
            simulation_arrival_threshold: RANDOM_ARRIVAL_THRESHOLD,
            simulation_jitter_km: SIMULATION_JITTER_KM,
            // One token every 60ms (1000 per minute)
            rate_limit_per_ms: 60,
            rate_limit_burst: 1000,
        }
    }
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            server_host: lookup("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_or(&lookup, "SERVER_PORT", defaults.server_port)?,
            geofence_radius_km: parse_or(&lookup, "GEOFENCE_RADIUS_KM", defaults.geofence_radius_km)?,
            simulation_enabled: parse_or(&lookup, "SIMULATION_ENABLED", defaults.simulation_enabled)?,
            simulation_arrival_threshold: parse_or(
                &lookup,
                "SIMULATION_ARRIVAL_THRESHOLD",
                defaults.simulation_arrival_threshold,
            )?,
            simulation_jitter_km: parse_or(
                &lookup,
                "SIMULATION_JITTER_KM",
                defaults.simulation_jitter_km,
            )?,
            rate_limit_per_ms: parse_or(&lookup, "RATE_LIMIT_PER_MS", defaults.rate_limit_per_ms)?,
            rate_limit_burst: parse_or(&lookup, "RATE_LIMIT_BURST", defaults.rate_limit_burst)?,
        };

        if !(config.geofence_radius_km.is_finite() && config.geofence_radius_km >= 0.0) {
            return Err(AppError::Config(
                "GEOFENCE_RADIUS_KM must be a non-negative number".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&config.simulation_arrival_threshold) {
            return Err(AppError::Config(
                "SIMULATION_ARRIVAL_THRESHOLD must be between 0 and 1".to_string(),
            ));
        }
        if !(0.0..=MAX_SIMULATION_JITTER_KM).contains(&config.simulation_jitter_km) {
            return Err(AppError::Config(format!(
                "SIMULATION_JITTER_KM must be between 0 and {}",
                MAX_SIMULATION_JITTER_KM
            )));
        }

        Ok(config)
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> AppResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Config(format!("{} has an invalid value: {:?}", key, raw))),
        None => Ok(default),
    }
}
