use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::AppState;
use crate::entities::Coordinate;
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceQuery {
    pub lat1: f64,
    pub lng1: f64,
    pub lat2: f64,
    pub lng2: f64,
    pub radius_km: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DistanceResponse {
    pub distance_km: f64,
    pub radius_km: f64,
    pub nearby: bool,
}

/// Great-circle distance between two points and whether they are within the radius
pub async fn distance(
    State(state): State<AppState>,
    Query(query): Query<DistanceQuery>,
) -> AppResult<Json<DistanceResponse>> {
    let from = Coordinate::new(query.lat1, query.lng1);
    let to = Coordinate::new(query.lat2, query.lng2);

    if !from.is_valid() || !to.is_valid() {
        return Err(AppError::BadRequest(
            "Coordinates must be within latitude [-90, 90] and longitude [-180, 180]".to_string(),
        ));
    }

    let radius_km = query.radius_km.unwrap_or(state.config.geofence_radius_km);
    if !(radius_km.is_finite() && radius_km >= 0.0) {
        return Err(AppError::BadRequest(
            "radiusKm must be a non-negative number".to_string(),
        ));
    }

    Ok(Json(DistanceResponse {
        distance_km: from.distance_to(&to),
        radius_km,
        nearby: from.is_within(&to, radius_km),
    }))
}
