use serde::{Deserialize, Serialize};

use super::error::FetchError;

/// Ground-station coordinates and observation horizon supplied by the
/// selection UI.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ObserverParameters {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub elevation_m: f64,
    pub duration_min: u32,
}

impl ObserverParameters {
    /// The shared horizon for every satellite in a batch.
    pub fn horizon_seconds(&self) -> u32 {
        self.duration_min * 60
    }

    pub fn validate(&self) -> Result<(), FetchError> {
        if self.duration_min == 0 {
            return Err(FetchError::InvalidObserver(
                "duration must be positive".into(),
            ));
        }
        if !(-90.0..=90.0).contains(&self.latitude_deg) {
            return Err(FetchError::InvalidObserver("latitude out of range".into()));
        }
        if !(-180.0..=180.0).contains(&self.longitude_deg) {
            return Err(FetchError::InvalidObserver("longitude out of range".into()));
        }
        Ok(())
    }
}

/// Ordered satellite ids; the order is canonical for aggregation and
/// rendering.
pub type SatelliteSelection = Vec<u32>;

/// One ground position at a logical time step. `None` coordinates mean
/// the satellite is not visible at that step and must not be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, utoipa::ToSchema)]
pub struct PositionSample {
    pub step: usize,
    pub longitude_deg: Option<f64>,
    pub latitude_deg: Option<f64>,
}

impl PositionSample {
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.longitude_deg, self.latitude_deg) {
            (Some(lon), Some(lat)) => Some((lon, lat)),
            _ => None,
        }
    }
}

/// Time-ordered ground positions for one satellite over the horizon.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct SatelliteTrack {
    pub satellite_id: u32,
    pub display_name: String,
    pub samples: Vec<PositionSample>,
}

impl SatelliteTrack {
    /// Numeric marker label: the digits of the display name, falling back
    /// to the satellite id for names that carry none.
    pub fn numeric_label(&self) -> String {
        let digits: String = self
            .display_name
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        if digits.is_empty() {
            self.satellite_id.to_string()
        } else {
            digits
        }
    }
}

/// Wire format of a per-satellite position response.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionsResponse {
    pub info: SatelliteInfo,
    #[serde(default)]
    pub positions: Vec<WirePosition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SatelliteInfo {
    pub satid: u32,
    pub satname: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WirePosition {
    #[serde(default)]
    pub satlatitude: Option<f64>,
    #[serde(default)]
    pub satlongitude: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// Wire format of the nearby-satellite lookup backing the selection UI.
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct NearbyResponse {
    #[serde(default)]
    pub above: Vec<NearbySatellite>,
}

#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct NearbySatellite {
    pub satid: u32,
    pub satname: String,
    #[serde(default)]
    pub satlat: Option<f64>,
    #[serde(default)]
    pub satlng: Option<f64>,
    #[serde(default)]
    pub satalt: Option<f64>,
}
