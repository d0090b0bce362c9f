//! In-memory position service for tests.

use std::collections::HashMap;
use std::time::Duration;

use super::client::PositionService;
use super::error::FetchError;
use super::types::{
    NearbyResponse, ObserverParameters, PositionsResponse, SatelliteInfo, WirePosition,
};

/// Canned per-satellite responses, with optional per-satellite delays to
/// shuffle completion order, and a switch to leave requests pending
/// until released (for exercising the Loading state).
#[derive(Default)]
pub(crate) struct FakeService {
    responses: HashMap<u32, Result<PositionsResponse, ()>>,
    delays_ms: HashMap<u32, u64>,
    gate: Option<std::sync::Arc<tokio::sync::Semaphore>>,
}

impl FakeService {
    pub(crate) fn new() -> Self {
        FakeService::default()
    }

    pub(crate) fn with_track(mut self, satellite_id: u32, name: &str, len: usize) -> Self {
        let positions = (0..len)
            .map(|i| WirePosition {
                satlatitude: Some(10.0 + i as f64 * 0.1),
                satlongitude: Some(-120.0 + i as f64 * 0.2),
                timestamp: Some(i as i64),
            })
            .collect();
        self.responses.insert(
            satellite_id,
            Ok(PositionsResponse {
                info: SatelliteInfo {
                    satid: satellite_id,
                    satname: name.to_string(),
                },
                positions,
            }),
        );
        self
    }

    /// A satellite whose response carries no position series at all.
    pub(crate) fn with_empty_track(mut self, satellite_id: u32, name: &str) -> Self {
        self.responses.insert(
            satellite_id,
            Ok(PositionsResponse {
                info: SatelliteInfo {
                    satid: satellite_id,
                    satname: name.to_string(),
                },
                positions: Vec::new(),
            }),
        );
        self
    }

    pub(crate) fn with_failure(mut self, satellite_id: u32) -> Self {
        self.responses.insert(satellite_id, Err(()));
        self
    }

    pub(crate) fn with_delay(mut self, satellite_id: u32, delay_ms: u64) -> Self {
        self.delays_ms.insert(satellite_id, delay_ms);
        self
    }

    /// Hold every request until the returned semaphore receives permits,
    /// one per pending request.
    pub(crate) fn gated(mut self) -> (Self, std::sync::Arc<tokio::sync::Semaphore>) {
        let gate = std::sync::Arc::new(tokio::sync::Semaphore::new(0));
        self.gate = Some(gate.clone());
        (self, gate)
    }
}

impl PositionService for FakeService {
    async fn positions(
        &self,
        satellite_id: u32,
        _observer: ObserverParameters,
    ) -> Result<PositionsResponse, FetchError> {
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        if let Some(&delay) = self.delays_ms.get(&satellite_id) {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        match self.responses.get(&satellite_id) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(())) => Err(FetchError::Status(reqwest::StatusCode::BAD_GATEWAY)),
            None => Err(FetchError::Status(reqwest::StatusCode::NOT_FOUND)),
        }
    }

    async fn nearby(
        &self,
        _observer: ObserverParameters,
        _search_radius_deg: u32,
        _category: u32,
    ) -> Result<NearbyResponse, FetchError> {
        Ok(NearbyResponse { above: Vec::new() })
    }
}
