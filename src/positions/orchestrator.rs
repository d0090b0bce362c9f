use futures::future::try_join_all;

use super::client::PositionService;
use super::error::FetchError;
use super::types::{ObserverParameters, PositionSample, PositionsResponse, SatelliteTrack};

/// Fan out one position request per selected satellite, join on all of
/// them, and aggregate the results into tracks in selection order.
///
/// All-or-nothing: any failed request aborts the whole batch with a
/// single aggregate error and no partial track set. There are no retries
/// and no timeout; a hung request holds the batch open indefinitely.
pub async fn fetch_tracks<S: PositionService>(
    service: &S,
    selection: &[u32],
    observer: ObserverParameters,
) -> Result<Vec<SatelliteTrack>, FetchError> {
    observer.validate()?;

    let requests = selection.iter().map(|&satellite_id| async move {
        let response = service
            .positions(satellite_id, observer)
            .await
            .map_err(|e| e.for_satellite(satellite_id))?;
        Ok(build_track(satellite_id, response))
    });

    try_join_all(requests).await
}

fn build_track(satellite_id: u32, response: PositionsResponse) -> SatelliteTrack {
    let samples = response
        .positions
        .iter()
        .enumerate()
        .map(|(step, position)| PositionSample {
            step,
            longitude_deg: position.satlongitude,
            latitude_deg: position.satlatitude,
        })
        .collect();
    SatelliteTrack {
        satellite_id,
        display_name: response.info.satname,
        samples,
    }
}
