mod client;
mod error;
mod orchestrator;
mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{HttpPositionService, PositionService};
pub use error::FetchError;
pub use orchestrator::fetch_tracks;
pub use types::{
    NearbyResponse, NearbySatellite, ObserverParameters, PositionSample, PositionsResponse,
    SatelliteInfo, SatelliteSelection, SatelliteTrack, WirePosition,
};
