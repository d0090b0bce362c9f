use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("position request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("position service returned HTTP {0}")]
    Status(reqwest::StatusCode),
    #[error("invalid observer parameters: {0}")]
    InvalidObserver(String),
    #[error("position fetch for satellite {satellite_id} failed: {source}")]
    Satellite {
        satellite_id: u32,
        #[source]
        source: Box<FetchError>,
    },
}

impl FetchError {
    /// Tag an error with the satellite whose request failed the batch.
    pub fn for_satellite(self, satellite_id: u32) -> Self {
        FetchError::Satellite {
            satellite_id,
            source: Box::new(self),
        }
    }
}
