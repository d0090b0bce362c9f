use thiserror::Error;

use crate::positions::FetchError;

#[derive(Debug, Error)]
pub enum AnimatorError {
    #[error("an animation session is already active")]
    Busy,
    #[error("no satellites selected")]
    EmptySelection,
    #[error("no position data")]
    NoPositionData,
    #[error("position fetch failed: {0}")]
    Fetch(#[from] FetchError),
}
