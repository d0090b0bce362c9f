use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::time::{interval, Interval, MissedTickBehavior};

use crate::geo::Projection;
use crate::positions::{PositionSample, SatelliteTrack};
use crate::render::Surface;

/// Wall-clock interval between frames.
pub const FRAME_INTERVAL: Duration = Duration::from_secs(1);
/// Logical seconds of satellite motion per real second of playback, so a
/// multi-minute pass plays back in seconds.
pub const TIME_ACCELERATION: i64 = 60;
/// Samples skipped per frame, matching the acceleration over 1s samples.
pub const STEP_STRIDE: usize = 60;
pub const MARKER_RADIUS: f64 = 4.0;

const TIMESTAMP_COLOR: &str = "#333";
const TIMESTAMP_FONT: &str = "bold 14px sans-serif";
const TIMESTAMP_Y: f64 = 10.0;
const LABEL_FONT: &str = "bold 11px sans-serif";
const LABEL_OFFSET_Y: f64 = 14.0;

/// The repeating frame task's clock. The first tick completes
/// immediately; dropping the clock cancels the schedule. At most one is
/// armed at a time, enforced by the session's non-Idle guard.
pub struct FrameClock {
    interval: Interval,
}

impl FrameClock {
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        FrameClock { interval }
    }

    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

/// Label the current logical time at the top center of the overlay.
pub fn draw_timestamp(surface: &mut dyn Surface, time: DateTime<Utc>) {
    let x = surface.width() / 2.0;
    surface.fill_text(
        &time.format("%H:%M:%S %Y-%m-%d").to_string(),
        x,
        TIMESTAMP_Y,
        TIMESTAMP_COLOR,
        TIMESTAMP_FONT,
    );
}

/// Draw one satellite marker: a filled circle at the projected position
/// with the numeric label beneath it. Samples without coordinates are
/// not visible and draw nothing.
pub fn draw_marker(
    surface: &mut dyn Surface,
    projection: &Projection,
    color: &str,
    track: &SatelliteTrack,
    sample: &PositionSample,
) {
    let Some((lon, lat)) = sample.coordinates() else {
        return;
    };
    let (x, y) = projection.project(lon, lat);
    surface.fill_circle(x, y, MARKER_RADIUS, color);
    surface.fill_text(
        &track.numeric_label(),
        x,
        y + LABEL_OFFSET_Y,
        color,
        LABEL_FONT,
    );
}
