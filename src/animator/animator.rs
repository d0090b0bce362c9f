use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::Serialize;
use tokio::task::JoinHandle;

use super::error::AnimatorError;
use super::frame::{self, FrameClock, FRAME_INTERVAL, STEP_STRIDE, TIME_ACCELERATION};
use crate::geo::Projection;
use crate::positions::{
    fetch_tracks, ObserverParameters, PositionService, SatelliteSelection, SatelliteTrack,
};
use crate::render::{ColorAssigner, SharedSurface, Surface};

const BUSY_HINT: &str =
    "Please wait for the current animation to finish before selecting new satellites!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub enum SessionStatus {
    Idle,
    Loading,
    Drawing,
}

/// Point-in-time view of the session state for the UI collaborator.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct SessionSnapshot {
    pub status: SessionStatus,
    pub current_step: usize,
    pub track_count: usize,
    /// Single-slot busy hint, set when a request is rejected because a
    /// session is active and cleared when that session reaches Idle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// Rendering state threaded explicitly through the frame loop: the
/// overlay surface, the projection shared with the base map, and the
/// process-lifetime color assignment.
#[derive(Clone)]
pub struct RenderContext {
    pub projection: Arc<Projection>,
    pub overlay: SharedSurface,
    pub colors: Arc<Mutex<ColorAssigner>>,
}

impl RenderContext {
    pub fn new(projection: Arc<Projection>, overlay: SharedSurface) -> Self {
        RenderContext {
            projection,
            overlay,
            colors: Arc::new(Mutex::new(ColorAssigner::new())),
        }
    }
}

#[derive(Debug)]
struct Shared {
    status: SessionStatus,
    current_step: usize,
    track_count: usize,
    hint: Option<String>,
    last_error: Option<String>,
}

/// The tracking/animation state machine: `Idle -> Loading -> Drawing ->
/// Idle`. Exactly one session may be non-Idle at a time; a request made
/// while one is active is rejected, never queued.
///
/// There is no cancellation primitive and no fetch timeout. The only
/// ways out of Loading or Drawing are natural completion and failure; a
/// hung position request leaves the session in Loading indefinitely.
pub struct Animator<S: PositionService> {
    service: Arc<S>,
    context: RenderContext,
    shared: Arc<Mutex<Shared>>,
    worker: Option<JoinHandle<Result<(), AnimatorError>>>,
}

impl<S: PositionService> Animator<S> {
    pub fn new(service: Arc<S>, context: RenderContext) -> Self {
        Animator {
            service,
            context,
            shared: Arc::new(Mutex::new(Shared {
                status: SessionStatus::Idle,
                current_step: 0,
                track_count: 0,
                hint: None,
                last_error: None,
            })),
            worker: None,
        }
    }

    pub fn status(&self) -> SessionSnapshot {
        let locked = self.shared.lock().unwrap();
        SessionSnapshot {
            status: locked.status,
            current_step: locked.current_step,
            track_count: locked.track_count,
            hint: locked.hint.clone(),
            last_error: locked.last_error.clone(),
        }
    }

    /// Attempt to start a session for the given selection. Rejected with
    /// `Busy` (and the hint set) while a prior session is not Idle; on
    /// success the fetch and frame loop run on a spawned worker task.
    pub fn start(
        &mut self,
        selection: SatelliteSelection,
        observer: ObserverParameters,
    ) -> Result<(), AnimatorError> {
        {
            let mut locked = self.shared.lock().unwrap();
            if locked.status != SessionStatus::Idle {
                locked.hint = Some(BUSY_HINT.to_string());
                return Err(AnimatorError::Busy);
            }
            if selection.is_empty() {
                return Err(AnimatorError::EmptySelection);
            }
            locked.status = SessionStatus::Loading;
            locked.current_step = 0;
            locked.track_count = 0;
            locked.last_error = None;
        }

        // The previous session is Idle, so its worker has finished.
        drop(self.worker.take());

        let shared = self.shared.clone();
        let service = self.service.clone();
        let context = self.context.clone();
        let join = tokio::spawn(async move {
            let result = run_session(shared.clone(), service, context, selection, observer).await;

            if let Err(ref err) = result {
                log::error!("animation session failed: {err}");
                let mut locked = shared.lock().unwrap();
                locked.status = SessionStatus::Idle;
                locked.hint = None;
                locked.last_error = Some(err.to_string());
            }

            result
        });
        self.worker = Some(join);

        Ok(())
    }
}

async fn run_session<S: PositionService>(
    shared: Arc<Mutex<Shared>>,
    service: Arc<S>,
    mut context: RenderContext,
    selection: SatelliteSelection,
    observer: ObserverParameters,
) -> Result<(), AnimatorError> {
    let tracks = fetch_tracks(service.as_ref(), &selection, observer).await?;

    // Only the first track's series is checked up front; an empty series
    // further down shows up as skipped markers mid-animation.
    let total = match tracks.first() {
        Some(first) if first.samples.is_empty() => return Err(AnimatorError::NoPositionData),
        Some(first) => first.samples.len(),
        None => return Err(AnimatorError::EmptySelection),
    };

    {
        let mut locked = shared.lock().unwrap();
        locked.status = SessionStatus::Drawing;
        locked.current_step = 0;
        locked.track_count = tracks.len();
    }
    log::info!(
        "drawing {} track(s), {} samples at stride {}",
        tracks.len(),
        total,
        STEP_STRIDE
    );

    run_frame_loop(&shared, &mut context, &tracks, total).await;

    let mut locked = shared.lock().unwrap();
    locked.status = SessionStatus::Idle;
    locked.hint = None;
    Ok(())
}

async fn run_frame_loop(
    shared: &Arc<Mutex<Shared>>,
    context: &mut RenderContext,
    tracks: &[SatelliteTrack],
    total: usize,
) {
    let playback_origin = Utc::now();
    let loop_started = tokio::time::Instant::now();
    let mut clock = FrameClock::new(FRAME_INTERVAL);
    let mut step = 0usize;

    loop {
        clock.tick().await;

        let elapsed_ms = if step == 0 {
            0
        } else {
            loop_started.elapsed().as_millis() as i64
        };
        let logical_time =
            playback_origin + chrono::Duration::milliseconds(TIME_ACCELERATION * elapsed_ms);

        context.overlay.clear();
        frame::draw_timestamp(&mut context.overlay, logical_time);

        if step >= total {
            break;
        }

        {
            let mut colors = context.colors.lock().unwrap();
            for track in tracks {
                if let Some(sample) = track.samples.get(step) {
                    let color = colors.color_for(track.satellite_id);
                    frame::draw_marker(&mut context.overlay, &context.projection, color, track, sample);
                }
            }
        }

        step += STEP_STRIDE;
        shared.lock().unwrap().current_step = step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::positions::testing::FakeService;
    use crate::render::DrawOp;

    fn observer() -> ObserverParameters {
        ObserverParameters {
            latitude_deg: 37.77,
            longitude_deg: -122.41,
            elevation_m: 30.0,
            duration_min: 10,
        }
    }

    fn animator_for(service: FakeService) -> (Animator<FakeService>, SharedSurface) {
        let overlay = SharedSurface::new(960.0, 600.0);
        let context = RenderContext::new(Arc::new(Projection::default()), overlay.clone());
        (Animator::new(Arc::new(service), context), overlay)
    }

    async fn settle() {
        for _ in 0..50 {
            tokio::task::yield_now().await;
        }
    }

    async fn wait_for_status(animator: &Animator<FakeService>, wanted: SessionStatus) {
        for _ in 0..1000 {
            if animator.status().status == wanted {
                // Let the worker run up to its next timer wait so the
                // first frame of the new state is painted.
                settle().await;
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("never reached {wanted:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn two_satellite_scenario_plays_back_and_returns_to_idle() {
        let service = FakeService::new()
            .with_track(25544, "SPACE STATION", 5)
            .with_track(43205, "STARLINK-1", 5);
        let (mut animator, overlay) = animator_for(service);

        animator.start(vec![25544, 43205], observer()).unwrap();
        wait_for_status(&animator, SessionStatus::Drawing).await;

        let snapshot = animator.status();
        assert_eq!(snapshot.track_count, 2);
        assert_eq!(snapshot.current_step, STEP_STRIDE);

        // First frame: cleared overlay, timestamp, at most two markers
        // (circle + label each).
        let ops = overlay.snapshot();
        assert_eq!(ops[0], DrawOp::Clear);
        assert!(matches!(ops[1], DrawOp::FillText { .. }));
        let circles = ops
            .iter()
            .filter(|op| matches!(op, DrawOp::FillCircle { .. }))
            .count();
        assert_eq!(circles, 2);

        animator.worker.take().unwrap().await.unwrap().unwrap();

        let done = animator.status();
        assert_eq!(done.status, SessionStatus::Idle);
        assert!(done.hint.is_none());
        // Terminal tick clears the overlay one last time; only the
        // timestamp remains.
        let final_ops = overlay.snapshot();
        assert_eq!(final_ops[0], DrawOp::Clear);
        assert_eq!(final_ops.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn step_index_strictly_increases_until_past_sample_count() {
        let service = FakeService::new().with_track(25544, "SPACE STATION", 121);
        let (mut animator, _overlay) = animator_for(service);

        animator.start(vec![25544], observer()).unwrap();
        wait_for_status(&animator, SessionStatus::Drawing).await;

        let mut seen = vec![animator.status().current_step];
        while animator.status().status == SessionStatus::Drawing {
            tokio::time::advance(FRAME_INTERVAL).await;
            settle().await;
            let step = animator.status().current_step;
            if step != *seen.last().unwrap() {
                seen.push(step);
            }
        }

        assert_eq!(seen, vec![60, 120, 180]);
        assert_eq!(animator.status().status, SessionStatus::Idle);
        animator.worker.take().unwrap().await.unwrap().unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn request_while_loading_is_rejected_with_hint() {
        let (service, gate) = FakeService::new()
            .with_track(25544, "SPACE STATION", 5)
            .gated();
        let (mut animator, _overlay) = animator_for(service);

        animator.start(vec![25544], observer()).unwrap();
        settle().await;
        assert_eq!(animator.status().status, SessionStatus::Loading);

        let rejected = animator.start(vec![43205], observer());
        assert!(matches!(rejected, Err(AnimatorError::Busy)));
        let snapshot = animator.status();
        assert_eq!(snapshot.status, SessionStatus::Loading);
        assert!(snapshot.hint.is_some());

        gate.add_permits(1);
        animator.worker.take().unwrap().await.unwrap().unwrap();
        let done = animator.status();
        assert_eq!(done.status, SessionStatus::Idle);
        assert!(done.hint.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn request_while_drawing_leaves_session_unchanged() {
        let service = FakeService::new().with_track(25544, "SPACE STATION", 601);
        let (mut animator, _overlay) = animator_for(service);

        animator.start(vec![25544], observer()).unwrap();
        wait_for_status(&animator, SessionStatus::Drawing).await;
        let before = animator.status();

        let rejected = animator.start(vec![43205], observer());
        assert!(matches!(rejected, Err(AnimatorError::Busy)));

        let after = animator.status();
        assert_eq!(after.status, SessionStatus::Drawing);
        assert_eq!(after.current_step, before.current_step);
        assert_eq!(after.track_count, before.track_count);
        assert_eq!(after.hint.as_deref(), Some(BUSY_HINT));

        animator.worker.take().unwrap().await.unwrap().unwrap();
        assert!(animator.status().hint.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_position_series_fails_before_any_frame() {
        let service = FakeService::new().with_empty_track(12345, "DEAD-SAT");
        let (mut animator, overlay) = animator_for(service);

        animator.start(vec![12345], observer()).unwrap();
        let result = animator.worker.take().unwrap().await.unwrap();
        assert!(matches!(result, Err(AnimatorError::NoPositionData)));

        let snapshot = animator.status();
        assert_eq!(snapshot.status, SessionStatus::Idle);
        assert_eq!(snapshot.last_error.as_deref(), Some("no position data"));
        assert!(overlay.snapshot().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_failure_returns_to_idle_without_drawing() {
        let service = FakeService::new()
            .with_track(25544, "SPACE STATION", 5)
            .with_failure(43205);
        let (mut animator, overlay) = animator_for(service);

        animator.start(vec![25544, 43205], observer()).unwrap();
        let result = animator.worker.take().unwrap().await.unwrap();
        assert!(matches!(result, Err(AnimatorError::Fetch(_))));

        let snapshot = animator.status();
        assert_eq!(snapshot.status, SessionStatus::Idle);
        assert!(snapshot.last_error.is_some());
        assert!(overlay.snapshot().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_selection_is_a_distinct_failure() {
        let (mut animator, _overlay) = animator_for(FakeService::new());
        let result = animator.start(Vec::new(), observer());
        assert!(matches!(result, Err(AnimatorError::EmptySelection)));
        assert_eq!(animator.status().status, SessionStatus::Idle);
        assert!(animator.worker.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn colors_stay_stable_across_sessions() {
        let service = FakeService::new().with_track(25544, "SPACE STATION", 5);
        let (mut animator, overlay) = animator_for(service);

        let first_color = |ops: &[DrawOp]| {
            ops.iter()
                .find_map(|op| match op {
                    DrawOp::FillCircle { color, .. } => Some(color.clone()),
                    _ => None,
                })
                .expect("no marker drawn")
        };

        animator.start(vec![25544], observer()).unwrap();
        wait_for_status(&animator, SessionStatus::Drawing).await;
        let color_one = first_color(&overlay.snapshot());
        animator.worker.take().unwrap().await.unwrap().unwrap();

        animator.start(vec![25544], observer()).unwrap();
        wait_for_status(&animator, SessionStatus::Drawing).await;
        let color_two = first_color(&overlay.snapshot());
        animator.worker.take().unwrap().await.unwrap().unwrap();

        assert_eq!(color_one, color_two);
    }
}
