mod animator;
mod error;
mod frame;

pub use animator::{Animator, RenderContext, SessionSnapshot, SessionStatus};
pub use error::AnimatorError;
pub use frame::{FRAME_INTERVAL, MARKER_RADIUS, STEP_STRIDE, TIME_ACCELERATION};
