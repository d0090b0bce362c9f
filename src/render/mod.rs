mod basemap;
mod color;
mod surface;

pub use basemap::render_base_map;
pub use color::{ColorAssigner, PALETTE};
pub use surface::{DrawOp, RecordingSurface, SharedSurface, Surface};
