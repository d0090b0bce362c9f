mod geometry;
mod graticule;
mod projection;

pub use geometry::{fetch_geometry, MapError, MapGeometry};
pub use graticule::Graticule;
pub use projection::{Projection, ProjectionConfig};
