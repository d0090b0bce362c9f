use crate::geo::{Graticule, MapGeometry, Projection};
use crate::render::surface::Surface;

const LAND_FILL: &str = "#B3DDEF";
const LAND_STROKE: &str = "#000";
const LAND_ALPHA: f64 = 0.7;
const GRID_STROKE: &str = "rgba(220, 220, 220, 0.1)";
const GRID_WIDTH: f64 = 0.1;
const OUTLINE_WIDTH: f64 = 0.5;

/// Paint the static world geometry onto the base surface.
///
/// Runs once per geometry load; the base surface is never cleared or
/// repainted afterward. Markers drawn later must go through the same
/// `Projection` instance passed here, otherwise they drift off the land
/// beneath them.
pub fn render_base_map(geometry: &MapGeometry, projection: &Projection, surface: &mut dyn Surface) {
    for polygon in &geometry.land {
        let rings: Vec<Vec<[f64; 2]>> = polygon
            .iter()
            .map(|ring| projection.project_line(ring))
            .collect();
        surface.fill_polygon(&rings, LAND_FILL, LAND_ALPHA);
        for ring in &rings {
            surface.stroke_path(ring, LAND_STROKE, 1.0);
        }
    }

    let graticule = Graticule::default();
    for line in graticule.lines() {
        surface.stroke_path(&projection.project_line(&line), GRID_STROKE, GRID_WIDTH);
    }
    surface.stroke_path(
        &projection.project_line(&graticule.outline()),
        GRID_STROKE,
        OUTLINE_WIDTH,
    );
}
