use std::sync::{Arc, Mutex};

use serde::Serialize;

/// A single drawing primitive, serializable so the UI collaborator can
/// replay a surface's contents onto a real canvas.
#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    Clear,
    FillPolygon {
        rings: Vec<Vec<[f64; 2]>>,
        color: String,
        alpha: f64,
    },
    StrokePath {
        points: Vec<[f64; 2]>,
        color: String,
        width: f64,
    },
    FillCircle {
        x: f64,
        y: f64,
        radius: f64,
        color: String,
    },
    FillText {
        text: String,
        x: f64,
        y: f64,
        color: String,
        font: String,
    },
}

/// An opaque 2D paint target. The animator and the base-map renderer only
/// ever see these primitives; what backs them is the caller's business.
pub trait Surface: Send {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn clear(&mut self);
    fn fill_polygon(&mut self, rings: &[Vec<[f64; 2]>], color: &str, alpha: f64);
    fn stroke_path(&mut self, points: &[[f64; 2]], color: &str, width: f64);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str);
    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: &str, font: &str);
}

/// Surface that records its operations instead of rasterizing them.
/// A snapshot of the op list is what the web layer hands to the UI.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        RecordingSurface {
            width,
            height,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn snapshot(&self) -> Vec<DrawOp> {
        self.ops.clone()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
    }

    fn fill_polygon(&mut self, rings: &[Vec<[f64; 2]>], color: &str, alpha: f64) {
        self.ops.push(DrawOp::FillPolygon {
            rings: rings.to_vec(),
            color: color.to_string(),
            alpha,
        });
    }

    fn stroke_path(&mut self, points: &[[f64; 2]], color: &str, width: f64) {
        self.ops.push(DrawOp::StrokePath {
            points: points.to_vec(),
            color: color.to_string(),
            width,
        });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str) {
        self.ops.push(DrawOp::FillCircle {
            x,
            y,
            radius,
            color: color.to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: &str, font: &str) {
        self.ops.push(DrawOp::FillText {
            text: text.to_string(),
            x,
            y,
            color: color.to_string(),
            font: font.to_string(),
        });
    }
}

/// Handle to a recording surface shared between the frame loop (which
/// paints) and the web layer (which snapshots). Clones refer to the same
/// surface.
#[derive(Clone, Default)]
pub struct SharedSurface {
    inner: Arc<Mutex<RecordingSurface>>,
}

impl SharedSurface {
    pub fn new(width: f64, height: f64) -> Self {
        SharedSurface {
            inner: Arc::new(Mutex::new(RecordingSurface::new(width, height))),
        }
    }

    pub fn snapshot(&self) -> Vec<DrawOp> {
        self.inner.lock().unwrap().snapshot()
    }
}

impl Surface for SharedSurface {
    fn width(&self) -> f64 {
        self.inner.lock().unwrap().width()
    }

    fn height(&self) -> f64 {
        self.inner.lock().unwrap().height()
    }

    fn clear(&mut self) {
        self.inner.lock().unwrap().clear();
    }

    fn fill_polygon(&mut self, rings: &[Vec<[f64; 2]>], color: &str, alpha: f64) {
        self.inner.lock().unwrap().fill_polygon(rings, color, alpha);
    }

    fn stroke_path(&mut self, points: &[[f64; 2]], color: &str, width: f64) {
        self.inner.lock().unwrap().stroke_path(points, color, width);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: &str) {
        self.inner.lock().unwrap().fill_circle(x, y, radius, color);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64, color: &str, font: &str) {
        self.inner
            .lock()
            .unwrap()
            .fill_text(text, x, y, color, font);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_operations_in_order() {
        let mut surface = RecordingSurface::new(960.0, 600.0);
        surface.fill_circle(1.0, 2.0, 4.0, "#1f77b4");
        surface.fill_text("25544", 1.0, 16.0, "#1f77b4", "bold 11px sans-serif");
        assert_eq!(surface.ops().len(), 2);
        assert!(matches!(surface.ops()[0], DrawOp::FillCircle { .. }));
        assert!(matches!(surface.ops()[1], DrawOp::FillText { .. }));
    }

    #[test]
    fn clear_resets_to_a_single_clear_op() {
        let mut surface = RecordingSurface::new(960.0, 600.0);
        surface.fill_circle(1.0, 2.0, 4.0, "#1f77b4");
        surface.clear();
        assert_eq!(surface.ops(), &[DrawOp::Clear]);
    }

    #[test]
    fn shared_clones_see_the_same_ops() {
        let mut surface = SharedSurface::new(960.0, 600.0);
        let reader = surface.clone();
        surface.fill_circle(3.0, 4.0, 4.0, "#ff7f0e");
        assert_eq!(reader.snapshot().len(), 1);
    }
}
