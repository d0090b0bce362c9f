use std::f64::consts::PI;

use serde::Deserialize;

/// Kavrayskiy VII map projection with a fixed scale and center offset.
///
/// Exactly one instance is shared between the base-map renderer and the
/// animator so that markers land on the same pixels as the geography
/// beneath them.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    scale: f64,
    translate: (f64, f64),
    precision_px: f64,
}

/// Projection parameters as they appear in the configuration file.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ProjectionConfig {
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_precision")]
    pub precision_px: f64,
}

fn default_scale() -> f64 {
    170.0
}

fn default_width() -> f64 {
    960.0
}

fn default_height() -> f64 {
    600.0
}

fn default_precision() -> f64 {
    0.1
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        ProjectionConfig {
            scale: default_scale(),
            width: default_width(),
            height: default_height(),
            precision_px: default_precision(),
        }
    }
}

impl Projection {
    pub fn new(config: ProjectionConfig) -> Self {
        Projection {
            scale: config.scale,
            translate: (config.width / 2.0, config.height / 2.0),
            precision_px: config.precision_px,
        }
    }

    /// Project geographic degrees onto surface coordinates.
    pub fn project(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        let lambda = lon_deg.to_radians();
        let phi = lat_deg.to_radians();
        let ratio = phi / PI;
        let x = 1.5 * lambda * (1.0 / 3.0 - ratio * ratio).max(0.0).sqrt();
        let y = phi;
        (
            self.translate.0 + self.scale * x,
            self.translate.1 - self.scale * y,
        )
    }

    /// Project a geographic polyline, subdividing long segments until the
    /// projected midpoint deviation drops below the precision tolerance.
    /// Keeps curved parallels smooth without oversampling straight runs.
    pub fn project_line(&self, line: &[(f64, f64)]) -> Vec<[f64; 2]> {
        let mut out: Vec<[f64; 2]> = Vec::with_capacity(line.len());
        for window in line.windows(2) {
            let (a, b) = (window[0], window[1]);
            let pa = self.project(a.0, a.1);
            if out.is_empty() {
                out.push([pa.0, pa.1]);
            }
            self.subdivide(a, b, &mut out, 0);
        }
        if out.is_empty() {
            if let Some(&(lon, lat)) = line.first() {
                let p = self.project(lon, lat);
                out.push([p.0, p.1]);
            }
        }
        out
    }

    fn subdivide(&self, a: (f64, f64), b: (f64, f64), out: &mut Vec<[f64; 2]>, depth: u8) {
        const MAX_DEPTH: u8 = 8;
        let pa = self.project(a.0, a.1);
        let pb = self.project(b.0, b.1);
        let mid = ((a.0 + b.0) / 2.0, (a.1 + b.1) / 2.0);
        let pm = self.project(mid.0, mid.1);
        let chord_mid = ((pa.0 + pb.0) / 2.0, (pa.1 + pb.1) / 2.0);
        let deviation = ((pm.0 - chord_mid.0).powi(2) + (pm.1 - chord_mid.1).powi(2)).sqrt();
        if deviation > self.precision_px && depth < MAX_DEPTH {
            self.subdivide(a, mid, out, depth + 1);
            self.subdivide(mid, b, out, depth + 1);
        } else {
            out.push([pb.0, pb.1]);
        }
    }
}

impl Default for Projection {
    fn default() -> Self {
        Projection::new(ProjectionConfig::default())
    }
}
