/// Generator for the reference grid of meridians and parallels.
///
/// The grid is produced locally rather than fetched: 10 degree spacing,
/// meridians clipped to 80 degrees of latitude except the antimeridian
/// pair, which runs pole to pole as part of the outline.
#[derive(Debug, Clone, Copy)]
pub struct Graticule {
    step_deg: f64,
    lat_limit_deg: f64,
    sample_deg: f64,
}

impl Default for Graticule {
    fn default() -> Self {
        Graticule {
            step_deg: 10.0,
            lat_limit_deg: 80.0,
            sample_deg: 2.5,
        }
    }
}

impl Graticule {
    /// All meridians and parallels, each as a geographic polyline.
    pub fn lines(&self) -> Vec<Vec<(f64, f64)>> {
        let mut lines = Vec::new();
        let mut lon = -180.0 + self.step_deg;
        while lon < 180.0 - 1e-9 {
            lines.push(self.meridian(lon));
            lon += self.step_deg;
        }
        let mut lat = -self.lat_limit_deg;
        while lat <= self.lat_limit_deg + 1e-9 {
            lines.push(self.parallel(lat));
            lat += self.step_deg;
        }
        lines
    }

    /// The sphere boundary: the antimeridian traced up one side and down
    /// the other, closing on itself.
    pub fn outline(&self) -> Vec<(f64, f64)> {
        let mut ring = Vec::new();
        let mut lat = -90.0;
        while lat <= 90.0 + 1e-9 {
            ring.push((-180.0, lat));
            lat += self.sample_deg;
        }
        let mut lat = 90.0;
        while lat >= -90.0 - 1e-9 {
            ring.push((180.0, lat));
            lat -= self.sample_deg;
        }
        ring.push((-180.0, -90.0));
        ring
    }

    fn meridian(&self, lon: f64) -> Vec<(f64, f64)> {
        let mut line = Vec::new();
        let mut lat = -self.lat_limit_deg;
        while lat <= self.lat_limit_deg + 1e-9 {
            line.push((lon, lat));
            lat += self.sample_deg;
        }
        line
    }

    fn parallel(&self, lat: f64) -> Vec<(f64, f64)> {
        let mut line = Vec::new();
        let mut lon = -180.0;
        while lon <= 180.0 + 1e-9 {
            line.push((lon, lat));
            lon += self.sample_deg;
        }
        line
    }
}
