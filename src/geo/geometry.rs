use geojson::{GeoJson, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MapError {
    #[error("map request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("map document parse error: {0}")]
    Parse(#[from] geojson::Error),
    #[error("map document contains no land features")]
    NoLand,
}

/// A land polygon: one outer ring plus any holes, in geographic degrees.
pub type LandPolygon = Vec<Vec<(f64, f64)>>;

/// Immutable land geometry, loaded once at startup and never mutated.
#[derive(Debug, Clone, Default)]
pub struct MapGeometry {
    pub land: Vec<LandPolygon>,
}

impl MapGeometry {
    /// Parse a GeoJSON feature document into land polygons. Polygon and
    /// MultiPolygon geometries contribute; everything else is ignored.
    pub fn from_geojson(document: &str) -> Result<Self, MapError> {
        let parsed: GeoJson = document.parse()?;
        let mut land = Vec::new();
        match parsed {
            GeoJson::FeatureCollection(collection) => {
                for feature in collection.features {
                    if let Some(geometry) = feature.geometry {
                        collect_polygons(&geometry.value, &mut land);
                    }
                }
            }
            GeoJson::Feature(feature) => {
                if let Some(geometry) = feature.geometry {
                    collect_polygons(&geometry.value, &mut land);
                }
            }
            GeoJson::Geometry(geometry) => collect_polygons(&geometry.value, &mut land),
        }
        if land.is_empty() {
            return Err(MapError::NoLand);
        }
        Ok(MapGeometry { land })
    }
}

/// Fetch the land geometry document from the map service.
pub async fn fetch_geometry(
    client: &reqwest::Client,
    url: &str,
) -> Result<MapGeometry, MapError> {
    let response = client.get(url).send().await?.error_for_status()?;
    let body = response.text().await?;
    MapGeometry::from_geojson(&body)
}

fn collect_polygons(value: &Value, land: &mut Vec<LandPolygon>) {
    match value {
        Value::Polygon(rings) => land.push(convert_rings(rings)),
        Value::MultiPolygon(polygons) => {
            for rings in polygons {
                land.push(convert_rings(rings));
            }
        }
        Value::GeometryCollection(geometries) => {
            for geometry in geometries {
                collect_polygons(&geometry.value, land);
            }
        }
        _ => {}
    }
}

fn convert_rings(rings: &[Vec<Vec<f64>>]) -> LandPolygon {
    rings
        .iter()
        .map(|ring| {
            ring.iter()
                .filter(|position| position.len() >= 2)
                .map(|position| (position[0], position[1]))
                .collect()
        })
        .collect()
}
