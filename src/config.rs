use serde::Deserialize;
use thiserror::Error;

use crate::geo::ProjectionConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    pub positions: PositionServiceConfig,
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub projection: ProjectionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        WebConfig {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct PositionServiceConfig {
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_geometry_url")]
    pub geometry_url: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            geometry_url: default_geometry_url(),
        }
    }
}

fn default_geometry_url() -> String {
    "https://raw.githubusercontent.com/nvkelso/natural-earth-vector/master/geojson/ne_110m_land.geojson"
        .to_string()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
