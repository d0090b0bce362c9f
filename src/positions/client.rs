use std::future::Future;

use super::error::FetchError;
use super::types::{NearbyResponse, ObserverParameters, PositionsResponse};

/// The external position service, abstracted so tests can substitute an
/// in-memory fake. Implementations must return `Send` futures; responses
/// resume on the engine's runtime.
pub trait PositionService: Send + Sync + 'static {
    /// One position series for one satellite over the observer's horizon.
    fn positions(
        &self,
        satellite_id: u32,
        observer: ObserverParameters,
    ) -> impl Future<Output = Result<PositionsResponse, FetchError>> + Send;

    /// Satellites currently above the observer, for the selection UI.
    fn nearby(
        &self,
        observer: ObserverParameters,
        search_radius_deg: u32,
        category: u32,
    ) -> impl Future<Output = Result<NearbyResponse, FetchError>> + Send;
}

/// HTTP client for the N2YO-style REST position service.
#[derive(Debug, Clone)]
pub struct HttpPositionService {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpPositionService {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        HttpPositionService {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: String) -> Result<T, FetchError> {
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.json::<T>().await?)
    }
}

impl PositionService for HttpPositionService {
    async fn positions(
        &self,
        satellite_id: u32,
        observer: ObserverParameters,
    ) -> Result<PositionsResponse, FetchError> {
        let url = format!(
            "{}/positions/{}/{}/{}/{}/{}/&apiKey={}",
            self.base_url,
            satellite_id,
            observer.latitude_deg,
            observer.longitude_deg,
            observer.elevation_m,
            observer.horizon_seconds(),
            self.api_key,
        );
        log::debug!("fetching positions for satellite {satellite_id}");
        self.get_json(url).await
    }

    async fn nearby(
        &self,
        observer: ObserverParameters,
        search_radius_deg: u32,
        category: u32,
    ) -> Result<NearbyResponse, FetchError> {
        let url = format!(
            "{}/above/{}/{}/{}/{}/{}/&apiKey={}",
            self.base_url,
            observer.latitude_deg,
            observer.longitude_deg,
            observer.elevation_m,
            search_radius_deg,
            category,
            self.api_key,
        );
        log::debug!("fetching nearby satellites (radius {search_radius_deg}, category {category})");
        self.get_json(url).await
    }
}
