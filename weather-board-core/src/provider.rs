use crate::{
    config::ApiConfig,
    error::WeatherError,
    model::{AirQualityResponse, Coordinates, ForecastResponse},
    provider::openmeteo::OpenMeteoProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openmeteo;

/// Where forecast and air-quality data come from.
#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    /// Forecast is required; any failure aborts the render.
    async fn fetch_forecast(&self, coords: Coordinates) -> Result<ForecastResponse, WeatherError>;

    /// Air quality is optional; failures are logged and yield `None`.
    async fn fetch_air_quality(&self, coords: Coordinates) -> Option<AirQualityResponse>;
}

/// Construct the Open-Meteo source from the configured endpoints.
pub fn source_from_config(api: &ApiConfig) -> Box<dyn WeatherSource> {
    Box::new(OpenMeteoProvider::new(
        api.forecast_url.clone(),
        api.air_quality_url.clone(),
    ))
}
