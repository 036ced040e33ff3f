use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    error::WeatherError,
    model::{AirQualityResponse, Coordinates, ForecastResponse},
};

use super::WeatherSource;

pub const FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const AIR_QUALITY_URL: &str = "https://air-quality-api.open-meteo.com/v1/air-quality";

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,precipitation,rain,\
                              wind_speed_10m,wind_direction_10m,pressure_msl";
const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,sunrise,sunset,weathercode,uv_index_max";
const HOURLY_FIELDS: &str = "temperature_2m,rain";

/// Forecast request URL for `coords` against `base`.
pub fn forecast_url(base: &str, coords: Coordinates) -> String {
    format!(
        "{base}?latitude={}&longitude={}&current={CURRENT_FIELDS}&daily={DAILY_FIELDS}\
         &hourly={HOURLY_FIELDS}&timezone=auto",
        coords.latitude, coords.longitude,
    )
}

/// Air-quality request URL for `coords` against `base`.
pub fn air_quality_url(base: &str, coords: Coordinates) -> String {
    format!(
        "{base}?latitude={}&longitude={}&hourly=european_aqi&timezone=auto",
        coords.latitude, coords.longitude,
    )
}

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    forecast_base: String,
    air_quality_base: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(forecast_base: impl Into<String>, air_quality_base: impl Into<String>) -> Self {
        Self {
            forecast_base: forecast_base.into(),
            air_quality_base: air_quality_base.into(),
            http: Client::new(),
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        what: &'static str,
    ) -> Result<T, WeatherError> {
        log::debug!("GET {url}");

        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| WeatherError::Request { what, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Request { what, source })?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                what,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| WeatherError::Decode { what, source })
    }
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new(FORECAST_URL, AIR_QUALITY_URL)
    }
}

#[async_trait]
impl WeatherSource for OpenMeteoProvider {
    async fn fetch_forecast(&self, coords: Coordinates) -> Result<ForecastResponse, WeatherError> {
        let url = forecast_url(&self.forecast_base, coords);
        self.get_json(&url, "weather").await.inspect_err(|e| {
            log::error!("{e}");
        })
    }

    async fn fetch_air_quality(&self, coords: Coordinates) -> Option<AirQualityResponse> {
        let url = air_quality_url(&self.air_quality_base, coords);
        match self.get_json(&url, "air quality").await {
            Ok(aq) => Some(aq),
            Err(e) => {
                log::error!("{e}");
                None
            }
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let cut = (0..=MAX).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
