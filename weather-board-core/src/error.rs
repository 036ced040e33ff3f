use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced by the weather board pipeline.
///
/// Air-quality problems never show up here: the fetcher and presenter
/// recover from them locally and simply omit the data point.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Latitude and Longitude are required.")]
    MissingCoordinates,

    #[error("Failed to fetch {what} data: request error")]
    Request {
        what: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to fetch {what} data: status {status}: {body}")]
    Status {
        what: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Failed to parse {what} JSON")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown timezone '{0}'")]
    UnknownTimezone(String),

    #[error("Invalid timestamp '{0}'")]
    InvalidTimestamp(String),

    #[error("Response is missing {field}[{index}]")]
    MissingData { field: &'static str, index: usize },

    #[error("Failed to take screenshot, please check logs.")]
    Render,
}

impl WeatherError {
    pub(crate) fn missing(field: &'static str, index: usize) -> Self {
        WeatherError::MissingData { field, index }
    }
}
