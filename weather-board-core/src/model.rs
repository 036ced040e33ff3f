use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::WeatherError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Open-Meteo `/v1/forecast` response, restricted to the fields we request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub timezone: Option<String>,
    pub current: CurrentConditions,
    pub daily: DailySeries,
    pub hourly: HourlySeries,
}

/// Values shown as-is stay JSON numbers so `81` is not re-emitted as `81.0`.
/// Any value may be null in the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub time: String,
    pub temperature_2m: Option<f64>,
    pub relative_humidity_2m: Option<Number>,
    pub precipitation: Option<Number>,
    pub rain: Option<Number>,
    pub wind_speed_10m: Option<f64>,
    pub wind_direction_10m: Option<Number>,
    pub pressure_msl: Option<Number>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySeries {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub sunrise: Vec<String>,
    pub sunset: Vec<String>,
    pub weathercode: Vec<Option<i64>>,
    pub uv_index_max: Vec<Option<Number>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub rain: Vec<Option<Number>>,
}

/// Open-Meteo `/v1/air-quality` response. Every level is optional so that a
/// partial payload still decodes and only the AQI extraction fails.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AirQualityResponse {
    #[serde(default)]
    pub hourly: Option<AirQualityHourly>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AirQualityHourly {
    #[serde(default)]
    pub european_aqi: Vec<Option<f64>>,
}

impl AirQualityResponse {
    /// First hourly European AQI value.
    pub fn first_european_aqi(&self) -> Result<f64, WeatherError> {
        self.hourly
            .as_ref()
            .and_then(|h| h.european_aqi.first().copied().flatten())
            .ok_or_else(|| WeatherError::missing("hourly.european_aqi", 0))
    }
}

/// Display-ready fields consumed by the weather template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateFields {
    pub current_date: String,
    pub location: String,
    pub current_temperature: String,
    pub feels_like: String,
    pub temperature_unit: String,
    pub units: String,
    pub current_day_icon: String,
    pub forecast: Vec<ForecastDay>,
    pub hourly_forecast: Vec<HourlyEntry>,
    pub data_points: Vec<DataPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastDay {
    pub day: String,
    pub high: i64,
    pub low: i64,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyEntry {
    pub time: String,
    pub temperature: i64,
    /// Key spelled the way existing weather templates read it.
    #[serde(rename = "precipitiation")]
    pub precipitation: Option<Number>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    pub label: String,
    pub measurement: Measurement,
    pub unit: String,
    pub icon: String,
}

/// A data point value, serialized as a bare JSON string, number or null.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Measurement {
    Text(String),
    Integer(i64),
    /// Raw API number, passed through untouched.
    Number(Number),
    Missing,
}

impl From<Option<Number>> for Measurement {
    fn from(value: Option<Number>) -> Self {
        value.map_or(Measurement::Missing, Measurement::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn first_aqi_reads_first_hour() {
        let aq: AirQualityResponse =
            serde_json::from_value(json!({"hourly": {"european_aqi": [33.0, 40.0]}})).unwrap();
        assert_eq!(aq.first_european_aqi().unwrap(), 33.0);
    }

    #[test]
    fn first_aqi_fails_on_missing_or_null() {
        let empty = AirQualityResponse::default();
        assert!(empty.first_european_aqi().is_err());

        let null: AirQualityResponse =
            serde_json::from_value(json!({"hourly": {"european_aqi": [null, 12.0]}})).unwrap();
        assert!(null.first_european_aqi().is_err());
    }

    #[test]
    fn measurement_serializes_untagged() {
        let values = vec![
            Measurement::Text("6:05".into()),
            Measurement::Integer(12),
            Measurement::Number(Number::from(81)),
            Measurement::Number(Number::from_f64(1013.2).unwrap()),
            Measurement::Missing,
        ];
        let out = serde_json::to_value(values).unwrap();
        assert_eq!(out, json!(["6:05", 12, 81, 1013.2, null]));
    }

    #[test]
    fn raw_current_values_keep_their_json_form() {
        let current: CurrentConditions = serde_json::from_value(json!({
            "time": "2024-01-05T14:15",
            "temperature_2m": null,
            "relative_humidity_2m": 81,
            "precipitation": 0.0,
            "rain": null,
            "wind_speed_10m": 12.6,
            "wind_direction_10m": 250,
            "pressure_msl": 1013
        }))
        .unwrap();

        assert_eq!(current.temperature_2m, None);
        assert_eq!(current.rain, None);
        let humidity = Measurement::from(current.relative_humidity_2m);
        assert_eq!(serde_json::to_string(&humidity).unwrap(), "81");
        let pressure = Measurement::from(current.pressure_msl);
        assert_eq!(serde_json::to_string(&pressure).unwrap(), "1013");
    }

    #[test]
    fn hourly_rain_uses_template_key() {
        let entry = HourlyEntry {
            time: "9 AM".into(),
            temperature: 1,
            precipitation: Some(Number::from_f64(0.2).unwrap()),
        };
        let out = serde_json::to_value(entry).unwrap();
        assert_eq!(out["precipitiation"], json!(0.2));
        assert!(out.get("precipitation").is_none());
    }
}
