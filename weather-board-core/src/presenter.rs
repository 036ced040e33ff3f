//! Shapes Open-Meteo responses into the flat fields the weather template reads.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone};
use chrono_tz::Tz;

use crate::{
    error::WeatherError,
    icons::IconSet,
    model::{
        AirQualityResponse, CurrentConditions, DailySeries, DataPoint, ForecastDay,
        ForecastResponse, HourlyEntry, HourlySeries, Measurement, TemplateFields,
    },
};

const FORECAST_DAYS: usize = 5;
const HOURLY_ENTRIES: usize = 24;

/// European AQI band, upper bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AqiBand {
    Good,
    Fair,
    Moderate,
    Poor,
    VeryPoor,
}

impl AqiBand {
    pub fn classify(aqi: f64) -> Self {
        if aqi <= 20.0 {
            AqiBand::Good
        } else if aqi <= 40.0 {
            AqiBand::Fair
        } else if aqi <= 60.0 {
            AqiBand::Moderate
        } else if aqi <= 80.0 {
            AqiBand::Poor
        } else {
            AqiBand::VeryPoor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AqiBand::Good => "Good",
            AqiBand::Fair => "Fair",
            AqiBand::Moderate => "Moderate",
            AqiBand::Poor => "Poor",
            AqiBand::VeryPoor => "Very Poor",
        }
    }
}

impl std::fmt::Display for AqiBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the template fields for one render.
pub fn present(
    forecast: &ForecastResponse,
    air_quality: Option<&AirQualityResponse>,
    tz: Tz,
    icons: &IconSet,
) -> Result<TemplateFields, WeatherError> {
    let current = &forecast.current;
    let daily = &forecast.daily;

    let now = parse_local(&current.time, tz)?;
    let today_code = *daily
        .weathercode
        .first()
        .ok_or_else(|| WeatherError::missing("daily.weathercode", 0))?;
    let temperature = current
        .temperature_2m
        .ok_or_else(|| WeatherError::missing("current.temperature_2m", 0))?;

    Ok(TemplateFields {
        current_date: now.format("%A, %B %d").to_string(),
        location: format!("{:.2}, {:.2}", forecast.latitude, forecast.longitude),
        current_temperature: round_half_even(temperature).to_string(),
        feels_like: "–".to_string(),
        temperature_unit: "°C".to_string(),
        units: "metric".to_string(),
        current_day_icon: icons.weather(today_code),
        forecast: forecast_days(daily, tz, icons)?,
        hourly_forecast: hourly_entries(&forecast.hourly, tz)?,
        data_points: data_points(current, daily, tz, air_quality, icons)?,
    })
}

fn forecast_days(
    daily: &DailySeries,
    tz: Tz,
    icons: &IconSet,
) -> Result<Vec<ForecastDay>, WeatherError> {
    let end = daily.time.len().min(FORECAST_DAYS + 1);

    (1..end)
        .map(|i| {
            let date = parse_local(&daily.time[i], tz)?;
            let high = value_at(&daily.temperature_2m_max, "daily.temperature_2m_max", i)?;
            let low = value_at(&daily.temperature_2m_min, "daily.temperature_2m_min", i)?;
            let code = *daily
                .weathercode
                .get(i)
                .ok_or_else(|| WeatherError::missing("daily.weathercode", i))?;

            Ok(ForecastDay {
                day: date.format("%a").to_string(),
                high: high.trunc() as i64,
                low: low.trunc() as i64,
                icon: icons.weather(code),
            })
        })
        .collect()
}

fn hourly_entries(hourly: &HourlySeries, tz: Tz) -> Result<Vec<HourlyEntry>, WeatherError> {
    (0..HOURLY_ENTRIES)
        .map(|i| {
            let time = hourly
                .time
                .get(i)
                .ok_or_else(|| WeatherError::missing("hourly.time", i))?;
            let temperature = value_at(&hourly.temperature_2m, "hourly.temperature_2m", i)?;
            let rain = hourly
                .rain
                .get(i)
                .cloned()
                .ok_or_else(|| WeatherError::missing("hourly.rain", i))?;

            Ok(HourlyEntry {
                time: parse_local(time, tz)?.format("%-I %p").to_string(),
                temperature: round_half_even(temperature),
                precipitation: rain,
            })
        })
        .collect()
}

fn data_points(
    current: &CurrentConditions,
    daily: &DailySeries,
    tz: Tz,
    air_quality: Option<&AirQualityResponse>,
    icons: &IconSet,
) -> Result<Vec<DataPoint>, WeatherError> {
    let sunrise = daily
        .sunrise
        .first()
        .ok_or_else(|| WeatherError::missing("daily.sunrise", 0))?;
    let sunset = daily
        .sunset
        .first()
        .ok_or_else(|| WeatherError::missing("daily.sunset", 0))?;
    let uv_index = daily
        .uv_index_max
        .first()
        .cloned()
        .ok_or_else(|| WeatherError::missing("daily.uv_index_max", 0))?;
    let wind = current
        .wind_speed_10m
        .ok_or_else(|| WeatherError::missing("current.wind_speed_10m", 0))?;

    let (sunrise_time, sunrise_period) = clock_parts(&parse_local(sunrise, tz)?);
    let (sunset_time, sunset_period) = clock_parts(&parse_local(sunset, tz)?);

    let mut points = vec![
        point(
            "Sunrise",
            Measurement::Text(sunrise_time),
            &sunrise_period,
            icons.path("sunrise.png"),
        ),
        point(
            "Sunset",
            Measurement::Text(sunset_time),
            &sunset_period,
            icons.path("sunset.png"),
        ),
        point(
            "Wind",
            Measurement::Integer(round_half_even(wind)),
            "km/h",
            icons.path("wind.png"),
        ),
        point(
            "Humidity",
            current.relative_humidity_2m.clone().into(),
            "%",
            icons.path("humidity.png"),
        ),
        point(
            "Pressure",
            current.pressure_msl.clone().into(),
            "hPa",
            icons.path("pressure.png"),
        ),
        point("UV Index", uv_index.into(), "", icons.path("uvi.png")),
        point("Rain", current.rain.clone().into(), "mm", icons.path("rain.png")),
    ];

    if let Some(aq) = air_quality {
        match aq.first_european_aqi() {
            Ok(aqi) => points.push(point(
                "Air Quality",
                Measurement::Integer(aqi.trunc() as i64),
                AqiBand::classify(aqi).as_str(),
                icons.path("aqi.png"),
            )),
            Err(e) => log::warn!("Failed to parse AQI: {e}"),
        }
    }

    Ok(points)
}

/// Value at `index` of a nullable series; absent or null is an error.
fn value_at(
    series: &[Option<f64>],
    field: &'static str,
    index: usize,
) -> Result<f64, WeatherError> {
    series
        .get(index)
        .copied()
        .flatten()
        .ok_or_else(|| WeatherError::missing(field, index))
}

fn point(label: &str, measurement: Measurement, unit: &str, icon: String) -> DataPoint {
    DataPoint {
        label: label.to_string(),
        measurement,
        unit: unit.to_string(),
        icon,
    }
}

/// "H:MM" without a leading zero, plus the AM/PM marker.
fn clock_parts(dt: &DateTime<Tz>) -> (String, String) {
    let hhmm = dt.format("%I:%M").to_string();
    (
        hhmm.trim_start_matches('0').to_string(),
        dt.format("%p").to_string(),
    )
}

/// Nearest integer, ties to even.
fn round_half_even(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Parse an Open-Meteo timestamp into the display timezone.
///
/// Values carrying an offset are converted; naive date-times and bare dates
/// are taken to already be local time in `tz`.
pub fn parse_local(value: &str, tz: Tz) -> Result<DateTime<Tz>, WeatherError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value)
        .or_else(|_| DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M%:z"))
    {
        return Ok(dt.with_timezone(&tz));
    }

    let naive = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .or_else(|_| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN))
        })
        .map_err(|_| WeatherError::InvalidTimestamp(value.to_string()))?;

    Ok(tz
        .from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| across_gap(naive, tz)))
}

/// A wall-clock time skipped by a DST jump, read with the offset in force
/// before the jump: 02:30 in a 02:00 -> 03:00 gap lands at 03:30.
fn across_gap(naive: NaiveDateTime, tz: Tz) -> DateTime<Tz> {
    let before = tz.offset_from_utc_datetime(&(naive - Duration::days(1)));
    let utc = naive - Duration::seconds(i64::from(before.fix().local_minus_utc()));
    tz.from_utc_datetime(&utc)
}
