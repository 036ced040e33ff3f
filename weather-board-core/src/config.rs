use anyhow::{Context, Result, anyhow};
use chrono_tz::Tz;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{
    error::WeatherError,
    model::Coordinates,
    provider::openmeteo::{AIR_QUALITY_URL, FORECAST_URL},
};

/// Per-plugin settings entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PluginSettings {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl PluginSettings {
    /// Both coordinates, or `MissingCoordinates` if either is absent.
    pub fn coordinates(&self) -> Result<Coordinates, WeatherError> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Ok(Coordinates {
                latitude,
                longitude,
            }),
            _ => Err(WeatherError::MissingCoordinates),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Display device the image is rendered for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Native (width, height) in pixels.
    pub resolution: (u32, u32),
    pub orientation: Orientation,
    /// Used only when the forecast does not name a timezone.
    pub timezone: Option<String>,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            resolution: (800, 480),
            orientation: Orientation::Horizontal,
            timezone: None,
        }
    }
}

impl DeviceConfig {
    /// Render dimensions, swapped for a vertical display.
    pub fn dimensions(&self) -> (u32, u32) {
        let (w, h) = self.resolution;
        match self.orientation {
            Orientation::Horizontal => (w, h),
            Orientation::Vertical => (h, w),
        }
    }

    /// Timezone reported by the API, else the device's, else UTC.
    pub fn resolve_timezone(&self, reported: Option<&str>) -> Result<Tz, WeatherError> {
        let name = reported.or(self.timezone.as_deref()).unwrap_or("UTC");
        name.parse::<Tz>()
            .map_err(|_| WeatherError::UnknownTimezone(name.to_string()))
    }
}

/// Open-Meteo endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub forecast_url: String,
    pub air_quality_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            forecast_url: FORECAST_URL.to_string(),
            air_quality_url: AIR_QUALITY_URL.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// icon_dir = "/usr/share/weather-board"
///
/// [settings]
/// latitude = 52.52
/// longitude = 13.41
///
/// [device]
/// resolution = [800, 480]
/// orientation = "vertical"
/// timezone = "Europe/Berlin"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the `icons/` assets.
    pub icon_dir: PathBuf,
    pub settings: PluginSettings,
    pub device: DeviceConfig,
    pub api: ApiConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            icon_dir: PathBuf::from("."),
            settings: PluginSettings::default(),
            device: DeviceConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-board", "weather-board")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_require_both_values() {
        let mut settings = PluginSettings::default();
        assert!(matches!(
            settings.coordinates(),
            Err(WeatherError::MissingCoordinates)
        ));

        settings.latitude = Some(52.52);
        assert!(settings.coordinates().is_err());

        settings.longitude = Some(0.0);
        let coords = settings.coordinates().expect("both coordinates set");
        assert_eq!(coords.latitude, 52.52);
        assert_eq!(coords.longitude, 0.0);
    }

    #[test]
    fn vertical_orientation_swaps_dimensions() {
        let mut device = DeviceConfig::default();
        assert_eq!(device.dimensions(), (800, 480));

        device.orientation = Orientation::Vertical;
        assert_eq!(device.dimensions(), (480, 800));
    }

    #[test]
    fn timezone_prefers_reported_then_device_then_utc() {
        let mut device = DeviceConfig::default();
        assert_eq!(device.resolve_timezone(None).unwrap(), chrono_tz::UTC);

        device.timezone = Some("Europe/Paris".into());
        assert_eq!(device.resolve_timezone(None).unwrap(), chrono_tz::Europe::Paris);
        assert_eq!(
            device.resolve_timezone(Some("Asia/Tokyo")).unwrap(),
            chrono_tz::Asia::Tokyo
        );

        let err = device.resolve_timezone(Some("Mars/Olympus")).unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let cfg = Config::from_toml(
            r#"
            [settings]
            latitude = 52.52
            longitude = 13.41

            [device]
            orientation = "vertical"
            "#,
        )
        .expect("valid config");

        assert_eq!(cfg.settings.latitude, Some(52.52));
        assert_eq!(cfg.device.orientation, Orientation::Vertical);
        assert_eq!(cfg.device.resolution, (800, 480));
        assert_eq!(cfg.api, ApiConfig::default());
    }

    #[test]
    fn toml_roundtrip_keeps_settings() {
        let mut cfg = Config::default();
        cfg.settings.latitude = Some(-33.87);
        cfg.settings.longitude = Some(151.21);
        cfg.device.timezone = Some("Australia/Sydney".into());

        let text = toml::to_string_pretty(&cfg).expect("serializable");
        let back = Config::from_toml(&text).expect("parsable");
        assert_eq!(back, cfg);
    }
}
