//! Core library for the `weather-board` CLI.
//!
//! This crate defines:
//! - Configuration (plugin settings, device, endpoints)
//! - The Open-Meteo data source behind the `WeatherSource` trait
//! - The presenter shaping API responses into template fields
//! - The plugin pipeline handing those fields to an external renderer
//!
//! It is used by `weather-board-cli`, but can also be embedded in other hosts
//! that bring their own `Renderer`.

pub mod config;
pub mod error;
pub mod icons;
pub mod model;
pub mod plugin;
pub mod presenter;
pub mod provider;
pub mod render;

pub use config::{ApiConfig, Config, DeviceConfig, Orientation, PluginSettings};
pub use error::WeatherError;
pub use icons::IconSet;
pub use model::{
    AirQualityResponse, Coordinates, DataPoint, ForecastDay, ForecastResponse, HourlyEntry,
    Measurement, TemplateFields,
};
pub use plugin::WeatherPlugin;
pub use presenter::{AqiBand, present};
pub use provider::WeatherSource;
pub use render::{RenderRequest, Renderer, TemplateParams};
