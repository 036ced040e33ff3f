use crate::{
    config::{Config, DeviceConfig, PluginSettings},
    error::WeatherError,
    icons::IconSet,
    model::TemplateFields,
    presenter,
    provider::{self, WeatherSource},
    render::{RenderRequest, Renderer, STYLESHEET, TEMPLATE, TemplateParams},
};

/// The weather board: fetches, presents and hands off to a renderer.
#[derive(Debug)]
pub struct WeatherPlugin {
    source: Box<dyn WeatherSource>,
    icons: IconSet,
}

impl WeatherPlugin {
    pub fn new(source: Box<dyn WeatherSource>, icons: IconSet) -> Self {
        Self { source, icons }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            provider::source_from_config(&config.api),
            IconSet::new(config.icon_dir.clone()),
        )
    }

    /// Fetch both endpoints and build the template fields.
    ///
    /// Fails with `MissingCoordinates` before any request when either
    /// coordinate is absent.
    pub async fn template_fields(
        &self,
        settings: &PluginSettings,
        device: &DeviceConfig,
    ) -> Result<TemplateFields, WeatherError> {
        let coords = settings.coordinates()?;

        let forecast = self.source.fetch_forecast(coords).await?;
        let air_quality = self.source.fetch_air_quality(coords).await;

        let tz = device.resolve_timezone(forecast.timezone.as_deref())?;
        log::debug!(
            "presenting forecast for {}, {} in {tz}",
            coords.latitude,
            coords.longitude
        );

        presenter::present(&forecast, air_quality.as_ref(), tz, &self.icons)
    }

    /// Run the whole pipeline and return the rendered image bytes.
    pub async fn generate_image(
        &self,
        settings: &PluginSettings,
        device: &DeviceConfig,
        renderer: &dyn Renderer,
    ) -> Result<Vec<u8>, WeatherError> {
        let fields = self.template_fields(settings, device).await?;

        let request = RenderRequest {
            dimensions: device.dimensions(),
            template: TEMPLATE,
            stylesheet: STYLESHEET,
            params: TemplateParams {
                fields,
                plugin_settings: settings.clone(),
            },
        };

        renderer.render(&request).ok_or_else(|| {
            log::error!("renderer returned no image for {:?}", request.dimensions);
            WeatherError::Render
        })
    }
}
