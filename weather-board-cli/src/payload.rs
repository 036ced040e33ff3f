use weather_board_core::{RenderRequest, Renderer};

/// Serializes the render request as JSON for an out-of-process renderer.
#[derive(Debug, Default)]
pub struct PayloadRenderer;

impl Renderer for PayloadRenderer {
    fn render(&self, request: &RenderRequest) -> Option<Vec<u8>> {
        match serde_json::to_vec_pretty(request) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                log::error!("Failed to serialize render payload: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weather_board_core::{PluginSettings, TemplateFields, TemplateParams};

    #[test]
    fn payload_contains_dimensions_and_fields() {
        let request = RenderRequest {
            dimensions: (480, 800),
            template: "weather.html",
            stylesheet: "weather.css",
            params: TemplateParams {
                fields: TemplateFields {
                    current_date: "Friday, January 05".into(),
                    location: "52.52, 13.41".into(),
                    current_temperature: "2".into(),
                    feels_like: "–".into(),
                    temperature_unit: "°C".into(),
                    units: "metric".into(),
                    current_day_icon: "icons/10d.png".into(),
                    forecast: vec![],
                    hourly_forecast: vec![],
                    data_points: vec![],
                },
                plugin_settings: PluginSettings {
                    latitude: Some(52.52),
                    longitude: Some(13.41),
                },
            },
        };

        let bytes = PayloadRenderer.render(&request).expect("payload");
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["dimensions"], serde_json::json!([480, 800]));
        assert_eq!(value["template"], "weather.html");
        assert_eq!(value["params"]["location"], "52.52, 13.41");
        assert_eq!(value["params"]["plugin_settings"]["latitude"], 52.52);
    }
}
