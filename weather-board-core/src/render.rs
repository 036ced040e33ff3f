use serde::Serialize;

use crate::{config::PluginSettings, model::TemplateFields};

pub const TEMPLATE: &str = "weather.html";
pub const STYLESHEET: &str = "weather.css";

/// Everything the template sees: the presented fields plus the raw settings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateParams {
    #[serde(flatten)]
    pub fields: TemplateFields,
    pub plugin_settings: PluginSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderRequest {
    pub dimensions: (u32, u32),
    pub template: &'static str,
    pub stylesheet: &'static str,
    pub params: TemplateParams,
}

/// External HTML/CSS renderer. `None` means no image was produced.
pub trait Renderer {
    fn render(&self, request: &RenderRequest) -> Option<Vec<u8>>;
}
