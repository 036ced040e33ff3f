use std::path::PathBuf;

/// Icon used for codes missing from the table.
pub const DEFAULT_ICON: &str = "01d";

/// Map a WMO weather code to an icon id; unmapped codes fall back to clear sky.
pub fn icon_for_code(code: Option<i64>) -> &'static str {
    match code {
        Some(0) => "01d",
        Some(1) => "02d",
        Some(2) => "03d",
        Some(3) => "04d",
        // Fog
        Some(45 | 48) => "50d",
        // Drizzle, including freezing drizzle
        Some(51 | 53 | 55 | 56 | 57) => "09d",
        Some(61 | 63 | 65) => "10d",
        // Freezing rain
        Some(66 | 67) => "13d",
        Some(71 | 73 | 75 | 77) => "13d",
        // Rain showers
        Some(80..=82) => "09d",
        // Snow showers
        Some(85 | 86) => "13d",
        Some(95 | 96 | 99) => "11d",
        _ => DEFAULT_ICON,
    }
}

/// Resolves icon files under the plugin's asset directory.
#[derive(Debug, Clone)]
pub struct IconSet {
    root: PathBuf,
}

impl IconSet {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of `icons/<file>` as a display string for the template.
    pub fn path(&self, file: &str) -> String {
        self.root.join("icons").join(file).display().to_string()
    }

    pub fn weather(&self, code: Option<i64>) -> String {
        self.path(&format!("{}.png", icon_for_code(code)))
    }
}
