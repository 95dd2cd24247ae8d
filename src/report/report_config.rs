use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub title: String,
    /// Longest side of the embedded thumbnail, in pixels.
    pub thumbnail_size: u32,
    pub jpeg_quality: u8,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: "EcoSortAI - Waste Classification Report".to_string(),
            thumbnail_size: 600,
            jpeg_quality: 85,
        }
    }
}
