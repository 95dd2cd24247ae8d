use crate::error::{EcoSortError, EcoSortResult};
use crate::image_classifier::models::model_config::ModelConfig;
use crate::image_preprocessor::input_spec::Normalization;
use crate::library::logger::interface::LogLevel;
use crate::report::report_config::ReportConfig;
use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GuidanceConfig {
    /// TOML guidance table; the built-in table is used when unset.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub utc_offset_seconds: i32,
    pub level: LogLevel,
}

impl LoggerConfig {
    pub fn timezone(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_seconds).unwrap_or_else(|| Utc.fix())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub model: ModelConfig,
    pub guidance: GuidanceConfig,
    pub report: ReportConfig,
    pub logger: LoggerConfig,
}

impl Config {
    pub fn load(path: &Path) -> EcoSortResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EcoSortError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> EcoSortResult<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| EcoSortError::Config(format!("invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EcoSortResult<()> {
        let input = &self.model.input;
        if input.width == 0 || input.height == 0 {
            return Err(EcoSortError::Config(format!(
                "model input must be at least 1x1, got {}x{}",
                input.width, input.height
            )));
        }
        if let Normalization::MeanStd { mean, std } = input.normalization {
            if mean.iter().any(|m| !m.is_finite()) {
                return Err(EcoSortError::Config(format!(
                    "normalization mean must be finite, got {:?}",
                    mean
                )));
            }
            if std.iter().any(|s| !s.is_finite() || *s <= 0.0) {
                return Err(EcoSortError::Config(format!(
                    "normalization std must be positive and finite, got {:?}",
                    std
                )));
            }
        }
        if FixedOffset::east_opt(self.logger.utc_offset_seconds).is_none() {
            return Err(EcoSortError::Config(format!(
                "utc_offset_seconds out of range: {}",
                self.logger.utc_offset_seconds
            )));
        }
        if self.report.thumbnail_size == 0 {
            return Err(EcoSortError::Config(
                "report thumbnail_size must be positive".to_string(),
            ));
        }
        if !(1..=100).contains(&self.report.jpeg_quality) {
            return Err(EcoSortError::Config(format!(
                "report jpeg_quality must be within 1..=100, got {}",
                self.report.jpeg_quality
            )));
        }
        Ok(())
    }
}
