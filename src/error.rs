use crate::waste_label::WasteLabel;
use thiserror::Error;

pub type EcoSortResult<T> = Result<T, EcoSortError>;

#[derive(Error, Debug)]
pub enum EcoSortError {
    /// Input bytes could not be decoded, or decoded to an empty image.
    /// The caller should ask for another image.
    #[error("Invalid image: {message}")]
    InvalidImage {
        message: String,
        #[source]
        source: Option<image::ImageError>,
    },

    /// The model artifact is missing or does not match the label set.
    /// Fatal at startup.
    #[error("Could not load model at '{path}': {message}")]
    ModelLoad { path: String, message: String },

    /// The guidance table has no entry for a label. Fatal at startup.
    #[error("Missing guidance for label '{label}'")]
    MissingGuidance { label: WasteLabel },

    #[error("Failed to write report: {0}")]
    ReportWrite(#[source] std::io::Error),

    /// The classifier produced output that does not line up with the labels.
    #[error("Inference error: {0}")]
    Inference(String),

    #[error("Model is not loaded ({0})")]
    ModelNotLoaded(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EcoSortError {
    pub fn invalid_image(message: impl Into<String>) -> Self {
        Self::InvalidImage {
            message: message.into(),
            source: None,
        }
    }

    pub fn model_load(path: impl Into<String>, message: impl ToString) -> Self {
        Self::ModelLoad {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Errors after which the process must not serve requests.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ModelLoad { .. }
                | Self::MissingGuidance { .. }
                | Self::ModelNotLoaded(_)
                | Self::Config(_)
        )
    }
}

impl From<image::ImageError> for EcoSortError {
    fn from(error: image::ImageError) -> Self {
        Self::InvalidImage {
            message: error.to_string(),
            source: Some(error),
        }
    }
}
