use crate::image_preprocessor::input_spec::InputSpec;
use serde::Deserialize;
use std::path::PathBuf;

/// How the raw model output is turned into a distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputActivation {
    /// The graph already ends in a softmax.
    #[default]
    Probabilities,
    /// Raw scores; softmax is applied after inference.
    Logits,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    pub onnx_model_path: PathBuf,
    pub input: InputSpec,
    pub activation: OutputActivation,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            onnx_model_path: PathBuf::from("models/ecosortai_final_model.onnx"),
            input: InputSpec::default(),
            activation: OutputActivation::Probabilities,
        }
    }
}

impl ModelConfig {
    /// File name shown in reports.
    pub fn model_name(&self) -> String {
        self.onnx_model_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.onnx_model_path.display().to_string())
    }
}
