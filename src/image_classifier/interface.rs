use crate::error::EcoSortResult;
use tract_onnx::prelude::Tensor;

pub trait ImageClassifier: Send + Sync {
    /// Human readable model name, e.g. the artifact file name.
    fn name(&self) -> &str;

    /// Number of scores produced per image.
    fn output_width(&self) -> usize;

    /// Runs the model on one preprocessed image and returns its raw scores.
    fn infer(&self, tensor: &Tensor) -> EcoSortResult<Vec<f32>>;
}
