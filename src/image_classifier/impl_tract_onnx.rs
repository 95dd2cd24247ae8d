use crate::error::{EcoSortError, EcoSortResult};
use crate::image_classifier::interface::ImageClassifier;
use crate::image_classifier::models::model_config::ModelConfig;
use crate::waste_label::WasteLabel;
use tract_onnx::prelude::*;

pub struct ImageClassifierTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    name: String,
    input_shape: [usize; 4],
    output_width: usize,
}

impl ImageClassifierTractOnnx {
    pub fn new(config: &ModelConfig) -> EcoSortResult<Self> {
        let path = config.onnx_model_path.display().to_string();

        if !config.onnx_model_path.is_file() {
            return Err(EcoSortError::model_load(path, "model file not found"));
        }

        let input_shape = config.input.tensor_shape();

        let model = tract_onnx::onnx()
            .model_for_path(&config.onnx_model_path)
            .and_then(|model| model.with_input_fact(0, f32::fact(input_shape).into()))
            .and_then(|model| model.into_optimized())
            .map_err(|e| EcoSortError::model_load(&path, e))?;

        let output_width = model
            .output_fact(0)
            .ok()
            .and_then(|fact| fact.shape.as_concrete().map(|dims| dims.iter().product::<usize>()))
            .ok_or_else(|| EcoSortError::model_load(&path, "model output shape is not fixed"))?;

        if output_width != WasteLabel::COUNT {
            return Err(EcoSortError::model_load(
                &path,
                format!(
                    "model produces {} scores but there are {} waste labels",
                    output_width,
                    WasteLabel::COUNT
                ),
            ));
        }

        let model = model
            .into_runnable()
            .map_err(|e| EcoSortError::model_load(&path, e))?;

        Ok(Self {
            model,
            name: config.model_name(),
            input_shape,
            output_width,
        })
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn name(&self) -> &str {
        &self.name
    }

    fn output_width(&self) -> usize {
        self.output_width
    }

    fn infer(&self, tensor: &Tensor) -> EcoSortResult<Vec<f32>> {
        if tensor.shape() != &self.input_shape[..] {
            return Err(EcoSortError::Inference(format!(
                "tensor shape {:?} does not match model input {:?}",
                tensor.shape(),
                self.input_shape
            )));
        }

        let outputs = self
            .model
            .run(tvec!(tensor.clone().into_tvalue()))
            .map_err(|e| EcoSortError::Inference(e.to_string()))?;

        let output = outputs[0]
            .to_array_view::<f32>()
            .map_err(|e| EcoSortError::Inference(e.to_string()))?;

        Ok(output.iter().copied().collect())
    }
}
