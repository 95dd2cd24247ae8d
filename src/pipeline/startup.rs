use crate::config::Config;
use crate::error::EcoSortResult;
use crate::guidance::table::GuidanceTable;
use crate::image_classifier::impl_tract_onnx::ImageClassifierTractOnnx;
use crate::image_classifier::interface::ImageClassifier;
use crate::image_classifier::lifecycle::ModelState;
use crate::image_classifier::models::model_config::ModelConfig;
use crate::library::logger::interface::Logger;
use crate::pipeline::main::Pipeline;
use crate::report::impl_pdf::ReportGeneratorPdf;
use std::sync::Arc;

/// Loads the ONNX model and the guidance table. Any error here means the
/// process must not serve requests.
pub fn startup(config: &Config, logger: Arc<dyn Logger + Send + Sync>) -> EcoSortResult<Pipeline> {
    startup_with(config, logger, |model_config| {
        let classifier = ImageClassifierTractOnnx::new(model_config)?;
        Ok(Arc::new(classifier))
    })
}

pub fn startup_with<F>(
    config: &Config,
    logger: Arc<dyn Logger + Send + Sync>,
    load_model: F,
) -> EcoSortResult<Pipeline>
where
    F: FnOnce(&ModelConfig) -> EcoSortResult<Arc<dyn ImageClassifier + Send + Sync>>,
{
    let startup_logger = logger.with_namespace("startup");

    startup_logger.info(&format!(
        "loading model {}",
        config.model.onnx_model_path.display()
    ));
    let state = ModelState::Unloaded.load(|| load_model(&config.model));
    if let ModelState::LoadFailed(error) = &state {
        startup_logger.error(&error.to_string());
    }
    let image_classifier = state.into_classifier()?;

    let guidance = match &config.guidance.path {
        Some(path) => {
            startup_logger.info(&format!("loading guidance from {}", path.display()));
            GuidanceTable::load(path)
        }
        None => GuidanceTable::builtin(),
    }
    .inspect_err(|e| startup_logger.error(&e.to_string()))?;

    let pipeline = Pipeline::new(
        config,
        logger,
        image_classifier,
        Arc::new(guidance),
        Arc::new(ReportGeneratorPdf::new(config.report.clone())),
    )?;

    startup_logger.info(&format!("ready, model {}", pipeline.model_name()));

    Ok(pipeline)
}
