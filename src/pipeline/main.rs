use crate::config::Config;
use crate::error::{EcoSortError, EcoSortResult};
use crate::guidance::record::GuidanceRecord;
use crate::guidance::table::GuidanceTable;
use crate::image_classifier::classification::ClassificationResult;
use crate::image_classifier::interface::ImageClassifier;
use crate::image_classifier::models::model_config::OutputActivation;
use crate::image_preprocessor::input_spec::InputSpec;
use crate::image_preprocessor::tensor::preprocess;
use crate::library::logger::interface::Logger;
use crate::report::interface::{ReportGenerator, ReportRequest};
use crate::waste_label::WasteLabel;
use chrono::{DateTime, FixedOffset, Utc};
use image::DynamicImage;
use std::io::Write;
use std::sync::Arc;

/// One classified image together with its guidance.
#[derive(Debug, Clone)]
pub struct Classified {
    pub image: DynamicImage,
    pub result: ClassificationResult,
    pub guidance: GuidanceRecord,
}

/// The shared, read-only pieces of the classification pipeline. Cheap to
/// clone; every clone serves requests against the same model and table.
#[derive(Clone)]
pub struct Pipeline {
    input: InputSpec,
    activation: OutputActivation,
    timezone: FixedOffset,
    logger: Arc<dyn Logger + Send + Sync>,
    image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    guidance: Arc<GuidanceTable>,
    report_generator: Arc<dyn ReportGenerator + Send + Sync>,
}

impl Pipeline {
    pub fn new(
        config: &Config,
        logger: Arc<dyn Logger + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        guidance: Arc<GuidanceTable>,
        report_generator: Arc<dyn ReportGenerator + Send + Sync>,
    ) -> EcoSortResult<Self> {
        if image_classifier.output_width() != WasteLabel::COUNT {
            return Err(EcoSortError::model_load(
                image_classifier.name(),
                format!(
                    "model produces {} scores but there are {} waste labels",
                    image_classifier.output_width(),
                    WasteLabel::COUNT
                ),
            ));
        }

        Ok(Self {
            input: config.model.input,
            activation: config.model.activation,
            timezone: config.logger.timezone(),
            logger: logger.with_namespace("pipeline"),
            image_classifier,
            guidance,
            report_generator,
        })
    }

    pub fn model_name(&self) -> &str {
        self.image_classifier.name()
    }

    pub fn guidance(&self) -> &GuidanceTable {
        &self.guidance
    }

    pub fn classify(&self, bytes: &[u8]) -> EcoSortResult<Classified> {
        let preprocessed = preprocess(bytes, &self.input).inspect_err(|e| {
            self.logger.warn(&format!("rejected input: {}", e));
        })?;

        self.logger.debug(&format!(
            "running {} on tensor {:?}",
            self.image_classifier.name(),
            preprocessed.tensor.shape()
        ));
        let scores = self.image_classifier.infer(&preprocessed.tensor)?;
        let result = ClassificationResult::from_scores(&scores, self.activation)?;
        let guidance = self.guidance.lookup(result.predicted_label()).clone();

        self.logger.info(&format!(
            "classified {}x{} image as {} ({:.2}%)",
            preprocessed.image.width(),
            preprocessed.image.height(),
            result.predicted_label(),
            result.confidence_percent()
        ));

        Ok(Classified {
            image: preprocessed.image,
            result,
            guidance,
        })
    }

    pub fn report_request<'a>(
        &'a self,
        classified: &'a Classified,
        generated_at: DateTime<FixedOffset>,
    ) -> ReportRequest<'a> {
        ReportRequest {
            source_image: Some(&classified.image),
            classification: &classified.result,
            guidance: &classified.guidance,
            model_name: self.model_name(),
            generated_at,
        }
    }

    /// Writes the PDF report. A failure here leaves `classified` usable.
    pub fn write_report(&self, classified: &Classified, writer: &mut dyn Write) -> EcoSortResult<()> {
        let request = self.report_request(classified, self.now());
        self.report_generator
            .write_to(&request, writer)
            .inspect_err(|e| self.logger.error(&format!("report failed: {}", e)))?;
        self.logger.info("report written");
        Ok(())
    }

    #[allow(dead_code)]
    pub fn render_report(&self, classified: &Classified) -> EcoSortResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write_report(classified, &mut bytes)?;
        Ok(bytes)
    }

    fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.timezone)
    }
}
