use crate::config::Config;
use crate::guidance::table::GuidanceTable;
use crate::image_classifier::impl_fake::ImageClassifierFake;
use crate::image_classifier::models::model_config::OutputActivation;
use crate::library::logger::impl_console::LoggerConsole;
use crate::library::logger::interface::{LogLevel, Logger};
use crate::pipeline::main::Pipeline;
use crate::report::impl_pdf::ReportGeneratorPdf;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use lopdf::content::Content;
use lopdf::{Document, Object};
use std::io::Cursor;
use std::sync::Arc;

pub fn solid_image(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
}

pub fn encode_image(image: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), format)
        .unwrap();
    bytes
}

/// Text shown by every `Tj` operator, one per line, in drawing order.
pub fn extract_pdf_text(pdf: &[u8]) -> String {
    let doc = Document::load_mem(pdf).unwrap();
    let mut text = String::new();

    for page_id in doc.get_pages().into_values() {
        let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
        for operation in content.operations {
            if operation.operator != "Tj" {
                continue;
            }
            if let Some(Object::String(bytes, _)) = operation.operands.first() {
                text.push_str(&String::from_utf8_lossy(bytes));
                text.push('\n');
            }
        }
    }

    text
}

pub struct Fixture {
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub image_classifier: Arc<ImageClassifierFake>,
    pub pipeline: Pipeline,
}

impl Fixture {
    pub fn new(image_classifier: ImageClassifierFake) -> Self {
        Self::with_config(Config::default(), image_classifier)
    }

    /// For fakes that emit raw logits, such as [`ImageClassifierFake::seeded`].
    pub fn logits(image_classifier: ImageClassifierFake) -> Self {
        let mut config = Config::default();
        config.model.activation = OutputActivation::Logits;
        Self::with_config(config, image_classifier)
    }

    pub fn with_config(config: Config, image_classifier: ImageClassifierFake) -> Self {
        let logger: Arc<dyn Logger + Send + Sync> =
            Arc::new(LoggerConsole::new(config.logger.timezone(), LogLevel::Debug));
        let image_classifier = Arc::new(image_classifier);
        let pipeline = Pipeline::new(
            &config,
            logger.clone(),
            image_classifier.clone(),
            Arc::new(GuidanceTable::builtin().unwrap()),
            Arc::new(ReportGeneratorPdf::new(config.report.clone())),
        )
        .unwrap();

        Self {
            logger,
            image_classifier,
            pipeline,
        }
    }
}
