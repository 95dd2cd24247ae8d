use crate::error::EcoSortResult;
use crate::guidance::record::GuidanceRecord;
use crate::image_classifier::classification::ClassificationResult;
use chrono::{DateTime, FixedOffset};
use image::DynamicImage;
use std::io::Write;

/// Everything needed to render one report.
pub struct ReportRequest<'a> {
    pub source_image: Option<&'a DynamicImage>,
    pub classification: &'a ClassificationResult,
    pub guidance: &'a GuidanceRecord,
    pub model_name: &'a str,
    pub generated_at: DateTime<FixedOffset>,
}

pub trait ReportGenerator: Send + Sync {
    fn write_to(&self, request: &ReportRequest, writer: &mut dyn Write) -> EcoSortResult<()>;

    fn render(&self, request: &ReportRequest) -> EcoSortResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write_to(request, &mut bytes)?;
        Ok(bytes)
    }
}
