use crate::error::{EcoSortError, EcoSortResult};
use crate::report::interface::{ReportGenerator, ReportRequest};
use crate::report::report_config::ReportConfig;
use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use std::io::Write;

// US Letter, in points.
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 40.0;

const IMAGE_BOX: f32 = 200.0;
const IMAGE_X: f32 = PAGE_WIDTH - MARGIN - IMAGE_BOX;

const BAR_X: f32 = 150.0;
const BAR_WIDTH: f32 = 300.0;
const BAR_HEIGHT: f32 = 9.0;
const BAR_COLOR: [f32; 3] = [0.086, 0.627, 0.522];
const TRACK_COLOR: [f32; 3] = [0.9, 0.9, 0.9];

const REGULAR: &str = "F1";
const BOLD: &str = "F2";
const THUMBNAIL: &str = "Im1";

pub struct ReportGeneratorPdf {
    config: ReportConfig,
}

impl ReportGeneratorPdf {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    fn encode_thumbnail(&self, image: &DynamicImage) -> EcoSortResult<(u32, u32, Vec<u8>)> {
        let size = self.config.thumbnail_size.max(1);
        let rgb = image.thumbnail(size, size).to_rgb8();

        let mut jpeg = Vec::new();
        JpegEncoder::new_with_quality(&mut jpeg, self.config.jpeg_quality)
            .encode_image(&rgb)
            .map_err(|e| EcoSortError::ReportWrite(std::io::Error::other(e)))?;

        Ok((rgb.width(), rgb.height(), jpeg))
    }

    fn layout(&self, request: &ReportRequest, thumbnail: Option<(u32, u32)>) -> Vec<Vec<Operation>> {
        let mut page = PageWriter::new();
        let classification = request.classification;
        let guidance = request.guidance;

        page.text(BOLD, 18.0, MARGIN, &self.config.title);
        page.advance(20.0);
        page.text(
            REGULAR,
            10.0,
            MARGIN,
            &format!("Generated: {}", request.generated_at.format("%Y-%m-%d %H:%M:%S")),
        );
        page.advance(15.0);
        page.text(REGULAR, 10.0, MARGIN, &format!("Model: {}", request.model_name));
        page.advance(25.0);

        let image_top = page.y;
        let has_thumbnail = thumbnail.is_some();
        if let Some((width, height)) = thumbnail {
            let scale = IMAGE_BOX / width.max(height) as f32;
            let (w, h) = (width as f32 * scale, height as f32 * scale);
            page.thumbnail(IMAGE_X + (IMAGE_BOX - w) / 2.0, image_top - h, w, h);
        }

        page.text(
            BOLD,
            12.0,
            MARGIN,
            &format!(
                "Predicted Class: {} ({:.2}%)",
                classification.predicted_label().display_name().to_uppercase(),
                classification.confidence_percent()
            ),
        );
        page.advance(18.0);

        let text_width = if has_thumbnail {
            IMAGE_X - MARGIN - 15.0
        } else {
            PAGE_WIDTH - 2.0 * MARGIN
        };
        let lines = [
            format!("Description: {}", guidance.description),
            format!("How to Recycle: {}", guidance.disposal_instructions),
            format!("Hazard: {}", guidance.hazard),
            format!("Estimated Decomposition Time: {}", guidance.decomposition_time),
            format!("Eco Tip: {}", guidance.eco_tip),
            format!("Recyclable: {}", if guidance.recyclable { "Yes" } else { "No" }),
            format!("Recyclability Score: {}/100", guidance.recyclability_score),
            format!("Carbon saving (kg/kg): {}", guidance.carbon_saving_kg_per_kg),
            format!(
                "Landfill reduction (m3/ton): {}",
                guidance.landfill_reduction_m3_per_ton
            ),
        ];
        for line in &lines {
            for wrapped in wrap(&pdf_text(line), 11.0, text_width) {
                page.ensure_space(16.0);
                page.text(REGULAR, 11.0, MARGIN, &wrapped);
                page.advance(16.0);
            }
        }

        if has_thumbnail && page.page_count() == 1 {
            page.y = page.y.min(image_top - IMAGE_BOX - 10.0);
        }
        page.advance(20.0);
        page.ensure_space(30.0 + 16.0 * 12.0);
        page.text(BOLD, 12.0, MARGIN, "Confidence distribution across classes");
        page.advance(20.0);

        for (label, probability) in classification.confidence_scores() {
            let font = if label == classification.predicted_label() {
                BOLD
            } else {
                REGULAR
            };
            page.ensure_space(16.0);
            page.text(font, 10.0, MARGIN, label.display_name());
            page.bar(BAR_X, probability as f32);
            page.text(
                font,
                10.0,
                BAR_X + BAR_WIDTH + 10.0,
                &format!("{:.2}%", probability * 100.0),
            );
            page.advance(16.0);
        }

        page.finish()
    }

    fn build_document(&self, request: &ReportRequest) -> EcoSortResult<Document> {
        let thumbnail = request
            .source_image
            .map(|image| self.encode_thumbnail(image))
            .transpose()?;

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_id = doc.add_object(font("Helvetica"));
        let bold_id = doc.add_object(font("Helvetica-Bold"));

        let thumbnail_size = thumbnail.as_ref().map(|(width, height, _)| (*width, *height));

        let mut resources = dictionary! {
            "Font" => dictionary! {
                REGULAR => regular_id,
                BOLD => bold_id,
            },
        };
        if let Some((width, height, jpeg)) = thumbnail {
            let image_id = doc.add_object(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => width as i64,
                    "Height" => height as i64,
                    "ColorSpace" => "DeviceRGB",
                    "BitsPerComponent" => 8_i64,
                    "Filter" => "DCTDecode",
                },
                jpeg,
            ));
            resources.set("XObject", dictionary! { THUMBNAIL => image_id });
        }
        let resources_id = doc.add_object(resources);

        let mut kids: Vec<Object> = Vec::new();
        for operations in self.layout(request, thumbnail_size) {
            let content = Content { operations }
                .encode()
                .map_err(|e| EcoSortError::ReportWrite(std::io::Error::other(e.to_string())))?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, content));
            let page_id: ObjectId = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH as i64),
                Object::Integer(PAGE_HEIGHT as i64),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(pdf_text(&self.config.title)),
            "Subject" => Object::string_literal(request.classification.predicted_label().display_name()),
            "Producer" => Object::string_literal("eco-sort"),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        Ok(doc)
    }
}

impl ReportGenerator for ReportGeneratorPdf {
    fn write_to(&self, request: &ReportRequest, mut writer: &mut dyn Write) -> EcoSortResult<()> {
        let mut doc = self.build_document(request)?;
        doc.save_to(&mut writer)
            .map_err(|e| EcoSortError::ReportWrite(std::io::Error::other(e.to_string())))?;
        writer.flush().map_err(EcoSortError::ReportWrite)?;
        Ok(())
    }
}

fn font(base_font: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => Object::Name(base_font.as_bytes().to_vec()),
        "Encoding" => "WinAnsiEncoding",
    }
}

/// Collects drawing operations top-down, starting a new page when the
/// cursor would cross the bottom margin.
struct PageWriter {
    pages: Vec<Vec<Operation>>,
    current: Vec<Operation>,
    y: f32,
}

impl PageWriter {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            current: Vec::new(),
            y: PAGE_HEIGHT - 50.0,
        }
    }

    fn page_count(&self) -> usize {
        self.pages.len() + 1
    }

    fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    fn ensure_space(&mut self, height: f32) {
        if self.y - height < MARGIN {
            self.pages.push(std::mem::take(&mut self.current));
            self.y = PAGE_HEIGHT - 50.0;
        }
    }

    fn text(&mut self, font: &str, size: f32, x: f32, text: &str) {
        self.current.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(font.as_bytes().to_vec()), size.into()]),
            Operation::new("Td", vec![x.into(), self.y.into()]),
            Operation::new("Tj", vec![Object::string_literal(pdf_text(text))]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn bar(&mut self, x: f32, fraction: f32) {
        let y = self.y - 1.0;
        self.fill_rect(TRACK_COLOR, x, y, BAR_WIDTH, BAR_HEIGHT);
        let width = BAR_WIDTH * fraction.clamp(0.0, 1.0);
        if width > 0.0 {
            self.fill_rect(BAR_COLOR, x, y, width, BAR_HEIGHT);
        }
    }

    fn fill_rect(&mut self, color: [f32; 3], x: f32, y: f32, width: f32, height: f32) {
        self.current.extend([
            Operation::new("q", vec![]),
            Operation::new("rg", color.iter().map(|c| (*c).into()).collect()),
            Operation::new("re", vec![x.into(), y.into(), width.into(), height.into()]),
            Operation::new("f", vec![]),
            Operation::new("Q", vec![]),
        ]);
    }

    /// Draws the thumbnail as a `width` x `height` box with its lower-left
    /// corner at `(x, y)`.
    fn thumbnail(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.current.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![width.into(), 0.0f32.into(), 0.0f32.into(), height.into(), x.into(), y.into()],
            ),
            Operation::new("Do", vec![Object::Name(THUMBNAIL.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ]);
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        self.pages.push(self.current);
        self.pages
    }
}

/// Maps text onto what the standard fonts can show.
fn pdf_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            ' '..='~' => out.push(c),
            '\u{2010}'..='\u{2015}' | '\u{2212}' => out.push('-'),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2022}' => out.push('*'),
            '\u{2026}' => out.push_str("..."),
            '\u{00B2}' => out.push('2'),
            '\u{00B3}' => out.push('3'),
            c if c.is_whitespace() => out.push(' '),
            _ => {}
        }
    }
    out
}

/// Greedy word wrap using an average Helvetica glyph width of half an em.
fn wrap(text: &str, font_size: f32, width: f32) -> Vec<String> {
    let max_chars = ((width / (font_size * 0.5)) as usize).max(1);
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}
