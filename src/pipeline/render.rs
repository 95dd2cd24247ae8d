use crate::image_classifier::classification::ClassificationResult;
use crate::pipeline::main::Classified;

const BAR_CELLS: usize = 30;

/// The details text shown next to a prediction.
pub fn summary(classified: &Classified) -> String {
    let result = &classified.result;
    let guidance = &classified.guidance;

    format!(
        "Class: {}\n\
         Confidence: {:.2}%\n\
         \n\
         Description:\n{}\n\
         \n\
         How to Recycle:\n{}\n\
         \n\
         Hazard Level:\n{}\n\
         \n\
         Estimated Decomposition Time: {}\n\
         \n\
         Eco Tip: {}\n\
         \n\
         Recyclable: {}\n\
         Recyclability Score: {}/100 {}\n\
         Carbon saving (kg/kg): {}\n\
         Landfill reduction (m3/ton): {}\n\
         \n\
         Suggested Disposal / Action:\n\
         - Segregate from other waste streams.\n\
         - Take to local recycling / hazardous collection if applicable.\n",
        result.predicted_label().display_name().to_uppercase(),
        result.confidence_percent(),
        guidance.description,
        guidance.disposal_instructions,
        guidance.hazard,
        guidance.decomposition_time,
        guidance.eco_tip,
        if guidance.recyclable { "yes" } else { "no" },
        guidance.recyclability_score,
        recyclability_gauge(guidance.recyclability_score),
        guidance.carbon_saving_kg_per_kg,
        guidance.landfill_reduction_m3_per_ton,
    )
}

/// `[######----]` with one cell per ten points, capped at 100.
pub fn recyclability_gauge(score: u8) -> String {
    let filled = (score.min(100) as usize + 5) / 10;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(10 - filled))
}

/// One line per label, most confident first, with a text bar.
pub fn distribution(result: &ClassificationResult) -> String {
    result
        .ranked()
        .into_iter()
        .map(|(label, probability)| {
            let cells = (probability * BAR_CELLS as f64).round() as usize;
            format!(
                "{:<12} {:<width$} {:>6.2}%\n",
                label.display_name(),
                "#".repeat(cells.min(BAR_CELLS)),
                probability * 100.0,
                width = BAR_CELLS
            )
        })
        .collect()
}
