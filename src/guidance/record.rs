use crate::waste_label::WasteLabel;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuidanceRecord {
    pub label: WasteLabel,
    pub description: String,
    pub disposal_instructions: String,
    pub hazard: String,
    pub decomposition_time: String,
    pub eco_tip: String,
    pub recyclable: bool,
    /// 0 (landfill only) to 100 (fully recyclable).
    pub recyclability_score: u8,
    pub carbon_saving_kg_per_kg: f32,
    pub landfill_reduction_m3_per_ton: f32,
}
