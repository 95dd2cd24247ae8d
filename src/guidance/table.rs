use crate::error::{EcoSortError, EcoSortResult};
use crate::guidance::record::GuidanceRecord;
use crate::waste_label::WasteLabel;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde::Deserialize;
use std::path::Path;

const BUILTIN_GUIDANCE: &str = include_str!("guidance.toml");

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GuidanceFile {
    #[serde(default)]
    facts: Vec<String>,
    guidance: Vec<GuidanceRecord>,
}

/// Read-only label -> guidance mapping, total over [`WasteLabel`].
#[derive(Debug, Clone)]
pub struct GuidanceTable {
    records: Vec<GuidanceRecord>,
    facts: Vec<String>,
}

impl GuidanceTable {
    /// Later records for the same label replace earlier ones.
    pub fn from_records(records: Vec<GuidanceRecord>) -> EcoSortResult<Self> {
        let mut slots: Vec<Option<GuidanceRecord>> = vec![None; WasteLabel::COUNT];
        for record in records {
            let index = record.label.index();
            slots[index] = Some(record);
        }

        let mut table = Vec::with_capacity(WasteLabel::COUNT);
        for (label, slot) in WasteLabel::ALL.into_iter().zip(slots) {
            match slot {
                Some(record) => table.push(record),
                None => return Err(EcoSortError::MissingGuidance { label }),
            }
        }

        Ok(Self {
            records: table,
            facts: Vec::new(),
        })
    }

    pub fn builtin() -> EcoSortResult<Self> {
        Self::parse(BUILTIN_GUIDANCE)
    }

    pub fn load(path: &Path) -> EcoSortResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            EcoSortError::Config(format!("cannot read guidance file {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> EcoSortResult<Self> {
        let file: GuidanceFile = toml::from_str(content)
            .map_err(|e| EcoSortError::Config(format!("invalid guidance table: {}", e)))?;
        let mut table = Self::from_records(file.guidance)?;
        table.facts = file.facts;
        Ok(table)
    }

    pub fn lookup(&self, label: WasteLabel) -> &GuidanceRecord {
        &self.records[label.index()]
    }

    /// A general recycling fact, or `None` if the table has none.
    pub fn random_fact<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.facts.choose(rng).map(String::as_str)
    }

    #[allow(dead_code)]
    pub fn records(&self) -> impl Iterator<Item = &GuidanceRecord> {
        self.records.iter()
    }
}
