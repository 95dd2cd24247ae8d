use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Material categories, in the order of the model's output vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WasteLabel {
    Battery,
    Biological,
    BrownGlass,
    Cardboard,
    Clothes,
    GreenGlass,
    Metal,
    Paper,
    Plastic,
    Shoes,
    #[serde(alias = "other-trash")]
    Trash,
    WhiteGlass,
}

impl WasteLabel {
    pub const COUNT: usize = 12;

    pub const ALL: [WasteLabel; Self::COUNT] = [
        WasteLabel::Battery,
        WasteLabel::Biological,
        WasteLabel::BrownGlass,
        WasteLabel::Cardboard,
        WasteLabel::Clothes,
        WasteLabel::GreenGlass,
        WasteLabel::Metal,
        WasteLabel::Paper,
        WasteLabel::Plastic,
        WasteLabel::Shoes,
        WasteLabel::Trash,
        WasteLabel::WhiteGlass,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    #[allow(dead_code)]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn display_name(self) -> &'static str {
        match self {
            WasteLabel::Battery => "Battery",
            WasteLabel::Biological => "Biological",
            WasteLabel::BrownGlass => "Brown Glass",
            WasteLabel::Cardboard => "Cardboard",
            WasteLabel::Clothes => "Clothes",
            WasteLabel::GreenGlass => "Green Glass",
            WasteLabel::Metal => "Metal",
            WasteLabel::Paper => "Paper",
            WasteLabel::Plastic => "Plastic",
            WasteLabel::Shoes => "Shoes",
            WasteLabel::Trash => "Trash",
            WasteLabel::WhiteGlass => "White Glass",
        }
    }

    /// Identifier used in configuration files.
    pub fn slug(self) -> &'static str {
        match self {
            WasteLabel::Battery => "battery",
            WasteLabel::Biological => "biological",
            WasteLabel::BrownGlass => "brown-glass",
            WasteLabel::Cardboard => "cardboard",
            WasteLabel::Clothes => "clothes",
            WasteLabel::GreenGlass => "green-glass",
            WasteLabel::Metal => "metal",
            WasteLabel::Paper => "paper",
            WasteLabel::Plastic => "plastic",
            WasteLabel::Shoes => "shoes",
            WasteLabel::Trash => "trash",
            WasteLabel::WhiteGlass => "white-glass",
        }
    }
}

impl fmt::Display for WasteLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWasteLabel(pub String);

impl fmt::Display for UnknownWasteLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown waste label '{}'", self.0)
    }
}

impl std::error::Error for UnknownWasteLabel {}

impl FromStr for WasteLabel {
    type Err = UnknownWasteLabel;

    /// Accepts the slug or the display name in any case, with spaces,
    /// dashes or underscores as separators. "Other Trash" maps to `Trash`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .map(|c| match c {
                ' ' | '_' => '-',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        if normalized == "other-trash" {
            return Ok(WasteLabel::Trash);
        }

        Self::ALL
            .into_iter()
            .find(|label| label.slug() == normalized)
            .ok_or_else(|| UnknownWasteLabel(value.to_string()))
    }
}
