use serde::Deserialize;

/// Axis order of the tensor handed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TensorLayout {
    /// `[1, height, width, 3]`, the Keras default.
    #[default]
    Nhwc,
    /// `[1, 3, height, width]`.
    Nchw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResizeMode {
    /// Resize to the exact target size, ignoring aspect ratio.
    #[default]
    Stretch,
    /// Keep aspect ratio and pad with black to the target size.
    Letterbox,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Normalization {
    /// `value / 255`.
    #[default]
    UnitRange,
    /// `(value / 255 - mean[c]) / std[c]`.
    MeanStd { mean: [f32; 3], std: [f32; 3] },
}

impl Normalization {
    pub fn apply(&self, channel: usize, value: u8) -> f32 {
        let unit = value as f32 / 255.0;
        match self {
            Normalization::UnitRange => unit,
            Normalization::MeanStd { mean, std } => (unit - mean[channel]) / std[channel],
        }
    }
}

/// The input contract the classifier was trained with.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputSpec {
    pub width: u32,
    pub height: u32,
    pub layout: TensorLayout,
    pub resize: ResizeMode,
    pub normalization: Normalization,
}

impl Default for InputSpec {
    fn default() -> Self {
        Self {
            width: 224,
            height: 224,
            layout: TensorLayout::Nhwc,
            resize: ResizeMode::Stretch,
            normalization: Normalization::UnitRange,
        }
    }
}

impl InputSpec {
    pub fn tensor_shape(&self) -> [usize; 4] {
        let (w, h) = (self.width as usize, self.height as usize);
        match self.layout {
            TensorLayout::Nhwc => [1, h, w, 3],
            TensorLayout::Nchw => [1, 3, h, w],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tensor_shape_follows_layout() {
        let spec = InputSpec {
            width: 320,
            height: 240,
            ..InputSpec::default()
        };
        assert_eq!(spec.tensor_shape(), [1, 240, 320, 3]);

        let spec = InputSpec {
            layout: TensorLayout::Nchw,
            ..spec
        };
        assert_eq!(spec.tensor_shape(), [1, 3, 240, 320]);
    }

    #[test]
    fn test_mean_std_normalization() {
        let normalization = Normalization::MeanStd {
            mean: [0.485, 0.456, 0.406],
            std: [0.229, 0.224, 0.225],
        };
        let value = normalization.apply(0, 255);
        assert!((value - (1.0 - 0.485) / 0.229).abs() < 1e-6);
        assert_eq!(Normalization::UnitRange.apply(2, 0), 0.0);
    }

    #[test]
    fn test_deserialize_from_toml() {
        let spec: InputSpec = toml::from_str(
            r#"
            width = 299
            height = 299
            layout = "nchw"
            resize = "letterbox"
            normalization = { kind = "mean_std", mean = [0.5, 0.5, 0.5], std = [0.5, 0.5, 0.5] }
            "#,
        )
        .unwrap();

        assert_eq!(spec.tensor_shape(), [1, 3, 299, 299]);
        assert_eq!(spec.resize, ResizeMode::Letterbox);
        assert!(matches!(spec.normalization, Normalization::MeanStd { .. }));
    }
}
