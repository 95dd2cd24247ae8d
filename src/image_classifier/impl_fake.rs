use crate::error::{EcoSortError, EcoSortResult};
use crate::image_classifier::interface::ImageClassifier;
use crate::waste_label::WasteLabel;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicUsize, Ordering};
use tract_onnx::prelude::Tensor;

enum FakeOutput {
    Fixed(Vec<f32>),
    /// Pseudo-random scores derived from the seed and the pixel data.
    Seeded(u64),
}

pub struct ImageClassifierFake {
    output: FakeOutput,
    output_width: usize,
    calls: AtomicUsize,
}

impl ImageClassifierFake {
    pub fn fixed(scores: Vec<f32>) -> Self {
        Self {
            output_width: scores.len(),
            output: FakeOutput::Fixed(scores),
            calls: AtomicUsize::new(0),
        }
    }

    /// Puts most of the probability mass on `label`.
    pub fn favoring(label: WasteLabel, confidence: f32) -> Self {
        let rest = (1.0 - confidence) / (WasteLabel::COUNT - 1) as f32;
        let scores = WasteLabel::ALL
            .iter()
            .map(|l| if *l == label { confidence } else { rest })
            .collect();
        Self::fixed(scores)
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            output: FakeOutput::Seeded(seed),
            output_width: WasteLabel::COUNT,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn name(&self) -> &str {
        "fake"
    }

    fn output_width(&self) -> usize {
        self.output_width
    }

    fn infer(&self, tensor: &Tensor) -> EcoSortResult<Vec<f32>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match &self.output {
            FakeOutput::Fixed(scores) => Ok(scores.clone()),
            FakeOutput::Seeded(seed) => {
                let pixels = tensor
                    .as_slice::<f32>()
                    .map_err(|e| EcoSortError::Inference(e.to_string()))?;
                let fingerprint = pixels
                    .iter()
                    .fold(*seed, |acc, v| acc.rotate_left(5) ^ v.to_bits() as u64);

                let mut rng = StdRng::seed_from_u64(fingerprint);
                Ok((0..self.output_width)
                    .map(|_| rng.random_range(-5.0..5.0))
                    .collect())
            }
        }
    }
}
