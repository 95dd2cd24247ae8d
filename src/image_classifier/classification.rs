use crate::error::{EcoSortError, EcoSortResult};
use crate::image_classifier::models::model_config::OutputActivation;
use crate::waste_label::WasteLabel;

/// Outcome of one inference call.
///
/// `confidence_scores` holds one probability per label in label order. They
/// are non-negative and sum to 1, and `predicted_label` is the highest entry,
/// the lowest index winning ties.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    predicted_label: WasteLabel,
    confidence_scores: [f64; WasteLabel::COUNT],
}

impl ClassificationResult {
    pub fn from_scores(raw: &[f32], activation: OutputActivation) -> EcoSortResult<Self> {
        if raw.len() != WasteLabel::COUNT {
            return Err(EcoSortError::Inference(format!(
                "expected {} scores, got {}",
                WasteLabel::COUNT,
                raw.len()
            )));
        }
        if raw.iter().any(|score| !score.is_finite()) {
            return Err(EcoSortError::Inference(
                "model produced a non-finite score".to_string(),
            ));
        }

        let mut scores = [0.0f64; WasteLabel::COUNT];
        for (slot, score) in scores.iter_mut().zip(raw) {
            *slot = *score as f64;
        }

        match activation {
            OutputActivation::Probabilities => {
                for score in scores.iter_mut() {
                    *score = score.max(0.0);
                }
            }
            OutputActivation::Logits => {
                let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                for score in scores.iter_mut() {
                    *score = (*score - max).exp();
                }
            }
        }

        let total: f64 = scores.iter().sum();
        if total <= 0.0 {
            return Err(EcoSortError::Inference(
                "model produced an all-zero distribution".to_string(),
            ));
        }
        for score in scores.iter_mut() {
            *score /= total;
        }

        Ok(Self {
            predicted_label: WasteLabel::ALL[argmax(&scores)],
            confidence_scores: scores,
        })
    }

    pub fn predicted_label(&self) -> WasteLabel {
        self.predicted_label
    }

    pub fn confidence(&self, label: WasteLabel) -> f64 {
        self.confidence_scores[label.index()]
    }

    /// Confidence of the predicted label, in percent.
    pub fn confidence_percent(&self) -> f64 {
        self.confidence(self.predicted_label) * 100.0
    }

    pub fn confidence_scores(&self) -> impl Iterator<Item = (WasteLabel, f64)> + '_ {
        WasteLabel::ALL
            .into_iter()
            .zip(self.confidence_scores.iter().copied())
    }

    /// Labels by descending confidence; equal scores keep label order.
    pub fn ranked(&self) -> Vec<(WasteLabel, f64)> {
        let mut ranked: Vec<_> = self.confidence_scores().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

fn argmax(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, score) in scores.iter().enumerate() {
        if *score > scores[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn assert_distribution(result: &ClassificationResult) {
        let total: f64 = result.confidence_scores().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-6, "sum was {}", total);
        assert!(result.confidence_scores().all(|(_, p)| (0.0..=1.0).contains(&p)));

        let max = result
            .confidence_scores()
            .map(|(_, p)| p)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(result.confidence(result.predicted_label()), max);
    }

    #[test]
    fn test_random_outputs_always_form_a_distribution() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let logits: Vec<f32> = (0..WasteLabel::COUNT)
                .map(|_| rng.random_range(-30.0..30.0))
                .collect();
            let result = ClassificationResult::from_scores(&logits, OutputActivation::Logits).unwrap();
            assert_distribution(&result);

            let probabilities: Vec<f32> = (0..WasteLabel::COUNT)
                .map(|_| rng.random_range(0.0..1.0))
                .collect();
            let result =
                ClassificationResult::from_scores(&probabilities, OutputActivation::Probabilities)
                    .unwrap();
            assert_distribution(&result);
        }
    }

    #[test]
    fn test_predicted_label_is_argmax() {
        let mut scores = vec![0.01f32; WasteLabel::COUNT];
        scores[WasteLabel::Cardboard.index()] = 0.89;

        let result = ClassificationResult::from_scores(&scores, OutputActivation::Probabilities).unwrap();

        assert_eq!(result.predicted_label(), WasteLabel::Cardboard);
        assert!((result.confidence_percent() - 89.0).abs() < 1e-4);
    }

    #[test]
    fn test_ties_pick_lowest_index() {
        let mut scores = vec![0.0f32; WasteLabel::COUNT];
        scores[WasteLabel::Metal.index()] = 0.5;
        scores[WasteLabel::Clothes.index()] = 0.5;

        let result = ClassificationResult::from_scores(&scores, OutputActivation::Probabilities).unwrap();
        assert_eq!(result.predicted_label(), WasteLabel::Clothes);

        let uniform = vec![3.0f32; WasteLabel::COUNT];
        let result = ClassificationResult::from_scores(&uniform, OutputActivation::Logits).unwrap();
        assert_eq!(result.predicted_label(), WasteLabel::Battery);
    }

    #[test]
    fn test_ranked_is_descending_and_stable() {
        let mut scores = vec![0.05f32; WasteLabel::COUNT];
        scores[WasteLabel::Paper.index()] = 0.3;
        scores[WasteLabel::Plastic.index()] = 0.15;

        let result = ClassificationResult::from_scores(&scores, OutputActivation::Probabilities).unwrap();
        let ranked = result.ranked();

        assert_eq!(ranked[0].0, WasteLabel::Paper);
        assert_eq!(ranked[1].0, WasteLabel::Plastic);
        assert_eq!(ranked[2].0, WasteLabel::Battery);
        assert!(ranked.windows(2).all(|pair| pair[0].1 >= pair[1].1));
    }

    #[test]
    fn test_negative_probabilities_are_clamped() {
        let mut scores = vec![-0.001f32; WasteLabel::COUNT];
        scores[WasteLabel::Shoes.index()] = 1.0;

        let result = ClassificationResult::from_scores(&scores, OutputActivation::Probabilities).unwrap();

        assert_eq!(result.confidence(WasteLabel::Battery), 0.0);
        assert_eq!(result.confidence(WasteLabel::Shoes), 1.0);
    }

    #[test]
    fn test_rejects_wrong_width_and_bad_values() {
        let short = vec![0.5f32; WasteLabel::COUNT - 1];
        assert!(matches!(
            ClassificationResult::from_scores(&short, OutputActivation::Probabilities),
            Err(EcoSortError::Inference(_))
        ));

        let mut nan = vec![0.1f32; WasteLabel::COUNT];
        nan[3] = f32::NAN;
        assert!(matches!(
            ClassificationResult::from_scores(&nan, OutputActivation::Logits),
            Err(EcoSortError::Inference(_))
        ));

        let zeros = vec![0.0f32; WasteLabel::COUNT];
        assert!(matches!(
            ClassificationResult::from_scores(&zeros, OutputActivation::Probabilities),
            Err(EcoSortError::Inference(_))
        ));
    }
}
