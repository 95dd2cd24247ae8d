use crate::error::{EcoSortError, EcoSortResult};
use crate::image_classifier::interface::ImageClassifier;
use std::sync::Arc;

/// Process-wide model lifecycle. The only transitions are
/// `Unloaded -> Loaded` and `Unloaded -> LoadFailed`.
pub enum ModelState {
    Unloaded,
    Loaded(Arc<dyn ImageClassifier + Send + Sync>),
    LoadFailed(EcoSortError),
}

impl ModelState {
    pub fn load<F>(self, loader: F) -> Self
    where
        F: FnOnce() -> EcoSortResult<Arc<dyn ImageClassifier + Send + Sync>>,
    {
        match self {
            ModelState::Unloaded => match loader() {
                Ok(classifier) => ModelState::Loaded(classifier),
                Err(error) => ModelState::LoadFailed(error),
            },
            settled => settled,
        }
    }

    #[allow(dead_code)]
    pub fn is_loaded(&self) -> bool {
        matches!(self, ModelState::Loaded(_))
    }

    #[allow(dead_code)]
    pub fn classifier(&self) -> EcoSortResult<Arc<dyn ImageClassifier + Send + Sync>> {
        match self {
            ModelState::Loaded(classifier) => Ok(classifier.clone()),
            ModelState::Unloaded => Err(EcoSortError::ModelNotLoaded("not loaded yet".to_string())),
            ModelState::LoadFailed(error) => Err(EcoSortError::ModelNotLoaded(error.to_string())),
        }
    }

    /// Consumes the state, handing back the load error itself on failure.
    pub fn into_classifier(self) -> EcoSortResult<Arc<dyn ImageClassifier + Send + Sync>> {
        match self {
            ModelState::Loaded(classifier) => Ok(classifier),
            ModelState::Unloaded => Err(EcoSortError::ModelNotLoaded("not loaded yet".to_string())),
            ModelState::LoadFailed(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_classifier::impl_fake::ImageClassifierFake;
    use crate::waste_label::WasteLabel;

    fn fake() -> Arc<dyn ImageClassifier + Send + Sync> {
        Arc::new(ImageClassifierFake::favoring(WasteLabel::Metal, 0.9))
    }

    #[test]
    fn test_unloaded_to_loaded() {
        let state = ModelState::Unloaded;
        assert!(matches!(
            state.classifier(),
            Err(EcoSortError::ModelNotLoaded(_))
        ));

        let state = state.load(|| Ok(fake()));

        assert!(state.is_loaded());
        assert_eq!(state.classifier().unwrap().name(), "fake");
    }

    #[test]
    fn test_unloaded_to_load_failed_keeps_error() {
        let state = ModelState::Unloaded
            .load(|| Err(EcoSortError::model_load("missing.onnx", "model file not found")));

        assert!(!state.is_loaded());
        assert!(matches!(
            state.classifier(),
            Err(EcoSortError::ModelNotLoaded(_))
        ));
        assert!(matches!(
            state.into_classifier(),
            Err(EcoSortError::ModelLoad { .. })
        ));
    }

    #[test]
    fn test_transitions_are_one_way() {
        let mut loader_ran = false;
        let failed = ModelState::Unloaded.load(|| Err(EcoSortError::model_load("a", "b")));
        let still_failed = failed.load(|| {
            loader_ran = true;
            Ok(fake())
        });
        assert!(!loader_ran);
        assert!(!still_failed.is_loaded());

        let loaded = ModelState::Unloaded.load(|| Ok(fake()));
        let still_loaded = loaded.load(|| Err(EcoSortError::model_load("a", "b")));
        assert!(still_loaded.is_loaded());
    }
}
