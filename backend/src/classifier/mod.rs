pub mod labels;
pub mod preprocess;
#[cfg(feature = "torch")]
pub mod torch;

use ndarray::Array4;
use std::path::Path;
use std::sync::Arc;

use labels::{disease_info, label_for};
use preprocess::preprocess;

/// NHWC batch fed to the network.
pub type ImageTensor = Array4<f32>;

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("{0}")]
    Preprocessing(String),
    #[error("Model is not loaded")]
    ModelUnavailable,
    #[error("Model error: {0}")]
    Model(String),
    #[error("Model returned no scores")]
    EmptyOutput,
}

pub trait Classifier: Send + Sync {
    /// Per-class scores for a single-image batch.
    fn predict(&self, input: &ImageTensor) -> Result<Vec<f32>, InferenceError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnosis {
    pub class_index: usize,
    pub label: &'static str,
    pub cause: &'static str,
    pub prevention: &'static str,
}

impl Diagnosis {
    pub fn from_scores(scores: &[f32]) -> Result<Self, InferenceError> {
        let class_index = argmax(scores).ok_or(InferenceError::EmptyOutput)?;
        let label = label_for(class_index);
        let info = disease_info(label);

        Ok(Self {
            class_index,
            label,
            cause: info.cause,
            prevention: info.prevention,
        })
    }
}

/// Index of the highest score; the first one wins ties.
pub fn argmax(scores: &[f32]) -> Option<usize> {
    scores
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (i, &score)| match best {
            Some((_, top)) if score <= top => best,
            _ => Some((i, score)),
        })
        .map(|(i, _)| i)
}

/// Shared handle to the classifier. The server starts without one if the
/// model could not be loaded; every prediction then fails.
#[derive(Clone)]
pub struct Model {
    classifier: Option<Arc<dyn Classifier>>,
}

impl Model {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self {
            classifier: Some(classifier),
        }
    }

    pub fn unavailable() -> Self {
        Self { classifier: None }
    }

    pub fn is_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn inference(&self, image: &[u8]) -> Result<Diagnosis, InferenceError> {
        let tensor = preprocess(image)?;
        let classifier = self
            .classifier
            .as_ref()
            .ok_or(InferenceError::ModelUnavailable)?;
        let scores = classifier.predict(&tensor)?;
        Diagnosis::from_scores(&scores)
    }
}

#[cfg(feature = "torch")]
pub fn load_model(path: &Path) -> Model {
    match torch::TorchClassifier::load(path) {
        Ok(classifier) => {
            log::info!("Model loaded from {}", path.display());
            Model::new(Arc::new(classifier))
        }
        Err(e) => {
            log::error!("Failed to load model from {}: {}", path.display(), e);
            Model::unavailable()
        }
    }
}

#[cfg(not(feature = "torch"))]
pub fn load_model(path: &Path) -> Model {
    log::warn!(
        "Built without the `torch` feature; {} was not loaded and predictions will fail",
        path.display()
    );
    Model::unavailable()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<f32>);

    impl Classifier for Fixed {
        fn predict(&self, input: &ImageTensor) -> Result<Vec<f32>, InferenceError> {
            assert_eq!(input.shape(), &[1, 224, 224, 3]);
            Ok(self.0.clone())
        }
    }

    fn tiny_png() -> Vec<u8> {
        let img = image::DynamicImage::new_rgb8(2, 2);
        let mut bytes = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn argmax_picks_first_highest() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), Some(1));
        assert_eq!(argmax(&[0.5, 0.5]), Some(0));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn diagnosis_maps_scores_to_guidance() {
        let mut scores = vec![0.0; 11];
        scores[2] = 0.9;
        let diagnosis = Diagnosis::from_scores(&scores).unwrap();
        assert_eq!(diagnosis.class_index, 2);
        assert_eq!(diagnosis.label, "Late_blight");
        assert_eq!(diagnosis.cause, "Caused by the oomycete Phytophthora infestans.");
    }

    #[test]
    fn extra_output_classes_are_unknown() {
        let mut scores = vec![0.0; 12];
        scores[11] = 1.0;
        let diagnosis = Diagnosis::from_scores(&scores).unwrap();
        assert_eq!(diagnosis.label, "Unknown");
        assert_eq!(diagnosis.cause, "Unknown");
        assert_eq!(diagnosis.prevention, "Unknown");
    }

    #[test]
    fn inference_runs_classifier_on_preprocessed_image() {
        let mut scores = vec![0.0; 11];
        scores[9] = 0.99;
        let model = Model::new(Arc::new(Fixed(scores)));
        assert_eq!(model.inference(&tiny_png()).unwrap().label, "healthy");
    }

    #[test]
    fn unloaded_model_still_rejects_bad_images_first() {
        let model = Model::unavailable();
        assert!(!model.is_loaded());
        assert!(matches!(
            model.inference(b"junk"),
            Err(InferenceError::Preprocessing(_))
        ));
        assert!(matches!(
            model.inference(&tiny_png()),
            Err(InferenceError::ModelUnavailable)
        ));
    }

    #[test]
    fn empty_scores_are_an_error() {
        let model = Model::new(Arc::new(Fixed(Vec::new())));
        assert!(matches!(
            model.inference(&tiny_png()),
            Err(InferenceError::EmptyOutput)
        ));
    }
}
