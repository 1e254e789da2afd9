//! Face-shape classification.
//!
//! Real detection is out of scope; `RandomFaceShapeClassifier` stands in
//! for a vision model and picks a shape uniformly at random.

use rand::Rng;
use rand::seq::SliceRandom;

use hairfit_types::error::SuggestionError;
use hairfit_types::face::{Classification, FaceShape};

/// Lower bound of the confidence reported by the random classifier.
const MIN_CONFIDENCE: f64 = 0.7;

/// Produces a face-shape classification for a photo.
pub trait FaceShapeClassifier: Send + Sync {
    fn classify(&self, photo: &[u8]) -> Result<Classification, SuggestionError>;
}

/// Placeholder classifier: uniform shape, confidence in `[0.7, 1.0)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomFaceShapeClassifier;

impl FaceShapeClassifier for RandomFaceShapeClassifier {
    fn classify(&self, photo: &[u8]) -> Result<Classification, SuggestionError> {
        if photo.is_empty() {
            return Err(SuggestionError::InvalidInput("photo is empty".to_string()));
        }

        let mut rng = rand::thread_rng();
        let face_shape = *FaceShape::ALL
            .choose(&mut rng)
            .unwrap_or(&FaceShape::Oval);
        let confidence = MIN_CONFIDENCE + rng.gen_range(0.0..(1.0 - MIN_CONFIDENCE));

        tracing::debug!(%face_shape, confidence, "classified photo");
        Classification::new(face_shape, confidence)
    }
}
