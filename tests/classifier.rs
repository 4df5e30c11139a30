use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use oncoinsight::classifier::{
    ImageClassifier, ImageModel, ImageTensor, mock_classification, preprocess,
};
use oncoinsight::error::ModelError;
use oncoinsight::schema::v1::{ClassificationResult, Label};
use rand::SeedableRng;
use rand::rngs::StdRng;

struct FixedModel(f32);

impl ImageModel for FixedModel {
    fn name(&self) -> &str {
        "fixed"
    }

    fn predict(&self, input: &ImageTensor) -> Result<f32, ModelError> {
        assert_eq!(input.shape, [1, 32, 32, 1]);
        Ok(self.0)
    }
}

fn png_bytes(w: u32, h: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(w, h, |x, y| Rgb([(x * 4) as u8, (y * 4) as u8, 255]));
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

#[test]
fn preprocess_produces_nhwc_unit_range() {
    let t = preprocess(&png_bytes(50, 30), 32).unwrap();
    assert_eq!(t.shape, [1, 32, 32, 1]);
    assert_eq!(t.side(), 32);
    assert_eq!(t.data.len(), 32 * 32);
    assert!(t.data.iter().all(|v| (0.0..=1.0).contains(v)));
}

#[test]
fn preprocess_rejects_garbage() {
    let err = preprocess(b"not an image", 32).unwrap_err();
    assert!(matches!(err, ModelError::Preprocess(_)));
}

#[test]
fn score_interpretation() {
    let r = ClassificationResult::from_score(0.9);
    assert_eq!(r.label, Label::Malignant);
    assert!((r.confidence - 0.9).abs() < 1e-9);
    assert_eq!(r.message, "Prediction: MALIGNANT with 90.0% confidence");

    let r = ClassificationResult::from_score(0.2);
    assert_eq!(r.label, Label::Benign);
    assert!((r.confidence - 0.8).abs() < 1e-9);

    let r = ClassificationResult::from_score(0.5);
    assert_eq!(r.label, Label::Benign);
    assert_eq!(r.confidence, 0.5);

    let r = ClassificationResult::from_score(1.7);
    assert_eq!(r.confidence, 1.0);
}

#[test]
fn injected_model_is_used() {
    let clf = ImageClassifier::with_model(Box::new(FixedModel(0.873)), 32);
    assert!(!clf.is_mock());
    let r = clf.classify(&png_bytes(40, 40));
    assert_eq!(r.label, Label::Malignant);
    assert!(!r.is_mock);
    assert_eq!(r.message, "Prediction: MALIGNANT with 87.3% confidence");
}

#[test]
fn non_finite_score_falls_back() {
    let clf = ImageClassifier::with_model(Box::new(FixedModel(f32::NAN)), 32);
    let err = clf.try_classify(&png_bytes(40, 40)).unwrap_err();
    assert!(matches!(err, ModelError::Inference(_)));
    let r = clf.classify(&png_bytes(40, 40));
    assert!(r.is_mock);
}

#[test]
fn undecodable_image_falls_back() {
    let clf = ImageClassifier::with_model(Box::new(FixedModel(0.1)), 32);
    let r = clf.classify(b"\x00\x01\x02");
    assert!(r.is_mock);
    assert!((0.7..=0.95).contains(&r.confidence));
}

#[test]
fn missing_model_runs_in_mock_mode() {
    let tmp = tempfile::TempDir::new().unwrap();
    let clf = ImageClassifier::load(&tmp.path().join("absent.onnx"), 32);
    assert!(clf.is_mock());
    assert_eq!(clf.backend_name(), "mock");
    assert!(matches!(
        clf.try_classify(&png_bytes(8, 8)),
        Err(ModelError::Missing(_))
    ));
}

#[test]
fn unloadable_model_runs_in_mock_mode() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join("broken.onnx");
    std::fs::write(&path, b"definitely not protobuf").unwrap();
    let clf = ImageClassifier::load(&path, 32);
    assert!(clf.is_mock());
}

#[test]
fn mock_raw_score_matches_label() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let r = mock_classification(&mut rng);
        assert!(r.is_mock);
        assert!((0.7..=0.95).contains(&r.confidence));
        match r.label {
            Label::Malignant => assert_eq!(r.raw_score, r.confidence),
            Label::Benign => assert!((r.raw_score - (1.0 - r.confidence)).abs() < 1e-12),
        }
    }
}
