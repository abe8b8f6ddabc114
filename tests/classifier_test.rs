use handspell::classifier::{Classifier, ClassifierError, Engine};
use handspell::store::SampleStore;
use ndarray::Array1;

fn vector(fill: f32) -> Array1<f32> {
    Array1::from_elem(63, fill)
}

fn setup_test_store() -> SampleStore {
    let mut store = SampleStore::new(63);
    store.add_sample("A", vector(0.0)).unwrap();
    store.add_sample("B", vector(1.0)).unwrap();
    store
}

#[test]
fn test_identical_sample_matches_at_distance_zero() {
    let store = setup_test_store();
    let classifier = Classifier::builder().build().unwrap();

    let prediction = classifier.classify(&store, &vector(0.0)).unwrap();
    assert_eq!(prediction.label.as_deref(), Some("A"));
    assert_eq!(prediction.distance, Some(0.0));
}

#[test]
fn test_closest_sample_wins() {
    let store = setup_test_store();
    let classifier = Classifier::builder().build().unwrap();

    let prediction = classifier.classify(&store, &vector(0.9)).unwrap();
    assert_eq!(prediction.label.as_deref(), Some("B"));
}

#[test]
fn test_tie_breaks_on_first_encountered_class() {
    let mut store = SampleStore::new(63);
    store.add_sample("A", vector(0.0)).unwrap();
    store.add_sample("B", vector(2.0)).unwrap();
    let classifier = Classifier::builder().build().unwrap();

    // Equidistant from both stored samples.
    let prediction = classifier.classify(&store, &vector(1.0)).unwrap();
    assert_eq!(prediction.label.as_deref(), Some("A"));
}

#[test]
fn test_untrained_store_is_an_explicit_state() {
    let store = SampleStore::new(63);
    let classifier = Classifier::builder().build().unwrap();

    let result = classifier.classify(&store, &vector(0.0));
    assert!(matches!(result, Err(ClassifierError::Untrained)));
}

#[test]
fn test_wrong_length_input_rejected() {
    let store = setup_test_store();
    let classifier = Classifier::builder().build().unwrap();

    let result = classifier.classify(&store, &Array1::from_elem(62, 0.0f32));
    assert!(matches!(result, Err(ClassifierError::ValidationError(_))));
}

#[test]
fn test_centroid_engine_accepts_below_threshold() {
    let store = setup_test_store();
    let classifier = Classifier::builder()
        .with_engine(Engine::NearestCentroid)
        .with_match_threshold(0.35)
        .build()
        .unwrap();

    let prediction = classifier.classify(&store, &vector(0.3)).unwrap();
    assert_eq!(prediction.label.as_deref(), Some("A"));
    let confidence = prediction.confidence.unwrap();
    assert!(confidence > 0.6 && confidence < 0.8);
}

#[test]
fn test_centroid_engine_rejects_above_threshold() {
    let mut store = SampleStore::new(63);
    store.add_sample("A", vector(0.0)).unwrap();
    let classifier = Classifier::builder()
        .with_engine(Engine::NearestCentroid)
        .with_match_threshold(0.35)
        .build()
        .unwrap();

    // Far from the only centroid: no match, which is not the same as
    // untrained.
    let prediction = classifier.classify(&store, &vector(5.0)).unwrap();
    assert!(prediction.label.is_none());
}

#[test]
fn test_centroid_uses_class_mean() {
    let mut store = SampleStore::new(63);
    store.add_sample("A", vector(0.0)).unwrap();
    store.add_sample("A", vector(0.2)).unwrap();
    let classifier = Classifier::builder()
        .with_engine(Engine::NearestCentroid)
        .build()
        .unwrap();

    // Mean is 0.1; the input sits exactly on it.
    let prediction = classifier.classify(&store, &vector(0.1)).unwrap();
    assert_eq!(prediction.label.as_deref(), Some("A"));
    assert!(prediction.distance.unwrap() < 1e-6);
}

#[test]
fn test_overlapping_call_is_dropped_not_queued() {
    let store = setup_test_store();
    let classifier = Classifier::builder().build().unwrap();

    assert!(!classifier.set_in_flight(true));
    let result = classifier.classify(&store, &vector(0.0));
    assert!(matches!(result, Err(ClassifierError::Busy)));

    classifier.set_in_flight(false);
    assert!(classifier.classify(&store, &vector(0.0)).is_ok());
}
