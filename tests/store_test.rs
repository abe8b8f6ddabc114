use handspell::config::Config;
use handspell::pose::LANDMARK_COUNT;
use handspell::store::{SampleStore, TrainingRecord};
use handspell::{HandPose, Session};

fn temp_config(name: &str) -> Config {
    let path = std::env::temp_dir()
        .join("handspell-store-tests")
        .join(format!("{}.json", name));
    Config::offline(path)
}

fn test_pose(seed: f32) -> HandPose {
    let mut points = [[0.0f32; 3]; LANDMARK_COUNT];
    for (i, p) in points.iter_mut().enumerate() {
        let t = i as f32;
        p[0] = 0.3 + 0.01 * t;
        p[1] = 0.4 + seed * 0.02 * t;
        p[2] = -0.001 * t * (1.0 + seed);
    }
    HandPose::from_points(&points).unwrap()
}

#[tokio::test]
async fn test_capture_is_visible_to_next_classification() {
    let mut session = Session::new(temp_config("no-staleness")).unwrap();
    session.reset().unwrap();

    let pose = test_pose(1.0);
    session.capture_sample("C", Some(&pose)).unwrap();

    let vector = pose.encode(session.descriptor());
    let prediction = session
        .classifier()
        .classify(session.store(), &vector)
        .unwrap();
    assert_eq!(prediction.label.as_deref(), Some("C"));
    assert_eq!(prediction.distance, Some(0.0));
}

#[tokio::test]
async fn test_cache_survives_session_restart() {
    let config = temp_config("restart");
    let mut session = Session::new(config.clone()).unwrap();
    session.reset().unwrap();
    session.capture_sample("A", Some(&test_pose(0.5))).unwrap();

    let mut reloaded = Session::new(config).unwrap();
    reloaded.load_all().await;
    assert!(reloaded.store().is_trained());
    assert_eq!(reloaded.store().class("A").unwrap().len(), 1);
}

#[tokio::test]
async fn test_repeated_loads_do_not_inflate_classes() {
    let config = temp_config("dedup");
    let mut session = Session::new(config.clone()).unwrap();
    session.reset().unwrap();
    session.capture_sample("A", Some(&test_pose(0.5))).unwrap();

    let mut reloaded = Session::new(config).unwrap();
    let first = reloaded.load_all().await;
    let second = reloaded.load_all().await;
    assert_eq!(first, 1);
    assert_eq!(second, 0);
    assert_eq!(reloaded.store().num_samples(), 1);
}

#[tokio::test]
async fn test_reset_clears_store_and_cache() {
    let config = temp_config("reset");
    let mut session = Session::new(config.clone()).unwrap();
    session.capture_sample("A", Some(&test_pose(0.5))).unwrap();
    session.reset().unwrap();
    assert!(!session.store().is_trained());

    let mut reloaded = Session::new(config).unwrap();
    reloaded.load_all().await;
    assert!(!reloaded.store().is_trained());
}

#[test]
fn test_merge_skips_malformed_entries_and_continues() {
    let mut store = SampleStore::new(63);
    let records = vec![
        TrainingRecord::new("A", vec![0.1; 63]),
        TrainingRecord::new("", vec![0.2; 63]),
        TrainingRecord::new("B", vec![0.3; 62]),
        TrainingRecord::new("C", vec![0.4; 63]),
    ];
    let added = store.merge_records(&records);
    assert_eq!(added, 2);
    assert_eq!(store.labels(), vec!["A", "C"]);
}

#[test]
fn test_merge_concatenates_all_sources() {
    let mut store = SampleStore::new(63);
    store.merge_records(&[TrainingRecord::new("A", vec![0.1; 63])]);
    store.merge_records(&[
        TrainingRecord::new("A", vec![0.2; 63]),
        TrainingRecord::new("B", vec![0.3; 63]),
    ]);
    assert_eq!(store.num_classes(), 2);
    assert_eq!(store.class("A").unwrap().len(), 2);
}
