//! Integration tests for the traffic stack

use traffic_facade::{
    CongestionEstimator, HistoryBuffer, LinearTrendEstimator, ProportionalAllocator,
    TimingAllocator, TrafficConfig, TrafficError, TrafficManager,
};

fn assert_close(actual: &[f64], expected: &[f64], tol: f64) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < tol, "{:?} vs {:?}", actual, expected);
    }
}

#[test]
fn test_zero_history_steady_state() {
    let mut manager = TrafficManager::new(3, 5, 120.0).unwrap();
    let mut last = None;
    for _ in 0..5 {
        last = Some(manager.simulate_step(&[10.0, 10.0, 10.0]).unwrap());
    }
    let result = last.unwrap();

    assert_close(&result.predicted_counts, &[10.0, 10.0, 10.0], 1e-9);
    assert_close(&result.signal_timings, &[40.0, 40.0, 40.0], 1e-9);
}

#[test]
fn test_all_zero_fallback() {
    let estimator = LinearTrendEstimator::new(4, 10).unwrap();
    let allocator = ProportionalAllocator::new(4, 120.0).unwrap();

    let predicted = estimator.predict();
    assert_eq!(predicted, vec![0.0; 4]);
    assert_close(&allocator.allocate(&predicted).unwrap(), &[30.0; 4], 1e-12);
}

#[test]
fn test_proportionality() {
    let allocator = ProportionalAllocator::new(4, 100.0).unwrap();
    let timings = allocator.allocate(&[30.0, 10.0, 0.0, 0.0]).unwrap();
    assert_close(&timings, &[75.0, 25.0, 0.0, 0.0], 1e-9);
}

#[test]
fn test_sliding_window_evicts_first_observation() {
    let history_length = 4;
    let mut buffer = HistoryBuffer::new(2, history_length).unwrap();
    for i in 1..=history_length + 1 {
        buffer.update(&[i as f64, 100.0 + i as f64]).unwrap();
    }
    assert_eq!(buffer.oldest(), &[2.0, 102.0]);
    assert_eq!(buffer.row(0), Some(&[2.0, 102.0][..]));
}

#[test]
fn test_rejection_preserves_history() {
    let mut manager = TrafficManager::new(3, 4, 90.0).unwrap();
    manager.simulate_step(&[1.0, 2.0, 3.0]).unwrap();
    let before = manager.estimator().history().clone();
    let timings = manager.current_timings().to_vec();

    for bad in [vec![], vec![1.0], vec![1.0, 2.0, 3.0, 4.0]] {
        assert!(matches!(
            manager.simulate_step(&bad),
            Err(TrafficError::ShapeMismatch { expected: 3, .. })
        ));
        assert!(matches!(
            manager.update(&bad),
            Err(TrafficError::ShapeMismatch { .. })
        ));
    }
    assert!(matches!(
        manager.simulate_step(&[1.0, f64::NAN, 3.0]),
        Err(TrafficError::InvalidData(_))
    ));

    assert_eq!(manager.estimator().history(), &before);
    assert_eq!(manager.steps(), 1);
    assert_eq!(manager.current_timings(), timings.as_slice());
}

#[test]
fn test_predict_is_deterministic() {
    let mut manager = TrafficManager::new(3, 6, 120.0).unwrap();
    for counts in [[4.0, 9.0, 1.0], [7.0, 3.0, 2.0], [5.0, 8.0, 0.0]] {
        manager.simulate_step(&counts).unwrap();
    }
    assert_eq!(manager.predict(), manager.predict());
}

#[test]
fn test_linear_trend_extrapolates() {
    let mut manager = TrafficManager::new(2, 5, 60.0).unwrap();
    let mut last = None;
    for i in 0..5 {
        let t = i as f64;
        last = Some(manager.simulate_step(&[10.0 + 2.0 * t, 5.0]).unwrap());
    }
    let result = last.unwrap();

    // Lane 0 continues 10, 12, ..., 18 -> 20
    assert_close(&result.predicted_counts, &[20.0, 5.0], 1e-9);
    assert_close(&result.signal_timings, &[48.0, 12.0], 1e-9);
}

#[test]
fn test_config_builds_equivalent_manager() {
    let mut from_config = TrafficConfig::new(2, 3, 80.0).build_manager().unwrap();
    let mut direct = TrafficManager::new(2, 3, 80.0).unwrap();
    for counts in [[3.0, 1.0], [6.0, 1.0]] {
        assert_eq!(
            from_config.simulate_step(&counts).unwrap(),
            direct.simulate_step(&counts).unwrap()
        );
    }
}
