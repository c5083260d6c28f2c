use std::time::Duration;

/// Assert `actual` lies within `[expected - below, expected + above]`.
pub fn assert_duration_near(
    actual: Duration,
    expected: Duration,
    below: Duration,
    above: Duration,
) {
    let low = expected.saturating_sub(below);
    let high = expected + above;
    assert!(
        actual >= low && actual <= high,
        "expected {:?} within [{:?}, {:?}], got {:?}",
        expected,
        low,
        high,
        actual
    );
}

/// Name of the current thread, for comparing against delivery threads.
pub fn current_thread_name() -> Option<String> {
    std::thread::current().name().map(str::to_string)
}
