//! Integration tests for BVH diagnostics routed through the Engine logger
//!
//! Every test swaps the global logger, so all of them run serially.
//!
//! Run with: cargo test --test logging_integration_tests

use galaxy_3d_bvh::galaxy3d::{Bvh, BvhConfig, Engine, Error};
use galaxy_3d_bvh::galaxy3d::bvh::{BvhInstance, BvhUpdate};
use galaxy_3d_bvh::galaxy3d::log::{Logger, LogEntry, LogSeverity};
use galaxy_3d_bvh::galaxy3d::math::AABB;
use galaxy_3d_bvh::glam::Vec3;
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn capture(level: LogSeverity) -> Arc<Mutex<Vec<LogEntry>>> {
    let (logger, entries) = TestLogger::new();
    Engine::set_logger(logger);
    Engine::set_log_level(level);
    entries
}

fn teardown() {
    Engine::reset_logger();
    Engine::set_log_level(LogSeverity::Info);
}

fn cube(x: f32, z: f32) -> AABB {
    AABB::new(Vec3::new(x, 0.0, z), Vec3::new(x + 1.0, 1.0, z + 1.0))
}

fn grid() -> Vec<BvhInstance> {
    (0..40u64).map(|id| BvhInstance::new(cube((id % 8) as f32, (id / 8) as f32), id)).collect()
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_build_logs_stats_at_debug() {
    let entries = capture(LogSeverity::Debug);

    let mut bvh = Bvh::new();
    bvh.build(&grid());

    {
        let captured = entries.lock().unwrap();
        let build_logs: Vec<&LogEntry> = captured
            .iter()
            .filter(|e| e.source == "galaxy3d::Bvh" && e.severity == LogSeverity::Debug)
            .collect();
        assert_eq!(build_logs.len(), 1);
        assert!(build_logs[0].message.contains("Built 40 instances"));
        assert!(build_logs[0].message.contains(&format!("{} nodes", bvh.node_count())));
    }

    teardown();
}

#[test]
#[serial]
fn test_integration_build_is_silent_at_info() {
    let entries = capture(LogSeverity::Info);

    let mut bvh = Bvh::new();
    bvh.build(&grid());
    bvh.build(&[]);
    bvh.clear();

    assert!(entries.lock().unwrap().is_empty());

    teardown();
}

#[test]
#[serial]
fn test_integration_empty_build_logged() {
    let entries = capture(LogSeverity::Trace);

    let mut bvh = Bvh::new();
    bvh.build(&[]);
    bvh.clear();

    {
        let captured = entries.lock().unwrap();
        assert!(captured.iter().any(|e| e.severity == LogSeverity::Debug && e.message.contains("no instances")));
        assert!(captured.iter().any(|e| e.severity == LogSeverity::Trace && e.message == "Cleared"));
    }

    teardown();
}

#[test]
#[serial]
fn test_integration_update_miss_warns() {
    let instances = grid();
    let mut bvh = Bvh::new();
    bvh.build(&instances);

    let entries = capture(LogSeverity::Info);
    bvh.update(&[
        BvhUpdate::new(cube(-5.0, -5.0), cube(0.0, 0.0), 3),
        BvhUpdate::new(instances[4].aabb, cube(20.0, 0.0), 4),
    ]);

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].severity, LogSeverity::Warn);
        assert_eq!(captured[0].source, "galaxy3d::Bvh");
        assert!(captured[0].message.contains("instance 3 not found"));
    }

    teardown();
}

#[test]
#[serial]
fn test_integration_remove_miss_warns() {
    let instances = grid();
    let mut bvh = Bvh::new();
    bvh.build(&instances);

    let entries = capture(LogSeverity::Warn);
    assert!(!bvh.remove(999, &instances[0].aabb));
    assert!(bvh.remove(0, &instances[0].aabb));

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert!(captured[0].message.starts_with("Remove ignored: instance 999"));
    }

    teardown();
}

#[test]
#[serial]
fn test_integration_update_on_empty_bvh_warns() {
    let entries = capture(LogSeverity::Warn);

    let mut bvh = Bvh::new();
    bvh.update(&[BvhUpdate::new(cube(0.0, 0.0), cube(1.0, 0.0), 0)]);

    assert_eq!(entries.lock().unwrap().len(), 1);

    teardown();
}

#[test]
#[serial]
fn test_integration_invalid_config_logs_error() {
    let entries = capture(LogSeverity::Info);

    let config = BvhConfig { max_instances_per_leaf: 0, ..BvhConfig::default() };
    let result = Bvh::with_config(config);
    assert!(matches!(result, Err(Error::InvalidConfig(_))));

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].severity, LogSeverity::Error);
        assert_eq!(captured[0].source, "galaxy3d::BvhConfig");
        assert!(captured[0].message.contains("max_instances_per_leaf"));
        assert!(captured[0].file.is_some());
        assert!(captured[0].line.is_some());
    }

    teardown();
}

#[test]
#[serial]
fn test_integration_errors_pass_warn_threshold() {
    let entries = capture(LogSeverity::Error);

    let mut bvh = Bvh::new();
    bvh.build(&grid());
    assert!(!bvh.remove(12345, &cube(0.0, 0.0)));
    let _ = Bvh::with_config(BvhConfig { num_sah_bins: 1, ..BvhConfig::default() });

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].severity, LogSeverity::Error);
    }

    teardown();
}
