//! Integration test entry point.
//!
//! Individual test modules are in tests/integration/.
//!
//! Run all integration tests:
//!   cargo test -p simplify-lint --test integration
//!
//! Run specific test module:
//!   cargo test -p simplify-lint --test integration config

#[path = "integration/scenario_tests.rs"]
mod scenario_tests;

#[path = "integration/property_tests.rs"]
mod property_tests;

#[path = "integration/config_tests.rs"]
mod config_tests;

#[path = "integration/report_tests.rs"]
mod report_tests;

/// Route engine logs to the test harness. Set `RUST_LOG=simplify_lint=trace`
/// to see every emitted finding.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_test_writer()
        .try_init();
}
