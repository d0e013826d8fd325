//! Mocks of the probe collaborators and helpers shared by the workspace tests.

pub mod csv_loader;
pub mod sinks;
pub mod sources;

/// Routes `log` output through the test harness. Safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
