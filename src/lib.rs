pub use recur_scheduler_api as api;
pub use recur_scheduler_domain as domain;
pub use recur_scheduler_infra as infra;

use recur_scheduler_infra::telemetry::{get_subscriber, init_subscriber};

/// Installs the bunyan JSON subscriber for the whole process, filtering
/// at `info` unless `RUST_LOG` says otherwise. Should only be called once.
pub fn init_telemetry(name: &str) -> anyhow::Result<()> {
    let subscriber = get_subscriber(name.into(), "info".into());
    init_subscriber(subscriber)?;
    tracing::info!(name, "Telemetry initialized");
    Ok(())
}
