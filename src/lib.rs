mod config;
mod display;
pub mod metrics;
mod shell;

pub use config::{ConfigError, MonitorConfig, WindowConfig, CONFIG_ENV_OVERRIDE};
pub use display::DisplayState;
pub use metrics::{
    CollectError, CpuInfo, DeliveryChannel, FailureReason, HostIdentity, MemoryInfo,
    MetricsProvider, NetworkInterface, OverlapPolicy, ProviderError, QueryFailure, QueryKind,
    SnapshotCollector, SnapshotPoller, SnapshotSink, StorageInfo, SysinfoProvider, SystemData,
};
pub use shell::{
    close_hides_window, exits_when_windows_closed, reveal_window, toggle_window, TrayAction,
    Visibility, WindowControl,
};

#[cfg(feature = "app")]
mod app;

#[cfg(feature = "app")]
pub use app::run;

/// Installs the `env_logger` backend. `RUST_LOG` overrides the default `info` level.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
