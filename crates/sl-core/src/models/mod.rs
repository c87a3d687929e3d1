pub mod app;
pub mod config;

pub use app::{
    AggregatorOutcome, AppInfo, AppReadiness, LaunchDescriptor, LaunchReport, StartHandle,
};
pub use config::LauncherConfig;
