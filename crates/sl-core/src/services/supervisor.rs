use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::error::{LauncherError, Result};
use crate::models::{LaunchDescriptor, StartHandle};

/// Seam to the external process manager that spawns and monitors OS
/// processes from a descriptor.
#[async_trait]
pub trait Supervisor: Send + Sync {
    async fn connect(&self) -> Result<()>;
    async fn start(&self, descriptor: &LaunchDescriptor) -> Result<StartHandle>;
    async fn disconnect(&self) -> Result<()>;
}

/// Guards the lifecycle of a single supervisor connection: connect once,
/// issue start requests, disconnect once.
pub struct SupervisorConnector<S> {
    supervisor: S,
    connected: AtomicBool,
}

impl<S: Supervisor> SupervisorConnector<S> {
    pub fn new(supervisor: S) -> Self {
        Self {
            supervisor,
            connected: AtomicBool::new(false),
        }
    }

    /// Establish the supervisor connection. Failure is fatal for the launch
    /// sequence; the binary maps it to the distinguished exit status.
    pub async fn connect(&self) -> Result<()> {
        match self.supervisor.connect().await {
            Ok(()) => {
                tracing::info!("connected to supervisor");
                self.connected.store(true, Ordering::SeqCst);
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "error connecting to supervisor");
                Err(LauncherError::Connection(e.to_string()))
            }
        }
    }

    /// Submit one launch descriptor, resolving with an opaque handle or a
    /// logged `Start` error.
    pub async fn start(&self, descriptor: &LaunchDescriptor) -> Result<StartHandle> {
        if !self.connected.load(Ordering::SeqCst) {
            return Err(LauncherError::Connection(
                "not connected to supervisor".into(),
            ));
        }
        tracing::info!(app = %descriptor.name, "starting");
        self.supervisor.start(descriptor).await.map_err(|e| {
            tracing::error!(app = %descriptor.name, error = %e, "start failed");
            LauncherError::Start(descriptor.name.clone(), e.to_string())
        })
    }

    /// Release the connection. Best-effort: failures are logged, never
    /// surfaced. Safe to call more than once.
    pub async fn disconnect(&self) {
        if !self.connected.swap(false, Ordering::SeqCst) {
            return;
        }
        match self.supervisor.disconnect().await {
            Ok(()) => tracing::info!("disconnected from supervisor"),
            Err(e) => tracing::warn!(error = %e, "supervisor disconnect failed"),
        }
    }
}
