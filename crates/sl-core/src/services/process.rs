use std::collections::HashMap;

use async_trait::async_trait;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;

use crate::error::{LauncherError, Result};
use crate::models::{LaunchDescriptor, StartHandle};

use super::supervisor::Supervisor;

/// Runs descriptors as direct child processes of the launcher.
///
/// `disconnect` detaches: children are not killed and keep running after the
/// launcher exits, matching daemon-style supervisor semantics.
pub struct LocalSupervisor {
    children: Mutex<HashMap<String, Child>>,
}

impl LocalSupervisor {
    pub fn new() -> Self {
        Self {
            children: Mutex::new(HashMap::new()),
        }
    }

    /// Names of processes started through this supervisor, for diagnostics.
    pub async fn running(&self) -> Vec<String> {
        self.children.lock().await.keys().cloned().collect()
    }
}

impl Default for LocalSupervisor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Supervisor for LocalSupervisor {
    async fn connect(&self) -> Result<()> {
        Ok(())
    }

    async fn start(&self, descriptor: &LaunchDescriptor) -> Result<StartHandle> {
        let mut children = self.children.lock().await;
        if children.contains_key(&descriptor.name) {
            return Err(LauncherError::Supervisor(format!(
                "'{}' is already running",
                descriptor.name
            )));
        }

        let mut cmd = Command::new("sh");
        cmd.args(["-c", &descriptor.script]);
        cmd.current_dir(&descriptor.cwd);
        for (key, value) in &descriptor.env {
            cmd.env(key, value);
        }

        let child = cmd.spawn().map_err(|e| {
            LauncherError::Supervisor(format!("failed to spawn '{}': {e}", descriptor.name))
        })?;
        children.insert(descriptor.name.clone(), child);
        Ok(StartHandle::new(&descriptor.name))
    }

    async fn disconnect(&self) -> Result<()> {
        // Dropping the handles leaves the children running.
        self.children.lock().await.clear();
        Ok(())
    }
}
