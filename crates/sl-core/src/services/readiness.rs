use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::{sleep, Instant};

use crate::error::{LauncherError, Result};

/// Seam to the readiness-check mechanism: resolves once the named app is
/// accepting traffic, or fails on its own internal deadline.
#[async_trait]
pub trait ReadinessWaiter: Send + Sync {
    async fn await_ready(&self, name: &str) -> Result<()>;
}

/// Polls a TCP connect against the app's configured port on localhost until
/// it accepts a connection or the deadline elapses.
pub struct TcpReadinessWaiter {
    ports: HashMap<String, u16>,
    poll_interval: Duration,
    deadline: Duration,
}

impl TcpReadinessWaiter {
    pub fn new(ports: HashMap<String, u16>) -> Self {
        Self {
            ports,
            poll_interval: Duration::from_millis(500),
            deadline: Duration::from_secs(60),
        }
    }

    pub fn with_timing(mut self, poll_interval: Duration, deadline: Duration) -> Self {
        self.poll_interval = poll_interval;
        self.deadline = deadline;
        self
    }
}

#[async_trait]
impl ReadinessWaiter for TcpReadinessWaiter {
    async fn await_ready(&self, name: &str) -> Result<()> {
        let port = *self
            .ports
            .get(name)
            .ok_or_else(|| LauncherError::MissingPort(name.to_string()))?;

        let started = Instant::now();
        loop {
            if TcpStream::connect(("127.0.0.1", port)).await.is_ok() {
                tracing::debug!(app = name, port, "ready");
                return Ok(());
            }
            if started.elapsed() >= self.deadline {
                return Err(LauncherError::Readiness(
                    name.to_string(),
                    format!("port {port} not accepting connections after {:?}", self.deadline),
                ));
            }
            sleep(self.poll_interval).await;
        }
    }
}
