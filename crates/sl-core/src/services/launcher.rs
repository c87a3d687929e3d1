use std::path::Path;

use chrono::Utc;

use crate::error::Result;
use crate::models::{AggregatorOutcome, AppReadiness, LaunchReport, LauncherConfig};
use crate::services::combinators::{join_all_or_abort, settle_all};
use crate::services::descriptor;
use crate::services::readiness::ReadinessWaiter;
use crate::services::supervisor::{Supervisor, SupervisorConnector};

/// Orchestrates the two-phase startup: all dependency apps first, then the
/// aggregator once they have had a chance to report readiness.
///
/// Dependency readiness is a timing hint, not a hard precondition: a
/// dependency that never becomes ready does not prevent the aggregator from
/// being started.
pub struct LaunchController<S, R> {
    connector: SupervisorConnector<S>,
    readiness: R,
}

impl<S: Supervisor, R: ReadinessWaiter> LaunchController<S, R> {
    pub fn new(supervisor: S, readiness: R) -> Self {
        Self {
            connector: SupervisorConnector::new(supervisor),
            readiness,
        }
    }

    /// Run the full launch sequence against `config`.
    ///
    /// The supervisor connection is released on every exit path after a
    /// successful connect, including start failures mid-sequence. Only a
    /// connection failure is fatal to the caller; aggregator readiness
    /// failure is logged and does not affect the outcome.
    pub async fn launch(&self, config: &LauncherConfig, base_dir: &Path) -> Result<LaunchReport> {
        self.connector.connect().await?;
        let result = self.run_phases(config, base_dir).await;
        self.connector.disconnect().await;
        result
    }

    async fn run_phases(&self, config: &LauncherConfig, base_dir: &Path) -> Result<LaunchReport> {
        let dependencies = config.dependency_apps();

        let descriptors = dependencies
            .iter()
            .copied()
            .map(|app| descriptor::synthesize(app, &config.common_env, &config.ports, base_dir))
            .collect::<Result<Vec<_>>>()?;

        // Phase one: every dependency start must succeed before readiness
        // waiting begins.
        let handles =
            join_all_or_abort(descriptors.iter().map(|d| self.connector.start(d))).await?;
        let mut started: Vec<String> = handles.into_iter().map(|h| h.name).collect();

        tracing::info!(count = dependencies.len(), "waiting for aggregator dependencies");
        let outcomes = settle_all(
            dependencies
                .iter()
                .map(|app| self.readiness.await_ready(&app.name)),
        )
        .await;
        let dependency_readiness: Vec<AppReadiness> = dependencies
            .iter()
            .zip(&outcomes)
            .map(|(app, outcome)| AppReadiness {
                name: app.name.clone(),
                ready: outcome.is_ok(),
            })
            .collect();

        // Phase two: the aggregator, once every dependency start has settled.
        let aggregator = match config.aggregator_app() {
            Some(app) => {
                let desc =
                    descriptor::synthesize(app, &config.common_env, &config.ports, base_dir)?;
                let handle = self.connector.start(&desc).await?;
                started.push(handle.name);

                let ready = match self.readiness.await_ready(&app.name).await {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::error!(app = %app.name, error = %e, "aggregator is not ready");
                        false
                    }
                };
                Some(AggregatorOutcome {
                    name: app.name.clone(),
                    ready,
                })
            }
            None => None,
        };

        tracing::info!("all apps started");
        Ok(LaunchReport {
            started,
            dependency_readiness,
            aggregator,
            completed_at: Utc::now(),
        })
    }
}
