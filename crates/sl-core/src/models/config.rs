use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use super::AppInfo;

/// The full launch configuration, constructed once and passed by reference
/// into the orchestrator.
#[derive(Debug, Clone, Deserialize)]
pub struct LauncherConfig {
    pub apps: Vec<AppInfo>,
    #[serde(default)]
    pub ports: HashMap<String, u16>,
    #[serde(default)]
    pub common_env: HashMap<String, String>,
    #[serde(default)]
    pub enabled: HashSet<String>,
    #[serde(default)]
    pub aggregator: Option<String>,
}

impl LauncherConfig {
    pub fn is_enabled(&self, name: &str) -> bool {
        self.enabled.contains(name)
    }

    /// Enabled apps that must be launched before the aggregator, in
    /// declaration order.
    pub fn dependency_apps(&self) -> Vec<&AppInfo> {
        self.apps
            .iter()
            .filter(|a| self.enabled.contains(&a.name))
            .filter(|a| self.aggregator.as_deref() != Some(a.name.as_str()))
            .collect()
    }

    /// The aggregator app, when one is configured and enabled.
    pub fn aggregator_app(&self) -> Option<&AppInfo> {
        let name = self.aggregator.as_deref()?;
        if !self.enabled.contains(name) {
            return None;
        }
        self.apps.iter().find(|a| a.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(aggregator: Option<&str>, enabled: &[&str]) -> LauncherConfig {
        let app = |name: &str| AppInfo {
            name: name.into(),
            env: HashMap::new(),
            command: None,
            run_from_app_folder: false,
        };
        LauncherConfig {
            apps: vec![app("users"), app("orders"), app("gateway")],
            ports: HashMap::new(),
            common_env: HashMap::new(),
            enabled: enabled.iter().map(|s| s.to_string()).collect(),
            aggregator: aggregator.map(String::from),
        }
    }

    #[test]
    fn dependency_apps_exclude_aggregator_and_disabled() {
        let config = config(Some("gateway"), &["users", "gateway"]);
        let deps: Vec<&str> = config
            .dependency_apps()
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(deps, vec!["users"]);
    }

    #[test]
    fn dependency_apps_preserve_declaration_order() {
        let config = config(None, &["orders", "users"]);
        let deps: Vec<&str> = config
            .dependency_apps()
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(deps, vec!["users", "orders"]);
    }

    #[test]
    fn aggregator_app_requires_enablement() {
        let config = config(Some("gateway"), &["users"]);
        assert!(config.aggregator_app().is_none());
    }

    #[test]
    fn aggregator_app_found_when_enabled() {
        let config = config(Some("gateway"), &["gateway"]);
        assert_eq!(config.aggregator_app().unwrap().name, "gateway");
    }
}
