use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Static description of one application, as supplied by configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppInfo {
    pub name: String,
    #[serde(default)]
    pub env: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default)]
    pub run_from_app_folder: bool,
}

/// Fully resolved launch parameters for one process.
///
/// `watch`/`ignore_watch` are only populated for apps that run their own
/// command from a subfolder (development-mode file watching).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LaunchDescriptor {
    pub name: String,
    pub cwd: PathBuf,
    pub script: String,
    pub env: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub watch: Option<Vec<PathBuf>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_watch: Option<Vec<String>>,
}

/// Opaque evidence that the supervisor accepted a start request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartHandle {
    pub name: String,
    pub started_at: DateTime<Utc>,
}

impl StartHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            started_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppReadiness {
    pub name: String,
    pub ready: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AggregatorOutcome {
    pub name: String,
    pub ready: bool,
}

/// Outcome of a full launch sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchReport {
    pub started: Vec<String>,
    pub dependency_readiness: Vec<AppReadiness>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregator: Option<AggregatorOutcome>,
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_serializes_camel_case() {
        let descriptor = LaunchDescriptor {
            name: "users".into(),
            cwd: PathBuf::from("/repo/apps/users"),
            script: "node main.js".into(),
            env: HashMap::new(),
            watch: Some(vec![PathBuf::from("/repo/apps/users/src")]),
            ignore_watch: Some(vec!["**/node_modules".into()]),
        };
        let json = serde_json::to_string(&descriptor).unwrap();
        assert!(json.contains("\"ignoreWatch\""));
        assert!(!json.contains("\"ignore_watch\""));
    }

    #[test]
    fn descriptor_omits_absent_watch_fields() {
        let descriptor = LaunchDescriptor {
            name: "gateway".into(),
            cwd: PathBuf::from("/repo"),
            script: "yarn start gateway".into(),
            env: HashMap::new(),
            watch: None,
            ignore_watch: None,
        };
        let json = serde_json::to_string(&descriptor).unwrap();
        assert!(!json.contains("watch"));
    }

    #[test]
    fn app_info_defaults() {
        let yaml = "name: users\n";
        let app: AppInfo = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(app.name, "users");
        assert!(app.env.is_empty());
        assert!(app.command.is_none());
        assert!(!app.run_from_app_folder);
    }
}
