use std::collections::HashSet;
use std::path::Path;

use crate::error::{LauncherError, Result};
use crate::models::LauncherConfig;

const CONFIG_FILENAME: &str = ".stack-launcher.yaml";

pub fn load(base_dir: &Path) -> Result<LauncherConfig> {
    let config_path = base_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Err(LauncherError::ConfigNotFound(config_path));
    }
    let contents = std::fs::read_to_string(&config_path)?;
    let config: LauncherConfig = serde_yaml::from_str(&contents)
        .map_err(|e| LauncherError::InvalidConfig(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &LauncherConfig) -> Result<()> {
    let mut seen = HashSet::new();
    for app in &config.apps {
        if !seen.insert(app.name.as_str()) {
            return Err(LauncherError::InvalidConfig(format!(
                "duplicate app name '{}'",
                app.name
            )));
        }
    }
    // A typo here would silently skip phase two, so fail loudly instead.
    if let Some(name) = config.aggregator.as_deref() {
        if !config.apps.iter().any(|a| a.name == name) {
            return Err(LauncherError::InvalidConfig(format!(
                "aggregator '{name}' is not a configured app"
            )));
        }
    }
    Ok(())
}
