use std::collections::HashMap;
use std::path::Path;

use crate::error::{LauncherError, Result};
use crate::models::{AppInfo, LaunchDescriptor};

/// Command used by apps that the framework CLI runs from the repo root.
pub const DEFAULT_START_COMMAND: &str = "yarn start";

/// Development artifacts excluded from file watching.
const IGNORE_WATCH: &[&str] = &[
    "**/node_modules",
    "/dist",
    "**/@generated",
    "**/generated",
    "**/schema.gql",
];

/// Resolve one app's launch descriptor from its static info plus the global
/// tables. Pure: no side effects, deterministic for the same inputs.
///
/// The merged environment layers `common_env`, then the app's own overrides,
/// then `PORT` from the port table, each layer winning on key collision.
pub fn synthesize(
    app: &AppInfo,
    common_env: &HashMap<String, String>,
    ports: &HashMap<String, u16>,
    base_dir: &Path,
) -> Result<LaunchDescriptor> {
    let port = *ports
        .get(&app.name)
        .ok_or_else(|| LauncherError::MissingPort(app.name.clone()))?;

    let cwd = if app.run_from_app_folder {
        base_dir.join("apps").join(&app.name)
    } else {
        base_dir.to_path_buf()
    };

    let script = app
        .command
        .clone()
        .unwrap_or_else(|| format!("{DEFAULT_START_COMMAND} {}", app.name));

    let mut env = common_env.clone();
    env.extend(app.env.iter().map(|(k, v)| (k.clone(), v.clone())));
    env.insert("PORT".to_string(), port.to_string());

    // Apps the framework CLI manages restart themselves; only apps running
    // their own command from a subfolder get development-mode file watching.
    let framework_managed =
        !app.run_from_app_folder || app.command.as_deref() == Some(DEFAULT_START_COMMAND);

    let (watch, ignore_watch) = if framework_managed {
        (None, None)
    } else {
        (
            Some(vec![cwd.join("src")]),
            Some(IGNORE_WATCH.iter().map(|s| s.to_string()).collect()),
        )
    };

    Ok(LaunchDescriptor {
        name: app.name.clone(),
        cwd,
        script,
        env,
        watch,
        ignore_watch,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn app(name: &str, run_from_app_folder: bool, command: Option<&str>) -> AppInfo {
        AppInfo {
            name: name.into(),
            env: HashMap::new(),
            command: command.map(String::from),
            run_from_app_folder,
        }
    }

    fn ports(name: &str, port: u16) -> HashMap<String, u16> {
        HashMap::from([(name.to_string(), port)])
    }

    #[test]
    fn root_cwd_without_app_folder_flag() {
        let descriptor = synthesize(
            &app("gateway", false, None),
            &HashMap::new(),
            &ports("gateway", 4000),
            Path::new("/repo"),
        )
        .unwrap();
        assert_eq!(descriptor.cwd, PathBuf::from("/repo"));
    }

    #[test]
    fn app_folder_cwd_with_flag() {
        let descriptor = synthesize(
            &app("users", true, None),
            &HashMap::new(),
            &ports("users", 3001),
            Path::new("/repo"),
        )
        .unwrap();
        assert_eq!(descriptor.cwd, PathBuf::from("/repo/apps/users"));
    }

    #[test]
    fn default_script_derived_from_name() {
        let descriptor = synthesize(
            &app("users", false, None),
            &HashMap::new(),
            &ports("users", 3001),
            Path::new("/repo"),
        )
        .unwrap();
        assert_eq!(descriptor.script, "yarn start users");
    }

    #[test]
    fn explicit_command_used_verbatim() {
        let descriptor = synthesize(
            &app("users", true, Some("node dist/main.js")),
            &HashMap::new(),
            &ports("users", 3001),
            Path::new("/repo"),
        )
        .unwrap();
        assert_eq!(descriptor.script, "node dist/main.js");
    }

    #[test]
    fn port_wins_over_common_env_and_overrides() {
        let common = HashMap::from([("PORT".to_string(), "1".to_string())]);
        let mut info = app("users", false, None);
        info.env.insert("PORT".into(), "2".into());
        let descriptor =
            synthesize(&info, &common, &ports("users", 3001), Path::new("/repo")).unwrap();
        assert_eq!(descriptor.env.get("PORT"), Some(&"3001".to_string()));
    }

    #[test]
    fn app_overrides_win_over_common_env() {
        let common = HashMap::from([
            ("NODE_ENV".to_string(), "production".to_string()),
            ("LOG_LEVEL".to_string(), "info".to_string()),
        ]);
        let mut info = app("users", false, None);
        info.env.insert("LOG_LEVEL".into(), "debug".into());
        let descriptor =
            synthesize(&info, &common, &ports("users", 3001), Path::new("/repo")).unwrap();
        assert_eq!(descriptor.env.get("NODE_ENV"), Some(&"production".to_string()));
        assert_eq!(descriptor.env.get("LOG_LEVEL"), Some(&"debug".to_string()));
    }

    #[test]
    fn framework_managed_apps_have_no_watch_fields() {
        // Runs from the repo root.
        let root = synthesize(
            &app("gateway", false, None),
            &HashMap::new(),
            &ports("gateway", 4000),
            Path::new("/repo"),
        )
        .unwrap();
        assert!(root.watch.is_none());
        assert!(root.ignore_watch.is_none());

        // Subfolder, but the canonical default command.
        let canonical = synthesize(
            &app("users", true, Some(DEFAULT_START_COMMAND)),
            &HashMap::new(),
            &ports("users", 3001),
            Path::new("/repo"),
        )
        .unwrap();
        assert!(canonical.watch.is_none());
        assert!(canonical.ignore_watch.is_none());
    }

    #[test]
    fn custom_subfolder_app_gets_watch_fields() {
        let descriptor = synthesize(
            &app("users", true, Some("node dist/main.js")),
            &HashMap::new(),
            &ports("users", 3001),
            Path::new("/repo"),
        )
        .unwrap();
        assert_eq!(
            descriptor.watch,
            Some(vec![PathBuf::from("/repo/apps/users/src")])
        );
        let ignore = descriptor.ignore_watch.unwrap();
        assert_eq!(ignore.len(), 5);
        assert!(ignore.contains(&"**/node_modules".to_string()));
        assert!(ignore.contains(&"**/schema.gql".to_string()));
    }

    #[test]
    fn missing_port_is_an_error() {
        let result = synthesize(
            &app("users", false, None),
            &HashMap::new(),
            &HashMap::new(),
            Path::new("/repo"),
        );
        assert!(matches!(result, Err(LauncherError::MissingPort(name)) if name == "users"));
    }
}
