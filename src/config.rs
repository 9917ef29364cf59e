use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::consts::DEFAULT_DB_FILE;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigSortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ConfigOutputFormat {
    Text,
    Table,
    Json,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) db: Option<PathBuf>,
    #[serde(default)]
    pub(crate) projects_dir: Option<PathBuf>,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    /// Real paths whose flattened form is removed from project names
    #[serde(default)]
    pub(crate) strip_prefixes: Vec<String>,
    #[serde(default)]
    pub(crate) color: Option<ConfigColorMode>,
    #[serde(default)]
    pub(crate) order: Option<ConfigSortOrder>,
    #[serde(default)]
    pub(crate) format: Option<ConfigOutputFormat>,
    #[serde(default)]
    pub(crate) debug: bool,
}

impl Config {
    pub(crate) fn load(quiet: bool) -> Self {
        // Try config locations in order of priority
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        if !quiet {
                            eprintln!("Loaded config from {}", path.display());
                        }
                        return config;
                    }
                    Err(e) => {
                        if !quiet {
                            eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                        }
                    }
                }
            }
        }

        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/cctimesheet/config.toml (Linux/cross-platform)
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("cctimesheet").join("config.toml"));
        }

        // 2. Platform config dir, e.g. ~/Library/Application Support/cctimesheet/config.toml
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("cctimesheet").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.cctimesheet.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".cctimesheet.toml"));
        }

        paths
    }
}

/// Where the message database lives when neither `--db` nor config names one
pub(crate) fn default_db_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("cctimesheet"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DB_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paths() {
        let paths = Config::get_config_paths();
        assert!(!paths.is_empty());
        assert!(paths.iter().all(|p| p.to_string_lossy().contains("cctimesheet")));
    }

    #[test]
    fn parses_every_key() {
        let config: Config = toml::from_str(
            r#"
            db = "/data/timesheets/messages.db"
            projects_dir = "/mnt/claude/projects"
            timezone = "Europe/Berlin"
            strip_prefixes = ["/Users/alice/Code", "/Users/alice/clients"]
            color = "always"
            order = "desc"
            format = "json"
            debug = true
            "#,
        )
        .unwrap();
        assert_eq!(config.projects_dir, Some(PathBuf::from("/mnt/claude/projects")));
        assert_eq!(config.strip_prefixes.len(), 2);
        assert!(matches!(config.format, Some(ConfigOutputFormat::Json)));
        assert!(matches!(config.order, Some(ConfigSortOrder::Desc)));
        assert!(config.debug);
    }

    #[test]
    fn empty_file_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.db.is_none());
        assert!(config.strip_prefixes.is_empty());
        assert!(!config.debug);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(toml::from_str::<Config>(r#"format = "xml""#).is_err());
        assert!(toml::from_str::<Config>(r#"colour = "never""#).is_err());
    }

    #[test]
    fn default_db_path_uses_file_name() {
        assert!(default_db_path().ends_with(DEFAULT_DB_FILE));
    }
}
