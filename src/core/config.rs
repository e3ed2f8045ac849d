//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.navstack/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use clap::ValueEnum;
use log::{LevelFilter, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::navigator::DEFAULT_HISTORY_LIMIT;
use crate::core::route::Route;
use crate::core::scenario::{ErrorPolicy, OutputFormat};
use crate::core::state::NavigationState;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub replay: ReplayConfig,
    #[serde(default)]
    pub playground: PlaygroundConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
    pub log_file: Option<String>,
    pub history_limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ReplayConfig {
    pub on_error: Option<ErrorPolicy>,
    pub output: Option<OutputFormat>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PlaygroundConfig {
    pub routes: Option<Vec<String>>,
    pub index: Option<usize>,
    pub key_prefix: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
pub const DEFAULT_LOG_FILE: &str = "navstack.log";
pub const DEFAULT_KEY_PREFIX: &str = "screen";
const DEFAULT_ROUTES: [&str; 3] = ["home", "inbox", "settings"];

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub history_limit: usize,
    pub on_error: ErrorPolicy,
    pub output: OutputFormat,
    pub initial_state: NavigationState,
    pub key_prefix: String,
}

/// CLI flags that take part in resolution (None = not specified).
#[derive(Debug, Default, Clone, Copy)]
pub struct CliOverrides {
    pub on_error: Option<ErrorPolicy>,
    pub output: Option<OutputFormat>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.navstack/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".navstack").join("config.toml"))
}

/// Where the file-level settings came from.
///
/// Loading runs before the logger exists, so the outcome is returned and
/// logged by the caller once logging is set up.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Read from this file.
    File(PathBuf),
    /// No config existed; a commented-out default was written here.
    Generated(PathBuf),
    /// Built-in defaults only, with the reason no file was used.
    Defaults(String),
}

impl ConfigSource {
    pub fn log(&self) {
        match self {
            ConfigSource::File(p) => info!("Loaded config from {}", p.display()),
            ConfigSource::Generated(p) => {
                info!("No config file found, generated default at {}", p.display())
            }
            ConfigSource::Defaults(reason) => warn!("Using default config: {}", reason),
        }
    }
}

/// Load config from `path`, or from `~/.navstack/config.toml` when `None`.
///
/// A missing default config is generated (commented out) and treated as
/// empty. An explicitly given path that does not exist is an error.
pub fn load_config(path: Option<&Path>) -> Result<(NavConfig, ConfigSource), ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) if !p.exists() => {
                let source = match generate_default_config(&p) {
                    Ok(()) => ConfigSource::Generated(p),
                    Err(e) => ConfigSource::Defaults(format!(
                        "failed to write default config to {}: {e}",
                        p.display()
                    )),
                };
                return Ok((NavConfig::default(), source));
            }
            Some(p) => p,
            None => {
                let reason = "could not determine home directory".to_string();
                return Ok((NavConfig::default(), ConfigSource::Defaults(reason)));
            }
        },
    };

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    Ok((config, ConfigSource::File(path)))
}

pub fn parse_config(contents: &str) -> Result<NavConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    let default_content = r#"# navstack configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# log_level = "debug"                # off, error, warn, info, debug, trace
# log_file = "navstack.log"          # Or set NAVSTACK_LOG_FILE
# history_limit = 100                # Undo depth in the playground

# [replay]
# on_error = "stop"                  # "stop" or "skip"
# output = "pretty"                  # "pretty", "json" or "summary"

# [playground]
# routes = ["home", "inbox", "settings"]
# index = 0
# key_prefix = "screen"              # Pushed routes are named <prefix>-<id>
"#;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_content)
}

// ============================================================================
// Resolution
// ============================================================================

/// Log level and file, resolved without logging anything.
///
/// The logger is built from these before `resolve` runs, so `resolve` can
/// report invalid values through it.
pub fn log_settings(config: &NavConfig) -> (LevelFilter, PathBuf) {
    let env_level = std::env::var("NAVSTACK_LOG_LEVEL").ok();
    let level = pick_log_level(env_level.as_deref(), config.general.log_level.as_deref(), false);
    (level, resolve_log_file(config))
}

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// Each setting takes the highest layer holding a valid value. Invalid
/// values are skipped with a warning, so the next layer down applies and
/// ultimately the default.
pub fn resolve(config: &NavConfig, cli: CliOverrides) -> ResolvedConfig {
    let env_level = std::env::var("NAVSTACK_LOG_LEVEL").ok();

    ResolvedConfig {
        log_level: pick_log_level(env_level.as_deref(), config.general.log_level.as_deref(), true),
        log_file: resolve_log_file(config),
        history_limit: config
            .general
            .history_limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT),
        on_error: pick_choice(
            "error policy",
            cli.on_error,
            std::env::var("NAVSTACK_ON_ERROR").ok(),
            config.replay.on_error,
        ),
        output: pick_choice(
            "output format",
            cli.output,
            std::env::var("NAVSTACK_OUTPUT").ok(),
            config.replay.output,
        ),
        initial_state: resolve_initial_state(&config.playground),
        key_prefix: config
            .playground
            .key_prefix
            .clone()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_KEY_PREFIX.to_string()),
    }
}

// Log file: env → config → default
fn resolve_log_file(config: &NavConfig) -> PathBuf {
    std::env::var("NAVSTACK_LOG_FILE")
        .ok()
        .or_else(|| config.general.log_file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string())
        .into()
}

// Log level: env → config → default
fn pick_log_level(env: Option<&str>, file: Option<&str>, warn_invalid: bool) -> LevelFilter {
    [("NAVSTACK_LOG_LEVEL", env), ("general.log_level", file)]
        .into_iter()
        .find_map(|(origin, value)| {
            let value = value?;
            match value.trim().parse::<LevelFilter>() {
                Ok(level) => Some(level),
                Err(_) => {
                    if warn_invalid {
                        warn!("Ignoring invalid log level in {}: {:?}", origin, value);
                    }
                    None
                }
            }
        })
        .unwrap_or(DEFAULT_LOG_LEVEL)
}

// Replay choices: CLI → env → config → default. CLI and config values are
// already typed by clap and serde, so only the env string can be invalid.
fn pick_choice<T: ValueEnum + Copy + Default>(
    what: &str,
    cli: Option<T>,
    env: Option<String>,
    file: Option<T>,
) -> T {
    cli.or_else(|| {
        let value = env?;
        match <T as ValueEnum>::from_str(value.trim(), true) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid {} in environment: {:?}", what, value);
                None
            }
        }
    })
    .or(file)
    .unwrap_or_default()
}

/// Builds the playground's starting stack. Falls back to the defaults when
/// the configured routes are empty, and to the last route when the index is
/// out of range.
fn resolve_initial_state(playground: &PlaygroundConfig) -> NavigationState {
    let keys: Vec<String> = match &playground.routes {
        Some(routes) if !routes.is_empty() => routes.clone(),
        Some(_) => {
            warn!("playground.routes is empty, using defaults");
            DEFAULT_ROUTES.iter().map(|k| k.to_string()).collect()
        }
        None => DEFAULT_ROUTES.iter().map(|k| k.to_string()).collect(),
    };
    let last = keys.len() - 1;
    let index = match playground.index {
        Some(i) if i <= last => i,
        Some(i) => {
            warn!("playground.index {} out of range, focusing last route", i);
            last
        }
        None => 0,
    };
    let routes = keys.into_iter().map(Route::new).collect();
    // Non-empty with index <= last, so the invariants already hold
    NavigationState::from_parts_unchecked(routes, index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::keys;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_parses() {
        let config = NavConfig::default();
        assert!(config.general.log_level.is_none());
        assert!(config.playground.routes.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = NavConfig::default();
        let resolved = resolve(&config, CliOverrides::default());
        assert_eq!(resolved.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(resolved.key_prefix, DEFAULT_KEY_PREFIX);
        assert_eq!(keys(&resolved.initial_state), vec!["home", "inbox", "settings"]);
        assert_eq!(resolved.initial_state.index(), 0);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = NavConfig {
            general: GeneralConfig {
                history_limit: Some(5),
                ..Default::default()
            },
            playground: PlaygroundConfig {
                routes: Some(vec!["feed".into(), "profile".into()]),
                index: Some(1),
                key_prefix: Some("page".into()),
            },
            ..Default::default()
        };
        let resolved = resolve(&config, CliOverrides::default());
        assert_eq!(resolved.history_limit, 5);
        assert_eq!(resolved.key_prefix, "page");
        assert_eq!(keys(&resolved.initial_state), vec!["feed", "profile"]);
        assert_eq!(resolved.initial_state.index(), 1);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = NavConfig {
            replay: ReplayConfig {
                on_error: Some(ErrorPolicy::Stop),
                output: Some(OutputFormat::Pretty),
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            on_error: Some(ErrorPolicy::Skip),
            output: Some(OutputFormat::Summary),
        };
        let resolved = resolve(&config, cli);
        assert_eq!(resolved.on_error, ErrorPolicy::Skip);
        assert_eq!(resolved.output, OutputFormat::Summary);
    }

    #[test]
    fn test_invalid_env_choice_falls_to_next_layer() {
        let output = pick_choice(
            "output format",
            None,
            Some("yaml".into()),
            Some(OutputFormat::Json),
        );
        assert_eq!(output, OutputFormat::Json);

        let policy: ErrorPolicy = pick_choice("error policy", None, Some("retry".into()), None);
        assert_eq!(policy, ErrorPolicy::Stop);
    }

    #[test]
    fn test_choice_layer_precedence() {
        let cli_wins = pick_choice(
            "output format",
            Some(OutputFormat::Summary),
            Some("json".into()),
            Some(OutputFormat::Pretty),
        );
        assert_eq!(cli_wins, OutputFormat::Summary);

        let env_wins = pick_choice(
            "error policy",
            None,
            Some(" SKIP ".into()),
            Some(ErrorPolicy::Stop),
        );
        assert_eq!(env_wins, ErrorPolicy::Skip);
    }

    #[test]
    fn test_invalid_log_level_falls_to_next_layer() {
        assert_eq!(pick_log_level(Some("loud"), Some("info"), true), LevelFilter::Info);
        assert_eq!(pick_log_level(Some("warn"), Some("info"), true), LevelFilter::Warn);
        assert_eq!(pick_log_level(None, Some("chatty"), true), DEFAULT_LOG_LEVEL);
        assert_eq!(pick_log_level(None, None, false), DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_out_of_range_index_focuses_last() {
        let config = NavConfig {
            playground: PlaygroundConfig {
                routes: Some(vec!["a".into(), "b".into()]),
                index: Some(7),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, CliOverrides::default());
        assert_eq!(resolved.initial_state.index(), 1);
    }

    #[test]
    fn test_empty_routes_use_defaults() {
        let config = NavConfig {
            playground: PlaygroundConfig {
                routes: Some(vec![]),
                ..Default::default()
            },
            ..Default::default()
        };
        let resolved = resolve(&config, CliOverrides::default());
        assert_eq!(resolved.initial_state.len(), 3);
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
log_level = "info"
log_file = "/tmp/nav.log"
history_limit = 10

[replay]
on_error = "skip"
output = "json"

[playground]
routes = ["a", "b", "c"]
index = 2
key_prefix = "tab"
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.general.log_level.as_deref(), Some("info"));
        assert_eq!(config.general.history_limit, Some(10));
        assert_eq!(config.replay.on_error, Some(ErrorPolicy::Skip));
        assert_eq!(config.replay.output, Some(OutputFormat::Json));
        assert_eq!(config.playground.routes.as_ref().map(Vec::len), Some(3));
        assert_eq!(config.playground.key_prefix.as_deref(), Some("tab"));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing, everything else stays default
        let toml_str = r#"
[replay]
output = "summary"
"#;
        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.replay.output, Some(OutputFormat::Summary));
        assert!(config.replay.on_error.is_none());
        assert!(config.general.history_limit.is_none());
        assert!(config.playground.routes.is_none());
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let result = parse_config("[replay]\non_error = \"retry\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_explicit_path_is_io_error() {
        let result = load_config(Some(Path::new("/definitely/not/here/navstack.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_explicit_path_reports_file_source() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general]\nhistory_limit = 3\n").unwrap();

        let (config, source) = load_config(Some(&path)).unwrap();
        assert_eq!(config.general.history_limit, Some(3));
        assert_eq!(source, ConfigSource::File(path));
    }

    #[test]
    fn test_generated_default_is_valid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        generate_default_config(&path).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let config = parse_config(&contents).unwrap();
        assert!(config.general.log_level.is_none());
    }
}
