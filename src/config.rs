use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[cfg(feature = "sts")]
use crate::check::StsSettings;
use crate::storage::{BlockLayout, StoreLayouts, StorePaths};

const CREDENTIALS_FILE_ENV: &str = "AWS_SHARED_CREDENTIALS_FILE";
const CONFIG_FILE_ENV: &str = "AWS_CONFIG_FILE";

fn default_profile_env_var() -> String {
    "AWS_PROFILE".to_string()
}

fn default_shell() -> String {
    "/bin/sh".to_string()
}

fn default_credentials_body_lines() -> usize {
    2
}

fn default_config_body_lines() -> usize {
    1
}

/// Number of lines following each header, per store file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Lines after `[name]` in the credentials file.
    #[serde(default = "default_credentials_body_lines")]
    pub credentials_body_lines: usize,

    /// Lines after `[name]` / `[profile name]` in the config file.
    #[serde(default = "default_config_body_lines")]
    pub config_body_lines: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            credentials_body_lines: default_credentials_body_lines(),
            config_body_lines: default_config_body_lines(),
        }
    }
}

impl LayoutConfig {
    pub fn layouts(&self) -> StoreLayouts {
        StoreLayouts {
            credentials: BlockLayout::credentials().with_body_lines(self.credentials_body_lines),
            config: BlockLayout::config().with_body_lines(self.config_body_lines),
        }
    }
}

/// Settings for `apply` sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplySettings {
    pub shell: String,
    pub profile_env_var: String,
}

/// Application configuration as written in `awscred.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Credentials file. Relative paths resolve from the config file's
    /// directory; a leading `~/` resolves from the home directory.
    pub credentials_file: Option<PathBuf>,

    /// Config file, resolved like `credentials_file`.
    pub config_file: Option<PathBuf>,

    /// Variable set for commands run by `apply`.
    #[serde(default = "default_profile_env_var")]
    pub profile_env_var: String,

    /// Shell used to run each `apply` command line.
    #[serde(default = "default_shell")]
    pub shell: String,

    #[serde(default)]
    pub layout: LayoutConfig,

    #[cfg(feature = "sts")]
    #[serde(default)]
    pub sts: StsSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials_file: None,
            config_file: None,
            profile_env_var: default_profile_env_var(),
            shell: default_shell(),
            layout: LayoutConfig::default(),
            #[cfg(feature = "sts")]
            sts: StsSettings::default(),
        }
    }
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load config from a file, or return default config if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Returns the default config file path: `~/.config/awscred/awscred.toml`
/// (platform config directory), or `./awscred.toml` when that is unknown.
pub fn default_config_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("awscred").join("awscred.toml"),
        None => PathBuf::from("awscred.toml"),
    }
}

/// Expand a leading `~/` and anchor relative paths at `base_dir`.
fn resolve_path(path: &Path, base_dir: &Path, home: Option<&Path>) -> PathBuf {
    if let (Ok(rest), Some(home)) = (path.strip_prefix("~"), home) {
        return home.join(rest);
    }
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// Where a store file lives when nothing in the config names it.
fn fallback_path(env_var: &str, file_name: &str, home: Option<&Path>) -> Result<PathBuf> {
    if let Some(value) = std::env::var_os(env_var).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(value));
    }
    let home = home.with_context(|| {
        format!("Could not find home directory; set {env_var} or configure the path explicitly")
    })?;
    Ok(home.join(".aws").join(file_name))
}

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub credentials_file: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
}

/// Loaded configuration with resolved paths.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedConfig {
    pub store: StorePaths,
    pub layout: LayoutConfig,
    pub apply: ApplySettings,
    #[cfg(feature = "sts")]
    pub sts: StsSettings,
}

impl ResolvedConfig {
    /// Load `config_path` (defaults when missing) and resolve the store paths.
    pub fn load_or_default(config_path: &Path, overrides: Overrides) -> Result<Self> {
        let config = Config::load_or_default(config_path)?;
        let config_dir = match config_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => std::env::current_dir().context("Failed to get current directory")?,
        };
        Self::resolve(config, &config_dir, overrides, dirs::home_dir().as_deref())
    }

    fn resolve(
        config: Config,
        config_dir: &Path,
        overrides: Overrides,
        home: Option<&Path>,
    ) -> Result<Self> {
        let credentials_file = match overrides.credentials_file {
            Some(path) => path,
            None => match &config.credentials_file {
                Some(path) => resolve_path(path, config_dir, home),
                None => fallback_path(CREDENTIALS_FILE_ENV, "credentials", home)?,
            },
        };
        let config_file = match overrides.config_file {
            Some(path) => path,
            None => match &config.config_file {
                Some(path) => resolve_path(path, config_dir, home),
                None => fallback_path(CONFIG_FILE_ENV, "config", home)?,
            },
        };

        Ok(Self {
            store: StorePaths::new(credentials_file, config_file),
            layout: config.layout,
            apply: ApplySettings {
                shell: config.shell,
                profile_env_var: config.profile_env_var,
            },
            #[cfg(feature = "sts")]
            sts: config.sts,
        })
    }

    pub fn layouts(&self) -> StoreLayouts {
        self.layout.layouts()
    }
}
