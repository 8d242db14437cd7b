//! Run configuration.
//!
//! The binary takes no arguments. Everything that varies between machines
//! comes from an optional TOML file:
//!
//! 1. `APP_LISTER_CONFIG` env var (path to the file; must exist)
//! 2. `<config dir>/app-lister/config.toml` (skipped when absent)
//!
//! Paths may start with `~`, which expands to the home directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dirmap::DEFAULT_MAX_DEPTH;
use crate::inventory::defaults::{default_domains, DefaultsDomain};
use crate::locate::{default_fallback_dirs, ExecutableLocator};
use crate::process::Cmd;

pub const CONFIG_ENV: &str = "APP_LISTER_CONFIG";

const DEFAULT_BACKUP_ROOT: &str = "~/Library/CloudStorage/Dropbox/Mac Installed Apps";
const DEFAULT_APPLICATIONS_DIR: &str = "/Applications";
const DEFAULT_VSCODE_USER_DIR: &str = "~/Library/Application Support/Code/User";

/// Program names for every external tool the run spawns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tools {
    pub brew: String,
    pub mas: String,
    pub defaults: String,
    pub ssh_add: String,
    pub python: String,
    pub code: String,
}

impl Default for Tools {
    fn default() -> Self {
        Self {
            brew: "brew".to_string(),
            mas: "mas".to_string(),
            defaults: "defaults".to_string(),
            ssh_add: "ssh-add".to_string(),
            python: "python3".to_string(),
            code: "code".to_string(),
        }
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Config {
    pub home: PathBuf,
    pub backup_root: PathBuf,
    pub applications_dir: PathBuf,
    pub map_root: PathBuf,
    pub map_depth: usize,
    pub vscode_user_dir: PathBuf,
    /// Fixed roots for executable lookup, also appended to every child's `PATH`.
    pub fallback_bin_dirs: Vec<PathBuf>,
    pub tools: Tools,
    pub defaults_domains: Vec<DefaultsDomain>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigToml {
    backup_root: Option<String>,
    applications_dir: Option<String>,
    map_root: Option<String>,
    map_depth: Option<usize>,
    vscode_user_dir: Option<String>,
    fallback_bin_dirs: Option<Vec<String>>,
    tools: Option<Tools>,
    defaults_domains: Option<Vec<DefaultsDomain>>,
}

impl Config {
    /// Built-in defaults for a user whose home is `home`.
    pub fn for_home(home: PathBuf) -> Self {
        Self {
            backup_root: expand_home(&home, DEFAULT_BACKUP_ROOT),
            applications_dir: PathBuf::from(DEFAULT_APPLICATIONS_DIR),
            map_root: home.clone(),
            map_depth: DEFAULT_MAX_DEPTH,
            vscode_user_dir: expand_home(&home, DEFAULT_VSCODE_USER_DIR),
            fallback_bin_dirs: default_fallback_dirs(),
            tools: Tools::default(),
            defaults_domains: default_domains(),
            home,
        }
    }

    /// Load from the usual locations, falling back to defaults.
    pub fn load() -> Result<Self> {
        let home = dirs::home_dir().context("cannot determine home directory")?;

        if let Some(path) = env::var_os(CONFIG_ENV) {
            return Self::from_file(home, Path::new(&path));
        }
        match dirs::config_dir().map(|dir| dir.join("app-lister").join("config.toml")) {
            Some(path) if path.is_file() => Self::from_file(home, &path),
            _ => Ok(Self::for_home(home)),
        }
    }

    pub fn from_file(home: PathBuf, path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config '{}'", path.display()))?;
        Self::from_toml_str(home, &text)
            .with_context(|| format!("parsing config '{}'", path.display()))
    }

    pub fn from_toml_str(home: PathBuf, text: &str) -> Result<Self> {
        let parsed: ConfigToml = toml::from_str(text)?;
        let expand = |raw: String| expand_home(&home, &raw);
        let mut config = Self::for_home(home.clone());

        if let Some(raw) = parsed.backup_root {
            config.backup_root = expand(raw);
        }
        if let Some(raw) = parsed.applications_dir {
            config.applications_dir = expand(raw);
        }
        if let Some(raw) = parsed.map_root {
            config.map_root = expand(raw);
        }
        if let Some(raw) = parsed.vscode_user_dir {
            config.vscode_user_dir = expand(raw);
        }
        if let Some(bin_dirs) = parsed.fallback_bin_dirs {
            config.fallback_bin_dirs = bin_dirs.into_iter().map(expand).collect();
        }
        if let Some(depth) = parsed.map_depth {
            config.map_depth = depth;
        }
        if let Some(tools) = parsed.tools {
            config.tools = tools;
        }
        if let Some(domains) = parsed.defaults_domains {
            config.defaults_domains = domains;
        }
        Ok(config)
    }

    /// Base command for `program` with the fallback directories on `PATH`.
    pub fn command(&self, program: &str) -> Cmd {
        Cmd::new(program).search_paths(self.fallback_bin_dirs.iter().cloned())
    }

    /// Locator that checks the inherited `PATH`, then the fallback directories.
    pub fn locator(&self) -> ExecutableLocator {
        ExecutableLocator::from_env(&self.fallback_bin_dirs)
    }
}

fn expand_home(home: &Path, raw: &str) -> PathBuf {
    if raw == "~" {
        return home.to_path_buf();
    }
    match raw.strip_prefix("~/") {
        Some(rest) => home.join(rest),
        None => PathBuf::from(raw),
    }
}
