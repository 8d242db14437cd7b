//! Fixtures shared by unit tests.

use std::fs;
use std::path::Path;

use crate::config::{Config, Tools};

pub(crate) const MISSING_TOOL: &str = "definitely_not_a_real_command_12345";

/// Config rooted in `root/home` with every external tool unavailable, so a
/// run touches nothing outside the temp directory.
pub(crate) fn hermetic_config(root: &Path) -> Config {
    let home = root.join("home");
    fs::create_dir_all(&home).unwrap();

    let mut config = Config::for_home(home.clone());
    config.backup_root = home.join("Backups/mac");
    config.applications_dir = root.join("Applications");
    config.fallback_bin_dirs = Vec::new();
    config.tools = Tools {
        brew: MISSING_TOOL.into(),
        mas: MISSING_TOOL.into(),
        defaults: MISSING_TOOL.into(),
        ssh_add: MISSING_TOOL.into(),
        python: MISSING_TOOL.into(),
        code: MISSING_TOOL.into(),
    };
    config
}
