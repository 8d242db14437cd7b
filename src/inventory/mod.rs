//! Inventory collectors.
//!
//! Each collector asks one external authority what is installed and returns
//! a sorted list (or a flag). An absent or failing authority means an empty
//! result, never an error.
//!
//! - [`apps`] - application bundles in `/Applications`
//! - [`brew`] - Homebrew formulae, casks and the Brewfile
//! - [`mas`] - Mac App Store apps
//! - [`defaults`] - macOS preference domains
//! - [`python`] - `pip freeze`

pub mod apps;
pub mod brew;
pub mod defaults;
pub mod mas;
pub mod python;

use std::path::Path;

use crate::config::Config;
pub use brew::BrewInventory;

/// Everything the main report lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    pub apps: Vec<String>,
    pub brew: BrewInventory,
    pub store_apps: Vec<String>,
}

/// Run the report collectors in order. The Brewfile is dumped to `brewfile`.
pub fn collect(config: &Config, brewfile: &Path) -> Inventory {
    let apps = apps::list_app_bundles(&config.applications_dir);
    let brew = brew::collect_brew(&config.command(&config.tools.brew), brewfile);
    let store_apps = mas::collect_store_apps(&config.locator(), &config.tools.mas);

    Inventory {
        apps,
        brew,
        store_apps,
    }
}

/// Non-empty trimmed lines of command output, sorted.
pub(crate) fn sorted_lines(output: &str) -> Vec<String> {
    let mut lines: Vec<String> = output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect();
    lines.sort();
    lines
}
