//! Homebrew formulae, casks and the Brewfile bundle dump.

use std::path::Path;

use crate::inventory::sorted_lines;
use crate::process::{Cmd, CmdError};

/// What Homebrew reported, plus whether the Brewfile was written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrewInventory {
    pub formulae: Vec<String>,
    pub casks: Vec<String>,
    pub brewfile_created: bool,
}

/// Query Homebrew through `brew` and dump a Brewfile to `brewfile`.
///
/// `brew` is the base command (program plus search paths); subcommands are
/// appended here. When the program is missing the whole collector degrades
/// to an empty inventory and says so once.
pub fn collect_brew(brew: &Cmd, brewfile: &Path) -> BrewInventory {
    let formulae = match list(brew, "--formula") {
        Ok(formulae) => formulae,
        Err(err) if err.is_not_found() => {
            tracing::warn!("Homebrew not found. Skipping brew packages.");
            return BrewInventory::default();
        }
        Err(err) => {
            tracing::debug!(error = %err, "brew list --formula failed");
            Vec::new()
        }
    };

    let casks = list(brew, "--cask").unwrap_or_else(|err| {
        tracing::debug!(error = %err, "brew list --cask failed");
        Vec::new()
    });

    let brewfile_created = dump_brewfile(brew, brewfile);

    BrewInventory {
        formulae,
        casks,
        brewfile_created,
    }
}

fn list(brew: &Cmd, kind: &str) -> Result<Vec<String>, CmdError> {
    brew.clone()
        .args(["list", kind])
        .run()
        .map(|stdout| sorted_lines(&stdout))
}

/// `brew bundle dump` writes the file itself; stdout is ignored.
fn dump_brewfile(brew: &Cmd, brewfile: &Path) -> bool {
    let dump = brew
        .clone()
        .args(["bundle", "dump", "--file"])
        .arg(brewfile)
        .arg("--force");
    match dump.run() {
        Ok(_) => true,
        Err(err) => {
            tracing::warn!(brewfile = %brewfile.display(), error = %err, "brew bundle dump failed");
            false
        }
    }
}
