//! Installed Python packages via `pip freeze`.

use std::path::Path;

use crate::process::{Cmd, CmdError};

/// Capture `<python> -m pip freeze` to `dest`. Returns the package count.
pub fn export_packages(python: &Cmd, dest: &Path) -> Result<usize, CmdError> {
    python
        .clone()
        .args(["-m", "pip", "freeze"])
        .run_to_file(dest)
        .map(|stdout| stdout.lines().filter(|line| !line.trim().is_empty()).count())
}
