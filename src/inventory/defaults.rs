//! macOS preference domains exported with `defaults read`.

use std::path::Path;

use serde::Deserialize;

use crate::process::Cmd;

/// A preference domain and the file its dump is written to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultsDomain {
    pub domain: String,
    pub file: String,
}

/// Domains exported when the config file does not override the list.
pub const DEFAULT_DOMAINS: &[(&str, &str)] = &[
    ("NSGlobalDomain", "global.txt"),
    ("com.apple.dock", "dock.txt"),
    ("com.apple.finder", "finder.txt"),
    ("com.apple.screencapture", "screencapture.txt"),
    ("com.apple.AppleMultitouchTrackpad", "trackpad.txt"),
    ("com.apple.Terminal", "terminal.txt"),
];

pub fn default_domains() -> Vec<DefaultsDomain> {
    DEFAULT_DOMAINS
        .iter()
        .map(|(domain, file)| DefaultsDomain {
            domain: domain.to_string(),
            file: file.to_string(),
        })
        .collect()
}

/// Outcome of one `defaults read`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainExport {
    pub domain: String,
    pub file: String,
    pub exported: bool,
}

/// Run `defaults read <domain>` for each domain, writing to `out_dir/<file>`.
pub fn export_domains(
    defaults: &Cmd,
    domains: &[DefaultsDomain],
    out_dir: &Path,
) -> Vec<DomainExport> {
    domains
        .iter()
        .map(|entry| {
            let result = defaults
                .clone()
                .args(["read", entry.domain.as_str()])
                .run_to_file(&out_dir.join(&entry.file));
            if let Err(err) = &result {
                tracing::debug!(domain = %entry.domain, error = %err, "defaults read failed");
            }
            DomainExport {
                domain: entry.domain.clone(),
                file: entry.file.clone(),
                exported: result.is_ok(),
            }
        })
        .collect()
}
