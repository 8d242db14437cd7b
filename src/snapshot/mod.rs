//! Configuration snapshot.
//!
//! Copies and exports a fixed set of user configuration into
//! `snapshot-<MM-YY>/` under the backup root, in this order:
//!
//! 1. `ssh/` - public keys, `known_hosts`, `config`, agent identities
//! 2. `git/` - identity and ignore files
//! 3. `shell/` - startup files
//! 4. `vscode/` - settings, keybindings, snippets, extension list
//! 5. `launchd/` - `~/Library/LaunchAgents`
//! 6. `macos_defaults/` - preference domain dumps
//! 7. `python/` - `pip freeze`
//! 8. `directory_map.txt`
//! 9. `MANIFEST.md`
//!
//! Every step is best-effort: a failure becomes a note and the next step
//! runs. Nothing is retried and nothing already written is rolled back.
//! Private SSH keys are never copied.

mod result;

pub use result::SnapshotResult;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::copy::{safe_copy_dir, safe_copy_file};
use crate::dirmap::{render_directory_map, ExclusionRules, FsTree};
use crate::inventory::{defaults, python};
use crate::process::{write_output, Cmd};
use crate::report::render_manifest;
use crate::stamp::{DIRECTORY_MAP_FILE_NAME, MANIFEST_FILE_NAME};

/// Files in `~/.ssh` besides `*.pub` that are safe to copy.
pub const SSH_SHARED_FILES: &[&str] = &["known_hosts", "config"];

/// Relative to home; the relative path is kept under `git/`.
pub const GIT_FILES: &[&str] = &[
    ".gitconfig",
    ".gitignore_global",
    ".gitmessage",
    ".config/git/config",
    ".config/git/ignore",
];

pub const SHELL_FILES: &[&str] = &[
    ".zshrc",
    ".zprofile",
    ".zshenv",
    ".bashrc",
    ".bash_profile",
    ".profile",
    ".aliases",
];

/// Relative to the VS Code user directory.
pub const VSCODE_FILES: &[&str] = &["settings.json", "keybindings.json"];

/// Whether a file in `~/.ssh` may leave the machine.
pub fn is_public_ssh_material(name: &str) -> bool {
    name.ends_with(".pub") || SSH_SHARED_FILES.contains(&name)
}

/// Runs the snapshot steps and accumulates a [`SnapshotResult`].
pub struct SnapshotBuilder<'a> {
    config: &'a Config,
    result: SnapshotResult,
}

impl<'a> SnapshotBuilder<'a> {
    pub fn new(config: &'a Config, destination: PathBuf) -> Self {
        Self {
            config,
            result: SnapshotResult::new(destination),
        }
    }

    /// Run every step, write `MANIFEST.md`, and return the record.
    ///
    /// Only failing to create the destination or to write the manifest is
    /// an error.
    pub fn run(mut self) -> Result<SnapshotResult> {
        let destination = self.result.destination().to_path_buf();
        fs::create_dir_all(&destination).with_context(|| {
            format!("creating snapshot directory '{}'", destination.display())
        })?;

        self.capture_ssh();
        self.capture_git();
        self.capture_shell();
        self.capture_vscode();
        self.capture_launchd();
        self.capture_defaults();
        self.capture_python();
        self.write_directory_map();

        let manifest = destination.join(MANIFEST_FILE_NAME);
        fs::write(&manifest, render_manifest(&self.result))
            .with_context(|| format!("writing manifest '{}'", manifest.display()))?;

        Ok(self.result)
    }

    fn target(&self, label: &str) -> PathBuf {
        self.result.destination().join(label)
    }

    fn copy_file(&mut self, src: &Path, label: String) -> bool {
        let copied = safe_copy_file(src, &self.target(&label));
        if copied {
            self.result.record_copied(label);
        }
        copied
    }

    fn copy_dir(&mut self, src: &Path, label: String) -> bool {
        let copied = safe_copy_dir(src, &self.target(&label));
        if copied {
            self.result.record_copied(label);
        }
        copied
    }

    /// Capture `cmd` stdout to `label`; a failure becomes a note.
    fn export(&mut self, cmd: Cmd, label: &str) -> bool {
        match cmd.run_to_file(&self.target(label)) {
            Ok(_) => {
                self.result.record_exported(label);
                true
            }
            Err(err) => {
                self.result.note(format!("{label} not exported: {err}"));
                false
            }
        }
    }

    fn capture_ssh(&mut self) {
        let ssh_dir = self.config.home.join(".ssh");
        let mut names: Vec<String> = match fs::read_dir(&ssh_dir) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok())
                .filter_map(|entry| entry.file_name().to_str().map(str::to_owned))
                .filter(|name| is_public_ssh_material(name))
                .collect(),
            Err(err) => {
                tracing::debug!(dir = %ssh_dir.display(), error = %err, "cannot read ssh directory");
                Vec::new()
            }
        };
        names.sort();

        let mut copied = 0;
        for name in names {
            if self.copy_file(&ssh_dir.join(&name), format!("ssh/{name}")) {
                copied += 1;
            }
        }

        // Agent identities are public keys; an empty agent is not worth a note.
        let agent = self.config.command(&self.config.tools.ssh_add).arg("-L");
        match agent.run() {
            Ok(keys) if !keys.trim().is_empty() => {
                let label = "ssh/agent_keys.pub";
                match write_output(&self.target(label), &keys) {
                    Ok(()) => {
                        self.result.record_exported(label);
                        copied += 1;
                    }
                    Err(err) => self.result.note(format!("{label} not written: {err}")),
                }
            }
            Ok(_) => tracing::debug!("ssh agent has no identities"),
            Err(err) => tracing::debug!(error = %err, "ssh-add -L failed"),
        }

        if copied == 0 {
            self.result
                .note("no SSH public keys, known_hosts or config found in ~/.ssh");
        }
    }

    fn capture_git(&mut self) {
        let home = self.config.home.clone();
        let mut copied = 0;
        for rel in GIT_FILES {
            if self.copy_file(&home.join(rel), format!("git/{rel}")) {
                copied += 1;
            }
        }
        if copied == 0 {
            self.result.note("no git identity files found");
        }
    }

    fn capture_shell(&mut self) {
        let home = self.config.home.clone();
        let mut copied = 0;
        for name in SHELL_FILES {
            if self.copy_file(&home.join(name), format!("shell/{name}")) {
                copied += 1;
            }
        }
        if copied == 0 {
            self.result.note("no shell startup files found");
        }
    }

    fn capture_vscode(&mut self) {
        let user_dir = self.config.vscode_user_dir.clone();
        let mut copied = 0;
        for name in VSCODE_FILES {
            if self.copy_file(&user_dir.join(name), format!("vscode/{name}")) {
                copied += 1;
            }
        }
        if self.copy_dir(&user_dir.join("snippets"), "vscode/snippets".to_string()) {
            copied += 1;
        }
        if copied == 0 {
            self.result.note(format!(
                "no VS Code settings found in {}",
                user_dir.display()
            ));
        }

        let code = self
            .config
            .command(&self.config.tools.code)
            .arg("--list-extensions");
        self.export(code, "vscode/extensions.txt");
    }

    fn capture_launchd(&mut self) {
        let agents = self.config.home.join("Library/LaunchAgents");
        if !self.copy_dir(&agents, "launchd/LaunchAgents".to_string()) {
            self.result.note("no LaunchAgents found in ~/Library/LaunchAgents");
        }
    }

    fn capture_defaults(&mut self) {
        let out_dir = self.target("macos_defaults");
        let defaults_cmd = self.config.command(&self.config.tools.defaults);
        let exports =
            defaults::export_domains(&defaults_cmd, &self.config.defaults_domains, &out_dir);

        for export in exports {
            let label = format!("macos_defaults/{}", export.file);
            if export.exported {
                self.result.record_exported(label);
            } else {
                self.result.note(format!(
                    "{label} not exported: defaults read {} failed",
                    export.domain
                ));
            }
        }
    }

    fn capture_python(&mut self) {
        let label = "python/requirements.txt";
        let python_cmd = self.config.command(&self.config.tools.python);
        match python::export_packages(&python_cmd, &self.target(label)) {
            Ok(count) => {
                tracing::debug!(count, "captured python packages");
                self.result.record_exported(label);
            }
            Err(err) => self.result.note(format!("{label} not exported: {err}")),
        }
    }

    fn write_directory_map(&mut self) {
        let rules = ExclusionRules::new(Some(&self.config.backup_root));
        let map = render_directory_map(
            &FsTree,
            &self.config.map_root,
            self.config.map_depth,
            &rules,
        );
        match fs::write(self.target(DIRECTORY_MAP_FILE_NAME), map) {
            Ok(()) => self.result.record_exported(DIRECTORY_MAP_FILE_NAME),
            Err(err) => self
                .result
                .note(format!("{DIRECTORY_MAP_FILE_NAME} not written: {err}")),
        }
    }
}
