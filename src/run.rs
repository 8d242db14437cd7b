//! One complete run: inventory report, reinstall README, configuration
//! snapshot.
//!
//! Everything lands under the configured backup root. Steps run strictly in
//! sequence; an error here propagates to the binary's single guard.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::inventory::{self, Inventory};
use crate::report::{render_reinstall_readme, render_report};
use crate::snapshot::{SnapshotBuilder, SnapshotResult};
use crate::stamp::{RunStamp, README_FILE_NAME};

/// Where a run wrote things and what it found.
#[derive(Debug)]
pub struct RunSummary {
    pub report: PathBuf,
    pub brewfile: PathBuf,
    pub readme: PathBuf,
    pub inventory: Inventory,
    pub snapshot: SnapshotResult,
}

pub fn run(config: &Config, stamp: &RunStamp) -> Result<RunSummary> {
    let root = &config.backup_root;
    fs::create_dir_all(root)
        .with_context(|| format!("creating backup directory '{}'", root.display()))?;

    let brewfile = root.join(stamp.brewfile_name());
    let inventory = inventory::collect(config, &brewfile);

    let report = root.join(stamp.report_file_name());
    fs::write(&report, render_report(&inventory, stamp))
        .with_context(|| format!("writing report '{}'", report.display()))?;
    println!("Successfully created {}", report.display());
    println!(
        "Found {} applications and {} Homebrew packages.",
        inventory.apps.len(),
        inventory.brew.formulae.len()
    );

    let readme = root.join(README_FILE_NAME);
    fs::write(&readme, render_reinstall_readme(root, stamp))
        .with_context(|| format!("writing reinstall instructions '{}'", readme.display()))?;
    println!("Created reinstall instructions: {}", readme.display());

    let snapshot = SnapshotBuilder::new(config, root.join(stamp.snapshot_dir_name())).run()?;
    println!(
        "Snapshot written to {} ({} copied, {} exported, {} notes)",
        snapshot.destination().display(),
        snapshot.copied().len(),
        snapshot.exported().len(),
        snapshot.notes().len()
    );

    Ok(RunSummary {
        report,
        brewfile,
        readme,
        inventory,
        snapshot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::STORE_APPS_FALLBACK;
    use crate::test_support::hermetic_config;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;
    use time::macros::datetime;

    fn stamp() -> RunStamp {
        RunStamp::from_datetime(datetime!(2026-10-17 9:30 UTC)).unwrap()
    }

    fn section<'a>(report: &'a str, title: &str) -> Vec<&'a str> {
        report
            .lines()
            .skip_while(|line| *line != title)
            .skip(2)
            .take_while(|line| !line.is_empty())
            .collect()
    }

    #[test]
    fn test_applications_section_lists_only_bundles() {
        let temp = TempDir::new().unwrap();
        let config = hermetic_config(temp.path());
        fs::create_dir_all(config.applications_dir.join("Foo.app")).unwrap();
        fs::create_dir_all(config.applications_dir.join("Bar.app")).unwrap();
        fs::write(config.applications_dir.join("notanapp.txt"), "").unwrap();

        let summary = run(&config, &stamp()).unwrap();

        let report = fs::read_to_string(&summary.report).unwrap();
        assert_eq!(
            section(&report, "Applications (.app)"),
            vec!["Bar.app", "Foo.app"]
        );
    }

    #[test]
    fn test_missing_store_tool_prints_guidance() {
        let temp = TempDir::new().unwrap();
        let config = hermetic_config(temp.path());

        let summary = run(&config, &stamp()).unwrap();

        assert!(summary.inventory.store_apps.is_empty());
        let report = fs::read_to_string(&summary.report).unwrap();
        assert_eq!(
            section(&report, "Mac App Store Apps (mas)"),
            STORE_APPS_FALLBACK.lines().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_store_tool_banner_still_prints_guidance() {
        let temp = TempDir::new().unwrap();
        let mut config = hermetic_config(temp.path());
        let bin = temp.path().join("bin");
        fs::create_dir_all(&bin).unwrap();
        let mas = bin.join("lister-mas");
        fs::write(&mas, "#!/bin/sh\necho 'No installed apps found'\n").unwrap();
        fs::set_permissions(&mas, fs::Permissions::from_mode(0o755)).unwrap();
        config.tools.mas = "lister-mas".into();
        config.fallback_bin_dirs = vec![bin];

        let summary = run(&config, &stamp()).unwrap();

        assert!(summary.inventory.store_apps.is_empty());
        let report = fs::read_to_string(&summary.report).unwrap();
        assert!(report.contains(STORE_APPS_FALLBACK));
        assert!(!report.contains("installed apps found\n"));
    }

    #[test]
    fn test_outputs_are_keyed_by_month() {
        let temp = TempDir::new().unwrap();
        let config = hermetic_config(temp.path());
        fs::create_dir_all(config.home.join(".ssh")).unwrap();
        fs::write(config.home.join(".ssh/id_ed25519.pub"), "ssh-ed25519 AAAA\n").unwrap();

        let summary = run(&config, &stamp()).unwrap();

        let root = &config.backup_root;
        assert_eq!(summary.report, root.join("installed_apps-10-26.txt"));
        assert_eq!(summary.readme, root.join("README-Reinstall.md"));
        assert_eq!(summary.brewfile, root.join("Brewfile-10-26"));
        assert!(!summary.brewfile.exists());
        assert!(summary.readme.is_file());
        assert!(root.join("snapshot-10-26/MANIFEST.md").is_file());
        assert_eq!(summary.snapshot.copied(), ["ssh/id_ed25519.pub"]);
        assert!(fs::read_to_string(&summary.report)
            .unwrap()
            .contains("NOTE: Brewfile was not created"));
    }

    #[test]
    fn test_unwritable_backup_root_is_an_error() {
        let temp = TempDir::new().unwrap();
        let mut config = hermetic_config(temp.path());
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "a file, not a directory").unwrap();
        config.backup_root = blocker.join("backup");

        assert!(run(&config, &stamp()).is_err());
    }
}
