//! Text documents written by a run: the main report, the reinstall README
//! and the snapshot manifest.
//!
//! Rendering is pure; callers decide where the strings go.

use std::fmt::Write as _;
use std::path::Path;

use crate::inventory::Inventory;
use crate::snapshot::SnapshotResult;
use crate::stamp::RunStamp;

const RULE_WIDTH: usize = 50;

/// Printed in place of an empty store-apps section.
pub const STORE_APPS_FALLBACK: &str = "mas not installed, not in PATH for launchd, not signed into App Store, or no MAS apps detected\n\
Tip: run `brew install mas` and then `mas list` in Terminal to verify.\n";

fn section(out: &mut String, title: &str, items: &[String]) {
    out.push_str(title);
    out.push('\n');
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    for item in items {
        out.push_str(item);
        out.push('\n');
    }
}

/// `installed_apps-<MM-YY>.txt`.
pub fn render_report(inventory: &Inventory, stamp: &RunStamp) -> String {
    let mut out = format!("System Report as of {}\n", stamp.month_title());
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push_str("\n\n");

    section(&mut out, "Applications (.app)", &inventory.apps);
    out.push('\n');
    section(
        &mut out,
        "Homebrew Packages (non-cask)",
        &inventory.brew.formulae,
    );
    out.push('\n');
    section(
        &mut out,
        "Homebrew Casks (GUI Apps via brew)",
        &inventory.brew.casks,
    );
    out.push('\n');
    section(&mut out, "Mac App Store Apps (mas)", &inventory.store_apps);
    if inventory.store_apps.is_empty() {
        out.push_str(STORE_APPS_FALLBACK);
    }

    if inventory.brew.brewfile_created {
        out.push_str("\nNOTE: A Brewfile has been created in the same folder as this report and can be used to reinstall all Homebrew packages.\n");
        let _ = writeln!(
            out,
            "To reinstall using the Brewfile, run: brew bundle install --file \"{}\"",
            stamp.brewfile_name()
        );
    } else {
        out.push_str(
            "\nNOTE: Brewfile was not created (Homebrew missing or brew bundle dump failed).\n",
        );
    }
    out
}

/// `README-Reinstall.md`, pointing at the Brewfile in `backup_root`.
pub fn render_reinstall_readme(backup_root: &Path, stamp: &RunStamp) -> String {
    let mut out = String::from("# Mac Reinstall Instructions\n\n");
    out.push_str("## 1. Install Homebrew\n");
    out.push_str("https://brew.sh\n\n");
    out.push_str("## 2. Restore Applications\n");
    let _ = write!(
        out,
        "Run from this folder:\n\n```\ncd \"{}\"\nbrew bundle install --file \"{}\"\n```\n\n",
        backup_root.display(),
        stamp.brewfile_name()
    );
    out.push_str("## 3. Mac App Store Apps\n");
    out.push_str("Install manually or use 'mas list' if you track them separately.\n\n");
    out.push_str("## 4. Configuration Snapshot\n");
    let _ = write!(
        out,
        "SSH public keys, git and shell config, editor settings and macOS defaults are in `{}/`.\nSee `{}/MANIFEST.md` for what was captured.\n\n",
        stamp.snapshot_dir_name(),
        stamp.snapshot_dir_name()
    );
    out.push_str("## 5. Notes\n");
    out.push_str("This file was auto-generated by app-lister.\n");
    out
}

fn bullet_list(out: &mut String, title: &str, items: &[String]) {
    let _ = writeln!(out, "## {title}\n");
    if items.is_empty() {
        out.push_str("- (none)\n");
    }
    for item in items {
        let _ = writeln!(out, "- {item}");
    }
    out.push('\n');
}

/// `MANIFEST.md` inside the snapshot directory.
pub fn render_manifest(result: &SnapshotResult) -> String {
    let mut out = String::from("# Snapshot Manifest\n\n");
    let _ = writeln!(out, "Destination: `{}`\n", result.destination().display());
    bullet_list(&mut out, "Copied", result.copied());
    bullet_list(&mut out, "Exported", result.exported());
    bullet_list(&mut out, "Notes", result.notes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::BrewInventory;
    use time::macros::datetime;

    fn stamp() -> RunStamp {
        RunStamp::from_datetime(datetime!(2026-10-17 9:30 UTC)).unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Lines between a section's dashed rule and the next blank line.
    fn section_lines<'a>(report: &'a str, title: &str) -> Vec<&'a str> {
        report
            .lines()
            .skip_while(|line| *line != title)
            .skip(2)
            .take_while(|line| !line.is_empty())
            .collect()
    }

    #[test]
    fn test_report_sections_and_brewfile_note() {
        let inventory = Inventory {
            apps: strings(&["Bar.app", "Foo.app"]),
            brew: BrewInventory {
                formulae: strings(&["git", "wget"]),
                casks: strings(&["iterm2"]),
                brewfile_created: true,
            },
            store_apps: strings(&["Xcode (15.0)"]),
        };

        let report = render_report(&inventory, &stamp());

        assert!(report.starts_with(&format!(
            "System Report as of October 2026\n{}\n\n",
            "=".repeat(50)
        )));
        assert_eq!(
            section_lines(&report, "Applications (.app)"),
            vec!["Bar.app", "Foo.app"]
        );
        assert_eq!(
            section_lines(&report, "Homebrew Packages (non-cask)"),
            vec!["git", "wget"]
        );
        assert_eq!(
            section_lines(&report, "Homebrew Casks (GUI Apps via brew)"),
            vec!["iterm2"]
        );
        assert_eq!(
            section_lines(&report, "Mac App Store Apps (mas)"),
            vec!["Xcode (15.0)"]
        );
        assert!(report.contains(
            "To reinstall using the Brewfile, run: brew bundle install --file \"Brewfile-10-26\"\n"
        ));
        assert!(!report.contains(STORE_APPS_FALLBACK));
    }

    #[test]
    fn test_empty_store_apps_prints_guidance() {
        let report = render_report(&Inventory::default(), &stamp());

        assert_eq!(
            section_lines(&report, "Mac App Store Apps (mas)"),
            STORE_APPS_FALLBACK.lines().collect::<Vec<_>>()
        );
        assert!(report.ends_with(
            "\nNOTE: Brewfile was not created (Homebrew missing or brew bundle dump failed).\n"
        ));
    }

    #[test]
    fn test_readme_references_brewfile_and_folder() {
        let readme = render_reinstall_readme(Path::new("/Users/alex/Backups"), &stamp());

        assert!(readme.starts_with("# Mac Reinstall Instructions\n"));
        assert!(readme.contains(
            "cd \"/Users/alex/Backups\"\nbrew bundle install --file \"Brewfile-10-26\"\n"
        ));
        assert!(readme.contains("snapshot-10-26/MANIFEST.md"));
    }

    #[test]
    fn test_manifest_lists_every_record() {
        let mut result = SnapshotResult::new("/backup/snapshot-10-26".into());
        result.record_copied("ssh/id_ed25519.pub");
        result.record_exported("directory_map.txt");

        let manifest = render_manifest(&result);

        assert!(manifest.contains("Destination: `/backup/snapshot-10-26`"));
        assert!(manifest.contains("## Copied\n\n- ssh/id_ed25519.pub\n"));
        assert!(manifest.contains("## Exported\n\n- directory_map.txt\n"));
        assert!(manifest.contains("## Notes\n\n- (none)\n"));
    }
}
