//! Mac App Store purchases via `mas list`.
//!
//! `mas` is usually a Homebrew install, so it is located through an
//! [`ExecutableLocator`] rather than the inherited `PATH` alone.

use crate::locate::ExecutableLocator;
use crate::process::Cmd;

/// Names of installed App Store apps, sorted. Empty when `mas` cannot be
/// found, fails, or lists nothing.
pub fn collect_store_apps(locator: &ExecutableLocator, program: &str) -> Vec<String> {
    let Some(mas) = locator.locate(program) else {
        tracing::debug!(program, "mas not found; store apps unavailable");
        return Vec::new();
    };

    match Cmd::new(&mas).arg("list").run() {
        Ok(stdout) => parse_store_listing(&stdout),
        Err(err) => {
            tracing::debug!(error = %err, "mas list failed");
            Vec::new()
        }
    }
}

/// Parse `mas list` output.
///
/// Each line is `<identifier> <name> (<version>)`; the identifier is dropped
/// and the rest kept. Lines whose first token is not a numeric identifier
/// (such as the "No installed apps found" banner) or that carry no name are
/// skipped.
pub fn parse_store_listing(output: &str) -> Vec<String> {
    let mut apps: Vec<String> = output.lines().filter_map(parse_store_line).collect();
    apps.sort();
    apps
}

fn parse_store_line(line: &str) -> Option<String> {
    let (id, rest) = line.trim().split_once(char::is_whitespace)?;
    if !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let name = rest.trim();
    (!name.is_empty()).then(|| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locate::SearchStrategy;
    use tempfile::TempDir;

    #[test]
    fn test_parse_store_listing() {
        let output = "497799835 Xcode (15.0)\n409183694 Keynote (13.1)\n";
        assert_eq!(
            parse_store_listing(output),
            vec!["Keynote (13.1)", "Xcode (15.0)"]
        );
    }

    #[test]
    fn test_parse_store_listing_padded_columns() {
        let output = "  1295203466  Microsoft Remote Desktop  (10.9.4)\n   904280696  Things 3  (3.20)\n";
        assert_eq!(
            parse_store_listing(output),
            vec!["Microsoft Remote Desktop  (10.9.4)", "Things 3  (3.20)"]
        );
    }

    #[test]
    fn test_parse_store_listing_skips_malformed_lines() {
        let output = "\nNo installed apps found\n12345\n   \n";
        assert!(parse_store_listing(output).is_empty());
        assert!(parse_store_listing("12345\n\n").is_empty());
        assert!(parse_store_listing("Error: not signed in\n").is_empty());
    }

    #[test]
    fn test_missing_mas_yields_empty() {
        let temp = TempDir::new().unwrap();
        let locator = ExecutableLocator::new(vec![
            SearchStrategy::Inherited(None),
            SearchStrategy::Roots(vec![temp.path().to_path_buf()]),
        ]);

        assert!(collect_store_apps(&locator, "mas").is_empty());
    }
}
