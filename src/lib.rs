//! Inventory of a Mac's installed software plus a snapshot of user
//! configuration, written as plain text to a backup folder.
//!
//! A run collects installed applications, Homebrew formulae and casks, and
//! Mac App Store apps into a dated report, dumps a Brewfile, writes reinstall
//! instructions, and snapshots SSH public material, git and shell config,
//! editor settings, LaunchAgents, macOS defaults and Python packages.
//!
//! - **Command runner** ([`process`]) - spawn tools, capture stdout
//! - **Executable lookup** ([`locate`]) - inherited `PATH`, then fixed roots
//! - **Safe copy** ([`copy`]) - best-effort file and tree copies
//! - **Collectors** ([`inventory`]) - one per external authority
//! - **Directory map** ([`dirmap`]) - bounded, filtered tree listing
//! - **Snapshot** ([`snapshot`]) - the ordered copy/export steps
//!
//! # Architecture
//!
//! ```text
//! external tools / filesystem
//!     │
//!     ├── inventory collectors ──► report, Brewfile, README
//!     │
//!     └── snapshot steps (copy, export, dirmap) ──► snapshot-MM-YY/, MANIFEST.md
//! ```
//!
//! Data only flows outward; nothing written is ever read back.
//!
//! # Example
//!
//! ```rust,ignore
//! use app_lister::{run, Config, RunStamp};
//!
//! let config = Config::load()?;
//! let summary = run::run(&config, &RunStamp::now()?)?;
//! println!("{} notes", summary.snapshot.notes().len());
//! ```

pub mod config;
pub mod copy;
pub mod dirmap;
pub mod inventory;
pub mod locate;
pub mod process;
pub mod report;
pub mod run;
pub mod snapshot;
pub mod stamp;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use run::RunSummary;
pub use snapshot::SnapshotResult;
pub use stamp::RunStamp;
