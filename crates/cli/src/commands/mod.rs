pub mod extract;
pub mod list;

use std::path::PathBuf;

use clap::{Args, Subcommand};
pub use extract::ExtractArgs;
pub use list::ListArgs;

/// Common error type for command handlers
pub type CommandResult<T> = anyhow::Result<T>;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List contents of archive.
    ///
    /// Example:
    ///   x7z l backup.7z
    ///   x7z l --json -p secret backup.7z docs/readme.txt
    L(ListArgs),

    /// Extract files with full paths.
    ///
    /// Example:
    ///   x7z x backup.7z -o /tmp/restore
    X(ExtractArgs),

    /// Test integrity of archive (not implemented, prints help).
    T(TestArgs),
}

#[derive(Debug, Args)]
pub struct TestArgs {
    /// Archive to test
    pub archive: PathBuf,
}
